pub mod bits;
pub mod field;
pub mod matrix;
