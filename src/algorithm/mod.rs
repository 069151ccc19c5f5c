pub mod field;
pub mod gf256;
