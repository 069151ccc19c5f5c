/// Arithmetic contract of a finite field.
///
/// Implementors supply all four operations; there is no fallback to ordinary
/// integer arithmetic, which is not a field over bytes.
pub trait Field {
    type Elem: Copy + Eq;

    fn zero(&self) -> Self::Elem;
    fn one(&self) -> Self::Elem;

    fn add(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;
    fn sub(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;
    fn mul(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;
    fn div(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;
}
