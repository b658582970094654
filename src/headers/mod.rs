//! HTTP Header Multimap.
mod map;

#[cfg(test)]
mod test;

pub use map::{HeaderMap, Iter};

// ===== Owned Traits =====

/// A type that can be used as header values, a single value or a sequence of values.
#[allow(private_bounds)]
pub trait IntoHeaderValues: Sealed {}
trait Sealed: Sized {
    fn into_header_values(self) -> Vec<String>;
}

/// Collect values eagerly, e.g: to compare them before insertion.
#[inline]
pub(crate) fn into_values<V: IntoHeaderValues>(values: V) -> Vec<String> {
    values.into_header_values()
}

impl IntoHeaderValues for &str {}
impl Sealed for &str {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoHeaderValues for String {}
impl Sealed for String {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoHeaderValues for &String {}
impl Sealed for &String {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoHeaderValues for Vec<String> {}
impl Sealed for Vec<String> {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        self
    }
}

impl IntoHeaderValues for Vec<&str> {}
impl Sealed for Vec<&str> {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl IntoHeaderValues for &[String] {}
impl Sealed for &[String] {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoHeaderValues for &[&str] {}
impl Sealed for &[&str] {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        self.iter().map(|v| (*v).to_owned()).collect()
    }
}

impl<const N: usize> IntoHeaderValues for [&str; N] {}
impl<const N: usize> Sealed for [&str; N] {
    #[inline]
    fn into_header_values(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}
