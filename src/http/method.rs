use std::borrow::Cow;

use super::MessageError;
use crate::matches;

/// HTTP Method.
///
/// Any [token][rfc] is accepted, its casing is preserved and comparison is case-sensitive.
///
/// [rfc]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-methods>
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Method(Cow<'static, str>);

methods! {
    /// The [GET] method requests transfer of a current selected representation for the target
    /// resource.
    ///
    /// [GET]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-get>
    pub const GET = "GET";
    /// The [HEAD] method is identical to GET except that the server MUST NOT send content in the
    /// response.
    ///
    /// [HEAD]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-head>
    pub const HEAD = "HEAD";
    /// The [POST] method requests that the target resource process the representation enclosed in
    /// the request.
    ///
    /// [POST]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-post>
    pub const POST = "POST";
    /// [PUT]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-put>
    pub const PUT = "PUT";
    /// [DELETE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-delete>
    pub const DELETE = "DELETE";
    /// [CONNECT]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-connect>
    pub const CONNECT = "CONNECT";
    /// [OPTIONS]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-options>
    pub const OPTIONS = "OPTIONS";
    /// [TRACE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-trace>
    pub const TRACE = "TRACE";
    /// [PATCH]: <https://www.rfc-editor.org/rfc/rfc5789#section-2>
    pub const PATCH = "PATCH";
}

impl Method {
    /// Parse a method token.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Method`] if the input is empty or contains non token character.
    pub fn parse(value: &str) -> Result<Self, MessageError> {
        if !matches::is_token_str(value) {
            return Err(MessageError::Method(value.to_owned()));
        }
        Ok(Self::from_standard(value).unwrap_or_else(|| Self(Cow::Owned(value.to_owned()))))
    }

    /// Returns string representation of the method.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Method {
    #[inline]
    fn default() -> Self {
        Self::GET
    }
}

impl std::str::FromStr for Method {
    type Err = MessageError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for Method {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Method {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        str::fmt(self.as_str(), f)
    }
}

impl std::fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        str::fmt(self.as_str(), f)
    }
}

// ===== Macros =====

macro_rules! methods {
    (
        $(
           $(#[$doc:meta])*
           pub const $name:ident = $val:literal;
        )*
    ) => {
        impl Method {
            $(
               $(#[$doc])*
               pub const $name: Self = Self(Cow::Borrowed($val));
            )*

            fn from_standard(src: &str) -> Option<Method> {
                match src {
                    $(
                        $val => Some(Self::$name),
                    )*
                    _ => None,
                }
            }
        }
    };
}

use methods;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_method() {
        assert_eq!(Method::parse("GET").unwrap(), Method::GET);
        assert_eq!(Method::parse("M-SEARCH").unwrap(), "M-SEARCH");
        // case-sensitive
        assert_ne!(Method::parse("get").unwrap(), Method::GET);
        assert_eq!(Method::parse("get").unwrap().as_str(), "get");

        let err = Method::parse("INVALID METHOD").unwrap_err();
        assert_eq!(err.to_string(), "Invalid HTTP method \"INVALID METHOD\" provided");
        assert!(Method::parse("").is_err());
    }
}
