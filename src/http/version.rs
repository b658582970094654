use super::MessageError;

/// HTTP Protocol Version.
///
/// One of `1.0`, `1.1`, `2.0` or `2.1`.
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version(Inner);

#[derive(PartialEq, PartialOrd, Copy, Clone, Eq, Ord, Hash)]
enum Inner {
    Http10,
    Http11,
    Http20,
    Http21,
}

impl Version {
    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version(Inner::Http10);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version(Inner::Http11);

    /// `HTTP/2.0`
    pub const HTTP_20: Version = Version(Inner::Http20);

    /// `HTTP/2.1`
    pub const HTTP_21: Version = Version(Inner::Http21);

    /// Parse protocol version in the form of `[1-2].[0-1]`, e.g: `1.1`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Version`] for any other input.
    pub fn parse(value: &str) -> Result<Self, MessageError> {
        match value {
            "1.0" => Ok(Self::HTTP_10),
            "1.1" => Ok(Self::HTTP_11),
            "2.0" => Ok(Self::HTTP_20),
            "2.1" => Ok(Self::HTTP_21),
            _ => Err(MessageError::Version(value.to_owned())),
        }
    }

    /// Returns the protocol version number, e.g: `1.1`
    #[inline]
    pub const fn protocol(&self) -> &'static str {
        match self.0 {
            Inner::Http10 => "1.0",
            Inner::Http11 => "1.1",
            Inner::Http20 => "2.0",
            Inner::Http21 => "2.1",
        }
    }

    /// Returns string representation of HTTP version, e.g: `HTTP/1.1`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Http10 => "HTTP/1.0",
            Inner::Http11 => "HTTP/1.1",
            Inner::Http20 => "HTTP/2.0",
            Inner::Http21 => "HTTP/2.1",
        }
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl std::str::FromStr for Version {
    type Err = MessageError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(Version::parse("1.0").unwrap(), Version::HTTP_10);
        assert_eq!(Version::parse("2.1").unwrap().protocol(), "2.1");
        assert_eq!(Version::default().as_str(), "HTTP/1.1");

        for invalid in ["", "1", "1.2", "3.0", "HTTP/1.1", "1.1 "] {
            let err = Version::parse(invalid).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid HTTP version protocol \"{invalid}\" provided"));
        }
    }
}
