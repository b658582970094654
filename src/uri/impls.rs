use std::fmt;

use super::{Uri, UriError};

impl std::str::FromStr for Uri {
    type Err = UriError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri {
    type Error = UriError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(&value)
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.parts == other.parts
    }
}

impl Eq for Uri { }

// ===== Formatting =====

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.scheme();
        if !scheme.is_empty() {
            f.write_str(scheme)?;
            f.write_str(":")?;
        }

        let authority = self.authority();
        if !authority.is_empty() {
            f.write_str("//")?;
            f.write_str(&authority)?;
        }

        let path = self.path();
        if !authority.is_empty() && !path.is_empty() && !path.starts_with('/') {
            // rootless path cannot follow an authority
            f.write_str("/")?;
            f.write_str(path)?;
        } else if authority.is_empty() && path.starts_with("//") {
            // would be read back as an authority
            f.write_str("/")?;
            f.write_str(path.trim_start_matches('/'))?;
        } else {
            f.write_str(path)?;
        }

        let query = self.query();
        if !query.is_empty() {
            f.write_str("?")?;
            f.write_str(query)?;
        }

        let fragment = self.fragment();
        if !fragment.is_empty() {
            f.write_str("#")?;
            f.write_str(fragment)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
