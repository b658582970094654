use super::{Parts, Scheme, UriError, filter_port};
use crate::matches;

/// Decompose a URI reference.
///
/// Fragment is split first, then query, then scheme. An authority is only recognized after
/// `//`, and it must carry a non empty host.
pub(super) fn parse(input: &str) -> Result<Parts, UriError> {
    let (rest, fragment) = split_once(input, b'#');
    let (rest, query) = split_once(rest, b'?');

    let (scheme, rest) = match split_scheme(rest) {
        Some((scheme, rest)) => (Some(Scheme::parse(scheme)?), rest),
        None => (None, rest),
    };

    let mut parts = Parts { scheme, ..Parts::default() };

    let path = match rest.strip_prefix("//") {
        Some(hier) => {
            let (authority, path) = match hier.find('/') {
                Some(at) => hier.split_at(at),
                None => (hier, ""),
            };
            parse_authority(authority, &mut parts)?;
            path
        }
        None => rest,
    };

    parts.path = matches::encode(path, matches::is_path).into_owned();
    if let Some(query) = query {
        parts.query = matches::encode(query, matches::is_query).into_owned();
    }
    if let Some(fragment) = fragment {
        parts.fragment = matches::encode(fragment, matches::is_query).into_owned();
    }

    Ok(parts)
}

fn split_once(value: &str, delim: u8) -> (&str, Option<&str>) {
    match value.bytes().position(|b| b == delim) {
        Some(at) => (&value[..at], Some(&value[at + 1..])),
        None => (value, None),
    }
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn split_scheme(value: &str) -> Option<(&str, &str)> {
    let col = value.bytes().position(|b| b == b':')?;
    let scheme = &value[..col];
    match scheme.as_bytes() {
        [lead, rest @ ..] if lead.is_ascii_alphabetic() && rest.iter().all(|b| matches::is_scheme(*b)) => {
            Some((scheme, &value[col + 1..]))
        }
        _ => None,
    }
}

/// authority = [ userinfo "@" ] host [ ":" port ]
fn parse_authority(authority: &str, parts: &mut Parts) -> Result<(), UriError> {
    let host_port = match authority.rfind('@') {
        Some(at) => {
            parts.user_info = authority[..at].to_owned();
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port) = match host_port.strip_prefix('[') {
        Some(ip_literal) => {
            let close = ip_literal.find(']').ok_or(UriError::Parse)?;
            let host = &host_port[..close + 2];
            match &host_port[close + 2..] {
                "" => (host, None),
                rest => (host, Some(rest.strip_prefix(':').ok_or(UriError::Parse)?)),
            }
        }
        None => match host_port.find(':') {
            Some(col) => (&host_port[..col], Some(&host_port[col + 1..])),
            None => (host_port, None),
        },
    };

    if host.is_empty() {
        return Err(UriError::Parse);
    }
    parts.host = host.to_ascii_lowercase();

    let port = match port {
        None | Some("") => None,
        Some(port) if port.bytes().all(|b| b.is_ascii_digit()) => {
            let port = port.parse::<u32>().map_err(|_| UriError::Parse)?;
            Some(port)
        }
        Some(_) => return Err(UriError::Parse),
    };
    parts.port = filter_port(port, parts.scheme).map_err(|_| UriError::Parse)?;

    Ok(())
}
