//! Byte classification tables.
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

macro_rules! byte_map {
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            PAT[$byte as usize]
        }
    };
}

// ===== Blocks =====

byte_map! {
    /// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
    #[inline(always)]
    const fn unreserved(byte: u8) {
        byte.is_ascii_alphanumeric()
        || matches!(byte, b'-' | b'.' | b'_' | b'~')
    }
}

// ===== lookup table =====

byte_map! {
    /// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    ///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    ///         / DIGIT / ALPHA
    #[inline(always)]
    pub const fn is_token(byte: u8) {
        matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
        || byte.is_ascii_alphanumeric()
    }
}

byte_map! {
    /// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    #[inline(always)]
    pub const fn is_scheme(byte: u8) {
        byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.')
    }
}

byte_map! {
    /// Path bytes left as is, `%` is checked separately.
    #[inline(always)]
    pub const fn is_path(byte: u8) {
        unreserved(byte)
        || matches!(
            byte,
            b')' | b'(' | b':' | b'@' | b'&' | b'=' | b'+' | b'$' | b',' | b'/' | b';' | b'%'
        )
    }
}

byte_map! {
    /// Query and fragment bytes left as is, `%` is checked separately.
    #[inline(always)]
    pub const fn is_query(byte: u8) {
        unreserved(byte)
        || matches!(
            byte,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b','
            | b';' | b'=' | b'%' | b':' | b'@' | b'/' | b'?'
        )
    }
}

/// Returns `true` if every byte is a token character and the input is not empty.
pub fn is_token_str(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(is_token)
}

// ===== Percent Encoding =====

/// Percent-encode every character rejected by `allowed`.
///
/// Non ASCII characters of the Unicode letter category (`\p{L}`) are kept. A `%` is kept only when it starts a valid `%XX` sequence, so
/// encoding an already encoded string returns it unchanged.
pub fn encode(input: &str, allowed: fn(u8) -> bool) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut output: Option<String> = None;

    for (at, ch) in input.char_indices() {
        let keep = if ch == '%' {
            is_pct_encoded(&bytes[at..])
        } else if ch.is_ascii() {
            allowed(ch as u8)
        } else {
            is_letter(ch)
        };

        match (keep, &mut output) {
            (true, None) => {}
            (true, Some(out)) => out.push(ch),
            (false, out) => {
                let out = out.get_or_insert_with(|| {
                    let mut out = String::with_capacity(input.len() + 8);
                    out.push_str(&input[..at]);
                    out
                });
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    out.push_str(percent_encoding::percent_encode_byte(byte));
                }
            }
        }
    }

    match output {
        Some(out) => Cow::Owned(out),
        None => Cow::Borrowed(input),
    }
}

static LETTER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\A\p{L}\z").ok());

/// `ch` is in the Unicode general category `L`.
fn is_letter(ch: char) -> bool {
    let mut buf = [0u8; 4];
    LETTER
        .as_ref()
        .is_some_and(|letter| letter.is_match(ch.encode_utf8(&mut buf)))
}

/// `bytes` starts with `%` followed by two hex digits.
const fn is_pct_encoded(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}
