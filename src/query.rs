//! Query string decoding.

use crate::params::Params;

use std::borrow::Cow;

/// Decodes a single query token.
///
/// `+` is read as a space and `%XX` escapes are replaced by the byte they
/// encode. Escapes without two hex digits are kept as written. Decoded bytes
/// that are not valid UTF-8 are replaced with U+FFFD.
///
/// ```rust
/// assert_eq!(radix_router::decode("a%20b+c"), "a b c");
/// assert_eq!(radix_router::decode("100%"), "100%");
/// ```
pub fn decode(token: &str) -> String {
    let token: Cow<'_, str> = if token.contains('+') {
        Cow::Owned(token.replace('+', " "))
    } else {
        Cow::Borrowed(token)
    };

    if !token.contains('%') {
        return token.into_owned();
    }

    percent_encoding::percent_decode_str(&token)
        .decode_utf8_lossy()
        .into_owned()
}

/// Parses a raw query string (without the leading `?`) into a flat map.
///
/// Pairs are separated by `&` and split at their first `=`. Pairs with no
/// `=` are dropped. When a key repeats, the last value wins.
pub fn parse_query(query: &str) -> Params {
    let mut params = Params::new();

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };

        params.insert(decode(key), decode(value));
    }

    params
}
