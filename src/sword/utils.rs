//! Small text helpers shared by the decoder and the descriptor parser.

use encoding_rs::Encoding;

/// Looks up an encoding label, or `None` if it is not recognised.
///
/// Descriptors say `Latin-1` where the WHATWG label set only knows
/// `latin1`; both map to windows-1252.
pub fn lookup_encoding(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("Latin-1") {
        return Some(encoding_rs::WINDOWS_1252);
    }
    Encoding::for_label(label.as_bytes())
}

/// Resolves a module descriptor `Encoding=` value to a decoder.
/// Unknown labels fall back to UTF-8.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    lookup_encoding(label).unwrap_or(encoding_rs::UTF_8)
}

/// Decodes `bytes`, replacing malformed sequences with U+FFFD.
///
/// A leading byte-order mark is treated as ordinary bytes and never switches
/// the encoding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        log::trace!("Replaced malformed {} sequences in payload", encoding.name());
    }
    text.into_owned()
}

/// Cuts `text` down to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &mut String, max_chars: usize) {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_labels() {
        assert_eq!(parse_encoding("UTF-8"), encoding_rs::UTF_8);
        assert_eq!(parse_encoding("Latin-1"), encoding_rs::WINDOWS_1252);
        assert_eq!(parse_encoding("bogus"), encoding_rs::UTF_8);
        assert_eq!(lookup_encoding(" latin1 "), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(lookup_encoding("latin-2x"), None);
    }

    #[test]
    fn byte_order_mark_does_not_switch_encoding() {
        assert_eq!(decode_text(b"\xFF\xFEHi", encoding_rs::UTF_8), "\u{FFFD}\u{FFFD}Hi");
        assert_eq!(decode_text(b"\xEF\xBB\xBFHi", encoding_rs::UTF_8), "\u{FEFF}Hi");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = decode_text(b"Hel\xFFlo", encoding_rs::UTF_8);
        assert_eq!(text, "Hel\u{FFFD}lo");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut text = "אבגד".to_string();
        truncate_chars(&mut text, 2);
        assert_eq!(text, "אב");

        let mut short = "Hi".to_string();
        truncate_chars(&mut short, 200);
        assert_eq!(short, "Hi");
    }
}
