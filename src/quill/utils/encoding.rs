use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Detect the encoding of file bytes and decode them
///
/// A byte order mark wins over detection and is not part of the decoded text. Valid
/// UTF-8 is taken as UTF-8; anything else goes through `chardetng`, and undecodable
/// input falls back to lossy UTF-8.
///
/// ### Arguments
/// - `bytes`: The raw file contents
///
/// ### Returns
/// - `(&'static Encoding, String)`: The detected encoding and the decoded text
pub fn detect_encoding_and_decode(bytes: &[u8]) -> (&'static Encoding, String) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        log::debug!("File encoding detected from BOM as {}", encoding.name());
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (encoding, decoded.into_owned());
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        log::debug!("File encoding detected as UTF-8");
        return (UTF_8, text.to_string());
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("File encoding detection failed, using UTF-8 lossy conversion");
        return (UTF_8, String::from_utf8_lossy(bytes).into_owned());
    }
    log::debug!("File encoding detected as {}", encoding.name());
    (encoding, decoded.into_owned())
}

/// Encode text for writing back to disk
///
/// Characters the encoding cannot represent are written as numeric character
/// references, which is what `encoding_rs` does; this is logged.
///
/// ### Arguments
/// - `text`: The text to encode
/// - `encoding`: The target encoding
///
/// ### Returns
/// - `Vec<u8>`: The encoded bytes
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, used, had_unmappable) = encoding.encode(text);
    if had_unmappable {
        log::warn!(
            "Some characters cannot be represented in {} and were escaped",
            used.name()
        );
    }
    bytes.into_owned()
}

#[cfg(test)]
mod tests {
    use super::{detect_encoding_and_decode, encode};
    use encoding_rs::{UTF_8, WINDOWS_1252};

    #[test]
    fn test_detect_utf8() {
        let content = "Hello, World! 你好世界";
        let (encoding, decoded) = detect_encoding_and_decode(content.as_bytes());
        assert_eq!(encoding, UTF_8);
        assert_eq!(decoded, content);
    }

    #[test]
    fn test_detect_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Hello");
        let (encoding, decoded) = detect_encoding_and_decode(&bytes);
        assert_eq!(encoding, UTF_8);
        assert_eq!(decoded, "Hello");
    }

    #[test]
    fn test_detect_latin1() {
        let bytes = b"Caf\xE9 cr\xE8me br\xFBl\xE9e, d\xE9j\xE0 vu";
        let (encoding, decoded) = detect_encoding_and_decode(bytes);
        assert_ne!(encoding, UTF_8);
        assert!(decoded.starts_with("Caf"));
        assert!(decoded.ends_with(" vu"));
    }

    #[test]
    fn test_detect_empty() {
        let (encoding, decoded) = detect_encoding_and_decode(&[]);
        assert_eq!(encoding, UTF_8);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encode("café", WINDOWS_1252), b"caf\xE9".to_vec());
    }

    #[test]
    fn test_encode_utf8() {
        assert_eq!(encode("café", UTF_8), "café".as_bytes().to_vec());
    }
}
