//! 文字コード判定
//!
//! BOM付きUTF-8は常に最優先で判定し、その後は候補を優先順に
//! 厳密デコード（置換文字なし）で試す。

use encoding_rs::{SHIFT_JIS, UTF_8};
use inspect_common::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// BOM付きUTF-8（保存時の標準）
    Utf8Bom,
    Utf8,
    /// Shift_JIS（CP932拡張を含む）
    ShiftJis,
}

/// 読み込み時の候補（優先順）
///
/// Shift_JISの厳密デコードはUTF-8の日本語もそれらしく読めてしまうことがあるので、
/// UTF-8を先に試す。
pub const CANDIDATES: &[TextEncoding] = &[TextEncoding::Utf8, TextEncoding::ShiftJis];

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::ShiftJis => "shift_jis",
        }
    }

    fn try_decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Bom => bytes
                .strip_prefix(UTF8_BOM)
                .and_then(|rest| TextEncoding::Utf8.try_decode(rest)),
            TextEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::ShiftJis => SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }
}

/// バイト列をテキストにデコード
pub fn decode(bytes: &[u8], candidates: &[TextEncoding]) -> Result<(String, TextEncoding)> {
    if bytes.starts_with(UTF8_BOM) {
        return TextEncoding::Utf8Bom
            .try_decode(bytes)
            .map(|text| (text, TextEncoding::Utf8Bom))
            .ok_or_else(|| Error::Encoding("BOM付きUTF-8として読み込めません".into()));
    }

    for encoding in candidates {
        if let Some(text) = encoding.try_decode(bytes) {
            tracing::debug!(encoding = encoding.label(), "decoded text");
            return Ok((text, *encoding));
        }
        tracing::debug!(encoding = encoding.label(), "decode failed, trying next");
    }

    let tried: Vec<_> = candidates.iter().map(|e| e.label()).collect();
    Err(Error::Encoding(format!(
        "文字コードを判定できません（試行: {}）",
        tried.join(", ")
    )))
}

/// テキストをエンコード
pub fn encode(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Utf8Bom => {
            let mut bytes = UTF8_BOM.to_vec();
            bytes.extend_from_slice(text.as_bytes());
            Ok(bytes)
        }
        TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        TextEncoding::ShiftJis => {
            let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
            if had_errors {
                return Err(Error::Encoding(
                    "Shift_JISで表現できない文字が含まれています".into(),
                ));
            }
            Ok(bytes.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bom_wins_over_candidates() {
        let bytes = encode("劣化名\n漏水\n", TextEncoding::Utf8Bom).unwrap();
        let (text, enc) = decode(&bytes, CANDIDATES).unwrap();
        assert_eq!(enc, TextEncoding::Utf8Bom);
        assert_eq!(text, "劣化名\n漏水\n");
    }

    #[test]
    fn test_decode_shift_jis_falls_back() {
        let bytes = encode("場所\n1階廊下\n", TextEncoding::ShiftJis).unwrap();
        let (text, enc) = decode(&bytes, CANDIDATES).unwrap();
        assert_eq!(enc, TextEncoding::ShiftJis);
        assert_eq!(text, "場所\n1階廊下\n");
    }

    #[test]
    fn test_decode_plain_utf8() {
        let (text, enc) = decode("ひび割れ".as_bytes(), CANDIDATES).unwrap();
        assert_eq!(enc, TextEncoding::Utf8);
        assert_eq!(text, "ひび割れ");
    }

    #[test]
    fn test_decode_all_candidates_fail() {
        // 0xFF は UTF-8 でも Shift_JIS でも不正
        let err = decode(&[0x41, 0xFF, 0xFF], CANDIDATES).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_encode_shift_jis_unmappable() {
        // 絵文字は Shift_JIS に無い
        assert!(encode("🏢", TextEncoding::ShiftJis).is_err());
    }
}
