//! Code page ($DWGCODEPAGE) to encoding mapping
//!
//! Used for tag streams written before R2007 and for the 8-bit strings
//! inside proxy graphic records.

use encoding_rs::Encoding;

/// Code page assumed when a file does not declare one
pub const DEFAULT_CODE_PAGE: &str = "ANSI_1252";

/// Encoding for a code page name such as `"ANSI_1251"`
///
/// Names are matched case-insensitively; unknown names fall back to
/// Windows-1252.
pub fn encoding_for_code_page(code_page: &str) -> &'static Encoding {
    let name = code_page.trim().to_ascii_lowercase();
    let number = name
        .strip_prefix("ansi_")
        .or_else(|| name.strip_prefix("dos"))
        .and_then(|n| n.parse::<u16>().ok());

    if let Some(number) = number {
        return match number {
            874 => encoding_rs::WINDOWS_874,
            932 => encoding_rs::SHIFT_JIS,
            936 => encoding_rs::GBK,
            949 => encoding_rs::EUC_KR,
            950 => encoding_rs::BIG5,
            1250 | 852 => encoding_rs::WINDOWS_1250,
            1251 | 855 | 866 => encoding_rs::WINDOWS_1251,
            1253 | 869 => encoding_rs::WINDOWS_1253,
            1254 | 857 => encoding_rs::WINDOWS_1254,
            1255 => encoding_rs::WINDOWS_1255,
            1256 => encoding_rs::WINDOWS_1256,
            1257 => encoding_rs::WINDOWS_1257,
            1258 => encoding_rs::WINDOWS_1258,
            _ => encoding_rs::WINDOWS_1252,
        };
    }

    match name.as_str() {
        "gb2312" => encoding_rs::GBK,
        "big5" => encoding_rs::BIG5,
        "korean" | "johab" => encoding_rs::EUC_KR,
        "koi8-r" => encoding_rs::KOI8_R,
        "utf-8" | "utf8" | "unicode" => encoding_rs::UTF_8,
        _ => encoding_rs::WINDOWS_1252,
    }
}
