//! Text encodings: Base64 (and data URLs), percent-encoding and radix conversion.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid Base64: {0}")]
    Base64(String),

    #[error("Decoded data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Malformed percent-escape at byte {0}")]
    MalformedEscape(usize),

    #[error("Not a data URL (expected `data:<mime>[;base64],<data>`)")]
    InvalidDataUrl,

    #[error("Invalid {radix} number: `{input}`")]
    InvalidNumber { radix: String, input: String },

    #[error("Number `{0}` does not fit in 128 bits")]
    Overflow(String),
}

// ============================================================================
// Base64
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base64Variant {
    #[default]
    Standard,
    UrlSafe,
}

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn base64_encode(bytes: &[u8], variant: Base64Variant) -> String {
    match variant {
        Base64Variant::Standard => STANDARD.encode(bytes),
        Base64Variant::UrlSafe => URL_SAFE_LENIENT.encode(bytes),
    }
}

/// Decode Base64, ignoring whitespace and accepting missing padding.
pub fn base64_decode(text: &str, variant: Base64Variant) -> Result<Vec<u8>, CodecError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let engine = match variant {
        Base64Variant::Standard => &STANDARD_LENIENT,
        Base64Variant::UrlSafe => &URL_SAFE_LENIENT,
    };
    engine
        .decode(compact)
        .map_err(|e| CodecError::Base64(e.to_string()))
}

pub fn base64_decode_text(text: &str, variant: Base64Variant) -> Result<String, CodecError> {
    let bytes = base64_decode(text, variant)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataUrl {
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub size: usize,
}

pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn parse_data_url(text: &str) -> Result<DataUrl, CodecError> {
    let rest = text
        .trim()
        .strip_prefix("data:")
        .ok_or(CodecError::InvalidDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(CodecError::InvalidDataUrl)?;

    let (mime, bytes) = match meta.strip_suffix(";base64") {
        Some(mime) => (mime, base64_decode(payload, Base64Variant::Standard)?),
        None => (meta, percent_decode(payload, UrlMode::Component)?),
    };
    let mime = if mime.is_empty() { "text/plain" } else { mime };

    Ok(DataUrl {
        mime: mime.to_string(),
        size: bytes.len(),
        bytes,
    })
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Percent-encoding
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlMode {
    /// Everything outside the unreserved set is escaped.
    #[default]
    Component,
    /// Whole-URI encoding: reserved delimiters are kept.
    Uri,
}

const MARKS: [(&str, char); 5] = [
    ("%21", '!'),
    ("%27", '\''),
    ("%28", '('),
    ("%29", ')'),
    ("%2A", '*'),
];

const RESERVED: &[u8] = b";,/?:@&=+$#";

pub fn url_encode(text: &str, mode: UrlMode) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escape, mark) in MARKS {
        encoded = encoded.replace(escape, &mark.to_string());
    }
    if mode == UrlMode::Uri {
        for byte in RESERVED {
            let escape = format!("%{byte:02X}");
            encoded = encoded.replace(&escape, &char::from(*byte).to_string());
        }
    }
    encoded
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).map(|d| d as u8)
}

fn percent_decode(text: &str, mode: UrlMode) -> Result<Vec<u8>, CodecError> {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        let value = match (bytes.get(i + 1), bytes.get(i + 2)) {
            (Some(hi), Some(lo)) => hex_value(*hi)
                .zip(hex_value(*lo))
                .map(|(hi, lo)| hi << 4 | lo),
            _ => None,
        }
        .ok_or(CodecError::MalformedEscape(i))?;

        if mode == UrlMode::Uri && RESERVED.contains(&value) {
            decoded.extend_from_slice(&bytes[i..i + 3]);
        } else {
            decoded.push(value);
        }
        i += 3;
    }

    Ok(decoded)
}

pub fn url_decode(text: &str, mode: UrlMode) -> Result<String, CodecError> {
    let bytes = percent_decode(text, mode)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

// ============================================================================
// Radix
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            Radix::Binary => Some("0b"),
            Radix::Octal => Some("0o"),
            Radix::Decimal => None,
            Radix::Hex => Some("0x"),
        }
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Decimal => "decimal",
            Radix::Hex => "hex",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadixOutput {
    pub input: String,
    pub detected: Radix,
    pub decimal: String,
    pub hex: String,
    pub binary: String,
    pub octal: String,
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

fn detect(digits: &str) -> (Radix, &str) {
    for radix in [Radix::Hex, Radix::Binary, Radix::Octal] {
        if let Some(rest) = radix.prefix().and_then(|p| strip_prefix_ci(digits, p)) {
            return (radix, rest);
        }
    }
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        (Radix::Decimal, digits)
    } else {
        (Radix::Hex, digits)
    }
}

/// Convert an integer between bases.
///
/// With `from = None` the radix is detected: an explicit `0x`/`0b`/`0o` prefix
/// wins, then plain decimal, then bare hex digits.
pub fn convert_radix(input: &str, from: Option<Radix>) -> Result<RadixOutput, CodecError> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (radix, digits) = match from {
        Some(radix) => {
            let digits = radix
                .prefix()
                .and_then(|p| strip_prefix_ci(unsigned, p))
                .unwrap_or(unsigned);
            (radix, digits)
        }
        None => detect(unsigned),
    };

    let invalid = || CodecError::InvalidNumber {
        radix: radix.to_string(),
        input: trimmed.to_string(),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix.base())) {
        return Err(invalid());
    }

    let magnitude = u128::from_str_radix(digits, radix.base())
        .map_err(|_| CodecError::Overflow(trimmed.to_string()))?;
    let limit = if negative {
        i128::MIN.unsigned_abs()
    } else {
        i128::MAX as u128
    };
    if magnitude > limit {
        return Err(CodecError::Overflow(trimmed.to_string()));
    }

    let sign = if negative && magnitude != 0 { "-" } else { "" };
    Ok(RadixOutput {
        input: trimmed.to_string(),
        detected: radix,
        decimal: format!("{sign}{magnitude}"),
        hex: format!("{sign}0x{magnitude:X}"),
        binary: format!("{sign}0b{magnitude:b}"),
        octal: format!("{sign}0o{magnitude:o}"),
    })
}
