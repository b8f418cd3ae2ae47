//! Random (v4) UUID generation and UUID inspection.

use ::uuid::{Uuid, Variant};
use serde::{Deserialize, Serialize};

pub const MAX_COUNT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UuidError {
    #[error("Count must be between 1 and {MAX_COUNT}, got {0}")]
    Count(usize),

    #[error("`{0}` is not a valid UUID")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UuidFormat {
    pub uppercase: bool,
    pub hyphens: bool,
}

impl Default for UuidFormat {
    fn default() -> Self {
        Self {
            uppercase: false,
            hyphens: true,
        }
    }
}

impl UuidFormat {
    pub fn render(&self, id: Uuid) -> String {
        let text = if self.hyphens {
            id.hyphenated().to_string()
        } else {
            id.simple().to_string()
        };
        if self.uppercase {
            text.to_uppercase()
        } else {
            text
        }
    }
}

pub fn generate(count: usize, format: UuidFormat) -> Result<Vec<String>, UuidError> {
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(UuidError::Count(count));
    }
    Ok((0..count).map(|_| format.render(Uuid::new_v4())).collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UuidInfo {
    pub uuid: String,
    pub version: usize,
    pub version_name: &'static str,
    pub variant: &'static str,
    pub nil: bool,
}

fn version_name(version: usize) -> &'static str {
    match version {
        1 => "time-based",
        2 => "DCE security",
        3 => "name-based (MD5)",
        4 => "random",
        5 => "name-based (SHA-1)",
        6 => "reordered time-based",
        7 => "Unix epoch time-based",
        8 => "custom",
        _ => "unknown",
    }
}

/// Accepts hyphenated, simple, braced and `urn:uuid:` forms.
pub fn inspect(text: &str) -> Result<UuidInfo, UuidError> {
    let trimmed = text.trim();
    let id = Uuid::parse_str(trimmed).map_err(|_| UuidError::Invalid(trimmed.to_string()))?;
    let version = id.get_version_num();

    #[allow(unreachable_patterns)]
    let variant = match id.get_variant() {
        Variant::NCS => "NCS (reserved)",
        Variant::RFC4122 => "RFC 4122",
        Variant::Microsoft => "Microsoft (reserved)",
        Variant::Future => "future (reserved)",
        _ => "unknown",
    };

    Ok(UuidInfo {
        uuid: id.hyphenated().to_string(),
        version,
        version_name: version_name(version),
        variant,
        nil: id.is_nil(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // generate tests
    // ============================================================================

    #[test]
    fn test_generate_default_format() {
        let ids = generate(5, UuidFormat::default()).unwrap();
        assert_eq!(ids.len(), 5);
        for id in &ids {
            assert_eq!(id.len(), 36);
            assert_eq!(id.as_bytes()[14], b'4');
            assert_eq!(id, &id.to_lowercase());
            assert_eq!(inspect(id).unwrap().version, 4);
        }
    }

    #[test]
    fn test_generate_is_unique() {
        let mut ids = generate(MAX_COUNT, UuidFormat::default()).unwrap();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MAX_COUNT);
    }

    #[test]
    fn test_generate_uppercase_without_hyphens() {
        let format = UuidFormat {
            uppercase: true,
            hyphens: false,
        };
        let ids = generate(1, format).unwrap();
        assert_eq!(ids[0].len(), 32);
        assert!(!ids[0].contains('-'));
        assert_eq!(ids[0], ids[0].to_uppercase());
    }

    #[test]
    fn test_generate_count_bounds() {
        assert_eq!(generate(0, UuidFormat::default()), Err(UuidError::Count(0)));
        assert_eq!(
            generate(MAX_COUNT + 1, UuidFormat::default()),
            Err(UuidError::Count(1001))
        );
    }

    // ============================================================================
    // inspect tests
    // ============================================================================

    #[test]
    fn test_inspect_forms() {
        let info = inspect("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}").unwrap();
        assert_eq!(info.uuid, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(info.version, 1);
        assert_eq!(info.version_name, "time-based");
        assert_eq!(info.variant, "RFC 4122");
        assert!(!info.nil);

        let simple = inspect("6ba7b8109dad11d180b400c04fd430c8").unwrap();
        assert_eq!(simple.uuid, info.uuid);
    }

    #[test]
    fn test_inspect_nil_and_invalid() {
        let nil = inspect("00000000-0000-0000-0000-000000000000").unwrap();
        assert!(nil.nil);
        assert_eq!(nil.version, 0);
        assert!(matches!(inspect("not-a-uuid"), Err(UuidError::Invalid(_))));
    }
}
