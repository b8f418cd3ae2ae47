//! Unix file permission bits in octal and symbolic notation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub octal: &'static str,
    pub description: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset { octal: "644", description: "File: owner rw, group/others r" },
    Preset { octal: "755", description: "Dir/executable: owner rwx, group/others rx" },
    Preset { octal: "600", description: "Private file: owner rw only" },
    Preset { octal: "700", description: "Private dir: owner rwx only" },
    Preset { octal: "777", description: "Full access (not recommended)" },
    Preset { octal: "444", description: "Read-only for everyone" },
    Preset { octal: "664", description: "Group-writable file" },
    Preset { octal: "775", description: "Group-writable directory" },
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChmodError {
    #[error("Invalid permission `{0}`: expected 3 octal digits (e.g. 644) or rwx notation (e.g. rw-r--r--)")]
    Invalid(String),
}

/// Read/write/execute bits for one class of user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Permission {
    pub fn from_digit(digit: u8) -> Self {
        Self {
            read: digit & 4 != 0,
            write: digit & 2 != 0,
            execute: digit & 1 != 0,
        }
    }

    pub fn digit(self) -> u8 {
        (if self.read { 4 } else { 0 })
            + (if self.write { 2 } else { 0 })
            + (if self.execute { 1 } else { 0 })
    }

    pub fn symbolic(self) -> String {
        [
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.execute { 'x' } else { '-' },
        ]
        .iter()
        .collect()
    }

    fn from_symbolic(triple: &[u8]) -> Option<Self> {
        let bit = |actual: u8, expected: u8| match actual {
            b'-' => Some(false),
            c if c == expected => Some(true),
            _ => None,
        };
        Some(Self {
            read: bit(triple[0], b'r')?,
            write: bit(triple[1], b'w')?,
            execute: bit(triple[2], b'x')?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Mode {
    pub owner: Permission,
    pub group: Permission,
    pub others: Permission,
}

impl Mode {
    pub fn octal(&self) -> String {
        format!(
            "{}{}{}",
            self.owner.digit(),
            self.group.digit(),
            self.others.digit()
        )
    }

    /// `ls -l` style string for a regular file, e.g. `-rw-r--r--`.
    pub fn symbolic(&self) -> String {
        format!(
            "-{}{}{}",
            self.owner.symbolic(),
            self.group.symbolic(),
            self.others.symbolic()
        )
    }

    pub fn command(&self, target: &str) -> String {
        format!("chmod {} {}", self.octal(), target)
    }

    /// Description of the matching preset, if this mode is a common one.
    pub fn describe(&self) -> Option<&'static str> {
        let octal = self.octal();
        PRESETS
            .iter()
            .find(|p| p.octal == octal)
            .map(|p| p.description)
    }

    pub fn output(&self, target: &str) -> ModeOutput {
        ModeOutput {
            octal: self.octal(),
            symbolic: self.symbolic(),
            command: self.command(target),
            description: self.describe(),
            owner: self.owner,
            group: self.group,
            others: self.others,
        }
    }
}

/// Summary used by the CLI and MCP outputs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModeOutput {
    pub octal: String,
    pub symbolic: String,
    pub command: String,
    pub description: Option<&'static str>,
    pub owner: Permission,
    pub group: Permission,
    pub others: Permission,
}

/// Parse `644`, `rw-r--r--` or `-rw-r--r--`.
pub fn parse(input: &str) -> Result<Mode, ChmodError> {
    let text = input.trim();
    let invalid = || ChmodError::Invalid(text.to_string());
    let bytes = text.as_bytes();

    if bytes.len() == 3 && bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return Ok(Mode {
            owner: Permission::from_digit(bytes[0] - b'0'),
            group: Permission::from_digit(bytes[1] - b'0'),
            others: Permission::from_digit(bytes[2] - b'0'),
        });
    }

    let bits = match bytes.len() {
        9 => bytes,
        10 if matches!(bytes[0], b'-' | b'd' | b'l') => &bytes[1..],
        _ => return Err(invalid()),
    };

    Ok(Mode {
        owner: Permission::from_symbolic(&bits[0..3]).ok_or_else(invalid)?,
        group: Permission::from_symbolic(&bits[3..6]).ok_or_else(invalid)?,
        others: Permission::from_symbolic(&bits[6..9]).ok_or_else(invalid)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_octal() {
        let mode = parse("754").unwrap();
        assert_eq!(
            mode.owner,
            Permission {
                read: true,
                write: true,
                execute: true
            }
        );
        assert_eq!(mode.group.symbolic(), "r-x");
        assert_eq!(mode.others.symbolic(), "r--");
        assert_eq!(mode.symbolic(), "-rwxr-xr--");
    }

    #[test]
    fn test_parse_symbolic() {
        assert_eq!(parse("rw-r--r--").unwrap().octal(), "644");
        assert_eq!(parse("-rwxr-xr-x").unwrap().octal(), "755");
        assert_eq!(parse("drwx------").unwrap().octal(), "700");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in ["", "8", "64", "6444", "789", "rw-r--r-", "rwxrwxrwz", "xrwxrwxrw"] {
            assert!(parse(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_octal_symbolic_round_trip_for_all_modes() {
        for value in 0..0o1000u32 {
            let octal = format!("{value:03o}");
            let mode = parse(&octal).unwrap();
            assert_eq!(mode.octal(), octal);
            assert_eq!(parse(&mode.symbolic()).unwrap(), mode);
        }
    }

    #[test]
    fn test_command_and_description() {
        let mode = parse("755").unwrap();
        assert_eq!(mode.command("deploy.sh"), "chmod 755 deploy.sh");
        assert_eq!(
            mode.describe(),
            Some("Dir/executable: owner rwx, group/others rx")
        );
        assert_eq!(parse("751").unwrap().describe(), None);
    }

    #[test]
    fn test_output_collects_everything() {
        let output = parse("600").unwrap().output("id_rsa");
        assert_eq!(output.octal, "600");
        assert_eq!(output.symbolic, "-rw-------");
        assert_eq!(output.command, "chmod 600 id_rsa");
        assert_eq!(output.description, Some("Private file: owner rw only"));
    }
}
