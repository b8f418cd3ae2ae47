//! Regular expression testing with highlighted segments.

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Unknown flag `{0}` (supported: g, i, m, s, x)")]
    UnknownFlag(char),

    #[error("Invalid pattern: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub verbose: bool,
}

impl Flags {
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = Flags::default();
        for flag in flags.chars() {
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'x' => parsed.verbose = true,
                other => return Err(PatternError::UnknownFlag(other)),
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub index: usize,
    pub name: Option<String>,
    pub text: Option<String>,
}

/// One match. Offsets are byte positions into the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub pattern: String,
    pub flags: Flags,
    pub match_count: usize,
    pub matches: Vec<Match>,
    pub segments: Vec<Segment>,
}

pub fn compile(pattern: &str, flags: &Flags) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_all)
        .ignore_whitespace(flags.verbose)
        .build()
        .map_err(|e| PatternError::Invalid(e.to_string()))
}

fn to_match(index: usize, regex: &Regex, caps: &Captures) -> Option<Match> {
    let whole = caps.get(0)?;
    let groups = regex
        .capture_names()
        .enumerate()
        .skip(1)
        .map(|(i, name)| Group {
            index: i,
            name: name.map(str::to_string),
            text: caps.get(i).map(|m| m.as_str().to_string()),
        })
        .collect();

    Some(Match {
        index,
        start: whole.start(),
        end: whole.end(),
        text: whole.as_str().to_string(),
        groups,
    })
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, matched: bool) {
    if !matched {
        if let Some(last) = segments.last_mut().filter(|last| !last.matched) {
            last.text.push_str(text);
            return;
        }
    }
    segments.push(Segment {
        text: text.to_string(),
        matched,
    });
}

fn segments(text: &str, matches: &[Match]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in matches {
        if m.start > cursor {
            push_segment(&mut segments, &text[cursor..m.start], false);
        }
        if m.end > m.start {
            push_segment(&mut segments, &m.text, true);
        }
        cursor = m.end;
    }
    if cursor < text.len() {
        push_segment(&mut segments, &text[cursor..], false);
    }
    segments
}

/// Run `pattern` over `text`. Without the `g` flag only the first match is reported.
pub fn test(pattern: &str, flags: &str, text: &str) -> Result<MatchReport, PatternError> {
    let flags = Flags::parse(flags)?;
    let regex = compile(pattern, &flags)?;

    let limit = if flags.global { usize::MAX } else { 1 };
    let matches: Vec<Match> = regex
        .captures_iter(text)
        .take(limit)
        .enumerate()
        .filter_map(|(i, caps)| to_match(i, &regex, &caps))
        .collect();

    Ok(MatchReport {
        pattern: pattern.to_string(),
        flags,
        match_count: matches.len(),
        segments: segments(text, &matches),
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Flags tests
    // ============================================================================

    #[test]
    fn test_flags_parse() {
        let flags = Flags::parse("gim").unwrap();
        assert!(flags.global && flags.case_insensitive && flags.multi_line);
        assert!(!flags.dot_all && !flags.verbose);
        assert_eq!(Flags::parse("gq"), Err(PatternError::UnknownFlag('q')));
    }

    // ============================================================================
    // test() tests
    // ============================================================================

    #[test]
    fn test_global_matches_with_groups() {
        let report = test(r"(?P<user>\w+)@(\w+)\.com", "g", "ann@x.com, bob@y.com").unwrap();
        assert_eq!(report.match_count, 2);

        let first = &report.matches[0];
        assert_eq!((first.start, first.end), (0, 9));
        assert_eq!(first.text, "ann@x.com");
        assert_eq!(first.groups[0].name.as_deref(), Some("user"));
        assert_eq!(first.groups[0].text.as_deref(), Some("ann"));
        assert_eq!(first.groups[1].name, None);
        assert_eq!(first.groups[1].text.as_deref(), Some("x"));

        assert_eq!(report.matches[1].index, 1);
        assert_eq!(report.matches[1].text, "bob@y.com");
    }

    #[test]
    fn test_without_global_only_first_match() {
        let report = test(r"\d+", "", "a1 b22 c333").unwrap();
        assert_eq!(report.match_count, 1);
        assert_eq!(report.matches[0].text, "1");
    }

    #[test]
    fn test_case_insensitive_and_multiline() {
        let report = test("^hello", "gim", "Hello\nhello\nworld").unwrap();
        assert_eq!(report.match_count, 2);
        assert_eq!(report.matches[1].start, 6);
    }

    #[test]
    fn test_dot_all_and_verbose() {
        assert_eq!(test("a.b", "", "a\nb").unwrap().match_count, 0);
        assert_eq!(test("a.b", "s", "a\nb").unwrap().match_count, 1);
        assert_eq!(test("a b  # comment", "x", "ab").unwrap().match_count, 1);
    }

    #[test]
    fn test_optional_group_unmatched() {
        let report = test(r"a(x)?b", "", "ab").unwrap();
        assert_eq!(report.matches[0].groups[0].text, None);
    }

    #[test]
    fn test_segments_alternate() {
        let report = test("o", "g", "foo bar").unwrap();
        let parts: Vec<(&str, bool)> = report
            .segments
            .iter()
            .map(|s| (s.text.as_str(), s.matched))
            .collect();
        assert_eq!(
            parts,
            vec![("f", false), ("o", true), ("o", true), (" bar", false)]
        );
    }

    #[test]
    fn test_empty_matches_do_not_create_segments() {
        let report = test("x*", "g", "ab").unwrap();
        assert_eq!(report.match_count, 3);
        assert_eq!(report.segments.len(), 1);
        assert_eq!(report.segments[0].text, "ab");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(test("(", "", "x"), Err(PatternError::Invalid(_))));
    }
}
