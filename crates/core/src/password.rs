//! Offline password strength estimation.

use serde::Serialize;

/// Guesses per second assumed for an offline GPU attack.
pub const GUESSES_PER_SECOND: f64 = 1e10;

const COMMON: &[&str] = &[
    "password",
    "123456",
    "123456789",
    "qwerty",
    "abc123",
    "password1",
    "iloveyou",
    "admin",
    "letmein",
    "monkey",
    "1234567890",
    "dragon",
    "master",
    "sunshine",
    "princess",
    "welcome",
    "shadow",
    "superman",
    "michael",
    "football",
    "baseball",
    "soccer",
    "starwars",
    "trustno1",
    "hello",
    "charlie",
    "donald",
    "password123",
    "qwerty123",
    "iloveyou1",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Analysis {
    pub length: usize,
    pub score: u8,
    pub label: &'static str,
    pub entropy: f64,
    pub crack_time: String,
    pub charsets: Vec<&'static str>,
    pub tips: Vec<&'static str>,
}

pub fn is_common(password: &str) -> bool {
    let lower = password.to_lowercase();
    COMMON.contains(&lower.as_str())
}

fn all_same(chars: &[char]) -> bool {
    chars.len() > 1 && chars.iter().all(|c| *c == chars[0])
}

fn has_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn next_in_sequence(a: char, b: char) -> bool {
    match (a, b) {
        ('9', '0') => true,
        _ if a.is_ascii_digit() && b.is_ascii_digit() => b as u32 == a as u32 + 1,
        _ if a.is_ascii_lowercase() && b.is_ascii_lowercase() => b as u32 == a as u32 + 1,
        _ => false,
    }
}

/// Three ascending letters or digits in a row, e.g. `123`, `abc`, `890`.
fn has_sequence(chars: &[char]) -> bool {
    let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
    lower
        .windows(3)
        .any(|w| next_in_sequence(w[0], w[1]) && next_in_sequence(w[1], w[2]) && w[0] != '9')
}

pub fn label(score: u8) -> &'static str {
    match score {
        80.. => "Very Strong",
        60..=79 => "Strong",
        40..=59 => "Moderate",
        20..=39 => "Weak",
        _ => "Very Weak",
    }
}

/// Average time to find the password by brute force, from its entropy in bits.
pub fn crack_time(entropy: f64) -> String {
    let seconds = 2f64.powf(entropy) / 2.0 / GUESSES_PER_SECOND;
    let approx = |value: f64, unit: &str| format!("~{} {unit}", value.round());

    if seconds < 1.0 {
        "Instantly".to_string()
    } else if seconds < 60.0 {
        approx(seconds, "seconds")
    } else if seconds < 3600.0 {
        approx(seconds / 60.0, "minutes")
    } else if seconds < 86_400.0 {
        approx(seconds / 3600.0, "hours")
    } else if seconds < 2.628e6 {
        approx(seconds / 86_400.0, "days")
    } else if seconds < 3.156e7 {
        approx(seconds / 2.628e6, "months")
    } else if seconds < 3.156e9 {
        approx(seconds / 3.156e7, "years")
    } else {
        "Centuries+".to_string()
    }
}

pub fn analyze(password: &str) -> Analysis {
    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();

    let has_lower = chars.iter().any(char::is_ascii_lowercase);
    let has_upper = chars.iter().any(char::is_ascii_uppercase);
    let has_digit = chars.iter().any(char::is_ascii_digit);
    let has_symbol = chars.iter().any(|c| !c.is_ascii_alphanumeric());

    let mut charsets = Vec::new();
    let mut pool = 0u32;
    if has_lower {
        charsets.push("lowercase (26)");
        pool += 26;
    }
    if has_upper {
        charsets.push("uppercase (26)");
        pool += 26;
    }
    if has_digit {
        charsets.push("digits (10)");
        pool += 10;
    }
    if has_symbol {
        charsets.push("symbols (~32)");
        pool += 32;
    }

    let entropy = length as f64 * f64::from(pool.max(1)).log2();

    let common = is_common(password);
    let run = has_run(&chars);
    let sequence = has_sequence(&chars);

    let mut penalty = 0.0;
    if all_same(&chars) {
        penalty += 40.0;
    }
    if run {
        penalty += 15.0;
    }
    if sequence {
        penalty += 15.0;
    }
    if common {
        penalty += 50.0;
    }
    if length < 8 {
        penalty += 20.0;
    }

    let raw = (entropy / 80.0 * 100.0).min(100.0) - penalty;
    let score = raw.round().clamp(0.0, 100.0) as u8;

    let mut tips = Vec::new();
    if length < 12 {
        tips.push("Use at least 12 characters; length is the single biggest improvement.");
    }
    if !has_upper {
        tips.push("Add uppercase letters (A-Z).");
    }
    if !has_lower {
        tips.push("Add lowercase letters (a-z).");
    }
    if !has_digit {
        tips.push("Add numbers (0-9).");
    }
    if !has_symbol {
        tips.push("Add symbols (!@#$%^&*) for a larger character pool.");
    }
    if common {
        tips.push("This is a commonly known password. Avoid it entirely.");
    }
    if run {
        tips.push("Avoid repeating characters (e.g. aaa, 111).");
    }
    if sequence || password.to_lowercase().contains("qwe") {
        tips.push("Avoid sequential patterns (123, abc, qwerty).");
    }
    if tips.is_empty() && score < 80 {
        tips.push("Consider a passphrase: 4+ random words are easy to remember and very strong.");
    }

    Analysis {
        length,
        score,
        label: label(score),
        entropy: (entropy * 10.0).round() / 10.0,
        crack_time: crack_time(entropy),
        charsets,
        tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Pattern detection tests
    // ============================================================================

    #[test]
    fn test_detects_runs_and_sequences() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert!(has_run(&chars("xaaay")));
        assert!(!has_run(&chars("aabb")));
        assert!(has_sequence(&chars("x123")));
        assert!(has_sequence(&chars("ABC")));
        assert!(has_sequence(&chars("7890")));
        assert!(!has_sequence(&chars("acegi")));
        assert!(!has_sequence(&chars("901")));
        assert!(all_same(&chars("zzzz")));
        assert!(!all_same(&chars("z")));
    }

    #[test]
    fn test_common_is_case_insensitive() {
        assert!(is_common("PassWord"));
        assert!(!is_common("correct horse battery staple"));
    }

    // ============================================================================
    // analyze tests
    // ============================================================================

    #[test]
    fn test_analyze_common_password_is_very_weak() {
        let analysis = analyze("password");
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.label, "Very Weak");
        assert_eq!(analysis.charsets, vec!["lowercase (26)"]);
        assert!(analysis
            .tips
            .contains(&"This is a commonly known password. Avoid it entirely."));
    }

    #[test]
    fn test_analyze_strong_password() {
        let analysis = analyze("Tr0ub4dor&3-Horse!");
        assert_eq!(analysis.length, 18);
        assert_eq!(analysis.charsets.len(), 4);
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.label, "Very Strong");
        assert_eq!(analysis.crack_time, "Centuries+");
        assert!(analysis.tips.is_empty());
    }

    #[test]
    fn test_analyze_entropy_is_rounded() {
        // 8 lowercase characters: 8 * log2(26) = 37.6
        let analysis = analyze("kqzmwvtr");
        assert_eq!(analysis.entropy, 37.6);
        assert_eq!(analysis.score, 47);
        assert_eq!(analysis.label, "Moderate");
    }

    #[test]
    fn test_analyze_short_repeated() {
        let analysis = analyze("aaa");
        // 3 * log2(26) = 14.1 -> 17.6 - 40 - 15 - 20
        assert_eq!(analysis.score, 0);
        assert!(analysis
            .tips
            .contains(&"Avoid repeating characters (e.g. aaa, 111)."));
    }

    #[test]
    fn test_analyze_tips_for_missing_classes() {
        let analysis = analyze("qwertyuiop");
        assert_eq!(
            analysis.tips,
            vec![
                "Use at least 12 characters; length is the single biggest improvement.",
                "Add uppercase letters (A-Z).",
                "Add numbers (0-9).",
                "Add symbols (!@#$%^&*) for a larger character pool.",
                "Avoid sequential patterns (123, abc, qwerty).",
            ]
        );
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze("");
        assert_eq!(analysis.length, 0);
        assert_eq!(analysis.entropy, 0.0);
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.crack_time, "Instantly");
    }

    // ============================================================================
    // crack_time tests
    // ============================================================================

    #[test]
    fn test_crack_time_buckets() {
        assert_eq!(crack_time(10.0), "Instantly");
        // 2^40 / 2 / 1e10 = 54.97s
        assert_eq!(crack_time(40.0), "~55 seconds");
        // 2^45 / 2 / 1e10 = 1759s
        assert_eq!(crack_time(45.0), "~29 minutes");
        assert_eq!(crack_time(200.0), "Centuries+");
        assert_eq!(crack_time(f64::INFINITY), "Centuries+");
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(label(100), "Very Strong");
        assert_eq!(label(80), "Very Strong");
        assert_eq!(label(79), "Strong");
        assert_eq!(label(40), "Moderate");
        assert_eq!(label(20), "Weak");
        assert_eq!(label(19), "Very Weak");
    }
}
