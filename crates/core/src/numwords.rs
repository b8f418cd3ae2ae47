//! Numbers to English words.

use serde::Deserialize;

const ONES: [&str; 20] = [
    "",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    None,
    Usd,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumWordsError {
    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("`{0}` is too large (maximum is {max})", max = u64::MAX)]
    TooLarge(String),
}

fn chunk_words(chunk: u64) -> String {
    let hundreds = (chunk / 100) as usize;
    let remainder = (chunk % 100) as usize;
    let mut words = String::new();

    if hundreds > 0 {
        words.push_str(ONES[hundreds]);
        words.push_str(" hundred");
        if remainder > 0 {
            words.push(' ');
        }
    }

    if remainder < 20 {
        words.push_str(ONES[remainder]);
    } else {
        words.push_str(TENS[remainder / 10]);
        if remainder % 10 > 0 {
            words.push('-');
            words.push_str(ONES[remainder % 10]);
        }
    }

    words
}

fn unsigned_words(mut n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    let mut groups: Vec<String> = Vec::new();
    let mut scale = 0;

    while n > 0 {
        let chunk = n % 1000;
        if chunk > 0 {
            let mut words = chunk_words(chunk);
            if scale > 0 {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        n /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Spell out an integer, e.g. `-1042` -> "negative one thousand forty-two".
pub fn to_words(n: i64) -> String {
    let words = unsigned_words(n.unsigned_abs());
    if n < 0 {
        format!("negative {words}")
    } else {
        words
    }
}

/// Convert free-form numeric input such as `"1,234.56"`.
///
/// Fractions are rounded to cents and written as `and NN/100`.
pub fn convert(input: &str, currency: Currency) -> Result<String, NumWordsError> {
    let original = input.trim();
    let not_a_number = || NumWordsError::NotANumber(original.to_string());
    let cleaned: String = original.chars().filter(|c| *c != ',').collect();

    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction) {
        return Err(not_a_number());
    }

    let mut whole: u64 = if integer.is_empty() {
        0
    } else {
        integer
            .parse()
            .map_err(|_| NumWordsError::TooLarge(original.to_string()))?
    };

    let digit = |i: usize| u64::from(fraction.as_bytes().get(i).map_or(0, |b| b - b'0'));
    let mut cents = digit(0) * 10 + digit(1) + u64::from(digit(2) >= 5);
    if cents == 100 {
        whole = whole
            .checked_add(1)
            .ok_or_else(|| NumWordsError::TooLarge(original.to_string()))?;
        cents = 0;
    }

    let mut words = unsigned_words(whole);
    if negative && (whole > 0 || cents > 0) {
        words = format!("negative {words}");
    }

    if currency == Currency::Usd {
        words.push_str(if whole == 1 { " dollar" } else { " dollars" });
    }

    if cents > 0 {
        words.push_str(&format!(" and {cents:02}/100"));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // to_words tests
    // ============================================================================

    #[test]
    fn test_to_words_small_numbers() {
        assert_eq!(to_words(0), "zero");
        assert_eq!(to_words(7), "seven");
        assert_eq!(to_words(13), "thirteen");
        assert_eq!(to_words(40), "forty");
        assert_eq!(to_words(42), "forty-two");
    }

    #[test]
    fn test_to_words_hundreds_and_scales() {
        assert_eq!(to_words(100), "one hundred");
        assert_eq!(to_words(305), "three hundred five");
        assert_eq!(to_words(1_000), "one thousand");
        assert_eq!(to_words(1_000_001), "one million one");
        assert_eq!(
            to_words(1_234_567),
            "one million two hundred thirty-four thousand five hundred sixty-seven"
        );
    }

    #[test]
    fn test_to_words_negative() {
        assert_eq!(to_words(-1042), "negative one thousand forty-two");
    }

    #[test]
    fn test_to_words_extremes() {
        assert!(to_words(i64::MAX).starts_with("nine quintillion two hundred twenty-three"));
        assert!(to_words(i64::MIN).starts_with("negative nine quintillion"));
    }

    // ============================================================================
    // convert tests
    // ============================================================================

    #[test]
    fn test_convert_with_separators() {
        assert_eq!(
            convert("1,234", Currency::None).unwrap(),
            "one thousand two hundred thirty-four"
        );
    }

    #[test]
    fn test_convert_fraction_as_cents() {
        assert_eq!(
            convert("12.5", Currency::None).unwrap(),
            "twelve and 50/100"
        );
        assert_eq!(convert(".07", Currency::None).unwrap(), "zero and 07/100");
    }

    #[test]
    fn test_convert_rounds_cents() {
        assert_eq!(convert("1.005", Currency::None).unwrap(), "one and 01/100");
        assert_eq!(convert("1.999", Currency::None).unwrap(), "two");
    }

    #[test]
    fn test_convert_usd() {
        assert_eq!(
            convert("1250.75", Currency::Usd).unwrap(),
            "one thousand two hundred fifty dollars and 75/100"
        );
        assert_eq!(convert("1", Currency::Usd).unwrap(), "one dollar");
    }

    #[test]
    fn test_convert_negative() {
        assert_eq!(convert("-3", Currency::None).unwrap(), "negative three");
        assert_eq!(convert("-0", Currency::None).unwrap(), "zero");
    }

    #[test]
    fn test_convert_rejects_garbage() {
        for bad in ["", "abc", "1.2.3", "1e5", "-", "."] {
            assert!(
                matches!(convert(bad, Currency::None), Err(NumWordsError::NotANumber(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_convert_too_large() {
        assert!(matches!(
            convert("99999999999999999999999", Currency::None),
            Err(NumWordsError::TooLarge(_))
        ));
    }
}
