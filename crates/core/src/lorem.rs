//! Placeholder text.
//!
//! Output is deterministic: sentence lengths and paragraph sizes cycle
//! through fixed patterns instead of being drawn at random.

use serde::Deserialize;

pub const MAX_COUNT: usize = 100;
pub const DEFAULT_COUNT: usize = 3;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "ut",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "ut", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "dolor",
    "in", "reprehenderit", "in", "voluptate", "velit", "esse", "cillum", "dolore", "eu", "fugiat",
    "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt",
    "in", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Words,
    Sentences,
    #[default]
    Paragraphs,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoremError {
    #[error("Count must be between 1 and {MAX_COUNT}, got {0}")]
    Count(usize),
}

fn words(n: usize) -> String {
    WORDS
        .iter()
        .cycle()
        .take(n)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sentence `index` of a run; lengths cycle between 8 and 19 words.
fn sentence(index: usize) -> String {
    let text = words(8 + (index * 5) % 12);
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn sentences(n: usize, offset: usize) -> String {
    (offset..offset + n)
        .map(sentence)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate(count: usize, unit: Unit) -> Result<String, LoremError> {
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(LoremError::Count(count));
    }

    Ok(match unit {
        Unit::Words => words(count),
        Unit::Sentences => sentences(count, 0),
        Unit::Paragraphs => {
            let mut offset = 0;
            let mut paragraphs = Vec::with_capacity(count);
            for p in 0..count {
                let size = 4 + p % 4;
                paragraphs.push(sentences(size, offset));
                offset += size;
            }
            paragraphs.join("\n\n")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // generate tests
    // ============================================================================

    #[test]
    fn test_generate_words() {
        assert_eq!(
            generate(5, Unit::Words).unwrap(),
            "lorem ipsum dolor sit amet"
        );
        let wrapped = generate(WORDS.len() + 2, Unit::Words).unwrap();
        assert!(wrapped.ends_with("laborum lorem ipsum"));
    }

    #[test]
    fn test_generate_sentences() {
        let text = generate(2, Unit::Sentences).unwrap();
        assert_eq!(
            text,
            "Lorem ipsum dolor sit amet consectetur adipiscing elit. \
             Lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor incididunt."
        );
    }

    #[test]
    fn test_generate_paragraphs() {
        let text = generate(3, Unit::Paragraphs).unwrap();
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].matches('.').count(), 4);
        assert_eq!(paragraphs[1].matches('.').count(), 5);
        assert_eq!(paragraphs[2].matches('.').count(), 6);
        assert_eq!(text, generate(3, Unit::default()).unwrap());
    }

    #[test]
    fn test_generate_count_bounds() {
        assert_eq!(generate(0, Unit::Words), Err(LoremError::Count(0)));
        assert_eq!(generate(101, Unit::Words), Err(LoremError::Count(101)));
        assert!(generate(MAX_COUNT, Unit::Paragraphs).is_ok());
    }
}
