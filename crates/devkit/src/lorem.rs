use crate::prelude::{println, *};
use devkit_core::lorem::{self, Unit};
use serde::Serialize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct LoremOptions {
    /// How many units to generate (1-100)
    #[arg(short = 'n', long, default_value_t = lorem::DEFAULT_COUNT)]
    count: usize,

    /// What to count
    #[arg(short, long, default_value = "paragraphs")]
    unit: UnitArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitArg {
    Words,
    Sentences,
    Paragraphs,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Words => Unit::Words,
            UnitArg::Sentences => Unit::Sentences,
            UnitArg::Paragraphs => Unit::Paragraphs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoremOutput {
    pub text: String,
    pub words: usize,
}

pub fn lorem_data(count: usize, unit: Unit) -> Result<LoremOutput> {
    let text = lorem::generate(count, unit)?;
    Ok(LoremOutput {
        words: text.split_whitespace().count(),
        text,
    })
}

pub fn run(options: LoremOptions, _global: crate::Global) -> Result<()> {
    let output = lorem_data(options.count, options.unit.into())?;

    if options.json {
        return print_json(&output);
    }

    println!("{}", output.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lorem_data() {
        let output = lorem_data(4, UnitArg::Words.into()).unwrap();
        assert_eq!(output.text, "lorem ipsum dolor sit");
        assert_eq!(output.words, 4);
    }

    #[test]
    fn test_lorem_data_rejects_zero() {
        assert!(lorem_data(0, Unit::Sentences).is_err());
    }
}
