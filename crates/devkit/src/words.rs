use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::numwords::{self, Currency};
use serde::Serialize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct WordsOptions {
    /// Number to spell, e.g. 1,234.56 (read from stdin when omitted or `-`)
    #[arg(allow_hyphen_values = true)]
    number: Option<String>,

    /// Append a currency unit
    #[arg(short, long, env = "DEVKIT_CURRENCY", default_value = "none")]
    currency: CurrencyArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyArg {
    /// Plain number
    None,
    /// US dollars
    Usd,
}

impl From<CurrencyArg> for Currency {
    fn from(arg: CurrencyArg) -> Self {
        match arg {
            CurrencyArg::None => Currency::None,
            CurrencyArg::Usd => Currency::Usd,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordsOutput {
    pub input: String,
    pub words: String,
}

pub fn words_data(input: &str, currency: Currency) -> Result<WordsOutput> {
    Ok(WordsOutput {
        input: input.trim().to_string(),
        words: numwords::convert(input, currency)?,
    })
}

pub fn run(options: WordsOptions, _global: crate::Global) -> Result<()> {
    let input = read_input(options.number.clone())?;
    let output = words_data(&input, options.currency.into())?;

    if options.json {
        return print_json(&output);
    }

    if is_tty() {
        println!("{}", output.words.green());
    } else {
        println!("{}", output.words);
    }
    Ok(())
}
