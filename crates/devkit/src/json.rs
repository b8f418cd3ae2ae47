use crate::prelude::{eprintln, println, *};
use devkit_core::json::{self, Indent};
use devkit_core::{typescript, xml};
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "json")]
#[command(about = "Format JSON and convert between JSON, CSV, YAML and XML")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Pretty-print JSON
    #[clap(name = "format")]
    Format(FormatOptions),

    /// Remove all insignificant whitespace
    #[clap(name = "minify")]
    Minify(InputOptions),

    /// Flatten an array of objects into CSV
    #[clap(name = "to-csv")]
    ToCsv(InputOptions),

    /// Turn CSV with a header row into a JSON array
    #[clap(name = "from-csv")]
    FromCsv(FromCsvOptions),

    /// Convert JSON to YAML
    #[clap(name = "to-yaml")]
    ToYaml(InputOptions),

    /// Convert YAML to JSON
    #[clap(name = "from-yaml")]
    FromYaml(FormatOptions),

    /// Convert XML to JSON
    #[clap(name = "from-xml")]
    FromXml(FormatOptions),

    /// Generate TypeScript interfaces from a sample document
    #[clap(name = "to-ts")]
    ToTs(TypescriptOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InputOptions {
    /// Input document (read from stdin when omitted or `-`)
    input: Option<String>,

    /// Read the input from this file instead
    #[arg(short, long, conflicts_with = "input")]
    file: Option<String>,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FormatOptions {
    #[clap(flatten)]
    source: InputOptions,

    /// Indentation of the JSON output
    #[arg(short, long, env = "DEVKIT_JSON_INDENT", default_value = "two")]
    indent: IndentArg,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FromCsvOptions {
    #[clap(flatten)]
    source: InputOptions,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Indentation of the JSON output
    #[arg(short, long, env = "DEVKIT_JSON_INDENT", default_value = "two")]
    indent: IndentArg,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TypescriptOptions {
    #[clap(flatten)]
    source: InputOptions,

    /// Name of the top-level interface
    #[arg(short, long, default_value = typescript::DEFAULT_ROOT)]
    root: String,

    /// Mark fields whose sample value is `null` as optional
    #[arg(long)]
    optional: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentArg {
    /// Two spaces
    Two,
    /// Four spaces
    Four,
    /// One tab
    Tab,
}

impl From<IndentArg> for Indent {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Two => Indent::Two,
            IndentArg::Four => Indent::Four,
            IndentArg::Tab => Indent::Tab,
        }
    }
}

/// Every conversion the `json` tool offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Format,
    Minify,
    ToCsv,
    FromCsv,
    ToYaml,
    FromYaml,
    FromXml,
}

pub fn convert_data(
    operation: Operation,
    input: &str,
    indent: Indent,
    delimiter: char,
) -> Result<String> {
    let output = match operation {
        Operation::Format => json::format(input, indent)?,
        Operation::Minify => json::minify(input)?,
        Operation::ToCsv => json::to_csv(input)?,
        Operation::FromCsv => {
            let delimiter = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| Error::InvalidArguments(f!("delimiter `{delimiter}` must be ASCII")))?;
            json::pretty(&json::from_csv(input, delimiter)?, indent)?
        }
        Operation::ToYaml => json::to_yaml(input)?,
        Operation::FromYaml => json::pretty(&json::from_yaml(input)?, indent)?,
        Operation::FromXml => json::pretty(&xml::to_json(input)?, indent)?,
    };
    Ok(output)
}

pub fn typescript_data(input: &str, root: &str, optional: bool) -> Result<String> {
    Ok(typescript::to_typescript(input, root, optional)?)
}

fn read_source(source: &InputOptions) -> Result<String> {
    match &source.file {
        Some(path) => std::fs::read_to_string(path).wrap_err_with(|| f!("Failed to read {path}")),
        None => read_input(source.input.clone()),
    }
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let (operation, source, indent, delimiter) = match app.command {
        Commands::Format(o) => (Operation::Format, o.source, o.indent, ','),
        Commands::Minify(o) => (Operation::Minify, o, IndentArg::Two, ','),
        Commands::ToCsv(o) => (Operation::ToCsv, o, IndentArg::Two, ','),
        Commands::FromCsv(o) => (Operation::FromCsv, o.source, o.indent, o.delimiter),
        Commands::ToYaml(o) => (Operation::ToYaml, o, IndentArg::Two, ','),
        Commands::FromYaml(o) => (Operation::FromYaml, o.source, o.indent, ','),
        Commands::FromXml(o) => (Operation::FromXml, o.source, o.indent, ','),
        Commands::ToTs(o) => return to_ts(o),
    };

    let input = read_source(&source)?;
    log::debug!("json {operation:?}: {} input bytes", input.len());

    let output = convert_data(operation, &input, indent.into(), delimiter)?;

    if global.verbose {
        eprintln!("{} bytes -> {} bytes", input.len(), output.len());
    }

    println!("{}", output.trim_end_matches('\n'));
    Ok(())
}

fn to_ts(options: TypescriptOptions) -> Result<()> {
    let input = read_source(&options.source)?;
    log::debug!("json to-ts: root {}, {} input bytes", options.root, input.len());

    println!("{}", typescript_data(&input, &options.root, options.optional)?);
    Ok(())
}
