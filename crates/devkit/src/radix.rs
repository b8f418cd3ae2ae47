use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::codec::{self, Radix, RadixOutput};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct RadixOptions {
    /// Integer such as 255, 0xff, 0b1010 or 0o17 (read from stdin when omitted or `-`)
    #[arg(allow_hyphen_values = true)]
    number: Option<String>,

    /// Interpret the input in this base instead of detecting it
    #[arg(short, long)]
    from: Option<RadixArg>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadixArg {
    #[value(alias = "bin")]
    Binary,
    #[value(alias = "oct")]
    Octal,
    #[value(alias = "dec")]
    Decimal,
    Hex,
}

impl From<RadixArg> for Radix {
    fn from(arg: RadixArg) -> Self {
        match arg {
            RadixArg::Binary => Radix::Binary,
            RadixArg::Octal => Radix::Octal,
            RadixArg::Decimal => Radix::Decimal,
            RadixArg::Hex => Radix::Hex,
        }
    }
}

pub fn run(options: RadixOptions, global: crate::Global) -> Result<()> {
    let number = read_input(options.number.clone())?;
    let output = codec::convert_radix(&number, options.from.map(Radix::from))?;
    log::debug!("radix input={number:?} detected={}", output.detected);

    if options.json {
        return print_json(&output);
    }

    output_formatted(&output, global.verbose);
    Ok(())
}

fn output_formatted(output: &RadixOutput, verbose: bool) {
    let tty = is_tty();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };

    let mut table = new_table();
    if verbose {
        table.add_row(prettytable::row![label("Detected"), output.detected]);
    }
    table.add_row(prettytable::row![label("Decimal"), output.decimal]);
    table.add_row(prettytable::row![label("Hex"), output.hex]);
    table.add_row(prettytable::row![label("Binary"), output.binary]);
    table.add_row(prettytable::row![label("Octal"), output.octal]);
    table.printstd();

    if !tty {
        return;
    }
    println!();
    println!("{} {}", "Input:".dimmed(), output.input);
}
