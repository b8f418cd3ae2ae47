use crate::prelude::{println, *};
use chrono::{DateTime, Utc};
use colored::Colorize;
use devkit_core::timestamp::{self, TimestampOutput};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TimestampOptions {
    /// Unix seconds or milliseconds, or a date such as 2024-03-10T12:30:00Z.
    /// Defaults to now; `-` reads stdin.
    #[arg(allow_hyphen_values = true)]
    input: Option<String>,

    /// UTC offset used for the local rendering (UTC, Z, +05:30, -0800)
    #[arg(long, env = "DEVKIT_TZ", default_value = "UTC")]
    tz: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Convert `input` (or `now` when absent) and render it at offset `tz`.
pub fn timestamp_data(input: Option<&str>, tz: &str, now: DateTime<Utc>) -> Result<TimestampOutput> {
    let offset = timestamp::parse_offset(tz)?;
    let instant = match input {
        Some(text) => timestamp::parse_input(text)?,
        None => now,
    };
    Ok(timestamp::convert(instant, offset, now))
}

pub fn run(options: TimestampOptions, _global: crate::Global) -> Result<()> {
    let input = match options.input.clone() {
        None => None,
        Some(text) => Some(read_input(Some(text))?),
    };
    let output = timestamp_data(input.as_deref(), &options.tz, Utc::now())?;

    if options.json {
        return print_json(&output);
    }

    output_formatted(&output);
    Ok(())
}

fn output_formatted(output: &TimestampOutput) {
    let tty = is_tty();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };

    let mut table = new_table();
    table.add_row(prettytable::row![label("Unix (s)"), output.unix_sec]);
    table.add_row(prettytable::row![label("Unix (ms)"), output.unix_ms]);
    table.add_row(prettytable::row![label("ISO 8601"), output.iso]);
    table.add_row(prettytable::row![label("UTC"), output.utc]);
    table.add_row(prettytable::row![
        label(&f!("Local ({})", output.offset)),
        output.local
    ]);
    table.add_row(prettytable::row![label("Relative"), output.relative]);
    table.printstd();

    if tty {
        println!();
        println!("{} {}", "Date:".dimmed(), output.date);
        println!("{} {}", "Time:".dimmed(), output.time);
    }
}
