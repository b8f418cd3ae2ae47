use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::chmod::{self, ModeOutput, Permission, PRESETS};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ChmodOptions {
    /// Permissions as octal (644) or rwx notation (rw-r--r--)
    mode: Option<String>,

    /// File name used in the generated chmod command
    #[arg(short, long, default_value = "file")]
    target: String,

    /// List the common presets and exit
    #[arg(long)]
    presets: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn chmod_data(mode: &str, target: &str) -> Result<ModeOutput> {
    Ok(chmod::parse(mode)?.output(target))
}

pub fn run(options: ChmodOptions, _global: crate::Global) -> Result<()> {
    if options.presets {
        return output_presets(options.json);
    }

    let mode = read_input(options.mode.clone())?;
    let output = chmod_data(&mode, &options.target)?;

    if options.json {
        return print_json(&output);
    }

    output_formatted(&output);
    Ok(())
}

fn output_presets(json: bool) -> Result<()> {
    if json {
        return print_json(&PRESETS);
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["MODE", "DESCRIPTION"]);
    for preset in PRESETS {
        table.add_row(prettytable::row![preset.octal, preset.description]);
    }
    table.printstd();
    Ok(())
}

fn yes_no(allowed: bool) -> &'static str {
    if allowed {
        "yes"
    } else {
        "-"
    }
}

fn output_formatted(output: &ModeOutput) {
    if !is_tty() {
        println!("{}", output.octal);
        println!("{}", output.symbolic);
        println!("{}", output.command);
        return;
    }

    println!("{}  {}", output.octal.bold(), output.symbolic.green());
    if let Some(description) = output.description {
        println!("{}", description.dimmed());
    }
    println!();

    let mut table = new_table();
    table.add_row(prettytable::row!["", "READ", "WRITE", "EXECUTE"]);
    let rows: [(&str, Permission); 3] = [
        ("Owner", output.owner),
        ("Group", output.group),
        ("Others", output.others),
    ];
    for (who, permission) in rows {
        table.add_row(prettytable::row![
            who.cyan(),
            yes_no(permission.read),
            yes_no(permission.write),
            yes_no(permission.execute)
        ]);
    }
    table.printstd();

    println!();
    println!("{}", output.command.yellow());
}
