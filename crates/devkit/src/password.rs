use crate::prelude::{println, *};
use colored::{ColoredString, Colorize};
use devkit_core::password::{self, Analysis};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct PasswordOptions {
    /// Password to analyse. Prefer stdin so it stays out of your shell history.
    #[arg(allow_hyphen_values = true)]
    password: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(options: PasswordOptions, _global: crate::Global) -> Result<()> {
    let password = read_input(options.password.clone())?;
    let analysis = password::analyze(&password);

    if options.json {
        return print_json(&analysis);
    }

    output_formatted(&analysis);
    Ok(())
}

fn colored_label(analysis: &Analysis) -> ColoredString {
    match analysis.score {
        0..=19 => analysis.label.red().bold(),
        20..=39 => analysis.label.red(),
        40..=59 => analysis.label.yellow(),
        60..=79 => analysis.label.green(),
        _ => analysis.label.green().bold(),
    }
}

fn output_formatted(analysis: &Analysis) {
    let tty = is_tty();

    if tty {
        println!("{} ({}/100)", colored_label(analysis), analysis.score);
    } else {
        println!("{} ({}/100)", analysis.label, analysis.score);
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Length", analysis.length]);
    table.add_row(prettytable::row!["Entropy", f!("{:.1} bits", analysis.entropy)]);
    table.add_row(prettytable::row!["Crack time", analysis.crack_time]);
    table.add_row(prettytable::row!["Character sets", analysis.charsets.join(", ")]);
    table.printstd();

    if analysis.tips.is_empty() {
        return;
    }

    println!();
    for tip in &analysis.tips {
        if tty {
            println!("{} {}", "*".yellow(), tip);
        } else {
            println!("* {tip}");
        }
    }
}
