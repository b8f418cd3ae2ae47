use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::pattern::{self, MatchReport};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct RegexOptions {
    /// Regular expression
    #[arg(allow_hyphen_values = true)]
    pattern: String,

    /// Text to search (read from stdin when omitted or `-`)
    text: Option<String>,

    /// Flags: g (all matches), i, m, s, x
    #[arg(short, long, default_value = "g")]
    flags: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(options: RegexOptions, global: crate::Global) -> Result<()> {
    let text = read_input(options.text.clone())?;
    let report = pattern::test(&options.pattern, &options.flags, &text)?;
    log::debug!("regex /{}/{} -> {} matches", options.pattern, options.flags, report.match_count);

    if options.json {
        return print_json(&report);
    }

    output_formatted(&report, global.verbose);
    Ok(())
}

fn output_formatted(report: &MatchReport, verbose: bool) {
    if !is_tty() {
        for m in &report.matches {
            println!("{}", m.text);
        }
        return;
    }

    let highlighted: String = report
        .segments
        .iter()
        .map(|segment| {
            if segment.matched {
                segment.text.black().on_yellow().to_string()
            } else {
                segment.text.clone()
            }
        })
        .collect();
    println!("{highlighted}");
    println!();

    let noun = if report.match_count == 1 { "match" } else { "matches" };
    eprintln!("{}", f!("{} {noun}", report.match_count).bold());

    if report.matches.is_empty() {
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["#", "SPAN", "MATCH", "GROUPS"]);
    for m in &report.matches {
        let groups = m
            .groups
            .iter()
            .map(|g| {
                let name = g.name.clone().unwrap_or_else(|| g.index.to_string());
                f!("{name}={}", g.text.as_deref().unwrap_or("-"))
            })
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(prettytable::row![
            m.index,
            f!("{}..{}", m.start, m.end),
            m.text.green(),
            groups
        ]);
    }
    table.printstd();

    if verbose {
        eprintln!("Flags: {:?}", report.flags);
    }
}
