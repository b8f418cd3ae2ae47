use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::diff::{self, DiffReport, LineKind};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DiffOptions {
    /// Original file (`-` for stdin)
    original: String,

    /// Modified file (`-` for stdin)
    modified: String,

    /// Print a unified patch with this many lines of context
    #[arg(short = 'U', long)]
    unified: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn read_text(path: &str) -> Result<String> {
    String::from_utf8(read_bytes(path)?).wrap_err_with(|| f!("{path} is not valid UTF-8"))
}

pub fn diff_data(original: &str, modified: &str) -> DiffReport {
    diff::compare(original, modified)
}

fn render(report: &DiffReport, tty: bool) -> Vec<String> {
    report
        .lines
        .iter()
        .map(|line| {
            let text = match line.kind {
                LineKind::Equal => f!("  {}", line.text),
                LineKind::Added => f!("+ {}", line.text),
                LineKind::Removed => f!("- {}", line.text),
            };
            match (line.kind, tty) {
                (LineKind::Added, true) => text.green().to_string(),
                (LineKind::Removed, true) => text.red().to_string(),
                (LineKind::Equal, true) => text.dimmed().to_string(),
                (_, false) => text,
            }
        })
        .collect()
}

pub fn run(options: DiffOptions, global: crate::Global) -> Result<()> {
    if options.original == "-" && options.modified == "-" {
        return Err(Error::InvalidArguments("only one side can be read from stdin".into()).into());
    }

    let original = read_text(&options.original)?;
    let modified = read_text(&options.modified)?;

    if let Some(context) = options.unified {
        let patch = diff::unified(&original, &modified, context);
        if !patch.is_empty() {
            println!("{}", patch.trim_end_matches('\n'));
        }
        return Ok(());
    }

    let report = diff_data(&original, &modified);
    log::debug!(
        "diff: +{} -{} ={}",
        report.added,
        report.removed,
        report.unchanged
    );

    if options.json {
        return print_json(&report);
    }

    for line in render(&report, is_tty()) {
        println!("{line}");
    }

    if report.identical {
        eprintln!("no differences");
    } else if global.verbose {
        eprintln!(
            "{} added, {} removed, {} unchanged",
            report.added, report.removed, report.unchanged
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let report = diff_data("keep\nold\n", "keep\nnew\n");
        assert_eq!(render(&report, false), vec!["  keep", "- old", "+ new"]);
    }

    #[test]
    fn test_diff_data_identical() {
        let report = diff_data("x\n", "x\n");
        assert!(report.identical);
        assert_eq!(render(&report, false), vec!["  x"]);
    }
}
