use crate::prelude::{eprintln, println, *};
use chrono::NaiveDateTime;
use colored::Colorize;
use devkit_core::cron::{self, Field, PRESETS};
use serde::Serialize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CronOptions {
    /// Cron expression, e.g. "*/15 9-17 * * 1-5" (read from stdin when omitted or `-`)
    expression: Option<String>,

    /// Number of upcoming runs to list
    #[arg(short = 'n', long, env = "DEVKIT_CRON_COUNT", default_value = "5")]
    count: usize,

    /// Start the simulation after this time instead of now (e.g. "2024-01-01 09:30")
    #[arg(long)]
    from: Option<String>,

    /// List the common preset expressions and exit
    #[arg(long)]
    presets: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct FieldValues {
    pub field: Field,
    pub values: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct CronOutput {
    pub expression: String,
    pub description: String,
    pub fields: Vec<FieldValues>,
    pub next_runs: Vec<String>,
}

/// Parse, describe and simulate `expression` starting after `from`.
pub fn cron_data(expression: &str, count: usize, from: NaiveDateTime) -> Result<CronOutput> {
    let schedule = cron::parse(expression)?;
    let description = cron::describe(&schedule.expression)?;

    let fields = Field::ALL
        .iter()
        .map(|field| FieldValues {
            field: *field,
            values: schedule.field(*field).values(),
        })
        .collect();

    let next_runs = cron::next_runs(&schedule, from, count)
        .iter()
        .map(|run| run.format("%Y-%m-%d %H:%M (%a)").to_string())
        .collect();

    Ok(CronOutput {
        expression: schedule.expression,
        description,
        fields,
        next_runs,
    })
}

/// `--from` accepts anything the timestamp parser does; the wall-clock value is kept as-is.
pub fn parse_from(from: Option<&str>) -> Result<NaiveDateTime> {
    match from {
        Some(text) => Ok(devkit_core::timestamp::parse_input(text)?.naive_utc()),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

pub fn run(options: CronOptions, global: crate::Global) -> Result<()> {
    if options.presets {
        return output_presets(options.json);
    }

    let expression = read_input(options.expression.clone())?;
    let from = parse_from(options.from.as_deref())?;
    log::debug!("cron expression={expression:?} from={from} count={}", options.count);

    if global.verbose {
        eprintln!("Simulating from {}", from.format("%Y-%m-%d %H:%M"));
    }

    let output = cron_data(&expression, options.count, from)?;

    if options.json {
        return print_json(&output);
    }

    output_formatted(&output, &global);
    Ok(())
}

fn output_presets(json: bool) -> Result<()> {
    if json {
        return print_json(&PRESETS);
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["EXPRESSION", "LABEL"]);
    for preset in PRESETS {
        table.add_row(prettytable::row![preset.expression, preset.label]);
    }
    table.printstd();
    Ok(())
}

fn output_formatted(output: &CronOutput, global: &crate::Global) {
    if !is_tty() {
        println!("{}", output.description);
        for run in &output.next_runs {
            println!("{run}");
        }
        return;
    }

    println!("{}", output.expression.bold());
    println!("{}", output.description.green());
    println!();

    if global.verbose {
        let mut table = new_table();
        for field in &output.fields {
            let values = field
                .values
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(",");
            table.add_row(prettytable::row![field.field.label().cyan(), values]);
        }
        table.printstd();
        println!();
    }

    if output.next_runs.is_empty() {
        println!("{}", "No runs within the next 366 days".yellow());
        return;
    }

    println!("{}", "Next runs:".bold());
    for (i, run) in output.next_runs.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().dimmed(), run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_cron_data_weekday_mornings() {
        let output = cron_data("0 9 * * 1-5", 3, at(2024, 1, 5, 10, 0)).unwrap();
        assert_eq!(output.description, "Every weekday (Mon-Fri) at 9:00 AM");
        assert_eq!(
            output.next_runs,
            vec![
                "2024-01-08 09:00 (Mon)",
                "2024-01-09 09:00 (Tue)",
                "2024-01-10 09:00 (Wed)",
            ]
        );
        assert_eq!(output.fields[4].values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_cron_data_rejects_bad_expression() {
        let err = cron_data("0 24 * * *", 1, at(2024, 1, 1, 0, 0)).unwrap_err();
        assert!(err.to_string().contains("hour"));
    }

    #[test]
    fn test_parse_from_keeps_wall_clock() {
        assert_eq!(
            parse_from(Some("2024-03-10 08:15")).unwrap(),
            at(2024, 3, 10, 8, 15)
        );
    }
}
