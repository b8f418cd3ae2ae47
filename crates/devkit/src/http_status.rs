use crate::prelude::{println, *};
use colored::{ColoredString, Colorize};
use devkit_core::http_status::{self, StatusCode};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct HttpStatusOptions {
    /// Status code (404), code prefix (5) or text to search for (teapot)
    query: Option<String>,

    /// Only list codes of this class (1-5)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=5))]
    class: Option<u16>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Exact code first, then class filter, then free-text search.
pub fn http_status_data(query: Option<&str>, class: Option<u16>) -> Vec<&'static StatusCode> {
    let query = query.map(str::trim).unwrap_or_default();

    if let Ok(code) = query.parse::<u16>() {
        if let Some(status) = http_status::lookup(code) {
            return vec![status];
        }
    }

    let mut codes = match class {
        Some(class) => http_status::by_class(class),
        None => http_status::search(query),
    };
    if class.is_some() && !query.is_empty() {
        let matches = http_status::search(query);
        codes.retain(|status| matches.iter().any(|m| m.code == status.code));
    }
    codes
}

pub fn run(options: HttpStatusOptions, _global: crate::Global) -> Result<()> {
    let codes = http_status_data(options.query.as_deref(), options.class);

    if options.json {
        return print_json(&codes);
    }

    if codes.is_empty() {
        return Err(eyre!(
            "No status code matches `{}`",
            options.query.unwrap_or_default()
        ));
    }

    if let [status] = codes.as_slice() {
        output_single(status);
        return Ok(());
    }

    let tty = is_tty();
    let mut table = new_table();
    for status in codes {
        let code = if tty {
            colored_code(status.code).to_string()
        } else {
            status.code.to_string()
        };
        table.add_row(prettytable::row![code, status.name, status.description]);
    }
    table.printstd();
    Ok(())
}

fn colored_code(code: u16) -> ColoredString {
    let text = code.to_string();
    match code / 100 {
        1 => text.blue(),
        2 => text.green(),
        3 => text.cyan(),
        4 => text.yellow(),
        _ => text.red(),
    }
}

fn output_single(status: &StatusCode) {
    if !is_tty() {
        println!("{} {}", status.code, status.name);
        println!("{}", status.description);
        return;
    }

    println!("{} {}", colored_code(status.code).bold(), status.name.bold());
    if let Some(class) = http_status::class_label(status.code) {
        println!("{}", class.dimmed());
    }
    println!();
    println!("{}", status.description);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: Vec<&'static StatusCode>) -> Vec<u16> {
        list.iter().map(|s| s.code).collect()
    }

    #[test]
    fn test_exact_code() {
        assert_eq!(codes(http_status_data(Some("404"), None)), vec![404]);
    }

    #[test]
    fn test_class_filter_with_search() {
        assert_eq!(codes(http_status_data(None, Some(1))), vec![100, 101, 102, 103]);
        assert_eq!(
            codes(http_status_data(Some("redirect"), Some(3))),
            vec![307, 308]
        );
    }

    #[test]
    fn test_free_text_and_no_query() {
        assert_eq!(codes(http_status_data(Some("teapot"), None)), vec![418]);
        assert_eq!(
            http_status_data(None, None).len(),
            http_status::CODES.len()
        );
    }
}
