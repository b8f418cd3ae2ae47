use crate::prelude::{eprintln, *};
use colored::Colorize;
use devkit_core::useragent::{self, Component, UserAgent};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct UaOptions {
    /// User-Agent string (read from stdin when omitted or `-`)
    user_agent: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(options: UaOptions, global: crate::Global) -> Result<()> {
    let raw = read_input(options.user_agent.clone())?;
    let parsed = useragent::parse(&raw)?;

    if options.json {
        return print_json(&parsed);
    }

    if global.verbose {
        eprintln!("{}", parsed.raw.dimmed());
        eprintln!();
    }

    output_formatted(&parsed);
    Ok(())
}

fn component(c: &Component) -> String {
    if c.version.is_empty() {
        c.name.clone()
    } else {
        f!("{} {}", c.name, c.version)
    }
}

fn output_formatted(ua: &UserAgent) {
    let tty = is_tty();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };

    let device = [ua.device.vendor.as_str(), ua.device.model.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let device = if device.is_empty() {
        ua.device.device_type.clone()
    } else {
        f!("{} ({})", ua.device.device_type, device)
    };

    let mut table = new_table();
    table.add_row(prettytable::row![label("Browser"), component(&ua.browser)]);
    table.add_row(prettytable::row![label("Engine"), component(&ua.engine)]);
    table.add_row(prettytable::row![label("OS"), component(&ua.os)]);
    table.add_row(prettytable::row![label("Device"), device]);
    table.printstd();
}
