use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::uuid::{self as uuids, UuidFormat, UuidInfo};

#[derive(Debug, clap::Parser)]
#[command(name = "uuid")]
#[command(about = "Generate and inspect UUIDs")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Generate random (v4) UUIDs
    #[clap(name = "generate")]
    Generate(GenerateOptions),

    /// Show the version and variant of a UUID
    #[clap(name = "inspect")]
    Inspect(InspectOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GenerateOptions {
    /// How many UUIDs to generate (1-1000)
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Uppercase hex digits
    #[arg(short, long)]
    uppercase: bool,

    /// Omit the hyphens
    #[arg(long)]
    no_hyphens: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InspectOptions {
    /// UUID to inspect (read from stdin when omitted or `-`)
    uuid: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Generate(options) => generate(options),
        Commands::Inspect(options) => inspect(options),
    }
}

fn generate(options: GenerateOptions) -> Result<()> {
    let format = UuidFormat {
        uppercase: options.uppercase,
        hyphens: !options.no_hyphens,
    };
    let ids = uuids::generate(options.count, format)?;

    if options.json {
        return print_json(&ids);
    }

    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn inspect(options: InspectOptions) -> Result<()> {
    let text = read_input(options.uuid.clone())?;
    let info = uuids::inspect(&text)?;

    if options.json {
        return print_json(&info);
    }

    output_info(&info);
    Ok(())
}

fn output_info(info: &UuidInfo) {
    let tty = is_tty();
    let mut table = new_table();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };
    table.add_row(prettytable::row![label("UUID"), info.uuid]);
    table.add_row(prettytable::row![
        label("Version"),
        f!("{} ({})", info.version, info.version_name)
    ]);
    table.add_row(prettytable::row![label("Variant"), info.variant]);
    if info.nil {
        table.add_row(prettytable::row![label("Nil"), "yes"]);
    }
    table.printstd();
}
