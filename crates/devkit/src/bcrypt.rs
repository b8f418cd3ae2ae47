use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::bcrypt_hash::{self, HashInfo, Hashed};
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(name = "bcrypt")]
#[command(about = "bcrypt password hashes")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Hash a password
    #[clap(name = "hash")]
    Hash(HashOptions),

    /// Check a password against a hash
    #[clap(name = "verify")]
    Verify(VerifyOptions),

    /// Show the version, cost and salt of a hash
    #[clap(name = "inspect")]
    Inspect(InspectOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct HashOptions {
    /// Password to hash (read from stdin when omitted or `-`)
    password: Option<String>,

    /// Cost factor (4-14); every step doubles the work
    #[arg(short, long, env = "DEVKIT_BCRYPT_COST", default_value_t = bcrypt_hash::DEFAULT_COST)]
    cost: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct VerifyOptions {
    /// Password to check (read from stdin when omitted or `-`)
    password: Option<String>,

    /// bcrypt hash, e.g. `$2b$10$...`
    #[arg(long)]
    hash: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InspectOptions {
    /// Hash to inspect (read from stdin when omitted or `-`)
    hash: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub valid: bool,
    pub cost: u32,
}

pub fn hash_data(password: &str, cost: u32) -> Result<Hashed> {
    Ok(bcrypt_hash::hash(password, cost)?)
}

pub fn verify_data(password: &str, hash: &str) -> Result<VerifyOutput> {
    let info = bcrypt_hash::inspect(hash)?;
    Ok(VerifyOutput {
        valid: bcrypt_hash::verify(password, hash)?,
        cost: info.cost,
    })
}

pub fn inspect_data(hash: &str) -> Result<HashInfo> {
    Ok(bcrypt_hash::inspect(hash)?)
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Hash(options) => hash(options, global),
        Commands::Verify(options) => verify(options),
        Commands::Inspect(options) => inspect(options),
    }
}

fn hash(options: HashOptions, global: crate::Global) -> Result<()> {
    let password = read_input(options.password.clone())?;
    log::debug!("bcrypt hash at cost {}", options.cost);

    let output = hash_data(&password, options.cost)?;

    if options.json {
        return print_json(&output);
    }

    if output.truncated && global.verbose {
        eprintln!(
            "{}",
            f!(
                "password is longer than {} bytes; the rest is ignored",
                bcrypt_hash::MAX_PASSWORD_BYTES
            )
            .yellow()
        );
    }
    println!("{}", output.hash);
    Ok(())
}

fn verify(options: VerifyOptions) -> Result<()> {
    let password = read_input(options.password.clone())?;
    let output = verify_data(&password, &options.hash)?;

    if options.json {
        return print_json(&output);
    }

    match (output.valid, is_tty()) {
        (true, true) => println!("{}", "Password matches".green()),
        (false, true) => println!("{}", "Password does NOT match".red()),
        (true, false) => println!("valid"),
        (false, false) => println!("invalid"),
    }

    if output.valid {
        Ok(())
    } else {
        Err(eyre!("password does not match the bcrypt hash"))
    }
}

fn inspect(options: InspectOptions) -> Result<()> {
    let hash = read_input(options.hash.clone())?;
    let info = inspect_data(&hash)?;

    if options.json {
        return print_json(&info);
    }

    let tty = is_tty();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };

    let mut table = new_table();
    table.add_row(prettytable::row![label("Version"), info.version]);
    table.add_row(prettytable::row![label("Cost"), info.cost]);
    table.add_row(prettytable::row![label("Salt"), info.salt]);
    table.add_row(prettytable::row![label("Checksum"), info.checksum]);
    table.printstd();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash_data("hunter2", bcrypt_hash::MIN_COST).unwrap();
        assert_eq!(hashed.cost, 4);

        let ok = verify_data("hunter2", &hashed.hash).unwrap();
        assert!(ok.valid);
        assert_eq!(ok.cost, 4);
        assert!(!verify_data("hunter3", &hashed.hash).unwrap().valid);
    }

    #[test]
    fn test_hash_data_rejects_cost_out_of_range() {
        let err = hash_data("pw", 20).unwrap_err();
        assert!(err.to_string().contains("between 4 and 14"));
    }

    #[test]
    fn test_inspect_data() {
        let info = inspect_data("$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW").unwrap();
        assert_eq!((info.version.as_str(), info.cost), ("2b", 12));
        assert!(inspect_data("$2b$12$short").is_err());
    }
}
