use crate::prelude::*;
use clap::Parser;

mod base64;
mod bcrypt;
mod chmod;
mod color;
mod cron;
mod diff;
mod error;
mod hash;
mod hmac;
mod http_status;
mod json;
mod jwt;
mod lorem;
mod mcp;
mod password;
mod prelude;
mod radix;
mod regex;
mod subnet;
mod timestamp;
mod ua;
mod url;
mod uuid;
mod words;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Everyday developer utilities: cron, subnets, encodings, hashes, JWTs, JSON, diffs and more"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DEVKIT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Validate a cron expression, describe it and list its next runs
    Cron(crate::cron::CronOptions),

    /// IPv4 subnet calculator
    Subnet(crate::subnet::SubnetOptions),

    /// Parse a User-Agent string
    Ua(crate::ua::UaOptions),

    /// Convert Unix permissions between octal and rwx notation
    Chmod(crate::chmod::ChmodOptions),

    /// Spell a number in English words
    Words(crate::words::WordsOptions),

    /// Estimate password strength
    Password(crate::password::PasswordOptions),

    /// Base64 encode and decode
    Base64(crate::base64::App),

    /// URL percent-encoding
    Url(crate::url::App),

    /// Convert integers between binary, octal, decimal and hex
    Radix(crate::radix::RadixOptions),

    /// MD5 and SHA digests
    Hash(crate::hash::HashOptions),

    /// HMAC signatures
    Hmac(crate::hmac::App),

    /// Encode, decode and verify JSON Web Tokens
    Jwt(crate::jwt::App),

    /// bcrypt password hashes
    Bcrypt(crate::bcrypt::App),

    /// Format JSON, convert between JSON, CSV, YAML and XML, generate TypeScript types
    Json(crate::json::App),

    /// Compare two texts line by line
    Diff(crate::diff::DiffOptions),

    /// Generate placeholder text
    Lorem(crate::lorem::LoremOptions),

    /// Convert colours between hex, RGB and HSL
    Color(crate::color::ColorOptions),

    /// Convert Unix timestamps and dates
    Timestamp(crate::timestamp::TimestampOptions),

    /// Generate and inspect UUIDs
    Uuid(crate::uuid::App),

    /// Test a regular expression against some text
    Regex(crate::regex::RegexOptions),

    /// HTTP status code reference
    HttpStatus(crate::http_status::HttpStatusOptions),

    /// Model Context Protocol server
    Mcp(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Cron(options) => crate::cron::run(options, app.global),
        SubCommands::Subnet(options) => crate::subnet::run(options, app.global),
        SubCommands::Ua(options) => crate::ua::run(options, app.global),
        SubCommands::Chmod(options) => crate::chmod::run(options, app.global),
        SubCommands::Words(options) => crate::words::run(options, app.global),
        SubCommands::Password(options) => crate::password::run(options, app.global),
        SubCommands::Base64(sub_app) => crate::base64::run(sub_app, app.global),
        SubCommands::Url(sub_app) => crate::url::run(sub_app, app.global),
        SubCommands::Radix(options) => crate::radix::run(options, app.global),
        SubCommands::Hash(options) => crate::hash::run(options, app.global),
        SubCommands::Hmac(sub_app) => crate::hmac::run(sub_app, app.global),
        SubCommands::Jwt(sub_app) => crate::jwt::run(sub_app, app.global),
        SubCommands::Bcrypt(sub_app) => crate::bcrypt::run(sub_app, app.global),
        SubCommands::Json(sub_app) => crate::json::run(sub_app, app.global),
        SubCommands::Diff(options) => crate::diff::run(options, app.global),
        SubCommands::Lorem(options) => crate::lorem::run(options, app.global),
        SubCommands::Color(options) => crate::color::run(options, app.global),
        SubCommands::Timestamp(options) => crate::timestamp::run(options, app.global),
        SubCommands::Uuid(sub_app) => crate::uuid::run(sub_app, app.global),
        SubCommands::Regex(options) => crate::regex::run(options, app.global),
        SubCommands::HttpStatus(options) => crate::http_status::run(options, app.global),
        SubCommands::Mcp(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
