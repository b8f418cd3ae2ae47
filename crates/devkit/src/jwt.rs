use crate::prelude::{eprintln, println, *};
use chrono::{DateTime, Utc};
use colored::Colorize;
use devkit_core::jwt::{self, DecodedToken, JwtAlgorithm};
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(name = "jwt")]
#[command(about = "Encode, decode and verify JSON Web Tokens")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Sign a JSON payload
    #[clap(name = "encode")]
    Encode(EncodeOptions),

    /// Show the header and claims of a token without verifying it
    #[clap(name = "decode")]
    Decode(DecodeOptions),

    /// Check a token's signature
    #[clap(name = "verify")]
    Verify(VerifyOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct EncodeOptions {
    /// JSON payload, e.g. '{"sub":"42"}' (read from stdin when omitted or `-`)
    payload: Option<String>,

    /// Signing secret
    #[arg(short, long, env = "DEVKIT_JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Signing algorithm
    #[arg(short, long, default_value = "hs256")]
    algorithm: AlgorithmArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DecodeOptions {
    /// Token (read from stdin when omitted or `-`)
    token: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct VerifyOptions {
    /// Token (read from stdin when omitted or `-`)
    token: Option<String>,

    /// Signing secret
    #[arg(short, long, env = "DEVKIT_JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmArg {
    Hs256,
    Hs384,
    Hs512,
}

impl From<AlgorithmArg> for JwtAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Hs256 => JwtAlgorithm::HS256,
            AlgorithmArg::Hs384 => JwtAlgorithm::HS384,
            AlgorithmArg::Hs512 => JwtAlgorithm::HS512,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EncodeOutput {
    pub algorithm: JwtAlgorithm,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub valid: bool,
    #[serde(flatten)]
    pub decoded: DecodedToken,
}

pub fn encode_data(payload: &str, secret: &str, algorithm: JwtAlgorithm) -> Result<EncodeOutput> {
    Ok(EncodeOutput {
        algorithm,
        token: jwt::encode(payload, secret, algorithm)?,
    })
}

pub fn decode_data(token: &str, now: DateTime<Utc>) -> Result<DecodedToken> {
    Ok(jwt::decode(token, now)?)
}

pub fn verify_data(token: &str, secret: &str, now: DateTime<Utc>) -> Result<VerifyOutput> {
    let decoded = jwt::decode(token, now)?;
    let valid = jwt::verify(token, secret)?;
    Ok(VerifyOutput { valid, decoded })
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Encode(options) => encode(options),
        Commands::Decode(options) => decode(options, global),
        Commands::Verify(options) => verify(options),
    }
}

fn encode(options: EncodeOptions) -> Result<()> {
    let payload = read_input(options.payload.clone())?;
    let output = encode_data(&payload, &options.secret, options.algorithm.into())?;

    if options.json {
        return print_json(&output);
    }

    println!("{}", output.token);
    Ok(())
}

fn decode(options: DecodeOptions, global: crate::Global) -> Result<()> {
    let token = read_input(options.token.clone())?;
    let decoded = decode_data(&token, Utc::now())?;

    if options.json {
        return print_json(&decoded);
    }

    if global.verbose {
        if let Some(signature) = &decoded.signature {
            eprintln!("{} {}", "Signature:".dimmed(), signature);
        }
    }

    output_decoded(&decoded)
}

fn verify(options: VerifyOptions) -> Result<()> {
    let token = read_input(options.token.clone())?;
    let output = verify_data(&token, &options.secret, Utc::now())?;

    if options.json {
        return print_json(&output);
    }

    let algorithm = output.decoded.algorithm.as_deref().unwrap_or("?");
    match (output.valid, is_tty()) {
        (true, true) => println!("{} ({algorithm})", "Signature is valid".green()),
        (false, true) => println!("{} ({algorithm})", "Signature does NOT match".red()),
        (true, false) => println!("valid"),
        (false, false) => println!("invalid"),
    }

    if output.decoded.expired == Some(true) {
        eprintln!("Token expired at {}", output.decoded.expires_at.as_deref().unwrap_or("?"));
    }

    if output.valid {
        Ok(())
    } else {
        Err(eyre!("JWT signature mismatch"))
    }
}

fn output_decoded(decoded: &DecodedToken) -> Result<()> {
    let header = serde_json::to_string_pretty(&decoded.header)?;
    let payload = serde_json::to_string_pretty(&decoded.payload)?;

    if !is_tty() {
        println!("{header}");
        println!("{payload}");
        return Ok(());
    }

    println!("{}", "Header".bold());
    println!("{}", header.cyan());
    println!();
    println!("{}", "Payload".bold());
    println!("{}", payload.green());

    let mut table = new_table();
    if let Some(iat) = &decoded.issued_at {
        table.add_row(prettytable::row!["Issued at", iat]);
    }
    if let Some(nbf) = &decoded.not_before {
        table.add_row(prettytable::row!["Not before", nbf]);
    }
    if let Some(exp) = &decoded.expires_at {
        let status = if decoded.expired == Some(true) {
            "expired".red().to_string()
        } else {
            "valid".green().to_string()
        };
        table.add_row(prettytable::row!["Expires", f!("{exp} ({status})")]);
    }
    if !table.is_empty() {
        println!();
        table.printstd();
    }
    if decoded.signature.is_none() {
        println!("{}", "Unsigned token".yellow());
    }
    Ok(())
}
