use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::digest::{self, Encoding, HmacAlgorithm};
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(name = "hmac")]
#[command(about = "HMAC signatures")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Sign a message
    #[clap(name = "sign")]
    Sign(SignOptions),

    /// Check a signature against a message
    #[clap(name = "verify")]
    Verify(VerifyOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SignOptions {
    /// Message to sign (read from stdin when omitted or `-`)
    message: Option<String>,

    /// Secret key
    #[arg(short, long, env = "DEVKIT_HMAC_SECRET", hide_env_values = true)]
    secret: String,

    /// Hash function
    #[arg(short, long, default_value = "sha256")]
    algorithm: AlgorithmArg,

    /// Signature encoding
    #[arg(short, long, default_value = "hex")]
    encoding: EncodingArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct VerifyOptions {
    /// Signed message (read from stdin when omitted or `-`)
    message: Option<String>,

    /// Expected signature
    #[arg(long)]
    signature: String,

    /// Secret key
    #[arg(short, long, env = "DEVKIT_HMAC_SECRET", hide_env_values = true)]
    secret: String,

    /// Hash function
    #[arg(short, long, default_value = "sha256")]
    algorithm: AlgorithmArg,

    /// Signature encoding
    #[arg(short, long, default_value = "hex")]
    encoding: EncodingArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmArg {
    Sha256,
    Sha384,
    Sha512,
}

impl From<AlgorithmArg> for HmacAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sha256 => HmacAlgorithm::Sha256,
            AlgorithmArg::Sha384 => HmacAlgorithm::Sha384,
            AlgorithmArg::Sha512 => HmacAlgorithm::Sha512,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingArg {
    Hex,
    Base64,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Hex => Encoding::Hex,
            EncodingArg::Base64 => Encoding::Base64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignOutput {
    pub algorithm: String,
    pub encoding: Encoding,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub algorithm: String,
    pub valid: bool,
}

pub fn sign_data(
    message: &str,
    secret: &str,
    algorithm: HmacAlgorithm,
    encoding: Encoding,
) -> Result<SignOutput> {
    let signature = digest::hmac(algorithm, message.as_bytes(), secret.as_bytes(), encoding)?;
    Ok(SignOutput {
        algorithm: algorithm.to_string(),
        encoding,
        signature,
    })
}

pub fn verify_data(
    message: &str,
    secret: &str,
    signature: &str,
    algorithm: HmacAlgorithm,
    encoding: Encoding,
) -> Result<VerifyOutput> {
    let valid = digest::verify_signature(
        algorithm,
        message.as_bytes(),
        secret.as_bytes(),
        signature,
        encoding,
    )?;
    Ok(VerifyOutput {
        algorithm: algorithm.to_string(),
        valid,
    })
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Sign(options) => sign(options),
        Commands::Verify(options) => verify(options),
    }
}

fn sign(options: SignOptions) -> Result<()> {
    let message = read_input(options.message.clone())?;
    let output = sign_data(
        &message,
        &options.secret,
        options.algorithm.into(),
        options.encoding.into(),
    )?;

    if options.json {
        return print_json(&output);
    }

    println!("{}", output.signature);
    Ok(())
}

fn verify(options: VerifyOptions) -> Result<()> {
    let message = read_input(options.message.clone())?;
    let output = verify_data(
        &message,
        &options.secret,
        &options.signature,
        options.algorithm.into(),
        options.encoding.into(),
    )?;

    if options.json {
        return print_json(&output);
    }

    match (output.valid, is_tty()) {
        (true, true) => println!("{}", "Signature is valid".green()),
        (false, true) => println!("{}", "Signature does NOT match".red()),
        (true, false) => println!("valid"),
        (false, false) => println!("invalid"),
    }

    if output.valid {
        Ok(())
    } else {
        Err(eyre!("{} signature mismatch", output.algorithm))
    }
}
