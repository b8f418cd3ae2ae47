use crate::prelude::{println, *};
use devkit_core::codec::{self, UrlMode};
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(name = "url")]
#[command(about = "URL percent-encoding")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Percent-encode text
    #[clap(name = "encode")]
    Encode(UrlOptions),

    /// Decode percent-escapes
    #[clap(name = "decode")]
    Decode(UrlOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct UrlOptions {
    /// Text to process (read from stdin when omitted or `-`)
    text: Option<String>,

    /// `component` escapes every reserved character, `uri` keeps `;,/?:@&=+$#`
    #[arg(short, long, env = "DEVKIT_URL_MODE", default_value = "component")]
    mode: ModeArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    Component,
    Uri,
}

impl From<ModeArg> for UrlMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Component => UrlMode::Component,
            ModeArg::Uri => UrlMode::Uri,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UrlOutput {
    pub mode: UrlMode,
    pub input: String,
    pub output: String,
}

pub fn url_data(text: &str, mode: UrlMode, decode: bool) -> Result<UrlOutput> {
    let output = if decode {
        codec::url_decode(text, mode)?
    } else {
        codec::url_encode(text, mode)
    };
    Ok(UrlOutput {
        mode,
        input: text.to_string(),
        output,
    })
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let (options, decode) = match app.command {
        Commands::Encode(options) => (options, false),
        Commands::Decode(options) => (options, true),
    };

    let text = read_input(options.text.clone())?;
    let output = url_data(&text, options.mode.into(), decode)?;

    if options.json {
        return print_json(&output);
    }

    println!("{}", output.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_data_encode_modes() {
        let text = "https://x.dev/a b?q=1&r=ü";
        assert_eq!(
            url_data(text, UrlMode::Component, false).unwrap().output,
            "https%3A%2F%2Fx.dev%2Fa%20b%3Fq%3D1%26r%3D%C3%BC"
        );
        assert_eq!(
            url_data(text, UrlMode::Uri, false).unwrap().output,
            "https://x.dev/a%20b?q=1&r=%C3%BC"
        );
    }

    #[test]
    fn test_url_data_decode() {
        let output = url_data("a%20b%2Fc", UrlMode::Component, true).unwrap();
        assert_eq!(output.output, "a b/c");
        assert!(url_data("%zz", UrlMode::Component, true).is_err());
    }
}
