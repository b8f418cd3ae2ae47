use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::codec::{self, Base64Variant};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, clap::Parser)]
#[command(name = "base64")]
#[command(about = "Base64 encode and decode")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Encode text or a file
    #[clap(name = "encode")]
    Encode(EncodeOptions),

    /// Decode Base64 text or a data URL
    #[clap(name = "decode")]
    Decode(DecodeOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct EncodeOptions {
    /// Text to encode (read from stdin when omitted or `-`)
    text: Option<String>,

    /// Encode the bytes of this file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<String>,

    /// Emit a `data:` URL, with the MIME type guessed from the file extension
    #[arg(long)]
    data_url: bool,

    /// URL-safe alphabet without padding
    #[arg(short, long)]
    url_safe: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DecodeOptions {
    /// Base64 text or data URL (read from stdin when omitted or `-`)
    text: Option<String>,

    /// URL-safe alphabet
    #[arg(short, long)]
    url_safe: bool,

    /// Write the decoded bytes to this file instead of printing them
    #[arg(short, long)]
    output: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn variant(url_safe: bool) -> Base64Variant {
    if url_safe {
        Base64Variant::UrlSafe
    } else {
        Base64Variant::Standard
    }
}

#[derive(Debug, Serialize)]
pub struct EncodeOutput {
    pub variant: Base64Variant,
    pub input_bytes: usize,
    pub encoded: String,
}

#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub variant: Base64Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    pub size: usize,
    /// `None` when the bytes are not UTF-8.
    pub text: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

pub fn encode_data(bytes: &[u8], variant: Base64Variant) -> EncodeOutput {
    EncodeOutput {
        variant,
        input_bytes: bytes.len(),
        encoded: codec::base64_encode(bytes, variant),
    }
}

/// Decode plain Base64 or a `data:` URL.
pub fn decode_data(text: &str, variant: Base64Variant) -> Result<DecodeOutput> {
    let (mime, bytes) = if text.trim_start().starts_with("data:") {
        let data_url = codec::parse_data_url(text)?;
        (Some(data_url.mime), data_url.bytes)
    } else {
        (None, codec::base64_decode(text, variant)?)
    };

    Ok(DecodeOutput {
        variant,
        mime,
        size: bytes.len(),
        text: String::from_utf8(bytes.clone()).ok(),
        bytes,
    })
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Encode(options) => encode(options, global),
        Commands::Decode(options) => decode(options, global),
    }
}

fn encode(options: EncodeOptions, global: crate::Global) -> Result<()> {
    let bytes = match &options.file {
        Some(path) => read_bytes(path)?,
        None => read_input(options.text.clone())?.into_bytes(),
    };
    let variant = variant(options.url_safe);

    if options.data_url {
        let mime = options
            .file
            .as_deref()
            .and_then(|path| Path::new(path).extension())
            .and_then(|ext| ext.to_str())
            .map(codec::mime_for_extension)
            .unwrap_or("text/plain");
        let url = codec::to_data_url(&bytes, mime);
        if options.json {
            return print_json(&serde_json::json!({ "mime": mime, "data_url": url }));
        }
        println!("{url}");
        return Ok(());
    }

    let output = encode_data(&bytes, variant);
    if options.json {
        return print_json(&output);
    }

    if global.verbose {
        eprintln!(
            "{} bytes -> {} characters",
            output.input_bytes,
            output.encoded.len()
        );
    }
    println!("{}", output.encoded);
    Ok(())
}

fn decode(options: DecodeOptions, global: crate::Global) -> Result<()> {
    let text = read_input(options.text.clone())?;
    let output = decode_data(&text, variant(options.url_safe))?;

    if let Some(path) = &options.output {
        std::fs::write(path, &output.bytes).wrap_err_with(|| f!("Failed to write {path}"))?;
        if global.verbose {
            eprintln!("Wrote {} bytes to {path}", output.size);
        }
        return Ok(());
    }

    if options.json {
        return print_json(&output);
    }

    if let Some(mime) = &output.mime {
        if is_tty() {
            eprintln!("{} {} ({} bytes)", "MIME".cyan(), mime, output.size);
        }
    }

    match &output.text {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => Err(eyre!(
            "Decoded {} bytes of binary data; use --output to write them to a file",
            output.size
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_data() {
        let output = encode_data(b"hello?", Base64Variant::Standard);
        assert_eq!(output.encoded, "aGVsbG8/");
        assert_eq!(output.input_bytes, 6);

        let url_safe = encode_data(b"hello?", Base64Variant::UrlSafe);
        assert_eq!(url_safe.encoded, "aGVsbG8_");
    }

    #[test]
    fn test_decode_data_plain_and_binary() {
        let output = decode_data("aGVsbG8=", Base64Variant::Standard).unwrap();
        assert_eq!(output.text.as_deref(), Some("hello"));
        assert_eq!(output.mime, None);

        let binary = decode_data("/w==", Base64Variant::Standard).unwrap();
        assert_eq!(binary.bytes, vec![0xff]);
        assert_eq!(binary.text, None);
    }

    #[test]
    fn test_decode_data_url() {
        let output = decode_data("data:text/plain;base64,aGk=", Base64Variant::Standard).unwrap();
        assert_eq!(output.mime.as_deref(), Some("text/plain"));
        assert_eq!(output.text.as_deref(), Some("hi"));
    }
}
