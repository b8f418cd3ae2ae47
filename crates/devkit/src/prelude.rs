pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
pub use std::format as f;

use std::io::{IsTerminal, Read};

pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .padding(1, 1)
        .build();

    table.set_format(format);

    table
}

/// Whether stdout is attached to a terminal (coloured output) or piped.
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Return `input`, or read stdin when it is missing or `-`.
///
/// A single trailing newline from stdin is dropped so `echo foo | devkit ...`
/// behaves like `devkit ... foo`.
pub fn read_input(input: Option<String>) -> Result<String> {
    match input {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read from stdin")?;
            if buffer.is_empty() {
                return Err(Error::EmptyInput.into());
            }
            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Ok(buffer)
        }
    }
}

/// Raw bytes of `path`, or of stdin when `path` is `-`.
pub fn read_bytes(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .wrap_err("Failed to read from stdin")?;
        return Ok(buffer);
    }
    std::fs::read(path).wrap_err_with(|| f!("Failed to read {path}"))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
