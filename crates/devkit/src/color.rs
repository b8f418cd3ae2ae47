use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::color::{self, ColorOutput};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ColorOptions {
    /// Colour as #rrggbb, #rgb, rgb(r, g, b) or hsl(h, s%, l%) (read from stdin when omitted or `-`)
    color: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn color_data(input: &str) -> Result<ColorOutput> {
    Ok(color::parse(input)?.output())
}

pub fn run(options: ColorOptions, _global: crate::Global) -> Result<()> {
    let input = read_input(options.color.clone())?;
    let output = color_data(&input)?;

    if options.json {
        return print_json(&output);
    }

    if !is_tty() {
        println!("{}", output.hex);
        println!("{}", output.rgb_string);
        println!("{}", output.hsl_string);
        return Ok(());
    }

    let swatch = "      ".on_truecolor(output.rgb.r, output.rgb.g, output.rgb.b);
    println!("{swatch}  {}", output.hex.bold());
    println!("{swatch}  {}", output.rgb_string);
    println!("{swatch}  {}", output.hsl_string);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_data() {
        let output = color_data("rgb(255, 128, 0)").unwrap();
        assert_eq!(output.hex, "#ff8000");
        assert_eq!(output.hsl_string, "hsl(30, 100%, 50%)");
    }

    #[test]
    fn test_color_data_invalid() {
        assert!(color_data("not-a-colour").is_err());
    }
}
