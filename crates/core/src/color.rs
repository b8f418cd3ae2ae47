//! HEX / RGB / HSL colour conversion.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Unrecognised colour `{0}` (try #2563eb, rgb(37, 99, 235) or hsl(221, 83%, 53%))")]
    Invalid(String),

    #[error("{component} value {value} is out of range (0-{max})")]
    OutOfRange {
        component: &'static str,
        value: String,
        max: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Every representation at once, for CLI and MCP output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorOutput {
    pub hex: String,
    pub rgb: Color,
    pub hsl: Hsl,
    pub rgb_string: String,
    pub hsl_string: String,
}

impl Color {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl {
                h: 0,
                s: 0,
                l: (l * 100.0).round() as u8,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let h = sector / 6.0;

        Hsl {
            h: ((h * 360.0).round() as u16) % 360,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }

    pub fn hsl_string(&self) -> String {
        let Hsl { h, s, l } = self.hsl();
        format!("hsl({h}, {s}%, {l}%)")
    }

    /// Build from hue in degrees and saturation/lightness in percent.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s / 100.0;
        let l = l / 100.0;
        let h = h.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Self {
            r: channel(r1),
            g: channel(g1),
            b: channel(b1),
        }
    }

    pub fn output(&self) -> ColorOutput {
        ColorOutput {
            hex: self.hex(),
            rgb: *self,
            hsl: self.hsl(),
            rgb_string: self.rgb_string(),
            hsl_string: self.hsl_string(),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn component(text: &str, name: &'static str, max: u16) -> Result<f64, ColorError> {
    let out_of_range = || ColorError::OutOfRange {
        component: name,
        value: text.to_string(),
        max,
    };
    let value: f64 = text.parse().map_err(|_| out_of_range())?;
    if !(0.0..=f64::from(max)).contains(&value) {
        return Err(out_of_range());
    }
    Ok(value)
}

fn parse_hex(digits: &str) -> Option<Color> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Color {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn rgb_pattern() -> &'static Regex {
    static RE_RGB: OnceLock<Regex> = OnceLock::new();
    RE_RGB.get_or_init(|| {
        Regex::new(
            r"(?i)^rgba?\(\s*([\d.]+)\s*[,\s]\s*([\d.]+)\s*[,\s]\s*([\d.]+)\s*(?:[,/]\s*[\d.]+%?\s*)?\)$",
        )
        .expect("rgb() pattern compiles")
    })
}

fn hsl_pattern() -> &'static Regex {
    static RE_HSL: OnceLock<Regex> = OnceLock::new();
    RE_HSL.get_or_init(|| {
        Regex::new(
            r"(?i)^hsla?\(\s*([\d.]+)(?:deg)?\s*[,\s]\s*([\d.]+)%\s*[,\s]\s*([\d.]+)%\s*(?:[,/]\s*[\d.]+%?\s*)?\)$",
        )
        .expect("hsl() pattern compiles")
    })
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb`, `rgb(r, g, b)` or `hsl(h, s%, l%)`.
pub fn parse(input: &str) -> Result<Color, ColorError> {
    let text = input.trim();
    let invalid = || ColorError::Invalid(text.to_string());

    if let Some(caps) = rgb_pattern().captures(text) {
        let channel = |i: usize, name| {
            component(&caps[i], name, 255).map(|v| v.round() as u8)
        };
        return Ok(Color {
            r: channel(1, "red")?,
            g: channel(2, "green")?,
            b: channel(3, "blue")?,
        });
    }

    if let Some(caps) = hsl_pattern().captures(text) {
        let h = component(&caps[1], "hue", 360)?;
        let s = component(&caps[2], "saturation", 100)?;
        let l = component(&caps[3], "lightness", 100)?;
        return Ok(Color::from_hsl(h, s, l));
    }

    parse_hex(text.strip_prefix('#').unwrap_or(text)).ok_or_else(invalid)
}
