use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS-style string so chart configs can carry values such as
/// `"green"`, `"#0a0"` or `"rgba(0, 0, 255, 0.5)"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::from_rgb8(0, 0, 0),
            "white" => Self::from_rgb8(255, 255, 255),
            "red" => Self::from_rgb8(255, 0, 0),
            "green" => Self::from_rgb8(0, 128, 0),
            "lime" => Self::from_rgb8(0, 255, 0),
            "blue" => Self::from_rgb8(0, 0, 255),
            "yellow" => Self::from_rgb8(255, 255, 0),
            "orange" => Self::from_rgb8(255, 165, 0),
            "purple" => Self::from_rgb8(128, 0, 128),
            "gray" | "grey" => Self::from_rgb8(128, 128, 128),
            "silver" => Self::from_rgb8(192, 192, 192),
            "navy" => Self::from_rgb8(0, 0, 128),
            "teal" => Self::from_rgb8(0, 128, 128),
            "transparent" => Self::rgba(0.0, 0.0, 0.0, 0.0),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        let value = raw.trim().to_ascii_lowercase();
        let invalid = || ChartError::InvalidData(format!("unrecognized color `{raw}`"));

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }
        if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let color = parse_functional(args).ok_or_else(invalid)?;
            color.validate()?;
            return Ok(color);
        }
        Self::named(&value).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Writes `#rrggbb[aa]` when every channel is an exact 8-bit value, otherwise
/// `rgba(r, g, b, a)` with full precision so parsing the output restores the
/// same color.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if let [Some(red), Some(green), Some(blue), Some(alpha)] = channels.map(exact_byte) {
            write!(f, "#{red:02x}{green:02x}{blue:02x}")?;
            if alpha < u8::MAX {
                write!(f, "{alpha:02x}")?;
            }
            return Ok(());
        }
        write!(
            f,
            "rgba({}, {}, {}, {})",
            byte_scale(self.red),
            byte_scale(self.green),
            byte_scale(self.blue),
            self.alpha
        )
    }
}

fn exact_byte(value: f64) -> Option<u8> {
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    let byte = (value * 255.0).round() as u8;
    (f64::from(byte) / 255.0 == value).then_some(byte)
}

/// `value * 255`, nudged by a few ulps when needed so that dividing the
/// printed number by 255 yields `value` again.
fn byte_scale(value: f64) -> f64 {
    let scaled = value * 255.0;
    if !scaled.is_finite() || scaled / 255.0 == value {
        return scaled;
    }
    let bits = scaled.to_bits();
    (1..=4_u64)
        .flat_map(|offset| [bits.wrapping_add(offset), bits.wrapping_sub(offset)])
        .map(f64::from_bits)
        .find(|candidate| candidate / 255.0 == value)
        .unwrap_or(scaled)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |index: usize| u8::from_str_radix(&hex[index..=index], 16).ok();
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    let unit = |value: u8| f64::from(value) / 255.0;

    match hex.len() {
        3 | 4 => {
            let mut channels = [255u8; 4];
            for (index, slot) in channels.iter_mut().take(hex.len()).enumerate() {
                *slot = nibble(index)? * 17;
            }
            Some(Color::rgba(
                unit(channels[0]),
                unit(channels[1]),
                unit(channels[2]),
                unit(channels[3]),
            ))
        }
        6 | 8 => {
            let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
            Some(Color::rgba(
                unit(byte(0)?),
                unit(byte(2)?),
                unit(byte(4)?),
                unit(alpha),
            ))
        }
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Color> {
    let parts: Vec<f64> = args
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    let (red, green, blue, alpha) = match parts.as_slice() {
        [r, g, b] => (*r, *g, *b, 1.0),
        [r, g, b, a] => (*r, *g, *b, *a),
        _ => return None,
    };
    Some(Color::rgba(red / 255.0, green / 255.0, blue / 255.0, alpha))
}

/// Pixel-space coordinate on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use approx::assert_relative_eq;

    #[test]
    fn parses_named_hex_and_functional_colors() {
        let green: Color = "green".parse().expect("named");
        assert_relative_eq!(green.green, 128.0 / 255.0);
        assert_relative_eq!(green.alpha, 1.0);

        let short: Color = "#f00".parse().expect("short hex");
        assert_eq!(short, Color::rgb(1.0, 0.0, 0.0));

        let long: Color = "#0000ff80".parse().expect("long hex");
        assert_relative_eq!(long.blue, 1.0);
        assert_relative_eq!(long.alpha, 128.0 / 255.0);

        let functional: Color = "rgba(255, 0, 0, 0.25)".parse().expect("rgba");
        assert_relative_eq!(functional.red, 1.0);
        assert_relative_eq!(functional.alpha, 0.25);
    }

    #[test]
    fn rejects_unknown_and_out_of_range_colors() {
        assert!("chartreuse-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("rgb(300, 0, 0)".parse::<Color>().is_err());
        assert!("#+f+f+f".parse::<Color>().is_err());
        assert!("#+ff".parse::<Color>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let color = Color::from_rgb8(12, 34, 56);
        let parsed: Color = color.to_string().parse().expect("display output parses");
        assert_eq!(parsed, color);
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_string(), "#ff0000");
    }

    #[test]
    fn fractional_channels_keep_full_precision() {
        let half_red = Color::rgba(1.0, 0.0, 0.0, 0.5);
        assert_eq!(half_red.to_string(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(half_red.to_string().parse::<Color>().expect("rgba"), half_red);

        let quarter = Color::rgba(0.25, 0.5, 0.75, 0.3);
        let parsed: Color = quarter.to_string().parse().expect("rgba output parses");
        assert_eq!(parsed, quarter);
    }
}
