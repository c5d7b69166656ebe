//! CSS-style color string helpers.
//!
//! Colors are configured as strings (`#rgb`, `#rrggbb`, `rgb(...)`, keywords and
//! so on). Nothing here fails: input that cannot be understood is passed through
//! or reported as `None` so painting never breaks on user-supplied colors.

use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[A-Fa-f0-9]{3}){1,2}$").expect("valid hex pattern"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid decimal pattern"));

/// Returns `color` as an `rgba(r,g,b,alpha)` string with the given alpha.
///
/// Accepts 3- or 6-digit hex and `rgb()`/`rgba()` notation. Any other input is
/// returned unchanged.
///
/// ```
/// use polygon_editor::adjust_alpha;
///
/// assert_eq!(adjust_alpha("#f00", 0.5), "rgba(255,0,0,0.5)");
/// assert_eq!(adjust_alpha("tomato", 0.5), "tomato");
/// ```
pub fn adjust_alpha(color: &str, alpha: f32) -> String {
    if HEX_COLOR.is_match(color) {
        let digits = &color[1..];
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_owned()
        };
        if let Ok(value) = u32::from_str_radix(&expanded, 16) {
            let (r, g, b) = ((value >> 16) & 0xff, (value >> 8) & 0xff, value & 0xff);
            return format!("rgba({r},{g},{b},{alpha})");
        }
    }
    if color.starts_with("rgb") {
        let numbers: Vec<&str> = DECIMAL.find_iter(color).map(|m| m.as_str()).collect();
        if let [r, g, b, ..] = numbers.as_slice() {
            return format!("rgba({r},{g},{b},{alpha})");
        }
    }
    color.to_owned()
}

/// Parses any CSS color string into unmultiplied `[r, g, b, a]` bytes.
///
/// Hex, functional notations (`rgb`, `hsl`, `hwb`, percentages included) and
/// the full keyword table are understood. Returns `None` for anything else.
pub fn parse_rgba(color: &str) -> Option<[u8; 4]> {
    csscolorparser::parse(color.trim())
        .ok()
        .map(|parsed| parsed.to_rgba8())
}
