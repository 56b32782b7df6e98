//! Named font colours.
//!
//! Run styles name their colour either by a well-known name (`"DarkRed"`,
//! `"dark red"`) or by an RGB literal (`"#8B0000"`, `"8b0000"`). The host
//! format wants six upper-case hex digits.

use crate::error::{DocfillError, DocfillResult};

/// Resolve a colour name or literal to an `RRGGBB` hex triplet.
pub fn resolve(name: &str) -> DocfillResult<String> {
    let trimmed = name.trim();
    let literal = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if literal.len() == 6 && literal.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(literal.to_ascii_uppercase());
    }

    let key: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect();
    named(&key)
        .map(str::to_string)
        .ok_or_else(|| DocfillError::UnknownColor(name.to_string()))
}

fn named(key: &str) -> Option<&'static str> {
    let hex = match key {
        "black" => "000000",
        "white" => "FFFFFF",
        "red" => "FF0000",
        "darkred" => "8B0000",
        "maroon" => "800000",
        "green" => "008000",
        "darkgreen" => "006400",
        "lime" => "00FF00",
        "olive" => "808000",
        "blue" => "0000FF",
        "darkblue" => "00008B",
        "navy" => "000080",
        "lightblue" => "ADD8E6",
        "skyblue" => "87CEEB",
        "steelblue" => "4682B4",
        "teal" => "008080",
        "cyan" | "aqua" => "00FFFF",
        "darkcyan" => "008B8B",
        "magenta" | "fuchsia" => "FF00FF",
        "darkmagenta" => "8B008B",
        "purple" => "800080",
        "violet" => "EE82EE",
        "yellow" => "FFFF00",
        "gold" => "FFD700",
        "orange" => "FFA500",
        "darkorange" => "FF8C00",
        "orangered" => "FF4500",
        "brown" => "A52A2A",
        "pink" => "FFC0CB",
        "gray" | "grey" => "808080",
        "darkgray" | "darkgrey" => "A9A9A9",
        "lightgray" | "lightgrey" => "D3D3D3",
        "dimgray" | "dimgrey" => "696969",
        "silver" => "C0C0C0",
        "crimson" => "DC143C",
        "firebrick" => "B22222",
        "indigo" => "4B0082",
        "turquoise" => "40E0D0",
        "salmon" => "FA8072",
        "tomato" => "FF6347",
        _ => return None,
    };
    Some(hex)
}
