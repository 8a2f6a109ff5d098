//! Character records and placeholder synthesis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub color: String,
    pub outfits: Vec<Outfit>,
    pub tags: Vec<String>,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub name: String,
    /// Pose label → image reference (a URL or `data:` URI).
    pub poses: BTreeMap<String, String>,
}

pub const PLACEHOLDER_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

pub const PLACEHOLDER_POSES: [&str; 3] = ["neutral", "happy", "sad"];

const POSE_WIDTH: u32 = 200;
const POSE_HEIGHT: u32 = 300;

/// Palette colour for `name`: sum of its UTF-16 code units modulo the palette size.
pub fn placeholder_color(name: &str) -> &'static str {
    let sum: u64 = name.encode_utf16().map(u64::from).sum();
    PLACEHOLDER_PALETTE[(sum % PLACEHOLDER_PALETTE.len() as u64) as usize]
}

/// Lowercase `name` and collapse everything that is not alphanumeric to `_`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode everything but unreserved characters and the few SVG
/// delimiters that are safe inside a `data:` URI.
fn encode_uri_component(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(b as char),
            b'-' | b'_' | b'.' | b'~' | b'\'' | b'=' | b'/' | b':' | b';' | b',' | b'(' | b')' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

/// A solid card with the character's name and the pose label, as an SVG data URI.
fn pose_image(name: &str, color: &str, label: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}'>\
         <rect width='{w}' height='{h}' fill='{color}'/>\
         <text x='{cx}' y='150' fill='white' font-family='Arial' font-weight='bold' font-size='16' text-anchor='middle'>{name}</text>\
         <text x='{cx}' y='170' fill='white' font-family='Arial' font-size='12' text-anchor='middle'>{label}</text>\
         </svg>",
        w = POSE_WIDTH,
        h = POSE_HEIGHT,
        cx = POSE_WIDTH / 2,
        color = color,
        name = escape_xml(name),
        label = escape_xml(label),
    );
    format!("data:image/svg+xml;utf8,{}", encode_uri_component(&svg))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the minimal record used for a character a script mentions but the
/// registry does not know. The result depends only on `name`.
pub fn synthesize_placeholder(name: &str) -> Character {
    let color = placeholder_color(name);
    let slug = slug(name);
    let poses = PLACEHOLDER_POSES
        .iter()
        .map(|pose| (pose.to_string(), pose_image(name, color, &capitalize(pose))))
        .collect();

    Character {
        id: format!("placeholder_{}", slug),
        name: name.to_string(),
        description: format!("Auto-generated character placeholder for {}", name),
        category: "protagonist".to_string(),
        color: color.to_string(),
        outfits: vec![Outfit {
            id: format!("placeholder_{}@outfit_0", slug),
            name: "Default".to_string(),
            poses,
        }],
        tags: vec!["auto-generated".to_string(), "placeholder".to_string()],
        is_placeholder: true,
    }
}
