//! Family-name normalization
//!
//! Every platform reports font names differently. Windows embeds style words in
//! the registry value name ("Arial Bold Italic (TrueType)"), macOS only gives us
//! a file stem ("ArialBoldItalic"), and fontconfig hands the style over as a
//! separate field. All three collapse into the same lowercase alphanumeric
//! family key plus a pair of style flags.

use serde::{Deserialize, Serialize};

/// Which naming dialect a raw entry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "style", rename_all = "snake_case")]
pub enum StyleHint {
    /// Style words are whitespace-separated tokens inside the display name.
    Embedded,
    /// The name is a file stem without token boundaries.
    FileStem,
    /// Style arrives as a free-text field, as printed by `fc-list`.
    Fontconfig(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub family_key: String,
    pub bold: bool,
    pub italic: bool,
}

const TYPE_SUFFIXES: [&str; 2] = ["(TrueType)", "(OpenType)"];

/// Decorative words dropped from embedded display names.
pub const MODIFIER_WORDS: [&str; 6] = ["demibold", "narrow", "light", "unicode", "bt", "mt"];

const STEM_MODIFIERS: [&str; 1] = ["regular"];

/// Lowercase and keep alphanumeric characters only.
pub fn simple_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Turn a raw display name or file stem into a family key and style flags.
pub fn normalize(name: &str, hint: &StyleHint) -> NormalizedName {
    match hint {
        StyleHint::Embedded => normalize_embedded(name),
        StyleHint::FileStem => normalize_file_stem(name),
        StyleHint::Fontconfig(style) => NormalizedName {
            family_key: simple_name(name),
            bold: style.contains("Bold"),
            italic: style.contains("Italic") || style.contains("Oblique"),
        },
    }
}

fn strip_type_suffix(name: &str) -> &str {
    for suffix in TYPE_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped.trim_end();
        }
    }
    name
}

fn normalize_embedded(name: &str) -> NormalizedName {
    let mut bold = false;
    let mut italic = false;
    let mut kept = String::new();

    for token in strip_type_suffix(name.trim()).split_whitespace() {
        let token = token.to_lowercase();
        match token.as_str() {
            "bold" => bold = true,
            "italic" => italic = true,
            t if MODIFIER_WORDS.contains(&t) => {}
            _ => kept.push_str(&token),
        }
    }

    let mut family_key = simple_name(&kept);

    // Joined fragments can spell a stop word ("Li ght"); strip it so a second
    // pass has nothing left to remove.
    match family_key.as_str() {
        "bold" => {
            bold = true;
            family_key.clear();
        }
        "italic" => {
            italic = true;
            family_key.clear();
        }
        k if MODIFIER_WORDS.contains(&k) => family_key.clear(),
        _ => {}
    }

    NormalizedName {
        family_key,
        bold,
        italic,
    }
}

fn normalize_file_stem(name: &str) -> NormalizedName {
    let mut family_key = simple_name(name);
    let mut bold = false;
    let mut italic = false;

    // Removing one word can splice another together ("bolitalicd"), so loop
    // until nothing changes.
    loop {
        let before = family_key.len();
        for modifier in STEM_MODIFIERS {
            family_key = family_key.replace(modifier, "");
        }
        if family_key.contains("bold") {
            family_key = family_key.replace("bold", "");
            bold = true;
        }
        if family_key.contains("italic") {
            family_key = family_key.replace("italic", "");
            italic = true;
        }
        if family_key.len() == before {
            break;
        }
    }

    NormalizedName {
        family_key,
        bold,
        italic,
    }
}
