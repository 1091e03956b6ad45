//! Family registry: family key → style variant → file path

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::discovery::RawFontEntry;
use crate::normalize::normalize;

/// One of the four (bold, italic) combinations a family can provide.
///
/// Ordering is regular, italic, bold, bold-italic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    pub bold: bool,
    pub italic: bool,
}

impl VariantKey {
    pub const REGULAR: VariantKey = VariantKey::new(false, false);
    pub const ITALIC: VariantKey = VariantKey::new(false, true);
    pub const BOLD: VariantKey = VariantKey::new(true, false);
    pub const BOLD_ITALIC: VariantKey = VariantKey::new(true, true);

    pub const ALL: [VariantKey; 4] = [
        VariantKey::REGULAR,
        VariantKey::ITALIC,
        VariantKey::BOLD,
        VariantKey::BOLD_ITALIC,
    ];

    pub const fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    pub fn label(self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "regular",
            (false, true) => "italic",
            (true, false) => "bold",
            (true, true) => "bold-italic",
        }
    }
}

/// A normalized font file ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub family_key: String,
    pub bold: bool,
    pub italic: bool,
    pub path: PathBuf,
}

impl FontEntry {
    /// Normalize a raw entry; `None` when nothing is left of the family name.
    pub fn from_raw(raw: &RawFontEntry) -> Option<Self> {
        let name = normalize(&raw.name, &raw.hint);
        if name.family_key.is_empty() {
            return None;
        }
        Some(Self {
            family_key: name.family_key,
            bold: name.bold,
            italic: name.italic,
            path: raw.path.clone(),
        })
    }

    pub fn variant(&self) -> VariantKey {
        VariantKey::new(self.bold, self.italic)
    }
}

pub type FamilyStyles = BTreeMap<VariantKey, PathBuf>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRegistry {
    families: BTreeMap<String, FamilyStyles>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert every entry in enumeration order.
    pub fn build(entries: &[RawFontEntry]) -> Self {
        let normalized: Vec<Option<FontEntry>> = entries.par_iter().map(FontEntry::from_raw).collect();

        let mut registry = Self::new();
        for (raw, entry) in entries.iter().zip(normalized) {
            match entry {
                Some(entry) => {
                    registry.insert(entry);
                }
                None => log::debug!("no family name left in {:?}", raw.name),
            }
        }
        registry
    }

    /// Insert one entry. A later entry for the same family and variant replaces
    /// the earlier one; the replaced path is returned.
    pub fn insert(&mut self, entry: FontEntry) -> Option<PathBuf> {
        let variant = entry.variant();
        let previous = self
            .families
            .entry(entry.family_key)
            .or_default()
            .insert(variant, entry.path);
        if let Some(old) = &previous {
            log::trace!("replaced {} ({})", old.display(), variant.label());
        }
        previous
    }

    pub fn styles(&self, family_key: &str) -> Option<&FamilyStyles> {
        self.families.get(family_key)
    }

    /// The stored key together with its styles.
    pub fn family(&self, family_key: &str) -> Option<(&str, &FamilyStyles)> {
        self.families
            .get_key_value(family_key)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn path(&self, family_key: &str, variant: VariantKey) -> Option<&Path> {
        self.styles(family_key)
            .and_then(|styles| styles.get(&variant))
            .map(PathBuf::as_path)
    }

    pub fn contains(&self, family_key: &str) -> bool {
        self.families.contains_key(family_key)
    }

    /// Family keys in sorted order.
    pub fn families(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FamilyStyles)> + '_ {
        self.families.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::StyleHint;

    fn entry(key: &str, bold: bool, italic: bool, path: &str) -> FontEntry {
        FontEntry {
            family_key: key.to_string(),
            bold,
            italic,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn later_insert_wins() {
        let mut registry = FontRegistry::new();
        assert!(registry.insert(entry("a", false, false, "/p1.ttf")).is_none());
        let replaced = registry.insert(entry("a", false, false, "/p2.ttf"));

        assert_eq!(replaced, Some(PathBuf::from("/p1.ttf")));
        assert_eq!(
            registry.path("a", VariantKey::REGULAR),
            Some(Path::new("/p2.ttf"))
        );
    }

    #[test]
    fn variants_accumulate_under_one_family() {
        let mut registry = FontRegistry::new();
        registry.insert(entry("arial", false, false, "/arial.ttf"));
        registry.insert(entry("arial", true, true, "/arialbi.ttf"));

        let styles = registry.styles("arial").expect("family");
        assert_eq!(styles.len(), 2);
        assert_eq!(registry.path("arial", VariantKey::BOLD), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn build_skips_names_that_normalize_to_nothing() {
        let raw = vec![
            RawFontEntry::new("Bold", "/b.ttf", StyleHint::Embedded),
            RawFontEntry::new("Tahoma", "/tahoma.ttf", StyleHint::Embedded),
        ];
        let registry = FontRegistry::build(&raw);

        assert_eq!(registry.families().collect::<Vec<_>>(), vec!["tahoma"]);
    }

    #[test]
    fn variant_order_starts_with_regular() {
        let mut sorted = VariantKey::ALL;
        sorted.sort();
        assert_eq!(sorted, VariantKey::ALL);
        assert_eq!(VariantKey::BOLD_ITALIC.label(), "bold-italic");
    }
}
