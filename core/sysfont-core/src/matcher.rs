//! Font request resolution
//!
//! A request is a list of candidate family names plus the wanted style. Each
//! candidate walks the same small state machine:
//!
//! ```text
//! candidate ──► family (registry, else alias table)
//!                 ├─► ExactStyle    requested (bold, italic) file
//!                 ├─► RegularStyle  regular file, style synthesized
//!                 └─► AnyStyle      whatever the family has
//! no candidate ──► Default          built-in font, style synthesized
//! ```
//!
//! Resolution never fails: the worst case is the default font.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::config::DEFAULT_FONT;
use crate::construct::{FontConstructor, FontRequest, FontSource};
use crate::normalize::simple_name;
use crate::registry::{FamilyStyles, FontRegistry, VariantKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStep {
    ExactStyle,
    RegularStyle,
    AnyStyle,
    Default,
}

impl ResolveStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolveStep::ExactStyle => "exact_style",
            ResolveStep::RegularStyle => "regular_style",
            ResolveStep::AnyStyle => "any_style",
            ResolveStep::Default => "default",
        }
    }
}

/// A family found for a candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyHit<'a> {
    pub family: &'a str,
    /// Set when the candidate reached the family through the alias table.
    pub alias: Option<&'a str>,
    pub styles: &'a FamilyStyles,
}

/// The file picked inside a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleHit<'a> {
    pub step: ResolveStep,
    pub variant: VariantKey,
    pub path: &'a Path,
}

/// Full account of how a request was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub step: ResolveStep,
    pub family: Option<String>,
    pub alias: Option<String>,
    pub variant: Option<VariantKey>,
    pub request: FontRequest,
}

/// Split raw names on commas and normalize them, dropping blanks.
pub fn split_candidates<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .flat_map(|name| name.as_ref().split(','))
        .map(simple_name)
        .filter(|key| !key.is_empty())
        .collect()
}

/// Pick a variant: the requested one, else regular, else the first available.
pub fn pick_style(styles: &FamilyStyles, wanted: VariantKey) -> Option<StyleHit<'_>> {
    if let Some(path) = styles.get(&wanted) {
        return Some(StyleHit {
            step: ResolveStep::ExactStyle,
            variant: wanted,
            path,
        });
    }
    if let Some(path) = styles.get(&VariantKey::REGULAR) {
        return Some(StyleHit {
            step: ResolveStep::RegularStyle,
            variant: VariantKey::REGULAR,
            path,
        });
    }
    styles.iter().next().map(|(variant, path)| StyleHit {
        step: ResolveStep::AnyStyle,
        variant: *variant,
        path,
    })
}

/// Read-only query surface over one registry and alias table.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    registry: &'a FontRegistry,
    aliases: &'a AliasTable,
    default_font: &'a str,
}

impl<'a> Matcher<'a> {
    pub fn new(registry: &'a FontRegistry, aliases: &'a AliasTable) -> Self {
        Self {
            registry,
            aliases,
            default_font: DEFAULT_FONT,
        }
    }

    pub fn with_default_font(mut self, name: &'a str) -> Self {
        self.default_font = name;
        self
    }

    /// Registry first; the alias table only covers families that are absent.
    pub fn lookup_family(&self, key: &str) -> Option<FamilyHit<'a>> {
        if let Some((family, styles)) = self.registry.family(key) {
            return Some(FamilyHit {
                family,
                alias: None,
                styles,
            });
        }

        let (alias, canonical) = self.aliases.lookup(key)?;
        let (family, styles) = self.registry.family(canonical)?;
        Some(FamilyHit {
            family,
            alias: Some(alias),
            styles,
        })
    }

    /// Work out which file to load and what to synthesize, without loading it.
    pub fn resolution<S: AsRef<str>>(
        &self,
        names: &[S],
        size: f32,
        bold: bool,
        italic: bool,
    ) -> Resolution {
        let wanted = VariantKey::new(bold, italic);

        for candidate in split_candidates(names) {
            let Some(family) = self.lookup_family(&candidate) else {
                continue;
            };
            let Some(hit) = pick_style(family.styles, wanted) else {
                continue;
            };

            log::debug!(
                "{candidate} -> {} {} ({:?})",
                family.family,
                hit.variant.label(),
                hit.step
            );
            return Resolution {
                step: hit.step,
                family: Some(family.family.to_string()),
                alias: family.alias.map(str::to_string),
                variant: Some(hit.variant),
                request: FontRequest {
                    source: FontSource::File(hit.path.to_path_buf()),
                    size,
                    bold: bold && !hit.variant.bold,
                    italic: italic && !hit.variant.italic,
                },
            };
        }

        log::debug!("no installed font for {} names, using default", names.len());
        Resolution {
            step: ResolveStep::Default,
            family: None,
            alias: None,
            variant: None,
            request: FontRequest {
                source: FontSource::Default(self.default_font.to_string()),
                size,
                bold,
                italic,
            },
        }
    }

    /// Resolve and hand the result to the font engine.
    pub fn resolve<C, S>(
        &self,
        constructor: &C,
        names: &[S],
        size: f32,
        bold: bool,
        italic: bool,
    ) -> C::Handle
    where
        C: FontConstructor,
        S: AsRef<str>,
    {
        let resolution = self.resolution(names, size, bold, italic);
        constructor.construct(&resolution.request)
    }

    /// Path of the closest installed file, or `None` when no candidate exists.
    ///
    /// Styles are relaxed italic first, then bold, then any variant.
    pub fn find_path<S: AsRef<str>>(&self, names: &[S], bold: bool, italic: bool) -> Option<PathBuf> {
        split_candidates(names).iter().find_map(|candidate| {
            let family = self.lookup_family(candidate)?;
            relaxed_path(family.styles, VariantKey::new(bold, italic)).map(Path::to_path_buf)
        })
    }

    /// Every key a request can name: installed families and aliases, sorted.
    pub fn list_families(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .registry
            .families()
            .chain(self.aliases.keys())
            .map(str::to_string)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

fn relaxed_path(styles: &FamilyStyles, mut wanted: VariantKey) -> Option<&Path> {
    loop {
        if let Some(path) = styles.get(&wanted) {
            return Some(path.as_path());
        }
        if wanted.italic {
            wanted.italic = false;
        } else if wanted.bold {
            wanted.bold = false;
        } else {
            return styles.values().next().map(PathBuf::as_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(variants: &[(VariantKey, &str)]) -> FamilyStyles {
        variants
            .iter()
            .map(|(v, p)| (*v, PathBuf::from(p)))
            .collect()
    }

    #[test]
    fn split_candidates_accepts_lists_and_commas() {
        assert_eq!(
            split_candidates(&["Courier New, monospace", "", " ,Arial"]),
            vec!["couriernew", "monospace", "arial"]
        );
    }

    #[test]
    fn pick_style_prefers_exact_then_regular_then_any() {
        let full = styles(&[
            (VariantKey::REGULAR, "/r.ttf"),
            (VariantKey::BOLD, "/b.ttf"),
        ]);
        let hit = pick_style(&full, VariantKey::BOLD).unwrap();
        assert_eq!((hit.step, hit.path), (ResolveStep::ExactStyle, Path::new("/b.ttf")));

        let hit = pick_style(&full, VariantKey::BOLD_ITALIC).unwrap();
        assert_eq!(hit.step, ResolveStep::RegularStyle);
        assert_eq!(hit.variant, VariantKey::REGULAR);

        let italic_only = styles(&[
            (VariantKey::BOLD_ITALIC, "/bi.ttf"),
            (VariantKey::ITALIC, "/i.ttf"),
        ]);
        let hit = pick_style(&italic_only, VariantKey::BOLD).unwrap();
        assert_eq!(hit.step, ResolveStep::AnyStyle);
        assert_eq!(hit.variant, VariantKey::ITALIC);
    }

    #[test]
    fn relaxed_path_drops_italic_before_bold() {
        let family = styles(&[
            (VariantKey::REGULAR, "/r.ttf"),
            (VariantKey::BOLD, "/b.ttf"),
            (VariantKey::ITALIC, "/i.ttf"),
        ]);
        assert_eq!(
            relaxed_path(&family, VariantKey::BOLD_ITALIC),
            Some(Path::new("/b.ttf"))
        );

        let family = styles(&[(VariantKey::BOLD_ITALIC, "/bi.ttf")]);
        assert_eq!(
            relaxed_path(&family, VariantKey::REGULAR),
            Some(Path::new("/bi.ttf"))
        );
    }
}
