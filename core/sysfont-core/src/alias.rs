//! Generic family aliases ("monospace", "sans", ...)
//!
//! Each group lists interchangeable families in order of preference. The first
//! installed member becomes the group's canonical family and every member that
//! is not installed is pointed at it.

use std::collections::BTreeMap;

use crate::normalize::simple_name;
use crate::registry::FontRegistry;

pub const ALIAS_GROUPS: &[&[&str]] = &[
    &[
        "monospace",
        "misc-fixed",
        "courier",
        "couriernew",
        "console",
        "fixed",
        "mono",
        "freemono",
        "bitstreamverasansmono",
        "verasansmono",
        "monotype",
        "lucidaconsole",
        "consolas",
        "dejavusansmono",
        "liberationmono",
    ],
    &[
        "sans",
        "arial",
        "helvetica",
        "swiss",
        "freesans",
        "bitstreamverasans",
        "verasans",
        "verdana",
        "tahoma",
        "calibri",
        "gillsans",
        "segoeui",
        "trebuchetms",
        "ubuntu",
        "dejavusans",
        "liberationsans",
    ],
    &[
        "serif",
        "times",
        "freeserif",
        "bitstreamveraserif",
        "roman",
        "timesroman",
        "timesnewroman",
        "dutch",
        "veraserif",
        "georgia",
        "cambria",
        "constantia",
        "dejavuserif",
        "liberationserif",
    ],
    &["wingdings", "wingbats"],
    &["comicsansms", "comicsans"],
];

/// The built-in groups as owned strings.
pub fn default_alias_groups() -> Vec<Vec<String>> {
    ALIAS_GROUPS
        .iter()
        .map(|group| group.iter().map(|name| name.to_string()).collect())
        .collect()
}

/// Alias key → canonical family key present in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    /// Fill the gaps the registry leaves in each group.
    ///
    /// Installed families are never shadowed. When two groups share a member
    /// the earlier group keeps it.
    pub fn build<G, S>(registry: &FontRegistry, groups: &[G]) -> Self
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut aliases = BTreeMap::new();

        for group in groups {
            let members: Vec<String> = group
                .as_ref()
                .iter()
                .map(|name| simple_name(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect();

            let Some(canonical) = members.iter().find(|name| registry.contains(name)) else {
                continue;
            };

            for name in &members {
                if !registry.contains(name) && !aliases.contains_key(name) {
                    aliases.insert(name.clone(), canonical.clone());
                }
            }
        }

        Self { aliases }
    }

    pub fn canonical(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The stored alias key and its canonical family.
    pub fn lookup(&self, alias: &str) -> Option<(&str, &str)> {
        self.aliases
            .get_key_value(alias)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Alias keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.aliases.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
