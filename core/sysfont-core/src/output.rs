//! Listing records and streaming output helpers

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::system::FontCatalog;

/// One resolvable family key, either installed or aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    /// Variant label (`regular`, `bold`, ...) → file.
    pub variants: BTreeMap<String, PathBuf>,
}

/// Records for every registry family and alias, sorted by key.
pub fn family_records(catalog: &FontCatalog) -> Vec<FamilyRecord> {
    let registry = catalog.registry();
    let mut records: Vec<FamilyRecord> = registry
        .iter()
        .map(|(family, styles)| FamilyRecord {
            family: family.to_string(),
            alias_of: None,
            variants: labelled(styles),
        })
        .collect();

    records.extend(catalog.aliases().iter().map(|(alias, canonical)| FamilyRecord {
        family: alias.to_string(),
        alias_of: Some(canonical.to_string()),
        variants: registry.styles(canonical).map(labelled).unwrap_or_default(),
    }));

    records.sort_by(|a, b| a.family.cmp(&b.family));
    records
}

fn labelled(styles: &crate::registry::FamilyStyles) -> BTreeMap<String, PathBuf> {
    styles
        .iter()
        .map(|(variant, path)| (variant.label().to_string(), path.clone()))
        .collect()
}

/// Write items as a prettified JSON array.
pub fn write_json_pretty<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write items as newline-delimited JSON (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    for item in items {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}
