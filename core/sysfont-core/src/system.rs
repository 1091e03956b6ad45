//! Lazily built catalog of the host's fonts
//!
//! [`SystemFonts`] owns one enumerator and the catalog it produced. The first
//! query pays for enumeration; concurrent first callers wait on the same build
//! instead of enumerating again. After that, reads are lock-free snapshots.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use crate::alias::{default_alias_groups, AliasTable};
use crate::config::{DiscoveryConfig, DEFAULT_FONT};
use crate::construct::FontConstructor;
use crate::discovery::{FontDiscovery, RawFontEntry};
use crate::matcher::{Matcher, Resolution};
use crate::registry::FontRegistry;

/// Registry and alias table from one enumeration pass. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    registry: FontRegistry,
    aliases: AliasTable,
}

impl FontCatalog {
    pub fn build<G, S>(entries: &[RawFontEntry], alias_groups: &[G]) -> Self
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let registry = FontRegistry::build(entries);
        let aliases = AliasTable::build(&registry, alias_groups);
        Self { registry, aliases }
    }

    /// Enumerate and build. An unavailable font source yields an empty catalog.
    pub fn from_discovery<G, S>(discovery: &dyn FontDiscovery, alias_groups: &[G]) -> Self
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let entries = match discovery.discover() {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("font enumeration unavailable: {err:#}");
                Vec::new()
            }
        };
        Self::build(&entries, alias_groups)
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.registry, &self.aliases)
    }
}

pub struct SystemFonts {
    discovery: Box<dyn FontDiscovery>,
    alias_groups: Vec<Vec<String>>,
    default_font: String,
    catalog: ArcSwapOption<FontCatalog>,
    build_lock: Mutex<()>,
}

impl std::fmt::Debug for SystemFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFonts")
            .field("default_font", &self.default_font)
            .field("alias_groups", &self.alias_groups.len())
            .field("built", &self.is_built())
            .finish()
    }
}

impl SystemFonts {
    pub fn new(discovery: impl FontDiscovery + 'static) -> Self {
        Self::with_discovery(Box::new(discovery))
    }

    pub fn with_discovery(discovery: Box<dyn FontDiscovery>) -> Self {
        Self {
            discovery,
            alias_groups: default_alias_groups(),
            default_font: DEFAULT_FONT.to_string(),
            catalog: ArcSwapOption::empty(),
            build_lock: Mutex::new(()),
        }
    }

    /// Enumerator, alias groups and default font taken from `config`.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        let platform = config.platform();
        log::debug!("using {} font discovery", platform.as_str());

        let mut fonts = Self::with_discovery(platform.discovery(config));
        fonts.default_font = config.default_font.clone();
        if !config.alias_groups.is_empty() {
            fonts.alias_groups = config.alias_groups.clone();
        }
        fonts
    }

    /// Host detection with default settings.
    pub fn detect() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }

    pub fn with_alias_groups(mut self, groups: Vec<Vec<String>>) -> Self {
        self.alias_groups = groups;
        self
    }

    pub fn with_default_font(mut self, name: impl Into<String>) -> Self {
        self.default_font = name.into();
        self
    }

    pub fn default_font(&self) -> &str {
        &self.default_font
    }

    /// The current catalog, building it on first use.
    pub fn catalog(&self) -> Arc<FontCatalog> {
        if let Some(catalog) = self.catalog.load_full() {
            return catalog;
        }

        let _guard = self.build_lock.lock();
        // Another caller may have finished the build while we waited.
        if let Some(catalog) = self.catalog.load_full() {
            return catalog;
        }
        self.build_locked()
    }

    /// Enumerate again and replace the catalog in one step.
    pub fn build(&self) -> Arc<FontCatalog> {
        let _guard = self.build_lock.lock();
        self.build_locked()
    }

    /// Forget the catalog; the next query enumerates again.
    pub fn reset(&self) {
        let _guard = self.build_lock.lock();
        self.catalog.store(None);
    }

    pub fn is_built(&self) -> bool {
        self.catalog.load().is_some()
    }

    fn build_locked(&self) -> Arc<FontCatalog> {
        let started = Instant::now();
        let catalog = Arc::new(FontCatalog::from_discovery(
            self.discovery.as_ref(),
            self.alias_groups.as_slice(),
        ));
        log::info!(
            "font catalog: {} families, {} aliases in {:.1?}",
            catalog.registry().len(),
            catalog.aliases().len(),
            started.elapsed()
        );
        self.catalog.store(Some(Arc::clone(&catalog)));
        catalog
    }

    pub fn resolution<S: AsRef<str>>(
        &self,
        names: &[S],
        size: f32,
        bold: bool,
        italic: bool,
    ) -> Resolution {
        let catalog = self.catalog();
        catalog
            .matcher()
            .with_default_font(&self.default_font)
            .resolution(names, size, bold, italic)
    }

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
        constructor.construct(&self.resolution(names, size, bold, italic).request)
    }

    pub fn find_path<S: AsRef<str>>(&self, names: &[S], bold: bool, italic: bool) -> Option<PathBuf> {
        self.catalog().matcher().find_path(names, bold, italic)
    }

    pub fn list_families(&self) -> Vec<String> {
        self.catalog().matcher().list_families()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::StaticDiscovery;
    use crate::normalize::StyleHint;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Unavailable;

    impl FontDiscovery for Unavailable {
        fn discover(&self) -> anyhow::Result<Vec<RawFontEntry>> {
            Err(anyhow!("fc-list: command not found"))
        }
    }

    #[test]
    fn failing_discovery_builds_empty_catalog() {
        let fonts = SystemFonts::new(Unavailable);
        assert!(fonts.list_families().is_empty());
        assert!(fonts.is_built());
    }

    /// Counts enumerations so tests can tell a rebuild from a cached catalog.
    struct Counting {
        inner: StaticDiscovery,
        calls: Arc<AtomicUsize>,
    }

    impl FontDiscovery for Counting {
        fn discover(&self) -> anyhow::Result<Vec<RawFontEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.discover()
        }
    }

    #[test]
    fn reset_drops_catalog_until_next_query() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fonts = SystemFonts::new(Counting {
            inner: StaticDiscovery::new([RawFontEntry::new(
                "Tahoma",
                "/fonts/tahoma.ttf",
                StyleHint::Embedded,
            )]),
            calls: Arc::clone(&calls),
        });

        assert!(!fonts.is_built());
        assert!(fonts.find_path(&["tahoma"], false, false).is_some());
        assert!(fonts.find_path(&["tahoma"], false, false).is_some());
        assert!(fonts.is_built());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        fonts.reset();
        assert!(!fonts.is_built());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(fonts.find_path(&["tahoma"], false, false).is_some());
        assert!(fonts.is_built());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
