//! Platform font enumeration for sysfont-core
//!
//! Each host has its own inventory of installed fonts: the registry on Windows,
//! a handful of well-known directories on macOS and `fc-list` everywhere else.
//! The enumerators here only report what they find; turning names into family
//! keys is the normalizer's job.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::config::DiscoveryConfig;
use crate::error::SysfontError;
use crate::normalize::StyleHint;

/// One font file as reported by the platform, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFontEntry {
    pub name: String,
    pub path: PathBuf,
    pub hint: StyleHint,
}

impl RawFontEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, hint: StyleHint) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            hint,
        }
    }
}

/// Trait for enumerating fonts from some backing store (OS inventory, fixed list, etc.).
pub trait FontDiscovery: Send + Sync {
    fn discover(&self) -> Result<Vec<RawFontEntry>>;
}

/// The three inventory mechanisms we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[serde(alias = "darwin")]
    Macos,
    Unix,
}

impl Platform {
    /// Pick the variant matching the host we were compiled for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else {
            Platform::Unix
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Unix => "unix",
        }
    }

    /// Build the enumerator for this platform.
    pub fn discovery(self, config: &DiscoveryConfig) -> Box<dyn FontDiscovery> {
        match self {
            Platform::Windows => Box::new(WindowsDiscovery::new(config.resolved_windows_fonts_dir())),
            Platform::Macos if !config.font_dirs.is_empty() => {
                Box::new(MacDiscovery::new(config.font_dirs.iter().cloned()))
            }
            Platform::Macos => Box::new(MacDiscovery::system()),
            Platform::Unix => Box::new(UnixDiscovery::new(config.list_command.iter().cloned())),
        }
    }
}

impl FromStr for Platform {
    type Err = SysfontError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" | "nt" => Ok(Platform::Windows),
            "macos" | "darwin" | "mac" => Ok(Platform::Macos),
            "unix" | "linux" | "fontconfig" => Ok(Platform::Unix),
            other => Err(SysfontError::InvalidArgument(format!(
                "unknown platform: {other}"
            ))),
        }
    }
}

/// Fixed list of entries, for embedding hosts that already know their fonts.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    entries: Vec<RawFontEntry>,
}

impl StaticDiscovery {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RawFontEntry>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl FontDiscovery for StaticDiscovery {
    fn discover(&self) -> Result<Vec<RawFontEntry>> {
        Ok(self.entries.clone())
    }
}

/// `fc-list` style enumeration.
#[derive(Debug, Clone)]
pub struct UnixDiscovery {
    command: Vec<String>,
}

pub const DEFAULT_LIST_COMMAND: [&str; 5] = ["fc-list", ":", "file", "family", "style"];

impl UnixDiscovery {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
        }
    }

    /// Run a specific `fc-list` binary with the standard field selection.
    pub fn with_program(program: impl AsRef<Path>) -> Self {
        let mut command = vec![program.as_ref().display().to_string()];
        command.extend(DEFAULT_LIST_COMMAND[1..].iter().map(|s| s.to_string()));
        Self { command }
    }
}

impl Default for UnixDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_COMMAND)
    }
}

impl FontDiscovery for UnixDiscovery {
    fn discover(&self) -> Result<Vec<RawFontEntry>> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| anyhow!("font listing command is empty"))?;

        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("running {program}"))?;
        if !output.status.success() {
            return Err(anyhow!("{program} exited with {}", output.status));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(parse_fc_list(&text))
    }
}

/// Parse the whole `fc-list` output, skipping lines that do not fit.
pub fn parse_fc_list(text: &str) -> Vec<RawFontEntry> {
    let mut skipped = 0usize;
    let entries: Vec<RawFontEntry> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_fc_list_line(line);
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();

    if skipped > 0 {
        log::debug!("fc-list: skipped {skipped} lines without a usable font");
    }
    entries
}

/// Parse one `filename:family[,family...]:style` line.
///
/// Returns `None` for lines missing either separator and for files outside
/// the supported extension set.
pub fn parse_fc_list_line(line: &str) -> Option<RawFontEntry> {
    let mut parts = line.splitn(3, ':');
    let file = parts.next()?.trim();
    let family = parts.next()?;
    let style = parts.next()?;

    let path = PathBuf::from(file);
    if !is_font(&path) {
        return None;
    }

    let name = family
        .trim()
        .split(',')
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| file_stem(&path))?;

    Some(RawFontEntry {
        name,
        path,
        hint: StyleHint::Fontconfig(style.to_string()),
    })
}

const WINDOWS_FONT_KEYS: [&str; 4] = [
    r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts",
    r"HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Fonts",
    r"HKCU\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts",
    r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Fonts",
];

/// Registry-backed enumeration through the stock `reg query` tool.
#[derive(Debug, Clone)]
pub struct WindowsDiscovery {
    fonts_dir: PathBuf,
}

impl WindowsDiscovery {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
        }
    }
}

impl FontDiscovery for WindowsDiscovery {
    fn discover(&self) -> Result<Vec<RawFontEntry>> {
        let mut found = Vec::new();

        for key in WINDOWS_FONT_KEYS {
            match query_registry_key(key) {
                Ok(text) => found.extend(parse_reg_query(&text, &self.fonts_dir)),
                Err(err) => log::debug!("skipping {key}: {err:#}"),
            }
        }

        Ok(found)
    }
}

fn query_registry_key(key: &str) -> Result<String> {
    let output = Command::new("reg")
        .args(["query", key])
        .output()
        .context("running reg query")?;
    if !output.status.success() {
        return Err(anyhow!("reg query exited with {}", output.status));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn reg_value_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s+(?P<name>.+?)\s+REG_(?:EXPAND_)?SZ\s+(?P<file>.+?)\s*$")
            .expect("registry value pattern is valid")
    })
}

/// Parse `reg query` output into entries.
///
/// Bare file names are placed inside `fonts_dir`; values that already carry a
/// directory are kept as-is.
pub fn parse_reg_query(text: &str, fonts_dir: &Path) -> Vec<RawFontEntry> {
    text.lines()
        .filter_map(|line| reg_value_pattern().captures(line))
        .filter_map(|caps| {
            let name = caps["name"].to_string();
            let file = &caps["file"];
            if !is_font(Path::new(file)) {
                return None;
            }
            let path = if file.contains(['\\', '/']) {
                PathBuf::from(file)
            } else {
                fonts_dir.join(file)
            };
            Some(RawFontEntry {
                name,
                path,
                hint: StyleHint::Embedded,
            })
        })
        .collect()
}

const MAC_FONT_DIRS: [&str; 4] = [
    "/Library/Fonts",
    "/Network/Library/Fonts",
    "/System/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

const MAC_ASSET_ROOT: &str = "/System/Library/Assets/com_apple_MobileAsset_Font3";

const X11_FC_LIST: [&str; 2] = ["/usr/X11/bin/fc-list", "/usr/X11R6/bin/fc-list"];

/// Directory listing over the macOS font locations.
#[derive(Debug, Clone)]
pub struct MacDiscovery {
    dirs: Vec<PathBuf>,
    asset_root: Option<PathBuf>,
    x11_fc_list: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl MacDiscovery {
    /// Walk exactly these directories, nothing else.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            asset_root: None,
            x11_fc_list: Vec::new(),
            follow_symlinks: true,
        }
    }

    /// The stock locations, the user's library and the mobile-asset font store.
    pub fn system() -> Self {
        let mut dirs: Vec<PathBuf> = MAC_FONT_DIRS.iter().map(PathBuf::from).collect();
        if let Some(user) = env::var_os("USER").filter(|u| !u.is_empty()) {
            dirs.push(PathBuf::from("/Users").join(user).join("Library/Fonts"));
        }

        Self {
            dirs,
            asset_root: Some(PathBuf::from(MAC_ASSET_ROOT)),
            x11_fc_list: X11_FC_LIST.iter().map(PathBuf::from).collect(),
            follow_symlinks: true,
        }
    }

    pub fn asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// `fc-list` binaries to delegate to; the first one that exists wins.
    pub fn x11_fc_list<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.x11_fc_list = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Linked font files are listed by default; the walk never recurses, so
    /// following links cannot loop.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Directories in walk order, asset folders resolved against the current disk.
    pub fn locations(&self) -> Vec<PathBuf> {
        let mut dirs = self.dirs.clone();
        if let Some(root) = &self.asset_root {
            dirs.extend(asset_dirs(root));
        }
        dirs
    }
}

impl FontDiscovery for MacDiscovery {
    fn discover(&self) -> Result<Vec<RawFontEntry>> {
        // An X11 install ships its own fontconfig; prefer it when present.
        if let Some(fc_list) = self.x11_fc_list.iter().find(|p| p.exists()) {
            log::debug!("using X11 font list at {}", fc_list.display());
            return UnixDiscovery::with_program(fc_list).discover();
        }

        let per_dir: Vec<Vec<RawFontEntry>> = self
            .locations()
            .par_iter()
            .map(|dir| list_font_dir(dir, self.follow_symlinks))
            .collect();

        Ok(per_dir.into_iter().flatten().collect())
    }
}

/// `<root>/<each subdirectory>/AssetData`, sorted by name.
pub fn asset_dirs(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.path().join("AssetData"))
        .collect()
}

fn list_font_dir(dir: &Path, follow_symlinks: bool) -> Vec<RawFontEntry> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(follow_symlinks)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("skipping entry in {}: {err}", dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_font(entry.path()) {
            continue;
        }
        if let Some(name) = file_stem(entry.path()) {
            found.push(RawFontEntry {
                name,
                path: entry.path().to_path_buf(),
                hint: StyleHint::FileStem,
            });
        }
    }

    log::debug!("{}: {} fonts", dir.display(), found.len());
    found
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
}

/// Whether the path carries one of the extensions we register.
pub fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc")
}
