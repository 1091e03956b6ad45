//! Discovery configuration
//!
//! Defaults mirror what each platform ships with. Every field can be
//! overridden from a JSON file or the `SYSFONT_*` environment variables, which
//! is also how tests point the enumerators at fixtures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::{Platform, DEFAULT_LIST_COMMAND};
use crate::error::{Result, SysfontError};

/// Font used when nothing the caller asked for is installed.
pub const DEFAULT_FONT: &str = "freesansbold.ttf";

pub const ENV_PLATFORM: &str = "SYSFONT_PLATFORM";
pub const ENV_FC_LIST: &str = "SYSFONT_FC_LIST";
pub const ENV_FONT_DIRS: &str = "SYSFONT_FONT_DIRS";
pub const ENV_WINDOWS_FONTS_DIR: &str = "SYSFONT_WINDOWS_FONTS_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Force an enumerator instead of detecting the host.
    pub platform: Option<Platform>,
    /// Program and arguments printing `file:family:style` lines.
    pub list_command: Vec<String>,
    /// Replaces the macOS directory list when non-empty.
    pub font_dirs: Vec<PathBuf>,
    pub windows_fonts_dir: Option<PathBuf>,
    pub default_font: String,
    /// Replaces the built-in alias groups when non-empty.
    pub alias_groups: Vec<Vec<String>>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            platform: None,
            list_command: DEFAULT_LIST_COMMAND.iter().map(|s| s.to_string()).collect(),
            font_dirs: Vec::new(),
            windows_fonts_dir: None,
            default_font: DEFAULT_FONT.to_string(),
            alias_groups: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Defaults with `SYSFONT_*` overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| SysfontError::Config {
            path: None,
            source: err.into(),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| SysfontError::Config {
            path: Some(path.to_path_buf()),
            source: err.into(),
        })?;
        serde_json::from_str(&text).map_err(|err| SysfontError::Config {
            path: Some(path.to_path_buf()),
            source: err.into(),
        })
    }

    /// Layer environment overrides on top of the current values.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = env::var(ENV_PLATFORM) {
            if !raw.trim().is_empty() {
                self.platform = Some(raw.parse()?);
            }
        }

        if let Some(program) = env::var_os(ENV_FC_LIST).filter(|p| !p.is_empty()) {
            self.set_list_program(PathBuf::from(program));
        }

        if let Ok(raw) = env::var(ENV_FONT_DIRS) {
            let dirs = split_dir_list(&raw);
            if !dirs.is_empty() {
                self.font_dirs = dirs;
            }
        }

        if let Some(dir) = env::var_os(ENV_WINDOWS_FONTS_DIR).filter(|d| !d.is_empty()) {
            self.windows_fonts_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Run `program` with the stock `fc-list` arguments, dropping any
    /// arguments a previous command carried.
    pub fn set_list_program(&mut self, program: impl AsRef<Path>) {
        self.list_command = std::iter::once(program.as_ref().display().to_string())
            .chain(DEFAULT_LIST_COMMAND[1..].iter().map(|s| s.to_string()))
            .collect();
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    /// Explicit override, else `%WINDIR%\Fonts`, else `C:\Windows\Fonts`.
    pub fn resolved_windows_fonts_dir(&self) -> PathBuf {
        if let Some(dir) = &self.windows_fonts_dir {
            return dir.clone();
        }
        let windir = env::var_os("WINDIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
        windir.join("Fonts")
    }
}

fn split_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split([':', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
