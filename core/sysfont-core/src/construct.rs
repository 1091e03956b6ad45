//! Hand-off to whatever actually loads fonts
//!
//! Resolution ends with a [`FontRequest`]: which file (or the default font), at
//! what size, and which styles still have to be faked because no matching file
//! exists. Loading and rasterizing belong to the caller's font engine, plugged
//! in through [`FontConstructor`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FontSource {
    /// An installed font file.
    File(PathBuf),
    /// The engine's built-in default, by name.
    Default(String),
}

impl FontSource {
    pub fn is_default(&self) -> bool {
        matches!(self, FontSource::Default(_))
    }

    pub fn display(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Default(name) => format!("<default:{name}>"),
        }
    }
}

/// What the font engine is asked to build.
///
/// `bold` and `italic` mean "synthesize this style"; they are false when the
/// chosen file already carries the style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRequest {
    pub source: FontSource,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

pub trait FontConstructor {
    type Handle;

    fn construct(&self, request: &FontRequest) -> Self::Handle;
}

/// Constructor that only describes the font it would load.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorConstructor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub source: FontSource,
    pub size: f32,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
}

impl FontConstructor for DescriptorConstructor {
    type Handle = FontDescriptor;

    fn construct(&self, request: &FontRequest) -> FontDescriptor {
        FontDescriptor {
            source: request.source.clone(),
            size: request.size,
            synthetic_bold: request.bold,
            synthetic_italic: request.italic,
        }
    }
}
