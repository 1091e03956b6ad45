//! sysfont-core: find the fonts a machine actually has
//!
//! Asks the host for its installed fonts, folds their names into family keys
//! with up to four style variants, and answers "give me Courier New, bold, or
//! anything monospace" with a concrete file. When nothing fits, the answer is
//! the built-in default font; font lookup never fails.
//!
//! ## Pipeline
//!
//! **Discovery**: one enumerator per platform
//! - Windows: the font registry keys (`reg query`)
//! - macOS: the system, library, user and mobile-asset font folders
//! - everything else: `fc-list`
//!
//! **Normalization**: `"Arial Bold Italic (TrueType)"`, `ArialBoldItalic.ttf`
//! and fontconfig's `Arial:style=Bold Italic` all become `arial` + bold + italic
//!
//! **Registry and aliases**: family key → variant → path, plus generic names
//! ("sans", "monospace", "serif") pointed at whichever member is installed
//!
//! **Matching**: exact style, then the regular file with synthesized style, then
//! any file of the family, then the default font
//!
//! ## Example
//!
//! ```rust,no_run
//! use sysfont_core::construct::DescriptorConstructor;
//! use sysfont_core::system::SystemFonts;
//!
//! let fonts = SystemFonts::detect();
//!
//! // First candidate that exists wins; "monospace" is an alias.
//! let font = fonts.resolve(&DescriptorConstructor, &["Fira Code, monospace"], 12.0, true, false);
//! println!("{} (fake bold: {})", font.source.display(), font.synthetic_bold);
//!
//! for family in fonts.list_families() {
//!     println!("{family}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`discovery`]: platform enumerators behind the `FontDiscovery` trait
//! - [`normalize`]: display name → family key and style flags
//! - [`registry`] and [`alias`]: the lookup tables
//! - [`matcher`]: the resolution state machine
//! - [`construct`]: the seam to the caller's font engine
//! - [`system`]: lazy, rebuildable catalog shared between threads

pub mod alias;
pub mod config;
pub mod construct;
pub mod discovery;
pub mod error;
pub mod legacy;
pub mod matcher;
pub mod normalize;
pub mod output;
pub mod registry;
pub mod system;

pub use error::{Result, SysfontError};
