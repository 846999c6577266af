//! Plugin archive reading for Plugship.
//!
//! Opens a plugin zip archive and extracts its manifest (`plugin.toml`) and
//! changelog document (`changelog.toml`) into a
//! [`PluginDescriptor`](plugship_core::PluginDescriptor).

mod changelog;
mod error;
mod manifest;
mod reader;

pub use changelog::CHANGELOG_FILE;
pub use error::{ArchiveError, ArchiveResult};
pub use manifest::MANIFEST_FILE;
pub use reader::read_descriptor;
