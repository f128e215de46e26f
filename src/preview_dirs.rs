//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/cms-preview/` | `~/.config/cms-preview/` |
//!
//! Set `CMS_PREVIEW_CONFIG_DIR` to override the config directory.

use std::path::PathBuf;

/// Directory name used under the platform config root.
const APP_DIR: &str = "cms-preview";

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/cms-preview/` by default. Override with
/// the `CMS_PREVIEW_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CMS_PREVIEW_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
}

/// Path of the main `config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
