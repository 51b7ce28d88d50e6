/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! User preferences for the tab group editor, read from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::shell::desktop::host::popup::TabStripOrientation;

pub const PREFS_FILE_NAME: &str = "tab_group_editor.toml";
const PREFS_DIR_NAME: &str = "graphshell";
pub const DEFAULT_FLUSH_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    pub sidebar: SidebarPrefs,
    pub tab_groups: TabGroupPrefs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarPrefs {
    pub vertical_tabs: bool,
    pub position_start: bool,
}

impl Default for SidebarPrefs {
    fn default() -> Self {
        Self {
            vertical_tabs: false,
            position_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabGroupPrefs {
    /// Upper bound on a single tab's state flush during the save check.
    pub flush_timeout_ms: u64,
}

impl Default for TabGroupPrefs {
    fn default() -> Self {
        Self {
            flush_timeout_ms: DEFAULT_FLUSH_TIMEOUT_MS,
        }
    }
}

/// Errors from loading preferences
#[derive(Debug)]
pub enum PrefsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for PrefsError {}

impl EditorPrefs {
    /// Per-user prefs file, for [`EditorPrefs::load_or_default`]. `None`
    /// when the platform has no config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PREFS_DIR_NAME).join(PREFS_FILE_NAME))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, PrefsError> {
        toml::from_str(contents).map_err(|e| PrefsError::Parse(e.to_string()))
    }

    /// Load from `path`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PrefsError::Io(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("prefs: using defaults, could not load {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn tab_strip_orientation(&self) -> TabStripOrientation {
        if self.sidebar.vertical_tabs {
            TabStripOrientation::Vertical {
                sidebar_at_start: self.sidebar.position_start,
            }
        } else {
            TabStripOrientation::Horizontal
        }
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.tab_groups.flush_timeout_ms)
    }
}
