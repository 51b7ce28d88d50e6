/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tab group editor: the popup used to name, recolor and manage a tab group
//! in the tab strip.

pub mod model;
pub mod prefs;
pub mod services;
pub mod shell;

pub use crate::model::tab_group::{TabGroup, TabGroupColor, TabGroupId, TabId};
pub use crate::prefs::EditorPrefs;
pub use crate::services::session::{SessionError, SessionPersistence};
pub use crate::services::tab_strip::{InMemoryTabStrip, TabGroupStore};
pub use crate::shell::desktop::host::popup::{PopupAnchor, PopupHost, PopupPosition};
pub use crate::shell::desktop::ui::tab_group_editor::{
    EditorAction, EditorContext, EditorMode, TabGroupEditor, TabGroupEditorEvent,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
