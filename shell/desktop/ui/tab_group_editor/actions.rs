/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Edit-mode actions offered below the name and color fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    AddNewTabInGroup,
    MoveGroupToNewWindow,
    SaveAndCloseGroup,
    UngroupTabs,
    DeleteGroup,
}

impl EditorAction {
    pub const ALL: [EditorAction; 5] = [
        EditorAction::AddNewTabInGroup,
        EditorAction::MoveGroupToNewWindow,
        EditorAction::SaveAndCloseGroup,
        EditorAction::UngroupTabs,
        EditorAction::DeleteGroup,
    ];
}

/// Enabled state of the actions that can be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorActionState {
    pub move_to_new_window: bool,
    /// Stays off until the save-eligibility check for the current open
    /// comes back favorable.
    pub save_and_close: bool,
}

impl EditorActionState {
    pub fn is_enabled(&self, action: EditorAction) -> bool {
        match action {
            EditorAction::MoveGroupToNewWindow => self.move_to_new_window,
            EditorAction::SaveAndCloseGroup => self.save_and_close,
            EditorAction::AddNewTabInGroup | EditorAction::UngroupTabs | EditorAction::DeleteGroup => {
                true
            },
        }
    }
}

impl Default for EditorActionState {
    fn default() -> Self {
        Self {
            move_to_new_window: true,
            save_and_close: false,
        }
    }
}
