/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Popup host boundary.
//!
//! The host owns the actual popup surface. Controllers ask it to show or hide
//! a popup; the host reports back once the transition has finished by calling
//! the controller's `on_host_shown` / `on_host_hidden`.

use serde::{Deserialize, Serialize};

use crate::model::tab_group::TabGroupId;

/// Layout of the tab strip the popup is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabStripOrientation {
    #[default]
    Horizontal,
    /// Vertical strip inside the sidebar. `sidebar_at_start` is true when the
    /// sidebar sits on the leading edge of the window.
    Vertical { sidebar_at_start: bool },
}

/// Which corner of the anchor meets which corner of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPosition {
    /// Anchor top-left to popup top-right (popup opens towards the leading edge).
    TopLeftTopRight,
    /// Anchor top-right to popup top-left (popup opens towards the trailing edge).
    TopRightTopLeft,
    /// Anchor bottom-left to popup top-left (popup drops below the strip).
    BottomLeftTopLeft,
}

impl PopupPosition {
    pub fn for_orientation(orientation: TabStripOrientation) -> Self {
        match orientation {
            TabStripOrientation::Vertical {
                sidebar_at_start: true,
            } => PopupPosition::TopLeftTopRight,
            TabStripOrientation::Vertical {
                sidebar_at_start: false,
            } => PopupPosition::TopRightTopLeft,
            TabStripOrientation::Horizontal => PopupPosition::BottomLeftTopLeft,
        }
    }
}

/// Screen element a popup hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAnchor {
    /// The label chip drawn at the head of a tab group.
    GroupLabel(TabGroupId),
}

pub trait PopupHost {
    fn open_popup(&mut self, anchor: PopupAnchor, position: PopupPosition);

    fn hide_popup(&mut self);

    fn focus_name_field(&mut self);
}
