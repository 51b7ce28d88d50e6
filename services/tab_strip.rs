/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tab strip: the owner of tabs and tab groups for one window.
//!
//! [`TabGroupStore`] is the surface other components program against.
//! [`InMemoryTabStrip`] is the in-process implementation used by hosts that
//! have no native strip of their own.

use log::warn;

use crate::model::tab_group::{Tab, TabGroup, TabGroupColor, TabGroupId, TabId};
use crate::shell::desktop::host::popup::TabStripOrientation;

pub trait TabGroupStore {
    fn tab_group(&self, id: TabGroupId) -> Option<&TabGroup>;

    /// All groups in strip order.
    fn all_tab_groups(&self) -> Vec<&TabGroup>;

    fn set_group_label(&mut self, id: TabGroupId, label: &str);

    fn set_group_color(&mut self, id: TabGroupId, color: TabGroupColor);

    /// Move `tabs` into the group, appending them after its current members.
    fn add_tabs(&mut self, id: TabGroupId, tabs: &[TabId]);

    /// Dissolve the group. Its tabs stay open, ungrouped.
    fn ungroup_tabs(&mut self, id: TabGroupId);

    /// Record the group durably so it can be reopened later.
    fn save_group(&mut self, id: TabGroupId);

    /// Remove the group from the strip and close its tabs.
    fn remove_tab_group(&mut self, id: TabGroupId);

    /// Move the group and its tabs into a new top-level window.
    fn replace_group_with_window(&mut self, id: TabGroupId);

    /// Open a new tab right after `after` (or at the end of the strip).
    fn add_adjacent_new_tab(&mut self, after: Option<TabId>) -> TabId;

    /// Number of tabs open in the window, grouped or not.
    fn open_tab_count(&self) -> usize;

    fn orientation(&self) -> TabStripOrientation;
}

/// What `save_group` captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTabGroup {
    pub id: TabGroupId,
    pub label: String,
    pub color: TabGroupColor,
    pub urls: Vec<String>,
}

/// A window spawned by `replace_group_with_window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedWindow {
    pub group: TabGroup,
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Default)]
pub struct InMemoryTabStrip {
    tabs: Vec<Tab>,
    groups: Vec<TabGroup>,
    saved_groups: Vec<SavedTabGroup>,
    detached_windows: Vec<DetachedWindow>,
    orientation: TabStripOrientation,
    next_tab_index: u64,
}

impl InMemoryTabStrip {
    pub fn new(orientation: TabStripOrientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    pub fn set_orientation(&mut self, orientation: TabStripOrientation) {
        self.orientation = orientation;
    }

    /// Open a tab at the end of the strip.
    pub fn open_tab(&mut self, url: &str) -> TabId {
        let id = self.allocate_tab_id();
        self.tabs.push(Tab {
            id,
            url: url.to_string(),
            group: None,
        });
        id
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn saved_groups(&self) -> &[SavedTabGroup] {
        &self.saved_groups
    }

    pub fn detached_windows(&self) -> &[DetachedWindow] {
        &self.detached_windows
    }

    /// Group `tabs` under a fresh, unlabeled group.
    ///
    /// Tabs already in another group are moved out of it; tabs the strip does
    /// not know are skipped. Returns `None` when nothing was left to group.
    pub fn create_group(&mut self, tabs: &[TabId], color: TabGroupColor) -> Option<TabGroupId> {
        let members: Vec<TabId> = tabs
            .iter()
            .copied()
            .filter(|id| self.tab(*id).is_some())
            .collect();
        if members.is_empty() {
            warn!("tab_strip: refusing to create an empty tab group");
            return None;
        }

        let group = TabGroup::new(color, Vec::new());
        let id = group.id;
        self.groups.push(group);
        self.add_tabs(id, &members);
        Some(id)
    }

    fn allocate_tab_id(&mut self) -> TabId {
        self.next_tab_index = self.next_tab_index.saturating_add(1);
        TabId::new(self.next_tab_index)
    }

    fn group_mut(&mut self, id: TabGroupId) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    fn group_position(&self, id: TabGroupId) -> Option<usize> {
        self.groups.iter().position(|group| group.id == id)
    }

    /// Pull `tab` out of its current group, dropping the group if it empties.
    fn detach_from_group(&mut self, tab: TabId) {
        let Some(owner) = self.tab(tab).and_then(|tab| tab.group) else {
            return;
        };
        let mut emptied = false;
        if let Some(group) = self.group_mut(owner) {
            group.tabs.retain(|member| *member != tab);
            emptied = group.tabs.is_empty();
        }
        if emptied {
            self.groups.retain(|group| group.id != owner);
        }
        if let Some(entry) = self.tabs.iter_mut().find(|entry| entry.id == tab) {
            entry.group = None;
        }
    }

    fn take_group(&mut self, id: TabGroupId) -> Option<TabGroup> {
        let Some(position) = self.group_position(id) else {
            warn!("tab_strip: no tab group {id:?}");
            return None;
        };
        Some(self.groups.remove(position))
    }
}

impl TabGroupStore for InMemoryTabStrip {
    fn tab_group(&self, id: TabGroupId) -> Option<&TabGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    fn all_tab_groups(&self) -> Vec<&TabGroup> {
        self.groups.iter().collect()
    }

    fn set_group_label(&mut self, id: TabGroupId, label: &str) {
        match self.group_mut(id) {
            Some(group) => group.label = label.to_string(),
            None => warn!("tab_strip: cannot relabel missing tab group {id:?}"),
        }
    }

    fn set_group_color(&mut self, id: TabGroupId, color: TabGroupColor) {
        match self.group_mut(id) {
            Some(group) => group.color = color,
            None => warn!("tab_strip: cannot recolor missing tab group {id:?}"),
        }
    }

    fn add_tabs(&mut self, id: TabGroupId, tabs: &[TabId]) {
        if self.group_position(id).is_none() {
            warn!("tab_strip: cannot add tabs to missing tab group {id:?}");
            return;
        }
        for tab in tabs {
            let Some(owner) = self.tab(*tab).map(|entry| entry.group) else {
                continue;
            };
            if owner == Some(id) {
                continue;
            }
            // `id` does not hold `tab`, so detaching can never drop `id`.
            self.detach_from_group(*tab);
            if let Some(entry) = self.tabs.iter_mut().find(|entry| entry.id == *tab) {
                entry.group = Some(id);
            }
            if let Some(group) = self.group_mut(id) {
                group.tabs.push(*tab);
            }
        }
    }

    fn ungroup_tabs(&mut self, id: TabGroupId) {
        let Some(group) = self.take_group(id) else {
            return;
        };
        for tab in &mut self.tabs {
            if tab.group == Some(group.id) {
                tab.group = None;
            }
        }
    }

    fn save_group(&mut self, id: TabGroupId) {
        let Some(group) = self.tab_group(id) else {
            warn!("tab_strip: cannot save missing tab group {id:?}");
            return;
        };
        let urls = group
            .tabs
            .iter()
            .filter_map(|tab| self.tab(*tab))
            .map(|tab| tab.url.clone())
            .collect();
        let saved = SavedTabGroup {
            id: group.id,
            label: group.label.clone(),
            color: group.color,
            urls,
        };
        self.saved_groups.retain(|existing| existing.id != id);
        self.saved_groups.push(saved);
    }

    fn remove_tab_group(&mut self, id: TabGroupId) {
        let Some(group) = self.take_group(id) else {
            return;
        };
        self.tabs.retain(|tab| !group.tabs.contains(&tab.id));
    }

    fn replace_group_with_window(&mut self, id: TabGroupId) {
        let Some(group) = self.take_group(id) else {
            return;
        };
        let (moved, remaining): (Vec<Tab>, Vec<Tab>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .partition(|tab| group.tabs.contains(&tab.id));
        self.tabs = remaining;
        self.detached_windows.push(DetachedWindow {
            group,
            tabs: moved,
        });
    }

    fn add_adjacent_new_tab(&mut self, after: Option<TabId>) -> TabId {
        let id = self.allocate_tab_id();
        let tab = Tab {
            id,
            url: "about:newtab".to_string(),
            group: None,
        };
        let insert_at = after
            .and_then(|anchor| self.tabs.iter().position(|tab| tab.id == anchor))
            .map(|position| position + 1)
            .unwrap_or(self.tabs.len());
        self.tabs.insert(insert_at, tab);
        id
    }

    fn open_tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn orientation(&self) -> TabStripOrientation {
        self.orientation
    }
}
