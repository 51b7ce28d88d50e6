/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tab group editor popup.
//!
//! The editor binds to one tab group at a time, either right after the group
//! was created (create mode) or for an existing group (edit mode). Name and
//! color edits write straight through to the bound group. Closing a create
//! flow either keeps the group or dissolves it again.
//!
//! The editor does not own the popup surface. It asks the [`PopupHost`] to
//! show or hide it, and the host reports back through [`TabGroupEditor::on_host_shown`]
//! and [`TabGroupEditor::on_host_hidden`]. All calls happen on the UI thread;
//! the only async work is the save-eligibility check, whose results are pulled
//! back in with [`TabGroupEditor::poll_save_eligibility`].

pub mod actions;
pub mod events;
pub mod swatches;

use crossbeam_channel::Receiver;
use keyboard_types::{Key, NamedKey};
use log::{debug, warn};
use tokio::runtime::Handle;

use crate::model::tab_group::{TabGroupColor, TabGroupId};
use crate::prefs::EditorPrefs;
use crate::services::session::SessionPersistence;
use crate::services::tab_strip::TabGroupStore;
use crate::shell::desktop::host::popup::{PopupAnchor, PopupHost, PopupPosition};
use crate::shell::desktop::runtime::save_eligibility::{FlushesSettled, SaveEligibilityChecker};
use crate::shell::desktop::workbench::tab_grouping;

pub use actions::{EditorAction, EditorActionState};
pub use events::{EditorEventBus, TabGroupEditorEvent};
pub use swatches::{ColorSwatch, ColorSwatches, SWATCH_GROUP_NAME};

/// Collaborators the editor reaches through on every call.
pub struct EditorContext<'a> {
    pub store: &'a mut dyn TabGroupStore,
    pub session: &'a dyn SessionPersistence,
    pub host: &'a mut dyn PopupHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Editing a group that was just created; dismissing with cancel or
    /// ESCAPE dissolves it.
    Create,
    /// Editing an existing group; edits are already live, closing never
    /// discards anything.
    Edit,
}

pub struct TabGroupEditor {
    mode: EditorMode,
    active_group: Option<TabGroupId>,
    keep_newly_created_group: bool,
    /// Bumped on every open. Save-eligibility results carry the generation
    /// they were started under and are dropped if it no longer matches.
    generation: u64,
    /// Hidden reports still owed by the host for popups that were replaced
    /// by a reopen before they finished hiding.
    superseded_hides: usize,
    name_field: String,
    name_field_focused: bool,
    swatches: ColorSwatches,
    actions: EditorActionState,
    eligibility: SaveEligibilityChecker,
    events: EditorEventBus,
}

impl TabGroupEditor {
    pub fn new(runtime: Handle, prefs: &EditorPrefs) -> Self {
        Self {
            mode: EditorMode::Edit,
            active_group: None,
            keep_newly_created_group: true,
            generation: 0,
            superseded_hides: 0,
            name_field: String::new(),
            name_field_focused: false,
            swatches: ColorSwatches::new(),
            actions: EditorActionState::default(),
            eligibility: SaveEligibilityChecker::new(runtime, prefs.flush_timeout()),
            events: EditorEventBus::default(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn active_group(&self) -> Option<TabGroupId> {
        self.active_group
    }

    pub fn is_open(&self) -> bool {
        self.active_group.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn keeps_newly_created_group(&self) -> bool {
        self.keep_newly_created_group
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    pub fn name_field_focused(&self) -> bool {
        self.name_field_focused
    }

    pub fn swatches(&self) -> &ColorSwatches {
        &self.swatches
    }

    pub fn actions(&self) -> EditorActionState {
        self.actions
    }

    pub fn subscribe(&mut self) -> Receiver<TabGroupEditorEvent> {
        self.events.subscribe()
    }

    /// Open for a group the tab strip just created.
    pub fn open_create_modal(&mut self, ctx: &mut EditorContext<'_>, group: TabGroupId) {
        self.supersede_open_popup(ctx);
        if !self.bind(&*ctx.store, Some(group)) {
            return;
        }
        self.mode = EditorMode::Create;
        self.keep_newly_created_group = true;
        self.open_popup(ctx, group);
    }

    /// Open for an existing group.
    pub fn open_edit_modal(&mut self, ctx: &mut EditorContext<'_>, group: TabGroupId) {
        self.supersede_open_popup(ctx);
        if !self.bind(&*ctx.store, Some(group)) {
            return;
        }
        self.mode = EditorMode::Edit;
        self.open_popup(ctx, group);

        let Some(bound) = ctx.store.tab_group(group) else {
            return;
        };
        self.actions = EditorActionState {
            move_to_new_window: !tab_grouping::group_spans_window(&*ctx.store, bound),
            save_and_close: false,
        };
        let flushes = bound
            .tabs
            .iter()
            .map(|tab| (*tab, ctx.session.flush(*tab)))
            .collect();
        self.eligibility.spawn_check(self.generation, group, flushes);
    }

    /// Name field input. Every keystroke lands on the group immediately.
    pub fn on_name_input(&mut self, ctx: &mut EditorContext<'_>, text: &str) {
        self.name_field.clear();
        self.name_field.push_str(text);
        if let Some(group) = self.active_group {
            ctx.store.set_group_label(group, text);
        }
    }

    pub fn select_color(&mut self, ctx: &mut EditorContext<'_>, color: TabGroupColor) {
        self.swatches.check(Some(color));
        if let Some(group) = self.active_group {
            ctx.store.set_group_color(group, color);
        }
    }

    /// Change event from the swatch radio group, as raw input name and value.
    pub fn on_swatch_change(&mut self, ctx: &mut EditorContext<'_>, input_name: &str, value: &str) {
        if input_name != SWATCH_GROUP_NAME {
            return;
        }
        match value.parse() {
            Ok(color) => self.select_color(ctx, color),
            Err(e) => warn!("tab_group_editor: ignoring swatch change ({e})"),
        }
    }

    /// Ask the host to hide the popup. In create mode `keep_newly_created_group`
    /// decides what happens to the group once the popup is hidden.
    pub fn close(&mut self, ctx: &mut EditorContext<'_>, keep_newly_created_group: bool) {
        if self.mode == EditorMode::Create {
            self.keep_newly_created_group = keep_newly_created_group;
        }
        ctx.host.hide_popup();
    }

    pub fn on_cancel_clicked(&mut self, ctx: &mut EditorContext<'_>) {
        self.close(ctx, false);
    }

    pub fn on_done_clicked(&mut self, ctx: &mut EditorContext<'_>) {
        self.close(ctx, true);
    }

    pub fn on_host_shown(&mut self, ctx: &mut EditorContext<'_>) {
        // Dismissing by clicking elsewhere must not throw away a group the
        // user just made; only an explicit cancel does that.
        if self.mode == EditorMode::Create {
            self.keep_newly_created_group = true;
        }
        self.name_field_focused = true;
        ctx.host.focus_name_field();
    }

    pub fn on_host_hidden(&mut self, ctx: &mut EditorContext<'_>) {
        if self.superseded_hides > 0 {
            self.superseded_hides -= 1;
            debug!("tab_group_editor: ignoring hidden report for a replaced popup");
            return;
        }
        self.finish_binding(ctx);
    }

    /// Settle the bound group the way a hidden report would, then unbind.
    fn finish_binding(&mut self, ctx: &mut EditorContext<'_>) {
        if self.mode == EditorMode::Create
            && let Some(group) = self.active_group
        {
            if self.keep_newly_created_group {
                self.events.emit(TabGroupEditorEvent::CreateCommitted(group));
            } else {
                ctx.store.ungroup_tabs(group);
            }
        }
        self.bind(&*ctx.store, None);
    }

    /// Key press inside the popup. Returns whether the editor consumed it.
    pub fn on_key_press(
        &mut self,
        ctx: &mut EditorContext<'_>,
        key: &Key,
        default_prevented: bool,
    ) -> bool {
        if default_prevented || !self.is_open() {
            return false;
        }
        match key {
            Key::Named(NamedKey::Escape) => {
                self.close(ctx, false);
                true
            },
            Key::Named(NamedKey::Enter) => {
                self.close(ctx, true);
                true
            },
            _ => false,
        }
    }

    pub fn trigger_action(&mut self, ctx: &mut EditorContext<'_>, action: EditorAction) {
        let Some(group) = self.action_target(action) else {
            return;
        };
        match action {
            EditorAction::AddNewTabInGroup => {
                let last_tab = ctx.store.tab_group(group).and_then(|bound| bound.last_tab());
                let tab = ctx.store.add_adjacent_new_tab(last_tab);
                ctx.store.add_tabs(group, &[tab]);
                self.close(ctx, true);
            },
            EditorAction::MoveGroupToNewWindow => {
                ctx.store.replace_group_with_window(group);
                self.close(ctx, true);
            },
            EditorAction::SaveAndCloseGroup => {
                ctx.store.save_group(group);
                self.events.emit(TabGroupEditorEvent::Saved(group));
                ctx.store.remove_tab_group(group);
                self.close(ctx, true);
            },
            EditorAction::UngroupTabs => {
                ctx.store.ungroup_tabs(group);
                self.close(ctx, true);
            },
            EditorAction::DeleteGroup => {
                ctx.store.remove_tab_group(group);
                self.close(ctx, true);
            },
        }
    }

    /// Apply every save-eligibility result that has arrived. Call once per
    /// frame.
    pub fn poll_save_eligibility(&mut self, ctx: &EditorContext<'_>) {
        for settled in self.eligibility.drain_settled() {
            self.apply_save_eligibility(ctx, &settled);
        }
    }

    /// Wait for the next save-eligibility result without applying it.
    pub async fn next_save_eligibility(&mut self) -> Option<FlushesSettled> {
        self.eligibility.next_settled().await
    }

    /// Apply one result. Returns false when it belongs to an earlier open.
    pub fn apply_save_eligibility(&mut self, ctx: &EditorContext<'_>, settled: &FlushesSettled) -> bool {
        if settled.generation != self.generation || self.active_group != Some(settled.group) {
            debug!(
                "tab_group_editor: dropping stale save check #{} (current #{})",
                settled.generation, self.generation
            );
            return false;
        }
        let Some(group) = ctx.store.tab_group(settled.group) else {
            return false;
        };
        if !settled.failed.is_empty() {
            debug!(
                "tab_group_editor: {} of {} flushes failed for {:?}",
                settled.failed.len(),
                settled.failed.len() + settled.flushed.len(),
                settled.group
            );
        }
        self.actions.save_and_close = ctx.session.should_save_tab_group(group);
        true
    }

    /// Stop outstanding save checks. For editor teardown, not for close.
    pub async fn shutdown(&mut self) {
        self.eligibility.shutdown().await;
    }

    /// Point the editor at `group` (or nothing) and reset the widgets from it.
    /// Returns false when the group is not in the store.
    fn bind(&mut self, store: &dyn TabGroupStore, group: Option<TabGroupId>) -> bool {
        let bound = match group {
            Some(id) => match store.tab_group(id) {
                Some(bound) => Some(bound),
                None => {
                    warn!("tab_group_editor: cannot open for missing tab group {id:?}");
                    return false;
                },
            },
            None => None,
        };

        self.name_field.clear();
        if let Some(bound) = bound {
            self.name_field.push_str(&bound.label);
        }
        self.swatches.populate();
        self.swatches.check(bound.map(|bound| bound.color));
        self.actions = EditorActionState::default();
        self.active_group = group;
        self.name_field_focused = false;
        if group.is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        true
    }

    /// Reopening while the previous popup has not reported hidden yet: settle
    /// the previous binding now and swallow its late hidden report.
    fn supersede_open_popup(&mut self, ctx: &mut EditorContext<'_>) {
        let Some(previous) = self.active_group else {
            return;
        };
        debug!("tab_group_editor: reopened before {previous:?} was hidden");
        self.finish_binding(ctx);
        self.superseded_hides += 1;
    }

    fn open_popup(&mut self, ctx: &mut EditorContext<'_>, group: TabGroupId) {
        let position = PopupPosition::for_orientation(ctx.store.orientation());
        ctx.host.open_popup(PopupAnchor::GroupLabel(group), position);
    }

    fn action_target(&self, action: EditorAction) -> Option<TabGroupId> {
        let Some(group) = self.active_group else {
            debug!("tab_group_editor: {action:?} ignored, no group bound");
            return None;
        };
        if self.mode != EditorMode::Edit {
            debug!("tab_group_editor: {action:?} ignored outside edit mode");
            return None;
        }
        if !self.actions.is_enabled(action) {
            debug!("tab_group_editor: {action:?} ignored while disabled");
            return None;
        }
        Some(group)
    }
}
