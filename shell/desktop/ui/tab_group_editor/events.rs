/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crossbeam_channel::{Receiver, Sender};

use crate::model::tab_group::TabGroupId;

/// Notifications for toasts and other panels. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabGroupEditorEvent {
    /// The create flow finished and kept the new group.
    CreateCommitted(TabGroupId),
    /// The group was saved and closed from the editor.
    Saved(TabGroupId),
}

#[derive(Debug, Default)]
pub struct EditorEventBus {
    subscribers: Vec<Sender<TabGroupEditorEvent>>,
}

impl EditorEventBus {
    pub fn subscribe(&mut self) -> Receiver<TabGroupEditorEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: TabGroupEditorEvent) {
        self.subscribers.retain(|subscriber| subscriber.send(event).is_ok());
        log::debug!(
            "tab_group_editor: emitted {event:?} to {} subscribers",
            self.subscribers.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
