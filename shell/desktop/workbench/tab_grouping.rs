/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashSet;

use rand::Rng;

use crate::model::tab_group::{TabGroup, TabGroupColor};
use crate::services::tab_strip::TabGroupStore;

/// Color for a group about to be created.
///
/// Picks the first palette color no existing group uses. Once all nine are
/// taken the pick is uniformly random.
pub fn next_unused_color(store: &dyn TabGroupStore) -> TabGroupColor {
    let used = store.all_tab_groups().into_iter().map(|group| group.color);
    next_unused_color_from(used, &mut rand::thread_rng())
}

pub(crate) fn next_unused_color_from<R: Rng + ?Sized>(
    used: impl IntoIterator<Item = TabGroupColor>,
    rng: &mut R,
) -> TabGroupColor {
    let used: HashSet<TabGroupColor> = used.into_iter().collect();
    TabGroupColor::ALL
        .into_iter()
        .find(|color| !used.contains(color))
        .unwrap_or_else(|| TabGroupColor::ALL[rng.gen_range(0..TabGroupColor::ALL.len())])
}

/// True when `group` already holds every tab open in the window, which makes
/// moving it to a new window a no-op.
pub fn group_spans_window(store: &dyn TabGroupStore, group: &TabGroup) -> bool {
    store.open_tab_count() == group.tabs.len()
}
