/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session persistence boundary.
//!
//! Session state for a tab is only trustworthy after its pending state has
//! been flushed; `flush` hands back a future that settles once that happened.

use futures_util::future::BoxFuture;

use crate::model::tab_group::{TabGroup, TabId};

/// Errors from the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The tab's content process failed to report its state.
    FlushFailed { tab: TabId, reason: String },
    /// The tab went away before its state could be collected.
    TabGone(TabId),
    /// The flush did not settle within the configured bound.
    TimedOut(TabId),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::FlushFailed { tab, reason } => {
                write!(f, "Flush failed for tab {}: {reason}", tab.index())
            },
            SessionError::TabGone(tab) => write!(f, "Tab {} closed before flush", tab.index()),
            SessionError::TimedOut(tab) => write!(f, "Flush timed out for tab {}", tab.index()),
        }
    }
}

impl std::error::Error for SessionError {}

pub trait SessionPersistence {
    /// Flush pending state for `tab`. The returned future must not borrow the
    /// session; it runs on the async runtime.
    fn flush(&self, tab: TabId) -> BoxFuture<'static, Result<(), SessionError>>;

    /// Whether the group's current state is worth persisting durably.
    fn should_save_tab_group(&self, group: &TabGroup) -> bool;
}
