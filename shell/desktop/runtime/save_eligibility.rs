/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Async flush fan-out behind the tab group editor's save action.
//!
//! Before a group may be saved, the session layer has to hold current state
//! for every tab in it. [`SaveEligibilityChecker::spawn_check`] starts one
//! worker per check that flushes every tab concurrently and waits for all of
//! them to settle, failures included. The worker then posts a
//! [`FlushesSettled`] back over the result channel.
//!
//! The editor stays synchronous: it drains settled checks on its own thread
//! via [`SaveEligibilityChecker::drain_settled`] and decides there whether the
//! result still applies. Workers are never cancelled when the popup closes;
//! only [`SaveEligibilityChecker::shutdown`] stops them. Finished workers are
//! reaped on every spawn and drain.

use std::time::Duration;

use futures_util::future::{BoxFuture, join_all};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::model::tab_group::{TabGroupId, TabId};
use crate::services::session::SessionError;

/// One pending flush: the tab and the session future that settles it.
pub(crate) type PendingFlush = (TabId, BoxFuture<'static, Result<(), SessionError>>);

/// Outcome of one check, tagged with the editor generation that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushesSettled {
    pub generation: u64,
    pub group: TabGroupId,
    /// Tabs whose flush settled successfully.
    pub flushed: Vec<TabId>,
    /// Tabs whose flush failed or timed out.
    pub failed: Vec<TabId>,
}

pub struct SaveEligibilityChecker {
    result_tx: mpsc::UnboundedSender<FlushesSettled>,
    result_rx: mpsc::UnboundedReceiver<FlushesSettled>,
    runtime: Handle,
    flush_timeout: Duration,
    cancel: CancellationToken,
    workers: JoinSet<()>,
}

impl SaveEligibilityChecker {
    pub fn new(runtime: Handle, flush_timeout: Duration) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            result_tx,
            result_rx,
            runtime,
            flush_timeout,
            cancel: CancellationToken::new(),
            workers: JoinSet::new(),
        }
    }

    /// Start a check for `group`. Returns immediately.
    pub(crate) fn spawn_check(
        &mut self,
        generation: u64,
        group: TabGroupId,
        flushes: Vec<PendingFlush>,
    ) {
        self.reap_finished_workers();
        let cancel = self.cancel.clone();
        let tx = self.result_tx.clone();
        let flush_timeout = self.flush_timeout;
        let tab_count = flushes.len();
        self.workers.spawn_on(
            async move {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        log::debug!("save_eligibility: check for {group:?} cancelled");
                    }
                    settled = settle_all(generation, group, flushes, flush_timeout) => {
                        if let Err(e) = tx.send(settled) {
                            log::debug!("save_eligibility: result dropped ({e})");
                        }
                    }
                }
            },
            &self.runtime,
        );
        log::debug!(
            "save_eligibility: check #{generation} spawned for {group:?} ({tab_count} tabs)"
        );
    }

    /// Settled checks waiting to be applied (non-blocking).
    pub fn drain_settled(&mut self) -> Vec<FlushesSettled> {
        self.reap_finished_workers();
        let mut settled = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            settled.push(result);
        }
        settled
    }

    /// Wait for the next settled check.
    pub async fn next_settled(&mut self) -> Option<FlushesSettled> {
        let settled = self.result_rx.recv().await;
        self.reap_finished_workers();
        settled
    }

    /// Number of checks not yet reaped.
    pub fn in_flight(&self) -> usize {
        self.workers.len()
    }

    /// Cancel all running checks and wait for them to finish. Checks spawned
    /// afterwards run normally.
    pub async fn shutdown(&mut self) {
        log::debug!(
            "save_eligibility: shutdown requested, cancelling {} checks",
            self.workers.len()
        );
        self.cancel.cancel();
        while self.workers.join_next().await.is_some() {}
        self.cancel = CancellationToken::new();
        log::debug!("save_eligibility: all checks joined");
    }

    fn reap_finished_workers(&mut self) {
        while let Some(joined) = self.workers.try_join_next() {
            if let Err(e) = joined {
                log::warn!("save_eligibility: check worker failed ({e})");
            }
        }
    }
}

/// Await every flush, recording failures instead of short-circuiting.
async fn settle_all(
    generation: u64,
    group: TabGroupId,
    flushes: Vec<PendingFlush>,
    flush_timeout: Duration,
) -> FlushesSettled {
    let outcomes = join_all(flushes.into_iter().map(|(tab, flush)| async move {
        let outcome = match tokio::time::timeout(flush_timeout, flush).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::TimedOut(tab)),
        };
        (tab, outcome)
    }))
    .await;

    let mut settled = FlushesSettled {
        generation,
        group,
        flushed: Vec::new(),
        failed: Vec::new(),
    };
    for (tab, outcome) in outcomes {
        match outcome {
            Ok(()) => settled.flushed.push(tab),
            Err(e) => {
                log::debug!("save_eligibility: {e}");
                settled.failed.push(tab);
            },
        }
    }
    settled
}
