//! Share session: the one piece of mutable link state.
//!
//! A session tracks the link currently displayed for a scope, rejects a
//! second create/update while one is outstanding, applies permission
//! changes optimistically with revert on failure, and keeps a short-lived
//! "copied" flag after the URL is copied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, warn};

use ats_core::error::AppError;
use ats_core::result::AppResult;
use ats_entity::link::{LinkScope, ShareableLink};
use ats_entity::permission::PermissionLevel;

use super::clipboard::Clipboard;
use crate::error::LinkError;
use crate::link::{EnsureOutcome, LinkController};

#[derive(Debug, Default)]
struct SessionState {
    current: Option<ShareableLink>,
    copied_at: Option<Instant>,
    /// Bumped whenever a create or update writes `current`.
    actions: u64,
}

impl SessionState {
    fn record_action(&mut self, link: ShareableLink) {
        self.current = Some(link);
        self.actions += 1;
    }
}

/// Clears the in-flight flag when the request finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, LinkError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| LinkError::RequestInFlight)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Share state for one scope.
#[derive(Debug)]
pub struct ShareSession {
    controller: Arc<LinkController>,
    scope: LinkScope,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
    copied_feedback: Duration,
}

impl ShareSession {
    /// Creates a session for `scope` with nothing displayed yet.
    pub fn new(controller: Arc<LinkController>, scope: LinkScope, copied_feedback: Duration) -> Self {
        Self {
            controller,
            scope,
            state: Mutex::new(SessionState::default()),
            in_flight: AtomicBool::new(false),
            copied_feedback,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Scope this session manages.
    pub fn scope(&self) -> LinkScope {
        self.scope
    }

    /// The link currently displayed.
    pub fn current(&self) -> Option<ShareableLink> {
        self.state().current.clone()
    }

    /// True while a create or update is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Discover the existing link for the scope.
    ///
    /// Background reconciliation: a backend failure leaves the displayed
    /// link untouched and is only logged. The listing is discarded if a
    /// create or update is outstanding, or completed while it was pending.
    pub async fn refresh(&self) -> Option<ShareableLink> {
        if self.is_busy() {
            debug!(scope = %self.scope, "Skipping refresh while a request is in flight");
            return self.current();
        }
        let seen = self.state().actions;

        let listing = self.controller.list_links(Some(&self.scope)).await;
        if !listing.is_available() {
            return self.current();
        }

        let resolved = listing.active_for(&self.scope, Utc::now()).cloned();
        let mut state = self.state();
        if self.is_busy() || state.actions != seen {
            debug!(scope = %self.scope, "Discarding stale refresh");
            return state.current.clone();
        }
        state.current = resolved.clone();
        resolved
    }

    /// Create a link for the scope, or surface the existing one.
    pub async fn generate(&self, requested: PermissionLevel) -> Result<EnsureOutcome, LinkError> {
        let _guard = InFlight::acquire(&self.in_flight)?;

        let outcome = self.controller.ensure_link(self.scope, requested).await?;
        if outcome.is_duplicate() {
            warn!(
                link_id = %outcome.link().id,
                scope = %self.scope,
                "An active link already exists for this scope"
            );
        }

        self.state().record_action(outcome.link().clone());
        Ok(outcome)
    }

    /// Change the displayed link's tier.
    ///
    /// The new tier is shown immediately; if the backend rejects it the
    /// last known-good tier is restored and the error returned.
    pub async fn change_permission(&self, level: PermissionLevel) -> Result<ShareableLink, LinkError> {
        let _guard = InFlight::acquire(&self.in_flight)?;

        let previous = {
            let mut state = self.state();
            let Some(current) = state.current.as_mut() else {
                return Err(LinkError::NoActiveLink(self.scope));
            };
            let previous = current.clone();
            current.permission_level = level;
            state.actions += 1;
            previous
        };

        match self.controller.update_permission(&previous, level).await {
            Ok(updated) => {
                self.state().record_action(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                let mut state = self.state();
                if let Some(current) = state.current.as_mut() {
                    if current.id == previous.id {
                        current.permission_level = previous.permission_level;
                    }
                }
                state.actions += 1;
                Err(e)
            }
        }
    }

    /// Copy the displayed URL and raise the "copied" flag.
    pub fn copy(&self, clipboard: &dyn Clipboard) -> AppResult<String> {
        self.copy_at(clipboard, Instant::now())
    }

    /// [`copy`](Self::copy) with an explicit clock reading.
    pub fn copy_at(&self, clipboard: &dyn Clipboard, now: Instant) -> AppResult<String> {
        let url = self
            .open_url()
            .ok_or_else(|| AppError::from(LinkError::NoActiveLink(self.scope)))?;
        clipboard.copy_text(&url)?;
        self.state().copied_at = Some(now);
        Ok(url)
    }

    /// True for a short while after a successful copy.
    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }

    /// [`is_copied`](Self::is_copied) with an explicit clock reading.
    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.state()
            .copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.copied_feedback)
    }

    /// URL to open in a new tab.
    pub fn open_url(&self) -> Option<String> {
        self.state().current.as_ref().map(|link| link.full_url.clone())
    }
}
