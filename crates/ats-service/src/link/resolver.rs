//! Active link resolution.

use chrono::{DateTime, Utc};

use ats_entity::link::{LinkScope, ShareableLink};

/// Pick the link an admin should see for `scope` at `now`.
///
/// Only links in exactly this scope are considered; a global link never
/// stands in for a job and vice versa. Expired links are skipped. Among
/// the rest the newest `created_at` wins, then the highest id.
pub fn resolve_active_link<'a>(
    scope: &LinkScope,
    links: &'a [ShareableLink],
    now: DateTime<Utc>,
) -> Option<&'a ShareableLink> {
    links
        .iter()
        .filter(|link| link.in_scope(scope))
        .filter(|link| link.is_active_at(now))
        .max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
}
