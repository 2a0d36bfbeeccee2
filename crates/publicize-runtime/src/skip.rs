use crate::boundary::SkipWriter;
use crate::reconcile::Reconciliation;
use crate::Result;
use log::debug;
use publicize_format::{ConnectionId, PostId};
use serde::Serialize;

/// Write issued for one connection while syncing skip records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum SkipAction {
    /// A skip record was set; the post will not be shared there.
    Set(ConnectionId),
    /// Any skip record was cleared; the post will be shared there.
    Clear(ConnectionId),
}

impl SkipAction {
    /// Connection the write applied to.
    pub fn connection_id(&self) -> &ConnectionId {
        match self {
            SkipAction::Set(id) | SkipAction::Clear(id) => id,
        }
    }
}

/// Bring the post's skip records in line with a reconciliation.
///
/// Every connection gets exactly one write, changed or not, so the stored
/// records always mirror the reconciled state. A writer error stops the pass.
pub fn sync_skip_records<W>(
    post_id: PostId,
    reconciliation: &Reconciliation,
    writer: &W,
) -> Result<Vec<SkipAction>>
where
    W: SkipWriter + ?Sized,
{
    let mut actions = Vec::with_capacity(reconciliation.len());

    for entry in reconciliation {
        if entry.enabled {
            writer.clear_skip(post_id, &entry.id)?;
            actions.push(SkipAction::Clear(entry.id.clone()));
        } else {
            writer.set_skip(post_id, &entry.id)?;
            actions.push(SkipAction::Set(entry.id.clone()));
        }
    }

    debug!(
        "Synced {} skip records for post {}",
        actions.len(),
        post_id
    );

    Ok(actions)
}
