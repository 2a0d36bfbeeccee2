use publicize_format::{Connection, ConnectionId, ConnectionRequest};
use serde::Serialize;
use std::collections::HashMap;

/// What happened to one connection during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No request targeted it, or the request matched the current value.
    Unchanged,
    /// `enabled` flipped.
    Changed,
    /// A request targeted it but the connection is done or not toggleable.
    Locked,
}

/// Final share intent of one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledConnection {
    /// Connection unique id.
    pub id: ConnectionId,
    /// `enabled` before the update.
    pub previous: bool,
    /// `enabled` after the update.
    pub enabled: bool,
    /// How the final value was reached.
    pub outcome: Outcome,
}

/// Final share intent for every connection of a snapshot, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Reconciliation {
    entries: Vec<ReconciledConnection>,
}

impl Reconciliation {
    /// Final `enabled` value for a connection.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.id.as_str() == id)
            .map(|entry| entry.enabled)
    }

    /// All entries in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &ReconciledConnection> {
        self.entries.iter()
    }

    /// Entries whose value flipped.
    pub fn changed(&self) -> impl Iterator<Item = &ReconciledConnection> {
        self.with_outcome(Outcome::Changed)
    }

    /// Entries whose requested change was dropped.
    pub fn locked(&self) -> impl Iterator<Item = &ReconciledConnection> {
        self.with_outcome(Outcome::Locked)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &ReconciledConnection> {
        self.entries
            .iter()
            .filter(move |entry| entry.outcome == outcome)
    }
}

impl<'a> IntoIterator for &'a Reconciliation {
    type Item = &'a ReconciledConnection;
    type IntoIter = std::slice::Iter<'a, ReconciledConnection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compute the final share intent of every available connection.
///
/// Service-scoped requests are applied first, then id-scoped requests, so an
/// id always beats a service name for the same connection regardless of the
/// order in the batch. Within each scope the last request wins. Requests that
/// match nothing are ignored, and connections that are done or not
/// toggleable keep their current value.
pub fn reconcile(available: &[Connection], requests: &[ConnectionRequest]) -> Reconciliation {
    let snapshot = index_snapshot(available);

    let mut pending: HashMap<&str, bool> = HashMap::new();

    for request in requests {
        let Some(service_name) = request.service_name.as_deref() else {
            continue;
        };
        for connection in snapshot
            .iter()
            .filter(|connection| connection.service_name == service_name)
        {
            pending.insert(connection.unique_id.as_str(), request.enabled);
        }
    }

    for request in requests {
        let Some(id) = request.id.as_ref() else {
            continue;
        };
        if let Some(connection) = snapshot.iter().find(|c| &c.unique_id == id) {
            pending.insert(connection.unique_id.as_str(), request.enabled);
        }
    }

    let entries = snapshot
        .iter()
        .map(|connection| {
            let previous = connection.enabled;
            let (enabled, outcome) = match pending.get(connection.unique_id.as_str()) {
                None => (previous, Outcome::Unchanged),
                Some(_) if !connection.is_mutable() => (previous, Outcome::Locked),
                Some(&requested) if requested == previous => (previous, Outcome::Unchanged),
                Some(&requested) => (requested, Outcome::Changed),
            };
            ReconciledConnection {
                id: connection.unique_id.clone(),
                previous,
                enabled,
                outcome,
            }
        })
        .collect();

    Reconciliation { entries }
}

/// One record per unique id: first position, last data.
fn index_snapshot(available: &[Connection]) -> Vec<&Connection> {
    let mut positions: HashMap<&ConnectionId, usize> = HashMap::new();
    let mut snapshot: Vec<&Connection> = Vec::with_capacity(available.len());

    for connection in available {
        match positions.get(&connection.unique_id).copied() {
            Some(index) => snapshot[index] = connection,
            None => {
                positions.insert(&connection.unique_id, snapshot.len());
                snapshot.push(connection);
            }
        }
    }

    snapshot
}
