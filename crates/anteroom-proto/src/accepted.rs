//! Accepted-list snapshots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// One entry of the accepted list as delivered by the source.
///
/// The source reports either bare ids or objects carrying an `id`; both
/// resolve to the same [`ParticipantId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcceptedEntry {
    /// Bare identifier.
    Id(ParticipantId),
    /// Object with an `id` field; other fields are ignored.
    Object {
        /// Accepted participant.
        id: ParticipantId,
    },
}

impl AcceptedEntry {
    /// The accepted participant id, whatever the entry shape.
    pub fn id(&self) -> &ParticipantId {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }

    /// Consume the entry, yielding the id.
    pub fn into_id(self) -> ParticipantId {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// Ids a moderator has explicitly admitted.
///
/// Grows monotonically at the source during a session. Duplicates in the
/// delivered list collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AcceptedEntry>", into = "Vec<ParticipantId>")]
pub struct AcceptedSet(BTreeSet<ParticipantId>);

impl AcceptedSet {
    /// Empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// True if `id` has been accepted.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.0.contains(id)
    }

    /// Number of distinct accepted ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nobody has been accepted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Accepted ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.0.iter()
    }
}

impl From<Vec<AcceptedEntry>> for AcceptedSet {
    fn from(entries: Vec<AcceptedEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<AcceptedSet> for Vec<ParticipantId> {
    fn from(set: AcceptedSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl FromIterator<AcceptedEntry> for AcceptedSet {
    fn from_iter<I: IntoIterator<Item = AcceptedEntry>>(iter: I) -> Self {
        Self(iter.into_iter().map(AcceptedEntry::into_id).collect())
    }
}

impl FromIterator<ParticipantId> for AcceptedSet {
    fn from_iter<I: IntoIterator<Item = ParticipantId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for AcceptedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(ParticipantId::from).collect())
    }
}
