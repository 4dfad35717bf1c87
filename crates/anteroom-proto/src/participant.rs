//! Participants and roster snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable participant identifier assigned by the session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Session role of a participant.
///
/// Only `moderator` confers privileges. Any other role string reported by
/// the provider (`none`, `visitor`, ...) is an ordinary participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// May accept or reject other participants.
    Moderator,
    /// Everyone else.
    #[default]
    Participant,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Participant => "participant",
        }
    }

    /// Whether this role may admit others.
    pub fn is_moderator(self) -> bool {
        matches!(self, Self::Moderator)
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        if role.eq_ignore_ascii_case("moderator") { Self::Moderator } else { Self::Participant }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One session member as reported by the roster provider.
///
/// Replaced wholesale on every snapshot; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity of the participant.
    pub id: ParticipantId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current role.
    #[serde(default)]
    pub role: Role,
    /// True for exactly one entry: the participant running this session.
    #[serde(default, alias = "local")]
    pub is_local: bool,
}

impl Participant {
    /// Entry for the participant running this session.
    pub fn local(id: impl Into<ParticipantId>, name: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), name: name.into(), role, is_local: true }
    }

    /// Entry for any other session member.
    pub fn remote(id: impl Into<ParticipantId>, name: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), name: name.into(), role, is_local: false }
    }

    /// Whether this entry holds the moderator role.
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

/// Full, ordered participant snapshot.
///
/// The local participant is expected exactly once, but a partial snapshot
/// that omits it is still a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Participant>);

impl Roster {
    /// Empty roster.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in provider order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.0.iter()
    }

    /// Entries as a slice.
    pub fn participants(&self) -> &[Participant] {
        &self.0
    }

    /// First entry flagged local, if the snapshot carries one.
    pub fn local_participant(&self) -> Option<&Participant> {
        self.0.iter().find(|p| p.is_local)
    }

    /// True if any entry holds the moderator role.
    pub fn has_moderator(&self) -> bool {
        self.0.iter().any(Participant::is_moderator)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.0.iter().find(|p| &p.id == id)
    }

    /// True if an entry with this id is present.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some()
    }
}

impl From<Vec<Participant>> for Roster {
    fn from(participants: Vec<Participant>) -> Self {
        Self(participants)
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
