//! Composite grouping keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player identity within a team: (canonical name, team name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerKey {
    pub canonical: String,
    pub team: String,
}

impl PlayerKey {
    pub fn new(canonical: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            team: team.into(),
        }
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.canonical, self.team)
    }
}

/// The three heroes of a squad, sorted ascending.
///
/// Equality and hashing are over the sorted triple, so any permutation
/// of the same picks yields the same key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositionKey([String; 3]);

impl CompositionKey {
    /// Build a key from three hero names in any order.
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        let mut heroes = [a.into(), b.into(), c.into()];
        heroes.sort();
        Self(heroes)
    }

    /// Build a key from a squad's heroes; `None` unless exactly three.
    pub fn from_heroes<I, S>(heroes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = heroes.into_iter();
        let a = iter.next()?;
        let b = iter.next()?;
        let c = iter.next()?;
        if iter.next().is_some() {
            return None;
        }
        Some(Self::new(a, b, c))
    }

    /// Heroes in sorted order.
    pub fn heroes(&self) -> &[String; 3] {
        &self.0
    }
}

impl fmt::Display for CompositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl fmt::Debug for CompositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositionKey({})", self)
    }
}
