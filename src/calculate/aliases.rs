//! Player alias resolution.
//!
//! Players change their lobby display name over a tournament. An
//! `AliasTable` maps every known alias back to one canonical identity so
//! statistics from all of a player's names are aggregated together.
//! The table is built and validated once, then shared read-only.

use std::collections::HashMap;

use thiserror::Error;

/// Alias table construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("canonical name '{canonical}' is also listed as an alias of '{owner}'")]
    CanonicalIsAlias { canonical: String, owner: String },

    #[error("alias table contains an empty name")]
    EmptyName,
}

/// Immutable canonical → aliases mapping with its reverse index.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Canonical name → aliases, in declaration order
    aliases: HashMap<String, Vec<String>>,
    /// Alias → canonical name
    canonical_by_alias: HashMap<String, String>,
}

impl AliasTable {
    /// A table with no known aliases; every name is its own identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(canonical, aliases)` entries.
    ///
    /// Fails if an alias maps to two different canonical names, or a
    /// canonical name appears as another player's alias.
    pub fn from_entries<I, S, A>(entries: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (S, A)>,
        S: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let mut aliases: HashMap<String, Vec<String>> = HashMap::new();
        let mut canonical_by_alias: HashMap<String, String> = HashMap::new();

        for (canonical, names) in entries {
            let canonical = canonical.into().trim().to_string();
            if canonical.is_empty() {
                return Err(AliasError::EmptyName);
            }

            let list = aliases.entry(canonical.clone()).or_default();
            for alias in names {
                let alias = alias.into().trim().to_string();
                if alias.is_empty() {
                    return Err(AliasError::EmptyName);
                }
                if let Some(existing) = canonical_by_alias.get(&alias) {
                    if *existing != canonical {
                        return Err(AliasError::ConflictingAlias {
                            alias,
                            first: existing.clone(),
                            second: canonical,
                        });
                    }
                    continue;
                }
                canonical_by_alias.insert(alias.clone(), canonical.clone());
                list.push(alias);
            }
        }

        for (alias, owner) in &canonical_by_alias {
            if alias != owner && aliases.contains_key(alias) {
                return Err(AliasError::CanonicalIsAlias {
                    canonical: alias.clone(),
                    owner: owner.clone(),
                });
            }
        }

        Ok(Self {
            aliases,
            canonical_by_alias,
        })
    }

    /// Canonical identity of `name`; unknown names are returned unchanged.
    pub fn canonicalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.canonical_by_alias
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Every known alias of the identity behind `name`, or just `[name]`.
    pub fn aliases_of(&self, name: &str) -> Vec<String> {
        let canonical = self.canonicalize(name);
        match self.aliases.get(canonical) {
            Some(list) if !list.is_empty() => list.clone(),
            _ => vec![name.to_string()],
        }
    }

    /// Whether two display names belong to the same player.
    pub fn is_same_player(&self, a: &str, b: &str) -> bool {
        self.canonicalize(a) == self.canonicalize(b)
    }

    /// Number of canonical identities.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
