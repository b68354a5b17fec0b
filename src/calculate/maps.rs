//! Map code → display name lookup.

use std::collections::HashMap;

/// Built-in display names for known map codes.
const BUILTIN_MAP_NAMES: &[(&str, &str)] = &[
    ("mp_rr_desertlands_hu", "World's Edge"),
    ("mp_rr_district_mu1", "District"),
    ("mp_rr_tropic_island_mu2", "Storm Point"),
    ("mp_rr_olympus_mu2", "Olympus"),
    ("mp_rr_canyonlands_hu", "Kings Canyon"),
    ("mp_rr_divided_moon_mu1", "Broken Moon"),
    ("mp_rr_freedm_skulltown", "Skull Town"),
];

/// Static map-name lookup. Unknown codes pass through unchanged.
#[derive(Debug, Clone)]
pub struct MapNames {
    names: HashMap<String, String>,
}

impl MapNames {
    /// Lookup with no entries at all.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Built-in names extended (or overridden) by `overrides`.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut maps = Self::default();
        for (code, name) in overrides {
            maps.names.insert(code.into(), name.into());
        }
        maps
    }

    /// Display name for a map code.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl Default for MapNames {
    fn default() -> Self {
        Self {
            names: BUILTIN_MAP_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }
}
