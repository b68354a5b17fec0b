//! Score file discovery and match loading.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::{StorageConfig, StorageError};
use crate::models::{MatchData, MatchRecord};

/// Default glob for score files in the data directory.
pub const DEFAULT_SCORE_PATTERN: &str = "lobbies_*_scores.json";

/// Derive the score filename for a lobby page URL.
///
/// `https://host/lobbies/3/19882b` → `lobbies_3_19882b_scores.json`
pub fn score_filename_for_lobby(lobby_url: &str) -> Result<String, StorageError> {
    let url = Url::parse(lobby_url)
        .map_err(|e| StorageError::InvalidLobbyUrl(format!("{}: {}", lobby_url, e)))?;
    let re = Regex::new(r"^/lobbies/(\d+)/([a-f0-9]+)/?$")
        .map_err(|e| StorageError::InvalidLobbyUrl(e.to_string()))?;

    let caps = re
        .captures(url.path())
        .ok_or_else(|| StorageError::InvalidLobbyUrl(lobby_url.to_string()))?;
    Ok(format!("lobbies_{}_{}_scores.json", &caps[1], &caps[2]))
}

/// Find score files in `data_dir` matching a glob pattern, sorted by path.
pub fn discover_score_files(data_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, StorageError> {
    let full = data_dir.join(pattern);
    let mut paths: Vec<PathBuf> = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .collect();
    paths.sort();
    debug!("Discovered {} score files in {:?}", paths.len(), data_dir);
    Ok(paths)
}

/// Score files for the configured lobbies, or every file matching
/// `pattern` when no lobby URLs are configured.
pub fn resolve_score_files(
    config: &StorageConfig,
    pattern: &str,
    lobby_urls: &[String],
) -> Result<Vec<PathBuf>, StorageError> {
    if lobby_urls.is_empty() {
        return discover_score_files(&config.data_dir, pattern);
    }

    lobby_urls
        .iter()
        .map(|url| score_filename_for_lobby(url).map(|name| config.score_path(&name)))
        .collect()
}

/// Reader for one lobby score file.
pub struct MatchFileReader {
    path: PathBuf,
}

impl MatchFileReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every match of the file; a missing file yields no matches.
    pub fn read_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let data: MatchData = serde_json::from_str(&contents)?;

        debug!("Read {} matches from {:?}", data.matches.len(), self.path);
        Ok(data.matches)
    }
}

/// Counters describing one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub files_loaded: usize,
    pub files_missing: usize,
    pub files_failed: usize,
    pub duplicate_matches: usize,
    pub rejected_matches: usize,
}

/// Matches loaded from a set of score files.
#[derive(Debug, Clone, Default)]
pub struct LoadedMatches {
    pub matches: Vec<MatchRecord>,
    pub summary: LoadSummary,
}

/// Load, deduplicate and validate matches from score files, in order.
///
/// Missing files are skipped (the lobby has not been scraped yet) and
/// malformed files are skipped with a warning. A match id seen twice
/// keeps its first occurrence. Matches whose squads disagree on
/// placement are rejected.
pub fn load_matches(paths: &[PathBuf]) -> LoadedMatches {
    let mut summary = LoadSummary::default();
    let mut all: Vec<MatchRecord> = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        let reader = MatchFileReader::new(path.clone());
        if !reader.exists() {
            info!("[{}/{}] {:?}: not parsed yet", i + 1, paths.len(), path);
            summary.files_missing += 1;
            continue;
        }

        match reader.read_all() {
            Ok(matches) => {
                info!("[{}/{}] {:?}: {} matches", i + 1, paths.len(), path, matches.len());
                summary.files_loaded += 1;
                all.extend(matches);
            }
            Err(e) => {
                warn!("[{}/{}] {:?}: failed to load: {}", i + 1, paths.len(), path, e);
                summary.files_failed += 1;
            }
        }
    }

    let before = all.len();
    let deduped = dedup_by_id(all, |m| m.match_id.as_str());
    summary.duplicate_matches = before - deduped.len();

    let matches: Vec<MatchRecord> = deduped
        .into_iter()
        .filter(|m| match m.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejecting match: {}", e);
                summary.rejected_matches += 1;
                false
            }
        })
        .collect();

    info!(
        "Loaded {} matches from {} files",
        matches.len(),
        summary.files_loaded
    );
    LoadedMatches { matches, summary }
}

/// Keep the first item for every id.
pub fn dedup_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(id(item).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRecord;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_matches(path: &Path, matches: &[MatchRecord]) {
        let data = MatchData {
            matches: matches.to_vec(),
        };
        fs::write(path, serde_json::to_string(&data).unwrap()).unwrap();
    }

    fn sample(id: &str) -> MatchRecord {
        MatchRecord::new(id, "mp_rr_district_mu1")
            .with_player(PlayerRecord::new("a", "Wraith", "Alpha", "1", 2))
            .with_player(PlayerRecord::new("b", "Lifeline", "Alpha", "1", 2))
    }

    #[test]
    fn test_score_filename_for_lobby() {
        assert_eq!(
            score_filename_for_lobby("https://eternalesports.club/lobbies/3/19882b").unwrap(),
            "lobbies_3_19882b_scores.json"
        );
        assert_eq!(
            score_filename_for_lobby("https://eternalesports.club/lobbies/301/92bc2c/").unwrap(),
            "lobbies_301_92bc2c_scores.json"
        );
    }

    #[test]
    fn test_score_filename_invalid() {
        assert!(score_filename_for_lobby("not a url").is_err());
        assert!(score_filename_for_lobby("https://eternalesports.club/teams/3").is_err());
        assert!(score_filename_for_lobby("https://eternalesports.club/lobbies/x/zz").is_err());
    }

    #[test]
    fn test_discover_score_files_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["lobbies_5_c7d30f_scores.json", "lobbies_3_19882b_scores.json", "other.json"] {
            fs::write(tmp.path().join(name), "{}").unwrap();
        }

        let files = discover_score_files(tmp.path(), DEFAULT_SCORE_PATTERN).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["lobbies_3_19882b_scores.json", "lobbies_5_c7d30f_scores.json"]
        );
    }

    #[test]
    fn test_resolve_score_files_from_lobby_urls() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        let urls = vec!["https://eternalesports.club/lobbies/4/a91cce".to_string()];

        let files = resolve_score_files(&config, DEFAULT_SCORE_PATTERN, &urls).unwrap();
        assert_eq!(files, vec![PathBuf::from("/data/lobbies_4_a91cce_scores.json")]);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let reader = MatchFileReader::new(tmp.path().join("missing.json"));
        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_matches_in_file_order_with_dedup() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.json");
        let second = tmp.path().join("b.json");
        write_matches(&first, &[sample("m1"), sample("m2")]);
        write_matches(&second, &[sample("m2"), sample("m3")]);

        let loaded = load_matches(&[first, second, tmp.path().join("missing.json")]);
        let ids: Vec<_> = loaded.matches.iter().map(|m| m.match_id.as_str()).collect();

        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        assert_eq!(
            loaded.summary,
            LoadSummary {
                files_loaded: 2,
                files_missing: 1,
                files_failed: 0,
                duplicate_matches: 1,
                rejected_matches: 0,
            }
        );
    }

    #[test]
    fn test_load_matches_skips_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.json");
        let good = tmp.path().join("good.json");
        fs::write(&bad, "{ not json").unwrap();
        write_matches(&good, &[sample("m1")]);

        let loaded = load_matches(&[bad, good]);
        assert_eq!(loaded.matches.len(), 1);
        assert_eq!(loaded.summary.files_failed, 1);
    }

    #[test]
    fn test_load_matches_rejects_inconsistent_placement() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scores.json");
        let broken = MatchRecord::new("bad", "map")
            .with_player(PlayerRecord::new("a", "Wraith", "Alpha", "1", 2))
            .with_player(PlayerRecord::new("b", "Lifeline", "Alpha", "1", 5));
        write_matches(&path, &[broken, sample("ok")]);

        let loaded = load_matches(&[path]);
        assert_eq!(loaded.matches.len(), 1);
        assert_eq!(loaded.matches[0].match_id, "ok");
        assert_eq!(loaded.summary.rejected_matches, 1);
    }

    #[test]
    fn test_dedup_by_id_keeps_first() {
        let items = vec![("a", 1), ("b", 2), ("a", 3)];
        let deduped = dedup_by_id(items, |item| item.0);
        assert_eq!(deduped, vec![("a", 1), ("b", 2)]);
    }
}
