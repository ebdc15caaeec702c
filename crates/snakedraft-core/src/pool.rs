// Draft pool loading and lookup.
//
// Reads the priced pool CSV (`dex,name,types,bst,points,tier`) once at
// startup. Every row is validated up front so that a malformed file fails
// before the first turn instead of in the middle of the draft.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::info;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One draftable entry in the pool. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolItem {
    /// Catalog number, if the source file carries one.
    pub dex: Option<u32>,
    pub name: String,
    /// Display-only type tags (e.g. "water/flying").
    pub types: String,
    /// Base stat total. Only used as a sort tie-break.
    pub strength: u32,
    /// Price in draft points. Always positive.
    pub cost: u32,
    /// Single uppercase letter price bracket.
    pub tier: char,
}

impl PoolItem {
    /// Case-folded lookup key for this item.
    pub fn key(&self) -> String {
        pool_key(&self.name)
    }
}

impl fmt::Display for PoolItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} pts)", self.name, self.tier, self.cost)
    }
}

/// Normalize a user-supplied or file-supplied name into a pool key.
pub fn pool_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read pool file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("malformed row in {path} at line {line}: {source}")]
    Row {
        path: String,
        line: u64,
        source: csv::Error,
    },

    #[error("invalid row in {path} at line {line}: {message}")]
    Invalid {
        path: String,
        line: u64,
        message: String,
    },

    #[error("pool file {path} contains no items")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One pool CSV row. Extra columns are ignored; `dex` and `types` are
/// optional. `bst` and `points` must be unsigned integers.
#[derive(Debug, Deserialize)]
struct RawPoolRow {
    #[serde(default)]
    dex: Option<u32>,
    name: String,
    #[serde(default)]
    types: String,
    bst: u32,
    points: u32,
    tier: String,
}

fn parse_tier(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Pool index
// ---------------------------------------------------------------------------

/// The loaded pool: items in file order plus a case-folded name index.
#[derive(Debug, Clone, Default)]
pub struct PoolIndex {
    items: Vec<PoolItem>,
    by_key: HashMap<String, usize>,
}

impl PoolIndex {
    /// Load and validate the pool from a CSV file.
    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let origin = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
            path: origin.clone(),
            source: e,
        })?;
        let index = Self::from_reader(file, &origin)?;
        info!("Loaded {} pool items from {}", index.len(), origin);
        Ok(index)
    }

    /// Parse a pool from any reader. `origin` names the source in errors.
    pub fn from_reader<R: Read>(rdr: R, origin: &str) -> Result<Self, PoolError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader
            .headers()
            .map_err(|e| PoolError::Csv {
                path: origin.to_string(),
                source: e,
            })?
            .clone();

        let mut index = PoolIndex::default();
        let mut record = csv::StringRecord::new();

        loop {
            let more = reader
                .read_record(&mut record)
                .map_err(|e| PoolError::Csv {
                    path: origin.to_string(),
                    source: e,
                })?;
            if !more {
                break;
            }
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw: RawPoolRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| PoolError::Row {
                        path: origin.to_string(),
                        line,
                        source: e,
                    })?;

            let invalid = |message: String| PoolError::Invalid {
                path: origin.to_string(),
                line,
                message,
            };

            if raw.name.is_empty() {
                return Err(invalid("empty name".into()));
            }
            if raw.points == 0 {
                return Err(invalid(format!("'{}' has zero points", raw.name)));
            }
            let tier = parse_tier(&raw.tier).ok_or_else(|| {
                invalid(format!(
                    "'{}' has tier '{}', expected a single letter",
                    raw.name, raw.tier
                ))
            })?;

            let item = PoolItem {
                dex: raw.dex,
                name: raw.name,
                types: raw.types,
                strength: raw.bst,
                cost: raw.points,
                tier,
            };
            let key = item.key();
            if index.by_key.contains_key(&key) {
                return Err(invalid(format!("duplicate name '{}'", item.name)));
            }
            index.by_key.insert(key, index.items.len());
            index.items.push(item);
        }

        if index.items.is_empty() {
            return Err(PoolError::Empty {
                path: origin.to_string(),
            });
        }

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in file order.
    pub fn iter(&self) -> impl Iterator<Item = &PoolItem> {
        self.items.iter()
    }

    /// Case-insensitive exact-name lookup. No fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&PoolItem> {
        self.by_key.get(&pool_key(name)).map(|&i| &self.items[i])
    }

    /// Items matching `predicate`, most expensive first.
    ///
    /// Ordering is cost descending, then strength descending, then name
    /// ascending so equal-priced rows always list the same way. `limit`
    /// caps the number of rows returned.
    pub fn filter_sorted<F>(&self, predicate: F, limit: Option<usize>) -> Vec<&PoolItem>
    where
        F: Fn(&PoolItem) -> bool,
    {
        let mut matches: Vec<&PoolItem> = self.items.iter().filter(|&p| predicate(p)).collect();
        matches.sort_by(|a, b| {
            b.cost
                .cmp(&a.cost)
                .then_with(|| b.strength.cmp(&a.strength))
                .then_with(|| a.name.cmp(&b.name))
        });
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
