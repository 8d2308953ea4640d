use serde::{Deserialize, Serialize};
use shared::models::{Character, Creator};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: i64 },
}

/// Read-only lookups over the character and creator catalog.
pub trait CatalogStore: Send + Sync {
    fn list_characters(&self) -> Vec<Character>;
    fn list_creators(&self) -> Vec<Creator>;
    /// Characters whose name contains `query`, ignoring case. An empty query
    /// matches every character.
    fn search_characters(&self, query: &str) -> Vec<Character>;
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct StaticCatalog {
    #[serde(default)]
    characters: Vec<Character>,
    #[serde(default)]
    creators: Vec<Creator>,
}

impl StaticCatalog {
    pub fn new(characters: Vec<Character>, creators: Vec<Creator>) -> CatalogResult<Self> {
        ensure_unique("character", characters.iter().map(|c| c.id))?;
        ensure_unique("creator", creators.iter().map(|c| c.id))?;
        Ok(Self {
            characters,
            creators,
        })
    }

    /// The built-in Hyrule catalog.
    pub fn seed() -> Self {
        Self {
            characters: vec![
                Character::new(1, "Link", "The hero of Hyrule, a courageous swordsman."),
                Character::new(
                    2,
                    "Zelda",
                    "The princess of Hyrule, bearer of the Triforce of Wisdom.",
                ),
                Character::new(
                    3,
                    "Ganon",
                    "The primary antagonist, seeking to conquer Hyrule.",
                ),
            ],
            creators: vec![
                Creator::new(1, "Shigeru Miyamoto", "Producer"),
                Creator::new(2, "Eiji Aonuma", "Director"),
            ],
        }
    }

    /// Load a catalog from a JSON file of the form
    /// `{"characters": [...], "creators": [...]}`.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CatalogResult<Self> {
        let raw: StaticCatalog = serde_json::from_str(content)?;
        Self::new(raw.characters, raw.creators)
    }
}

fn ensure_unique(kind: &'static str, ids: impl Iterator<Item = i64>) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

impl CatalogStore for StaticCatalog {
    fn list_characters(&self) -> Vec<Character> {
        self.characters.clone()
    }

    fn list_creators(&self) -> Vec<Creator> {
        self.creators.clone()
    }

    fn search_characters(&self, query: &str) -> Vec<Character> {
        let needle = query.to_lowercase();
        self.characters
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
