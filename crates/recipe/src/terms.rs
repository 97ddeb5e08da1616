use std::path::Path;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub stem: String,
    pub synonyms: Vec<String>,
}

impl TermEntry {
    pub fn new(stem: &str, synonyms: &[&str]) -> Self {
        Self {
            stem: stem.to_owned(),
            synonyms: synonyms.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn normalized(self) -> Self {
        Self {
            stem: normalize(&self.stem),
            synonyms: self.synonyms.iter().map(|s| normalize(s)).collect(),
        }
    }
}

/// Bilingual ingredient vocabulary.
///
/// `to_secondary` maps German stems to English synonyms, `to_primary` the
/// other way round. A lookup matches every entry whose stem is a substring
/// of the queried term; the longest such stem wins, ties go to the entry
/// listed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermTable {
    #[serde(default)]
    pub to_secondary: Vec<TermEntry>,
    #[serde(default)]
    pub to_primary: Vec<TermEntry>,
}

impl TermTable {
    pub fn new(to_secondary: Vec<TermEntry>, to_primary: Vec<TermEntry>) -> Self {
        Self {
            to_secondary: to_secondary.into_iter().map(TermEntry::normalized).collect(),
            to_primary: to_primary.into_iter().map(TermEntry::normalized).collect(),
        }
    }

    /// Reads a table from a TOML or JSON file, format picked by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let table: TermTable = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            to_secondary = table.to_secondary.len(),
            to_primary = table.to_primary.len(),
            "term table loaded"
        );

        Ok(Self::new(table.to_secondary, table.to_primary))
    }

    pub fn expand_to_secondary(&self, term: &str) -> &[String] {
        lookup(&self.to_secondary, term)
    }

    pub fn expand_to_primary(&self, term: &str) -> &[String] {
        lookup(&self.to_primary, term)
    }

    /// The term itself plus its synonyms in both directions.
    pub fn match_set<'a>(&'a self, term: &'a str) -> Vec<&'a str> {
        let mut set = vec![term];
        for synonym in self
            .expand_to_secondary(term)
            .iter()
            .chain(self.expand_to_primary(term))
        {
            if !set.contains(&synonym.as_str()) {
                set.push(synonym);
            }
        }

        set
    }
}

fn lookup<'a>(entries: &'a [TermEntry], term: &str) -> &'a [String] {
    let mut best: Option<&TermEntry> = None;
    for entry in entries {
        if !crate::normalize::contains(term, &entry.stem) {
            continue;
        }

        if best.is_none_or(|b| entry.stem.len() > b.stem.len()) {
            best = Some(entry);
        }
    }

    best.map(|e| e.synonyms.as_slice()).unwrap_or_default()
}

impl Default for TermTable {
    fn default() -> Self {
        Self::new(
            vec![
                TermEntry::new("eier", &["eggs", "egg"]),
                TermEntry::new("nudeln", &["pasta", "noodles", "spaghetti", "macaroni"]),
                TermEntry::new("tomaten", &["tomato", "tomatoes"]),
                TermEntry::new("schinken", &["ham", "prosciutto"]),
                TermEntry::new("pesto", &["pesto"]),
                TermEntry::new("thunfisch", &["tuna", "tuna fish"]),
                TermEntry::new("spaghetti", &["spaghetti", "pasta"]),
                TermEntry::new("käse", &["cheese"]),
                TermEntry::new("zwiebeln", &["onion", "onions"]),
                TermEntry::new("knoblauch", &["garlic"]),
                TermEntry::new("olivenöl", &["olive oil"]),
                TermEntry::new("salz", &["salt"]),
                TermEntry::new("pfeffer", &["pepper"]),
                TermEntry::new("kartoffeln", &["potato", "potatoes"]),
                TermEntry::new("reis", &["rice"]),
            ],
            vec![
                TermEntry::new("eggs", &["eier", "ei"]),
                TermEntry::new("egg", &["eier", "ei"]),
                TermEntry::new("pasta", &["nudeln", "pasta", "spaghetti"]),
                TermEntry::new("noodles", &["nudeln"]),
                TermEntry::new("tomatoes", &["tomaten", "tomate"]),
                TermEntry::new("tomato", &["tomaten", "tomate"]),
                TermEntry::new("ham", &["schinken"]),
                TermEntry::new("tuna", &["thunfisch"]),
                TermEntry::new("spaghetti", &["spaghetti"]),
                TermEntry::new("cheese", &["käse"]),
                TermEntry::new("onions", &["zwiebeln", "zwiebel"]),
                TermEntry::new("onion", &["zwiebel", "zwiebeln"]),
                TermEntry::new("garlic", &["knoblauch"]),
                TermEntry::new("olive oil", &["olivenöl"]),
                TermEntry::new("salt", &["salz"]),
                TermEntry::new("pepper", &["pfeffer"]),
                TermEntry::new("potatoes", &["kartoffeln", "kartoffel"]),
                TermEntry::new("potato", &["kartoffel", "kartoffeln"]),
                TermEntry::new("rice", &["reis"]),
            ],
        )
    }
}
