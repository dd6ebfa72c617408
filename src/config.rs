//! Weight-table configuration
//!
//! The analyser runs off four named tables: noun-phrase category weights,
//! connector meanings, verb meaning inference and value modifiers. They are
//! built once into an [`AnalyserConfig`] bundle and passed by reference into
//! every analysis; there is no lookup-by-name at runtime and nothing can
//! mutate them mid-run.
//!
//! The crate embeds a default data set (`data/meaning_weights.json`);
//! adding a word to a category is a data edit, not a code change. External
//! data loads through the same JSON schema: ordered category arrays (order
//! is the tie-break), pattern strings compiled to regexes up front.

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::balance::{
    Category, CategoryWeights, ModifierPatterns, ModifierTable, WeightRule, WeightTable,
};

const BUILTIN: &str = include_str!("../data/meaning_weights.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid weight config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid pattern `{pattern}` for `{entry}`: {source}")]
    Pattern {
        entry: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ---------------------------------------------------------------------------
// JSON schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawConfig {
    noun_categories: RawTable,
    connector_meanings: RawTable,
    verb_meanings: RawTable,
    value_modifiers: Vec<RawModifier>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    default: Option<Category>,
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    category: Category,
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    pattern: String,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct RawModifier {
    modifier: String,
    patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Compiled bundle
// ---------------------------------------------------------------------------

/// The four tables driving one analyser run, compiled and immutable.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Categorizes a noun phrase's own text.
    pub noun_categories: WeightTable,
    /// Bias from the connector words preceding a noun phrase.
    pub connector_meanings: WeightTable,
    /// Bias from the verb phrase preceding a noun phrase.
    pub verb_meanings: WeightTable,
    /// Modifier labels matched against the connector queue.
    pub value_modifiers: ModifierTable,
}

impl AnalyserConfig {
    /// The embedded default data set.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN).expect("Invalid builtin weight data")
    }

    /// Build a bundle from external JSON data.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self {
            noun_categories: build_table(raw.noun_categories)?,
            connector_meanings: build_table(raw.connector_meanings)?,
            verb_meanings: build_table(raw.verb_meanings)?,
            value_modifiers: build_modifiers(raw.value_modifiers)?,
        })
    }
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile(entry: &str, pattern: String) -> Result<Regex, ConfigError> {
    Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
        entry: entry.to_string(),
        pattern,
        source,
    })
}

fn build_table(raw: RawTable) -> Result<WeightTable, ConfigError> {
    let mut entries = Vec::with_capacity(raw.categories.len());
    for category in raw.categories {
        let mut rules = Vec::with_capacity(category.rules.len());
        for rule in category.rules {
            rules.push(WeightRule {
                pattern: compile(category.category.name(), rule.pattern)?,
                weight: rule.weight,
            });
        }
        entries.push(CategoryWeights {
            category: category.category,
            rules,
        });
    }
    Ok(WeightTable::new(entries, raw.default))
}

fn build_modifiers(raw: Vec<RawModifier>) -> Result<ModifierTable, ConfigError> {
    let mut entries = Vec::with_capacity(raw.len());
    for modifier in raw {
        let mut patterns = Vec::with_capacity(modifier.patterns.len());
        for pattern in modifier.patterns {
            patterns.push(compile(&modifier.modifier, pattern)?);
        }
        entries.push(ModifierPatterns {
            label: modifier.modifier,
            patterns,
        });
    }
    Ok(ModifierTable::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads_and_defaults_to_item() {
        let config = AnalyserConfig::builtin();
        assert_eq!(
            config.noun_categories.default_category(),
            Some(Category::Item)
        );
        assert_eq!(
            config.noun_categories.categorize("tomorrow", None),
            Some(Category::Time)
        );
        // Unmatched text falls back to the declared default.
        assert_eq!(
            config.noun_categories.categorize("the hammer", None),
            Some(Category::Item)
        );
    }

    #[test]
    fn test_builtin_modifiers() {
        let config = AnalyserConfig::builtin();
        assert_eq!(
            config.value_modifiers.match_modifier("before"),
            Some("before".to_string())
        );
        assert_eq!(
            config.value_modifiers.match_modifier("around"),
            Some("approximately".to_string())
        );
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = AnalyserConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_pattern_names_the_entry() {
        let json = r#"{
            "noun_categories": {
                "default": "item",
                "categories": [
                    { "category": "time", "rules": [ { "pattern": "(", "weight": 1.0 } ] }
                ]
            },
            "connector_meanings": { "categories": [] },
            "verb_meanings": { "categories": [] },
            "value_modifiers": []
        }"#;
        let err = AnalyserConfig::from_json(json).unwrap_err();
        match err {
            ConfigError::Pattern { entry, pattern, .. } => {
                assert_eq!(entry, "time");
                assert_eq!(pattern, "(");
            }
            other => panic!("expected pattern error, got {other:?}"),
        }
    }
}
