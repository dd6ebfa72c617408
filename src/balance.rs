//! Weighted categorizer - resolves a text fragment to a semantic category
//!
//! Several weak, independent signals (lexical cues inside the fragment,
//! connector words before it, a preceding verb's bias) combine additively
//! instead of through hard-coded precedence, so ambiguous noun phrases
//! ("bank", "spring", "call") resolve by accumulated context.

use ahash::AHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic role a noun phrase can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Time,
    Value,
    Item,
    Location,
    Person,
}

impl Category {
    /// Lowercase name as it appears in weight-table data.
    pub fn name(self) -> &'static str {
        match self {
            Category::Time => "time",
            Category::Value => "value",
            Category::Item => "item",
            Category::Location => "location",
            Category::Person => "person",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accumulated score per category for one classification call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores(AHashMap<Category, f64>);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, category: Category, weight: f64) {
        *self.0.entry(category).or_insert(0.0) += weight;
    }

    /// Add every entry of `other` into this vector.
    pub fn merge(&mut self, other: &Scores) {
        for (&category, &weight) in &other.0 {
            self.add(category, weight);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One piece of evidence: a pattern and the weight it contributes.
#[derive(Debug, Clone)]
pub struct WeightRule {
    pub pattern: Regex,
    pub weight: f64,
}

/// All evidence rules declared for one category.
#[derive(Debug, Clone)]
pub struct CategoryWeights {
    pub category: Category,
    pub rules: Vec<WeightRule>,
}

/// Ordered category/rule table. Declaration order is semantic: it breaks
/// score ties, first declared wins.
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: Vec<CategoryWeights>,
    default: Option<Category>,
}

impl WeightTable {
    pub fn new(entries: Vec<CategoryWeights>, default: Option<Category>) -> Self {
        Self { entries, default }
    }

    /// Category the table falls back to when nothing scores.
    pub fn default_category(&self) -> Option<Category> {
        self.default
    }

    /// Score `fragment` against every rule in the table.
    ///
    /// Rules are checked independently; every rule whose pattern matches
    /// contributes its weight, so multiple matches for one category
    /// accumulate.
    pub fn score(&self, fragment: &str) -> Scores {
        let mut scores = Scores::new();
        for entry in &self.entries {
            for rule in &entry.rules {
                if rule.pattern.is_match(fragment) {
                    scores.add(entry.category, rule.weight);
                }
            }
        }
        scores
    }

    /// Pick the best category for `fragment`, optionally biased by evidence
    /// gathered from surrounding text.
    ///
    /// The bias vector is added to this table's own scores. The category
    /// with the highest total wins; ties resolve to the category declared
    /// first. When no category totals above zero the table's declared
    /// default is returned; a table without a default yields `None` and the
    /// caller decides what an unclassifiable fragment means.
    pub fn categorize(&self, fragment: &str, bias: Option<&Scores>) -> Option<Category> {
        let mut totals = self.score(fragment);
        if let Some(bias) = bias {
            totals.merge(bias);
        }

        // Strict greater-than keeps the first-declared category on ties.
        let mut best: Option<(Category, f64)> = None;
        for entry in &self.entries {
            let total = totals.get(entry.category);
            if total > 0.0 && best.map_or(true, |(_, top)| total > top) {
                best = Some((entry.category, total));
            }
        }

        let category = best.map(|(category, _)| category).or(self.default);
        log::trace!("categorize {:?} -> {:?}", fragment, category);
        category
    }
}

/// Label → pattern-list table for value modifiers ("before", "exactly", ...).
///
/// Unlike [`WeightTable`] there are no weights: a label applies as soon as
/// any of its patterns matches, and the last matching label wins.
#[derive(Debug, Clone, Default)]
pub struct ModifierTable {
    entries: Vec<ModifierPatterns>,
}

/// Patterns declared for one modifier label.
#[derive(Debug, Clone)]
pub struct ModifierPatterns {
    pub label: String,
    pub patterns: Vec<Regex>,
}

impl ModifierTable {
    pub fn new(entries: Vec<ModifierPatterns>) -> Self {
        Self { entries }
    }

    /// Find the modifier label whose patterns match `text`, if any.
    pub fn match_modifier(&self, text: &str) -> Option<String> {
        let mut found = None;
        for entry in &self.entries {
            if entry.patterns.iter().any(|p| p.is_match(text)) {
                found = Some(entry.label.clone());
            }
        }
        found
    }
}
