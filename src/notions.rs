//! Typed notions extracted from phrases, and the Meaning clause record
//!
//! A notion owns the phrase it was built from plus the connector queue
//! captured right before it, and is frozen once its fields are populated.
//! All field extraction is plain pattern work over the phrase's surface
//! text; a missing pattern leaves the field unset, it is never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::balance::ModifierTable;
use crate::grammar::{surface_text, Phrase, Token};

// Compiled once - these patterns are hardcoded and known good.
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d.,]+").expect("Invalid amount pattern"));
static UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d.,]+([\w\s]+)|(\w+)\s*$").expect("Invalid unit pattern"));
static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("Invalid quote pattern"));

/// Modifier label matched against the connector queue's joined text.
///
/// An empty queue never carries a modifier.
fn modifier_of(connectors: &[Token], modifiers: &ModifierTable) -> Option<String> {
    if connectors.is_empty() {
        return None;
    }
    modifiers.match_modifier(&surface_text(connectors))
}

/// A quantity or literal: "10 minutes", "three cups", `"buy milk"`.
///
/// Extraction rules over the phrase text:
/// 1. amount - leading digit run of the first `[\d.,]+` match, as an integer
/// 2. unit - the word run trailing the amount, or the trailing word run when
///    there is no amount
/// 3. quoted - content of the first double-quoted substring
///
/// The modifier ("before", "exactly", ...) comes from the connector queue,
/// e.g. "before 10 pm" where "before" was the connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub words: Phrase,
    pub connectors: Vec<Token>,
    pub quoted: Option<String>,
    pub amount: Option<i64>,
    pub unit: Option<String>,
    pub modifier: Option<String>,
}

impl Value {
    pub fn new(words: Phrase, connectors: Vec<Token>, modifiers: &ModifierTable) -> Self {
        let text = words.text();

        let amount = AMOUNT.find(&text).and_then(|m| {
            let digits: String = m
                .as_str()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<i64>().ok()
        });

        let unit = UNIT.captures(&text).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim().to_string())
        });

        let quoted = QUOTED
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        let modifier = modifier_of(&connectors, modifiers);

        Self {
            words,
            connectors,
            quoted,
            amount,
            unit,
            modifier,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(quoted) = &self.quoted {
            parts.push(format!("\"{}\"", quoted));
        }
        if let Some(amount) = self.amount {
            parts.push(amount.to_string());
        }
        if let Some(unit) = &self.unit {
            parts.push(unit.clone());
        }
        if parts.is_empty() {
            parts.push(self.words.text());
        }
        write!(f, "{}", parts.join(" "))?;
        if let Some(modifier) = &self.modifier {
            write!(f, " [{}]", modifier)?;
        }
        Ok(())
    }
}

/// A point or span in time: "tomorrow morning", "in 10 minutes".
///
/// Unlike every other notion, time accumulates: later time phrases in the
/// same clause are absorbed into the first one instead of replacing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Time {
    pub words: Phrase,
    pub connectors: Vec<Token>,
    pub modifier: Option<String>,
}

impl Time {
    pub fn new(words: Phrase, connectors: Vec<Token>, modifiers: &ModifierTable) -> Self {
        let modifier = modifier_of(&connectors, modifiers);
        Self {
            words,
            connectors,
            modifier,
        }
    }

    /// Absorb a later time phrase from the same clause.
    ///
    /// Words and connectors are appended and the modifier is re-derived
    /// over the combined connector text; when nothing new matches, the
    /// previous modifier stays.
    pub fn absorb(&mut self, words: Phrase, connectors: &[Token], modifiers: &ModifierTable) {
        self.words.words.extend(words.words);
        self.connectors.extend_from_slice(connectors);
        if let Some(modifier) = modifier_of(&self.connectors, modifiers) {
            self.modifier = Some(modifier);
        }
    }

    /// Surface text of the owned phrase.
    pub fn text(&self) -> String {
        self.words.text()
    }
}

/// Someone referenced by the clause: "my brother", "you".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub words: Phrase,
    pub connectors: Vec<Token>,
    pub modifier: Option<String>,
}

impl Person {
    pub fn new(words: Phrase, connectors: Vec<Token>, modifiers: &ModifierTable) -> Self {
        let modifier = modifier_of(&connectors, modifiers);
        Self {
            words,
            connectors,
            modifier,
        }
    }

    pub fn text(&self) -> String {
        self.words.text()
    }
}

/// A place: "at home", "the office".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub words: Phrase,
    pub connectors: Vec<Token>,
    pub modifier: Option<String>,
}

impl Location {
    pub fn new(words: Phrase, connectors: Vec<Token>, modifiers: &ModifierTable) -> Self {
        let modifier = modifier_of(&connectors, modifiers);
        Self {
            words,
            connectors,
            modifier,
        }
    }

    pub fn text(&self) -> String {
        self.words.text()
    }
}

/// A thing acted on: "the lights", "a cup".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub words: Phrase,
    pub connectors: Vec<Token>,
    pub modifier: Option<String>,
}

impl Item {
    pub fn new(words: Phrase, connectors: Vec<Token>, modifiers: &ModifierTable) -> Self {
        let modifier = modifier_of(&connectors, modifiers);
        Self {
            words,
            connectors,
            modifier,
        }
    }

    pub fn text(&self) -> String {
        self.words.text()
    }
}

/// The clause's verb phrase with the connectors active when it was seen.
///
/// Carries no further extraction; its presence is what matters (it flips
/// subject routing to object/target routing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub words: Phrase,
    pub connectors: Vec<Token>,
}

impl Action {
    pub fn new(words: Phrase, connectors: Vec<Token>) -> Self {
        Self { words, connectors }
    }

    pub fn text(&self) -> String {
        self.words.text()
    }
}

/// Render the phrase text with the optional modifier label appended.
fn fmt_with_modifier(
    f: &mut std::fmt::Formatter<'_>,
    text: &str,
    modifier: &Option<String>,
) -> std::fmt::Result {
    write!(f, "{}", text)?;
    if let Some(modifier) = modifier {
        write!(f, " [{}]", modifier)?;
    }
    Ok(())
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_with_modifier(f, &self.text(), &self.modifier)
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_with_modifier(f, &self.text(), &self.modifier)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_with_modifier(f, &self.text(), &self.modifier)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_with_modifier(f, &self.text(), &self.modifier)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// A clause subject is either a person or an item, depending on how the
/// noun phrase classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Subject {
    Person(Person),
    Item(Item),
}

impl Subject {
    pub fn text(&self) -> String {
        match self {
            Subject::Person(person) => person.text(),
            Subject::Item(item) => item.text(),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Person(person) => person.fmt(f),
            Subject::Item(item) => item.fmt(f),
        }
    }
}

/// Any produced notion, as recorded in the reader's registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notion {
    Time(Time),
    Person(Person),
    Location(Location),
    Value(Value),
    Item(Item),
    Action(Action),
}

impl Notion {
    /// Whether this registry entry is a verb.
    pub fn is_action(&self) -> bool {
        matches!(self, Notion::Action(_))
    }
}

/// How a clause relates to the speaker's intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeaningKind {
    #[default]
    Statement,
    Order,
    Question,
    Condition,
}

impl MeaningKind {
    pub fn name(self) -> &'static str {
        match self {
            MeaningKind::Statement => "statement",
            MeaningKind::Order => "order",
            MeaningKind::Question => "question",
            MeaningKind::Condition => "condition",
        }
    }
}

impl std::fmt::Display for MeaningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One clause: a kind plus the optional role fields filled by the scan.
///
/// Later assignment overwrites earlier ones for every field except `time`,
/// which accumulates across repeated mentions within the same clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(rename = "type")]
    pub kind: MeaningKind,
    pub subject: Option<Subject>,
    pub action: Option<Action>,
    pub item: Option<Item>,
    pub target: Option<Person>,
    pub time: Option<Time>,
    pub location: Option<Location>,
    pub value: Option<Value>,
}

impl Meaning {
    pub fn new(kind: MeaningKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Whether no role field has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.action.is_none()
            && self.item.is_none()
            && self.target.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.value.is_none()
    }
}

impl std::fmt::Display for Meaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.kind)?;
        if let Some(subject) = &self.subject {
            write!(f, "\n    subject: {}", subject)?;
        }
        if let Some(action) = &self.action {
            write!(f, "\n    action: {}", action)?;
        }
        if let Some(item) = &self.item {
            write!(f, "\n    item: {}", item)?;
        }
        if let Some(target) = &self.target {
            write!(f, "\n    target: {}", target)?;
        }
        if let Some(time) = &self.time {
            write!(f, "\n    time: {}", time)?;
        }
        if let Some(location) = &self.location {
            write!(f, "\n    location: {}", location)?;
        }
        if let Some(value) = &self.value {
            write!(f, "\n    value: {}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::ModifierPatterns;
    use crate::grammar::GrammarTag;

    fn nn(text: &str) -> Phrase {
        Phrase::from_text(GrammarTag::NounPhrase, text, 0)
    }

    fn sep(text: &str) -> Token {
        Token::new(text, GrammarTag::Word, 0)
    }

    fn modifiers() -> ModifierTable {
        ModifierTable::new(vec![
            ModifierPatterns {
                label: "before".into(),
                patterns: vec![Regex::new(r"\b(before|by|until)\b").expect("test pattern")],
            },
            ModifierPatterns {
                label: "exactly".into(),
                patterns: vec![Regex::new(r"\b(exactly|sharp)\b").expect("test pattern")],
            },
        ])
    }

    #[test]
    fn test_amount_and_unit() {
        let value = Value::new(nn("10 minutes"), Vec::new(), &modifiers());
        assert_eq!(value.amount, Some(10));
        assert_eq!(value.unit.as_deref(), Some("minutes"));
        assert_eq!(value.quoted, None);
    }

    #[test]
    fn test_amount_takes_leading_digits_of_first_run() {
        let value = Value::new(nn("10.5 km"), Vec::new(), &modifiers());
        assert_eq!(value.amount, Some(10));
        assert_eq!(value.unit.as_deref(), Some("km"));
    }

    #[test]
    fn test_quoted_literal() {
        let value = Value::new(nn(r#"the note "John" here"#), Vec::new(), &modifiers());
        assert_eq!(value.quoted.as_deref(), Some("John"));
    }

    #[test]
    fn test_no_digits_no_quotes_keeps_trailing_word_run() {
        let value = Value::new(nn("my brother"), Vec::new(), &modifiers());
        assert_eq!(value.amount, None);
        assert_eq!(value.quoted, None);
        assert_eq!(value.unit.as_deref(), Some("brother"));
    }

    #[test]
    fn test_modifier_comes_from_connectors() {
        let value = Value::new(nn("10 pm"), vec![sep("before")], &modifiers());
        assert_eq!(value.modifier.as_deref(), Some("before"));

        // An empty queue never carries a modifier.
        let value = Value::new(nn("10 pm"), Vec::new(), &modifiers());
        assert_eq!(value.modifier, None);
    }

    #[test]
    fn test_time_absorbs_later_phrases() {
        let mut time = Time::new(nn("10 pm"), vec![sep("at")], &modifiers());
        assert_eq!(time.modifier, None);

        time.absorb(nn("monday"), &[sep("before")], &modifiers());
        assert_eq!(time.text(), "10 pm monday");
        assert_eq!(time.modifier.as_deref(), Some("before"));

        // Re-derived over the combined connector text; the last matching
        // label wins.
        time.absorb(nn("evening"), &[sep("sharp")], &modifiers());
        assert_eq!(time.modifier.as_deref(), Some("exactly"));
    }

    #[test]
    fn test_empty_meaning_and_display() {
        let mut meaning = Meaning::new(MeaningKind::Order);
        assert!(meaning.is_empty());
        assert_eq!(meaning.to_string(), "order:");

        meaning.action = Some(Action::new(
            Phrase::from_text(GrammarTag::VerbPhrase, "call", 0),
            Vec::new(),
        ));
        assert!(!meaning.is_empty());
        assert_eq!(meaning.to_string(), "order:\n    action: call");
    }
}
