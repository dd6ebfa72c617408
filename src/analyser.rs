//! Sentence analyser - assembles tagged phrases into ordered Meaning records
//!
//! One forward scan over the stream. The only state is the clause being
//! filled and the connector queue; there is no mode flag. Noun phrases are
//! classified with combined evidence (their own text, the queued connectors,
//! the preceding verb) and routed to a clause field, verb phrases become the
//! clause's action, and boundary words split the stream into sub-sentences.

use crate::balance::{Category, Scores};
use crate::config::AnalyserConfig;
use crate::grammar::{surface_text, GrammarTag, Phrase, Token, TokenSource};
use crate::notions::{
    Action, Item, Location, Meaning, MeaningKind, Notion, Person, Subject, Time, Value,
};
use crate::reader::SentenceReader;

/// Words that close the current clause and open the next one.
const BOUNDARY_WORDS: [&str; 3] = ["and", "if", "when"];

/// Auxiliaries that, ahead of a person/item phrase, mark a question.
const AUXILIARIES: [&str; 3] = ["do", "is", "are"];

/// Scans one tagged sentence into its clause records.
pub struct SentenceAnalyser<'c> {
    reader: SentenceReader,
    config: &'c AnalyserConfig,
    queue: Vec<Token>,
    current: Meaning,
    finished: Vec<Meaning>,
}

impl<'c> SentenceAnalyser<'c> {
    pub fn new(stream: Vec<Phrase>, config: &'c AnalyserConfig) -> Self {
        let reader = SentenceReader::new(stream);
        let kind = clause_kind(&reader);
        Self {
            reader,
            config,
            queue: Vec::new(),
            current: Meaning::new(kind),
            finished: Vec::new(),
        }
    }

    /// Tokenize `sentence` through the given source and set up the scan.
    pub fn from_text(
        sentence: &str,
        tokens: &dyn TokenSource,
        config: &'c AnalyserConfig,
    ) -> Self {
        Self::new(tokens.token_stream(sentence), config)
    }

    /// Run the scan and return the clause records in sentence order.
    ///
    /// The in-progress clause is appended unconditionally at the end, so any
    /// input, an empty stream included, yields at least one record.
    pub fn create_meanings(mut self) -> Vec<Meaning> {
        if !self.reader.is_empty() {
            loop {
                self.step();
                if !self.reader.advance() {
                    break;
                }
            }
        }
        self.finished.push(self.current);
        self.finished
    }

    fn step(&mut self) {
        let phrase = self.reader.current().clone();
        match phrase.tag {
            GrammarTag::NounPhrase => self.noun_phrase(&phrase),
            GrammarTag::VerbPhrase => {
                let action = Action::new(phrase.clone(), self.queue.clone());
                self.current.action = Some(action.clone());
                self.reader.register(Notion::Action(action));
            }
            GrammarTag::AdverbPhrase => {
                // TODO: route adverb phrases to a modifiers field once
                // Meaning grows one; for now they are read and dropped.
            }
            _ => self.separator(&phrase),
        }
        // The queue never spans a phrase boundary.
        if phrase.tag.is_phrase() {
            self.queue.clear();
        }
    }

    /// Classify a noun phrase and route it to the matching clause field.
    fn noun_phrase(&mut self, phrase: &Phrase) {
        let category = self.guess_category(phrase);
        log::debug!("noun phrase '{}' categorized as {:?}", phrase.text(), category);

        let Some(category) = category else {
            // No evidence and no table default: the phrase fills no field.
            return;
        };

        let connectors = self.queue.clone();
        let modifiers = &self.config.value_modifiers;
        match category {
            Category::Time => {
                // Repeated time mentions accumulate instead of overwriting,
                // so "at 10 pm on monday" stays one notion.
                let time = match self.current.time.take() {
                    Some(mut time) => {
                        time.absorb(phrase.clone(), &connectors, modifiers);
                        time
                    }
                    None => Time::new(phrase.clone(), connectors, modifiers),
                };
                self.current.time = Some(time.clone());
                self.reader.register(Notion::Time(time));
            }
            Category::Value => {
                let value = Value::new(phrase.clone(), connectors, modifiers);
                self.current.value = Some(value.clone());
                self.reader.register(Notion::Value(value));
            }
            Category::Item => {
                let item = Item::new(phrase.clone(), connectors, modifiers);
                if self.reader.verb_seen() {
                    self.current.item = Some(item.clone());
                } else {
                    self.current.subject = Some(Subject::Item(item.clone()));
                }
                self.reader.register(Notion::Item(item));
            }
            Category::Location => {
                let location = Location::new(phrase.clone(), connectors, modifiers);
                self.current.location = Some(location.clone());
                self.reader.register(Notion::Location(location));
            }
            Category::Person => {
                let person = Person::new(phrase.clone(), connectors, modifiers);
                if self.reader.verb_seen() {
                    self.current.target = Some(person.clone());
                } else {
                    self.current.subject = Some(Subject::Person(person.clone()));
                }
                self.reader.register(Notion::Person(person));
            }
        }

        // TODO: stem the preceding verb instead of matching fixed
        // inflections of be/do.
        let previous = self.reader.previous();
        let aux_before = previous.tag == GrammarTag::Modal
            || previous.tag == GrammarTag::VerbPhrase
                && AUXILIARIES
                    .iter()
                    .any(|aux| previous.text().eq_ignore_ascii_case(aux));
        if aux_before && matches!(category, Category::Person | Category::Item) {
            self.current.kind = MeaningKind::Question;
        }
    }

    /// Queue a separator, then check it for a clause boundary and for the
    /// "of" glue case.
    fn separator(&mut self, leaf: &Phrase) {
        self.queue.extend(leaf.words.iter().cloned());

        let text = leaf.text();
        if BOUNDARY_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) || leaf.is_punctuation() {
            self.close_clause();
        }

        if text.eq_ignore_ascii_case("of")
            && self.reader.next_phrase().tag == GrammarTag::NounPhrase
            && self.reader.previous().tag == GrammarTag::NounPhrase
        {
            // "a cup of coffee": the glue word joins two noun phrases into
            // one clause. Extract the right-hand phrase in place, then step
            // back so the main loop resumes from the separator.
            self.reader.advance();
            let phrase = self.reader.current().clone();
            self.noun_phrase(&phrase);
            self.reader.retreat();
        }
    }

    /// The single emission point: finish the current clause and open the
    /// next one, typed from the token under the cursor.
    fn close_clause(&mut self) {
        let kind = clause_kind(&self.reader);
        let finished = std::mem::replace(&mut self.current, Meaning::new(kind));
        log::debug!("clause closed as {}, next opens as {}", finished.kind, kind);
        self.finished.push(finished);
    }

    /// Combine connector-queue and preceding-verb evidence into a bias, then
    /// categorize the phrase's own text against the noun table.
    fn guess_category(&self, phrase: &Phrase) -> Option<Category> {
        let mut bias = Scores::new();

        if !self.queue.is_empty() {
            // Connectors ahead of the group carry meaning of their own,
            // e.g. "from my place" points at a location.
            let connector_text = surface_text(&self.queue);
            bias.merge(&self.config.connector_meanings.score(&connector_text));
        }

        let previous = self.reader.previous();
        if previous.tag == GrammarTag::VerbPhrase {
            // So does the verb ahead of the group, e.g. "call my brother"
            // points at a person.
            bias.merge(&self.config.verb_meanings.score(&previous.text()));
        }

        let bias = if bias.is_empty() { None } else { Some(&bias) };
        self.config.noun_categories.categorize(&phrase.text(), bias)
    }
}

/// Initial kind for a clause opening at the reader's position: a verb phrase
/// opens an order, an if/when word opens a condition, anything else a
/// statement.
fn clause_kind(reader: &SentenceReader) -> MeaningKind {
    let current = reader.current();
    if current.tag == GrammarTag::VerbPhrase {
        return MeaningKind::Order;
    }
    let text = current.text();
    if text.eq_ignore_ascii_case("if") || text.eq_ignore_ascii_case("when") {
        return MeaningKind::Condition;
    }
    MeaningKind::Statement
}

/// Analyse one pre-tagged stream with the given tables.
pub fn analyse(stream: Vec<Phrase>, config: &AnalyserConfig) -> Vec<Meaning> {
    SentenceAnalyser::new(stream, config).create_meanings()
}
