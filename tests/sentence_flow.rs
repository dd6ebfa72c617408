//! End-to-end runs of the pipeline from raw text, through a small test
//! tagger, to the final Meaning records.

use pretty_assertions::assert_eq;

use meaning_core::{
    AnalyserConfig, GrammarTag, MeaningKind, Phrase, SentenceAnalyser, Token, TokenSource,
};

/// Minimal part-of-speech stand-in for tests: tags each word from fixed
/// lists and merges consecutive same-tag words into phrases. The real
/// tokenizer lives outside the crate.
struct WordTagger;

const VERBS: [&str; 8] = [
    "wake", "call", "bring", "go", "pay", "write", "is", "rains",
];
const ADVERBS: [&str; 2] = ["up", "quickly"];
const MODALS: [&str; 2] = ["can", "could"];
const SEPARATORS: [&str; 13] = [
    "and", "if", "when", "at", "on", "in", "of", "to", "from", "with", "about", "before", "after",
];

impl WordTagger {
    fn tag_of(word: &str) -> GrammarTag {
        let lower = word.to_lowercase();
        if word.chars().all(|c| c.is_ascii_punctuation()) {
            GrammarTag::Punctuation
        } else if MODALS.contains(&lower.as_str()) {
            GrammarTag::Modal
        } else if SEPARATORS.contains(&lower.as_str()) {
            GrammarTag::Word
        } else if VERBS.contains(&lower.as_str()) {
            GrammarTag::VerbPhrase
        } else if ADVERBS.contains(&lower.as_str()) {
            GrammarTag::AdverbPhrase
        } else {
            GrammarTag::NounPhrase
        }
    }
}

impl TokenSource for WordTagger {
    fn token_stream(&self, sentence: &str) -> Vec<Phrase> {
        let mut stream: Vec<Phrase> = Vec::new();
        for (position, word) in sentence.split_whitespace().enumerate() {
            let tag = Self::tag_of(word);
            let token = Token::new(word, tag, position);
            match stream.last_mut() {
                // Noun and verb groups span consecutive words.
                Some(last) if last.tag == tag && tag.is_phrase() => last.words.push(token),
                _ => stream.push(Phrase::leaf(token)),
            }
        }
        stream
    }
}

fn run(sentence: &str) -> Vec<meaning_core::Meaning> {
    let config = AnalyserConfig::builtin();
    SentenceAnalyser::from_text(sentence, &WordTagger, &config).create_meanings()
}

#[test]
fn splits_two_orders_joined_by_and() {
    let meanings = run("wake me up and call my brother");

    assert_eq!(meanings.len(), 2);
    assert_eq!(meanings[0].kind, MeaningKind::Order);
    assert_eq!(meanings[0].action.as_ref().unwrap().text(), "wake");
    assert_eq!(meanings[0].target.as_ref().unwrap().text(), "me");
    assert_eq!(meanings[1].action.as_ref().unwrap().text(), "call");
    assert_eq!(meanings[1].target.as_ref().unwrap().text(), "my brother");
}

#[test]
fn modal_opening_marks_a_question() {
    let meanings = run("can you call your mother");

    assert_eq!(meanings.len(), 1);
    let meaning = &meanings[0];
    assert_eq!(meaning.kind, MeaningKind::Question);
    assert_eq!(meaning.subject.as_ref().unwrap().text(), "you");
    assert_eq!(meaning.action.as_ref().unwrap().text(), "call");
    assert_eq!(meaning.target.as_ref().unwrap().text(), "your mother");
}

#[test]
fn if_clause_becomes_a_condition() {
    let meanings = run("call me if it rains");

    assert_eq!(meanings.len(), 2);
    assert_eq!(meanings[0].kind, MeaningKind::Order);
    assert_eq!(meanings[0].target.as_ref().unwrap().text(), "me");
    assert_eq!(meanings[1].kind, MeaningKind::Condition);
    assert_eq!(meanings[1].item.as_ref().unwrap().text(), "it");
    assert_eq!(meanings[1].action.as_ref().unwrap().text(), "rains");
}

#[test]
fn of_glues_two_noun_phrases_into_one_clause() {
    let meanings = run("bring a cup of coffee");

    assert_eq!(meanings.len(), 1);
    let meaning = &meanings[0];
    assert_eq!(meaning.kind, MeaningKind::Order);
    assert_eq!(meaning.value.as_ref().unwrap().unit.as_deref(), Some("cup"));
    assert_eq!(meaning.item.as_ref().unwrap().text(), "coffee");
}

#[test]
fn repeated_time_mentions_accumulate() {
    let meanings = run("wake me at 10 pm on monday");

    assert_eq!(meanings.len(), 1);
    let time = meanings[0].time.as_ref().unwrap();
    assert_eq!(time.text(), "10 pm monday");
}

#[test]
fn value_fields_come_from_the_phrase_text() {
    let meanings = run("pay about 10 dollars");

    assert_eq!(meanings.len(), 1);
    let value = meanings[0].value.as_ref().unwrap();
    assert_eq!(value.amount, Some(10));
    assert_eq!(value.unit.as_deref(), Some("dollars"));
    assert_eq!(value.modifier.as_deref(), Some("approximately"));
}

#[test]
fn quoted_text_is_lifted_into_the_value() {
    let meanings = run(r#"write "John" somewhere"#);

    let value = meanings[0].value.as_ref().unwrap();
    assert_eq!(value.quoted.as_deref(), Some("John"));
    assert_eq!(value.amount, None);
}

#[test]
fn empty_text_still_yields_one_meaning() {
    let meanings = run("");

    assert_eq!(meanings.len(), 1);
    assert!(meanings[0].is_empty());
}

#[test]
fn identical_input_renders_identically() {
    let first = run("wake me at 10 pm and call my brother");
    let second = run("wake me at 10 pm and call my brother");

    assert_eq!(first, second);
}

#[test]
fn meanings_render_as_indented_blocks() {
    let meanings = run("wake me at 10 pm");

    assert_eq!(
        meanings[0].to_string(),
        "order:\n    action: wake\n    target: me\n    time: 10 pm"
    );
}
