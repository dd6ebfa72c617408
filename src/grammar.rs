//! Grammar-tagged tokens and phrases consumed by the analyser
//!
//! Tokenization itself lives outside this crate; a [`TokenSource`] hands the
//! analyser a stream of phrases that already carry their collapsed grammar
//! tag. Separator words (prepositions, modals, punctuation) travel as
//! single-token phrases so the whole stream is one uniform sequence.

use serde::{Deserialize, Serialize};

/// Coarse grammatical role of a token or phrase, from a closed set.
///
/// The three `*Phrase` tags mark multi-word groups; the rest mark separator
/// tokens that sit between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarTag {
    NounPhrase,
    VerbPhrase,
    AdverbPhrase,
    Modal,
    Word,
    Punctuation,
}

impl GrammarTag {
    /// Whether this tag marks a word group rather than a separator token.
    pub fn is_phrase(self) -> bool {
        matches!(
            self,
            GrammarTag::NounPhrase | GrammarTag::VerbPhrase | GrammarTag::AdverbPhrase
        )
    }

    /// Parse the kebab-case tag name ("noun-phrase", "modal", ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "noun-phrase" => Some(GrammarTag::NounPhrase),
            "verb-phrase" => Some(GrammarTag::VerbPhrase),
            "adverb-phrase" => Some(GrammarTag::AdverbPhrase),
            "modal" => Some(GrammarTag::Modal),
            "word" => Some(GrammarTag::Word),
            "punctuation" => Some(GrammarTag::Punctuation),
            _ => None,
        }
    }

    /// Kebab-case name, the inverse of [`GrammarTag::parse`].
    pub fn name(self) -> &'static str {
        match self {
            GrammarTag::NounPhrase => "noun-phrase",
            GrammarTag::VerbPhrase => "verb-phrase",
            GrammarTag::AdverbPhrase => "adverb-phrase",
            GrammarTag::Modal => "modal",
            GrammarTag::Word => "word",
            GrammarTag::Punctuation => "punctuation",
        }
    }
}

/// One surface word with its tag and position in the source stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub tag: GrammarTag,
    pub position: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: GrammarTag, position: usize) -> Self {
        Self {
            text: text.into(),
            tag,
            position,
        }
    }

    /// Whether this token is a punctuation mark.
    pub fn is_punctuation(&self) -> bool {
        self.tag == GrammarTag::Punctuation
    }
}

/// An ordered run of tokens sharing one collapsed grammar tag.
///
/// The assembler treats a phrase as a single unit; its original surface text
/// is reconstructed by joining the word texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub tag: GrammarTag,
    pub words: Vec<Token>,
}

impl Phrase {
    pub fn new(tag: GrammarTag, words: Vec<Token>) -> Self {
        Self { tag, words }
    }

    /// Build a phrase by splitting `text` on whitespace, numbering tokens
    /// from `position`. Convenience for pre-tagged input (bindings, tests).
    pub fn from_text(tag: GrammarTag, text: &str, position: usize) -> Self {
        let words = text
            .split_whitespace()
            .enumerate()
            .map(|(i, w)| Token::new(w, tag, position + i))
            .collect();
        Self { tag, words }
    }

    /// Wrap a single separator token as its own stream item.
    pub fn leaf(token: Token) -> Self {
        Self {
            tag: token.tag,
            words: vec![token],
        }
    }

    /// Neutral placeholder returned by the cursor at stream edges.
    pub fn placeholder() -> Self {
        Self {
            tag: GrammarTag::Word,
            words: Vec::new(),
        }
    }

    /// Reconstructed surface text of the phrase.
    pub fn text(&self) -> String {
        surface_text(&self.words)
    }

    /// Whether this item is a word group (noun/verb/adverb phrase).
    pub fn is_phrase(&self) -> bool {
        self.tag.is_phrase()
    }

    /// Whether this item is a punctuation mark.
    pub fn is_punctuation(&self) -> bool {
        self.tag == GrammarTag::Punctuation
    }
}

impl std::fmt::Display for Phrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Join token texts with single spaces.
pub fn surface_text(words: &[Token]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// External tokenizer seam: turns raw sentence text into the tagged stream.
///
/// The crate never tokenizes on its own; callers plug in their
/// part-of-speech grouping layer here.
pub trait TokenSource {
    fn token_stream(&self, sentence: &str) -> Vec<Phrase>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_reconstructs_surface_text() {
        let phrase = Phrase::from_text(GrammarTag::NounPhrase, "my little brother", 3);
        assert_eq!(phrase.text(), "my little brother");
        assert_eq!(phrase.words.len(), 3);
        assert_eq!(phrase.words[2].position, 5);
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in [
            GrammarTag::NounPhrase,
            GrammarTag::VerbPhrase,
            GrammarTag::AdverbPhrase,
            GrammarTag::Modal,
            GrammarTag::Word,
            GrammarTag::Punctuation,
        ] {
            assert_eq!(GrammarTag::parse(tag.name()), Some(tag));
        }
        assert_eq!(GrammarTag::parse("gerund"), None);
    }

    #[test]
    fn test_phrase_tags_versus_separator_tags() {
        assert!(GrammarTag::AdverbPhrase.is_phrase());
        assert!(!GrammarTag::Modal.is_phrase());
        assert!(!GrammarTag::Punctuation.is_phrase());

        let comma = Phrase::leaf(Token::new(",", GrammarTag::Punctuation, 4));
        assert!(comma.is_punctuation());
        assert!(!comma.is_phrase());
    }

    #[test]
    fn test_placeholder_is_empty_generic_word() {
        let p = Phrase::placeholder();
        assert_eq!(p.tag, GrammarTag::Word);
        assert_eq!(p.text(), "");
    }
}
