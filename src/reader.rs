//! Sentence reader - bounds-safe cursor over the tagged token stream
//!
//! The reader owns the stream for one sentence and a registry of the
//! notions produced while scanning it. Lookahead and lookback never fail:
//! past either edge the accessors hand back a neutral placeholder, so
//! callers skip bounds checks entirely.

use crate::grammar::Phrase;
use crate::notions::Notion;

pub struct SentenceReader {
    stream: Vec<Phrase>,
    position: usize,
    registered: Vec<Notion>,
    placeholder: Phrase,
}

impl SentenceReader {
    pub fn new(stream: Vec<Phrase>) -> Self {
        Self {
            stream,
            position: 0,
            registered: Vec::new(),
            placeholder: Phrase::placeholder(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Item under the cursor, or the placeholder for an empty stream.
    pub fn current(&self) -> &Phrase {
        self.stream.get(self.position).unwrap_or(&self.placeholder)
    }

    /// Item before the cursor, or the placeholder at the left edge.
    pub fn previous(&self) -> &Phrase {
        self.position
            .checked_sub(1)
            .and_then(|i| self.stream.get(i))
            .unwrap_or(&self.placeholder)
    }

    /// Item after the cursor, or the placeholder at the right edge.
    pub fn next_phrase(&self) -> &Phrase {
        self.stream
            .get(self.position + 1)
            .unwrap_or(&self.placeholder)
    }

    /// Move forward one item. Reports whether an item remained; a `false`
    /// return leaves the cursor where it was and ends the scan loop.
    pub fn advance(&mut self) -> bool {
        if self.position + 1 < self.stream.len() {
            self.position += 1;
            return true;
        }
        false
    }

    /// Move back one item, reporting whether the move happened.
    pub fn retreat(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            return true;
        }
        false
    }

    /// Record a produced notion.
    pub fn register(&mut self, notion: Notion) {
        self.registered.push(notion);
    }

    /// Every notion produced so far, in production order.
    pub fn registered(&self) -> &[Notion] {
        &self.registered
    }

    /// Whether any Action has been registered yet. Decides whether a noun
    /// phrase is the clause's subject (no verb yet) or its object/target.
    pub fn verb_seen(&self) -> bool {
        self.registered.iter().any(Notion::is_action)
    }
}
