//! Contract between the core and whatever parser annotates review text.
//!
//! The core never loads a parser itself: callers hand an implementation of
//! [`TextAnnotator`] to [`crate::corpus::Corpus::build`].

use {
    std::borrow::Cow,
    derive_builder::Builder,
    once_cell::sync::Lazy,
    regex::Regex,
    serde::{Serialize, Deserialize},
};

static ELLIPSIS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.\.\.+").unwrap());

#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    #[builder(setter(into))]
    pub surface: String,
    #[builder(setter(into))]
    pub lemma: String,
    /// fine-grained part of speech tag (penn treebank)
    #[builder(setter(into))]
    pub tag: String,
    #[builder(setter(into), default)]
    #[serde(default)]
    pub dep: String,
    #[builder(setter(into), default)]
    #[serde(default)]
    pub head_lemma: String,
    /// log probability of the lemma, lower is rarer
    #[builder(default)]
    pub rarity: f32,
    /// byte offset of the token inside its sentence text
    #[builder(default)]
    #[serde(default)]
    pub char_offset: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParsedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

pub trait TextAnnotator {
    /// Splits `text` into sentences. An error means the whole review is unusable.
    fn annotate(&self, text: &str) -> anyhow::Result<Vec<ParsedSentence>>;
}

impl<F> TextAnnotator for F where F: Fn(&str) -> anyhow::Result<Vec<ParsedSentence>> {
    fn annotate(&self, text: &str) -> anyhow::Result<Vec<ParsedSentence>> {
        self(text)
    }
}

impl ParsedSentence {
    pub fn new(text: String, tokens: Vec<Token>) -> Self {
        Self {
            text,
            tokens,
        }
    }

    /// Fills token offsets by searching each surface form left to right.
    /// Tokens that cannot be found keep the offset of the previous match.
    pub fn with_located_offsets(mut self) -> Self {
        let mut cursor = 0;

        for token in self.tokens.iter_mut() {
            if let Some(found) = self.text[cursor..].find(token.surface.as_str()) {
                token.char_offset = cursor + found;
                cursor += found + token.surface.len();
            } else {
                token.char_offset = cursor;
            }
        }

        self
    }
}

/// Collapses runs of four or more dots, which tend to split sentences apart.
pub fn normalize_ellipsis(text: &str) -> Cow<'_, str> {
    ELLIPSIS_RUN.replace_all(text, "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dot_runs_become_an_ellipsis() {
        assert_eq!(normalize_ellipsis("great..... really great"), "great... really great");
        assert_eq!(normalize_ellipsis("fine... ok"), "fine... ok");
        assert_eq!(normalize_ellipsis("a.......b....c"), "a...b...c");
    }

    #[test]
    fn offsets_are_located_in_order() {
        let tokens = ["the", "screen", "is", "the", "best"]
            .iter()
            .map(|word| TokenBuilder::default().surface(*word).lemma(*word).tag("NN").build().unwrap())
            .collect();

        let sentence = ParsedSentence::new("the screen is the best".to_owned(), tokens).with_located_offsets();
        let offsets: Vec<usize> = sentence.tokens.iter().map(|v| v.char_offset).collect();

        assert_eq!(offsets, vec![0, 4, 11, 14, 18]);
    }

    #[test]
    fn closures_can_annotate() {
        let annotator = |text: &str| -> anyhow::Result<Vec<ParsedSentence>> {
            Ok(vec![ParsedSentence::new(text.to_owned(), Vec::new())])
        };

        let sentences = annotator.annotate("hello").unwrap();
        assert_eq!(sentences[0].text, "hello");
    }
}
