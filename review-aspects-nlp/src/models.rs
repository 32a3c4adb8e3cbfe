use {
    serde::{Serialize, Deserialize},
    review_aspects_core::annotation::ParsedSentence,
};

/// One line of an annotation file: a review text and the sentences an
/// external parser produced for it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnnotatedReview {
    pub text: String,
    pub sentences: Vec<ParsedSentence>,
}

impl AnnotatedReview {
    pub fn new(text: String, sentences: Vec<ParsedSentence>) -> Self {
        Self {
            text,
            sentences,
        }
    }
}
