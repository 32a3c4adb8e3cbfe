use {
    typed_builder::TypedBuilder,
    serde::{Serialize, Deserialize},
    tracing::{info, warn},
    crate::{
        annotation::{TextAnnotator, Token, normalize_ellipsis},
        progress::Progress,
    },
};

#[derive(TypedBuilder, Serialize, Deserialize, Debug, Clone)]
pub struct Review {
    pub rating: u8,
    #[builder(setter(into))]
    pub text: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub author: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub headline: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnnotatedSentence {
    pub review_idx: usize,
    pub rating: u8,
    pub sentence_idx: usize,
    // token offset of the first token within the review
    pub start_offset: usize,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
pub struct Corpus {
    name: String,
    reviews_total: usize,
    reviews_parsed: usize,
    sentences: Vec<AnnotatedSentence>,
}

impl AnnotatedSentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Length in bytes of the sentence text that precedes the token at `position`.
    pub fn prefix_len(&self, position: usize) -> usize {
        self.tokens.get(position)
            .map(|token| token.char_offset.min(self.text.len()))
            .unwrap_or(0)
    }
}

impl Corpus {
    pub fn build<A>(name: impl Into<String>, reviews: &[Review], annotator: &A) -> Self where A: TextAnnotator + ?Sized {
        let name = name.into();
        let mut progress = Progress::new(format!("annotating reviews for {}", name));

        let mut sentences = Vec::new();
        let mut reviews_parsed = 0;

        for (review_idx, review) in reviews.iter().enumerate() {
            let text = normalize_ellipsis(&review.text);

            let parsed = match annotator.annotate(&text) {
                Ok(v) => v,
                Err(err) => {
                    warn!("parser for review #{} failed: {:#}", review_idx, err);
                    continue;
                }
            };
            reviews_parsed += 1;

            let mut start_offset = 0;
            for sentence in parsed {
                if sentence.text.trim().is_empty() || sentence.tokens.is_empty() {
                    continue;
                }

                let tokens: Vec<Token> = sentence.tokens.into_iter().map(normalize_token).collect();
                let len = tokens.len();

                sentences.push(AnnotatedSentence {
                    review_idx,
                    rating: review.rating,
                    sentence_idx: sentences.len(),
                    start_offset,
                    text: sentence.text,
                    tokens,
                });

                start_offset += len;
            }

            progress.update();
        }

        progress.finish();
        info!(
            "corpus {}: {} of {} reviews parsed, {} sentences",
            name, reviews_parsed, reviews.len(), sentences.len(),
        );

        Self {
            name,
            reviews_total: reviews.len(),
            reviews_parsed,
            sentences,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reviews_total(&self) -> usize {
        self.reviews_total
    }

    pub fn reviews_parsed(&self) -> usize {
        self.reviews_parsed
    }

    pub fn sentences(&self) -> &[AnnotatedSentence] {
        &self.sentences
    }

    pub fn sentence(&self, sentence_idx: usize) -> Option<&AnnotatedSentence> {
        self.sentences.get(sentence_idx)
    }

    pub fn total_sentences(&self) -> usize {
        self.sentences.len()
    }
}

fn normalize_token(mut token: Token) -> Token {
    token.lemma = token.lemma.trim().to_lowercase();
    token.head_lemma = token.head_lemma.trim().to_lowercase();
    token
}
