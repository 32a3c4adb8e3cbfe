use {
    std::collections::BTreeSet,
    serde::Serialize,
};

/// Where an aspect was mentioned: which reviews, and the first mention in
/// every sentence that contains it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectOccurrences {
    reviews: BTreeSet<usize>,
    sentences: Vec<usize>,
    positions: Vec<usize>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Unigram,
    Bigram,
    Trigram,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Association {
    pub pmi: f64,
    pub mean_distance: f64,
    pub sentence_count: usize,
}

#[derive(Debug, Clone)]
pub struct Aspect {
    label: String,
    words: Vec<String>,
    kind: AspectKind,
    occurrences: AspectOccurrences,
    association: Option<Association>,
}

impl AspectOccurrences {
    pub fn record_review(&mut self, review_idx: usize) {
        self.reviews.insert(review_idx);
    }

    /// Indexes the mention unless the sentence already has one.
    /// Extractors visit sentences in corpus order, so only the last entry can repeat.
    pub fn record_mention(&mut self, sentence_idx: usize, position: usize) -> bool {
        if self.sentences.last() == Some(&sentence_idx) {
            return false;
        }

        self.sentences.push(sentence_idx);
        self.positions.push(position);
        true
    }

    pub fn remove_reviews(&mut self, reviews: &BTreeSet<usize>) {
        self.reviews.retain(|review| !reviews.contains(review));
    }

    pub fn reviews(&self) -> &BTreeSet<usize> {
        &self.reviews
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// (sentence index, token position inside that sentence) pairs.
    pub fn mentions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sentences.iter().copied().zip(self.positions.iter().copied())
    }
}

impl Aspect {
    pub fn new(words: Vec<String>, kind: AspectKind, occurrences: AspectOccurrences, association: Option<Association>) -> Self {
        Self {
            label: words.join(" "),
            words,
            kind,
            occurrences,
            association,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|v| v == word)
    }

    pub fn kind(&self) -> AspectKind {
        self.kind
    }

    pub fn occurrences(&self) -> &AspectOccurrences {
        &self.occurrences
    }

    pub fn occurrences_mut(&mut self) -> &mut AspectOccurrences {
        &mut self.occurrences
    }

    pub fn association(&self) -> Option<&Association> {
        self.association.as_ref()
    }

    pub fn review_count(&self) -> usize {
        self.occurrences.review_count()
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
