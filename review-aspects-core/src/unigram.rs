use {
    std::collections::{HashMap, BTreeMap},
    tracing::{info, debug},
    crate::{
        aspect::{Aspect, AspectKind, AspectOccurrences},
        config::UnigramConfig,
        corpus::Corpus,
        wordsets::{TokenFilter, WordSets, ADJECTIVAL_MODIFIER},
    },
};

#[derive(Debug, Default, Clone, Copy)]
struct DependencyTally {
    total: usize,
    modifiers: usize,
}

pub struct UnigramExtractor<'a> {
    config: &'a UnigramConfig,
    filter: TokenFilter<'a>,
    lemma_counts: HashMap<String, usize>,
    dependents: HashMap<String, DependencyTally>,
    candidates: BTreeMap<String, AspectOccurrences>,
}

/// Accepted single-word aspects plus the corpus-wide lemma counts the
/// multi-word extractors need.
#[derive(Debug, Clone)]
pub struct Unigrams {
    lemma_counts: HashMap<String, usize>,
    aspects: BTreeMap<String, AspectOccurrences>,
}

impl DependencyTally {
    fn modifier_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.modifiers as f64 / self.total as f64
        }
    }
}

impl<'a> UnigramExtractor<'a> {
    pub fn new(config: &'a UnigramConfig, word_sets: &'a WordSets, rarity_threshold: f32) -> Self {
        Self {
            config,
            filter: TokenFilter::new(word_sets, rarity_threshold),
            lemma_counts: HashMap::new(),
            dependents: HashMap::new(),
            candidates: BTreeMap::new(),
        }
    }

    pub fn extract(mut self, corpus: &Corpus) -> Unigrams {
        for sentence in corpus.sentences() {
            for (position, token) in sentence.tokens.iter().enumerate() {
                *self.lemma_counts.entry(token.lemma.clone()).or_insert(0) += 1;

                let tally = self.dependents.entry(token.head_lemma.clone()).or_default();
                tally.total += 1;
                if token.dep == ADJECTIVAL_MODIFIER {
                    tally.modifiers += 1;
                }

                if self.filter.is_unigram_candidate(token) {
                    let occurrences = self.candidates.entry(token.lemma.clone()).or_default();
                    occurrences.record_review(sentence.review_idx);
                    occurrences.record_mention(sentence.sentence_idx, position);
                }
            }
        }

        let min_sentences = self.config.min_pct * corpus.total_sentences() as f64;
        let total_candidates = self.candidates.len();

        let dependents = &self.dependents;
        let amod_pct = self.config.amod_pct;
        let aspects: BTreeMap<String, AspectOccurrences> = self.candidates.into_iter()
            .filter(|(lemma, occurrences)| {
                let frequency = occurrences.sentence_count() as f64;
                let modifier_ratio = dependents.get(lemma).map(|v| v.modifier_ratio()).unwrap_or(0.0);

                let accepted = frequency >= min_sentences && modifier_ratio >= amod_pct;
                if !accepted {
                    debug!(
                        "rejecting unigram {}: {} sentences (min {:.2}), modifier ratio {:.3}",
                        lemma, frequency, min_sentences, modifier_ratio,
                    );
                }
                accepted
            })
            .collect();

        info!("unigrams: {} candidates, {} accepted", total_candidates, aspects.len());

        Unigrams {
            lemma_counts: self.lemma_counts,
            aspects,
        }
    }
}

impl Unigrams {
    pub fn lemma_count(&self, lemma: &str) -> usize {
        self.lemma_counts.get(lemma).copied().unwrap_or(0)
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.aspects.contains_key(lemma)
    }

    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }

    pub fn occurrences(&self, lemma: &str) -> Option<&AspectOccurrences> {
        self.aspects.get(lemma)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AspectOccurrences)> {
        self.aspects.iter()
    }

    pub fn into_aspects(self) -> Vec<Aspect> {
        self.aspects.into_iter()
            .map(|(lemma, occurrences)| Aspect::new(vec![lemma], AspectKind::Unigram, occurrences, None))
            .collect()
    }
}
