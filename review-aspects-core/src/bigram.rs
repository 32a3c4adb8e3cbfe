use {
    std::collections::{HashMap, BTreeSet},
    tracing::{info, debug},
    crate::{
        aspect::{Aspect, AspectKind, AspectOccurrences, Association, round_to},
        config::NgramConfig,
        corpus::Corpus,
        unigram::Unigrams,
        wordsets::{TokenFilter, WordSets},
    },
};

/// How often the words of a pair appeared in the given order versus reversed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOrder {
    pub forward: usize,
    pub reversed: usize,
}

#[derive(Debug)]
struct BigramCandidate {
    // alphabetical
    words: [String; 2],
    distances: Vec<usize>,
    order: SurfaceOrder,
    occurrences: AspectOccurrences,
}

pub struct BigramExtractor<'a> {
    config: &'a NgramConfig,
    filter: TokenFilter<'a>,
    ids: HashMap<(String, String), usize>,
    candidates: Vec<BigramCandidate>,
}

#[derive(Debug, Clone, Default)]
pub struct Bigrams {
    aspects: Vec<Aspect>,
    by_words: HashMap<(String, String), usize>,
    words: BTreeSet<String>,
}

impl SurfaceOrder {
    /// Puts `words` in the order readers wrote them most often and expresses
    /// the tally relative to that order. Ties keep the given order.
    pub fn orient(self, words: [String; 2]) -> ([String; 2], SurfaceOrder) {
        if self.reversed > self.forward {
            let [first, second] = words;
            let flipped = SurfaceOrder {
                forward: self.reversed,
                reversed: self.forward,
            };
            ([second, first], flipped)
        } else {
            (words, self)
        }
    }
}

impl BigramCandidate {
    fn new(words: [String; 2]) -> Self {
        Self {
            words,
            distances: Vec::new(),
            order: SurfaceOrder::default(),
            occurrences: AspectOccurrences::default(),
        }
    }

    fn mean_distance(&self) -> f64 {
        if self.distances.is_empty() {
            return f64::INFINITY;
        }
        self.distances.iter().sum::<usize>() as f64 / self.distances.len() as f64
    }
}

impl<'a> BigramExtractor<'a> {
    pub fn new(config: &'a NgramConfig, word_sets: &'a WordSets, rarity_threshold: f32) -> Self {
        Self {
            config,
            filter: TokenFilter::new(word_sets, rarity_threshold),
            ids: HashMap::new(),
            candidates: Vec::new(),
        }
    }

    pub fn extract(mut self, corpus: &Corpus, unigrams: &Unigrams) -> Bigrams {
        for sentence in corpus.sentences() {
            let tokens = &sentence.tokens;

            for (anchor_position, anchor) in tokens.iter().enumerate() {
                if !self.filter.is_anchor(anchor) {
                    continue;
                }

                let from = anchor_position.saturating_sub(self.config.window);
                let to = (anchor_position + self.config.window + 1).min(tokens.len());

                for position in from..to {
                    let partner = &tokens[position];
                    if position == anchor_position || partner.lemma == anchor.lemma || !self.filter.is_partner(partner) {
                        continue;
                    }

                    let id = self.candidate_id(&anchor.lemma, &partner.lemma);
                    let candidate = &mut self.candidates[id];

                    candidate.distances.push(position.abs_diff(anchor_position));
                    candidate.occurrences.record_review(sentence.review_idx);

                    let first_in_text = if position < anchor_position { &partner.lemma } else { &anchor.lemma };
                    if *first_in_text == candidate.words[0] {
                        candidate.order.forward += 1;
                    } else {
                        candidate.order.reversed += 1;
                    }

                    candidate.occurrences.record_mention(sentence.sentence_idx, anchor_position);
                }
            }
        }

        self.accept(corpus, unigrams)
    }

    fn candidate_id(&mut self, a: &str, b: &str) -> usize {
        let key = if a <= b { (a.to_owned(), b.to_owned()) } else { (b.to_owned(), a.to_owned()) };

        if let Some(id) = self.ids.get(&key) {
            return *id;
        }

        self.candidates.push(BigramCandidate::new([key.0.clone(), key.1.clone()]));
        let id = self.candidates.len() - 1;
        self.ids.insert(key, id);
        id
    }

    fn accept(self, corpus: &Corpus, unigrams: &Unigrams) -> Bigrams {
        let min_count = (self.config.min_pct * corpus.total_sentences() as f64).max(2.0);
        let total_candidates = self.candidates.len();

        let mut bigrams = Bigrams::default();

        for candidate in self.candidates {
            let count = candidate.occurrences.sentence_count();
            let frequencies = unigrams.lemma_count(&candidate.words[0]) * unigrams.lemma_count(&candidate.words[1]);
            if frequencies == 0 {
                continue;
            }

            let pmi = round_to(count as f64 / frequencies as f64, 4);
            let mean_distance = round_to(candidate.mean_distance(), 2);

            if (count as f64) < min_count || pmi < self.config.pmi_pct || mean_distance >= self.config.max_avg_dist {
                debug!(
                    "rejecting bigram {} {}: count {}, pmi {}, mean distance {}",
                    candidate.words[0], candidate.words[1], count, pmi, mean_distance,
                );
                continue;
            }

            let (words, _) = candidate.order.orient(candidate.words);
            let association = Association {
                pmi,
                mean_distance,
                sentence_count: count,
            };

            bigrams.push(Aspect::new(words.to_vec(), AspectKind::Bigram, candidate.occurrences, Some(association)));
        }

        info!("bigrams: {} candidates, {} accepted", total_candidates, bigrams.len());

        bigrams
    }
}

impl Bigrams {
    fn push(&mut self, aspect: Aspect) {
        let words = aspect.words();
        let key = pair_key(&words[0], &words[1]);

        self.words.extend(words.iter().cloned());
        self.by_words.insert(key, self.aspects.len());
        self.aspects.push(aspect);
    }

    /// Accepted bigram made of `a` and `b`, in either order.
    pub fn find(&self, a: &str, b: &str) -> Option<&Aspect> {
        self.by_words.get(&pair_key(a, b)).map(|id| &self.aspects[*id])
    }

    /// Every word used by an accepted bigram.
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn into_aspects(self) -> Vec<Aspect> {
        self.aspects
    }

    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}
