//! Three-word aspects, grown from accepted bigrams.
//!
//! A trigram candidate is an accepted bigram `{anchor, partner}` seen together
//! with a third qualifying word inside the anchor's window. Candidates go
//! through the same count, association and distance filters as bigrams. The
//! association compares the trigram count with the count of its best parent
//! bigram and the frequency of the third word; the distance is the one between
//! the third word and the nearer word of the parent bigram.

use {
    std::collections::{HashMap, BTreeMap, BTreeSet},
    tracing::{info, debug},
    crate::{
        annotation::Token,
        aspect::{Aspect, AspectKind, AspectOccurrences, Association, round_to},
        bigram::Bigrams,
        config::NgramConfig,
        corpus::Corpus,
        unigram::Unigrams,
        wordsets::{TokenFilter, WordSets},
    },
};

#[derive(Debug)]
struct TrigramCandidate {
    distances: Vec<usize>,
    surface_orders: BTreeMap<[String; 3], usize>,
    // smallest parent count × third word frequency seen so far
    best_denominator: usize,
    occurrences: AspectOccurrences,
}

pub struct TrigramExtractor<'a> {
    config: &'a NgramConfig,
    filter: TokenFilter<'a>,
    candidates: HashMap<[String; 3], TrigramCandidate>,
}

#[derive(Debug, Clone, Default)]
pub struct Trigrams {
    aspects: Vec<Aspect>,
    words: BTreeSet<String>,
}

impl TrigramCandidate {
    fn new() -> Self {
        Self {
            distances: Vec::new(),
            surface_orders: BTreeMap::new(),
            best_denominator: usize::MAX,
            occurrences: AspectOccurrences::default(),
        }
    }

    fn mean_distance(&self) -> f64 {
        if self.distances.is_empty() {
            return f64::INFINITY;
        }
        self.distances.iter().sum::<usize>() as f64 / self.distances.len() as f64
    }

    /// Most frequent surface order; ties go to the lexicographically smallest.
    fn dominant_order(&self) -> Option<&[String; 3]> {
        let mut best: Option<(&[String; 3], usize)> = None;
        for (order, count) in &self.surface_orders {
            if best.map(|(_, best_count)| *count > best_count).unwrap_or(true) {
                best = Some((order, *count));
            }
        }
        best.map(|(order, _)| order)
    }
}

impl<'a> TrigramExtractor<'a> {
    pub fn new(config: &'a NgramConfig, word_sets: &'a WordSets, rarity_threshold: f32) -> Self {
        Self {
            config,
            filter: TokenFilter::new(word_sets, rarity_threshold),
            candidates: HashMap::new(),
        }
    }

    pub fn extract(mut self, corpus: &Corpus, unigrams: &Unigrams, bigrams: &Bigrams) -> Trigrams {
        if bigrams.is_empty() {
            info!("trigrams: no accepted bigrams to extend");
            return Trigrams::default();
        }

        for sentence in corpus.sentences() {
            let tokens = &sentence.tokens;

            for (anchor_position, anchor) in tokens.iter().enumerate() {
                if !self.filter.is_anchor(anchor) {
                    continue;
                }

                let from = anchor_position.saturating_sub(self.config.window);
                let to = (anchor_position + self.config.window + 1).min(tokens.len());
                let partners: Vec<usize> = (from..to)
                    .filter(|position| *position != anchor_position)
                    .filter(|position| tokens[*position].lemma != anchor.lemma && self.filter.is_partner(&tokens[*position]))
                    .collect();

                for partner_position in &partners {
                    let partner = &tokens[*partner_position];
                    let parent_count = match bigrams.find(&anchor.lemma, &partner.lemma).and_then(|v| v.association()) {
                        Some(association) => association.sentence_count,
                        None => continue,
                    };

                    for third_position in &partners {
                        let third = &tokens[*third_position];
                        if third_position == partner_position || third.lemma == partner.lemma {
                            continue;
                        }

                        let denominator = parent_count * unigrams.lemma_count(&third.lemma);
                        let positions = [anchor_position, *partner_position, *third_position];
                        self.record(tokens, positions, denominator, sentence.review_idx, sentence.sentence_idx);
                    }
                }
            }
        }

        self.accept(corpus)
    }

    fn record(&mut self, tokens: &[Token], mut positions: [usize; 3], denominator: usize, review_idx: usize, sentence_idx: usize) {
        let [anchor_position, partner_position, third_position] = positions;
        let distance = third_position.abs_diff(anchor_position).min(third_position.abs_diff(partner_position));

        let mut key = positions.map(|v| tokens[v].lemma.clone());
        key.sort();

        positions.sort();
        let surface = positions.map(|v| tokens[v].lemma.clone());

        let candidate = self.candidates.entry(key).or_insert_with(TrigramCandidate::new);
        candidate.distances.push(distance);
        *candidate.surface_orders.entry(surface).or_insert(0) += 1;
        if denominator > 0 {
            candidate.best_denominator = candidate.best_denominator.min(denominator);
        }
        candidate.occurrences.record_review(review_idx);
        candidate.occurrences.record_mention(sentence_idx, anchor_position);
    }

    fn accept(self, corpus: &Corpus) -> Trigrams {
        let min_count = (self.config.min_pct * corpus.total_sentences() as f64).max(2.0);
        let total_candidates = self.candidates.len();

        let mut candidates: Vec<([String; 3], TrigramCandidate)> = self.candidates.into_iter().collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut trigrams = Trigrams::default();

        for (key, candidate) in candidates {
            let count = candidate.occurrences.sentence_count();
            if candidate.best_denominator == usize::MAX {
                continue;
            }

            let pmi = round_to(count as f64 / candidate.best_denominator as f64, 4);
            let mean_distance = round_to(candidate.mean_distance(), 2);

            if (count as f64) < min_count || pmi < self.config.pmi_pct || mean_distance >= self.config.max_avg_dist {
                debug!("rejecting trigram {}: count {}, pmi {}, mean distance {}", key.join(" "), count, pmi, mean_distance);
                continue;
            }

            let words = match candidate.dominant_order() {
                Some(order) => order.to_vec(),
                None => continue,
            };
            let association = Association {
                pmi,
                mean_distance,
                sentence_count: count,
            };

            trigrams.words.extend(words.iter().cloned());
            trigrams.aspects.push(Aspect::new(words, AspectKind::Trigram, candidate.occurrences, Some(association)));
        }

        info!("trigrams: {} candidates, {} accepted", total_candidates, trigrams.aspects.len());

        trigrams
    }
}

impl Trigrams {
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
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

// The extension rule above is inferred rather than taken from a reference
// implementation; these tests pin down the behaviour we chose.
#[cfg(test)]
mod tests {
    use {
        crate::{
            annotation::{ParsedSentence, TokenBuilder},
            bigram::BigramExtractor,
            config::UnigramConfig,
            corpus::Review,
            unigram::UnigramExtractor,
        },
        super::*,
    };

    fn sentence(words: &[(&str, &str, &str, f32)]) -> ParsedSentence {
        let text = words.iter().map(|v| v.0).collect::<Vec<_>>().join(" ");
        let tokens = words.iter()
            .map(|(lemma, tag, dep, rarity)| TokenBuilder::default()
                .surface(*lemma)
                .lemma(*lemma)
                .tag(*tag)
                .dep(*dep)
                .rarity(*rarity)
                .build()
                .unwrap())
            .collect();
        ParsedSentence::new(text, tokens).with_located_offsets()
    }

    fn long_battery_life() -> ParsedSentence {
        sentence(&[
            ("long", "JJ", "amod", -9.0),
            ("battery", "NN", "compound", -9.0),
            ("life", "NN", "nsubj", -8.0),
        ])
    }

    fn extract(sentences: Vec<ParsedSentence>) -> (Bigrams, Trigrams) {
        let reviews: Vec<Review> = (0..sentences.len())
            .map(|i| Review::builder().rating(4).text(i.to_string()).build())
            .collect();
        let annotator = move |text: &str| -> anyhow::Result<Vec<ParsedSentence>> {
            Ok(vec![sentences[text.parse::<usize>()?].clone()])
        };
        let corpus = Corpus::build("test", &reviews, &annotator);

        let word_sets = WordSets::default();
        let config = NgramConfig::default();
        let unigrams = UnigramExtractor::new(&UnigramConfig::default(), &word_sets, -7.5).extract(&corpus);
        let bigrams = BigramExtractor::new(&config, &word_sets, -7.5).extract(&corpus, &unigrams);
        let trigrams = TrigramExtractor::new(&config, &word_sets, -7.5).extract(&corpus, &unigrams, &bigrams);

        (bigrams, trigrams)
    }

    #[test]
    fn bigram_is_extended_with_third_word() {
        let (bigrams, trigrams) = extract(vec![long_battery_life(), long_battery_life()]);

        assert!(bigrams.find("battery", "life").is_some());
        assert_eq!(bigrams.find("battery", "long").unwrap().label(), "long battery");

        assert_eq!(trigrams.len(), 1);
        let aspect = &trigrams.aspects()[0];
        assert_eq!(aspect.label(), "long battery life");
        assert_eq!(aspect.review_count(), 2);

        let association = aspect.association().unwrap();
        assert_eq!(association.sentence_count, 2);
        assert_eq!(association.pmi, 0.5);
        assert_eq!(association.mean_distance, 1.0);
        assert!(trigrams.words().contains("long"));
    }

    #[test]
    fn trigram_needs_repeated_support() {
        let (_, trigrams) = extract(vec![
            long_battery_life(),
            long_battery_life(),
            sentence(&[("battery", "NN", "compound", -9.0), ("life", "NN", "nsubj", -8.0), ("awful", "JJ", "acomp", -9.0)]),
        ]);

        assert_eq!(trigrams.aspects().iter().map(|v| v.label()).collect::<Vec<_>>(), vec!["long battery life"]);
    }

    #[test]
    fn third_word_has_to_stay_close() {
        let battery_life_is_terrible = || sentence(&[
            ("battery", "NN", "compound", -9.0),
            ("life", "NN", "nsubj", -8.0),
            ("be", "VBZ", "ROOT", -4.0),
            ("terrible", "JJ", "acomp", -9.0),
        ]);
        let (bigrams, trigrams) = extract(vec![battery_life_is_terrible(), battery_life_is_terrible()]);

        assert_eq!(bigrams.len(), 1);
        assert!(trigrams.is_empty());
    }

    #[test]
    fn nothing_to_extend_without_bigrams() {
        let (bigrams, trigrams) = extract(vec![long_battery_life()]);

        assert!(bigrams.is_empty());
        assert!(trigrams.is_empty());
    }

    #[test]
    fn ties_pick_smallest_surface_order() {
        let mut candidate = TrigramCandidate::new();
        let order = |words: [&str; 3]| words.map(|v| v.to_owned());

        candidate.surface_orders.insert(order(["z", "a", "b"]), 2);
        candidate.surface_orders.insert(order(["a", "b", "z"]), 2);
        candidate.surface_orders.insert(order(["b", "a", "z"]), 1);

        assert_eq!(candidate.dominant_order(), Some(&order(["a", "b", "z"])));
    }
}
