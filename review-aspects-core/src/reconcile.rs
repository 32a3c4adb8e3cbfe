use {
    std::{cmp::Ordering, collections::BTreeSet},
    tracing::{info, debug},
    crate::aspect::Aspect,
};

// review set of a multi-word aspect, taken before any subtraction
struct Cover {
    label: String,
    words: Vec<String>,
    reviews: BTreeSet<usize>,
}

impl Cover {
    fn of(aspect: &Aspect) -> Self {
        Self {
            label: aspect.label().to_owned(),
            words: aspect.words().to_vec(),
            reviews: aspect.occurrences().reviews().clone(),
        }
    }

    fn covers(&self, aspect: &Aspect) -> bool {
        aspect.words().len() < self.words.len() && aspect.words().iter().all(|word| self.words.contains(word))
    }
}

/// Drops the credit shorter aspects get from reviews already attributed to a
/// longer aspect made of the same words, then ranks everything.
///
/// Unigrams lose the reviews of every bigram and trigram they are part of.
/// Bigrams lose the reviews of every trigram that contains both their words.
/// All subtraction works on review sets as they were before reconciliation.
pub fn reconcile(mut unigrams: Vec<Aspect>, mut bigrams: Vec<Aspect>, trigrams: Vec<Aspect>) -> Vec<Aspect> {
    let trigram_covers: Vec<Cover> = trigrams.iter().map(Cover::of).collect();
    let multi_word_covers: Vec<Cover> = bigrams.iter().map(Cover::of)
        .chain(trigrams.iter().map(Cover::of))
        .collect();

    let unigrams_reduced = subtract_covered(&mut unigrams, &multi_word_covers);
    let bigrams_reduced = subtract_covered(&mut bigrams, &trigram_covers);

    info!(
        "reconciled {} unigrams, {} bigrams and {} trigrams ({} unigrams and {} bigrams lost reviews)",
        unigrams.len(), bigrams.len(), trigrams.len(), unigrams_reduced, bigrams_reduced,
    );

    let mut aspects = unigrams;
    aspects.extend(bigrams);
    aspects.extend(trigrams);
    rank(&mut aspects);
    aspects
}

/// Most reviewed first, label breaks ties.
pub fn rank(aspects: &mut [Aspect]) {
    aspects.sort_by(|a, b| match b.review_count().cmp(&a.review_count()) {
        Ordering::Equal => a.label().cmp(b.label()),
        other => other,
    });
}

fn subtract_covered(aspects: &mut [Aspect], covers: &[Cover]) -> usize {
    let mut reduced = 0;

    for aspect in aspects.iter_mut() {
        let covering: Vec<&Cover> = covers.iter().filter(|cover| cover.covers(aspect)).collect();
        if covering.is_empty() {
            continue;
        }

        let covered: BTreeSet<usize> = covering.iter()
            .flat_map(|cover| cover.reviews.iter().copied())
            .collect();

        let before = aspect.review_count();
        aspect.occurrences_mut().remove_reviews(&covered);
        let after = aspect.review_count();

        if after < before {
            reduced += 1;
            debug!(
                "{}: {} -> {} reviews, covered by {}",
                aspect.label(),
                before,
                after,
                covering.iter().map(|v| v.label.as_str()).collect::<Vec<_>>().join(", "),
            );
        }
    }

    reduced
}

#[cfg(test)]
mod tests {
    use {
        crate::aspect::{AspectKind, AspectOccurrences},
        super::*,
    };

    fn aspect(label: &str, kind: AspectKind, reviews: &[usize]) -> Aspect {
        let mut occurrences = AspectOccurrences::default();
        for (sentence, review) in reviews.iter().enumerate() {
            occurrences.record_review(*review);
            occurrences.record_mention(sentence, 0);
        }

        Aspect::new(label.split(' ').map(|v| v.to_owned()).collect(), kind, occurrences, None)
    }

    fn counts(aspects: &[Aspect]) -> Vec<(&str, usize)> {
        aspects.iter().map(|v| (v.label(), v.review_count())).collect()
    }

    #[test]
    fn unigram_loses_reviews_of_containing_bigram() {
        let aspects = reconcile(
            vec![aspect("battery", AspectKind::Unigram, &[0, 1, 2, 3])],
            vec![aspect("battery life", AspectKind::Bigram, &[1, 3, 7])],
            Vec::new(),
        );

        assert_eq!(counts(&aspects), vec![("battery life", 3), ("battery", 2)]);
        let battery = aspects.iter().find(|v| v.label() == "battery").unwrap();
        assert_eq!(battery.occurrences().reviews().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn word_membership_not_substring() {
        let aspects = reconcile(
            vec![aspect("bat", AspectKind::Unigram, &[0, 1])],
            vec![aspect("battery life", AspectKind::Bigram, &[0, 1])],
            Vec::new(),
        );

        assert_eq!(aspects.iter().find(|v| v.label() == "bat").unwrap().review_count(), 2);
    }

    #[test]
    fn subtraction_uses_sets_before_reconciliation() {
        let aspects = reconcile(
            vec![aspect("life", AspectKind::Unigram, &[0, 1, 2, 3, 4])],
            vec![aspect("battery life", AspectKind::Bigram, &[0, 1, 2])],
            vec![aspect("long battery life", AspectKind::Trigram, &[2, 3])],
        );

        // life loses {0, 1, 2} ∪ {2, 3}; battery life loses {2}
        assert_eq!(counts(&aspects), vec![
            ("battery life", 2),
            ("long battery life", 2),
            ("life", 1),
        ]);
    }

    #[test]
    fn bigram_not_fully_inside_trigram_is_kept() {
        let aspects = reconcile(
            Vec::new(),
            vec![aspect("screen glare", AspectKind::Bigram, &[0, 1])],
            vec![aspect("bright screen size", AspectKind::Trigram, &[0, 1])],
        );

        assert_eq!(aspects.iter().find(|v| v.label() == "screen glare").unwrap().review_count(), 2);
    }

    #[test]
    fn ties_are_ranked_by_label() {
        let mut aspects = vec![
            aspect("zoom", AspectKind::Unigram, &[0, 1]),
            aspect("case", AspectKind::Unigram, &[0]),
            aspect("lens", AspectKind::Unigram, &[2, 3]),
        ];

        rank(&mut aspects);

        assert_eq!(counts(&aspects), vec![("lens", 2), ("zoom", 2), ("case", 1)]);
    }
}
