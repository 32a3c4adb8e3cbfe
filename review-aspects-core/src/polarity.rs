//! Per review sentiment of an aspect.
//!
//! For one aspect every review that mentions it becomes a record holding the
//! mentioning sentences. Records are scored, put into a bucket by combining
//! the star rating with two sentiment scorers, then ranked and summarised.

use {
    std::cmp::Ordering,
    serde::Serialize,
    tracing::debug,
    crate::{
        aspect::{Aspect, AspectKind, round_to},
        corpus::Corpus,
        sentiment::SentimentScorer,
    },
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolarityBucket {
    Positive,
    Mixed,
    Negative,
}

/// Everything one review says about one aspect.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectReviewRecord {
    pub review_idx: usize,
    pub rating: u8,
    pub text: String,
    /// byte offset of the first mention inside `text`
    pub mention_offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: AspectReviewRecord,
    pub score: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum BucketShares {
    Classified {
        positive: f64,
        mixed: f64,
        negative: f64,
    },
    NoMentions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketedRecords {
    pub positive: Vec<ClassifiedRecord>,
    pub mixed: Vec<ClassifiedRecord>,
    pub negative: Vec<ClassifiedRecord>,
}

#[derive(Debug, Clone)]
pub struct AspectSummary {
    pub label: String,
    pub kind: AspectKind,
    pub review_count: usize,
    pub shares: BucketShares,
    pub mean_rating: Option<f64>,
    pub records: BucketedRecords,
}

pub struct PolarityClassifier<'a> {
    scorer: &'a dyn SentimentScorer,
    lexicon_scorer: &'a dyn SentimentScorer,
}

/// Buckets one record. `lexicon_score` is only evaluated by the rules that
/// need a second opinion.
pub fn classify(rating: u8, score: f64, lexicon_score: impl FnOnce() -> f64) -> PolarityBucket {
    use PolarityBucket::*;

    match rating {
        5 if score > 0.1 => Positive,
        4 if score > 0.45 => Positive,
        4 if score > 0.2 => if lexicon_score() >= 4.0 { Positive } else { Mixed },
        3 if score > 0.7 => Positive,
        3 if score < 0.0 => Negative,
        2 if score < 0.0 => Negative,
        2 if score <= 0.175 => if lexicon_score() < 0.0 { Negative } else { Mixed },
        1 if score < 0.0 => Negative,
        1 if score <= 0.2 => if lexicon_score() < 0.0 { Negative } else { Mixed },
        _ => Mixed,
    }
}

/// Groups the sentences mentioning `aspect` by review, in order of first mention.
pub fn collect_records(aspect: &Aspect, corpus: &Corpus) -> Vec<AspectReviewRecord> {
    let reviews = aspect.occurrences().reviews();
    let mut records: Vec<AspectReviewRecord> = Vec::new();
    let mut previous_sentence = None;

    for (sentence_idx, position) in aspect.occurrences().mentions() {
        if previous_sentence == Some(sentence_idx) {
            continue;
        }

        let sentence = match corpus.sentence(sentence_idx) {
            Some(v) => v,
            None => continue,
        };
        if !reviews.contains(&sentence.review_idx) {
            continue;
        }
        previous_sentence = Some(sentence_idx);

        let record_idx = match records.iter().position(|v| v.review_idx == sentence.review_idx) {
            Some(v) => v,
            None => {
                records.push(AspectReviewRecord {
                    review_idx: sentence.review_idx,
                    rating: sentence.rating,
                    text: String::new(),
                    mention_offset: 0,
                });
                records.len() - 1
            }
        };

        let record = &mut records[record_idx];
        if record.text.is_empty() {
            record.mention_offset = sentence.prefix_len(position);
        }
        if !record.text.is_empty() && !record.text.ends_with(char::is_whitespace) {
            record.text.push(' ');
        }
        record.text.push_str(&sentence.text);
    }

    records
}

impl<'a> PolarityClassifier<'a> {
    pub fn new(scorer: &'a dyn SentimentScorer, lexicon_scorer: &'a dyn SentimentScorer) -> Self {
        Self {
            scorer,
            lexicon_scorer,
        }
    }

    pub fn classify_record(&self, record: AspectReviewRecord) -> (PolarityBucket, ClassifiedRecord) {
        let score = round_to(self.scorer.score(&record.text), 3);
        let bucket = classify(record.rating, score, || self.lexicon_scorer.score(&record.text));

        (bucket, ClassifiedRecord { record, score })
    }

    pub fn summarize(&self, aspect: &Aspect, corpus: &Corpus) -> AspectSummary {
        let records = collect_records(aspect, corpus);

        let mean_rating = if records.is_empty() {
            None
        } else {
            Some(records.iter().map(|v| v.rating as f64).sum::<f64>() / records.len() as f64)
        };

        let mut buckets = BucketedRecords::default();
        for record in records {
            let (bucket, classified) = self.classify_record(record);
            buckets.push(bucket, classified);
        }
        buckets.rank();

        let shares = buckets.shares();
        debug!("{}: {} records, shares {:?}", aspect.label(), buckets.len(), shares);

        AspectSummary {
            label: aspect.label().to_owned(),
            kind: aspect.kind(),
            review_count: aspect.review_count(),
            shares,
            mean_rating,
            records: buckets,
        }
    }
}

impl BucketedRecords {
    pub fn push(&mut self, bucket: PolarityBucket, record: ClassifiedRecord) {
        self.bucket_mut(bucket).push(record);
    }

    pub fn bucket(&self, bucket: PolarityBucket) -> &[ClassifiedRecord] {
        match bucket {
            PolarityBucket::Positive => &self.positive,
            PolarityBucket::Mixed => &self.mixed,
            PolarityBucket::Negative => &self.negative,
        }
    }

    fn bucket_mut(&mut self, bucket: PolarityBucket) -> &mut Vec<ClassifiedRecord> {
        match bucket {
            PolarityBucket::Positive => &mut self.positive,
            PolarityBucket::Mixed => &mut self.mixed,
            PolarityBucket::Negative => &mut self.negative,
        }
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.mixed.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most representative records first: highest score for positive and
    /// mixed, lowest for negative.
    pub fn rank(&mut self) {
        let descending = |a: &ClassifiedRecord, b: &ClassifiedRecord| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);

        self.positive.sort_by(descending);
        self.mixed.sort_by(descending);
        self.negative.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    }

    pub fn shares(&self) -> BucketShares {
        let total = self.len();
        if total == 0 {
            return BucketShares::NoMentions;
        }

        let pct = |count: usize| round_to(count as f64 / total as f64 * 100.0, 3);

        BucketShares::Classified {
            positive: pct(self.positive.len()),
            mixed: pct(self.mixed.len()),
            negative: pct(self.negative.len()),
        }
    }
}

impl BucketShares {
    /// `[positive, mixed, negative]`
    pub fn as_array(&self) -> Option<[f64; 3]> {
        match self {
            BucketShares::Classified { positive, mixed, negative } => Some([*positive, *mixed, *negative]),
            BucketShares::NoMentions => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        std::cell::Cell,
        crate::{
            annotation::{ParsedSentence, TokenBuilder},
            aspect::AspectOccurrences,
            corpus::Review,
        },
        super::*,
    };

    fn record(review_idx: usize, rating: u8, text: &str) -> AspectReviewRecord {
        AspectReviewRecord {
            review_idx,
            rating,
            text: text.to_owned(),
            mention_offset: 0,
        }
    }

    fn classified(score: f64) -> ClassifiedRecord {
        ClassifiedRecord {
            record: record(0, 3, ""),
            score,
        }
    }

    #[test]
    fn decision_table() {
        use PolarityBucket::*;

        let cases: &[(u8, f64, f64, PolarityBucket)] = &[
            (5, 0.11, 0.0, Positive),
            (5, 0.10, 10.0, Mixed),
            (4, 0.46, -10.0, Positive),
            (4, 0.30, 4.0, Positive),
            (4, 0.30, 3.0, Mixed),
            (4, 0.20, 10.0, Mixed),
            (3, 0.71, 0.0, Positive),
            (3, 0.70, 0.0, Mixed),
            (3, -0.01, 0.0, Negative),
            (2, -0.5, 5.0, Negative),
            (2, 0.175, -1.0, Negative),
            (2, 0.175, 0.0, Mixed),
            (2, 0.18, -5.0, Mixed),
            (1, -0.01, 5.0, Negative),
            (1, 0.2, -1.0, Negative),
            (1, 0.2, 1.0, Mixed),
            (1, 0.21, -5.0, Mixed),
            (0, 0.9, 9.0, Mixed),
        ];

        for (rating, score, afinn, expected) in cases {
            assert_eq!(classify(*rating, *score, || *afinn), *expected, "rating {} score {}", rating, score);
        }
    }

    #[test]
    fn lexicon_score_is_only_consulted_when_needed() {
        let calls = Cell::new(0);
        let lexicon = || {
            calls.set(calls.get() + 1);
            -1.0
        };

        classify(5, 0.9, lexicon);
        assert_eq!(calls.get(), 0);

        classify(1, 0.1, lexicon);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn records_are_ranked_by_score() {
        let mut buckets = BucketedRecords::default();
        for score in [0.2, 0.9, 0.5] {
            buckets.push(PolarityBucket::Positive, classified(score));
            buckets.push(PolarityBucket::Negative, classified(-score));
        }

        buckets.rank();

        let scores = |records: &[ClassifiedRecord]| records.iter().map(|v| v.score).collect::<Vec<_>>();
        assert_eq!(scores(buckets.bucket(PolarityBucket::Positive)), vec![0.9, 0.5, 0.2]);
        assert_eq!(scores(buckets.bucket(PolarityBucket::Negative)), vec![-0.9, -0.5, -0.2]);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let mut buckets = BucketedRecords::default();
        assert_eq!(buckets.shares(), BucketShares::NoMentions);

        buckets.push(PolarityBucket::Positive, classified(0.5));
        buckets.push(PolarityBucket::Mixed, classified(0.1));
        buckets.push(PolarityBucket::Negative, classified(-0.5));

        let shares = buckets.shares().as_array().unwrap();
        assert_eq!(shares, [33.333, 33.333, 33.333]);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() <= 0.1);
    }

    #[test]
    fn sentences_are_merged_per_review() {
        let sentences = vec![
            vec!["The screen is sharp.", "I like the screen colors."],
            vec!["Great battery.", "The screen scratches though."],
        ];
        let reviews: Vec<Review> = (0..sentences.len())
            .map(|i| Review::builder().rating(4).text(i.to_string()).build())
            .collect();
        let annotator = move |text: &str| -> anyhow::Result<Vec<ParsedSentence>> {
            Ok(sentences[text.parse::<usize>()?].iter()
                .map(|sentence| {
                    let tokens = sentence.split(' ')
                        .map(|word| TokenBuilder::default().surface(word).lemma(word).tag("NN").build().unwrap())
                        .collect();
                    ParsedSentence::new(sentence.to_string(), tokens).with_located_offsets()
                })
                .collect())
        };
        let corpus = Corpus::build("tablet", &reviews, &annotator);

        let mut occurrences = AspectOccurrences::default();
        for (sentence, position) in [(0, 1), (1, 3), (3, 1)] {
            occurrences.record_review(corpus.sentences()[sentence].review_idx);
            occurrences.record_mention(sentence, position);
        }
        let aspect = Aspect::new(vec!["screen".to_owned()], AspectKind::Unigram, occurrences, None);

        let records = collect_records(&aspect, &corpus);

        assert_eq!(records, vec![
            AspectReviewRecord {
                review_idx: 0,
                rating: 4,
                text: "The screen is sharp. I like the screen colors.".to_owned(),
                mention_offset: 4,
            },
            AspectReviewRecord {
                review_idx: 1,
                rating: 4,
                text: "The screen scratches though.".to_owned(),
                mention_offset: 4,
            },
        ]);
    }

    #[test]
    fn subtracted_reviews_are_not_collected() {
        let reviews = vec![Review::builder().rating(2).text("0").build(), Review::builder().rating(5).text("1").build()];
        let annotator = |text: &str| -> anyhow::Result<Vec<ParsedSentence>> {
            let token = TokenBuilder::default().surface("zoom").lemma("zoom").tag("NN").build().unwrap();
            Ok(vec![ParsedSentence::new(format!("zoom {}", text), vec![token])])
        };
        let corpus = Corpus::build("camera", &reviews, &annotator);

        let mut occurrences = AspectOccurrences::default();
        occurrences.record_review(0);
        occurrences.record_review(1);
        occurrences.record_mention(0, 0);
        occurrences.record_mention(1, 0);
        occurrences.remove_reviews(&[1].into_iter().collect());

        let aspect = Aspect::new(vec!["zoom".to_owned()], AspectKind::Unigram, occurrences, None);
        let scorer = |_: &str| -0.5;
        let summary = PolarityClassifier::new(&scorer, &scorer).summarize(&aspect, &corpus);

        assert_eq!(summary.review_count, 1);
        assert_eq!(summary.mean_rating, Some(2.0));
        assert_eq!(summary.records.negative.len(), 1);
        assert_eq!(summary.shares, BucketShares::Classified { positive: 0.0, mixed: 0.0, negative: 100.0 });
    }
}
