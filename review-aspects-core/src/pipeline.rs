use {
    tracing::{info, warn},
    crate::{
        annotation::TextAnnotator,
        aspect::Aspect,
        bigram::BigramExtractor,
        config::ExtractionConfig,
        corpus::{Corpus, Review},
        polarity::{AspectSummary, PolarityClassifier},
        reconcile::reconcile,
        sentiment::SentimentScorer,
        trigram::TrigramExtractor,
        unigram::UnigramExtractor,
        wordsets::WordSets,
    },
};

#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub name: String,
    pub reviews_total: usize,
    pub reviews_parsed: usize,
    pub sentences: usize,
    /// most reviewed first
    pub aspects: Vec<AspectSummary>,
}

#[derive(Debug, Clone)]
pub enum AspectReport {
    Found(ProductSummary),
    NoAspects {
        product: String,
        reviews_parsed: usize,
        sentences: usize,
    },
}

pub struct AspectPipeline<'a> {
    extraction: &'a ExtractionConfig,
    word_sets: &'a WordSets,
    annotator: &'a dyn TextAnnotator,
    scorer: &'a dyn SentimentScorer,
    lexicon_scorer: &'a dyn SentimentScorer,
}

impl<'a> AspectPipeline<'a> {
    pub fn new(
        extraction: &'a ExtractionConfig,
        word_sets: &'a WordSets,
        annotator: &'a dyn TextAnnotator,
        scorer: &'a dyn SentimentScorer,
        lexicon_scorer: &'a dyn SentimentScorer,
    ) -> Self {
        Self {
            extraction,
            word_sets,
            annotator,
            scorer,
            lexicon_scorer,
        }
    }

    pub fn run(&self, name: &str, reviews: &[Review]) -> AspectReport {
        let corpus = Corpus::build(name, reviews, self.annotator);
        self.summarize(&corpus)
    }

    pub fn summarize(&self, corpus: &Corpus) -> AspectReport {
        let aspects = self.extract_aspects(corpus);

        if aspects.is_empty() {
            warn!("no aspects found for {} in {} sentences", corpus.name(), corpus.total_sentences());
            return AspectReport::NoAspects {
                product: corpus.name().to_owned(),
                reviews_parsed: corpus.reviews_parsed(),
                sentences: corpus.total_sentences(),
            };
        }

        let classifier = PolarityClassifier::new(self.scorer, self.lexicon_scorer);
        let summaries: Vec<AspectSummary> = aspects.iter()
            .map(|aspect| classifier.summarize(aspect, corpus))
            .collect();

        info!("{}: classified {} aspects", corpus.name(), summaries.len());

        AspectReport::Found(ProductSummary {
            name: corpus.name().to_owned(),
            reviews_total: corpus.reviews_total(),
            reviews_parsed: corpus.reviews_parsed(),
            sentences: corpus.total_sentences(),
            aspects: summaries,
        })
    }

    /// Unigrams, bigrams and trigrams after reconciliation, ranked.
    pub fn extract_aspects(&self, corpus: &Corpus) -> Vec<Aspect> {
        let rarity_threshold = self.extraction.rarity_threshold;

        let unigrams = UnigramExtractor::new(&self.extraction.unigram, self.word_sets, rarity_threshold)
            .extract(corpus);
        let bigrams = BigramExtractor::new(&self.extraction.bigram, self.word_sets, rarity_threshold)
            .extract(corpus, &unigrams);
        let trigrams = TrigramExtractor::new(&self.extraction.trigram, self.word_sets, rarity_threshold)
            .extract(corpus, &unigrams, &bigrams);

        reconcile(unigrams.into_aspects(), bigrams.into_aspects(), trigrams.into_aspects())
    }
}

impl ProductSummary {
    pub fn aspect(&self, label: &str) -> Option<&AspectSummary> {
        self.aspects.iter().find(|v| v.label == label)
    }

    pub fn top(&self, n: usize) -> &[AspectSummary] {
        &self.aspects[..n.min(self.aspects.len())]
    }
}
