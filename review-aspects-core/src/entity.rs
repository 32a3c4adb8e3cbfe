use {
    typed_builder::TypedBuilder,
    serde::Serialize,
    crate::{
        aspect::AspectKind,
        config::SnippetConfig,
        pipeline::ProductSummary,
        polarity::{AspectSummary, ClassifiedRecord},
        snippet::extract_snippet,
    },
};

#[derive(TypedBuilder, Serialize, Debug)]
pub struct ProductEntity {
    name: String,
    reviews_total: usize,
    reviews_parsed: usize,
    sentences: usize,
    aspects: Vec<AspectEntity>,
}

#[derive(TypedBuilder, Serialize, Debug)]
pub struct AspectEntity {
    label: String,
    kind: AspectKind,
    review_count: usize,
    // [positive, mixed, negative], absent when no review could be classified
    bucket_pct: Option<[f64; 3]>,
    mean_rating: Option<f64>,
    records: RecordsEntity,
}

#[derive(TypedBuilder, Serialize, Debug)]
pub struct RecordsEntity {
    positive: Vec<ReviewRecordEntity>,
    mixed: Vec<ReviewRecordEntity>,
    negative: Vec<ReviewRecordEntity>,
}

#[derive(TypedBuilder, Serialize, Debug)]
pub struct ReviewRecordEntity {
    snippet: Option<String>,
    full_text: String,
    review_index: usize,
    rating: u8,
    score: f64,
}

impl AspectEntity {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bucket_pct(&self) -> Option<[f64; 3]> {
        self.bucket_pct
    }

    pub fn records(&self) -> &RecordsEntity {
        &self.records
    }
}

impl RecordsEntity {
    pub fn positive(&self) -> &[ReviewRecordEntity] {
        &self.positive
    }
}

pub fn into_product_entity(summary: &ProductSummary, snippet: &SnippetConfig) -> ProductEntity {
    ProductEntity::builder()
        .name(summary.name.clone())
        .reviews_total(summary.reviews_total)
        .reviews_parsed(summary.reviews_parsed)
        .sentences(summary.sentences)
        .aspects(summary.aspects.iter().map(|v| into_aspect_entity(v, snippet)).collect())
        .build()
}

pub fn into_aspect_entity(summary: &AspectSummary, snippet: &SnippetConfig) -> AspectEntity {
    let records = |records: &[ClassifiedRecord]| records.iter()
        .map(|v| into_review_record_entity(v, snippet))
        .collect::<Vec<_>>();

    AspectEntity::builder()
        .label(summary.label.clone())
        .kind(summary.kind)
        .review_count(summary.review_count)
        .bucket_pct(summary.shares.as_array())
        .mean_rating(summary.mean_rating)
        .records(RecordsEntity::builder()
            .positive(records(&summary.records.positive[..]))
            .mixed(records(&summary.records.mixed[..]))
            .negative(records(&summary.records.negative[..]))
            .build())
        .build()
}

fn into_review_record_entity(record: &ClassifiedRecord, snippet: &SnippetConfig) -> ReviewRecordEntity {
    ReviewRecordEntity::builder()
        .snippet(extract_snippet(&record.record.text, record.record.mention_offset, snippet.max_len, snippet.reach))
        .full_text(record.record.text.clone())
        .review_index(record.record.review_idx)
        .rating(record.record.rating)
        .score(record.score)
        .build()
}
