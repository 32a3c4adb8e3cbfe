use review_aspects_core::{
    compare::CommonAspect,
    config::{SnippetConfig, SummaryConfig},
    pipeline::ProductSummary,
    polarity::{AspectSummary, PolarityBucket},
    snippet::extract_snippet,
};

const RULE_WIDTH: usize = 40;
const BUCKET_RULE_WIDTH: usize = 28;

const BUCKETS: [(PolarityBucket, &str); 3] = [
    (PolarityBucket::Positive, "Positive Sentiment"),
    (PolarityBucket::Mixed, "Mixed Sentiment"),
    (PolarityBucket::Negative, "Negative Sentiment"),
];

// how one aspect report is laid out as a column of lines
struct Layout {
    /// every line is padded to this many characters
    width: usize,
    snippet_len: usize,
    reach: usize,
    limit: Option<usize>,
    /// snippet rows kept per bucket even when there are fewer snippets
    reserved: [usize; 3],
}

pub fn product_report(summary: &ProductSummary, snippet: &SnippetConfig, config: &SummaryConfig) -> String {
    let mut report = String::new();

    report.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    report.push_str(&format!(
        "{}: {} of {} reviews parsed, {} sentences, {} aspects\n",
        summary.name, summary.reviews_parsed, summary.reviews_total, summary.sentences, summary.aspects.len(),
    ));
    report.push_str(&format!("{}\n\n", "=".repeat(RULE_WIDTH)));

    for aspect in summary.top(config.top_aspects) {
        report.push_str(&aspect_report(aspect, snippet, config.snippets_per_bucket));
    }

    report
}

pub fn no_aspects_report(product: &str, reviews_parsed: usize, sentences: usize) -> String {
    format!("{}: no aspects found in {} reviews ({} sentences)\n", product, reviews_parsed, sentences)
}

/// Mean rating, bucket shares and up to `limit` snippets per bucket.
pub fn aspect_report(aspect: &AspectSummary, snippet: &SnippetConfig, limit: Option<usize>) -> String {
    let layout = Layout {
        width: 0,
        snippet_len: snippet.max_len,
        reach: snippet.reach,
        limit,
        reserved: [0; 3],
    };

    aspect_lines(aspect, &layout).into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Both products' reports of every common aspect, side by side.
pub fn comparison_report(
    first: &ProductSummary,
    second: &ProductSummary,
    common: &[CommonAspect],
    snippet: &SnippetConfig,
    config: &SummaryConfig,
) -> String {
    let width = config.line_len.saturating_sub(1) / 2;
    let mut report = String::new();

    report.push_str(&format!("{}\n", "=".repeat(config.line_len)));
    report.push_str(&format!("{} vs {}: {} aspects in common\n", first.name, second.name, common.len()));
    report.push_str(&format!("{}\n", "=".repeat(config.line_len)));
    report.push_str(&side_by_side(&first.name, &second.name, width));
    report.push('\n');

    for aspect in common.iter().take(config.top_aspects) {
        let (left, right) = match (first.aspect(&aspect.label), second.aspect(&aspect.label)) {
            (Some(left), Some(right)) => (left, right),
            _ => continue,
        };

        let reserved = BUCKETS.map(|(bucket, _)| {
            let rows = left.records.bucket(bucket).len().max(right.records.bucket(bucket).len());
            config.snippets_per_bucket.map_or(rows, |limit| rows.min(limit))
        });
        let layout = Layout {
            width,
            snippet_len: width,
            reach: snippet.reach,
            limit: config.snippets_per_bucket,
            reserved,
        };

        let left_lines = aspect_lines(left, &layout);
        let right_lines = aspect_lines(right, &layout);
        for (left, right) in left_lines.iter().zip(right_lines.iter()) {
            report.push_str(&side_by_side(left, right, width));
        }
    }

    report
}

fn side_by_side(left: &str, right: &str, width: usize) -> String {
    let line = format!("{:<width$} {}", left, right, width = width);
    format!("{}\n", line.trim_end())
}

// line count only depends on `layout`, so two columns with the same layout line up
fn aspect_lines(aspect: &AspectSummary, layout: &Layout) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(aspect.label.clone());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(String::new());

    lines.push(match aspect.mean_rating {
        Some(rating) => format!("average rating: {:.2}", rating),
        None => "average rating: n/a".to_owned(),
    });

    match aspect.shares.as_array() {
        Some([positive, mixed, negative]) => {
            lines.push(format!("positive: {}%", positive));
            lines.push(format!("mixed: {}%", mixed));
            lines.push(format!("negative: {}%", negative));
        },
        None => {
            lines.push("positive: n/a".to_owned());
            lines.push("mixed: n/a".to_owned());
            lines.push("negative: n/a".to_owned());
        },
    }
    lines.push(String::new());

    for ((bucket, title), reserved) in BUCKETS.iter().zip(layout.reserved) {
        lines.push(title.to_string());
        lines.push("-".repeat(BUCKET_RULE_WIDTH));

        let snippets: Vec<String> = aspect.records.bucket(*bucket).iter()
            .filter_map(|v| extract_snippet(&v.record.text, v.record.mention_offset, layout.snippet_len, layout.reach))
            .take(layout.limit.unwrap_or(usize::MAX))
            .collect();
        let padding = reserved.saturating_sub(snippets.len()) + 1;

        lines.extend(snippets);
        lines.extend(std::iter::repeat(String::new()).take(padding));
    }

    lines.into_iter()
        .map(|line| format!("{:<width$}", line, width = layout.width))
        .collect()
}
