use {
    std::cmp::Ordering,
    serde::Serialize,
    crate::pipeline::ProductSummary,
};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommonAspect {
    pub label: String,
    pub review_counts: [usize; 2],
    /// share of parsed reviews mentioning the aspect, per product
    pub shares: [f64; 2],
    pub score: f64,
}

/// Aspects both products are discussed for, each in at least `min_pct` of
/// its reviews. Ranked by `p1 * p2 / (p1 + p2)`.
pub fn common_aspects(a: &ProductSummary, b: &ProductSummary, min_pct: f64) -> Vec<CommonAspect> {
    if a.reviews_parsed == 0 || b.reviews_parsed == 0 {
        return Vec::new();
    }

    let mut common: Vec<CommonAspect> = a.aspects.iter()
        .filter_map(|first| b.aspect(&first.label).map(|second| (first, second)))
        .map(|(first, second)| {
            let p1 = first.review_count as f64 / a.reviews_parsed as f64;
            let p2 = second.review_count as f64 / b.reviews_parsed as f64;

            CommonAspect {
                label: first.label.clone(),
                review_counts: [first.review_count, second.review_count],
                shares: [p1, p2],
                score: if p1 + p2 > 0.0 { p1 * p2 / (p1 + p2) } else { 0.0 },
            }
        })
        .filter(|v| v.shares[0] >= min_pct && v.shares[1] >= min_pct)
        .collect();

    common.sort_by(|x, y| match y.score.partial_cmp(&x.score).unwrap_or(Ordering::Equal) {
        Ordering::Equal => x.label.cmp(&y.label),
        other => other,
    });

    common
}
