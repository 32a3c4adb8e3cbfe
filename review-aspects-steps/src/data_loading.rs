use {
    std::{fs::File, io::Read, path::Path},
    anyhow::{Context, Result},
    indicatif::ProgressBar,
    serde::Deserialize,
    tracing::{info, warn},
    review_aspects_core::corpus::Review,
};

#[derive(Deserialize, Debug)]
struct RawReviewEntry {
    rating: u8,
    text: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    headline: Option<String>,
}

pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    info!("loading reviews from {}", path.display());

    let file = File::open(path).with_context(|| format!("failed to open reviews file {}", path.display()))?;
    read_reviews(file).with_context(|| format!("failed to load reviews from {}", path.display()))
}

/// Reads `rating,text[,author,headline]` rows. Rows with a rating outside of
/// 1 to 5 are skipped.
pub fn read_reviews(source: impl Read) -> Result<Vec<Review>> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let records: Vec<_> = reader.records().collect();

    let pb = ProgressBar::new(records.len() as u64);
    let mut reviews = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let entry: RawReviewEntry = record
            .with_context(|| format!("failed to read row {}", row + 1))?
            .deserialize(Some(&headers))
            .with_context(|| format!("invalid review on row {}", row + 1))?;
        pb.inc(1);

        if !(1..=5).contains(&entry.rating) {
            warn!("skipping review on row {} with rating {}", row + 1, entry.rating);
            continue;
        }

        reviews.push(Review {
            rating: entry.rating,
            text: entry.text,
            author: entry.author.filter(|v| !v.is_empty()),
            headline: entry.headline.filter(|v| !v.is_empty()),
        });
    }

    pb.finish_and_clear();
    info!("loaded {} reviews", reviews.len());

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviews_with_optional_columns() {
        let csv = "rating,text,author,headline\n5,\"Great screen, sharp text.\",ann,Love it\n2,Battery died.,,\n";

        let reviews = read_reviews(csv.as_bytes()).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "Great screen, sharp text.");
        assert_eq!(reviews[0].headline.as_deref(), Some("Love it"));
        assert_eq!(reviews[1].rating, 2);
        assert_eq!(reviews[1].author, None);
    }

    #[test]
    fn minimal_columns_and_bad_ratings() {
        let csv = "rating,text\n0,Not a real rating.\n4,Fine.\n";

        let reviews = read_reviews(csv.as_bytes()).unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "Fine.");
    }

    #[test]
    fn unparseable_rating_is_an_error() {
        let csv = "rating,text\nfive,Great.\n";
        assert!(read_reviews(csv.as_bytes()).is_err());
    }
}
