use {
    anyhow::Result,
    rust_bert::pipelines::sentiment::{Sentiment, SentimentModel, SentimentPolarity},
    tracing::info,
    review_aspects_core::sentiment::SentimentScorer,
};

/// Transformer polarity mapped to `[-1, 1]`.
pub struct BertScorer {
    model: SentimentModel,
}

impl BertScorer {
    pub fn load() -> Result<Self> {
        let model = SentimentModel::new(Default::default())?;
        info!("loaded sentiment model");

        Ok(Self {
            model,
        })
    }
}

impl SentimentScorer for BertScorer {
    fn score(&self, text: &str) -> f64 {
        self.model.predict(&[text]).first().map(signed_score).unwrap_or(0.0)
    }
}

// the model reports the confidence of the winning class, at least 0.5
fn signed_score(sentiment: &Sentiment) -> f64 {
    let positive = match sentiment.polarity {
        SentimentPolarity::Positive => sentiment.score,
        SentimentPolarity::Negative => 1.0 - sentiment.score,
    };

    2.0 * positive - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_maps_to_signed_score() {
        let sentiment = |polarity, score| Sentiment { polarity, score };

        assert_eq!(signed_score(&sentiment(SentimentPolarity::Positive, 1.0)), 1.0);
        assert_eq!(signed_score(&sentiment(SentimentPolarity::Negative, 1.0)), -1.0);
        assert_eq!(signed_score(&sentiment(SentimentPolarity::Positive, 0.75)), 0.5);
        assert_eq!(signed_score(&sentiment(SentimentPolarity::Negative, 0.75)), -0.5);
    }
}
