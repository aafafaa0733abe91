use rand::Rng;

/// Pluggable source for the Sentiment feature column.
///
/// Sentiment is the only non-deterministic input to an otherwise
/// reproducible inference path, so it lives behind a trait: the app wires in
/// the random placeholder, tests wire in a fixed stub, and a real sentiment
/// feed can replace both later without touching the assembler.
pub trait SentimentSource: Send + Sync {
    /// One score per row, each in [-1.0, 1.0].
    fn scores(&self, len: usize) -> Vec<f64>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Placeholder sentiment: uniform random in [-1, 1], independent of price.
///
/// This makes repeated runs over identical price data able to yield
/// different predictions. That is an accepted property of the current
/// pipeline, not a bug; swap in a deterministic source to remove it.
pub struct UniformSentiment;

impl SentimentSource for UniformSentiment {
    fn scores(&self, len: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect()
    }

    fn signature(&self) -> &'static str {
        "uniform random placeholder"
    }
}

/// Deterministic stub: every row gets the same score. Test use only.
pub struct FixedSentiment(pub f64);

impl SentimentSource for FixedSentiment {
    fn scores(&self, len: usize) -> Vec<f64> {
        vec![self.0; len]
    }

    fn signature(&self) -> &'static str {
        "fixed stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_scores_stay_in_range() {
        let scores = UniformSentiment.scores(500);
        assert_eq!(scores.len(), 500);
        for score in scores {
            assert!((-1.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_fixed_scores_are_constant() {
        let scores = FixedSentiment(0.25).scores(10);
        assert!(scores.iter().all(|s| *s == 0.25));
    }
}
