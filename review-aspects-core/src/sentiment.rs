//! Sentiment scoring capabilities and the two lexicon based scorers the
//! classifier uses when nothing better is plugged in.

use {
    std::collections::HashMap,
    once_cell::sync::Lazy,
};

const NEGATIONS: &[&str] = &["not", "no", "never", "n't", "nothing", "nobody", "none", "neither", "nor", "without", "cannot"];

const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "super", "incredibly", "absolutely", "totally", "too", "highly"];

const INTENSIFIER_SCALE: f64 = 1.3;
const MAX_VALENCE: f64 = 5.0;

// a subset of AFINN-111
const DEFAULT_VALENCES: &[(&str, i32)] = &[
    ("abandon", -2), ("abysmal", -3), ("amazing", 4), ("annoying", -2), ("annoyed", -2), ("awesome", 4),
    ("awful", -3), ("bad", -3), ("beautiful", 3), ("best", 3), ("better", 2), ("bored", -2), ("boring", -3),
    ("breaks", -1), ("broken", -1), ("bug", -2), ("buggy", -2), ("cheap", -1), ("clean", 2), ("clear", 1),
    ("comfortable", 2), ("crap", -3), ("crash", -2), ("cool", 1), ("cracked", -2), ("damage", -3),
    ("damaged", -3), ("dead", -3), ("defective", -2), ("delight", 3), ("disappoint", -2),
    ("disappointed", -2), ("disappointing", -2), ("disappointment", -2), ("dislike", -2),
    ("easy", 1), ("effective", 2), ("excellent", 3), ("excited", 3), ("fail", -2), ("failed", -2),
    ("failure", -2), ("fantastic", 4), ("fast", 1), ("fault", -2), ("faulty", -2), ("fine", 2),
    ("flawless", 3), ("fun", 4), ("garbage", -1), ("good", 3), ("gorgeous", 3), ("great", 3),
    ("happy", 3), ("hate", -3), ("helpful", 2), ("horrible", -3), ("ideal", 2), ("impressed", 3),
    ("impressive", 3), ("junk", -3), ("like", 2), ("love", 3), ("loved", 3), ("lovely", 3), ("mess", -2),
    ("nice", 3), ("outstanding", 5), ("pathetic", -2), ("perfect", 3), ("perfectly", 3), ("pleased", 3),
    ("poor", -2), ("poorly", -2), ("problem", -2), ("recommend", 2), ("reliable", 2), ("sad", -2),
    ("satisfied", 2), ("scratch", -1), ("sharp", 1), ("slow", -1), ("smooth", 2), ("solid", 2),
    ("sturdy", 2), ("stupid", -2), ("superb", 5), ("terrible", -3), ("terrific", 4), ("trash", -3),
    ("ugly", -3), ("unhappy", -2), ("unreliable", -2), ("useful", 2), ("useless", -2), ("waste", -1),
    ("wasted", -2), ("weak", -2), ("wonderful", 4), ("worse", -3), ("worst", -3), ("worth", 2),
    ("worthless", -2), ("wow", 4), ("wrong", -2),
];

static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon::new(
    DEFAULT_VALENCES.iter().map(|(word, valence)| (word.to_string(), *valence as f64))
));

pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F where F: Fn(&str) -> f64 {
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Word and phrase valences in the AFINN range of -5 to 5.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    // words in the longest phrase
    longest_phrase: usize,
}

/// Sum of the valences of every known word.
#[derive(Debug, Clone)]
pub struct LexiconSum {
    lexicon: Lexicon,
}

/// Mean valence of the known words scaled to `[-1, 1]`, flipped by a nearby
/// negation and boosted by a preceding intensifier.
#[derive(Debug, Clone)]
pub struct LexiconPolarity {
    lexicon: Lexicon,
}

impl Lexicon {
    pub fn new(valences: impl IntoIterator<Item = (String, f64)>) -> Self {
        let valences: HashMap<String, f64> = valences.into_iter()
            .map(|(entry, valence)| (entry.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "), valence))
            .filter(|(entry, _)| !entry.is_empty())
            .collect();
        let longest_phrase = valences.keys()
            .map(|entry| entry.split(' ').count())
            .fold(1, usize::max);

        Self {
            valences,
            longest_phrase,
        }
    }

    pub fn valence(&self, entry: &str) -> Option<f64> {
        self.valences.get(entry).copied()
    }

    /// Entries found in `words` as `(index of the first word, valence)`.
    /// At each position the longest phrase wins and its words are consumed.
    pub fn matches(&self, words: &[String]) -> Vec<(usize, f64)> {
        let mut found = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let longest = self.longest_phrase.min(words.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let valence = match len {
                    1 => self.valence(&words[i]),
                    _ => self.valence(&words[i..i + len].join(" ")),
                };
                valence.map(|v| (len, v))
            });

            match hit {
                Some((len, valence)) => {
                    found.push((i, valence));
                    i += len;
                },
                None => i += 1,
            }
        }

        found
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

impl LexiconSum {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
        }
    }
}

impl Default for LexiconSum {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl SentimentScorer for LexiconSum {
    fn score(&self, text: &str) -> f64 {
        self.lexicon.matches(&words(text)).into_iter().map(|(_, valence)| valence).sum()
    }
}

impl LexiconPolarity {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
        }
    }
}

impl Default for LexiconPolarity {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl SentimentScorer for LexiconPolarity {
    fn score(&self, text: &str) -> f64 {
        let words = words(text);
        let mut total = 0.0;
        let mut matched = 0;

        for (i, mut valence) in self.lexicon.matches(&words) {
            if i > 0 && INTENSIFIERS.contains(&words[i - 1].as_str()) {
                valence *= INTENSIFIER_SCALE;
            }
            if words[i.saturating_sub(2)..i].iter().any(|v| is_negation(v)) {
                valence = -valence;
            }

            total += valence;
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }

        (total / matched as f64 / MAX_VALENCE).clamp(-1.0, 1.0)
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

// lower-cased words, apostrophes kept so that "don't" stays a single negation
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|v| v.trim_matches('\''))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_adds_valences() {
        let scorer = LexiconSum::default();

        assert_eq!(scorer.score("Great screen, terrible battery."), 0.0);
        assert_eq!(scorer.score("Great, great SCREEN!"), 6.0);
        assert_eq!(scorer.score("no opinion"), 0.0);
    }

    #[test]
    fn polarity_is_scaled_mean() {
        let scorer = LexiconPolarity::default();

        assert_eq!(scorer.score("the screen is gorgeous"), 0.6);
        assert_eq!(scorer.score("the battery life is terrible"), -0.6);
        assert_eq!(scorer.score("it is a tablet"), 0.0);
    }

    #[test]
    fn negation_flips_and_intensifier_boosts() {
        let scorer = LexiconPolarity::default();

        assert!(scorer.score("the screen is not good") < 0.0);
        assert!(scorer.score("the screen isn't good") < 0.0);
        assert!(scorer.score("really good screen") > scorer.score("good screen"));
        assert_eq!(scorer.score("super superb super outstanding"), 1.0);
    }

    #[test]
    fn custom_lexicon_is_lowercased() {
        let lexicon = Lexicon::new(vec![("Meh".to_owned(), -1.0)]);

        assert_eq!(lexicon.len(), 1);
        assert_eq!(LexiconSum::new(lexicon).score("meh meh"), -2.0);
    }

    fn phrases() -> Lexicon {
        Lexicon::new(vec![
            ("can't stand".to_owned(), -3.0),
            ("stand".to_owned(), 1.0),
            ("does not  work".to_owned(), -3.0),
            ("work".to_owned(), 1.0),
        ])
    }

    #[test]
    fn longest_phrase_is_matched_first() {
        let scorer = LexiconSum::new(phrases());

        assert_eq!(scorer.score("I can't stand it"), -3.0);
        assert_eq!(scorer.score("The charger does not work"), -3.0);
        assert_eq!(scorer.score("It does work, I stand by it"), 2.0);
    }

    #[test]
    fn phrases_count_once_in_polarity() {
        let scorer = LexiconPolarity::new(phrases());

        assert_eq!(scorer.score("the charger does not work"), -0.6);
        assert!((scorer.score("i really can't stand it") + 0.78).abs() < 1e-9);
    }

    #[test]
    fn closures_can_score() {
        let scorer = |text: &str| text.len() as f64;
        assert_eq!(scorer.score("abc"), 3.0);
    }
}
