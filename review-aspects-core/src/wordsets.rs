use {
    std::collections::HashSet,
    crate::annotation::Token,
};

// dependency labels that never carry a feature word
const FILLER_DEPS: &[&str] = &[
    "det", "aux", "cc", "punct", "mark", "", "neg", "nummod", "prt", "auxpass", "case", "expl",
    "preconj", "intj", "predet", "meta", "quantmod", "agent",
];

// fine-grained tags that never carry a feature word
const FILLER_TAGS: &[&str] = &[
    "IN", "PRP", "PRP$", "DT", "HYPH", "TO", ",", ".", "CC", "SP", "CD", "MD", "WDT", "RP", "WRB",
    "-LRB-", "-RRB-", ":", "WP", "POS", "``", "''", "SYM", "EX", "PDT", "UH", "NFP", "XX",
];

const NOUN_TAGS: &[&str] = &["NN", "NNP", "NNS"];

// nouns that are too generic to be a product aspect
const NON_ASPECTS: &[&str] = &[
    "product", "price", "device", "review", "item", "amazon", "everything", "company", "brand",
    "buy", "purchase", "cost", "year", "month", "day", "week", "hour", "problem", "issue", "give",
];

pub const ADJECTIVAL_MODIFIER: &str = "amod";

/// Tag, dependency and lemma stoplists used by the extractors.
#[derive(Debug, Clone)]
pub struct WordSets {
    pub noun_tags: HashSet<String>,
    pub filler_deps: HashSet<String>,
    pub filler_tags: HashSet<String>,
    pub non_aspects: HashSet<String>,
}

impl WordSets {
    pub fn new(
        noun_tags: HashSet<String>,
        filler_deps: HashSet<String>,
        filler_tags: HashSet<String>,
        non_aspects: HashSet<String>,
    ) -> Self {
        Self {
            noun_tags,
            filler_deps,
            filler_tags,
            non_aspects,
        }
    }

    pub fn is_noun_tag(&self, tag: &str) -> bool {
        self.noun_tags.contains(tag)
    }

    pub fn is_filler(&self, dep: &str, tag: &str) -> bool {
        self.filler_deps.contains(dep) || self.filler_tags.contains(tag)
    }

    pub fn is_non_aspect(&self, lemma: &str) -> bool {
        self.non_aspects.contains(lemma)
    }
}

impl Default for WordSets {
    fn default() -> Self {
        Self::new(
            to_set(NOUN_TAGS),
            to_set(FILLER_DEPS),
            to_set(FILLER_TAGS),
            to_set(NON_ASPECTS),
        )
    }
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|v| v.to_string()).collect()
}

/// Token level checks shared by the n-gram extractors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenFilter<'a> {
    word_sets: &'a WordSets,
    rarity_threshold: f32,
}

impl<'a> TokenFilter<'a> {
    pub fn new(word_sets: &'a WordSets, rarity_threshold: f32) -> Self {
        Self {
            word_sets,
            rarity_threshold,
        }
    }

    /// A noun that may anchor a multi-word aspect.
    pub fn is_anchor(&self, token: &Token) -> bool {
        self.word_sets.is_noun_tag(&token.tag)
            && is_single_word(&token.lemma)
            && !self.word_sets.is_non_aspect(&token.lemma)
    }

    pub fn is_unigram_candidate(&self, token: &Token) -> bool {
        self.is_anchor(token) && self.is_rare(token)
    }

    /// A word near an anchor that may complete a multi-word aspect.
    pub fn is_partner(&self, token: &Token) -> bool {
        self.is_rare(token)
            && is_single_word(&token.lemma)
            && !self.word_sets.is_filler(&token.dep, &token.tag)
            && !self.word_sets.is_non_aspect(&token.lemma)
    }

    fn is_rare(&self, token: &Token) -> bool {
        token.rarity < self.rarity_threshold
    }
}

fn is_single_word(lemma: &str) -> bool {
    !lemma.is_empty() && !lemma.contains(char::is_whitespace)
}
