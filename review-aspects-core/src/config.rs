use {
    std::{fs::read_to_string, path::PathBuf},
    tracing::warn,
    serde::Deserialize,
    crate::wordsets::WordSets,
};

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    pub wordsets: Option<WordSetsConfig>,
    pub snippet: Option<SnippetConfig>,
    pub summary: Option<SummaryConfig>,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ExtractionConfig {
    // spacy-style log probability, lower is rarer
    pub rarity_threshold: f32,
    pub unigram: UnigramConfig,
    pub bigram: NgramConfig,
    pub trigram: NgramConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UnigramConfig {
    /// share of all sentences a noun has to appear in
    pub min_pct: f64,
    /// share of the noun's dependents that have to be adjectival modifiers
    pub amod_pct: f64,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NgramConfig {
    pub window: usize,
    pub min_pct: f64,
    pub pmi_pct: f64,
    pub max_avg_dist: f64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WordSetsConfig {
    noun_tags: Option<Vec<String>>,
    filler_deps: Option<Vec<String>>,
    filler_tags: Option<Vec<String>>,
    non_aspects: Option<Vec<String>>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SnippetConfig {
    pub max_len: usize,
    pub reach: usize,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SummaryConfig {
    pub top_aspects: usize,
    pub common_min_pct: f64,
    /// snippets printed per bucket, all of them when unset
    pub snippets_per_bucket: Option<usize>,
    /// width of the side by side comparison
    pub line_len: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct InputConfig {
    #[serde(default)]
    products: Vec<ProductInputConfig>,
    annotations: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    spacy_model: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProductInputConfig {
    pub name: String,
    pub reviews: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputConfig {
    dir: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            wordsets: None,
            snippet: None,
            summary: None,
            input: None,
            output: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            rarity_threshold: -7.5,
            unigram: UnigramConfig::default(),
            bigram: NgramConfig::default(),
            trigram: NgramConfig::default(),
        }
    }
}

impl Default for UnigramConfig {
    fn default() -> Self {
        Self {
            min_pct: 0.01,
            amod_pct: 0.094,
        }
    }
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            window: 3,
            min_pct: 0.005,
            pmi_pct: 1.0 / 2500.0,
            max_avg_dist: 2.0,
        }
    }
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            max_len: 80,
            reach: 10,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_aspects: 10,
            common_min_pct: 0.03,
            snippets_per_bucket: None,
            line_len: 115,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            annotations: None,
            lexicon: None,
            spacy_model: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        read_to_string("./config.toml")
            .or_else(|_| read_to_string("/config/config.toml"))
            .map_err(|err| err.to_string())
            .and_then(|v| Self::from_toml(&v).map_err(|err| err.to_string()))
            .unwrap_or_else(|err| {
                warn!("failed to read config: {}", err);
                Config::default()
            })
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn word_sets(&self) -> WordSets {
        let defaults = WordSets::default();

        match self.wordsets.as_ref() {
            Some(overrides) => WordSets::new(
                overrides.noun_tags.clone().map(|v| v.into_iter().collect()).unwrap_or(defaults.noun_tags),
                overrides.filler_deps.clone().map(|v| v.into_iter().collect()).unwrap_or(defaults.filler_deps),
                overrides.filler_tags.clone().map(|v| v.into_iter().collect()).unwrap_or(defaults.filler_tags),
                overrides.non_aspects.clone().map(|v| v.into_iter().collect()).unwrap_or(defaults.non_aspects),
            ),
            None => defaults,
        }
    }

    pub fn snippet(&self) -> SnippetConfig {
        self.snippet.as_ref().cloned().unwrap_or_default()
    }

    pub fn summary(&self) -> SummaryConfig {
        self.summary.as_ref().cloned().unwrap_or_default()
    }

    pub fn input(&self) -> InputConfig {
        self.input.as_ref().cloned().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.as_ref().cloned().unwrap_or_default()
    }
}

impl InputConfig {
    pub fn products(&self) -> &[ProductInputConfig] {
        &self.products
    }

    pub fn annotations(&self) -> Option<&PathBuf> {
        self.annotations.as_ref()
    }

    pub fn lexicon(&self) -> Option<&PathBuf> {
        self.lexicon.as_ref()
    }

    pub fn spacy_model(&self) -> String {
        self.spacy_model.as_ref().cloned().unwrap_or("en_core_web_sm".to_owned())
    }
}

impl OutputConfig {
    pub fn dir(&self) -> PathBuf {
        self.dir.as_ref().cloned().unwrap_or(PathBuf::from("./output"))
    }
}
