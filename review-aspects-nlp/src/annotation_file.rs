use {
    std::{collections::HashMap, fs::File, io::{BufRead, BufReader}, path::Path},
    anyhow::{anyhow, Context, Result},
    tracing::{info, warn},
    review_aspects_core::annotation::{ParsedSentence, TextAnnotator, normalize_ellipsis},
    crate::models::AnnotatedReview,
};

/// Annotations produced ahead of time by an external parser, one JSON
/// [`AnnotatedReview`] per line, looked up by review text.
pub struct AnnotationFile {
    annotations: HashMap<String, Vec<ParsedSentence>>,
}

impl AnnotationFile {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open annotation file {}", path.display()))?;
        let annotations = Self::from_reader(BufReader::new(file))?;
        info!("loaded {} annotated reviews from {}", annotations.len(), path.display());
        Ok(annotations)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut annotations = HashMap::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line.context("failed to read annotation file")?;
            if line.trim().is_empty() {
                continue;
            }

            let review: AnnotatedReview = serde_json::from_str(&line)
                .with_context(|| format!("invalid annotation on line {}", line_number + 1))?;

            let sentences = review.sentences.into_iter()
                .map(|sentence| if sentence.tokens.iter().all(|v| v.char_offset == 0) {
                    sentence.with_located_offsets()
                } else {
                    sentence
                })
                .collect();

            if annotations.insert(normalize_ellipsis(&review.text).into_owned(), sentences).is_some() {
                warn!("duplicate annotation on line {}, keeping the last one", line_number + 1);
            }
        }

        Ok(Self {
            annotations,
        })
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl TextAnnotator for AnnotationFile {
    fn annotate(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        self.annotations.get(text)
            .cloned()
            .ok_or_else(|| anyhow!("no annotation for review \"{}\"", text.chars().take(40).collect::<String>()))
    }
}
