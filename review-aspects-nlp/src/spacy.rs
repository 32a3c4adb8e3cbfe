use {
    anyhow::{Context, Result},
    pyo3::prelude::*,
    tracing::info,
    review_aspects_core::annotation::{ParsedSentence, TextAnnotator, Token},
};

/// Live annotation with a spaCy pipeline running in the embedded interpreter.
pub struct SpacyAnnotator {
    nlp: Py<PyAny>,
}

impl SpacyAnnotator {
    pub fn load(model: &str) -> Result<Self> {
        let nlp = Python::with_gil(|py| -> Result<Py<PyAny>> {
            let spacy = py.import("spacy").context("failed to import spacy, is it installed?")?;
            let nlp = spacy.call_method1("load", (model,))
                .with_context(|| format!("failed to load spacy model {}", model))?;
            Ok(nlp.into())
        })?;

        info!("loaded spacy model {}", model);

        Ok(Self {
            nlp,
        })
    }
}

impl TextAnnotator for SpacyAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        Python::with_gil(|py| {
            let nlp = self.nlp.as_ref(py);
            let vocab = nlp.getattr("vocab")?;
            let doc = nlp.call1((text,))?;
            let mut sentences = Vec::new();

            for sentence in doc.getattr("sents")?.iter()? {
                let sentence = sentence?;
                let sentence_text: String = sentence.getattr("text_with_ws")?.extract()?;
                let sentence_start: usize = sentence.getattr("start_char")?.extract()?;

                let mut tokens = Vec::new();
                for token in sentence.iter()? {
                    tokens.push(extract_token(token?, vocab, &sentence_text, sentence_start)?);
                }

                sentences.push(ParsedSentence::new(sentence_text, tokens));
            }

            Ok(sentences)
        })
    }
}

fn extract_token(token: &PyAny, vocab: &PyAny, sentence_text: &str, sentence_start: usize) -> PyResult<Token> {
    let char_idx: usize = token.getattr("idx")?.extract()?;
    let lemma: String = token.getattr("lemma_")?.extract()?;

    Ok(Token {
        surface: token.getattr("text")?.extract()?,
        rarity: lemma_rarity(vocab, &lemma)?,
        lemma,
        tag: token.getattr("tag_")?.extract()?,
        dep: token.getattr("dep_")?.extract()?,
        head_lemma: token.getattr("head")?.getattr("lemma_")?.extract()?,
        char_offset: byte_offset(sentence_text, char_idx.saturating_sub(sentence_start)),
    })
}

// "batteries" and "battery" share the rarity of the lemma
fn lemma_rarity(vocab: &PyAny, lemma: &str) -> PyResult<f32> {
    vocab.get_item(lemma)?.getattr("prob")?.extract()
}

// spacy counts characters, sentence text is sliced by bytes
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(text.len())
}
