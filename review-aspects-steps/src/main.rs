mod data_loading;
mod report;
mod utils;

use {
    std::{fs::{File, create_dir_all}, path::Path},
    anyhow::{Context, Result},
    tracing::{info, warn},
    review_aspects_core::{
        annotation::TextAnnotator,
        compare::common_aspects,
        config::{Config, InputConfig, SnippetConfig},
        entity::into_product_entity,
        pipeline::{AspectPipeline, AspectReport, ProductSummary},
        sentiment::{Lexicon, LexiconSum, SentimentScorer},
    },
    review_aspects_nlp::{annotation_file::AnnotationFile, lexicon::load_lexicon},
    crate::{
        data_loading::load_reviews,
        report::{comparison_report, no_aspects_report, product_report},
        utils::init_logging,
    },
};

fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config.logging);

    info!("review aspects");

    let input = config.input();
    if input.products().is_empty() {
        warn!("no products configured, add [[input.products]] entries to config.toml");
        return Ok(());
    }

    let annotator = annotator(&input)?;
    let lexicon = match input.lexicon() {
        Some(path) => load_lexicon(path)?,
        None => Lexicon::default(),
    };
    let lexicon_scorer = LexiconSum::new(lexicon.clone());
    let scorer = scorer(lexicon)?;

    let word_sets = config.word_sets();
    let snippet = config.snippet();
    let summary_config = config.summary();
    let output_dir = config.output().dir();
    create_dir_all(&output_dir).with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let pipeline = AspectPipeline::new(&config.extraction, &word_sets, annotator.as_ref(), scorer.as_ref(), &lexicon_scorer);

    let mut summaries = Vec::new();
    for product in input.products() {
        let reviews = load_reviews(&product.reviews)?;

        match pipeline.run(&product.name, &reviews) {
            AspectReport::Found(summary) => {
                save_product(&output_dir, &summary, &snippet)?;
                println!("{}", product_report(&summary, &snippet, &summary_config));
                summaries.push(summary);
            },
            AspectReport::NoAspects { product, reviews_parsed, sentences } => {
                println!("{}", no_aspects_report(&product, reviews_parsed, sentences));
            },
        }
    }

    match summaries.as_slice() {
        [first, second] => {
            let common = common_aspects(first, second, summary_config.common_min_pct);
            println!("{}", comparison_report(first, second, &common, &snippet, &summary_config));
        },
        [_, _, _, ..] => warn!("comparison is only done for two products, {} were summarized", summaries.len()),
        _ => {},
    }

    Ok(())
}

fn annotator(input: &InputConfig) -> Result<Box<dyn TextAnnotator>> {
    match input.annotations() {
        Some(path) => Ok(Box::new(AnnotationFile::load(path)?)),
        None => live_annotator(input),
    }
}

#[cfg(feature = "spacy")]
fn live_annotator(input: &InputConfig) -> Result<Box<dyn TextAnnotator>> {
    Ok(Box::new(review_aspects_nlp::spacy::SpacyAnnotator::load(&input.spacy_model())?))
}

#[cfg(not(feature = "spacy"))]
fn live_annotator(_input: &InputConfig) -> Result<Box<dyn TextAnnotator>> {
    anyhow::bail!("input.annotations is not set and spacy support is not compiled in (enable the spacy feature)")
}

#[cfg(feature = "bert")]
fn scorer(_lexicon: Lexicon) -> Result<Box<dyn SentimentScorer>> {
    Ok(Box::new(review_aspects_nlp::bert::BertScorer::load()?))
}

#[cfg(not(feature = "bert"))]
fn scorer(lexicon: Lexicon) -> Result<Box<dyn SentimentScorer>> {
    Ok(Box::new(review_aspects_core::sentiment::LexiconPolarity::new(lexicon)))
}

fn save_product(output_dir: &Path, summary: &ProductSummary, snippet: &SnippetConfig) -> Result<()> {
    let file_name: String = summary.name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let path = output_dir.join(format!("{}.json", file_name));

    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &into_product_entity(summary, snippet))
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("saved {} aspects of {} to {}", summary.aspects.len(), summary.name, path.display());
    Ok(())
}
