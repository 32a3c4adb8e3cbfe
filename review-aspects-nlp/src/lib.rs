pub mod annotation_file;
pub mod lexicon;
pub mod models;

#[cfg(feature = "spacy")]
pub mod spacy;

#[cfg(feature = "bert")]
pub mod bert;
