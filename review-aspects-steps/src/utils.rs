use {
    tracing::{Level, Metadata},
    tracing_subscriber::{prelude::*, filter::filter_fn},
    review_aspects_core::config::LoggingConfig,
};

// model downloads and python bindings log every request
const CHATTY_TARGETS: &[&str] = &["cached_path", "hyper", "reqwest", "rust_bert", "pyo3"];

pub fn init_logging(config: &LoggingConfig) {
    let builder = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO);

    if config.json {
        builder.json()
            .finish()
            .with(filter_fn(quiet_dependencies))
            .init();
    } else {
        builder
            .finish()
            .with(filter_fn(quiet_dependencies))
            .init();
    }
}

fn quiet_dependencies(metadata: &Metadata<'_>) -> bool {
    if CHATTY_TARGETS.iter().any(|target| metadata.target().starts_with(target)) {
        metadata.level() <= &Level::WARN
    } else {
        true
    }
}
