pub mod annotation;
pub mod aspect;
pub mod bigram;
pub mod compare;
pub mod config;
pub mod corpus;
pub mod entity;
pub mod pipeline;
pub mod polarity;
pub mod progress;
pub mod reconcile;
pub mod sentiment;
pub mod snippet;
pub mod trigram;
pub mod unigram;
pub mod wordsets;
