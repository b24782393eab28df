//! Scheduled news pipeline: fetch articles, clean and tokenize their text,
//! store them without duplicate titles and keep daily keyword statistics.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod nlp;
pub mod pipeline;
pub mod source;
