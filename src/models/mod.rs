mod article;
mod report;
mod stats;

pub use article::{Article, NewArticle, PreprocessedArticle, RawArticle};
pub use report::{AggregateReport, IngestReport, PreprocessReport};
pub use stats::DailyStat;
