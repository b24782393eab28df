mod file;
mod news_api;

pub use file::load_batch_file;
pub use news_api::NewsApiClient;
