pub mod fetcher;

pub use fetcher::FeedClient;
