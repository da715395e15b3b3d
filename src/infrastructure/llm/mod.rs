mod perplexity_client;

pub use perplexity_client::PerplexityClient;
