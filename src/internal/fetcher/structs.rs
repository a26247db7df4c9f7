pub mod chunk_response;
pub mod reqwest_chunk_fetcher;
