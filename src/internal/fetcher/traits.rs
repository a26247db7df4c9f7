pub mod chunk_fetcher;
