pub mod chunk_store;
pub mod file_store;
