pub mod cache_dir_chunk_store;
pub mod local_file_store;
