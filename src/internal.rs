pub mod chunk;
pub mod downloader;
pub mod fetcher;
pub mod registry;
pub mod states;
pub mod storage;
