pub mod active_download;
pub mod cancelable_download;
pub mod download_info;
pub mod download_progress;
pub mod download_registry;
pub mod download_state;
