pub mod chunk;
pub mod partial_content_info;
