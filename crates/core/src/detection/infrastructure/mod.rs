pub mod image_file_loader;
pub mod vision_http_client;
