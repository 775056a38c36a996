pub mod gcloud_token_provider;
pub mod static_token_provider;
