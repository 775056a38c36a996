//! Shared command-line plumbing for the `faces-export` and `faces-stream`
//! binaries: common flags, config resolution and adapter construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;

use facesink_core::auth::domain::access_token_provider::AccessTokenProvider;
use facesink_core::auth::infrastructure::gcloud_token_provider::GcloudTokenProvider;
use facesink_core::auth::infrastructure::static_token_provider::StaticTokenProvider;
use facesink_core::detection::domain::face_detection_adapter::FaceDetectionAdapter;
use facesink_core::detection::infrastructure::vision_http_client::VisionHttpClient;
use facesink_core::shared::config::Config;
use facesink_core::shared::constants::DEFAULT_MAX_RESULTS;
use facesink_core::shared::http_client::HttpJsonClient;

/// Flags shared by both binaries.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// The image you'd like to detect faces in.
    pub input_image: PathBuf,

    /// The max results of face detection.
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: u32,

    /// Config file (defaults to the user config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// OAuth access token; when absent, gcloud application-default
    /// credentials are used.
    #[arg(long)]
    pub access_token: Option<String>,
}

impl CommonArgs {
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.input_image.exists() {
            return Err(format!("Input file not found: {}", self.input_image.display()).into());
        }
        if self.max_results < 1 {
            return Err(format!("Max results must be at least 1, got {}", self.max_results).into());
        }
        Ok(())
    }

    /// Config file, then environment, then flags.
    pub fn resolve_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        config.apply_env(|key| std::env::var(key).ok());
        if let Some(token) = &self.access_token {
            config.access_token = Some(token.clone());
        }
        Ok(config)
    }
}

pub fn token_provider(
    config: &Config,
) -> Result<Arc<dyn AccessTokenProvider>, Box<dyn std::error::Error>> {
    match &config.access_token {
        Some(token) => Ok(Arc::new(StaticTokenProvider::new(token.as_str())?)),
        None => {
            log::info!("No access token configured; using gcloud application-default credentials");
            Ok(Arc::new(GcloudTokenProvider::new()))
        }
    }
}

pub fn http_client(config: &Config) -> Result<HttpJsonClient, Box<dyn std::error::Error>> {
    Ok(HttpJsonClient::new(
        token_provider(config)?,
        config.request_timeout(),
    )?)
}

pub fn build_adapter(http: HttpJsonClient, config: &Config) -> FaceDetectionAdapter {
    FaceDetectionAdapter::new(Box::new(VisionHttpClient::new(
        http,
        &config.vision_endpoint,
    )))
}

/// `<stem>.json` for the given image path, e.g. `group.jpg` → `group.json`.
pub fn default_object_name(image: &Path) -> String {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "detection".to_string());
    format!("{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: PathBuf) -> CommonArgs {
        CommonArgs {
            input_image: input,
            max_results: DEFAULT_MAX_RESULTS,
            config: None,
            access_token: None,
        }
    }

    #[rstest]
    #[case::jpeg("photos/group.jpg", "group.json")]
    #[case::nested_dots("a.b.png", "a.b.json")]
    #[case::no_extension("face", "face.json")]
    #[case::empty("", "detection.json")]
    fn test_default_object_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(default_object_name(Path::new(input)), expected);
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let tmp = TempDir::new().unwrap();
        let err = args(tmp.path().join("missing.jpg")).validate().unwrap_err();
        assert!(err.to_string().starts_with("Input file not found"));
    }

    #[test]
    fn test_validate_rejects_zero_max_results() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("face.jpg");
        fs::write(&input, b"x").unwrap();
        let mut a = args(input);
        a.max_results = 0;

        assert!(a.validate().is_err());
    }

    #[test]
    fn test_flag_token_overrides_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"access_token": "from-file", "bucket": "file-bucket"}"#,
        )
        .unwrap();
        let mut a = args(tmp.path().join("face.jpg"));
        a.config = Some(config_path);
        a.access_token = Some("from-flag".into());

        let config = a.resolve_config().unwrap();

        assert_eq!(config.access_token.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let tmp = TempDir::new().unwrap();
        let mut a = args(tmp.path().join("face.jpg"));
        a.config = Some(tmp.path().join("nope.json"));

        assert!(a.resolve_config().is_err());
    }

    #[test]
    fn test_static_token_provider_selected_when_token_present() {
        let config = Config {
            access_token: Some("tok".into()),
            ..Config::default()
        };
        let provider = token_provider(&config).unwrap();
        assert_eq!(provider.access_token().unwrap(), "tok");
    }
}
