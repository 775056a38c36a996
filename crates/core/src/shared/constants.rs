pub const VISION_ENDPOINT: &str = "https://vision.googleapis.com";
pub const WAREHOUSE_ENDPOINT: &str = "https://bigquery.googleapis.com";
pub const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

pub const FACE_DETECTION_FEATURE: &str = "FACE_DETECTION";
pub const DEFAULT_MAX_RESULTS: u32 = 4;

/// Transport-level retries per publish call (attempts = retries + 1).
pub const DEFAULT_NUM_RETRIES: u32 = 5;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 32_000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const GCLOUD_PROGRAM: &str = "gcloud";

pub const CONFIG_DIR_NAME: &str = "facesink";
pub const CONFIG_FILE_NAME: &str = "config.json";
