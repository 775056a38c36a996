use std::process;

use clap::Parser;

use facesink_cli::{build_adapter, default_object_name, http_client, CommonArgs};
use facesink_core::pipeline::detect_and_export_use_case::DetectAndExportUseCase;
use facesink_core::pipeline::pipeline_reporter::StdoutPipelineReporter;
use facesink_core::storage::domain::detection_exporter::DetectionExporter;
use facesink_core::storage::domain::object_store::ObjectRef;
use facesink_core::storage::infrastructure::storage_http_store::StorageHttpStore;

/// Detects faces in the given image and uploads the result to a bucket.
#[derive(Parser)]
#[command(name = "faces-export")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Destination bucket (overrides FACESINK_BUCKET and the config file).
    #[arg(long)]
    bucket: Option<String>,

    /// Object name (defaults to the image file name with a .json extension).
    #[arg(long)]
    object: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.common.validate()?;

    let config = cli.common.resolve_config()?;
    let bucket = cli
        .bucket
        .or_else(|| config.bucket.clone())
        .ok_or("A bucket is required (--bucket, FACESINK_BUCKET or config file)")?;
    let name = cli
        .object
        .unwrap_or_else(|| default_object_name(&cli.common.input_image));
    let object = ObjectRef::new(bucket, name);

    let http = http_client(&config)?;
    let store = StorageHttpStore::new(http.clone(), &config.storage_endpoint);

    let mut use_case = DetectAndExportUseCase::new(
        build_adapter(http, &config),
        DetectionExporter::new(Box::new(store)),
        Box::new(StdoutPipelineReporter::new()),
        cli.common.max_results,
    );
    use_case.execute(&cli.common.input_image, &object)?;
    log::info!("Detection exported to {object}");
    Ok(())
}
