use std::io;
use std::process;

use clap::Parser;

use facesink_cli::{build_adapter, http_client, CommonArgs};
use facesink_core::ingestion::domain::row_publisher::RowPublisher;
use facesink_core::ingestion::infrastructure::warehouse_http_sink::WarehouseHttpSink;
use facesink_core::pipeline::detect_and_stream_use_case::DetectAndStreamUseCase;
use facesink_core::pipeline::pipeline_reporter::StdoutPipelineReporter;
use facesink_core::pipeline::use_case_error::UseCaseError;
use facesink_core::rows::infrastructure::line_row_source::LineRowSource;

/// Detects faces in the given image, then streams rows typed on stdin into
/// a warehouse table, one insert per row.
#[derive(Parser)]
#[command(name = "faces-stream")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Warehouse project ID.
    #[arg(long)]
    project: Option<String>,

    /// Dataset ID.
    #[arg(long)]
    dataset: Option<String>,

    /// Table ID.
    #[arg(long)]
    table: Option<String>,

    /// Transport retries per row (0 = single attempt).
    #[arg(long)]
    num_retries: Option<u32>,
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

    let mut config = cli.common.resolve_config()?;
    if let Some(project) = cli.project {
        config.project_id = Some(project);
    }
    if let Some(dataset) = cli.dataset {
        config.dataset_id = Some(dataset);
    }
    if let Some(table) = cli.table {
        config.table_id = Some(table);
    }
    if let Some(num_retries) = cli.num_retries {
        config.num_retries = num_retries;
    }
    let destination = config.table_ref()?;

    let http = http_client(&config)?;
    let sink = WarehouseHttpSink::new(http.clone(), &config.warehouse_endpoint);
    let publisher = RowPublisher::new(Box::new(sink), config.retry_policy());

    let mut use_case = DetectAndStreamUseCase::new(
        build_adapter(http, &config),
        publisher,
        Box::new(StdoutPipelineReporter::new()),
        destination,
        cli.common.max_results,
    );

    let stdin = io::stdin();
    let rows = LineRowSource::new(stdin.lock(), io::stdout());
    match use_case.execute(&cli.common.input_image, rows) {
        Ok(summary) => {
            log::debug!("Stream finished with {} face(s) detected", summary.face_count);
            Ok(())
        }
        Err(UseCaseError::Publish(e)) => {
            log::error!(
                "Row left unconfirmed under insert ID {}; resubmit with the same ID to avoid duplicates",
                e.insert_id()
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
