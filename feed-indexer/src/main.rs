//! Activity feed reindexer.
//!
//! Reads every activity feed entry, enriches it with its timeline and bulk
//! loads the result into the search index, then exits.

use std::process::ExitCode;

use tracing::{error, info};

use feed_indexer::logging::{self, LogFormat};
use feed_indexer::{Dependencies, IndexingError, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    dotenv::dotenv().ok();

    logging::init(LogFormat::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Reindex failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), IndexingError> {
    let settings = Settings::from_env()?;
    let dependencies = Dependencies::new(&settings).await?;

    info!("Dependencies initialized, starting reindex");
    dependencies.orchestrator.run().await?;

    Ok(())
}
