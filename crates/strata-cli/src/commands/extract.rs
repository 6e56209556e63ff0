//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use strata_extractor::Extractor;
use strata_service::ExtractionService;
use strata_store::FileLoader;
use tracing::info;

/// Id a `--mapping` document is registered under.
pub const ADHOC_ID: &str = "cli-mapping";

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let output = run_extract(args, config, formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Run an extraction and return the formatted result.
pub async fn run_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let registry = config.build_registry()?;

    let configuration_id = match (&args.mapping, args.config) {
        (Some(path), _) => {
            registry.load_file(ADHOC_ID, path)?;
            ADHOC_ID.to_string()
        }
        (None, Some(id)) => id,
        (None, None) => registry.active_id(),
    };
    info!("Extracting {} with '{}'", args.source, configuration_id);

    let extractor = Extractor::new(config.extractor.clone())?;
    let service = ExtractionService::new(
        FileLoader::new(),
        registry,
        extractor,
        config.service.clone(),
    );

    let result = service.load_and_extract(&args.source, &configuration_id).await?;
    formatter.format_result(&result)
}
