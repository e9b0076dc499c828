mod adapters;
mod application;
mod cli;
mod compliance;
mod config;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::FileSystemReader;
use adapters::outbound::network::{ClearlyDefinedClient, Coordinates};
use adapters::outbound::process::{ExternalSbomGenerator, FlictEvaluator};
use application::dto::{EnrichRequest, GenerateRequest, OutputFormat};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::{
    EnrichSbomUseCase, GenerateSbomUseCase, ListLicensesUseCase, OutboundLicensesUseCase,
    ParseSbomUseCase,
};
use cli::{
    Args, ClearlyDefinedCommand, Command, EnrichmentArgs, LicensingCommand, SbomCommand,
    SourceArgs,
};
use compliance::domain::{LicenseFact, PackageIdentifier, SbomDocument};
use compliance::services::FieldExtractor;
use config::{discover_config, load_config_from_path, Settings};
use ports::outbound::{ComplianceDataRepository, ReportFormatter, SbomReader};
use shared::error::{ExitCode, SbomError};
use shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(ExitCode::Success) => {}
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostics go to stderr: warnings by default, debug for this crate with -v
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "compliance_assistant=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::from_config(config.as_ref());

    match args.command {
        Command::Sbom(SbomCommand::Generate { source, output }) => {
            let document = generate(&settings, &source).await?;
            present_document(&document, &output)?;
            Ok(ExitCode::Success)
        }
        Command::Sbom(SbomCommand::Enrich {
            file,
            output,
            enrichment,
        }) => {
            let document = FileSystemReader::new().read_sbom(&file)?;
            enrich_and_present(&settings, document, &enrichment, &output).await
        }
        Command::Sbom(SbomCommand::Full {
            source,
            output,
            enrichment,
        }) => {
            let document = generate(&settings, &source).await?;
            enrich_and_present(&settings, document, &enrichment, &output).await
        }
        Command::Sbom(SbomCommand::Parse {
            file,
            extract,
            format,
            output,
        }) => {
            let fields = FieldExtractor::parse_field_list(&extract);
            let rows = ParseSbomUseCase::new(FileSystemReader::new()).execute(&file, &fields)?;
            present_formatted(format, &output, |f| f.format_rows(&rows))?;
            Ok(ExitCode::Success)
        }
        Command::ClearlyDefined(ClearlyDefinedCommand::Fetch {
            purl,
            coordinates,
            format,
        }) => {
            let (subject, fact) = fetch(&settings, purl.as_deref(), coordinates.as_deref()).await?;
            present_formatted(format, "-", |f| f.format_fact(&subject, &fact))?;
            Ok(ExitCode::Success)
        }
        Command::ClearlyDefined(ClearlyDefinedCommand::Coordinates { purl }) => {
            let identifier = PackageIdentifier::parse(&purl)?;
            let coordinates = Coordinates::from_identifier(&identifier)?;
            PresenterFactory::create(PresenterType::Stdout)
                .present(&format!("{}\n", coordinates))?;
            Ok(ExitCode::Success)
        }
        Command::Licensing(LicensingCommand::List { file, format }) => {
            let use_case = ListLicensesUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
            let set = use_case.execute(&file)?;
            present_formatted(format, "-", |f| f.format_license_set(&set))?;
            Ok(ExitCode::Success)
        }
        Command::Licensing(LicensingCommand::Outbound {
            file,
            candidates,
            format,
        }) => {
            let use_case = OutboundLicensesUseCase::new(
                FileSystemReader::new(),
                FlictEvaluator::new(settings.evaluator_program.clone()),
                StderrProgressReporter::new(),
            );
            let report = use_case.execute(&file, &candidates).await?;
            present_formatted(format, "-", |f| f.format_outbound(&report))?;
            Ok(ExitCode::Success)
        }
    }
}

async fn generate(settings: &Settings, source: &SourceArgs) -> Result<SbomDocument> {
    let kind = source.generator.unwrap_or(settings.generator);
    let use_case = GenerateSbomUseCase::new(
        ExternalSbomGenerator::new(kind, settings.docker_image.clone()),
        FileSystemReader::new(),
        StderrProgressReporter::new(),
    );
    use_case
        .execute(GenerateRequest::new(source.directory.clone()))
        .await
}

/// Enriches `document` and writes it once every component has been processed.
/// Ctrl-C drops the pipeline and nothing is written.
async fn enrich_and_present(
    settings: &Settings,
    document: SbomDocument,
    overrides: &EnrichmentArgs,
    output: &str,
) -> Result<ExitCode> {
    let merge_policy = overrides.merge_policy.unwrap_or(settings.merge_policy);
    let concurrency = overrides
        .concurrency
        .map(|c| c as usize)
        .unwrap_or(settings.concurrency);

    let client = ClearlyDefinedClient::new(settings.clearlydefined.clone())?;
    let use_case = EnrichSbomUseCase::new(client, StderrProgressReporter::new());
    let request = EnrichRequest::new(document, merge_policy, concurrency);
    let presenter = PresenterFactory::create(PresenterType::from_output(Some(output)));

    let report = use_case
        .execute_and_present(request, presenter.as_ref(), interrupted())
        .await?;

    if report.is_incomplete() {
        eprintln!(
            "⚠️  Warning: None of the {} lookup(s) succeeded; the output carries no new license data.",
            report.lookups
        );
        return Ok(ExitCode::EnrichmentIncomplete);
    }
    Ok(ExitCode::Success)
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn fetch(
    settings: &Settings,
    purl: Option<&str>,
    coordinates: Option<&str>,
) -> Result<(String, LicenseFact)> {
    let client = ClearlyDefinedClient::new(settings.clearlydefined.clone())?;

    match (purl, coordinates) {
        (Some(purl), _) => {
            let identifier = PackageIdentifier::parse(purl)?;
            let fact = client.fetch_license_fact(&identifier).await?;
            Ok((identifier.to_string(), fact))
        }
        (None, Some(coordinates)) => {
            let parsed = Coordinates::parse(coordinates)?;
            let fact = client.fetch_definition(&parsed, coordinates).await?;
            Ok((parsed.to_string(), fact))
        }
        (None, None) => Err(SbomError::Validation {
            message: "either a package URL or coordinates are required".to_string(),
        }
        .into()),
    }
}

fn present_document(document: &SbomDocument, output: &str) -> Result<()> {
    let json = document.to_pretty_json()?;
    PresenterFactory::create(PresenterType::from_output(Some(output))).present(&json)
}

fn present_formatted<F>(format: OutputFormat, output: &str, render: F) -> Result<()>
where
    F: FnOnce(&dyn ReportFormatter) -> Result<String>,
{
    let Some(formatter) = FormatterFactory::create(format) else {
        return Ok(());
    };
    let content = render(formatter.as_ref())?;
    PresenterFactory::create(PresenterType::from_output(Some(output))).present(&content)
}
