//! Madurómetro - digital maturity survey scoring and reporting
//!
//! A CLI tool that scores a completed maturity survey, asks the
//! narrative service for the written analysis and renders the results
//! as Markdown or JSON reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad answers file, config failure, write failure)

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use madurometro::cli::{Args, OutputFormat};
use madurometro::config::Config;
use madurometro::models::AnswerMap;
use madurometro::narrative::{NarrativeClient, NarrativeState};
use madurometro::results::{
    generate_json_report, generate_markdown_report, SurveyDocument, SurveyResults,
};
use madurometro::scoring::round_two;
use madurometro::taxonomy::Taxonomy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Madurómetro v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Score the survey and render the report
    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .madurometro.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".madurometro.toml");

    if path.exists() {
        eprintln!("⚠️  .madurometro.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .madurometro.toml")?;

    println!("✅ Created .madurometro.toml with default settings.");
    println!("   Edit it to customize the output path, service URL and report sections.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete scoring workflow.
async fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the answers
    println!("📋 Loading answers: {}", args.answers_path().display());
    let answers = AnswerMap::load(args.answers_path())?;

    let taxonomy = Taxonomy::standard();

    for warning in answers.validate(&taxonomy) {
        warn!("{}", warning);
    }
    info!(
        "Answered {}/{} questions",
        answers.answered_count(&taxonomy),
        taxonomy.question_count()
    );

    // Step 2: Score the survey
    let mut results = SurveyResults::new(answers, taxonomy);
    if let Some(ref id) = args.survey_id {
        results = results.with_saved_survey_id(id.clone());
    }

    print_score_summary(&results);

    // Step 3: Fetch the narrative unless offline
    if args.offline {
        println!("\n🔌 Offline mode: skipping the narrative request.");
    } else {
        let client = NarrativeClient::new(
            &config.narrative.base_url,
            config.narrative.timeout_seconds,
        )?;

        println!("\n🤖 Requesting AI analysis...");
        println!("   Service: {}", client.base_url());
        match config.narrative.timeout_seconds {
            Some(secs) => println!("   Timeout: {}s", secs),
            None => println!("   Timeout: none"),
        }

        let spinner = make_spinner();
        results.ensure_narrative(&client).await;
        spinner.finish_and_clear();

        match results.narrative().state() {
            NarrativeState::Ready(text) => {
                println!("   Analysis received ({} characters)", text.chars().count());
            }
            NarrativeState::Failed(_) => {
                println!("   ⚠️  Analysis failed; the report carries the fallback message.");
            }
            NarrativeState::Idle | NarrativeState::Loading => {}
        }
    }

    // Step 4: Render and save the report
    println!("\n📝 Generating report...");

    let output_path = PathBuf::from(&config.general.output);
    let output = match args.format {
        OutputFormat::Json => generate_json_report(&results)?,
        OutputFormat::Markdown => generate_markdown_report(&results, &config.report),
    };

    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Step 5: Optional document-renderer export
    if let Some(ref document_path) = args.document {
        let document = SurveyDocument::assemble(&results);
        std::fs::write(document_path, document.to_json()?).with_context(|| {
            format!(
                "Failed to write document data to {}",
                document_path.display()
            )
        })?;
        println!("📄 Document data saved to: {}", document_path.display());
    }

    println!("\n✅ Survey scored! Report saved to: {}", output_path.display());

    Ok(())
}

/// Print the score card to the console.
fn print_score_summary(results: &SurveyResults) {
    let card = results.scores();

    println!("\n📊 Resultados:");
    println!(
        "   Madurez Digital: {:.2} ({})",
        card.overall_rounded(),
        card.maturity().label()
    );
    for pillar in &card.pillars {
        println!(
            "   - {}: {:.2} ({})",
            pillar.name.numbered_label(),
            round_two(pillar.average),
            pillar.maturity().label()
        );
    }
}

/// Spinner shown while the narrative service writes the analysis.
fn make_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Generando análisis personalizado...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .madurometro.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
