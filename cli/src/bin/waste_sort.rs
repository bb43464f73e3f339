use clap::{Parser, Subcommand};
use classifier::ClassificationReport;
use cli::{analyze_path, classify_paths, list_categories, load_catalog, load_pipeline, to_json};
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Heuristic waste image classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more images and print a JSON report per image
    Classify {
        /// Image files to classify
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Classifier configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Replacement category catalog (.toml or .json)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the feature vector, shape, texture and raw scores of an image
    Features {
        /// Image file to analyze
        image: PathBuf,
        /// Classifier configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the category catalog
    Categories {
        /// Replacement category catalog (.toml or .json)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the JSON schema of a classification report
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Classify { images, config, catalog, pretty } => {
            classify(images, config.as_deref(), catalog.as_deref(), *pretty)?;
        }
        Commands::Features { image, config } => {
            let pipeline = load_pipeline(config.as_deref())?;
            let report = analyze_path(&pipeline, image)?;
            println!("{}", to_json(&report, true)?);
        }
        Commands::Categories { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            println!("{}", to_json(&list_categories(&catalog), true)?);
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ClassificationReport);
            println!("{}", to_json(&schema, true)?);
        }
    }

    Ok(())
}

fn classify(images: &[PathBuf], config: Option<&Path>, catalog: Option<&Path>, pretty: bool) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let catalog = load_catalog(catalog)?;
    info!("{}", pipeline.info());

    let reports = classify_paths(&pipeline, &catalog, images);
    for report in &reports {
        println!("{}", to_json(report, pretty)?);
    }

    let failed = reports.iter().filter(|r| !r.report.is_classified()).count();
    info!("Classified {} image(s), {} failed", reports.len() - failed, failed);
    Ok(())
}
