//! Command-line interface for the mapping engine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use roxmltree::{Document, Node};

use crate::error::{MappingError, Result};
use crate::manager::MappingManager;
use crate::mapping::load_config_file;
use crate::model::Record;
use crate::processor::{NoContext, ProcessorRegistry};
use crate::xml::{Hit, NodeExpr};

/// XML Mapping - Map XML documents onto models using a YAML mapping file.
#[derive(Parser)]
#[command(name = "xml-mapping")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map elements of an XML document and print the resulting records.
    Map {
        /// Mapping file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Model identifier from the mapping file
        #[arg(short, long)]
        model: String,

        /// Node expression selecting the elements to map (default: the root element)
        #[arg(short, long)]
        select: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// XML document to read
        input: PathBuf,
    },

    /// Load and validate a mapping file.
    Check {
        /// Mapping file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Output format of mapped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Map {
            config,
            model,
            select,
            format,
            input,
        } => map_command(&config, &model, select.as_deref(), format, &input),
        Commands::Check { config } => check_command(&config),
    }
}

/// Execute the map command.
///
/// Records are scaffolded from the model's field paths, so every mapped
/// field exists on them. Bound processors are not available here.
fn map_command(
    config: &Path,
    model: &str,
    select: Option<&str>,
    format: OutputFormat,
    input: &Path,
) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let manager = MappingManager::new(load_config_file(config, &registry)?)?;
    let mapping = manager
        .config()
        .get(model)
        .ok_or_else(|| MappingError::UnmappedModel {
            model: model.to_string(),
        })?;

    let xml = fs::read_to_string(input)?;
    let doc = Document::parse(&xml)?;
    let root = doc.root_element();

    let targets: Vec<Node<'_, '_>> = match select {
        Some(expr) => NodeExpr::parse(expr)?
            .select(root)
            .iter()
            .filter_map(Hit::element)
            .collect(),
        None => vec![root],
    };

    let mut records = Vec::with_capacity(targets.len());
    for element in targets {
        let mut record = Record::scaffold(model, mapping);
        manager.process_model(&NoContext, &mut record, element)?;
        records.push(record);
    }

    eprintln!(
        "{} {} {} record(s)",
        style("Mapped").green().bold(),
        records.len(),
        style(model).cyan()
    );

    let output = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&records)?,
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
    };
    println!("{}", output.trim_end());

    Ok(())
}

/// Execute the check command.
fn check_command(config: &Path) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let config = load_config_file(config, &registry)?;

    println!(
        "{} {} model(s)",
        style("Valid mapping:").green().bold(),
        config.len()
    );
    for (identifier, mapping) in config.models() {
        println!("  {}: {} field(s)", style(identifier).cyan(), mapping.len());
    }

    Ok(())
}
