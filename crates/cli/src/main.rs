use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use kube_codegen_common::{ApiDescription, GeneratorConfig, Model, OperationMap};
use kube_codegen_generator::ClientGenerator;
use kube_codegen_parser::parse_api_description;
use kube_codegen_resolver::{resolve, OperationSnapshot, Resolution};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kube-codegen")]
#[command(version, about = "Resolve CRUD operations in Kubernetes-style API descriptions and generate Python client skeletons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an API description and show operations and model bindings
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a Kubernetes swagger document\n  \
        kube-codegen resolve swagger.json\n\n  \
        # List removed paths and every model binding\n  \
        kube-codegen resolve swagger.json --verbose\n\n  \
        # Dump the operation index and bindings as JSON\n  \
        kube-codegen resolve swagger.json --json > resolved.json")]
    Resolve {
        /// Path to the Swagger 2.0 / OpenAPI 3 document (JSON or YAML)
        spec: PathBuf,

        /// Print the resolved operations and models as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a Python client skeleton from an API description
    #[command(after_help = "EXAMPLES:\n  \
        # Generate with default options\n  \
        kube-codegen generate --spec swagger.json --output ./client\n\n  \
        # Generate using a config file\n  \
        kube-codegen generate --spec swagger.json --config codegen.yaml\n\n  \
        # Override the package name and version from the command line\n  \
        kube-codegen generate --spec swagger.json --package-name kubernetes --package-version 1.5.0")]
    Generate {
        /// Path to the Swagger 2.0 / OpenAPI 3 document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// YAML file with generator options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Package name (overrides the config file)
        #[arg(long)]
        package_name: Option<String>,

        /// Package version (overrides the config file)
        #[arg(long)]
        package_version: Option<String>,
    },
}

/// JSON shape printed by `resolve --json`
#[derive(Serialize)]
struct ResolveReport<'a> {
    operations: Vec<&'a OperationSnapshot>,
    models: Vec<ModelReport<'a>>,
}

#[derive(Serialize)]
struct ModelReport<'a> {
    name: &'a str,
    #[serde(rename = "apiVersion")]
    api_version: Option<&'a str>,
    operations: Option<&'a OperationMap>,
}

impl<'a> ModelReport<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            name: &model.name,
            api_version: model.api_version.as_deref(),
            operations: model.operations.as_ref(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve { spec, json } => {
            resolve_command(spec.as_path(), json, cli.verbose)?;
        }
        Commands::Generate {
            spec,
            output,
            config,
            package_name,
            package_version,
        } => {
            generate_command(GenerateOptions {
                spec_path: spec.as_path(),
                output: output.as_path(),
                config_path: config.as_deref(),
                package_name: package_name.as_deref(),
                package_version: package_version.as_deref(),
                verbose: cli.verbose,
            })?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `resolve --json` stays clean on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_and_resolve(spec_path: &Path) -> Result<(ApiDescription, Resolution)> {
    let mut description = parse_api_description(spec_path)
        .with_context(|| format!("Failed to load API description {}", spec_path.display()))?;
    let resolution = resolve(&mut description).context("Failed to resolve operations")?;
    Ok((description, resolution))
}

fn resolve_command(spec_path: &Path, json: bool, verbose: bool) -> Result<()> {
    if json {
        let (description, resolution) = load_and_resolve(spec_path)?;
        let report = ResolveReport {
            operations: resolution.index.operations().collect(),
            models: description.models.iter().map(ModelReport::new).collect(),
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize resolution")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("{} Resolving: {}", "→".cyan(), spec_path.display());
    let (description, resolution) = load_and_resolve(spec_path)?;

    println!("\n{}", "✓ Resolution successful!".green().bold());
    println!("\n{}", "API Description:".bold());
    println!("  Title: {}", description.title.yellow());
    println!("  Version: {}", description.version.yellow());
    println!("  Paths: {}", resolution.index.len());
    println!("  Operations: {}", resolution.index.operation_count());
    println!("  Removed paths: {}", resolution.removed.len());
    println!(
        "  Bound models: {}/{}",
        resolution.bound_models,
        description.models.len()
    );

    if verbose {
        if !resolution.removed.is_empty() {
            println!("\n{}", "Removed:".bold());
            for removed in &resolution.removed {
                println!("  • {} ({})", removed.path.red(), removed.reason);
            }
        }

        println!("\n{}", "Operations:".bold());
        for (path, operations) in resolution.index.iter() {
            println!("  {}", path.cyan());
            for op in operations {
                println!("    {:<6} {}", op.http_method.as_str(), op.operation_id.yellow());
            }
        }

        println!("\n{}", "Bindings:".bold());
        for model in &description.models {
            let Some(operations) = model.operations.as_ref().filter(|ops| !ops.is_empty()) else {
                continue;
            };
            println!("  • {}", model.name.cyan());
            for (kind, binding) in operations {
                println!(
                    "    {} → {}.{}",
                    kind.key(),
                    binding.target_type_name,
                    binding.operation_id
                );
            }
        }
    }

    Ok(())
}

struct GenerateOptions<'a> {
    spec_path: &'a Path,
    output: &'a Path,
    config_path: Option<&'a Path>,
    package_name: Option<&'a str>,
    package_version: Option<&'a str>,
    verbose: bool,
}

fn generate_command(options: GenerateOptions) -> Result<()> {
    println!(
        "{} Generating client from: {}",
        "→".cyan(),
        options.spec_path.display()
    );

    let config = match options.config_path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    }
    .with_overrides(options.package_name, options.package_version);

    if options.verbose {
        println!("  Package: {}", config.package_name);
        println!("  Package version: {}", config.package_version);
        println!("  Output: {}", options.output.display());
    }

    println!("{} Resolving operations...", "→".cyan());
    let (description, resolution) = load_and_resolve(options.spec_path)?;
    println!(
        "{} Resolved {} operations, removed {} paths, bound {} models",
        "✓".green(),
        resolution.index.operation_count(),
        resolution.removed.len(),
        resolution.bound_models
    );

    println!("{} Generating client files...", "→".cyan());
    let generator =
        ClientGenerator::new(description, config).context("Failed to create generator")?;
    let written = generator
        .generate_to_directory(options.output)
        .context("Failed to generate client")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!(
        "  Package: {}",
        options.output.join(generator.package_name()).display()
    );
    println!("  Files written: {}", written.len());

    if options.verbose {
        println!("\n{}", "Generated files:".bold());
        for path in &written {
            println!("  📄 {}", path.display());
        }
    }

    Ok(())
}
