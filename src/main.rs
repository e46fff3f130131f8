//! openapi-bindgen CLI entrypoint
//! Loads an OpenAPI document and writes the generated bindings.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use openapi_bindgen::generation::OpenApiLoader;
use openapi_bindgen::infrastructure::CompositeOpenApiLoader;
use openapi_bindgen::{GeneratorOptions, OpenApiCodeGenerator};

#[derive(Parser, Debug)]
#[command(name = "openapi-bindgen")]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// URL or path of the OpenAPI document (YAML or JSON)
    #[arg(short = 'u', long = "openapi-url")]
    openapi_url: String,
    /// Directory receiving the generated files
    #[arg(short = 'o', long = "output-path")]
    output_path: PathBuf,
    /// Module the generated files are included into
    #[arg(short = 'n', long, default_value = "Generated")]
    namespace: String,
    /// Name of the generated extension trait
    #[arg(short = 'c', long = "class-name", default_value = "ApiExtensions")]
    class_name: String,
    /// Overrides the server URL declared by the document
    #[arg(short = 'b', long = "base-url")]
    base_url: Option<String>,
    /// Overrides the document's `openapi` version before parsing
    #[arg(short = 'v', long = "version")]
    openapi_version: Option<String>,
}

impl Cli {
    fn generator_options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::new()
            .with_namespace(&self.namespace)
            .with_class_name(&self.class_name)
            .with_output_path(&self.output_path);
        if let Some(base_url) = &self.base_url {
            options = options.with_base_url_override(base_url);
        }
        if let Some(version) = &self.openapi_version {
            options = options.with_version_override(version);
        }
        options
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            // clap already formats the message for the right stream
            let _ = err.print();
            return code;
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("Loading OpenAPI document from {}", cli.openapi_url);
    let loader = CompositeOpenApiLoader::new().context("Failed to initialize loader")?;
    let raw = loader
        .load(&cli.openapi_url)
        .await
        .with_context(|| format!("Failed to load {}", cli.openapi_url))?;

    let result = OpenApiCodeGenerator::new(cli.generator_options())
        .generate(&raw)
        .context("Code generation failed")?;

    info!(
        "Generated {} bindings into {}",
        result.methods.len(),
        cli.output_path.display()
    );
    for artifact in &result.artifacts {
        println!("{}", cli.output_path.join(&artifact.file_name).display());
    }
    Ok(())
}
