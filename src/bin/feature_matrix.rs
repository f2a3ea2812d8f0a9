//! Generates the provider feature matrix for the documentation site.
//!
//! With no flags this reads `catalogs/providers.json` under the repository
//! root and rewrites `docs/_includes/matrix.html`. `--check` verifies the
//! committed file instead, which is how CI catches a stale matrix. JSON
//! output defaults to `docs/_includes/matrix.json` so it never replaces the
//! HTML fragment.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use featurematrix::{
    DEFAULT_CATALOG_PATH, DEFAULT_JSON_OUTPUT_PATH, DEFAULT_OUTPUT_PATH, MatrixTemplate,
    build_matrix, check_up_to_date, find_repo_root, load_catalog_from_path, logging, render_json,
    resolve_in_repo, write_atomic,
};
use std::io::{Write, stdout};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "feature-matrix")]
#[command(about = "Render the DNS provider capability matrix")]
struct Cli {
    /// Provider catalog, relative to the repository root unless absolute.
    #[arg(long, env = "FEATURE_MATRIX_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
    /// Output file, relative to the repository root unless absolute.
    /// Defaults to docs/_includes/matrix.html, or matrix.json with --format json.
    #[arg(long, env = "FEATURE_MATRIX_OUTPUT")]
    output: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// Fail if the output file differs from what would be generated.
    #[arg(long, conflicts_with = "stdout")]
    check: bool,
    /// Print to stdout instead of writing the output file.
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

impl Format {
    fn default_output(&self) -> &'static str {
        match self {
            Format::Html => DEFAULT_OUTPUT_PATH,
            Format::Json => DEFAULT_JSON_OUTPUT_PATH,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("feature-matrix: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let repo_root = find_repo_root()?;
    let catalog_path = resolve_in_repo(&repo_root, &cli.catalog);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(cli.format.default_output()));
    let output_path = resolve_in_repo(&repo_root, &output);

    let catalog = load_catalog_from_path(&catalog_path)?;
    info!(
        catalog = %catalog_path.display(),
        providers = catalog.len(),
        "loaded provider catalog"
    );

    let matrix = build_matrix(&catalog, &catalog);
    let rendered = match cli.format {
        Format::Html => MatrixTemplate::default().render(&matrix)?,
        Format::Json => render_json(&matrix)?,
    };

    if cli.stdout {
        stdout()
            .write_all(rendered.as_bytes())
            .context("writing matrix to stdout")?;
    } else if cli.check {
        check_up_to_date(&output_path, &rendered)?;
    } else {
        write_atomic(&output_path, &rendered)?;
    }
    Ok(())
}
