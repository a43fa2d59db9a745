//! android-testgen CLI.
//!
//! Scans an Android project for components (Activity, Service,
//! BroadcastReceiver, ViewModel), writes a JUnit/Mockito test skeleton for
//! each one under the test source root, and optionally wires JaCoCo into
//! the Gradle build and summarizes a JaCoCo XML report.
//!
//! # Examples
//!
//! ```bash
//! # Generate tests for every component under app/src/main/java
//! android-testgen --project-root ~/src/my-app
//!
//! # Regenerate one file, overwriting its existing test
//! android-testgen --source-file app/src/main/java/com/acme/MainActivity.kt --force
//!
//! # Enable JaCoCo and summarize the last report
//! android-testgen --jacoco \
//!     --coverage-report app/build/reports/jacoco/jacocoTestReport/jacocoTestReport.xml
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;
use testgen_cli::commands::completions;
use testgen_cli::{RunOptions, exit_code_for, formatters};
use testgen_core::cli::{ExitCode, OutputFormat};
use testgen_jacoco::CounterType;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate Android component test skeletons and JaCoCo coverage helpers.
#[derive(Parser, Debug)]
#[command(name = "android-testgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root of the Android project; relative paths are resolved against it
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Directory to scan for components (default: app/src/main/java)
    #[arg(long)]
    source_root: Option<PathBuf>,

    /// Scan a single source file instead of the whole source root
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// Directory generated tests are written under (default: app/src/test/java)
    #[arg(long)]
    test_root: Option<PathBuf>,

    /// Overwrite existing test files
    #[arg(long)]
    force: bool,

    /// Ensure JaCoCo XML and HTML reporting is configured in the build file
    #[arg(long)]
    jacoco: bool,

    /// Gradle build file to patch (default: app/build.gradle)
    #[arg(long)]
    build_file: Option<PathBuf>,

    /// JaCoCo XML report to summarize
    #[arg(long)]
    coverage_report: Option<PathBuf>,

    /// Counter type to summarize (INSTRUCTION, BRANCH, LINE, COMPLEXITY, METHOD, CLASS)
    #[arg(long, default_value = "INSTRUCTION")]
    counter: CounterType,

    /// Configuration file (default: testgen.toml in the project root, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (json, text, pretty)
    #[arg(long = "format", default_value = "pretty")]
    format: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            project_root: self.project_root.clone(),
            config: self.config.clone(),
            source_root: self.source_root.clone(),
            source_file: self.source_file.clone(),
            test_root: self.test_root.clone(),
            build_file: self.build_file.clone(),
            force: self.force,
            jacoco: self.jacoco,
            coverage_report: self.coverage_report.clone(),
            counter: self.counter,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let exit_code = match execute(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` applies, defaulting
/// to info. Logs are written to stderr so stdout carries only the report.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        return Ok(completions::run(shell, &mut cmd));
    }

    let output_format = cli.format.parse::<OutputFormat>()?;
    debug!("Output format: {output_format}");

    let report = testgen_cli::run(&cli.run_options())?;
    println!("{}", formatters::format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}
