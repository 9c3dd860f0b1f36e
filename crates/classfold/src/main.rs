//! classfold CLI.
//!
//! Reads a document and a stylesheet, merges the declarations of the
//! controlled-namespace classes into generated classes, and writes both
//! results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use classfold::style::SelectorPolicy;
use classfold::{Config, Optimizer, Report};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classfold")]
#[command(author, version, long_about = None)]
#[command(about = "Merge shared style declarations into generated classes")]
struct Cli {
    /// Input document
    #[arg(long, value_name = "PATH")]
    html: PathBuf,

    /// Input stylesheet
    #[arg(long, value_name = "PATH")]
    css: PathBuf,

    /// Where to write the rewritten document
    #[arg(long, value_name = "PATH")]
    out_html: PathBuf,

    /// Where to write the new stylesheet
    #[arg(long, value_name = "PATH")]
    out_css: PathBuf,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Prefix of the controlled class namespace
    #[arg(long, value_name = "PREFIX")]
    namespace: Option<String>,

    /// Prefix of generated class names
    #[arg(long, value_name = "PREFIX")]
    rule_prefix: Option<String>,

    /// Refinement steps per rectangle before falling back to a single cell
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,

    /// Fail on complex selectors that mention namespaced classes
    #[arg(long)]
    reject_complex: bool,

    /// Drop stylesheet content that takes no part in merging
    #[arg(long)]
    drop_passthrough: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> classfold::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(namespace) = &self.namespace {
            config.namespace_prefix = namespace.clone();
        }
        if let Some(rule_prefix) = &self.rule_prefix {
            config.rule_prefix = rule_prefix.clone();
        }
        if self.max_steps.is_some() {
            config.max_refinement_steps = self.max_steps;
        }
        if self.reject_complex {
            config.selector_policy = SelectorPolicy::Reject;
        }
        if self.drop_passthrough {
            config.keep_passthrough_rules = false;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> classfold::Result<Report> {
    let optimizer = Optimizer::new(cli.load_config()?)?;
    optimizer.run_files(&cli.html, &cli.css, &cli.out_html, &cli.out_css)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("classfold: {e}");
            ExitCode::FAILURE
        }
    }
}
