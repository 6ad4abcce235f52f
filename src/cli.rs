//! Command-line front end — SPEC_FULL.md §6. An external collaborator to
//! the core: argument parsing, file opening, prior-file precedence, and
//! verbose/debug/list-infos printing all live here, never inside the
//! parser itself.

use crate::config::Config;
use crate::parser::Driver;
use crate::render;
use crate::selftest;
use crate::util;
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "lacuna",
    version,
    about = "Deck description parser and cross-reference validator",
    after_help = "Examples:\n  lacuna parse deck.txt\n  lacuna parse deck.txt --prior base.txt --verbose\n  lacuna validate deck.txt --json\n  lacuna batch --input-dir decks --out-dir build\n  lacuna init\n  lacuna selftest --fixtures tests/fixtures\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Parse(ParseArgs),
    Batch(BatchArgs),
    Validate(ValidateArgs),
    Init(InitArgs),
    Selftest(SelftestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    #[arg(long = "prior")]
    pub prior: Vec<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub issues_only: bool,
    #[arg(long)]
    pub verbose: bool,
    #[arg(long)]
    pub debug: bool,
    #[arg(long)]
    pub list_infos: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[arg(long)]
    pub input_dir: PathBuf,
    #[arg(long)]
    pub glob: Option<String>,
    #[arg(long)]
    pub out_dir: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    #[arg(long = "prior")]
    pub prior: Vec<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "lacuna.toml")]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SelftestArgs {
    #[arg(long)]
    pub fixtures: String,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Parse(args) => run_parse(&args),
        Commands::Batch(args) => run_batch(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Init(args) => run_init(&args),
        Commands::Selftest(args) => run_selftest(&args),
    }
}

/// Replay `prior` files in order, then the primary file, into one Driver.
/// Halts before the primary file if any prior file yielded an issue
/// (SPEC_FULL.md §4.9, grounded in `lacu_parse.py`'s `__main__` block).
fn drive_files(
    prior: &[PathBuf],
    primary: &PathBuf,
    debug: bool,
    verbose: bool,
) -> Result<(Driver, bool)> {
    let mut driver = Driver::with_debug(debug);

    for path in prior {
        if verbose {
            println!("PARSING PRIOR FILE: {}", path.display());
        }
        feed_file(&mut driver, path, verbose)?;
        if driver.has_issues() {
            return Ok((driver, false));
        }
    }

    if verbose {
        println!("PARSING MAIN FILE: {}", primary.display());
    }
    feed_file(&mut driver, primary, verbose)?;
    Ok((driver, true))
}

fn feed_file(driver: &mut Driver, path: &PathBuf, verbose: bool) -> Result<()> {
    let content = util::read_to_string(path)?;
    let lines = util::tokenize_lines(&content)?;
    driver.begin_file();
    for fields in lines {
        if verbose {
            println!("{:?}", fields);
        }
        driver.feed_line(fields);
    }
    driver.end_of_file();
    Ok(())
}

fn run_parse(args: &ParseArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let debug = args.debug || config.debug;
    let list_infos = args.list_infos || config.list_infos;

    let (driver, reached_primary) = drive_files(&args.prior, &args.input, debug, args.verbose)?;

    if !reached_primary {
        print!(
            "{}",
            render::render_diagnostics_text(driver.diagnostics(), list_infos)
        );
        process::exit(1);
    }

    if !args.issues_only {
        println!("{}", render::render_deck_json(driver.deck())?);
    }
    print!(
        "{}",
        render::render_diagnostics_text(driver.diagnostics(), list_infos)
    );

    if driver.has_issues() {
        process::exit(2);
    }
    Ok(())
}

fn run_batch(args: &BatchArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let glob_pattern = args.glob.clone().unwrap_or_else(|| config.glob_default.clone());
    let pattern = args.input_dir.join(&glob_pattern);
    let pattern_str = pattern.to_str().ok_or_else(|| anyhow!("invalid glob pattern"))?;

    #[derive(serde::Serialize)]
    struct BatchEntry {
        file: String,
        ok: bool,
        issues: usize,
        infos: usize,
        error: Option<String>,
    }
    #[derive(serde::Serialize)]
    struct BatchReport {
        files: Vec<BatchEntry>,
        failed: usize,
    }

    let mut report = BatchReport { files: Vec::new(), failed: 0 };

    for entry in glob::glob(pattern_str)? {
        let path = entry?;
        let outcome = (|| -> Result<(Driver, String)> {
            let content = util::read_to_string(&path)?;
            let lines = util::tokenize_lines(&content)?;
            let mut driver = Driver::with_debug(config.debug);
            driver.begin_file();
            for fields in lines {
                driver.feed_line(fields);
            }
            driver.end_of_file();
            let stem = util::file_stem(&path);
            Ok((driver, stem))
        })();

        match outcome {
            Ok((driver, stem)) => {
                let json = render::render_deck_json(driver.deck())?;
                let out_path = args.out_dir.join(format!("{}.json", stem));
                util::write_string(&out_path, &json)?;

                let issues = driver
                    .diagnostics()
                    .iter()
                    .filter(|d| d.severity == crate::model::Severity::Issue)
                    .count();
                let infos = driver.diagnostics().len() - issues;
                if issues > 0 {
                    report.failed += 1;
                }
                report.files.push(BatchEntry {
                    file: path.display().to_string(),
                    ok: true,
                    issues,
                    infos,
                    error: None,
                });
            }
            Err(err) => {
                report.failed += 1;
                report.files.push(BatchEntry {
                    file: path.display().to_string(),
                    ok: false,
                    issues: 0,
                    infos: 0,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let report_path = args.out_dir.join("batch_report.json");
    util::write_string(&report_path, &serde_json::to_string_pretty(&report)?)?;

    if report.failed > 0 {
        process::exit(1);
    }
    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let (driver, reached_primary) =
        drive_files(&args.prior, &args.input, config.debug, false)?;

    if args.json {
        println!("{}", render::render_diagnostics_json(driver.diagnostics())?);
    } else {
        print!(
            "{}",
            render::render_diagnostics_text(driver.diagnostics(), config.list_infos)
        );
    }

    if !reached_primary || driver.has_issues() {
        process::exit(2);
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> Result<()> {
    if args.path.exists() {
        return Err(anyhow!("config file already exists at {}", args.path.display()));
    }
    util::write_string(&args.path, &Config::default_template())?;
    println!("Created default config at {}", args.path.display());
    Ok(())
}

fn run_selftest(args: &SelftestArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let summary = selftest::run_selftest(&args.fixtures, &config.glob_default)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", selftest::summarize_text(&summary));
    }

    if summary.runtime_failures > 0 {
        process::exit(1);
    }
    if summary.total_issues > 0 {
        process::exit(2);
    }
    Ok(())
}
