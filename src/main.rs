//! Application entry point for `cs-helper`.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the knowledge base (configured path, config-dir override, or
//!    built-in).
//! 4. Build the [`AdmissionPipeline`].
//! 5. Run the requested command over each input file (or stdin).
//!
//! Exit codes: `0` every input admitted, `1` at least one rejected, `2`
//! startup or input failure (see [`exit_status`]).

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde_json::json;

use cs_helper::config::{AppConfig, AppPaths};
use cs_helper::knowledge::KnowledgeBase;
use cs_helper::pipeline::AdmissionPipeline;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Command {
    Admit(Vec<PathBuf>),
    Classify(Vec<PathBuf>),
    Subjects,
    Init,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Admit(Vec::new())),
        Some("classify") => Ok(Command::Classify(
            args[1..].iter().map(PathBuf::from).collect(),
        )),
        Some("subjects") => Ok(Command::Subjects),
        Some("init") => Ok(Command::Init),
        Some("help" | "--help" | "-h") => Ok(Command::Help),
        Some(flag) if flag.starts_with('-') && flag != "-" => {
            anyhow::bail!("unknown option {flag}. Use 'cs-helper help' for usage.")
        }
        Some(_) => Ok(Command::Admit(args.iter().map(PathBuf::from).collect())),
    }
}

fn print_usage() {
    println!("cs-helper: admit and classify computer-science questions");
    println!();
    println!("Usage: cs-helper [command] [FILE ...]");
    println!();
    println!("Commands:");
    println!("  [FILE ...]            Run the admission pipeline (stdin when no file)");
    println!("  classify [FILE ...]   Print the raw subject classification");
    println!("  subjects              List knowledge-base subjects");
    println!("  init                  Write the current settings to settings.toml");
    println!("  help                  Show this message");
    println!();
    println!("Logging is controlled with RUST_LOG (default: info).");
}

/// Read every input; `-` or an empty list means stdin.
fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if files.is_empty() {
        return Ok(vec![("<stdin>".into(), read_stdin()?)]);
    }
    files
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                return Ok(("<stdin>".into(), read_stdin()?));
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run_admit(pipeline: &AdmissionPipeline, files: &[PathBuf]) -> Result<bool> {
    let mut all_admitted = true;
    for (source, text) in read_inputs(files)? {
        let report = match pipeline.admit(&text) {
            Ok(question) => json!({ "source": source, "success": true, "data": question }),
            Err(rejection) => {
                all_admitted = false;
                json!({
                    "source": source,
                    "success": false,
                    "error": rejection.code(),
                    "message": rejection.to_string(),
                    "suggestion": rejection.suggestion(),
                    "futureFeature": rejection.is_future_feature(),
                })
            }
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(all_admitted)
}

fn run_classify(pipeline: &AdmissionPipeline, files: &[PathBuf]) -> Result<bool> {
    let mut all_accepted = true;
    for (source, text) in read_inputs(files)? {
        let result = pipeline.classifier().classify(&text);
        all_accepted &= !result.is_rejected();
        let report = json!({ "source": source, "result": result });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(all_accepted)
}

fn run_subjects(kb: &KnowledgeBase) {
    for subject in kb.subjects() {
        println!(
            "{:<45} {:>3} keywords  {:>3} synonym groups",
            subject.name,
            subject.keywords.len(),
            subject.synonyms.len()
        );
    }
}

fn run(args: &[String]) -> Result<bool> {
    let command = parse_args(args)?;
    if let Command::Help = command {
        print_usage();
        return Ok(true);
    }

    // 2. Configuration
    let config = AppConfig::load().context("failed to load settings.toml")?;
    if let Command::Init = command {
        let path = AppPaths::new().settings_file;
        config.save().context("failed to write settings.toml")?;
        println!("{}", path.display());
        return Ok(true);
    }

    // 3. Knowledge base, fatal when configured but unreadable
    let kb = KnowledgeBase::from_config(&config.knowledge, &AppPaths::new().knowledge_file)
        .context("failed to load knowledge base")?;

    // 4. Pipeline
    let pipeline = AdmissionPipeline::from_config(&kb, &config)
        .context("failed to compile knowledge base")?;
    let thresholds = pipeline.classifier().config();
    log::debug!(
        "Classifier ready: {} subjects, min distinct {}, min occurrences {}",
        kb.len(),
        thresholds.min_distinct_keywords,
        thresholds.min_total_occurrences
    );

    match command {
        Command::Admit(files) => run_admit(&pipeline, &files),
        Command::Classify(files) => run_classify(&pipeline, &files),
        Command::Subjects => {
            run_subjects(&kb);
            Ok(true)
        }
        Command::Init | Command::Help => Ok(true),
    }
}

/// Process exit status for the outcome of [`run`].
fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = run(&args);
    if let Err(e) = &outcome {
        log::error!("{e:#}");
    }
    ExitCode::from(exit_status(&outcome))
}
