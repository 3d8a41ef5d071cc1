//! bemflat CLI
//!
//! Compiles `@block` component stylesheets into flat BEM CSS.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bemflat_common::warning::clear_warnings;
use bemflat_compiler::{CompileOptions, CompileReport, Config, compile_css};
use clap::{ArgAction, Parser};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// bemflat — flatten @block/@modifier/@state components into BEM selectors
#[derive(Parser, Debug)]
#[command(name = "bemflat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compile the base variant of every component
    bemflat button.css

    # Compile the secondary variant
    bemflat -m secondary button.css -o button-secondary.css

    # Several modifiers, suffixes in this order
    bemflat -m large -m dark button.css

    # Modifiers from a config file ({"modifiers": ["large", "dark"]})
    bemflat --config variant.json button.css

    # List the modifiers a stylesheet defines
    bemflat --list-modifiers button.css
"#)]
struct Cli {
    /// Stylesheet to compile (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Modifier to compile; repeat for several (overrides the config file)
    #[arg(short = 'm', long = "modifier", value_name = "NAME")]
    modifiers: Vec<String>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write CSS to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the modifiers found in the stylesheet instead of CSS
    #[arg(long)]
    list_modifiers: bool,

    /// Log more (-v debug, -vv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    clear_warnings();

    let options = load_options(&cli)?;
    tracing::debug!(?options, "compile options");

    let source = read_input(cli.input.as_deref())?;
    let compiled = compile_css(&source, &options)
        .with_context(|| format!("failed to parse {}", input_name(cli.input.as_deref())))?;

    if cli.list_modifiers {
        for modifier in &compiled.report.modifiers {
            println!("{modifier}");
        }
    } else {
        write_output(cli.output.as_deref(), &compiled.css)?;
    }

    report_failures(&compiled.report);
    if !compiled.report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Install the `tracing` subscriber. Warnings about failed components are
/// printed by [`report_failures`], so the default level is `error`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build compile options from the config file, then the command line.
fn load_options(cli: &Cli) -> anyhow::Result<CompileOptions> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            Config::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };
    if !cli.modifiers.is_empty() {
        config.modifiers = Some(cli.modifiers.clone());
    }
    Ok(CompileOptions::from(config))
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, css: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(css.as_bytes())?;
            if !css.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn input_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

fn report_failures(report: &CompileReport) {
    for failure in &report.failures {
        eprintln!("{} {failure}", "error:".red().bold());
    }
    if !report.failures.is_empty() {
        eprintln!(
            "{} {} compiled, {} left as written",
            "summary:".yellow().bold(),
            report.compiled.len(),
            report.failures.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_modifiers() {
        let cli = Cli::try_parse_from(["bemflat", "-m", "large", "--modifier", "dark", "a.css"])
            .unwrap();
        assert_eq!(cli.modifiers, vec!["large", "dark"]);
        assert_eq!(cli.input, Some(PathBuf::from("a.css")));

        let options = load_options(&cli).unwrap();
        assert_eq!(options.configured_modifiers(), vec!["large", "dark"]);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bemflat"]).unwrap();
        assert_eq!(cli.input, None);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.list_modifiers);
        assert!(load_options(&cli).unwrap().configured_modifiers().is_empty());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["bemflat", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = Cli::try_parse_from(["bemflat", "--config", "does/not/exist.json"]).unwrap();
        let err = load_options(&cli).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
