//! CLI entry point for modsan.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `modsan-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use modsan_app::{
    RunInput, SanitizeOptions, parse_report_json, render_markdown, report_exit_code,
    run_sanitize, runtime_error_report, sanitize_path, serialize_report,
};
use modsan_settings::Overrides;
use modsan_types::{Coordinate, RunMode, SanitizeReport, ids};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "modsan",
    version,
    about = "Strip aggregator dependencies from generated Gradle module metadata"
)]
struct Cli {
    /// Repository root (directory containing settings.gradle).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to modsan config TOML, relative to the repo root.
    #[arg(long, default_value = ids::CONFIG_FILE)]
    config: Utf8PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). `MODSAN_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sanitize the given module.json files in place.
    Sanitize {
        /// Module metadata files to rewrite.
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,

        /// Group of the dependency to remove (replaces configured exclusions).
        #[arg(long, requires = "module")]
        group: Option<String>,

        /// Module of the dependency to remove (replaces configured exclusions).
        #[arg(long, requires = "group")]
        module: Option<String>,

        /// Report what would be removed without writing; exit 2 if anything would change.
        #[arg(long)]
        check: bool,

        /// Spaces per indentation level in the rewritten file.
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Sanitize every module of the build and write a report.
    Run {
        /// Publication whose metadata is sanitized (default apiInterface).
        #[arg(long)]
        publication: Option<String>,

        /// Report what would be removed without writing; exit 2 if anything would change.
        #[arg(long)]
        check: bool,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/modsan/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/modsan/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/modsan/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Sanitize {
            ref files,
            ref group,
            ref module,
            check,
            indent,
        } => {
            let exclusions = match (group, module) {
                (Some(group), Some(module)) => Some(vec![Coordinate::new(group, module)]),
                _ => None,
            };
            let overrides = Overrides {
                exclusions,
                indent,
                ..Default::default()
            };
            exit_with(cmd_sanitize(&cli, files, overrides, mode(check)))
        }
        Commands::Run {
            ref publication,
            check,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                publication: publication.clone(),
                ..Default::default()
            };
            let markdown_out = write_markdown.then_some(markdown_out.as_path());
            cmd_run(&cli, overrides, mode(check), report_out, markdown_out)
        }
        Commands::Md { report, output } => cmd_md(&report, output.as_deref()),
    }
}

/// Parse arguments; usage errors exit 1 so that 2 always means "check found changes".
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MODSAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn mode(check: bool) -> RunMode {
    if check { RunMode::Check } else { RunMode::Write }
}

fn repo_root(cli: &Cli) -> Utf8PathBuf {
    cli.repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone())
}

/// Config contents; a missing file means defaults.
fn read_config(repo_root: &Utf8Path, config: &Utf8Path) -> anyhow::Result<String> {
    let path = repo_root.join(config);
    if !path.exists() {
        tracing::debug!(%path, "no config file; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(&path).with_context(|| format!("read config: {path}"))
}

fn exit_with(result: anyhow::Result<i32>) -> anyhow::Result<()> {
    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("modsan error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_sanitize(
    cli: &Cli,
    files: &[Utf8PathBuf],
    overrides: Overrides,
    mode: RunMode,
) -> anyhow::Result<i32> {
    let repo_root = repo_root(cli);
    let cfg_text = read_config(&repo_root, &cli.config)?;
    let cfg = if cfg_text.trim().is_empty() {
        modsan_settings::ModsanConfigV1::default()
    } else {
        modsan_settings::parse_config_toml(&cfg_text).context("parse config")?
    };
    let resolved =
        modsan_settings::resolve_config(cfg, None, overrides).context("resolve config")?;
    let effective = &resolved.effective;
    let options = SanitizeOptions {
        indent: effective.indent,
        mode,
    };

    let mut failed = false;
    let mut changed = false;
    for path in files {
        match sanitize_path(path, &effective.exclusions, options) {
            Ok(summary) => {
                changed |= summary.is_changed();
                let verb = match mode {
                    RunMode::Write => "removed",
                    RunMode::Check => "would remove",
                };
                println!("{path}: {verb} {}", summary.removed.len());
            }
            Err(err) => {
                failed = true;
                eprintln!("modsan error: {:#}", anyhow::Error::new(err));
            }
        }
    }

    Ok(if failed {
        1
    } else if changed && mode == RunMode::Check {
        2
    } else {
        0
    })
}

fn cmd_run(
    cli: &Cli,
    overrides: Overrides,
    mode: RunMode,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let repo_root = repo_root(cli);

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.exists() {
            anyhow::bail!("repo root does not exist: {}", repo_root);
        }
        let cfg_text = read_config(&repo_root, &cli.config)?;

        let publish_path = repo_root.join(ids::LEGACY_PUBLISH_CONFIG);
        let publish_text = if publish_path.exists() {
            Some(
                std::fs::read_to_string(&publish_path)
                    .with_context(|| format!("read {publish_path}"))?,
            )
        } else {
            None
        };

        let output = run_sanitize(RunInput {
            repo_root: &repo_root,
            config_text: &cfg_text,
            publish_json_text: publish_text.as_deref(),
            overrides,
            mode,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if let Some(markdown_out) = markdown_out {
            write_text_file(markdown_out, &render_markdown(&output.report))
                .context("write markdown")?;
        }

        let data = &output.report.data;
        eprintln!(
            "modsan: {} files, {} changed, {} dependencies removed, {} errors",
            data.files_total, data.files_changed, data.dependencies_removed, data.errors
        );
        Ok(report_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(mode, &format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("modsan error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &SanitizeReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}
