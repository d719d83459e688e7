//! CLI entry point for modgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `modgate-app` crate.

mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use modgate_app::{
    ScanInput, parse_report_json, render_annotations, render_markdown, report_schema, run_scan,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use modgate_settings::Overrides;
use modgate_types::ScanReport;

#[derive(Parser, Debug)]
#[command(
    name = "modgate",
    version,
    about = "Admission gate for plugin modules in a probe directory"
)]
struct Cli {
    /// Probe directory holding candidate module descriptors.
    #[arg(long, default_value = ".")]
    probe_dir: Utf8PathBuf,

    /// Path to modgate config TOML, relative to the probe directory. A missing file means defaults.
    #[arg(long, default_value = "modgate.toml")]
    config: Utf8PathBuf,

    /// Override profile (plugin|any).
    #[arg(long)]
    profile: Option<String>,

    /// Override which outcomes fail the scan (fault|rejection).
    #[arg(long)]
    fail_on: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every module in the probe directory and write artifacts.
    Scan {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/modgate/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/modgate/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/modgate/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/modgate/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Print the JSON schema of the scan report.
    Schema,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Scan {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_scan(&cli, report_out, *write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Schema => {
            println!("{}", report_schema()?);
            Ok(())
        }
    }
}

fn cmd_scan(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let probe_root = cli
        .probe_dir
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.probe_dir.clone());

    let result = (|| -> anyhow::Result<i32> {
        // Missing config file is allowed (presets apply).
        let cfg_path = probe_root.join(&cli.config);
        let cfg_text = match std::fs::read_to_string(&cfg_path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(config = %cfg_path, "no config file; using defaults");
                String::new()
            }
            Err(e) => return Err(e).with_context(|| format!("read config: {cfg_path}")),
        };

        let overrides = Overrides {
            profile: cli.profile.clone(),
            fail_on: cli.fail_on.clone(),
        };

        let output = run_scan(ScanInput {
            probe_root: &probe_root,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::warn!(error = %format!("{write_err:#}"), "could not write error report");
            }
            eprintln!("modgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &ScanReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
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
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}
