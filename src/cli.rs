//! Shared command-line interface logic: argument parsing and help text.
use crate::render::OutputFormat;
use anyhow::{Result, anyhow, bail};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render {
        output: Option<PathBuf>,
        format: Option<OutputFormat>,
    },
    Init {
        force: bool,
    },
    Template,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn value_of(flag: &str, value: Option<&String>) -> Result<String> {
    value
        .cloned()
        .ok_or_else(|| anyhow!("{} expects a value (see --help)", flag))
}

impl Cli {
    /// Parses arguments without the program name. No command means `render`.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut root = None;
        let mut command_name: Option<&str> = None;
        let mut output = None;
        let mut format = None;
        let mut force = false;

        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => {
                    return Ok(Self {
                        root,
                        command: Command::Help,
                    });
                }
                "-r" | "--root" => root = Some(PathBuf::from(value_of(arg, it.next())?)),
                "-o" | "--output" => output = Some(PathBuf::from(value_of(arg, it.next())?)),
                "-f" | "--format" => {
                    let raw = value_of(arg, it.next())?;
                    format = Some(
                        OutputFormat::from_str(&raw)
                            .map_err(|_| anyhow!("Unknown format '{}' (png or html)", raw))?,
                    );
                }
                "--force" => force = true,
                "render" | "init" | "template" if command_name.is_none() => {
                    command_name = Some(arg.as_str());
                }
                other => bail!("Unexpected argument '{}' (see --help)", other),
            }
        }

        let command = match command_name.unwrap_or("render") {
            "init" => Command::Init { force },
            "template" => Command::Template,
            _ => Command::Render { output, format },
        };
        Ok(Self { root, command })
    }
}

/// Output format for `render`: `--format` wins, then the extension of
/// `--output`, then the configured format.
pub fn resolve_format(
    explicit: Option<OutputFormat>,
    output: Option<&Path>,
    configured: OutputFormat,
) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    let from_extension = output
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "htm" => Some(OutputFormat::Html),
            other => OutputFormat::from_str(other).ok(),
        });
    from_extension.unwrap_or(configured)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Todo Snapshot v{} - to-do list images for e-paper displays",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [render] [--output <file>] [--format png|html]", binary_name);
    println!("    {} [--root <path>] init [--force]", binary_name);
    println!("    {} template", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    render                Fetch tasks and write the snapshot (default).");
    println!("    init                  Write a starter config.toml.");
    println!("    template              Print the plugin settings template as JSON.");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -o, --output <file>   Where to write the snapshot (default: cache dir).");
    println!("    -f, --format <fmt>    png or html (default: --output extension, then config).");
    println!("        --force           Overwrite an existing config with init.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("PROVIDERS ([settings] provider = ...):");
    println!("    google_tasks          client_id, client_secret, refresh_token, list_id");
    println!("    todoist               api_key or TODOIST_API_TOKEN, project_id");
    println!("    placeholder           prompt");
    println!();
    println!("COMMON SETTINGS:");
    println!("    title, max_tasks, show_details");
}
