//! promptkit CLI: validate, inspect and dry-render prompt configuration files.
//!
//! Usage:
//!   promptkit validate <path>...                          Validate configuration files
//!   promptkit list [--config <path>]                      List prompts and their bindings
//!   promptkit render <prompt> [key=value ...] [--config <path>]
//!                                                         Render a prompt without a client

use promptkit::config::CONFIG_ENV_VAR;
use promptkit::{PromptLoader, Variables};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "validate" => cmd_validate(&args[2..]).await,
        "list" => cmd_list(&args[2..]).await,
        "render" => cmd_render(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(message) = outcome {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    format!(
        r#"promptkit - prompt configuration tool

USAGE:
    promptkit <COMMAND> [OPTIONS]

COMMANDS:
    validate <path>...                         Validate one or more configuration files
    list [--config <path>]                     List prompts with model, provider and temperature
    render <prompt> [key=value ...] [--config <path>]
                                               Render a prompt template without calling a client
    version                                    Show version information
    help                                       Show this help message

ENVIRONMENT:
    {CONFIG_ENV_VAR}                       Configuration file used when --config is absent
    RUST_LOG                                   Log filter (default: {DEFAULT_LOG_FILTER})"#
    )
}

fn print_usage() {
    println!("{}", usage());
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn cmd_version() {
    println!("promptkit {}", env!("CARGO_PKG_VERSION"));
}

/// Split `--config <path>` out of `args`, returning it and the remaining arguments.
fn split_config_flag(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>), String> {
    let mut config = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter
                .next()
                .ok_or_else(|| "--config needs a path".to_string())?;
            config = Some(PathBuf::from(path));
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((config, rest))
}

async fn open_loader(config: Option<PathBuf>) -> Result<PromptLoader, String> {
    let loaded = match config {
        Some(path) => PromptLoader::from_path(path).await,
        None => PromptLoader::from_env().await,
    };
    loaded.map_err(|e| e.to_string())
}

async fn cmd_validate(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("validate needs at least one path".to_string());
    }

    let mut failures = Vec::new();
    for path in args {
        print!("  {path}... ");
        let loader = PromptLoader::new();
        match loader.load(path).await {
            Ok(config) => println!("OK ({} prompts)", config.len()),
            Err(e) => {
                println!("FAIL");
                failures.push(format!("{path}: {e}"));
            }
        }
    }

    println!();
    println!("{}/{} files valid", args.len() - failures.len(), args.len());
    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        println!("  {failure}");
    }
    Err(format!("{} file(s) failed validation", failures.len()))
}

async fn cmd_list(args: &[String]) -> Result<(), String> {
    let (config, rest) = split_config_flag(args)?;
    if let Some(extra) = rest.first() {
        return Err(format!("unexpected argument: {extra}"));
    }
    let loader = open_loader(config).await?;
    let snapshot = loader.snapshot();

    if snapshot.is_empty() {
        println!("No prompts defined.");
        return Ok(());
    }

    println!(
        "{:<24} {:<12} {:<28} {:>5}  PLACEHOLDERS",
        "PROMPT", "PROVIDER", "MODEL", "TEMP"
    );
    for definition in snapshot.iter() {
        let mut flags = Vec::new();
        if definition.model.structured {
            flags.push("structured".to_string());
        }
        if definition.has_tools() {
            flags.push(format!("{} tools", definition.tools.len()));
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        };
        println!(
            "{:<24} {:<12} {:<28} {:>5.2}  {}{}",
            definition.name,
            definition.model.provider,
            definition.model.name,
            definition.model.temperature,
            definition.placeholders().join(", "),
            flags
        );
    }
    Ok(())
}

async fn cmd_render(args: &[String]) -> Result<(), String> {
    let (config, rest) = split_config_flag(args)?;
    let (prompt, pairs) = rest
        .split_first()
        .ok_or_else(|| "render needs a prompt name".to_string())?;

    let mut variables = Variables::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, found '{pair}'"))?;
        variables.insert(key.to_string(), serde_json::Value::from(value));
    }

    let loader = open_loader(config).await?;
    let definition = loader.get(prompt).map_err(|e| e.to_string())?;
    let rendered = definition.render(&variables).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}
