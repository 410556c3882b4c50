//! Command-line front end for response files.
//!
//! `expand` resolves `@path` arguments, `shorten` writes a response file
//! when arguments are too long, and `exec` runs a program with its
//! arguments shortened on the fly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use responsefile::core::escape::encode_arg;
use responsefile::exit_codes;
use responsefile::io::config::{Config, DEFAULT_CONFIG_FILE, load_config};
use responsefile::io::process::{ExecRequest, run_shortened};
use responsefile::{expand, logging, shorten};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "responsefile",
    version,
    about = "Shorten and expand @file response files"
)]
struct Cli {
    /// Config file. Defaults to `responsefile.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand `@path` arguments and print the result, one encoded argument per line.
    Expand {
        /// Print a JSON array instead of one argument per line.
        #[arg(long)]
        json: bool,
        /// Fail when response files nest deeper than this.
        #[arg(long)]
        max_depth: Option<usize>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Write arguments to a response file if they exceed the limit and print
    /// the arguments to use instead. The file is left for the caller to remove.
    Shorten {
        /// Byte limit; 0 uses the default, negative always writes a file.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run PROGRAM, passing ARGS through a response file if they exceed the limit.
    Exec {
        /// Byte limit; 0 uses the default, negative always writes a file.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Kill the program after this many seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Number of leading ARGS passed directly, never through the response file.
        #[arg(long, default_value_t = 0)]
        verbatim: usize,
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = load_cli_config(cli.config.as_deref())?;
    match cli.command {
        Command::Expand {
            json,
            max_depth,
            args,
        } => cmd_expand(config, json, max_depth, &args),
        Command::Shorten { limit, args } => cmd_shorten(config, limit, &args),
        Command::Exec {
            limit,
            timeout_secs,
            verbatim,
            program,
            args,
        } => cmd_exec(config, limit, timeout_secs, verbatim, &program, &args),
    }
}

/// An explicit `--config` must exist; the default file is optional.
fn load_cli_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config {} not found", path.display());
            }
            load_config(path)
        }
        None => load_config(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn cmd_expand(
    mut config: Config,
    json: bool,
    max_depth: Option<usize>,
    args: &[String],
) -> Result<i32> {
    if max_depth.is_some() {
        config.expand.max_depth = max_depth;
        config.validate()?;
    }
    let expanded = expand(args, &config.expand)?;
    debug!(input = args.len(), output = expanded.len(), "expand finished");
    if json {
        println!(
            "{}",
            serde_json::to_string(&*expanded).context("serialize arguments")?
        );
    } else {
        for arg in expanded.iter() {
            println!("{}", encode_arg(arg));
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_shorten(mut config: Config, limit: Option<i64>, args: &[String]) -> Result<i32> {
    if let Some(limit) = limit {
        config.shorten.arg_length_limit = limit;
    }
    let shortened = shorten(args, &config.shorten)?;
    for arg in shortened.args.iter() {
        println!("{}", encode_arg(arg));
    }
    if let Some(path) = shortened.release.keep().context("keep response file")? {
        debug!(path = %path.display(), "response file kept");
    }
    Ok(exit_codes::OK)
}

fn cmd_exec(
    mut config: Config,
    limit: Option<i64>,
    timeout_secs: Option<u64>,
    verbatim: usize,
    program: &str,
    args: &[String],
) -> Result<i32> {
    if let Some(limit) = limit {
        config.shorten.arg_length_limit = limit;
    }
    if verbatim > args.len() {
        bail!(
            "--verbatim {} exceeds the {} arguments given",
            verbatim,
            args.len()
        );
    }
    let (verbatim_args, shortened_args) = args.split_at(verbatim);
    let outcome = run_shortened(&ExecRequest {
        program,
        verbatim_args,
        args: shortened_args,
        shorten: &config.shorten,
        timeout: timeout_secs.map(Duration::from_secs),
    })?;

    if outcome.timed_out {
        eprintln!("responsefile: {} timed out", program);
        return Ok(exit_codes::TIMEOUT);
    }
    Ok(outcome.status.code().unwrap_or(exit_codes::NO_EXIT_CODE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_expand_keeps_hyphenated_args() {
        let cli = Cli::parse_from([
            "responsefile",
            "expand",
            "--json",
            "--",
            "-o",
            "@args.rsp",
        ]);
        match cli.command {
            Command::Expand { json, args, .. } => {
                assert!(json);
                assert_eq!(args, vec!["-o".to_string(), "@args.rsp".to_string()]);
            }
            _ => panic!("expected expand"),
        }
    }

    #[test]
    fn parse_shorten_negative_limit() {
        let cli = Cli::parse_from(["responsefile", "shorten", "--limit", "-1", "a", "b"]);
        assert!(matches!(
            cli.command,
            Command::Shorten { limit: Some(-1), ref args } if args.len() == 2
        ));
    }

    #[test]
    fn parse_exec_splits_program_from_args() {
        let cli = Cli::parse_from([
            "responsefile",
            "exec",
            "--verbatim",
            "1",
            "--",
            "cc",
            "-c",
            "main.c",
        ]);
        match cli.command {
            Command::Exec {
                verbatim,
                program,
                args,
                ..
            } => {
                assert_eq!(verbatim, 1);
                assert_eq!(program, "cc");
                assert_eq!(args, vec!["-c".to_string(), "main.c".to_string()]);
            }
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("nope.toml");
        let err = load_cli_config(Some(missing.as_path())).expect_err("missing");
        assert!(err.to_string().contains("not found"));
    }
}
