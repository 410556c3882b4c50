//! Run a child process whose arguments go through a response file when they
//! are too long for the command line.

use std::process::{Command, ExitStatus};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

use crate::io::shorten::{ShortenOptions, Shortened, shorten};

/// What to run and how to pass its arguments.
#[derive(Debug, Clone)]
pub struct ExecRequest<'a> {
    pub program: &'a str,
    /// Passed directly, ahead of any response file (e.g. a subcommand name).
    pub verbatim_args: &'a [String],
    /// Shortened into a response file when over the limit.
    pub args: &'a [String],
    pub shorten: &'a ShortenOptions,
    /// Kill the child after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// How the child finished.
#[derive(Debug)]
pub struct ExecOutcome {
    pub status: ExitStatus,
    pub timed_out: bool,
    pub used_response_file: bool,
}

/// Shorten `request.args`, run the program, then release the response file.
///
/// The response file lives exactly as long as the child: it is removed after
/// the child exits, after it is killed on timeout, or when spawning fails.
#[instrument(skip_all, fields(program = request.program, args = request.args.len()))]
pub fn run_shortened(request: &ExecRequest<'_>) -> Result<ExecOutcome> {
    let Shortened { args, release } =
        shorten(request.args, request.shorten).context("shorten arguments")?;
    let used_response_file = !release.is_noop();

    let mut cmd = Command::new(request.program);
    cmd.args(request.verbatim_args).args(args.iter());
    let result = spawn_and_wait(cmd, request.timeout);
    release.release();

    let (status, timed_out) =
        result.with_context(|| format!("run {}", request.program))?;
    debug!(exit_code = ?status.code(), timed_out, used_response_file, "command finished");
    Ok(ExecOutcome {
        status,
        timed_out,
        used_response_file,
    })
}

fn spawn_and_wait(mut cmd: Command, timeout: Option<Duration>) -> Result<(ExitStatus, bool)> {
    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let Some(timeout) = timeout else {
        let status = child.wait().context("wait for command")?;
        return Ok((status, false));
    };
    match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => Ok((status, false)),
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            child.kill().context("kill command")?;
            let status = child.wait().context("wait command after kill")?;
            Ok((status, true))
        }
    }
}
