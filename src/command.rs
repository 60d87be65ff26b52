//! The one I/O boundary: run an external command synchronously and hand back its stdout.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::de::DeserializeOwned;

use crate::errors::QueryError;

pub trait CommandRunner {
    /// Runs `program` with `args` to completion. A non-zero exit status is an error.
    fn run(&self, program: &Path, args: &[&str]) -> Result<Vec<u8>, QueryError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[&str]) -> Result<Vec<u8>, QueryError> {
        (**self).run(program, args)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<Vec<u8>, QueryError> {
        let program_name = program.display().to_string();
        tracing::debug!(command = %quoted(&program_name, args), "running command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| QueryError::Spawn { program: program_name.clone(), source })?;
        if !output.status.success() {
            tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr), "command failed");
            return Err(QueryError::ExitStatus { program: program_name, status: output.status });
        }
        Ok(output.stdout)
    }
}

/// Runs a command printing a JSON array and decodes each element as `T`.
///
/// Any failure of the command or of the outer JSON yields an empty list. Elements that don't decode as `T` are skipped individually.
pub fn query_json_rows<T: DeserializeOwned>(runner: &impl CommandRunner, program: &Path, args: &[&str]) -> Vec<T> {
    match try_query_json_rows(runner, program, args) {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!(
                message_id = "q4XbTn2e",
                ?error,
                code = error.as_static_str(),
                command = %quoted(&program.display().to_string(), args),
                "query failed, treating as empty: {error}"
            );
            Vec::new()
        }
    }
}

fn try_query_json_rows<T: DeserializeOwned>(runner: &impl CommandRunner, program: &Path, args: &[&str]) -> Result<Vec<T>, QueryError> {
    let stdout = runner.run(program, args)?;
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&stdout)
        .map_err(|source| QueryError::Json { program: program.display().to_string(), source })?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            serde_json::from_value(row)
                .inspect_err(|error| tracing::debug!(?error, "skipping malformed row"))
                .ok()
        })
        .collect())
}

fn quoted(program: &str, args: &[&str]) -> String {
    let argv = std::iter::once(program).chain(args.iter().copied());
    shlex::try_join(argv.clone()).unwrap_or_else(|_| argv.collect::<Vec<_>>().join(" "))
}
