use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use crate::command::CommandRunner;
use crate::errors::QueryError;
use crate::prefix::{AddrFamily, NetworkPrefix};
use crate::route::Route;

/// Replays canned stdout keyed by the joined argument list. Unknown commands fail like a non-zero exit.
#[derive(Default)]
pub struct FakeRunner {
    outputs: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn with(mut self, args: &str, stdout: &str) -> Self {
        self.outputs.insert(args.to_string(), stdout.to_string());
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<Vec<u8>, QueryError> {
        let key = args.join(" ");
        self.calls.borrow_mut().push(key.clone());
        self.outputs.get(&key).map(|stdout| stdout.clone().into_bytes()).ok_or_else(|| QueryError::Spawn {
            program: program.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, format!("no canned output for `{key}`")),
        })
    }
}

pub fn net(s: &str) -> NetworkPrefix {
    s.parse().unwrap()
}

pub fn v4(dst: &str, dev: &str) -> Route {
    Route::new(dst, Some(dev), None, AddrFamily::V4)
}

pub fn v6(dst: &str, dev: &str) -> Route {
    Route::new(dst, Some(dev), None, AddrFamily::V6)
}
