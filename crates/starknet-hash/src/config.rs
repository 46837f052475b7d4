use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

pub const DEFAULT_COMPILER_EXECUTABLE: &str = "starknet-compile";
pub const DEFAULT_COMPILER_TIMEOUT: Duration = Duration::from_secs(120);

pub const COMPILER_EXECUTABLE_ENV: &str = "STARKNET_COMPILE_BIN";
pub const COMPILER_TIMEOUT_ENV: &str = "STARKNET_COMPILE_TIMEOUT_SECS";

/// Settings for the external cairo-lang compiler.
#[serde_as]
#[derive(Debug, Serialize, Clone, Deserialize, PartialEq, Eq)]
pub struct CompilerConfig {
    pub executable: PathBuf,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { executable: PathBuf::from(DEFAULT_COMPILER_EXECUTABLE), timeout: DEFAULT_COMPILER_TIMEOUT }
    }
}

impl CompilerConfig {
    /// Reads `STARKNET_COMPILE_BIN` and `STARKNET_COMPILE_TIMEOUT_SECS`. Unset variables fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        let executable = std::env::var_os(COMPILER_EXECUTABLE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER_EXECUTABLE));
        let timeout = parse_timeout(std::env::var(COMPILER_TIMEOUT_ENV).ok().as_deref());

        Self { executable, timeout }
    }
}

/// A timeout in whole seconds. Anything unparsable is logged and replaced by the default.
fn parse_timeout(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return DEFAULT_COMPILER_TIMEOUT;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(e) => {
            log::warn!("Ignoring {COMPILER_TIMEOUT_ENV}={raw:?} ({e}), using {DEFAULT_COMPILER_TIMEOUT:?}");
            DEFAULT_COMPILER_TIMEOUT
        }
    }
}
