use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use starknet_hash_types::CompiledArtifact;

use super::{parse_diagnostics, CompilationSource, ContractCompiler, Diagnostic};
use crate::config::CompilerConfig;
use crate::error::CompilationError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const INLINE_SOURCE_FILE: &str = "contract.cairo";
const OUTPUT_FILE: &str = "compiled.json";
const STDERR_FILE: &str = "stderr.log";

/// Compiles through cairo-lang's `starknet-compile` executable.
///
/// Each call runs in a fresh temporary directory. The compiler either produces one artifact
/// or fails; a run that exceeds the configured timeout is killed.
#[derive(Debug, Clone, Default)]
pub struct StarknetCompileCli {
    config: CompilerConfig,
}

impl StarknetCompileCli {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(CompilerConfig::from_env())
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn build_command(
        &self,
        inputs: &[PathBuf],
        search_paths: &[PathBuf],
        output: &Path,
        stderr: File,
    ) -> Result<Command, CompilationError> {
        let mut command = Command::new(&self.config.executable);
        command.args(inputs).arg("--output").arg(output).arg("--no_debug_info");
        if !search_paths.is_empty() {
            let cairo_path = std::env::join_paths(search_paths)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            command.arg("--cairo_path").arg(cairo_path);
        }
        command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::from(stderr));
        Ok(command)
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, CompilationError> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= self.config.timeout {
                log::warn!(
                    "{} did not finish within {:?}, killing it",
                    self.config.executable.display(),
                    self.config.timeout
                );
                // The child may exit between try_wait and kill.
                let _ = child.kill();
                child.wait()?;
                return Err(CompilationError::Timeout(self.config.timeout));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ContractCompiler for StarknetCompileCli {
    fn compile(
        &self,
        source: &CompilationSource,
        search_paths: &[PathBuf],
    ) -> Result<CompiledArtifact, CompilationError> {
        let workdir = tempfile::tempdir()?;

        let inputs = match source {
            CompilationSource::Code(code) => {
                let path = workdir.path().join(INLINE_SOURCE_FILE);
                fs::write(&path, code)?;
                vec![path]
            }
            CompilationSource::Files(files) => files.clone(),
        };
        let output_path = workdir.path().join(OUTPUT_FILE);
        let stderr_path = workdir.path().join(STDERR_FILE);

        let mut command = self.build_command(&inputs, search_paths, &output_path, File::create(&stderr_path)?)?;

        log::info!(
            "Compiling {} source file(s) with {} ({} search path(s))",
            inputs.len(),
            self.config.executable.display(),
            search_paths.len()
        );
        let mut child = command
            .spawn()
            .map_err(|source| CompilationError::Launch { executable: self.config.executable.clone(), source })?;
        let status = self.wait(&mut child)?;

        if !status.success() {
            let stderr = fs::read_to_string(&stderr_path)?;
            let mut diagnostics = parse_diagnostics(&stderr);
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic {
                    message: format!("{} exited with {status}", self.config.executable.display()),
                    location: None,
                });
            }
            log::debug!("Compilation failed with {} diagnostic(s)", diagnostics.len());
            return Err(CompilationError::Rejected { diagnostics });
        }

        CompiledArtifact::from_path(&output_path).map_err(CompilationError::InvalidOutput)
    }
}
