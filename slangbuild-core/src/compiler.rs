use std::{
    ffi::OsString,
    process::{Command, ExitStatus},
};

use anyhow::Context;
use slangbuild_types::CompileTask;

use crate::locator::CompilerPath;

pub const PROFILE: &str = "spirv_1_4";
pub const TARGET: &str = "spirv";
/// Slang warning suppressed on every invocation.
pub const DISABLED_WARNING: &str = "39001";

/// Exit code reported by a compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOutcome {
    code: i32,
}

impl CompileOutcome {
    pub const SUCCESS: Self = Self { code: 0 };

    pub fn from_code(code: i32) -> Self {
        Self { code }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<ExitStatus> for CompileOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::from_code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::from_code(128 + signal);
            }
        }
        Self::from_code(1)
    }
}

/// Something that turns a [`CompileTask`] into a SPIR-V file.
pub trait Compiler {
    fn compile(&mut self, task: &CompileTask) -> anyhow::Result<CompileOutcome>;
}

/// Runs the `slangc` executable, one blocking process per task.
#[derive(Debug, Clone)]
pub struct Slangc {
    path: CompilerPath,
}

impl Slangc {
    pub fn new(path: CompilerPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &CompilerPath {
        &self.path
    }

    pub fn command(&self, task: &CompileTask) -> Command {
        let mut command = Command::new(self.path.path());
        command.args(arguments(task));
        command
    }
}

impl Compiler for Slangc {
    fn compile(&mut self, task: &CompileTask) -> anyhow::Result<CompileOutcome> {
        let mut command = self.command(task);
        tracing::debug!(?command, "Running");
        let status = command
            .status()
            .with_context(|| format!("Failed to run {}", self.path.path().display()))?;
        Ok(status.into())
    }
}

/// Command line for one task, excluding the executable.
pub fn arguments(task: &CompileTask) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![task.source().into()];
    args.extend(
        [
            "-profile",
            PROFILE,
            "-matrix-layout-column-major",
            "-target",
            TARGET,
            "-o",
        ]
        .map(OsString::from),
    );
    args.push(task.output().into());
    args.extend(
        [
            "-entry",
            task.entry_point(),
            "-stage",
            task.stage().name(),
            "-warnings-disable",
            DISABLED_WARNING,
        ]
        .map(OsString::from),
    );
    args
}
