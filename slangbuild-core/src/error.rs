use std::path::PathBuf;

use derive_more::{Display, Error};
use slangbuild_types::ShaderStage;

/// Fatal conditions that end the run with a specific exit code.
///
/// These travel inside [`anyhow::Error`] and are recovered with
/// [`exit_code`] when the process exits.
#[derive(Debug, Display, Error)]
pub enum PipelineError {
    #[display("Could not find slangc executable on PATH, and was not specified with --slangc")]
    CompilerNotFound,
    #[display("No directory found with name {name} under {}", root.display())]
    SampleNotFound { name: String, root: PathBuf },
    #[display("slangc exited with {code} compiling the {stage} stage of {}", path.display())]
    CompileFailed {
        path: PathBuf,
        stage: ShaderStage,
        code: i32,
    },
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::CompilerNotFound => 1,
            PipelineError::SampleNotFound { .. } => -1,
            PipelineError::CompileFailed { code, .. } => *code,
        }
    }
}

/// Process exit code for an error that ended the run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PipelineError>()
        .map(PipelineError::exit_code)
        .unwrap_or(1)
}
