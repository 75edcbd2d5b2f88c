use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use anyhow::Context;
use slangbuild_types::prelude::*;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use walkdir::WalkDir;

use crate::{
    compiler::Compiler, default_progress_style, detector::detect_stages, error::PipelineError,
};

/// Immutable settings for one run.
#[derive(Debug, Clone, bon::Builder)]
pub struct DriverConfig {
    #[builder(into)]
    shader_root: PathBuf,
    /// Only compile files whose containing directory has exactly this name.
    #[builder(into)]
    sample: Option<String>,
}

impl DriverConfig {
    pub fn shader_root(&self) -> &Path {
        &self.shader_root
    }

    pub fn sample(&self) -> Option<&str> {
        self.sample.as_deref()
    }

    /// Whether `source` passes the sample filter.
    fn selects(&self, source: &Path) -> bool {
        let Some(sample) = &self.sample else {
            return true;
        };
        source
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|dir| dir == sample.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source files that passed the filter and were scanned for stages.
    pub files_scanned: usize,
    /// Source files that declared at least one stage.
    pub files_compiled: usize,
    pub stages_compiled: usize,
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.files_scanned += rhs.files_scanned;
        self.files_compiled += rhs.files_compiled;
        self.stages_compiled += rhs.stages_compiled;
    }
}

/// Walks the shader root and compiles every declared stage, stopping at the
/// first failure.
pub struct Driver<C> {
    config: DriverConfig,
    compiler: C,
}

impl<C: Compiler> Driver<C> {
    pub fn new(config: DriverConfig, compiler: C) -> Self {
        Self { config, compiler }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn into_compiler(self) -> C {
        self.compiler
    }

    pub fn run(&mut self) -> anyhow::Result<RunSummary> {
        let root = self.config.shader_root();
        tracing::info!("Looking for shaders in: {}", root.display());
        if let Some(sample) = self.config.sample() {
            ensure_sample_exists(root, sample)?;
        }

        let sources = self.sources()?;
        let span = tracing::info_span!("compile");
        span.pb_set_length(sources.len() as u64);
        span.pb_set_style(&default_progress_style());
        let span = span.entered();

        let mut summary = RunSummary::default();
        for source in sources {
            summary += self.compile_file(&source)?;
            span.pb_inc(1);
        }
        Ok(summary)
    }

    /// Compiles every stage `source` declares, in stage order.
    pub fn compile_file(&mut self, source: &Path) -> anyhow::Result<RunSummary> {
        let stages = detect_stages(source)?;
        let mut summary = RunSummary {
            files_scanned: 1,
            ..Default::default()
        };
        if stages.is_empty() {
            tracing::debug!("No shader stages declared in {}", source.display());
            return Ok(summary);
        }

        tracing::info!("Compiling {}", source.display());
        for stage in stages {
            let task = CompileTask::new(source, stage);
            tracing::info!("{}", task.output().display());
            let outcome = self.compiler.compile(&task)?;
            if !outcome.success() {
                tracing::error!("Error {}", outcome.code());
                return Err(PipelineError::CompileFailed {
                    path: source.to_path_buf(),
                    stage,
                    code: outcome.code(),
                }
                .into());
            }
            summary.stages_compiled += 1;
        }
        summary.files_compiled = 1;
        Ok(summary)
    }

    /// Source files under the root that pass the sample filter, in walk
    /// order.
    fn sources(&self) -> anyhow::Result<Vec<PathBuf>> {
        let root = self.config.shader_root();
        let mut sources = Vec::new();
        for entry in WalkDir::new(root) {
            let entry =
                entry.with_context(|| format!("Failed to walk shader root {}", root.display()))?;
            // follows symlinks, so linked sources are compiled too
            if !entry.path().is_file() {
                continue;
            }
            let is_source = entry
                .file_name()
                .as_encoded_bytes()
                .ends_with(SOURCE_EXTENSION.as_bytes());
            if is_source && self.config.selects(entry.path()) {
                sources.push(entry.into_path());
            }
        }
        Ok(sources)
    }
}

fn ensure_sample_exists(root: &Path, sample: &str) -> anyhow::Result<()> {
    for entry in WalkDir::new(root) {
        let entry =
            entry.with_context(|| format!("Failed to walk shader root {}", root.display()))?;
        if entry.file_type().is_dir() && entry.file_name() == sample {
            return Ok(());
        }
    }
    Err(PipelineError::SampleNotFound {
        name: sample.to_owned(),
        root: root.to_path_buf(),
    }
    .into())
}
