use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::error::PipelineError;

pub const COMPILER_NAME: &str = "slangc";
pub const SDK_ENV: &str = "VULKAN_SDK";
pub const SEARCH_PATH_ENV: &str = "PATH";

/// Where a [`CompilerPath`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CompilerSource {
    #[strum(serialize = "--slangc")]
    Explicit,
    #[strum(serialize = "VULKAN_SDK")]
    VulkanSdk,
    #[strum(serialize = "PATH")]
    SearchPath,
}

/// A `slangc` executable that existed when the run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerPath {
    path: PathBuf,
    source: CompilerSource,
}

impl CompilerPath {
    pub(crate) fn new(path: impl Into<PathBuf>, source: CompilerSource) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> CompilerSource {
        self.source
    }
}

/// The environment variables the locator consults.
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct Environment {
    #[builder(into)]
    vulkan_sdk: Option<PathBuf>,
    #[builder(into)]
    search_path: Option<OsString>,
    /// Base for a relative `--slangc`.
    #[builder(into)]
    working_dir: Option<PathBuf>,
}

impl Environment {
    pub fn from_process() -> Self {
        Self {
            vulkan_sdk: env::var_os(SDK_ENV).map(PathBuf::from),
            search_path: env::var_os(SEARCH_PATH_ENV),
            working_dir: env::current_dir().ok(),
        }
    }

    /// Anchors a relative path to the working directory so the file that is
    /// checked is the file that runs, not a `PATH` lookup of the same name.
    fn absolute(&self, path: &Path) -> anyhow::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let working_dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Failed to read the working directory")?,
        };
        Ok(working_dir.join(path))
    }

    fn sdk_candidates(&self) -> Vec<PathBuf> {
        let Some(root) = &self.vulkan_sdk else {
            return Vec::new();
        };
        let mut candidates = vec![root.join("Bin").join("slangc.exe")];
        if !cfg!(windows) {
            candidates.push(root.join("bin").join(COMPILER_NAME));
        }
        candidates
    }

    fn search_path_candidates(&self) -> Vec<PathBuf> {
        let name = format!("{COMPILER_NAME}{}", env::consts::EXE_SUFFIX);
        self.search_path
            .iter()
            .flat_map(env::split_paths)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(&name))
            .collect()
    }
}

/// Resolves the `slangc` executable.
///
/// An explicit path wins, then the Vulkan SDK, then the first match on
/// `PATH`. Fails with [`PipelineError::CompilerNotFound`] when nothing usable
/// exists.
#[bon::builder]
pub fn locate_compiler(
    explicit: Option<&Path>,
    environment: &Environment,
) -> anyhow::Result<CompilerPath> {
    if let Some(path) = explicit {
        let absolute = environment.absolute(path)?;
        if is_executable(&absolute) {
            return Ok(CompilerPath::new(absolute, CompilerSource::Explicit));
        }
        tracing::warn!(
            "--slangc {} is not an executable file, searching elsewhere",
            path.display()
        );
    }

    let sdk = environment
        .sdk_candidates()
        .into_iter()
        .map(|path| (path, CompilerSource::VulkanSdk));
    let search_path = environment
        .search_path_candidates()
        .into_iter()
        .map(|path| (path, CompilerSource::SearchPath));

    sdk.chain(search_path)
        .find(|(path, _)| is_executable(path))
        .map(|(path, source)| CompilerPath::new(path, source))
        .ok_or_else(|| PipelineError::CompilerNotFound.into())
}

pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    let executable = {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    };
    #[cfg(not(unix))]
    let executable = true;
    executable
}
