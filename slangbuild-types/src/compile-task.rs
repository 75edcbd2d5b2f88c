use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::stage::ShaderStage;

pub const SOURCE_EXTENSION: &str = ".slang";
pub const OUTPUT_EXTENSION: &str = ".spv";

/// One `slangc` invocation: a single stage of a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTask {
    source: PathBuf,
    stage: ShaderStage,
    entry_point: String,
    output: PathBuf,
}

impl CompileTask {
    pub fn new(source: impl Into<PathBuf>, stage: ShaderStage) -> Self {
        let source = source.into();
        let output = output_path(&source, stage);
        Self {
            entry_point: stage.entry_point(),
            source,
            stage,
            output,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Derives the SPIR-V file name for one stage of `source`.
///
/// The stage token and `.spv` are appended to the full path and then every
/// `.slang` in the result is removed, including any that appear in directory
/// names. Build scripts downstream rely on these exact names.
pub fn output_path(source: &Path, stage: ShaderStage) -> PathBuf {
    let mut output = source.as_os_str().to_owned();
    output.push(stage.extension());
    output.push(OUTPUT_EXTENSION);
    let bytes = remove_all(output.as_encoded_bytes(), SOURCE_EXTENSION.as_bytes());
    // SAFETY: only whole ASCII runs were removed from encoded bytes of a
    // valid OsStr, so every remaining boundary sits next to ASCII.
    PathBuf::from(unsafe { OsString::from_encoded_bytes_unchecked(bytes) })
}

fn remove_all(haystack: &[u8], needle: &[u8]) -> Vec<u8> {
    let mut kept = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while !rest.is_empty() {
        if rest.starts_with(needle) {
            rest = &rest[needle.len()..];
        } else {
            kept.push(rest[0]);
            rest = &rest[1..];
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("shaders/a.slang", ShaderStage::Compute, "shaders/a.comp.spv")]
    #[case("shaders/triangle.slang", ShaderStage::Vertex, "shaders/triangle.vert.spv")]
    #[case("shaders/triangle.slang", ShaderStage::Fragment, "shaders/triangle.frag.spv")]
    #[case("rt/scene.slang", ShaderStage::Miss, "rt/scene.rmiss.spv")]
    #[case("mesh/cull.slang", ShaderStage::Amplification, "mesh/cull.task.spv")]
    // every occurrence is stripped, not just the suffix
    #[case("lib.slang/a.slang", ShaderStage::Vertex, "lib/a.vert.spv")]
    #[case("a.slangx/b.slang", ShaderStage::Hull, "ax/b.tesc.spv")]
    fn output_naming(#[case] source: &str, #[case] stage: ShaderStage, #[case] expected: &str) {
        assert_eq!(output_path(Path::new(source), stage), PathBuf::from(expected));
    }

    #[cfg(unix)]
    #[rstest]
    #[case(b"caf\xE9/a.slang", ShaderStage::Compute, b"caf\xE9/a.comp.spv")]
    #[case(b"\xFF.slang/\xE9.slang", ShaderStage::Vertex, b"\xFF/\xE9.vert.spv")]
    fn output_naming_keeps_raw_bytes(
        #[case] source: &[u8],
        #[case] stage: ShaderStage,
        #[case] expected: &[u8],
    ) {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let output = output_path(Path::new(OsStr::from_bytes(source)), stage);
        assert_eq!(output.as_os_str().as_bytes(), expected);
    }

    #[test]
    fn task_fields() {
        let task = CompileTask::new("shaders/basic/shader.slang", ShaderStage::Fragment);
        assert_eq!(task.source(), Path::new("shaders/basic/shader.slang"));
        assert_eq!(task.stage(), ShaderStage::Fragment);
        assert_eq!(task.entry_point(), "fragmentMain");
        assert_eq!(task.output(), Path::new("shaders/basic/shader.frag.spv"));
    }
}
