use std::{fs, path::Path};

use anyhow::Context;
use slangbuild_types::prelude::*;

/// Stages whose `[shader("...")]` marker appears anywhere in `source`.
///
/// This is plain substring containment: a marker inside a comment or an
/// `#if 0` block still counts.
pub fn detect_in_source(source: &str) -> ShaderStageSet {
    ShaderStage::iter()
        .filter(|stage| source.contains(&stage.marker()))
        .collect()
}

pub fn detect_stages(path: impl AsRef<Path>) -> anyhow::Result<ShaderStageSet> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read shader source {}", path.display()))?;
    Ok(detect_in_source(&source))
}
