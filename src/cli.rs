use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use slangbuild_core::DriverConfig;

/// Shader root relative to the repository root.
pub const SHADER_SUBPATH: &str = "engine/graphics/shaders";

/// Compile all slang shaders
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Cli {
    /// Path to the slangc executable
    #[arg(long, value_name = "PATH")]
    pub slangc: Option<PathBuf>,
    /// Only compile shaders in directories with this name
    #[arg(long, value_name = "NAME")]
    pub sample: Option<String>,
    /// Directory to search for shaders, defaults to engine/graphics/shaders
    /// in the repository that contains this executable
    #[arg(long, value_name = "DIR", env = "SLANGBUILD_SHADER_ROOT")]
    pub root: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<DriverConfig> {
        let shader_root = match self.root {
            Some(root) => root,
            None => default_shader_root()?,
        };
        Ok(DriverConfig::builder()
            .shader_root(shader_root)
            .maybe_sample(self.sample)
            .build())
    }
}

pub fn default_shader_root() -> anyhow::Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    shader_root_for(&exe)
}

/// `<exe>/../../..` joined with [`SHADER_SUBPATH`], i.e. the repository root
/// for a binary in `target/<profile>/`.
pub fn shader_root_for(exe: &Path) -> anyhow::Result<PathBuf> {
    let repository = exe
        .ancestors()
        .nth(3)
        .with_context(|| format!("{} has no grandparent directory", exe.display()))?;
    Ok(repository.join(SHADER_SUBPATH))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["slangbuild"], None, None, None)]
    #[case(&["slangbuild", "--slangc", "/opt/slang/bin/slangc"], Some("/opt/slang/bin/slangc"), None, None)]
    #[case(&["slangbuild", "--sample", "triangle"], None, Some("triangle"), None)]
    #[case(
        &["slangbuild", "--sample", "pbr", "--root", "assets/shaders", "--slangc", "slangc"],
        Some("slangc"),
        Some("pbr"),
        Some("assets/shaders")
    )]
    fn parses_arguments(
        #[case] args: &[&str],
        #[case] slangc: Option<&str>,
        #[case] sample: Option<&str>,
        #[case] root: Option<&str>,
    ) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(args)?;
        assert_eq!(cli.slangc, slangc.map(PathBuf::from));
        assert_eq!(cli.sample.as_deref(), sample);
        // SLANGBUILD_SHADER_ROOT may be set in the environment running the tests
        if root.is_some() {
            assert_eq!(cli.root, root.map(PathBuf::from));
        }
        Ok(())
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["slangbuild", "--jobs", "4"]).is_err());
    }

    #[test]
    fn explicit_root_becomes_config() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["slangbuild", "--root", "shaders", "--sample", "basic"])?;
        let config = cli.into_config()?;
        assert_eq!(config.shader_root(), Path::new("shaders"));
        assert_eq!(config.sample(), Some("basic"));
        Ok(())
    }

    #[rstest]
    #[case("/work/engine/target/debug/slangbuild", "/work/engine/engine/graphics/shaders")]
    #[case("/work/engine/target/release/slangbuild", "/work/engine/engine/graphics/shaders")]
    fn default_root(#[case] exe: &str, #[case] expected: &str) -> anyhow::Result<()> {
        assert_eq!(shader_root_for(Path::new(exe))?, PathBuf::from(expected));
        Ok(())
    }

    #[test]
    fn default_root_needs_ancestors() {
        assert!(shader_root_for(Path::new("slangbuild")).is_err());
    }
}
