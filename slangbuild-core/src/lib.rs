use indicatif::ProgressStyle;

pub mod compiler;
pub mod detector;
pub mod driver;
pub mod error;
pub mod locator;

#[cfg(test)]
pub(crate) mod scratch;

pub use crate::compiler::{CompileOutcome, Compiler, Slangc};
pub use crate::detector::{detect_in_source, detect_stages};
pub use crate::driver::{Driver, DriverConfig, RunSummary};
pub use crate::error::{exit_code, PipelineError};
pub use crate::locator::{locate_compiler, CompilerPath, CompilerSource, Environment};

pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{elapsed_precise} {span_name} {bar:40.cyan/pink} {pos:>7}/{len:7} {msg}")
        .expect("Unable to create progress style")
}
