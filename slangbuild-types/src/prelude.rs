pub use crate::compile_task::{CompileTask, OUTPUT_EXTENSION, SOURCE_EXTENSION};
pub use crate::stage::{ShaderStage, ShaderStageSet};
pub use strum::IntoEnumIterator;
