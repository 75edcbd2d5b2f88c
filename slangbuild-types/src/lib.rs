#[path = "compile-task.rs"]
pub mod compile_task;
pub mod prelude;
pub mod stage;

pub use crate::compile_task::{CompileTask, OUTPUT_EXTENSION, SOURCE_EXTENSION};
pub use crate::stage::{ShaderStage, ShaderStageSet};
