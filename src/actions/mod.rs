pub mod workflow;

pub use workflow::{error_command, StepOutputs};
