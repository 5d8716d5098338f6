//! Command-line workflows

pub mod orchestration;

pub use orchestration::{VariantWorkflowArgs, Workflow, WorkflowResult};
