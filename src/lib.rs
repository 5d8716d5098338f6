pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod outputs;
pub mod resolver;
pub mod strategy;
pub mod ui;

pub use error::{BuildPublishError, Result};
