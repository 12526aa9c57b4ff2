//! Command implementations

pub mod cross_modal;
pub mod dictionary;
pub mod normalize;
pub mod scan;

use crate::error::{CliError, CliResult};
use serde::de::DeserializeOwned;

/// Parse a JSON argument given inline or as `@path`.
pub(crate) fn parse_json_arg<T: DeserializeOwned>(name: &str, raw: &str) -> CliResult<T> {
    let source = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => raw.to_string(),
    };
    serde_json::from_str(&source)
        .map_err(|e| CliError::InvalidArgument(format!("--{}: {}", name, e)))
}
