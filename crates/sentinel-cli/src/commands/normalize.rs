//! Normalization command

use crate::error::CliResult;
use crate::output::{print_structured, OutputFormat};
use sentinel_types::TextToken;
use sentinel_visual::Normalizer;

/// Print the canonical form the matcher sees; each argument is one token
pub fn execute(text: &[String], format: OutputFormat) -> CliResult<()> {
    let tokens: Vec<TextToken> = text.iter().map(|t| TextToken::new(t.as_str())).collect();
    let normalized = Normalizer::normalize(&tokens);

    let data = serde_json::json!({ "normalized": normalized.as_str() });
    if !print_structured(&data, format)? {
        println!("{}", normalized);
    }
    Ok(())
}
