//! Frame scan command

use super::parse_json_arg;
use crate::error::CliResult;
use crate::output::{print_field, print_heading, print_structured, OutputFormat};
use colored::Colorize;
use sentinel_guard::ScanEngines;
use sentinel_types::{RiskVerdict, TextToken};
use serde::{Deserialize, Serialize};

/// A token given on the command line: a bare string or a full token object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenInput {
    Text(String),
    Token(TextToken),
}

impl From<TokenInput> for TextToken {
    fn from(input: TokenInput) -> Self {
        match input {
            TokenInput::Text(text) => TextToken::new(text),
            TokenInput::Token(token) => token,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    #[serde(flatten)]
    verdict: RiskVerdict,
    reason: String,
}

/// Scan OCR tokens of one frame for prompt injection
pub fn execute(tokens: &str, engines: &ScanEngines, format: OutputFormat) -> CliResult<()> {
    let inputs: Vec<TokenInput> = parse_json_arg("tokens", tokens)?;
    let tokens: Vec<TextToken> = inputs.into_iter().map(TextToken::from).collect();

    let (verdict, reason) = engines.injection.scan_frame_with_reason(&tokens);
    let output = ScanOutput { verdict, reason };

    if print_structured(&output, format)? {
        return Ok(());
    }

    print_heading("Frame Scan");
    let decision = if output.verdict.is_blocked() {
        "BLOCK".red().bold()
    } else {
        "PASS".green().bold()
    };
    print_field("Decision", decision);
    print_field("Score", format!("{:.2}", output.verdict.score));
    print_field(
        "Matched",
        output.verdict.matched_phrase.as_deref().unwrap_or("-"),
    );
    print_field("Reason", &output.reason);
    Ok(())
}
