// The ask command: load, cap, submit, render.

use std::path::PathBuf;
use std::time::Duration;

use sheetlens_config::Settings;
use sheetlens_insight::{build_payload, normalize, InsightClient, InsightError, RenderPlan};

use crate::exit_codes::{EXIT_BACKEND, EXIT_ERROR, EXIT_FILE_PARSE, EXIT_QUERY_EMPTY};
use crate::CliError;

/// Fixed message shown whenever the backend cannot be reached usefully.
const BACKEND_FALLBACK: &str = "Cannot connect to backend.";

pub fn cmd_ask(
    file: PathBuf,
    query: &str,
    endpoint: Option<String>,
    timeout: Option<u64>,
) -> Result<(), CliError> {
    let sheet = sheetlens_io::load_sheet(&file)
        .map_err(|e| CliError::new(EXIT_FILE_PARSE, e))?;

    // Empty queries never reach the network
    let payload = build_payload(&sheet, query).map_err(|e| match e {
        InsightError::EmptyQuery => CliError::new(EXIT_QUERY_EMPTY, "query is empty")
            .with_hint("type a question, e.g. slens ask data.csv 'What is the total?'"),
        other => CliError::new(EXIT_ERROR, other.to_string()),
    })?;

    let settings = Settings::load();
    let endpoint = endpoint.unwrap_or(settings.endpoint);
    let timeout = Duration::from_secs(timeout.unwrap_or(settings.timeout_secs));

    let client = InsightClient::with_timeout(endpoint, timeout);
    let answer = match client.submit(&payload) {
        Ok(answer) => answer,
        Err(e) if e.is_backend_unreachable() => {
            return Err(CliError::new(EXIT_BACKEND, BACKEND_FALLBACK).with_hint(e.to_string()));
        }
        Err(e) => return Err(CliError::new(EXIT_ERROR, e.to_string())),
    };

    render(&normalize(&answer));
    Ok(())
}

fn render(plan: &RenderPlan) {
    match plan {
        RenderPlan::List(items) => {
            for item in items {
                println!("- {}", item);
            }
        }
        RenderPlan::Paragraph(text) => println!("{}", text),
    }
}
