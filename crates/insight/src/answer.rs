//! Answer extraction and normalization.
//!
//! The backend promises `{"answer": "..."}` but observed deployments have
//! also used `result` and `text`. Extraction tries an explicit ordered
//! field list; normalization decides list-versus-paragraph rendering.

/// Accepted response fields, tried in order.
pub const ANSWER_FIELDS: [&str; 3] = ["answer", "result", "text"];

/// Answer text when the backend replied but no recognized field was present.
/// This is a value, not an error.
pub const NO_RESPONSE: &str = "No response";

/// Placeholder shown when the answer text is empty.
pub const NO_INSIGHTS: &str = "No insights returned.";

/// Pull the answer text out of a parsed response body.
///
/// A non-string field value (an object echoed back, a number) is
/// stringified as pretty JSON — it must never reach a text renderer as a
/// raw value. `null` counts as absent.
pub fn extract_answer(body: &serde_json::Value) -> String {
    for field in ANSWER_FIELDS {
        match body.get(field) {
            None | Some(serde_json::Value::Null) => continue,
            Some(serde_json::Value::String(s)) => return s.clone(),
            Some(other) => {
                return serde_json::to_string_pretty(other)
                    .unwrap_or_else(|_| other.to_string())
            }
        }
    }
    NO_RESPONSE.to_string()
}

/// How a normalized answer should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    /// One entry per line, bullet markers already stripped
    List(Vec<String>),
    /// A single block of text
    Paragraph(String),
}

/// Turn raw answer text into a render plan.
///
/// Empty input becomes the fixed placeholder. Multi-line text, or a single
/// line starting with a bullet marker (`-`, `•`, `*` followed by
/// whitespace), becomes a list of non-empty trimmed lines with any leading
/// marker stripped. Everything else is a single paragraph.
pub fn normalize(raw: &str) -> RenderPlan {
    let text = raw.replace("\r\n", "\n");
    let text = text.trim();

    if text.is_empty() {
        return RenderPlan::Paragraph(NO_INSIGHTS.to_string());
    }

    if text.contains('\n') || starts_with_bullet(text) {
        let items = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| strip_bullet(line).to_string())
            .collect();
        return RenderPlan::List(items);
    }

    RenderPlan::Paragraph(text.to_string())
}

fn starts_with_bullet(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some('-' | '\u{2022}' | '*'))
        && chars.next().is_some_and(|c| c.is_whitespace())
}

/// Strip one leading bullet marker and the whitespace after it.
fn strip_bullet(line: &str) -> &str {
    let mut chars = line.chars();
    match chars.next() {
        Some('-' | '\u{2022}' | '*') => chars.as_str().trim_start(),
        _ => line,
    }
}
