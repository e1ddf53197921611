//! Insight backend client — shared between the viewer and the CLI.
//!
//! This crate is the single source of truth for the insight wire contract:
//! payload shape and row cap, one-request-at-a-time submission, and the
//! rules that turn a raw answer into something renderable.
//!
//! No UI concepts. No retries. No queueing — a second submission while one
//! is in flight is rejected, not deferred.

mod answer;
mod client;

pub use answer::{extract_answer, normalize, RenderPlan, ANSWER_FIELDS, NO_INSIGHTS, NO_RESPONSE};
pub use client::{build_payload, InsightClient, InsightError, QueryPayload, PAYLOAD_MAX_ROWS};
