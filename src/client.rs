use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::record::LogRecord;
use crate::styler::Styler;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One blocking POST per batch against a fixed ingestion URL. Failures are
/// classified and returned as values, never raised; the scheduler keeps
/// ticking regardless of outcome.
pub(crate) struct DeliveryClient {
    http: reqwest::blocking::Client,
    url: String,
}

/// Counters the ingestion endpoint is expected, but not required, to
/// return. Missing fields are reported as unknown.
#[derive(Debug, Deserialize)]
pub(crate) struct IngestCounters {
    pub(crate) processed_count: Option<u64>,
    pub(crate) received_count: Option<u64>,
}

#[derive(Debug)]
pub(crate) enum DeliveryOutcome {
    Delivered {
        counters: Option<IngestCounters>,
        body: String,
    },
    Rejected {
        status: u16,
        body: String,
    },
    Failed {
        error: String,
    },
}

impl DeliveryClient {
    pub(crate) fn new(host: &str, port: u16, endpoint: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        // Literal concatenation; callers supply URL-safe values.
        let url = format!("http://{host}:{port}{endpoint}");
        Ok(Self { http, url })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn send(&self, records: &[LogRecord]) -> DeliveryOutcome {
        let payload = payload(records);
        let response = match self.http.post(&self.url).json(&payload).send() {
            Ok(response) => response,
            Err(error) => {
                return DeliveryOutcome::Failed {
                    error: error.to_string(),
                }
            }
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(error) => {
                return DeliveryOutcome::Failed {
                    error: error.to_string(),
                }
            }
        };

        if status.is_success() {
            // A body that is not the counter shape is tolerated; the raw
            // text gets reported instead.
            let counters = serde_json::from_str(&body).ok();
            DeliveryOutcome::Delivered { counters, body }
        } else {
            DeliveryOutcome::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}

/// A single record posts as a bare JSON object, zero or many as an array.
pub(crate) fn payload(records: &[LogRecord]) -> Value {
    match records {
        [single] => serde_json::to_value(single).unwrap(),
        many => serde_json::to_value(many).unwrap(),
    }
}

/// Per-batch operator report: a summary of the outcome, then an echo of
/// every record that was sent. The echo runs for every outcome.
pub(crate) fn report(
    out: &mut impl Write,
    styler: Styler,
    records: &[LogRecord],
    outcome: &DeliveryOutcome,
) -> io::Result<()> {
    match outcome {
        DeliveryOutcome::Delivered { counters, body } => {
            writeln!(out, "✅ Sent {} logs successfully.", records.len())?;
            match counters {
                Some(counters) => writeln!(
                    out,
                    "   Server processed {} of {} logs.",
                    display_count(counters.processed_count),
                    display_count(counters.received_count)
                )?,
                None => writeln!(out, "   Response: {body}")?,
            }
        }
        DeliveryOutcome::Rejected { status, body } => {
            writeln!(out, "❌ Error: Server responded with status code {status}")?;
            writeln!(out, "   Response: {body}")?;
        }
        DeliveryOutcome::Failed { error } => {
            writeln!(out, "❌ Error sending logs: {error}")?;
        }
    }

    for record in records {
        writeln!(out, "{} {}", styler.level(record.level), record.message)?;
    }
    Ok(())
}

fn display_count(count: Option<u64>) -> String {
    match count {
        Some(count) => count.to_string(),
        None => "?".to_string(),
    }
}
