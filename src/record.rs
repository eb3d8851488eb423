use chrono::{SecondsFormat, Utc};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use tracing::trace;

use crate::catalog;
use crate::synth;

pub(crate) type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// One fully resolved log record. Immutable once built; nothing outlives
/// the delivery attempt that carries it.
#[derive(Debug, Serialize)]
pub(crate) struct LogRecord {
    pub(crate) level: &'static str,
    pub(crate) message: String,
    pub(crate) meta: FnvIndexMap<&'static str, serde_json::Value>,
    pub(crate) timestamp: String,
}

pub(crate) fn generate_record<R: Rng + ?Sized>(rng: &mut R) -> LogRecord {
    let template = synth::random_choice(rng, &catalog::TEMPLATES);
    // Mostly the level the template was written for, sometimes an
    // independent weighted draw. The occasional severity/content mismatch
    // is intended.
    let level = if rng.gen_bool(0.7) {
        template.level
    } else {
        synth::weighted_level(rng)
    };
    let message = synth::fill_template(rng, template.template);

    // Captured once, reused for both the meta field and the top level.
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut meta = FnvIndexMap::default();
    meta.insert("timestamp", json!(timestamp));
    meta.insert(
        "requestId",
        json!(format!("req-{}", synth::random_alnum(rng, 12))),
    );
    meta.insert(
        "sessionId",
        json!(format!("sess-{}", synth::random_alnum(rng, 8))),
    );
    enrich_meta(rng, &message, &mut meta);

    trace!(level, message = %message, "generated record");
    LogRecord {
        level,
        message,
        meta,
        timestamp,
    }
}

/// Contextual metadata keyed off the resolved message text, not the
/// template. First matching rule wins; no match keeps base metadata only.
pub(crate) fn enrich_meta<R: Rng + ?Sized>(
    rng: &mut R,
    message: &str,
    meta: &mut FnvIndexMap<&'static str, serde_json::Value>,
) {
    if message.contains("logged in") || message.contains("login attempt") {
        meta.insert(
            "browser",
            json!(*synth::random_choice(
                rng,
                &["Chrome", "Firefox", "Safari", "Edge"]
            )),
        );
        meta.insert(
            "platform",
            json!(*synth::random_choice(
                rng,
                &["Windows", "macOS", "Linux", "iOS", "Android"]
            )),
        );
    } else if message.contains("Database") {
        meta.insert(
            "dbInstance",
            json!(*synth::random_choice(
                rng,
                &["primary", "replica-1", "replica-2"]
            )),
        );
        meta.insert(
            "queryId",
            json!(format!("q-{}", synth::random_alnum(rng, 8))),
        );
    } else if message.contains("order") {
        meta.insert("orderItems", json!(synth::random_int(rng, 1, 10)));
        meta.insert(
            "totalValue",
            json!(f64::from(synth::random_int(rng, 1000, 100_000)) / 100.0),
        );
    }
}

pub(crate) fn generate_batch<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<LogRecord> {
    (0..size).map(|_| generate_record(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_base_metadata_and_reuses_its_timestamp() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let record = generate_record(&mut rng);
            assert!(catalog::level_entry(record.level).is_some());
            assert_eq!(record.meta["timestamp"].as_str(), Some(record.timestamp.as_str()));

            let request_id = record.meta["requestId"].as_str().unwrap();
            assert!(request_id.strip_prefix("req-").unwrap().len() == 12);
            let session_id = record.meta["sessionId"].as_str().unwrap();
            assert!(session_id.strip_prefix("sess-").unwrap().len() == 8);
        }
    }

    #[test]
    fn record_messages_are_fully_resolved() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let record = generate_record(&mut rng);
            assert!(
                !record.message.contains('{'),
                "placeholder left in {:?}",
                record.message
            );
        }
    }

    #[test]
    fn generate_batch_produces_exactly_the_requested_count() {
        let mut rng = rand::thread_rng();
        assert!(generate_batch(&mut rng, 0).is_empty());
        assert_eq!(generate_batch(&mut rng, 1).len(), 1);
        assert_eq!(generate_batch(&mut rng, 25).len(), 25);
    }

    #[test]
    fn database_messages_carry_query_metadata_only() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut meta = FnvIndexMap::default();
            enrich_meta(&mut rng, "Database query took 42ms", &mut meta);
            assert!(meta.contains_key("dbInstance"));
            assert!(meta.contains_key("queryId"));
            assert!(!meta.contains_key("browser"));
            assert!(!meta.contains_key("platform"));
        }
    }

    #[test]
    fn login_messages_carry_client_metadata() {
        let mut rng = rand::thread_rng();
        let mut meta = FnvIndexMap::default();
        enrich_meta(
            &mut rng,
            "User user-1234 logged in from 10.0.0.1",
            &mut meta,
        );
        assert!(meta.contains_key("browser"));
        assert!(meta.contains_key("platform"));
        assert!(!meta.contains_key("dbInstance"));
    }

    #[test]
    fn order_messages_carry_commerce_metadata() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut meta = FnvIndexMap::default();
            enrich_meta(
                &mut rng,
                "New order #12345 created for customer user-9999",
                &mut meta,
            );
            let items = meta["orderItems"].as_u64().unwrap();
            assert!((1..=10).contains(&items));
            let total = meta["totalValue"].as_f64().unwrap();
            assert!((10.0..=1000.0).contains(&total));
        }
    }

    #[test]
    fn unmatched_messages_keep_base_metadata_only() {
        let mut rng = rand::thread_rng();
        let mut meta = FnvIndexMap::default();
        enrich_meta(&mut rng, "CPU usage at 50%", &mut meta);
        assert!(meta.is_empty());
    }

    #[test]
    fn record_serializes_with_the_wire_field_names() {
        let mut rng = rand::thread_rng();
        let record = generate_record(&mut rng);
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["level", "message", "meta", "timestamp"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(object["meta"].is_object());
    }
}
