use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};

use crate::catalog;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Uniform integer in `[min, max]`, both bounds inclusive. Requires
/// `min <= max`.
pub(crate) fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    rng.gen_range(min..=max)
}

/// Uniform pick from a non-empty slice.
pub(crate) fn random_choice<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Level name drawn with probability proportional to the catalog weights.
///
/// Cumulative scan against a uniform draw from `[0, total_weight)`. The
/// trailing "info" is unreachable under exact weight math, it only guards
/// against floating-point roundoff.
pub(crate) fn weighted_level<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let total: u32 = catalog::LEVELS.iter().map(|level| level.weight).sum();
    let mut threshold = rng.gen::<f64>() * f64::from(total);

    for level in &catalog::LEVELS {
        if threshold < f64::from(level.weight) {
            return level.name;
        }
        threshold -= f64::from(level.weight);
    }
    "info"
}

pub(crate) fn random_ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        random_int(rng, 1, 255),
        random_int(rng, 0, 255),
        random_int(rng, 0, 255),
        random_int(rng, 0, 255)
    )
}

/// Fixed-length string over lowercase letters and digits, uniform per
/// character.
pub(crate) fn random_alnum<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALNUM[rng.gen_range(0..ALNUM.len())] as char)
        .collect()
}

/// Synthesize a value for a placeholder name. Unknown names yield `None`
/// so the caller can keep the original `{name}` text.
pub(crate) fn resolve_placeholder<R: Rng + ?Sized>(rng: &mut R, key: &str) -> Option<String> {
    let value = match key {
        "userId" | "customerId" => format!("user-{}", random_int(rng, 1000, 9999)),
        "ip" => random_ipv4(rng),
        "queryTime" | "responseTime" => random_int(rng, 1, 500).to_string(),
        "memoryUsage" => random_int(rng, 100, 8000).to_string(),
        "cpuUsage" => random_int(rng, 5, 95).to_string(),
        "cacheHitRatio" => random_int(rng, 60, 100).to_string(),
        "orderId" | "shipmentId" | "transactionId" => random_int(rng, 10000, 99999).to_string(),
        "amount" => format!("{:.2}", f64::from(random_int(rng, 100, 10000)) / 100.0),
        "address" => format!(
            "{} Main St, Anytown, ST {}",
            random_int(rng, 1, 999),
            random_int(rng, 10000, 99999)
        ),
        "apiKey" => format!("api-{}", random_alnum(rng, 8)),
        "params" => format!(
            "missing required field: {}",
            random_choice(rng, &["email", "name", "password", "address", "phone"])
        ),
        "resource" => format!(
            "/{}/{}",
            random_choice(rng, &["users", "orders", "products", "settings", "admin"]),
            random_int(rng, 1, 9999)
        ),
        "error" => (*random_choice(
            rng,
            &[
                "Connection timeout",
                "Connection refused",
                "Too many connections",
                "Auth failure",
            ],
        ))
        .to_string(),
        "service" | "serviceName" => (*random_choice(
            rng,
            &[
                "AuthService",
                "PaymentProcessor",
                "InventoryManager",
                "EmailService",
            ],
        ))
        .to_string(),
        "errorMessage" => (*random_choice(
            rng,
            &[
                "NullReferenceException",
                "OutOfMemoryException",
                "IndexOutOfRangeException",
                "Cannot read property of undefined",
            ],
        ))
        .to_string(),
        "reason" => (*random_choice(
            rng,
            &[
                "Insufficient funds",
                "Card declined",
                "Expired card",
                "Gateway timeout",
            ],
        ))
        .to_string(),
        "endpoint" => format!(
            "/{}/{}",
            random_choice(rng, &["api", "auth", "users", "orders", "products"]),
            random_choice(rng, &["create", "update", "delete", "get"])
        ),
        _ => return None,
    };
    Some(value)
}

/// Replace every `{identifier}` occurrence in the template. Occurrences are
/// resolved independently, so repeating a placeholder resamples it.
pub(crate) fn fill_template<R: Rng + ?Sized>(rng: &mut R, template: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            resolve_placeholder(rng, &caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
