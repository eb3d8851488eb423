use owo_colors::AnsiColors;

/// A log severity with its console color and its share of the generated
/// traffic. Weights are relative; the table below sums to 100.
#[derive(Debug)]
pub(crate) struct LevelEntry {
    pub(crate) name: &'static str,
    pub(crate) color: AnsiColors,
    pub(crate) weight: u32,
}

pub(crate) const LEVELS: [LevelEntry; 4] = [
    LevelEntry {
        name: "debug",
        color: AnsiColors::Blue,
        weight: 40,
    },
    LevelEntry {
        name: "info",
        color: AnsiColors::Green,
        weight: 30,
    },
    LevelEntry {
        name: "warn",
        color: AnsiColors::Yellow,
        weight: 20,
    },
    LevelEntry {
        name: "error",
        color: AnsiColors::Red,
        weight: 10,
    },
];

pub(crate) fn level_entry(name: &str) -> Option<&'static LevelEntry> {
    LEVELS.iter().find(|level| level.name == name)
}

/// A message pattern with `{name}` placeholders and the level the message
/// was written for. The record builder usually keeps that level but
/// occasionally substitutes an independently drawn one.
#[derive(Debug)]
pub(crate) struct MessageTemplate {
    pub(crate) template: &'static str,
    pub(crate) level: &'static str,
}

pub(crate) const TEMPLATES: [MessageTemplate; 17] = [
    MessageTemplate {
        template: "User {userId} logged in from {ip}",
        level: "info",
    },
    MessageTemplate {
        template: "Failed login attempt for user {userId} from {ip}",
        level: "warn",
    },
    MessageTemplate {
        template: "Database query took {queryTime}ms",
        level: "debug",
    },
    MessageTemplate {
        template: "API request to {endpoint} completed in {responseTime}ms",
        level: "info",
    },
    MessageTemplate {
        template: "Memory usage at {memoryUsage}MB",
        level: "debug",
    },
    MessageTemplate {
        template: "CPU usage at {cpuUsage}%",
        level: "debug",
    },
    MessageTemplate {
        template: "Cache hit ratio: {cacheHitRatio}%",
        level: "debug",
    },
    MessageTemplate {
        template: "New order #{orderId} created for customer {customerId}",
        level: "info",
    },
    MessageTemplate {
        template: "Payment of ${amount} received for order #{orderId}",
        level: "info",
    },
    MessageTemplate {
        template: "Shipment #{shipmentId} dispatched to {address}",
        level: "info",
    },
    MessageTemplate {
        template: "Rate limit exceeded for API key {apiKey}",
        level: "warn",
    },
    MessageTemplate {
        template: "Invalid request parameters: {params}",
        level: "warn",
    },
    MessageTemplate {
        template: "Permission denied for user {userId} accessing {resource}",
        level: "warn",
    },
    MessageTemplate {
        template: "Database connection failed: {error}",
        level: "error",
    },
    MessageTemplate {
        template: "Unhandled exception in {service}: {errorMessage}",
        level: "error",
    },
    MessageTemplate {
        template: "Service {serviceName} is unresponsive",
        level: "error",
    },
    MessageTemplate {
        template: "Failed to process transaction #{transactionId}: {reason}",
        level: "error",
    },
];
