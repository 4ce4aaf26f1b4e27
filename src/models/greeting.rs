use chrono::{DateTime, Utc};
use serde::Serialize;

/// Name used when the caller leaves the name blank
pub const GUEST_NAME: &str = "Guest";

/// Metadata attached to every greeting
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct GreetingMetadata {
    pub server: String,
    pub tool: String,
    pub version: String,
}

/// Response of the hello tool
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct HelloResponse {
    pub status: String,
    pub message: String,
    pub name: String,
    /// RFC 3339 timestamp in UTC
    pub timestamp: String,
    pub metadata: GreetingMetadata,
}

impl HelloResponse {
    pub fn greet(name: &str, server: &str, version: &str, now: DateTime<Utc>) -> Self {
        let trimmed = name.trim();
        let (name, message) = if trimmed.is_empty() {
            (GUEST_NAME.to_string(), format!("Hello! Welcome to {}.", server))
        } else {
            (
                trimmed.to_string(),
                format!("Hello, {}! Welcome to {}.", trimmed, server),
            )
        };

        Self {
            status: "success".to_string(),
            message,
            name,
            timestamp: now.to_rfc3339(),
            metadata: GreetingMetadata {
                server: server.to_string(),
                tool: "hello".to_string(),
                version: version.to_string(),
            },
        }
    }
}
