//! Data models for the CW landing EPG feed

use serde::Deserialize;

/// Top-level feed document returned by the landing EPG endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CwFeed {
    #[serde(default)]
    pub channels: Vec<CwChannel>,
}

/// One channel in the lineup, with its schedule attached
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CwChannel {
    /// Stable channel identifier, becomes the XMLTV channel id
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon_unfocused_url: String,
    #[serde(default)]
    pub programs: Vec<CwProgram>,
}

/// One scheduled program within a channel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CwProgram {
    /// ISO 8601 timestamp, e.g. "2024-01-01T00:00:00Z"
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
}
