use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchRecency {
    Day,
    Week,
    Month,
}

impl SearchRecency {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchRecency::Day => "day",
            SearchRecency::Week => "week",
            SearchRecency::Month => "month",
        }
    }
}

impl FromStr for SearchRecency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(SearchRecency::Day),
            "week" => Ok(SearchRecency::Week),
            "month" => Ok(SearchRecency::Month),
            other => Err(format!(
                "Invalid search recency filter: {}. Expected: day, week, or month",
                other
            )),
        }
    }
}

impl fmt::Display for SearchRecency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-exchange knobs sent alongside the messages.
///
/// Every field is optional; an unset field is omitted from the request so the
/// provider default applies. Keys in `extra` are forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExchangeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_format_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_domain_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_recency_filter: Option<SearchRecency>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExchangeOptions {
    pub fn with_images(mut self) -> Self {
        self.return_images.get_or_insert(true);
        self
    }
}
