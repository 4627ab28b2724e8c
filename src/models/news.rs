use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Sentiment::Positive => "text-success",
            Sentiment::Neutral => "text-muted",
            Sentiment::Negative => "text-danger",
        }
    }
}

// the feed only carries one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NewsCategory {
    #[default]
    #[serde(rename = "crypto")]
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
    pub url: String,
    pub category: NewsCategory,
    pub sentiment: Sentiment,

    #[serde(default)]
    pub related_symbols: BTreeSet<String>,
}
