//! Typed grouping rows for the five query shapes.
//!
//! Result rows are parsed by field name rather than column position, so a
//! change in the service's response shape fails loudly at parse time instead
//! of silently mis-assigning columns.

use serde::Deserialize;

use crate::error::CoreError;

/// Article identifier as reported by the service: already numeric, or a
/// compound string like `"123-456"` carrying a hyphenated suffix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Numeric(i64),
    Compound(String),
}

/// Author field: historically a single name, stored as a list by newer
/// ingest versions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    One(String),
    Many(Vec<String>),
}

impl Authors {
    /// Collapses a list-valued author field to its single element so it can
    /// serve as a grouping key. An empty list is a data defect upstream.
    pub fn into_single(self) -> Result<String, CoreError> {
        match self {
            Authors::One(name) => Ok(name),
            Authors::Many(mut names) => names.pop().ok_or(CoreError::EmptyAuthors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadTimeGroup {
    #[serde(rename = "article.id")]
    pub article_id: ArticleId,
    #[serde(rename = "glass.device")]
    pub device: String,
    #[serde(rename = "article.authors.names")]
    pub authors: Authors,
    #[serde(rename = "article.headline.content")]
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunnelGroup {
    #[serde(rename = "article.id")]
    pub article_id: ArticleId,
    #[serde(rename = "glass.device")]
    pub device: String,
    #[serde(rename = "read.type")]
    pub read_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClicksGroup {
    #[serde(rename = "article.id")]
    pub article_id: ArticleId,
    #[serde(rename = "glass.device")]
    pub device: String,
    /// Absent for plain in-article hyperlinks; a share surface otherwise.
    #[serde(rename = "link.share")]
    pub share: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniquesGroup {
    #[serde(rename = "article.id")]
    pub article_id: ArticleId,
    #[serde(rename = "glass.device")]
    pub device: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionsGroup {
    #[serde(rename = "ad_meta.client.name")]
    pub client: String,
    #[serde(rename = "ad_meta.campaign.name")]
    pub campaign: String,
    #[serde(rename = "ad_meta.creative.name")]
    pub creative: String,
    pub raw_url: String,
    #[serde(rename = "glass.device")]
    pub device: String,
}
