//! Keen-compatible HTTP implementation of the analytics-client port.
//!
//! One aggregation query is one POST of the query document to
//! `{base}/3.0/projects/{project}/queries/{analysis}`. Failures surface to
//! the caller as-is: the bulletin pipeline runs out-of-band and does not
//! retry.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use bulletin_core::client::{AnalyticsClient, Filter, GroupedRow, QuerySpec, Timeframe};

pub const DEFAULT_BASE_URL: &str = "https://api.keen.io";

#[derive(Debug, Clone)]
pub struct KeenConfig {
    pub base_url: String,
    pub project_id: String,
    pub read_key: String,
}

impl KeenConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            base_url: std::env::var("BULLETIN_KEEN_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            project_id: std::env::var("BULLETIN_KEEN_PROJECT")
                .map_err(|_| "BULLETIN_KEEN_PROJECT is required".to_string())?,
            read_key: std::env::var("BULLETIN_KEEN_READ_KEY")
                .map_err(|_| "BULLETIN_KEEN_READ_KEY is required".to_string())?,
        })
    }
}

/// HTTP client for the aggregation service. The read key travels in the
/// `Authorization` header on every request; there is no further auth flow.
#[derive(Clone)]
pub struct KeenClient {
    http: Client,
    config: KeenConfig,
}

/// Wire form of one aggregation query. Absent optional parameters are
/// omitted from the document entirely, not sent as null.
#[derive(Debug, Serialize)]
struct QueryDocument<'a> {
    event_collection: &'a str,
    timeframe: &'a Timeframe,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_property: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    group_by: &'a [String],
    filters: &'a [Filter],
}

impl<'a> QueryDocument<'a> {
    fn new(spec: &'a QuerySpec, timeframe: &'a Timeframe) -> Self {
        Self {
            event_collection: &spec.event,
            timeframe,
            target_property: spec.target_property.as_deref(),
            interval: spec.interval.as_deref(),
            timezone: spec.timezone.as_deref(),
            group_by: &spec.group_by,
            filters: &spec.filters,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Vec<GroupedRow>,
}

impl KeenClient {
    pub fn new(config: KeenConfig) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).context("invalid analytics base URL")?;
        Ok(Self {
            http: Client::new(),
            config,
        })
    }

    fn endpoint(&self, spec: &QuerySpec) -> String {
        format!(
            "{}/3.0/projects/{}/queries/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            spec.analysis.as_str()
        )
    }
}

#[async_trait::async_trait]
impl AnalyticsClient for KeenClient {
    async fn aggregate(
        &self,
        spec: &QuerySpec,
        timeframe: &Timeframe,
    ) -> Result<Vec<GroupedRow>> {
        let url = self.endpoint(spec);
        let document = QueryDocument::new(spec, timeframe);

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.config.read_key)
            .json(&document)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "{} query for {} returned {status}: {body}",
                spec.analysis.as_str(),
                spec.event
            );
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .with_context(|| format!("malformed {} response body", spec.event))?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulletin_core::specs;

    fn config() -> KeenConfig {
        KeenConfig {
            base_url: "https://analytics.example.com/".to_string(),
            project_id: "proj_1".to_string(),
            read_key: "key".to_string(),
        }
    }

    #[test]
    fn endpoint_embeds_project_and_analysis() {
        let client = KeenClient::new(config()).expect("client");
        assert_eq!(
            client.endpoint(&specs::unique_users()),
            "https://analytics.example.com/3.0/projects/proj_1/queries/count_unique"
        );
        assert_eq!(
            client.endpoint(&specs::read_time()),
            "https://analytics.example.com/3.0/projects/proj_1/queries/sum"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut bad = config();
        bad.base_url = "not a url".to_string();
        assert!(KeenClient::new(bad).is_err());
    }

    #[test]
    fn document_omits_absent_optionals() {
        let spec = specs::start_completes();
        let timeframe = Timeframe {
            start: "2017-08-04T04:00:00.000Z".to_string(),
            end: "2017-08-05T04:00:00.000Z".to_string(),
        };
        let doc =
            serde_json::to_value(QueryDocument::new(&spec, &timeframe)).expect("serialize");

        assert_eq!(doc["event_collection"], "read_article");
        assert_eq!(doc["timeframe"]["start"], "2017-08-04T04:00:00.000Z");
        assert_eq!(doc["group_by"][2], "read.type");
        assert_eq!(doc["filters"][0]["operator"], "exists");
        assert!(doc.get("target_property").is_none());
        assert!(doc.get("interval").is_none());
        assert!(doc.get("timezone").is_none());
    }

    #[test]
    fn document_carries_target_property_for_distinct_counts() {
        let spec = specs::interactive_sessions();
        let timeframe = Timeframe {
            start: "2017-08-04T04:00:00.000Z".to_string(),
            end: "2017-08-05T04:00:00.000Z".to_string(),
        };
        let doc =
            serde_json::to_value(QueryDocument::new(&spec, &timeframe)).expect("serialize");
        assert_eq!(doc["target_property"], "user.cookie.session.id");
        assert_eq!(doc["filters"][0]["property_value"], "content");
    }
}
