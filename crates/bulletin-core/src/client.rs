//! Analytics service abstraction.
//!
//! The external aggregation service is an opaque collaborator: given an
//! event, a timeframe, an analysis operator and grouping/filter parameters,
//! it returns one aggregated row per unique grouping-value combination.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregation operator supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Analysis {
    Count,
    CountUnique,
    Sum,
}

impl Analysis {
    /// Query-endpoint path segment for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Analysis::Count => "count",
            Analysis::CountUnique => "count_unique",
            Analysis::Sum => "sum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Exists,
    Eq,
    In,
    Gte,
    Lte,
}

/// One predicate over an event property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub property_value: Value,
}

impl Filter {
    pub fn exists(property: &str) -> Self {
        Self {
            property_name: property.to_string(),
            operator: FilterOperator::Exists,
            property_value: Value::Bool(true),
        }
    }

    pub fn eq(property: &str, value: impl Into<Value>) -> Self {
        Self {
            property_name: property.to_string(),
            operator: FilterOperator::Eq,
            property_value: value.into(),
        }
    }

    pub fn one_of(property: &str, values: &[&str]) -> Self {
        Self {
            property_name: property.to_string(),
            operator: FilterOperator::In,
            property_value: Value::Array(
                values.iter().map(|v| Value::String(v.to_string())).collect(),
            ),
        }
    }

    pub fn gte(property: &str, value: impl Into<Value>) -> Self {
        Self {
            property_name: property.to_string(),
            operator: FilterOperator::Gte,
            property_value: value.into(),
        }
    }

    pub fn lte(property: &str, value: impl Into<Value>) -> Self {
        Self {
            property_name: property.to_string(),
            operator: FilterOperator::Lte,
            property_value: value.into(),
        }
    }
}

/// Immutable descriptor of one aggregation query shape.
///
/// The five bulletin shapes are fixed constants built in [`crate::specs`];
/// tests may substitute their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub event: String,
    pub analysis: Analysis,
    pub target_property: Option<String>,
    pub interval: Option<String>,
    pub timezone: Option<String>,
    pub group_by: Vec<String>,
    pub filters: Vec<Filter>,
}

/// Literal window-boundary strings as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeframe {
    pub start: String,
    pub end: String,
}

/// One aggregated result record. Grouping values arrive nested under the
/// `group_by` composite key, per service convention.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupedRow {
    pub group_by: serde_json::Map<String, Value>,
    pub result: f64,
}

/// Read-only aggregation port. Failures propagate to the caller uncaught;
/// retry and backoff are out of scope for this pipeline.
#[async_trait::async_trait]
pub trait AnalyticsClient: Send + Sync + 'static {
    async fn aggregate(&self, spec: &QuerySpec, timeframe: &Timeframe)
        -> Result<Vec<GroupedRow>>;
}
