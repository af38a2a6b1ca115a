//! Windowed query execution.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::client::{AnalyticsClient, QuerySpec, Timeframe};
use crate::error::CoreError;
use crate::window::TimeWindow;

/// One service result row tagged with the literal window-boundary strings
/// it was queried under.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedRow<G> {
    pub group: G,
    pub result: f64,
    pub start: String,
    pub end: String,
}

/// Runs `spec` for a single window and parses the grouping values into `G`.
pub async fn run_window<G, C>(
    client: &C,
    spec: &QuerySpec,
    window: &TimeWindow,
) -> Result<Vec<WindowedRow<G>>>
where
    G: DeserializeOwned,
    C: AnalyticsClient + ?Sized,
{
    let timeframe = Timeframe {
        start: window.start_tag(),
        end: window.end_tag(),
    };

    let rows = client
        .aggregate(spec, &timeframe)
        .await
        .with_context(|| {
            format!(
                "{} query failed for window starting {}",
                spec.event, timeframe.start
            )
        })?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let group = serde_json::from_value(Value::Object(row.group_by))
            .map_err(CoreError::Schema)
            .with_context(|| format!("unexpected {} result shape", spec.event))?;
        out.push(WindowedRow {
            group,
            result: row.result,
            start: timeframe.start.clone(),
            end: timeframe.end.clone(),
        });
    }

    info!(
        event = %spec.event,
        window_start = %timeframe.start,
        rows = out.len(),
        "window done"
    );
    Ok(out)
}

/// Runs `spec` over every window, strictly in order: each call completes
/// before the next is issued. Returns one table per window.
pub async fn run_windows<G, C>(
    client: &C,
    spec: &QuerySpec,
    windows: &[TimeWindow],
) -> Result<Vec<Vec<WindowedRow<G>>>>
where
    G: DeserializeOwned,
    C: AnalyticsClient + ?Sized,
{
    let mut tables = Vec::with_capacity(windows.len());
    for window in windows {
        tables.push(run_window(client, spec, window).await?);
    }
    Ok(tables)
}
