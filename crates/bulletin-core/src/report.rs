//! End-to-end helpers: query every window, assemble, reshape.
//!
//! Each helper runs its windows strictly in sequence and propagates the
//! first failure; there is no retry and no partial result.

use anyhow::Result;

use crate::assemble::assemble;
use crate::client::AnalyticsClient;
use crate::query::run_windows;
use crate::reshape::{
    reshape_clicks, reshape_funnel, reshape_read_time, reshape_sessions, reshape_uniques,
    PivotedSummary, ReadTimeSummary, SessionsSummary, UniquesSummary,
};
use crate::specs;
use crate::window::TimeWindow;

pub async fn read_time_report<C>(
    client: &C,
    windows: &[TimeWindow],
) -> Result<Vec<ReadTimeSummary>>
where
    C: AnalyticsClient + ?Sized,
{
    let tables = run_windows(client, &specs::read_time(), windows).await?;
    Ok(reshape_read_time(assemble(tables)?)?)
}

pub async fn start_completes_report<C>(
    client: &C,
    windows: &[TimeWindow],
) -> Result<Vec<PivotedSummary>>
where
    C: AnalyticsClient + ?Sized,
{
    let tables = run_windows(client, &specs::start_completes(), windows).await?;
    Ok(reshape_funnel(assemble(tables)?)?)
}

pub async fn hyperlink_clicks_report<C>(
    client: &C,
    windows: &[TimeWindow],
) -> Result<Vec<PivotedSummary>>
where
    C: AnalyticsClient + ?Sized,
{
    let tables = run_windows(client, &specs::hyperlink_clicks(), windows).await?;
    Ok(reshape_clicks(assemble(tables)?)?)
}

pub async fn unique_users_report<C>(
    client: &C,
    windows: &[TimeWindow],
) -> Result<Vec<UniquesSummary>>
where
    C: AnalyticsClient + ?Sized,
{
    let tables = run_windows(client, &specs::unique_users(), windows).await?;
    Ok(reshape_uniques(assemble(tables)?)?)
}

pub async fn interactive_sessions_report<C>(
    client: &C,
    windows: &[TimeWindow],
) -> Result<Vec<SessionsSummary>>
where
    C: AnalyticsClient + ?Sized,
{
    let tables = run_windows(client, &specs::interactive_sessions(), windows).await?;
    Ok(reshape_sessions(assemble(tables)?))
}
