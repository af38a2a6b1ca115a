//! Final per-article, per-day, per-device summary tables.
//!
//! All grouping goes through `BTreeMap`, so every summary comes back sorted
//! by its grouping key and free of duplicate key rows. Zero-fill is a real
//! `0.0` in the output, never an absent cell: absence downstream must mean
//! "no activity", not "unknown".

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::assemble::AssembledRow;
use crate::error::CoreError;
use crate::model::{ClicksGroup, FunnelGroup, ReadTimeGroup, SessionsGroup, UniquesGroup};
use crate::normalize::{id_from_url, scrub_article_id, UrlId};

/// Pivot column clicks without a share surface fall under.
pub const HYPERLINK_COLUMN: &str = "hyperlink";

/// Summed read time per (article, day, author, headline, device).
#[derive(Debug, Clone, PartialEq)]
pub struct ReadTimeSummary {
    pub id_scrub: i64,
    pub date: NaiveDate,
    pub author: String,
    pub headline: String,
    pub device: String,
    pub time: f64,
}

/// One pivoted row: a metric column per distinct pivot value, zero-filled
/// across the union of columns observed in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedSummary {
    pub date: NaiveDate,
    pub device: String,
    pub id_scrub: i64,
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniquesSummary {
    pub date: NaiveDate,
    pub device: String,
    pub id_scrub: i64,
    pub uniques: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionsSummary {
    pub date: NaiveDate,
    pub id_scrub: UrlId,
    pub device: String,
    pub sessions: f64,
}

/// Sums read-time grouped by (id_scrub, date, author, headline, device),
/// collapsing list-valued authors to a single name first.
pub fn reshape_read_time(
    rows: Vec<AssembledRow<ReadTimeGroup>>,
) -> Result<Vec<ReadTimeSummary>, CoreError> {
    let mut grouped: BTreeMap<(i64, NaiveDate, String, String, String), f64> = BTreeMap::new();
    for row in rows {
        let id_scrub = scrub_article_id(&row.group.article_id)?;
        let author = row.group.authors.into_single()?;
        *grouped
            .entry((id_scrub, row.date, author, row.group.headline, row.group.device))
            .or_insert(0.0) += row.result;
    }

    Ok(grouped
        .into_iter()
        .map(
            |((id_scrub, date, author, headline, device), time)| ReadTimeSummary {
                id_scrub,
                date,
                author,
                headline,
                device,
                time,
            },
        )
        .collect())
}

/// Pivots `read.type` values ("start", "complete") into summed metric
/// columns keyed by (date, device, id_scrub).
pub fn reshape_funnel(
    rows: Vec<AssembledRow<FunnelGroup>>,
) -> Result<Vec<PivotedSummary>, CoreError> {
    let mut cells = Vec::with_capacity(rows.len());
    for row in rows {
        let id_scrub = scrub_article_id(&row.group.article_id)?;
        cells.push((
            (row.date, row.group.device, id_scrub),
            row.group.read_type,
            row.result,
        ));
    }
    Ok(pivot(cells))
}

/// Pivots share surfaces into summed metric columns. A click with no share
/// surface is a plain in-article hyperlink, not a row to drop.
pub fn reshape_clicks(
    rows: Vec<AssembledRow<ClicksGroup>>,
) -> Result<Vec<PivotedSummary>, CoreError> {
    let mut cells = Vec::with_capacity(rows.len());
    for row in rows {
        let id_scrub = scrub_article_id(&row.group.article_id)?;
        let surface = row
            .group
            .share
            .unwrap_or_else(|| HYPERLINK_COLUMN.to_string());
        cells.push(((row.date, row.group.device, id_scrub), surface, row.result));
    }
    Ok(pivot(cells))
}

/// Sums distinct-user counts grouped by (date, device, id_scrub).
pub fn reshape_uniques(
    rows: Vec<AssembledRow<UniquesGroup>>,
) -> Result<Vec<UniquesSummary>, CoreError> {
    let mut grouped: BTreeMap<(NaiveDate, String, i64), f64> = BTreeMap::new();
    for row in rows {
        let id_scrub = scrub_article_id(&row.group.article_id)?;
        *grouped
            .entry((row.date, row.group.device, id_scrub))
            .or_insert(0.0) += row.result;
    }

    Ok(grouped
        .into_iter()
        .map(|((date, device, id_scrub), uniques)| UniquesSummary {
            date,
            device,
            id_scrub,
            uniques,
        })
        .collect())
}

/// Sums distinct-session counts grouped by (date, id_scrub, device), with
/// id_scrub recovered from the raw interaction URL. Client, campaign and
/// creative names are aggregated away here.
pub fn reshape_sessions(rows: Vec<AssembledRow<SessionsGroup>>) -> Vec<SessionsSummary> {
    let mut grouped: BTreeMap<(NaiveDate, UrlId, String), f64> = BTreeMap::new();
    for row in rows {
        let id_scrub = id_from_url(&row.group.raw_url);
        *grouped
            .entry((row.date, id_scrub, row.group.device))
            .or_insert(0.0) += row.result;
    }

    grouped
        .into_iter()
        .map(|((date, id_scrub, device), sessions)| SessionsSummary {
            date,
            id_scrub,
            device,
            sessions,
        })
        .collect()
}

/// Wide-table pivot: one metric column per distinct pivot value, cells
/// summed, missing combinations filled with zero across the column union.
///
/// Keying on the full (date, device, id_scrub) index makes output rows
/// unique by construction, so no post-pivot re-grouping pass is needed.
fn pivot(cells: Vec<((NaiveDate, String, i64), String, f64)>) -> Vec<PivotedSummary> {
    let mut columns: BTreeSet<String> = BTreeSet::new();
    let mut table: BTreeMap<(NaiveDate, String, i64), BTreeMap<String, f64>> = BTreeMap::new();

    for (key, column, value) in cells {
        columns.insert(column.clone());
        *table.entry(key).or_default().entry(column).or_insert(0.0) += value;
    }

    table
        .into_iter()
        .map(|((date, device, id_scrub), mut metrics)| {
            for column in &columns {
                metrics.entry(column.clone()).or_insert(0.0);
            }
            PivotedSummary {
                date,
                device,
                id_scrub,
                metrics,
            }
        })
        .collect()
}
