//! Concatenation of per-window result tables.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};

use crate::error::CoreError;
use crate::query::WindowedRow;

/// A windowed row with its timestamps collapsed to calendar dates for
/// downstream grouping. `start` keeps the original tag string.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRow<G> {
    pub group: G,
    pub result: f64,
    pub start: String,
    pub date: NaiveDate,
    pub end: NaiveDate,
}

/// Flattens per-window tables into one table, preserving window order.
///
/// `date` is the calendar date of the window's start tag; `end` is the
/// calendar date of its end tag. An empty outer sequence is a caller bug
/// and fails fast rather than producing a table with no schema.
pub fn assemble<G>(windows: Vec<Vec<WindowedRow<G>>>) -> Result<Vec<AssembledRow<G>>> {
    if windows.is_empty() {
        return Err(CoreError::EmptyAssembly.into());
    }

    let mut out = Vec::with_capacity(windows.iter().map(Vec::len).sum());
    for row in windows.into_iter().flatten() {
        let date = tag_date(&row.start).context("bad start tag on result row")?;
        let end = tag_date(&row.end).context("bad end tag on result row")?;
        out.push(AssembledRow {
            group: row.group,
            result: row.result,
            start: row.start,
            date,
            end,
        });
    }
    Ok(out)
}

fn tag_date(tag: &str) -> Result<NaiveDate> {
    Ok(DateTime::parse_from_rfc3339(tag)?.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::model::UniquesGroup;

    fn row(id: i64, start: &str, end: &str, result: f64) -> WindowedRow<UniquesGroup> {
        WindowedRow {
            group: serde_json::from_value(serde_json::json!({
                "article.id": id,
                "glass.device": "desktop",
            }))
            .expect("group"),
            result,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn concatenation_preserves_rows_and_derives_dates() {
        let tables = vec![
            vec![
                row(1, "2017-08-04T04:00:00.000Z", "2017-08-05T04:00:00.000Z", 3.0),
                row(2, "2017-08-04T04:00:00.000Z", "2017-08-05T04:00:00.000Z", 5.0),
            ],
            vec![row(
                1,
                "2017-08-05T04:00:00.000Z",
                "2017-08-06T04:00:00.000Z",
                7.0,
            )],
        ];

        let assembled = assemble(tables).expect("assemble");
        assert_eq!(assembled.len(), 3);
        assert_eq!(assembled[0].date, "2017-08-04".parse().expect("date"));
        assert_eq!(assembled[0].end, "2017-08-05".parse().expect("date"));
        assert_eq!(assembled[2].date, "2017-08-05".parse().expect("date"));
        // Original start tag survives untouched.
        assert_eq!(assembled[2].start, "2017-08-05T04:00:00.000Z");
    }

    #[test]
    fn empty_input_fails_fast() {
        let err = assemble(Vec::<Vec<WindowedRow<UniquesGroup>>>::new())
            .expect_err("must fail");
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::EmptyAssembly)
        ));
    }

    #[test]
    fn windows_with_no_rows_are_fine() {
        let tables = vec![
            vec![],
            vec![row(
                9,
                "2017-08-05T04:00:00.000Z",
                "2017-08-06T04:00:00.000Z",
                1.0,
            )],
        ];
        assert_eq!(assemble(tables).expect("assemble").len(), 1);
    }
}
