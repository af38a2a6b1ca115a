//! The five fixed bulletin query specifications.
//!
//! These are constants of the reporting pipeline, not runtime configuration.
//! Each constructor returns a fresh immutable [`QuerySpec`] so tests can
//! substitute their own variants.

use crate::client::{Analysis, Filter, QuerySpec};

pub const SPONSOR_SLUG: &str = "article.bulletin.sponsor.slug";

/// Read-time seconds on sponsored articles, grouped down to the headline.
///
/// Incremental read time is only meaningful on depth pings, so `read.type`
/// is restricted to the quartile and completion events, and single
/// increments are bounded to [0, 600] seconds to drop clock glitches.
pub fn read_time() -> QuerySpec {
    QuerySpec {
        event: "read_article".to_string(),
        analysis: Analysis::Sum,
        target_property: Some("read.time.incremental.seconds".to_string()),
        interval: None,
        timezone: None,
        group_by: vec![
            "article.id".to_string(),
            "glass.device".to_string(),
            "article.authors.names".to_string(),
            "article.headline.content".to_string(),
        ],
        filters: vec![
            Filter::exists(SPONSOR_SLUG),
            Filter::one_of("read.type", &["25", "50", "75", "complete"]),
            Filter::gte("read.time.incremental.seconds", 0),
            Filter::lte("read.time.incremental.seconds", 600),
        ],
    }
}

/// Start/complete read funnel on sponsored articles.
pub fn start_completes() -> QuerySpec {
    QuerySpec {
        event: "read_article".to_string(),
        analysis: Analysis::Count,
        target_property: None,
        interval: None,
        timezone: None,
        group_by: vec![
            "article.id".to_string(),
            "glass.device".to_string(),
            "read.type".to_string(),
        ],
        filters: vec![
            Filter::exists(SPONSOR_SLUG),
            Filter::one_of("read.type", &["start", "complete"]),
        ],
    }
}

/// Link clicks on sponsored articles, split by share surface.
pub fn hyperlink_clicks() -> QuerySpec {
    QuerySpec {
        event: "click_article_link".to_string(),
        analysis: Analysis::Count,
        target_property: None,
        interval: None,
        timezone: None,
        group_by: vec![
            "article.id".to_string(),
            "glass.device".to_string(),
            "link.share".to_string(),
        ],
        filters: vec![Filter::exists(SPONSOR_SLUG)],
    }
}

/// Distinct permanent-cookie users reading sponsored articles.
pub fn unique_users() -> QuerySpec {
    QuerySpec {
        event: "read_article".to_string(),
        analysis: Analysis::CountUnique,
        target_property: Some("user.cookie.permanent.id".to_string()),
        interval: None,
        timezone: None,
        group_by: vec!["article.id".to_string(), "glass.device".to_string()],
        filters: vec![Filter::exists(SPONSOR_SLUG)],
    }
}

/// Distinct sessions interacting with content-type ad units.
pub fn interactive_sessions() -> QuerySpec {
    QuerySpec {
        event: "ad_interaction".to_string(),
        analysis: Analysis::CountUnique,
        target_property: Some("user.cookie.session.id".to_string()),
        interval: None,
        timezone: None,
        group_by: vec![
            "ad_meta.client.name".to_string(),
            "ad_meta.campaign.name".to_string(),
            "ad_meta.creative.name".to_string(),
            "raw_url".to_string(),
            "glass.device".to_string(),
        ],
        filters: vec![Filter::eq("ad_meta.unit.type", "content")],
    }
}
