//! Bulletin reporting pipeline: pulls pre-aggregated read, click, user and
//! ad-interaction metrics from an analytics service over fixed daily
//! windows and reshapes them into per-article, per-day, per-device summary
//! tables.
//!
//! Data flows strictly forward: [`window`] → [`query`] → [`assemble`] →
//! [`reshape`], with [`normalize`] as a standalone ID utility. The service
//! itself sits behind the [`client::AnalyticsClient`] trait.

pub mod assemble;
pub mod client;
pub mod error;
pub mod model;
pub mod normalize;
pub mod query;
pub mod report;
pub mod reshape;
pub mod specs;
pub mod window;

pub use client::AnalyticsClient;
pub use error::CoreError;
pub use window::{timeframes, TimeWindow, DEFAULT_HOUR_INTERVAL, DEFAULT_TZ};
