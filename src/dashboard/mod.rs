//! Dashboard module - filtering, aggregation and page assembly

mod page;
mod views;

pub use page::{render, ChartKind, Page, PageChart, Panel};
pub use views::{
    format_number, ComparisonRow, ComparisonView, EnergyMix, EnergySource, GrowthView, LeaderboardView,
    MapView, MetricCard, ScatterView, Section, TrendView,
};
