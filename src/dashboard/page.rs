//! Page Module
//! Assembles every view for one (year, country) selection.

use crate::config::DashboardConfig;
use crate::dashboard::views::{
    self, ComparisonView, EnergyMix, GrowthView, InsightsView, LeaderboardView, MapView,
    ScatterView, Section, TrendView,
};
use crate::data::EnergyTable;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub insights_heading: String,
    pub mix_heading: String,
}

/// A titled section of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub title: String,
    pub section: Section<T>,
}

impl<T> Panel<T> {
    fn new(title: String, section: Section<T>) -> Self {
        Self { title, section }
    }
}

/// Everything the viewer draws, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub year: i32,
    pub country: String,
    pub header: Header,
    pub insights: Section<InsightsView>,
    pub map: Panel<MapView>,
    pub trend: Panel<TrendView>,
    pub growth: Panel<GrowthView>,
    pub leaderboard: Panel<LeaderboardView>,
    pub scatter: Panel<ScatterView>,
    pub comparison: Panel<ComparisonView>,
    pub footer: String,
}

/// Derive the full page. Stateless; called again on every selection change.
pub fn render(table: &EnergyTable, year: i32, country: &str, config: &DashboardConfig) -> Page {
    debug!(year, country, "rendering page");
    let settings = &config.views;
    let (before_year, after_year) = settings.comparison_years;

    Page {
        year,
        country: country.to_string(),
        header: Header {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            insights_heading: format!("Insights for {} in {}", country, year),
            mix_heading: format!("Renewable Energy Mix in {} ({})", country, year),
        },
        insights: views::insights(table, year, country),
        map: Panel::new(
            format!("Total Renewable Capacity (GW) by Country in {}", year),
            views::map_view(table, year, settings),
        ),
        trend: Panel::new(
            "Global Renewable-Source Mix Over Time".to_string(),
            views::global_trend(table, settings),
        ),
        growth: Panel::new(
            format!(
                "Top {} Countries Growth in Total Renewable Capacity",
                settings.growth_size
            ),
            views::growth_view(table, year, settings),
        ),
        leaderboard: Panel::new(
            format!(
                "Top {} Countries by Total Renewable Capacity ({})",
                settings.leaderboard_size, year
            ),
            views::leaderboard(table, year, settings),
        ),
        scatter: Panel::new(
            "GDP per Capita vs. Renewable Capacity per Capita".to_string(),
            views::economic_scatter(table, year, settings),
        ),
        comparison: Panel::new(
            format!(
                "Top {} Per-Capita Renewable Leaders: {} vs. {} Comparison",
                settings.comparison_size, before_year, after_year
            ),
            views::historical_comparison(table, settings),
        ),
        footer: config.footer.clone(),
    }
}

/// Chart data borrowed from a page.
#[derive(Debug, Clone, Copy)]
pub enum ChartKind<'a> {
    Mix(&'a EnergyMix),
    Map(&'a MapView),
    Trend(&'a TrendView),
    Growth(&'a GrowthView),
    Leaderboard(&'a LeaderboardView),
    Scatter(&'a ScatterView),
    Comparison(&'a ComparisonView),
}

impl ChartKind<'_> {
    /// File-name friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Mix(_) => "energy_mix",
            ChartKind::Map(_) => "capacity_map",
            ChartKind::Trend(_) => "global_trend",
            ChartKind::Growth(_) => "top_growth",
            ChartKind::Leaderboard(_) => "leaderboard",
            ChartKind::Scatter(_) => "gdp_scatter",
            ChartKind::Comparison(_) => "per_capita_comparison",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageChart<'a> {
    pub title: &'a str,
    pub kind: ChartKind<'a>,
}

impl Page {
    /// Charts that have data, in display order.
    pub fn charts(&self) -> Vec<PageChart<'_>> {
        fn push<'a, T>(
            charts: &mut Vec<PageChart<'a>>,
            panel: &'a Panel<T>,
            kind: fn(&'a T) -> ChartKind<'a>,
        ) {
            if let Some(data) = panel.section.chart() {
                charts.push(PageChart {
                    title: &panel.title,
                    kind: kind(data),
                });
            }
        }

        let mut charts = Vec::new();
        if let Some(mix) = self.insights.chart().and_then(|i| i.mix.chart()) {
            charts.push(PageChart {
                title: &self.header.mix_heading,
                kind: ChartKind::Mix(mix),
            });
        }
        push(&mut charts, &self.map, ChartKind::Map);
        push(&mut charts, &self.trend, ChartKind::Trend);
        push(&mut charts, &self.growth, ChartKind::Growth);
        push(&mut charts, &self.leaderboard, ChartKind::Leaderboard);
        push(&mut charts, &self.scatter, ChartKind::Scatter);
        push(&mut charts, &self.comparison, ChartKind::Comparison);
        charts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EnergyRecord;

    fn record(entity: &str, code: &str, year: i32, total: f64) -> EnergyRecord {
        EnergyRecord {
            solar_gw: Some(total / 2.0),
            wind_gw: Some(total / 4.0),
            hydro_gw: Some(total / 4.0),
            total_gw: Some(total),
            population: Some(1_000_000.0),
            gdp_per_capita: Some(20_000.0),
            capacity_per_capita_kw: Some(total / 10.0),
            ..EnergyRecord::new(entity, code, year)
        }
    }

    #[test]
    fn full_table_renders_every_chart() {
        let table = EnergyTable::from_records(vec![
            record("World", "OWID_WRL", 2023, 500.0),
            record("Norway", "NOR", 2010, 30.0),
            record("Norway", "NOR", 2023, 40.0),
            record("Chile", "CHL", 2010, 5.0),
            record("Chile", "CHL", 2023, 15.0),
        ]);
        let page = render(&table, 2023, "World", &DashboardConfig::default());

        assert_eq!(page.header.insights_heading, "Insights for World in 2023");
        let slugs: Vec<&str> = page.charts().iter().map(|c| c.kind.slug()).collect();
        assert_eq!(
            slugs,
            vec![
                "energy_mix",
                "capacity_map",
                "global_trend",
                "top_growth",
                "leaderboard",
                "gdp_scatter",
                "per_capita_comparison",
            ]
        );
        assert_eq!(
            page.comparison.title,
            "Top 10 Per-Capita Renewable Leaders: 2010 vs. 2023 Comparison"
        );
    }

    #[test]
    fn empty_views_degrade_independently() {
        let table = EnergyTable::from_records(vec![record("Norway", "NOR", 2023, 40.0)]);
        let page = render(&table, 2023, "Norway", &DashboardConfig::default());

        assert!(page.insights.chart().is_some());
        assert!(page.leaderboard.section.chart().is_some());
        assert!(page.comparison.section.info().is_some());
        assert_eq!(page.charts().len(), 6);
    }

    #[test]
    fn rendering_does_not_depend_on_history() {
        let table = EnergyTable::from_records(vec![
            record("Norway", "NOR", 2023, 40.0),
            record("Chile", "CHL", 2022, 15.0),
        ]);
        let config = DashboardConfig::default();
        let first = render(&table, 2023, "Norway", &config);
        let _ = render(&table, 2022, "Chile", &config);
        assert_eq!(first, render(&table, 2023, "Norway", &config));
    }
}
