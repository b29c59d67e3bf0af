//! Dashboard Views Module
//! Pure filters and aggregations that turn the cached table into chart data.
//!
//! Missing values are excluded from every aggregation here. Only the metric
//! cards and the energy-mix slices read a missing value as zero, and only for
//! display.

use crate::config::ViewSettings;
use crate::data::{EnergyRecord, EnergyTable};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Result of one view: chart data, or a message explaining why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Chart(T),
    Info(String),
}

impl<T> Section<T> {
    pub fn chart(&self) -> Option<&T> {
        match self {
            Section::Chart(data) => Some(data),
            Section::Info(_) => None,
        }
    }

    #[cfg(test)]
    pub fn info(&self) -> Option<&str> {
        match self {
            Section::Chart(_) => None,
            Section::Info(message) => Some(message),
        }
    }
}

/// The three capacity sources tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergySource {
    Solar,
    Wind,
    Hydro,
}

impl EnergySource {
    pub const ALL: [EnergySource; 3] = [EnergySource::Solar, EnergySource::Wind, EnergySource::Hydro];

    pub fn label(self) -> &'static str {
        match self {
            EnergySource::Solar => "Solar (GW)",
            EnergySource::Wind => "Wind (GW)",
            EnergySource::Hydro => "Hydro (GW)",
        }
    }

    pub fn value(self, record: &EnergyRecord) -> Option<f64> {
        match self {
            EnergySource::Solar => record.solar_gw,
            EnergySource::Wind => record.wind_gw,
            EnergySource::Hydro => record.hydro_gw,
        }
    }
}

// ===== Insights (point lookup, metrics, mix) =====

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixSlice {
    pub source: EnergySource,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMix {
    pub slices: Vec<MixSlice>,
}

impl EnergyMix {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsView {
    pub metrics: Vec<MetricCard>,
    pub mix: Section<EnergyMix>,
}

/// First record for (`year`, `country`), in table order.
pub fn point_lookup<'a>(table: &'a EnergyTable, year: i32, country: &str) -> Option<&'a EnergyRecord> {
    table
        .records()
        .iter()
        .find(|r| r.year == year && r.entity == country)
}

pub fn insights(table: &EnergyTable, year: i32, country: &str) -> Section<InsightsView> {
    match point_lookup(table, year, country) {
        Some(record) => Section::Chart(InsightsView {
            metrics: metric_cards(record),
            mix: energy_mix(record),
        }),
        None => Section::Info(format!(
            "No detailed data available for {} in {}. Please select a different country or year.",
            country, year
        )),
    }
}

/// Key figures for one record. Missing reads as zero here.
pub fn metric_cards(record: &EnergyRecord) -> Vec<MetricCard> {
    let gw = |v: Option<f64>| format_number(v.unwrap_or(0.0), 1);
    vec![
        MetricCard {
            label: "Total Solar (GW)",
            value: gw(record.solar_gw),
        },
        MetricCard {
            label: "Total Wind (GW)",
            value: gw(record.wind_gw),
        },
        MetricCard {
            label: "Total Hydro (GW)",
            value: gw(record.hydro_gw),
        },
        MetricCard {
            label: "Total Renewable (GW)",
            value: gw(record.total_gw),
        },
        MetricCard {
            label: "Per Capita Capacity (kW)",
            value: format_number(record.capacity_per_capita_kw.unwrap_or(0.0), 2),
        },
    ]
}

/// Solar/wind/hydro split. Sources without positive capacity get no slice.
pub fn energy_mix(record: &EnergyRecord) -> Section<EnergyMix> {
    let slices: Vec<MixSlice> = EnergySource::ALL
        .into_iter()
        .map(|source| MixSlice {
            source,
            value: source.value(record).unwrap_or(0.0),
        })
        .filter(|slice| slice.value > 0.0)
        .collect();

    if slices.is_empty() {
        return Section::Info(
            "No renewable energy mix data available for the selected country and year.".to_string(),
        );
    }
    Section::Chart(EnergyMix { slices })
}

// ===== Map =====

#[derive(Debug, Clone, PartialEq)]
pub struct MapTile {
    pub entity: String,
    pub code: String,
    pub total_gw: f64,
    /// Position of `total_gw` within the year's range, 0.0 ..= 1.0.
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub year: i32,
    pub min_gw: f64,
    pub max_gw: f64,
    pub tiles: Vec<MapTile>,
}

pub fn map_view(table: &EnergyTable, year: i32, settings: &ViewSettings) -> Section<MapView> {
    let rows: Vec<(&EnergyRecord, f64)> = countries(table, settings)
        .filter(|r| r.year == year && !r.code.is_empty())
        .filter_map(|r| r.total_gw.map(|total| (r, total)))
        .collect();

    if rows.is_empty() {
        return Section::Info(format!(
            "No global renewable capacity data for map in {}.",
            year
        ));
    }

    let min_gw = rows.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max_gw = rows.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let span = max_gw - min_gw;

    let mut tiles: Vec<MapTile> = rows
        .into_iter()
        .map(|(r, total_gw)| MapTile {
            entity: r.entity.clone(),
            code: r.code.clone(),
            total_gw,
            intensity: if span > 0.0 { (total_gw - min_gw) / span } else { 1.0 },
        })
        .collect();
    tiles.sort_by(|a, b| a.code.cmp(&b.code));

    Section::Chart(MapView {
        year,
        min_gw,
        max_gw,
        tiles,
    })
}

// ===== Global trend =====

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub source: EnergySource,
    /// (year, summed GW), ascending by year.
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub series: Vec<TrendSeries>,
}

/// Per-year sums of each source across all countries.
pub fn global_trend(table: &EnergyTable, settings: &ViewSettings) -> Section<TrendView> {
    let mut by_year: BTreeMap<i32, [Option<f64>; 3]> = BTreeMap::new();
    for record in countries(table, settings) {
        let sums = by_year.entry(record.year).or_insert([None; 3]);
        for (slot, source) in sums.iter_mut().zip(EnergySource::ALL) {
            if let Some(v) = source.value(record) {
                *slot = Some(slot.unwrap_or(0.0) + v);
            }
        }
    }

    let series: Vec<TrendSeries> = EnergySource::ALL
        .into_iter()
        .enumerate()
        .map(|(idx, source)| TrendSeries {
            source,
            points: by_year
                .iter()
                .filter_map(|(year, sums)| sums[idx].map(|v| (*year, v)))
                .collect(),
        })
        .collect();

    if series.iter().all(|s| s.points.is_empty()) {
        return Section::Info("No global renewable mix data available for charting.".to_string());
    }
    Section::Chart(TrendView { series })
}

// ===== Top-N growth =====

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity: String,
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthView {
    pub year: i32,
    pub series: Vec<EntitySeries>,
}

/// Time series for the countries with the most capacity in `year`.
pub fn growth_view(table: &EnergyTable, year: i32, settings: &ViewSettings) -> Section<GrowthView> {
    // Summed capacity per country in the ranking year; missing ranks as zero
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in countries(table, settings).filter(|r| r.year == year) {
        *totals.entry(record.entity.as_str()).or_insert(0.0) += record.total_gw.unwrap_or(0.0);
    }
    if totals.is_empty() {
        return Section::Info(format!(
            "No data available for top {} country growth in {}.",
            settings.growth_size, year
        ));
    }

    let ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    let leaders = top_n(ranked, |(_, v)| *v, settings.growth_size);
    if leaders.is_empty() {
        return Section::Info(format!(
            "Could not determine top {} countries for {}. Data might be insufficient.",
            settings.growth_size, year
        ));
    }

    let series: Vec<EntitySeries> = leaders
        .into_iter()
        .map(|(entity, _)| {
            let mut points: Vec<(i32, f64)> = table
                .records()
                .iter()
                .filter(|r| r.entity == entity)
                .filter_map(|r| r.total_gw.map(|v| (r.year, v)))
                .collect();
            points.sort_by_key(|(year, _)| *year);
            EntitySeries {
                entity: entity.to_string(),
                points,
            }
        })
        .collect();

    if series.iter().all(|s| s.points.is_empty()) {
        return Section::Info(format!(
            "Insufficient data for selected top {} countries time series.",
            settings.growth_size
        ));
    }
    Section::Chart(GrowthView { year, series })
}

// ===== Leaderboard =====

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub entity: String,
    pub code: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardView {
    pub year: i32,
    /// Largest first.
    pub entries: Vec<RankedEntry>,
}

pub fn leaderboard(table: &EnergyTable, year: i32, settings: &ViewSettings) -> Section<LeaderboardView> {
    let candidates: Vec<RankedEntry> = countries(table, settings)
        .filter(|r| r.year == year)
        .filter_map(|r| {
            r.total_gw.map(|value| RankedEntry {
                entity: r.entity.clone(),
                code: r.code.clone(),
                value,
            })
        })
        .collect();

    let entries = top_n(candidates, |e| e.value, settings.leaderboard_size);
    if entries.is_empty() {
        return Section::Info(format!(
            "No renewable capacity rankings available for {}.",
            year
        ));
    }
    Section::Chart(LeaderboardView { year, entries })
}

// ===== Economic scatter =====

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub entity: String,
    pub gdp_per_capita: f64,
    pub capacity_per_capita_kw: f64,
    pub population: f64,
    pub total_gw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub year: i32,
    pub points: Vec<ScatterPoint>,
}

/// GDP against per-capita capacity. Non-positive GDP cannot sit on a log axis.
pub fn economic_scatter(table: &EnergyTable, year: i32, settings: &ViewSettings) -> Section<ScatterView> {
    let points: Vec<ScatterPoint> = countries(table, settings)
        .filter(|r| r.year == year)
        .filter_map(|r| {
            Some(ScatterPoint {
                entity: r.entity.clone(),
                gdp_per_capita: r.gdp_per_capita?,
                capacity_per_capita_kw: r.capacity_per_capita_kw?,
                population: r.population?,
                total_gw: r.total_gw,
            })
        })
        .filter(|p| p.gdp_per_capita > 0.0)
        .collect();

    if points.is_empty() {
        return Section::Info(format!(
            "No scatter plot data for GDP vs. Per-Capita Renewable Capacity in {}.",
            year
        ));
    }
    Section::Chart(ScatterView { year, points })
}

// ===== Historical comparison =====

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub entity: String,
    pub before: Option<f64>,
    pub after: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub before_year: i32,
    pub after_year: i32,
    /// Largest later-year value first.
    pub rows: Vec<ComparisonRow>,
}

/// Per-capita leaders of the later comparison year, shown against the earlier one.
pub fn historical_comparison(table: &EnergyTable, settings: &ViewSettings) -> Section<ComparisonView> {
    let (before_year, after_year) = settings.comparison_years;
    let per_capita_rows = |year: i32| {
        countries(table, settings)
            .filter(|r| r.year == year && r.capacity_per_capita_kw.is_some())
            .collect::<Vec<_>>()
    };

    let before = per_capita_rows(before_year);
    let after = per_capita_rows(after_year);
    if before.is_empty() || after.is_empty() {
        return Section::Info(format!(
            "Data for {} or {} is insufficient for comparison chart.",
            before_year, after_year
        ));
    }

    let leaders = top_n(
        after,
        |r| r.capacity_per_capita_kw.unwrap_or(f64::NEG_INFINITY),
        settings.comparison_size,
    );
    if leaders.is_empty() {
        return Section::Info(format!(
            "Could not determine top {} countries for comparison (data might be missing for {}).",
            settings.comparison_size, after_year
        ));
    }

    let rows: Vec<ComparisonRow> = leaders
        .into_iter()
        .map(|leader| ComparisonRow {
            entity: leader.entity.clone(),
            before: before
                .iter()
                .find(|r| r.entity == leader.entity)
                .and_then(|r| r.capacity_per_capita_kw),
            after: leader.capacity_per_capita_kw,
        })
        .collect();

    Section::Chart(ComparisonView {
        before_year,
        after_year,
        rows,
    })
}

// ===== Helpers =====

/// Records other than the aggregate entity.
fn countries<'a>(
    table: &'a EnergyTable,
    settings: &'a ViewSettings,
) -> impl Iterator<Item = &'a EnergyRecord> + 'a {
    table
        .records()
        .iter()
        .filter(move |r| r.entity != settings.aggregate_entity)
}

/// Largest `n` items by `key`; ties keep their input order.
fn top_n<T>(mut items: Vec<T>, key: impl Fn(&T) -> f64, n: usize) -> Vec<T> {
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    items.truncate(n);
    items
}

/// Fixed-precision number with thousands separators, e.g. `12,345.6`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let negative = value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testland() -> EnergyRecord {
        EnergyRecord {
            solar_gw: Some(5.0),
            wind_gw: Some(3.0),
            hydro_gw: Some(2.0),
            total_gw: Some(10.0),
            capacity_per_capita_kw: Some(1.5),
            ..EnergyRecord::new("Testland", "TST", 2023)
        }
    }

    fn with_total(entity: &str, year: i32, total: Option<f64>) -> EnergyRecord {
        EnergyRecord {
            total_gw: total,
            ..EnergyRecord::new(entity, &entity[..3].to_uppercase(), year)
        }
    }

    fn per_capita(entity: &str, year: i32, kw: f64) -> EnergyRecord {
        EnergyRecord {
            capacity_per_capita_kw: Some(kw),
            ..EnergyRecord::new(entity, &entity[..3].to_uppercase(), year)
        }
    }

    #[test]
    fn testland_metrics_and_mix() {
        let table = EnergyTable::from_records(vec![testland()]);
        let Section::Chart(view) = insights(&table, 2023, "Testland") else {
            panic!("expected insights for Testland");
        };

        let values: Vec<&str> = view.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["5.0", "3.0", "2.0", "10.0", "1.50"]);

        let mix = view.mix.chart().unwrap();
        assert_eq!(mix.slices.len(), 3);
        assert!(mix.slices.iter().all(|s| s.value > 0.0));
        assert_eq!(mix.total(), 10.0);
    }

    #[test]
    fn no_match_yields_info_only() {
        let table = EnergyTable::from_records(vec![testland()]);
        let section = insights(&table, 1900, "Testland");
        assert!(section.chart().is_none());
        assert!(section.info().unwrap().contains("Testland in 1900"));
    }

    #[test]
    fn point_lookup_takes_first_match() {
        let mut second = testland();
        second.total_gw = Some(99.0);
        let table = EnergyTable::from_records(vec![testland(), second]);
        assert_eq!(point_lookup(&table, 2023, "Testland").unwrap().total_gw, Some(10.0));
    }

    #[test]
    fn missing_values_show_as_zero_on_cards_only() {
        let record = EnergyRecord {
            solar_gw: Some(1234.56),
            ..EnergyRecord::new("Sparse", "SPR", 2023)
        };
        let cards = metric_cards(&record);
        assert_eq!(cards[0].value, "1,234.6");
        assert_eq!(cards[1].value, "0.0");
        assert_eq!(cards[4].value, "0.00");

        let mix = energy_mix(&record);
        assert_eq!(mix.chart().unwrap().slices.len(), 1);
    }

    #[test]
    fn empty_mix_is_info() {
        let record = EnergyRecord {
            solar_gw: Some(0.0),
            ..EnergyRecord::new("Dark", "DRK", 2023)
        };
        assert!(energy_mix(&record).info().is_some());
    }

    #[test]
    fn leaderboard_takes_top_ten_with_stable_ties() {
        let settings = ViewSettings::default();
        let names = [
            "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
            "Juliet", "Kilo", "Lima", "Mike", "November", "Oscar",
        ];
        let values = [5.0, 50.0, 12.0, 30.0, 30.0, 1.0, 8.0, 44.0, 12.0, 2.0, 70.0, 3.0, 9.0, 0.5, 20.0];
        let mut records: Vec<EnergyRecord> = names
            .iter()
            .zip(values)
            .map(|(name, v)| with_total(name, 2023, Some(v)))
            .collect();
        records.push(with_total("World", 2023, Some(500.0)));
        records.push(with_total("Papa", 2023, None));
        records.push(with_total("Quebec", 2022, Some(1000.0)));
        let table = EnergyTable::from_records(records);

        let view = leaderboard(&table, 2023, &settings);
        let entries = &view.chart().unwrap().entries;
        let ranked: Vec<&str> = entries.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(
            ranked,
            vec!["Kilo", "Bravo", "Hotel", "Delta", "Echo", "Oscar", "Charlie", "India", "Mike", "Golf"]
        );
    }

    #[test]
    fn signed_zero_ties_keep_input_order() {
        let settings = ViewSettings::default();
        let table = EnergyTable::from_records(vec![
            with_total("Alpha", 2023, Some(-0.0)),
            with_total("Bravo", 2023, Some(0.0)),
            with_total("Charlie", 2023, Some(-0.0)),
        ]);
        let view = leaderboard(&table, 2023, &settings);
        let ranked: Vec<&str> = view
            .chart()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.entity.as_str())
            .collect();
        assert_eq!(ranked, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn leaderboard_without_rows_is_info() {
        let table = EnergyTable::from_records(vec![with_total("World", 2023, Some(5.0))]);
        assert!(leaderboard(&table, 2023, &ViewSettings::default()).info().is_some());
    }

    #[test]
    fn map_excludes_aggregate_and_missing_totals() {
        let table = EnergyTable::from_records(vec![
            with_total("World", 2020, Some(900.0)),
            with_total("Norway", 2020, Some(40.0)),
            with_total("Chile", 2020, Some(10.0)),
            with_total("Peru", 2020, None),
            with_total("Norway", 2019, Some(38.0)),
        ]);
        let view = map_view(&table, 2020, &ViewSettings::default());
        let map = view.chart().unwrap();
        let codes: Vec<&str> = map.tiles.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["CHI", "NOR"]);
        assert_eq!(map.tiles[0].intensity, 0.0);
        assert_eq!(map.tiles[1].intensity, 1.0);

        assert!(map_view(&table, 1999, &ViewSettings::default()).info().is_some());
    }

    #[test]
    fn trend_sums_present_values_and_skips_missing_years() {
        let table = EnergyTable::from_records(vec![
            EnergyRecord {
                solar_gw: Some(1.0),
                wind_gw: Some(2.0),
                ..EnergyRecord::new("Norway", "NOR", 2011)
            },
            EnergyRecord {
                solar_gw: Some(3.0),
                ..EnergyRecord::new("Chile", "CHL", 2011)
            },
            EnergyRecord {
                solar_gw: Some(4.0),
                ..EnergyRecord::new("Chile", "CHL", 2010)
            },
            EnergyRecord {
                solar_gw: Some(100.0),
                ..EnergyRecord::new("World", "OWID_WRL", 2011)
            },
        ]);
        let view = global_trend(&table, &ViewSettings::default());
        let trend = view.chart().unwrap();

        assert_eq!(trend.series[0].points, vec![(2010, 4.0), (2011, 4.0)]);
        assert_eq!(trend.series[1].points, vec![(2011, 2.0)]);
        assert!(trend.series[2].points.is_empty());
    }

    #[test]
    fn growth_ranks_selected_year_and_spans_all_years() {
        let settings = ViewSettings {
            growth_size: 2,
            ..ViewSettings::default()
        };
        let table = EnergyTable::from_records(vec![
            with_total("Norway", 2020, Some(40.0)),
            with_total("Norway", 2010, Some(30.0)),
            with_total("Chile", 2020, Some(10.0)),
            with_total("Brazil", 2020, Some(60.0)),
            with_total("Brazil", 2015, None),
            with_total("World", 2020, Some(900.0)),
        ]);
        let view = growth_view(&table, 2020, &settings);
        let growth = view.chart().unwrap();

        let leaders: Vec<&str> = growth.series.iter().map(|s| s.entity.as_str()).collect();
        assert_eq!(leaders, vec!["Brazil", "Norway"]);
        assert_eq!(growth.series[1].points, vec![(2010, 30.0), (2020, 40.0)]);
        assert_eq!(growth.series[0].points, vec![(2020, 60.0)]);
    }

    #[test]
    fn scatter_requires_all_three_measures() {
        let complete = EnergyRecord {
            gdp_per_capita: Some(80000.0),
            capacity_per_capita_kw: Some(8.0),
            population: Some(5_000_000.0),
            ..EnergyRecord::new("Norway", "NOR", 2020)
        };
        let no_population = EnergyRecord {
            population: None,
            entity: "Chile".to_string(),
            ..complete.clone()
        };
        let zero_gdp = EnergyRecord {
            gdp_per_capita: Some(0.0),
            entity: "Peru".to_string(),
            ..complete.clone()
        };
        let table = EnergyTable::from_records(vec![complete, no_population, zero_gdp]);

        let view = economic_scatter(&table, 2020, &ViewSettings::default());
        let points = &view.chart().unwrap().points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].entity, "Norway");
    }

    #[test]
    fn comparison_without_earlier_year_is_info() {
        let table = EnergyTable::from_records(vec![
            per_capita("Norway", 2023, 8.0),
            per_capita("Iceland", 2023, 9.0),
        ]);
        let view = historical_comparison(&table, &ViewSettings::default());
        assert_eq!(
            view.info(),
            Some("Data for 2010 or 2023 is insufficient for comparison chart.")
        );
    }

    #[test]
    fn comparison_pairs_later_leaders_with_earlier_values() {
        let settings = ViewSettings {
            comparison_size: 2,
            ..ViewSettings::default()
        };
        let table = EnergyTable::from_records(vec![
            per_capita("Norway", 2010, 6.0),
            per_capita("Norway", 2023, 8.0),
            per_capita("Iceland", 2023, 9.0),
            per_capita("Chile", 2023, 1.0),
            per_capita("World", 2023, 50.0),
        ]);
        let view = historical_comparison(&table, &settings);
        let rows = &view.chart().unwrap().rows;

        assert_eq!(
            rows,
            &vec![
                ComparisonRow {
                    entity: "Iceland".to_string(),
                    before: None,
                    after: Some(9.0),
                },
                ComparisonRow {
                    entity: "Norway".to_string(),
                    before: Some(6.0),
                    after: Some(8.0),
                },
            ]
        );
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(999.96, 1), "1,000.0");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(-0.001, 1), "0.0");
    }
}
