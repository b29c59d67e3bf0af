//! Static Chart Renderer
//! Renders the charts of a page to PNG files with plotters.
//!
//! Layout of every image:
//! 1. Title centered at the top
//! 2. Chart body with axes, or the tile grid for the map
//! 3. Legend in the upper right where the chart has several series

use crate::charts::axis::category_label;
use crate::charts::palette::{self, Rgb};
use crate::dashboard::{
    format_number, ChartKind, ComparisonRow, ComparisonView, EnergyMix, GrowthView, LeaderboardView, MapView,
    Page, PageChart, ScatterView, TrendView,
};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";
pub const EXPORT_SIZE: (u32, u32) = (1400, 900);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart of `page` into `dir`, in parallel.
    ///
    /// Returns one result per chart; a failed chart does not stop the others.
    pub fn export_page(page: &Page, dir: &Path) -> Vec<Result<PathBuf, RenderError>> {
        let charts = page.charts();
        let results: Vec<Result<PathBuf, RenderError>> = charts
            .par_iter()
            .enumerate()
            .map(|(idx, chart)| {
                let path = dir.join(format!("{:02}_{}.png", idx + 1, chart.kind.slug()));
                Self::render_chart(chart, EXPORT_SIZE)?.save(&path)?;
                Ok(path)
            })
            .collect();

        let written = results.iter().filter(|r| r.is_ok()).count();
        info!(dir = %dir.display(), written, total = results.len(), "exported charts");
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            warn!(error = %err, "chart export failed");
        }
        results
    }

    /// Render one chart to an in-memory image.
    pub fn render_chart(chart: &PageChart<'_>, size: (u32, u32)) -> Result<RgbImage, RenderError> {
        let (width, height) = size;
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE)?;
            let body = root.titled(chart.title, (FONT, 30))?;

            match chart.kind {
                ChartKind::Mix(mix) => Self::draw_donut(&body, mix)?,
                ChartKind::Map(map) => Self::draw_tile_map(&body, map)?,
                ChartKind::Trend(trend) => Self::draw_trend(&body, trend)?,
                ChartKind::Growth(growth) => Self::draw_growth(&body, growth)?,
                ChartKind::Leaderboard(board) => Self::draw_leaderboard(&body, board)?,
                ChartKind::Scatter(scatter) => Self::draw_scatter(&body, scatter)?,
                ChartKind::Comparison(comparison) => Self::draw_comparison(&body, comparison)?,
            }
            root.present()?;
        }
        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }

    fn draw_donut(area: &Area<'_>, mix: &EnergyMix) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = w.min(h) as f64 * 0.38;
        let total = mix.total();

        let sizes: Vec<f64> = mix.slices.iter().map(|s| s.value).collect();
        let colors: Vec<RGBColor> = (0..mix.slices.len())
            .map(|i| rgb(palette::MIX_COLORS[i % palette::MIX_COLORS.len()]))
            .collect();
        let labels: Vec<String> = mix
            .slices
            .iter()
            .map(|s| format!("{} {:.1}%", s.source.label(), s.value / total * 100.0))
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.donut_hole(radius * 0.55);
        pie.label_style((FONT, 22).into_font().color(&BLACK));
        area.draw(&pie)?;
        Ok(())
    }

    fn draw_tile_map(area: &Area<'_>, map: &MapView) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let (body, scale) = area.split_vertically((h as i32 - 60).max(1));

        let cols = 16u32;
        let rows = (map.tiles.len() as u32).div_ceil(cols).max(1);
        let tile_w = (w.saturating_sub(40) / cols) as i32;
        let tile_h = (h.saturating_sub(80) / rows).min(60) as i32;

        for (i, tile) in map.tiles.iter().enumerate() {
            let (col, row) = ((i as u32 % cols) as i32, (i as u32 / cols) as i32);
            let x = 20 + col * tile_w;
            let y = 10 + row * tile_h;
            let fill = palette::plasma(tile.intensity);
            body.draw(&Rectangle::new(
                [(x + 2, y + 2), (x + tile_w - 2, y + tile_h - 2)],
                rgb(fill).filled(),
            ))?;
            body.draw(&Text::new(
                tile.code.clone(),
                (x + tile_w / 2 - 16, y + tile_h / 2 - 8),
                (FONT, 16).into_font().color(&rgb(palette::contrast_text(fill))),
            ))?;
        }

        // Color scale
        let segments = 60;
        let bar_w = (w as i32 - 320) / segments;
        for i in 0..segments {
            let x = 160 + i * bar_w;
            let t = i as f64 / (segments - 1) as f64;
            scale.draw(&Rectangle::new(
                [(x, 15), (x + bar_w + 1, 35)],
                rgb(palette::plasma(t)).filled(),
            ))?;
        }
        let label_style = (FONT, 18).into_font().color(&BLACK);
        scale.draw(&Text::new(
            format!("{} GW", format_number(map.min_gw, 1)),
            (20, 15),
            label_style.clone(),
        ))?;
        scale.draw(&Text::new(
            format!("{} GW", format_number(map.max_gw, 1)),
            (w as i32 - 140, 15),
            label_style,
        ))?;
        Ok(())
    }

    fn draw_trend(area: &Area<'_>, trend: &TrendView) -> Result<(), RenderError> {
        let lines: Vec<(String, Rgb, &[(i32, f64)])> = trend
            .series
            .iter()
            .filter(|s| !s.points.is_empty())
            .map(|s| {
                (
                    s.source.label().to_string(),
                    palette::source_color(s.source),
                    s.points.as_slice(),
                )
            })
            .collect();
        Self::draw_lines(area, &lines, "Capacity (GW)")
    }

    fn draw_growth(area: &Area<'_>, growth: &GrowthView) -> Result<(), RenderError> {
        let lines: Vec<(String, Rgb, &[(i32, f64)])> = growth
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.entity.clone(), palette::series_color(i), s.points.as_slice()))
            .collect();
        Self::draw_lines(area, &lines, "Total Renewable Capacity (GW)")
    }

    /// Year-on-x line chart shared by the trend and growth views
    fn draw_lines(
        area: &Area<'_>,
        lines: &[(String, Rgb, &[(i32, f64)])],
        y_desc: &str,
    ) -> Result<(), RenderError> {
        let all = || lines.iter().flat_map(|(_, _, points)| points.iter());
        let min_year = all().map(|(y, _)| *y).min().unwrap_or(0);
        let max_year = all().map(|(y, _)| *y).max().unwrap_or(min_year).max(min_year + 1);
        let max_gw = all().map(|(_, v)| *v).fold(0.0_f64, f64::max).max(1.0);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(min_year..max_year, 0.0..max_gw * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .x_label_formatter(&|y| y.to_string())
            .label_style((FONT, 16))
            .draw()?;

        for (name, color, points) in lines {
            let color = rgb(*color);
            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))?
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 16))
            .draw()?;
        Ok(())
    }

    fn draw_leaderboard(area: &Area<'_>, board: &LeaderboardView) -> Result<(), RenderError> {
        let n = board.entries.len();
        let labels: Vec<String> = board.entries.iter().rev().map(|e| e.entity.clone()).collect();
        let max = board.entries.first().map(|e| e.value).unwrap_or(1.0).max(1e-9);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(200)
            .build_cartesian_2d(0.0..max * 1.1, -0.5..n as f64 - 0.5)?;

        let y_formatter = |y: &f64| category_label(&labels, *y);
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&y_formatter)
            .x_desc("Total Renewable Capacity (GW)")
            .label_style((FONT, 16))
            .draw()?;

        let color = rgb(palette::BAR_COLOR);
        chart.draw_series(board.entries.iter().enumerate().map(|(rank, entry)| {
            let y = (n - 1 - rank) as f64;
            Rectangle::new([(0.0, y - 0.35), (entry.value, y + 0.35)], color.filled())
        }))?;
        Ok(())
    }

    fn draw_scatter(area: &Area<'_>, scatter: &ScatterView) -> Result<(), RenderError> {
        let min_gdp = scatter.points.iter().map(|p| p.gdp_per_capita).fold(f64::INFINITY, f64::min);
        let max_gdp = scatter.points.iter().map(|p| p.gdp_per_capita).fold(0.0_f64, f64::max);
        let max_kw = scatter
            .points
            .iter()
            .map(|p| p.capacity_per_capita_kw)
            .fold(0.0_f64, f64::max)
            .max(0.1);
        let max_population = scatter.points.iter().map(|p| p.population).fold(0.0_f64, f64::max);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (min_gdp * 0.8..max_gdp * 1.25).log_scale(),
                0.0..max_kw * 1.15,
            )?;

        chart
            .configure_mesh()
            .x_desc("GDP per Capita (USD)")
            .y_desc("Renewable Capacity per Capita (kW)")
            .x_label_formatter(&|x| format_number(*x, 0))
            .label_style((FONT, 16))
            .draw()?;

        chart.draw_series(scatter.points.iter().enumerate().map(|(i, p)| {
            let share = if max_population > 0.0 {
                (p.population / max_population).sqrt()
            } else {
                0.0
            };
            let radius = (4.0 + 26.0 * share) as i32;
            Circle::new(
                (p.gdp_per_capita, p.capacity_per_capita_kw),
                radius,
                rgb(palette::series_color(i)).mix(0.7).filled(),
            )
        }))?;
        Ok(())
    }

    fn draw_comparison(area: &Area<'_>, comparison: &ComparisonView) -> Result<(), RenderError> {
        let n = comparison.rows.len();
        let labels: Vec<String> = comparison.rows.iter().rev().map(|r| r.entity.clone()).collect();
        let max = comparison
            .rows
            .iter()
            .flat_map(|r| [r.before, r.after])
            .flatten()
            .fold(0.0_f64, f64::max)
            .max(1e-9);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(200)
            .build_cartesian_2d(0.0..max * 1.1, -0.5..n as f64 - 0.5)?;

        let y_formatter = |y: &f64| category_label(&labels, *y);
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&y_formatter)
            .x_desc("Renewable Capacity per Capita (kW)")
            .label_style((FONT, 16))
            .draw()?;

        let groups: [(i32, fn(&ComparisonRow) -> Option<f64>, f64, Rgb); 2] = [
            (comparison.before_year, |r| r.before, 0.2, palette::BEFORE_COLOR),
            (comparison.after_year, |r| r.after, -0.2, palette::AFTER_COLOR),
        ];
        for (year, value, offset, color) in groups {
            let color = rgb(color);
            chart
                .draw_series(comparison.rows.iter().enumerate().filter_map(|(rank, row)| {
                    let v = value(row)?;
                    let y = (n - 1 - rank) as f64 + offset;
                    Some(Rectangle::new([(0.0, y - 0.18), (v, y + 0.18)], color.filled()))
                }))?
                .label(year.to_string())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 16))
            .draw()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::render;
    use crate::data::{EnergyRecord, EnergyTable};
    use tempfile::TempDir;

    fn record(entity: &str, code: &str, year: i32, total: f64) -> EnergyRecord {
        EnergyRecord {
            solar_gw: Some(total / 2.0),
            wind_gw: Some(total / 4.0),
            hydro_gw: Some(total / 4.0),
            total_gw: Some(total),
            population: Some(total * 100_000.0),
            gdp_per_capita: Some(total * 1_000.0),
            capacity_per_capita_kw: Some(total / 10.0),
            ..EnergyRecord::new(entity, code, year)
        }
    }

    fn full_table() -> EnergyTable {
        EnergyTable::from_records(vec![
            record("World", "OWID_WRL", 2023, 500.0),
            record("Norway", "NOR", 2010, 30.0),
            record("Norway", "NOR", 2023, 40.0),
            record("Chile", "CHL", 2010, 5.0),
            record("Chile", "CHL", 2023, 15.0),
            record("Kenya", "KEN", 2023, 3.0),
        ])
    }

    #[test]
    fn every_chart_renders_at_requested_size() {
        let page = render(&full_table(), 2023, "Norway", &DashboardConfig::default());
        let charts = page.charts();
        assert_eq!(charts.len(), 7);

        for chart in &charts {
            let image = StaticChartRenderer::render_chart(chart, (800, 600))
                .unwrap_or_else(|e| panic!("{} failed: {}", chart.kind.slug(), e));
            assert_eq!(image.dimensions(), (800, 600));
            // Something other than the white background was drawn
            assert!(image.pixels().any(|p| p.0 != [255, 255, 255]));
        }
    }

    #[test]
    fn export_writes_one_numbered_file_per_chart() {
        let dir = TempDir::new().unwrap();
        let page = render(&full_table(), 2023, "Norway", &DashboardConfig::default());

        let results = StaticChartRenderer::export_page(&page, dir.path());
        let mut names: Vec<String> = results
            .into_iter()
            .map(|r| {
                let path = r.unwrap();
                assert!(path.is_file());
                path.file_name().unwrap().to_string_lossy().to_string()
            })
            .collect();
        names.sort();

        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "01_energy_mix.png");
        assert_eq!(names[6], "07_per_capita_comparison.png");
    }

    #[test]
    fn export_without_charts_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let table = EnergyTable::from_records(vec![EnergyRecord::new("Norway", "NOR", 2023)]);
        let page = render(&table, 2023, "Norway", &DashboardConfig::default());

        assert!(page.charts().is_empty());
        assert!(StaticChartRenderer::export_page(&page, dir.path()).is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
