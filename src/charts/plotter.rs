//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot and the egui painter.

use crate::charts::axis::category_label;
use crate::charts::palette::{self, Rgb};
use crate::dashboard::{
    format_number, ComparisonRow, ComparisonView, EnergyMix, GrowthView, LeaderboardView, MapView, MetricCard,
    ScatterView, TrendView,
};
use egui::{Align2, Color32, FontId, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::f32::consts::{FRAC_PI_2, TAU};

const CHART_HEIGHT: f32 = 320.0;
const TILE_SIZE: egui::Vec2 = egui::vec2(46.0, 30.0);

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Draws dashboard charts into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Informational placeholder shown instead of an empty chart.
    pub fn draw_info(ui: &mut egui::Ui, message: &str) {
        let accent = color32(palette::INFO_COLOR);
        egui::Frame::none()
            .fill(accent.gamma_multiply(0.15))
            .stroke(Stroke::new(1.0, accent))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("ℹ {}", message)).size(13.0));
            });
    }

    /// Row of key-metric cards
    pub fn draw_metric_cards(ui: &mut egui::Ui, metrics: &[MetricCard]) {
        ui.columns(metrics.len().max(1), |columns| {
            for (col, metric) in columns.iter_mut().zip(metrics) {
                egui::Frame::none()
                    .fill(col.visuals().extreme_bg_color)
                    .rounding(6.0)
                    .inner_margin(10.0)
                    .show(col, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(metric.label).size(12.0).color(Color32::GRAY));
                        ui.label(RichText::new(&metric.value).size(24.0).strong());
                    });
            }
        });
    }

    /// Donut chart with a legend on the right
    pub fn draw_donut(ui: &mut egui::Ui, mix: &EnergyMix) {
        let size = egui::vec2(ui.available_width().min(520.0), 260.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        let outer = rect.height() / 2.0 - 10.0;
        let inner = outer * 0.55;
        let center = rect.left_center() + egui::vec2(outer + 10.0, 0.0);
        let total = mix.total();

        let mut hovered = None;
        let mut start = -FRAC_PI_2;
        for (i, slice) in mix.slices.iter().enumerate() {
            let sweep = TAU * (slice.value / total) as f32;
            let color = color32(palette::MIX_COLORS[i % palette::MIX_COLORS.len()]);

            // Ring segment as a triangle strip between the two radii
            let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
            let mut mesh = egui::Mesh::default();
            for s in 0..=steps {
                let angle = start + sweep * s as f32 / steps as f32;
                let dir = egui::vec2(angle.cos(), angle.sin());
                mesh.colored_vertex(center + dir * outer, color);
                mesh.colored_vertex(center + dir * inner, color);
            }
            for s in 0..steps as u32 {
                let base = s * 2;
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base + 1, base + 3, base + 2);
            }
            painter.add(Shape::mesh(mesh));

            if let Some(pos) = response.hover_pos() {
                let offset = pos - center;
                let radius = offset.length();
                let angle = (offset.y.atan2(offset.x) - start).rem_euclid(TAU);
                if radius >= inner && radius <= outer && angle <= sweep {
                    hovered = Some(slice);
                }
            }

            // Legend entry
            let legend_pos = rect.left_top() + egui::vec2(2.0 * outer + 40.0, 40.0 + i as f32 * 28.0);
            painter.rect_filled(
                egui::Rect::from_min_size(legend_pos, egui::vec2(16.0, 16.0)),
                3.0,
                color,
            );
            painter.text(
                legend_pos + egui::vec2(24.0, 8.0),
                Align2::LEFT_CENTER,
                format!(
                    "{}  {} ({:.1}%)",
                    slice.source.label(),
                    format_number(slice.value, 1),
                    slice.value / total * 100.0
                ),
                FontId::proportional(13.0),
                ui.visuals().text_color(),
            );

            start += sweep;
        }

        if let Some(slice) = hovered {
            response.on_hover_text(format!(
                "{}: {}",
                slice.source.label(),
                format_number(slice.value, 2)
            ));
        }
    }

    /// One tile per ISO-3 code, colored on the plasma scale
    pub fn draw_tile_map(ui: &mut egui::Ui, map: &MapView) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(3.0, 3.0);
            for tile in &map.tiles {
                let (rect, response) = ui.allocate_exact_size(TILE_SIZE, Sense::hover());
                let fill = palette::plasma(tile.intensity);
                ui.painter().rect_filled(rect, 3.0, color32(fill));
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &tile.code,
                    FontId::monospace(11.0),
                    color32(palette::contrast_text(fill)),
                );
                response.on_hover_text(format!(
                    "{}\nTotal: {} GW",
                    tile.entity,
                    format_number(tile.total_gw, 1)
                ));
            }
        });

        ui.add_space(8.0);
        Self::draw_color_scale(ui, map.min_gw, map.max_gw);
    }

    fn draw_color_scale(ui: &mut egui::Ui, min: f64, max: f64) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} GW", format_number(min, 1))).size(11.0));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 12.0), Sense::hover());
            let segments = 48;
            let width = rect.width() / segments as f32;
            for i in 0..segments {
                let x = rect.left() + i as f32 * width;
                let segment = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(width + 0.5, rect.height()),
                );
                let t = i as f64 / (segments - 1) as f64;
                ui.painter().rect_filled(segment, 0.0, color32(palette::plasma(t)));
            }
            ui.label(RichText::new(format!("{} GW", format_number(max, 1))).size(11.0));
        });
    }

    /// Per-source capacity over time
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &TrendView) {
        Plot::new("global_trend")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Capacity (GW)")
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                for series in &trend.series {
                    if series.points.is_empty() {
                        continue;
                    }
                    let points: PlotPoints = series
                        .points
                        .iter()
                        .map(|&(year, gw)| [year as f64, gw])
                        .collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(color32(palette::source_color(series.source)))
                            .width(2.0)
                            .name(series.source.label()),
                    );
                }
            });
    }

    /// Total capacity over time for the top countries
    pub fn draw_growth_chart(ui: &mut egui::Ui, growth: &GrowthView) {
        Plot::new("top_growth")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Total Renewable Capacity (GW)")
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                for (i, series) in growth.series.iter().enumerate() {
                    let color = color32(palette::series_color(i));
                    let points: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .map(|&(year, gw)| [year as f64, gw])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&series.entity),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(3.0)
                            .color(color),
                    );
                }
            });
    }

    /// Horizontal bars, largest at the top
    pub fn draw_leaderboard(ui: &mut egui::Ui, board: &LeaderboardView) {
        let n = board.entries.len();
        // Bar at y = n-1 is rank 0
        let labels: Vec<String> = board.entries.iter().rev().map(|e| e.entity.clone()).collect();
        let color = color32(palette::BAR_COLOR);

        let bars: Vec<Bar> = board
            .entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                Bar::new((n - 1 - rank) as f64, entry.value)
                    .name(&entry.entity)
                    .width(0.7)
                    .fill(color)
            })
            .collect();

        Plot::new("leaderboard")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label("Total Renewable Capacity (GW)")
            .include_x(0.0)
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Total GW"));
            });
    }

    /// GDP per capita (log x) against per-capita capacity, sized by population
    pub fn draw_scatter(ui: &mut egui::Ui, scatter: &ScatterView) {
        let max_population = scatter
            .points
            .iter()
            .map(|p| p.population)
            .fold(0.0_f64, f64::max);

        Plot::new("gdp_scatter")
            .height(CHART_HEIGHT + 60.0)
            .allow_scroll(false)
            .x_axis_label("GDP per Capita (USD, log scale)")
            .y_axis_label("Renewable Capacity per Capita (kW)")
            .x_axis_formatter(|mark, _range| format_number(10f64.powf(mark.value), 0))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    return String::new();
                }
                format!(
                    "{}\nGDP per capita: {}\nkW per capita: {:.2}",
                    name,
                    format_number(10f64.powf(value.x), 0),
                    value.y
                )
            })
            .show(ui, |plot_ui| {
                for (i, point) in scatter.points.iter().enumerate() {
                    let share = if max_population > 0.0 {
                        (point.population / max_population).sqrt()
                    } else {
                        0.0
                    };
                    plot_ui.points(
                        Points::new(vec![[point.gdp_per_capita.log10(), point.capacity_per_capita_kw]])
                            .radius(3.0 + 17.0 * share as f32)
                            .color(color32(palette::series_color(i)).gamma_multiply(0.75))
                            .name(&point.entity),
                    );
                }
            });
    }

    /// Grouped horizontal bars for the two comparison years
    pub fn draw_comparison(ui: &mut egui::Ui, comparison: &ComparisonView) {
        let n = comparison.rows.len();
        let labels: Vec<String> = comparison.rows.iter().rev().map(|r| r.entity.clone()).collect();

        let group = |value: fn(&ComparisonRow) -> Option<f64>, offset: f64| {
            comparison
                .rows
                .iter()
                .enumerate()
                .filter_map(|(rank, row)| {
                    let v = value(row)?;
                    Some(
                        Bar::new((n - 1 - rank) as f64 + offset, v)
                            .name(&row.entity)
                            .width(0.38),
                    )
                })
                .collect::<Vec<Bar>>()
        };
        let before = group(|row| row.before, -0.2);
        let after = group(|row| row.after, 0.2);

        Plot::new("per_capita_comparison")
            .height(CHART_HEIGHT + 40.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label("Renewable Capacity per Capita (kW)")
            .include_x(0.0)
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(before)
                        .horizontal()
                        .color(color32(palette::BEFORE_COLOR))
                        .name(comparison.before_year.to_string()),
                );
                plot_ui.bar_chart(
                    BarChart::new(after)
                        .horizontal()
                        .color(color32(palette::AFTER_COLOR))
                        .name(comparison.after_year.to_string()),
                );
            });
    }
}
