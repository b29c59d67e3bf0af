//! Charts module - Chart rendering

mod axis;
mod palette;
mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
