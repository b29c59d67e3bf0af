//! Data module - CSV loading, cleaning and caching

mod cache;
mod loader;
mod record;

pub use cache::DataCache;
pub use loader::{LoadWarning, LoadedData};
pub use record::{EnergyRecord, EnergyTable};
