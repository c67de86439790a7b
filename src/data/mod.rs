pub mod loader;
pub mod observation;
pub mod series;

pub use observation::{Observation, ObservationBuilder};
pub use series::{PriceSeries, YearVolume};
