//! Domain types shared by every pipeline stage.

pub mod bar;
pub mod history;
pub mod series;

pub use bar::Bar;
pub use history::PriceHistory;
pub use series::DatedSeries;
