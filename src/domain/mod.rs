pub mod interval;
pub mod range;
pub mod series;
pub mod stock;

pub use interval::Interval;
pub use range::{date_range, DateRange, DATE_FMT};
pub use series::{PriceRecord, StockSeries};
pub use stock::Stock;
