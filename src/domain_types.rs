pub mod indicators;
pub mod price_table;
pub mod series;
pub mod types;

pub use indicators::{IndicatorsExt, TRADING_DAYS_PER_YEAR};
pub use price_table::{Bar, PriceTable};
pub use series::{ClosingSeries, SeriesNormalizer};
pub use types::{
    ColumnName, DomainError, HorizonBucket, Period, Result, Signal, SignalDirection, Trend,
};
