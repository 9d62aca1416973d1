/// CSV export of hourly run records.
pub mod export;
