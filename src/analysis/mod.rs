//! The return calculator. Every function here is a pure read of a
//! [`PriceSeries`](crate::data::PriceSeries) and reports problems through
//! [`AnalysisError`](crate::error::AnalysisError) instead of producing NaN,
//! infinity or zero.

pub mod returns;
pub mod window;

pub use returns::{
    average_return, group_by_period, group_by_years, positive_returns, return_shares,
    total_return, PeriodReturn, ReturnShare,
};
pub use window::{compare_around, window_mean, window_stat, Window, WindowStat};
