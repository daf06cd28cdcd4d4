pub mod delay;
pub mod query;

pub use delay::{DelayHeaders, X_DELAY, X_DELAY_PERCENT, X_SLOWDOWN, X_SLOWDOWN_FROM};
pub use query::LimitQuery;
