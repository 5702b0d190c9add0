//! Application services composed into `AppState`.

pub mod catalog;
pub mod enhance;
pub mod mock;
pub mod tokens;
