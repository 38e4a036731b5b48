//! The five workflow nodes.
//!
//! `validate` and `classify` set the routing flags; `weather`, `year`, and
//! `invalid` are the terminal handlers that append the user-visible reply.

pub mod classify;
pub mod invalid;
pub mod validate;
pub mod weather;
pub mod year;

pub use classify::ClassifyIntent;
pub use invalid::InvalidQuery;
pub use validate::ValidateQuery;
pub use weather::WeatherHandler;
pub use year::CurrentYear;
