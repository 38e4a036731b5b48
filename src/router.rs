//! Branch-decision functions.
//!
//! Routers are pure: they read the snapshot's flags and name the next
//! branch. They run between phases, after the flag-setting node has already
//! been merged, so each decision reflects the latest message at decision
//! time.

use crate::state::StateSnapshot;

/// Outcome of the validity decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// Outcome of the intent decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Weather,
    Year,
}

/// Routes on query validity.
#[must_use]
pub fn route_validation(snapshot: &StateSnapshot) -> Validity {
    if snapshot.is_valid {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}

/// Routes on whether weather data is required.
#[must_use]
pub fn route_intent(snapshot: &StateSnapshot) -> Intent {
    if snapshot.needs_weather {
        Intent::Weather
    } else {
        Intent::Year
    }
}
