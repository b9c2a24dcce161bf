use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryError;

/// Represents the stages a package moves through on its way to the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DeliveryState {
    /// Package is being prepared at the warehouse
    Processing,
    /// Package has left the warehouse and is travelling
    OnRoute,
    /// Package has arrived; advancing from here stays here
    AtDestination,
}

impl DeliveryState {
    /// Every state in route order
    pub const ALL: [Self; 3] = [Self::Processing, Self::OnRoute, Self::AtDestination];

    /// The state that follows this one on the route
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Processing => Self::OnRoute,
            Self::OnRoute | Self::AtDestination => Self::AtDestination,
        }
    }

    /// Get the human-readable location of a package in this state
    #[must_use]
    pub fn location(self) -> &'static str {
        match self {
            Self::Processing => "Warehouse",
            Self::OnRoute => "On the train",
            Self::AtDestination => "Final Destination",
        }
    }

    /// Whether advancing from this state is a self-transition
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next() == self
    }

    /// Short name of the state, accepted back by `FromStr`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::OnRoute => "OnRoute",
            Self::AtDestination => "AtDestination",
        }
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeliveryState {
    type Err = DeliveryError;

    /// Parses `on-route`, `on_route` and `OnRoute` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| DeliveryError::UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryState;

    #[test]
    fn test_route_order() {
        assert_eq!(DeliveryState::Processing.next(), DeliveryState::OnRoute);
        assert_eq!(DeliveryState::OnRoute.next(), DeliveryState::AtDestination);
    }

    #[test]
    fn test_terminal_state_loops() {
        let mut state = DeliveryState::AtDestination;
        for _ in 0..5 {
            state = state.next();
            assert_eq!(state, DeliveryState::AtDestination);
        }
        assert!(state.is_terminal());
        assert!(!DeliveryState::Processing.is_terminal());
    }

    #[test]
    fn test_locations() {
        assert_eq!(DeliveryState::Processing.location(), "Warehouse");
        assert_eq!(DeliveryState::OnRoute.location(), "On the train");
        assert_eq!(DeliveryState::AtDestination.location(), "Final Destination");
    }

    #[test]
    fn test_parse_accepts_common_spellings() {
        for input in ["on-route", "on_route", "OnRoute", " on route "] {
            assert_eq!(input.parse::<DeliveryState>().ok(), Some(DeliveryState::OnRoute));
        }
        assert_eq!("processing".parse::<DeliveryState>().ok(), Some(DeliveryState::Processing));
        assert_eq!(
            "At-Destination".parse::<DeliveryState>().ok(),
            Some(DeliveryState::AtDestination)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "lost".parse::<DeliveryState>();
        assert!(matches!(err, Err(crate::DeliveryError::UnknownState(ref name)) if name == "lost"));
    }

    #[test]
    fn test_display_round_trips() {
        for state in DeliveryState::ALL {
            assert_eq!(state.to_string().parse::<DeliveryState>().ok(), Some(state));
        }
    }
}
