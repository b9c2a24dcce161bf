use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{delivery_state::DeliveryState, observers::DeliveryObserver};

/// Errors raised at the parsing and snapshot edges of a delivery
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The given name does not match any delivery state
    #[error("unknown delivery state: {0:?}")]
    UnknownState(String),
    /// A snapshot could not be written or read back
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Represents a state transition of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StateTransition {
    /// The state before the transition
    pub from: DeliveryState,
    /// The state after the transition
    pub to: DeliveryState,
}

/// Serializable representation of a delivery
#[derive(Debug, Deserialize, Serialize)]
struct SerializableDelivery {
    /// State the delivery is currently in
    state: DeliveryState,
    /// Record of state transition history
    history: Vec<StateTransition>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
}

/// A package moving through the delivery route
///
/// The delivery only holds its current state; which state comes next is
/// decided by [`DeliveryState::next`].
pub struct Delivery {
    /// State the delivery is currently in
    state: DeliveryState,
    /// Record of state transition history
    history: Vec<StateTransition>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Registered transition observers
    observers: Vec<Box<dyn DeliveryObserver>>,
}

// Manual implementation of Debug for Delivery
impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("state", &self.state)
            .field("history", &self.history)
            .field("max_history_size", &self.max_history_size)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Delivery {
    /// Number of history entries kept unless configured otherwise
    pub const DEFAULT_MAX_HISTORY: usize = 100;

    /// Create a new delivery in the given initial state
    #[must_use]
    pub fn new(initial_state: DeliveryState) -> Self {
        Self {
            state: initial_state,
            history: Vec::new(),
            max_history_size: Self::DEFAULT_MAX_HISTORY,
            observers: Vec::new(),
        }
    }

    /// Limit the number of history entries kept
    #[must_use]
    pub fn with_max_history(mut self, max_history_size: usize) -> Self {
        self.max_history_size = max_history_size;
        self.trim_history();
        self
    }

    /// Register an observer to be notified of state changes
    pub fn register_observer(&mut self, observer: Box<dyn DeliveryObserver>) {
        self.observers.push(observer);
    }

    /// Get the current state of the delivery
    #[must_use]
    pub fn current_state(&self) -> DeliveryState {
        self.state
    }

    /// Get the location reported by the current state
    #[must_use]
    pub fn current_location(&self) -> &'static str {
        self.state.location()
    }

    /// Whether the package has reached its final destination
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.state.is_terminal()
    }

    /// Move the delivery to the next state on the route
    ///
    /// Advancing a delivered package leaves it where it is; nothing is
    /// recorded and no observer is called.
    pub fn advance(&mut self) -> DeliveryState {
        let from = self.state;
        let to = from.next();

        if from == to {
            debug!(state = %from, "delivery already at final state");
            return to;
        }

        self.state = to;
        self.history.push(StateTransition { from, to });
        self.trim_history();

        info!(%from, %to, location = to.location(), "delivery advanced");

        for observer in &self.observers {
            observer.on_advance(from, to);
        }

        to
    }

    /// Get the recorded transition history, oldest first
    #[must_use]
    pub fn get_history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Get the history size limit
    #[must_use]
    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Serialize the state and history to JSON
    ///
    /// Observers are not part of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `DeliveryError::Snapshot` if serialization fails
    pub fn to_json(&self) -> Result<String, DeliveryError> {
        let snapshot = SerializableDelivery {
            state: self.state,
            history: self.history.clone(),
            max_history_size: self.max_history_size,
        };

        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Restore a delivery from a JSON snapshot
    ///
    /// Observers need to be re-attached after loading.
    ///
    /// # Errors
    ///
    /// Returns a `DeliveryError::Snapshot` if the JSON is malformed or does
    /// not describe a delivery
    pub fn from_json(json: &str) -> Result<Self, DeliveryError> {
        let snapshot: SerializableDelivery = serde_json::from_str(json)?;

        let mut delivery = Self {
            state: snapshot.state,
            history: snapshot.history,
            max_history_size: snapshot.max_history_size,
            observers: Vec::new(),
        };
        delivery.trim_history();

        debug!(state = %delivery.state, entries = delivery.history.len(), "delivery restored");
        Ok(delivery)
    }

    /// Drop the oldest entries beyond the history limit
    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(self.max_history_size);
        if excess > 0 {
            self.history = self.history.split_off(excess);
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_location())
    }
}
