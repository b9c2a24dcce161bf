//! Delivery tracking and change notification patterns for a small storefront.
//!
//! This crate provides a delivery state machine that moves a package from
//! the warehouse to its destination, plus three ways of telling interested
//! parties that something changed: price observers on a [`Product`], an
//! address [`Mediator`], and a named-event [`EventManager`].

pub mod channel;
pub mod delivery;
pub mod delivery_state;
pub mod events;
pub mod mediator;
pub mod observers;
pub mod product;
pub mod visualization;

pub use channel::{Channel, Console, Recorder};
pub use delivery::{Delivery, DeliveryError, StateTransition};
pub use delivery_state::DeliveryState;
pub use events::{BlogPublisher, EventManager};
pub use mediator::{Mediator, Observable, UserAddress, UserDetails};
pub use observers::{
    ArrivalNotice, DeliveryObserver, DesktopNotifier, EmailNotifier, ProductObserver,
    TrackingLogger,
};
pub use product::Product;
pub use visualization::RouteVisualization;
