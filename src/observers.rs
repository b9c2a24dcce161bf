use std::{
    fmt,
    rc::{Rc, Weak},
};

use tracing::{info, warn};

use crate::{channel::Channel, delivery_state::DeliveryState, product::Product};

/// Trait for delivery transition observation
pub trait DeliveryObserver {
    /// Called when a delivery moves to a different state
    fn on_advance(&self, from: DeliveryState, to: DeliveryState);
}

/// Logs all transitions that occur on a delivery
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackingLogger;

impl DeliveryObserver for TrackingLogger {
    fn on_advance(&self, from: DeliveryState, to: DeliveryState) {
        info!(
            "TRACKING: {} ({}) --> {} ({})",
            from,
            from.location(),
            to,
            to.location()
        );
    }
}

/// Tells the customer once their package has arrived
pub struct ArrivalNotice {
    /// Where the notice is written
    channel: Rc<dyn Channel>,
}

impl fmt::Debug for ArrivalNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrivalNotice").finish_non_exhaustive()
    }
}

impl ArrivalNotice {
    /// Create a notice writing to the given channel
    #[must_use]
    pub fn new(channel: Rc<dyn Channel>) -> Self {
        Self { channel }
    }
}

impl DeliveryObserver for ArrivalNotice {
    fn on_advance(&self, _from: DeliveryState, to: DeliveryState) {
        if to.is_terminal() {
            self.channel.deliver(&format!("Your package has arrived: {}", to.location()));
        }
    }
}

/// Trait for reacting to a product's price change
///
/// Observers are not handed the new price; they read it back from the
/// product they watch, so they always see the price current at call time.
pub trait ProductObserver {
    /// Called once per registration every time the product price changes
    fn update(&self);
}

/// Reads the current price of the watched product, if it still exists
fn current_price(subject: &Weak<Product>, observer: &str) -> Option<f64> {
    let price = subject.upgrade().map(|product| product.price());
    if price.is_none() {
        warn!(observer, "watched product was dropped, skipping update");
    }
    price
}

/// Sends an email line for every price change
pub struct EmailNotifier {
    /// Product being watched; not owned
    subject: Weak<Product>,
    /// Where the email line is written
    channel: Rc<dyn Channel>,
}

impl EmailNotifier {
    /// Create a notifier watching `subject`
    ///
    /// This does not register the notifier; pass it to [`Product::register`].
    #[must_use]
    pub fn new(subject: &Rc<Product>, channel: Rc<dyn Channel>) -> Self {
        Self { subject: Rc::downgrade(subject), channel }
    }
}

impl fmt::Debug for EmailNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailNotifier")
            .field("subject_alive", &(self.subject.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl ProductObserver for EmailNotifier {
    fn update(&self) {
        if let Some(price) = current_price(&self.subject, "email") {
            self.channel.deliver(&format!("New Price: {price}"));
        }
    }
}

/// Pops up a desktop notification for every price change
pub struct DesktopNotifier {
    /// Product being watched; not owned
    subject: Weak<Product>,
    /// Where the pop-up line is written
    channel: Rc<dyn Channel>,
}

impl DesktopNotifier {
    /// Create a notifier watching `subject`
    ///
    /// This does not register the notifier; pass it to [`Product::register`].
    #[must_use]
    pub fn new(subject: &Rc<Product>, channel: Rc<dyn Channel>) -> Self {
        Self { subject: Rc::downgrade(subject), channel }
    }
}

impl fmt::Debug for DesktopNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopNotifier")
            .field("subject_alive", &(self.subject.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl ProductObserver for DesktopNotifier {
    fn update(&self) {
        if let Some(price) = current_price(&self.subject, "desktop") {
            self.channel.deliver(&format!("Desktop Notification Pop-up: New Price: {price}"));
        }
    }
}
