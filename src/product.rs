use std::{
    cell::{Cell, RefCell},
    fmt, ptr,
    rc::Rc,
};

use tracing::debug;

use crate::observers::ProductObserver;

/// A product whose price changes are broadcast to registered observers
pub struct Product {
    /// Display name of the product
    name: String,
    /// Current price
    price: Cell<f64>,
    /// Registered observers in registration order, duplicates included
    observers: RefCell<Vec<Rc<dyn ProductObserver>>>,
}

// Manual implementation of Debug for Product
impl fmt::Debug for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Product")
            .field("name", &self.name)
            .field("price", &self.price.get())
            .field("observers_count", &self.observer_count())
            .finish()
    }
}

impl Product {
    /// Create a product with a starting price and no observers
    #[must_use]
    pub fn new(name: &str, price: f64) -> Self {
        Self { name: name.to_string(), price: Cell::new(price), observers: RefCell::new(Vec::new()) }
    }

    /// Get the product name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current price
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price.get()
    }

    /// Append an observer to the notification list
    ///
    /// The same observer registered twice is notified twice.
    pub fn register(&self, observer: Rc<dyn ProductObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Remove every registration of `observer`
    ///
    /// Observers are matched by identity. Unknown observers are ignored.
    pub fn unregister<O: ProductObserver + ?Sized>(&self, observer: &Rc<O>) {
        self.observers
            .borrow_mut()
            .retain(|registered| !ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(observer)));
    }

    /// Number of registrations, duplicates included
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Change the price and notify every observer in registration order
    ///
    /// Observers run against a snapshot of the list taken here, so an
    /// observer may register, unregister or change the price again without
    /// disturbing the current round.
    pub fn set_price(&self, price: f64) {
        self.price.set(price);

        let observers: Vec<Rc<dyn ProductObserver>> = self.observers.borrow().clone();
        debug!(product = %self.name, price, observers = observers.len(), "price changed");

        for observer in &observers {
            observer.update();
        }
    }
}
