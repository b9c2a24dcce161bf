//! Address change relay between two entities.
//!
//! A [`UserDetails`] does not know who depends on its address. Each
//! [`Mediator`] sits between it and one [`UserAddress`] and copies every
//! change across.

use std::{cell::RefCell, rc::Rc};

use tracing::debug;

/// Entity kept in sync with the address of another entity
#[derive(Debug, Default)]
pub struct UserAddress {
    /// Last address received
    address: RefCell<String>,
}

impl UserAddress {
    /// Create an entity with an empty address
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current address
    #[must_use]
    pub fn address(&self) -> String {
        self.address.borrow().clone()
    }

    /// Replace the current address
    pub fn set_address(&self, address: &str) {
        address.clone_into(&mut self.address.borrow_mut());
    }
}

/// Ordered list of mediators interested in changes to an entity
#[derive(Debug, Default)]
pub struct Observable {
    /// Registered mediators in registration order
    mediators: RefCell<Vec<Rc<Mediator>>>,
}

impl Observable {
    /// Create an observable with no mediators
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mediator to the notification list
    pub fn register(&self, mediator: Rc<Mediator>) {
        self.mediators.borrow_mut().push(mediator);
    }

    /// Remove every registration of `mediator`, matched by identity
    ///
    /// Removing a mediator that was never registered does nothing.
    pub fn unregister(&self, mediator: &Rc<Mediator>) {
        self.mediators.borrow_mut().retain(|registered| !Rc::ptr_eq(registered, mediator));
    }

    /// Whether `mediator` is currently registered
    #[must_use]
    pub fn contains(&self, mediator: &Rc<Mediator>) -> bool {
        self.mediators.borrow().iter().any(|registered| Rc::ptr_eq(registered, mediator))
    }

    /// Number of registered mediators
    #[must_use]
    pub fn len(&self) -> usize {
        self.mediators.borrow().len()
    }

    /// Whether no mediator is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mediators.borrow().is_empty()
    }

    /// Forward `hint` unchanged to every mediator in registration order
    pub fn notify(&self, hint: &str) {
        let mediators: Vec<Rc<Mediator>> = self.mediators.borrow().clone();
        debug!(hint, mediators = mediators.len(), "relaying change");

        for mediator in &mediators {
            mediator.update(hint);
        }
    }
}

/// Relays changes from an [`Observable`] into one [`UserAddress`]
#[derive(Debug)]
pub struct Mediator {
    /// Entity updated on every notification
    affected: Rc<UserAddress>,
}

impl Mediator {
    /// Create a mediator and register it with `observable`
    ///
    /// Registration happens here: the returned mediator already receives
    /// every notification `observable` sends. Keep the handle to
    /// [`Observable::unregister`] it later.
    #[must_use = "the mediator is already registered; keep the handle to unregister it"]
    pub fn connect(observable: &Observable, affected: Rc<UserAddress>) -> Rc<Self> {
        let mediator = Rc::new(Self { affected });
        observable.register(Rc::clone(&mediator));
        mediator
    }

    /// Entity this mediator writes to
    #[must_use]
    pub fn affected(&self) -> &Rc<UserAddress> {
        &self.affected
    }

    /// Push a changed address into the affected entity
    pub fn update(&self, address: &str) {
        self.affected.set_address(address);
    }
}

/// User profile owning the address other entities follow
#[derive(Debug, Default)]
pub struct UserDetails {
    /// Current address
    address: RefCell<String>,
    /// Mediators to notify when the address changes
    observable: Observable,
}

impl UserDetails {
    /// Create a profile with an initial address and no mediators
    #[must_use]
    pub fn new(address: &str) -> Self {
        Self { address: RefCell::new(address.to_string()), observable: Observable::new() }
    }

    /// Get the current address
    #[must_use]
    pub fn address(&self) -> String {
        self.address.borrow().clone()
    }

    /// Mediators registered on this profile
    #[must_use]
    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    /// Store a new address and relay it to every registered mediator
    pub fn change_address(&self, new_address: &str) {
        new_address.clone_into(&mut self.address.borrow_mut());
        self.observable.notify(new_address);
    }
}
