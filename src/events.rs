use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use tracing::debug;

/// Callback invoked with the payload of a dispatched event
type Listener<E> = Rc<dyn Fn(&E)>;

/// Routes named events to the listeners subscribed to them
pub struct EventManager<E> {
    /// Listeners per event name, in subscription order
    listeners: RefCell<HashMap<String, Vec<Listener<E>>>>,
}

impl<E> Default for EventManager<E> {
    fn default() -> Self {
        Self { listeners: RefCell::new(HashMap::new()) }
    }
}

// Manual implementation of Debug for EventManager
impl<E> fmt::Debug for EventManager<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let mut counts: Vec<(&String, usize)> =
            listeners.iter().map(|(event, list)| (event, list.len())).collect();
        counts.sort();
        f.debug_struct("EventManager").field("listeners", &counts).finish()
    }
}

impl<E> EventManager<E> {
    /// Create a manager with no subscriptions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `event`
    pub fn listen(&self, event: &str, listener: impl Fn(&E) + 'static) {
        self.listeners.borrow_mut().entry(event.to_string()).or_default().push(Rc::new(listener));
    }

    /// Number of listeners subscribed to `event`
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.borrow().get(event).map_or(0, Vec::len)
    }

    /// Call every listener of `event` with `payload`, returning how many ran
    ///
    /// Listeners subscribed while the dispatch is running are only called on
    /// the next dispatch. Events nobody listens to are ignored.
    pub fn dispatch(&self, event: &str, payload: &E) -> usize {
        let listeners: Vec<Listener<E>> =
            self.listeners.borrow().get(event).cloned().unwrap_or_default();
        debug!(event, listeners = listeners.len(), "dispatching event");

        for listener in &listeners {
            listener(payload);
        }

        listeners.len()
    }
}

/// A blog post that announces title changes through an [`EventManager`]
#[derive(Debug)]
pub struct BlogPublisher {
    /// Current title
    title: RefCell<String>,
    /// Where title changes are announced
    events: Rc<EventManager<Self>>,
}

impl BlogPublisher {
    /// Event dispatched after every title change
    pub const TITLE_UPDATED: &'static str = "blog_title_update";

    /// Create an untitled post announcing through `events`
    #[must_use]
    pub fn new(events: Rc<EventManager<Self>>) -> Self {
        Self { title: RefCell::new(String::new()), events }
    }

    /// Get the current title
    #[must_use]
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Change the title and announce it to listeners of [`Self::TITLE_UPDATED`]
    pub fn set_title(&self, title: &str) {
        title.clone_into(&mut self.title.borrow_mut());
        let notified = self.events.dispatch(Self::TITLE_UPDATED, self);
        debug!(notified, "blog title updated");
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{BlogPublisher, EventManager};
    use crate::channel::{Channel, Recorder};

    #[test]
    fn test_title_change_reaches_listener() {
        let events = Rc::new(EventManager::new());
        let recorder = Rc::new(Recorder::new());
        let sink = Rc::clone(&recorder);
        events.listen(BlogPublisher::TITLE_UPDATED, move |blog: &BlogPublisher| {
            sink.deliver(&blog.title());
        });

        let blog = BlogPublisher::new(Rc::clone(&events));
        blog.set_title("The Title Changed");

        assert_eq!(recorder.lines(), vec!["The Title Changed".to_string()]);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let events: EventManager<u32> = EventManager::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            events.listen("tick", move |n: &u32| calls.borrow_mut().push(format!("{tag}:{n}")));
        }

        let ran = events.dispatch("tick", &7);

        assert_eq!(ran, 3);
        assert_eq!(*calls.borrow(), vec!["first:7", "second:7", "third:7"]);
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let events: EventManager<u32> = EventManager::new();
        events.listen("tick", |_: &u32| {});

        assert_eq!(events.dispatch("tock", &1), 0);
        assert_eq!(events.listener_count("tick"), 1);
        assert_eq!(events.listener_count("tock"), 0);
    }

    #[test]
    fn test_listener_added_during_dispatch_waits_for_next_round() {
        let events: Rc<EventManager<u32>> = Rc::new(EventManager::new());
        let hits = Rc::new(RefCell::new(0_u32));

        let manager = Rc::downgrade(&events);
        let counter = Rc::clone(&hits);
        events.listen("tick", move |_: &u32| {
            if let Some(manager) = manager.upgrade() {
                let counter = Rc::clone(&counter);
                manager.listen("tick", move |_: &u32| *counter.borrow_mut() += 1);
            }
        });

        assert_eq!(events.dispatch("tick", &0), 1);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(events.listener_count("tick"), 2);

        assert_eq!(events.dispatch("tick", &0), 2);
        assert_eq!(*hits.borrow(), 1);
    }
}
