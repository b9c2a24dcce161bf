//! End-to-end scenarios through the public API.

use std::rc::Rc;

use storefront_patterns::{
    BlogPublisher, Channel, Delivery, DeliveryState, DesktopNotifier, EmailNotifier, EventManager,
    Mediator, Observable, Product, Recorder, UserAddress, UserDetails,
};

#[test]
fn delivery_reports_each_stop_and_stays_delivered() {
    let mut delivery = Delivery::new(DeliveryState::Processing);
    assert_eq!(delivery.current_location(), "Warehouse");

    delivery.advance();
    assert_eq!(delivery.current_location(), "On the train");

    delivery.advance();
    assert_eq!(delivery.current_location(), "Final Destination");

    for _ in 0..10 {
        delivery.advance();
        assert_eq!(delivery.current_location(), "Final Destination");
    }
}

#[test]
fn price_change_reaches_email_then_desktop() {
    let recorder = Rc::new(Recorder::new());
    let product = Rc::new(Product::new("Hard Disk", 0.0));
    product.register(Rc::new(EmailNotifier::new(&product, recorder.clone())));
    product.register(Rc::new(DesktopNotifier::new(&product, recorder.clone())));

    product.set_price(6969.0);

    assert_eq!(
        recorder.lines(),
        vec![
            "New Price: 6969".to_string(),
            "Desktop Notification Pop-up: New Price: 6969".to_string(),
        ]
    );
}

#[test]
fn same_notifier_registered_twice_prints_twice() {
    let recorder = Rc::new(Recorder::new());
    let product = Rc::new(Product::new("Hard Disk", 0.0));
    let email = Rc::new(EmailNotifier::new(&product, recorder.clone()));
    product.register(email.clone());
    product.register(email);

    product.set_price(12.0);

    assert_eq!(recorder.output(), "New Price: 12\nNew Price: 12\n");
}

#[test]
fn mediator_follows_address_without_manual_registration() {
    let details = UserDetails::new("Old Address");
    let shipping = Rc::new(UserAddress::new());
    let _mediator = Mediator::connect(details.observable(), Rc::clone(&shipping));

    details.change_address("New Address");

    assert_eq!(shipping.address(), details.address());
}

#[test]
fn unregistering_stranger_leaves_list_untouched() {
    let details = UserDetails::new("");
    let elsewhere = Observable::new();
    let member = Mediator::connect(details.observable(), Rc::new(UserAddress::new()));
    let stranger = Mediator::connect(&elsewhere, Rc::new(UserAddress::new()));

    details.observable().unregister(&stranger);

    assert_eq!(details.observable().len(), 1);
    assert!(details.observable().contains(&member));
    assert_eq!(elsewhere.len(), 1);
}

#[test]
fn blog_title_update_is_dispatched() {
    let recorder = Rc::new(Recorder::new());
    let events = Rc::new(EventManager::new());
    let sink = Rc::clone(&recorder);
    events.listen(BlogPublisher::TITLE_UPDATED, move |blog: &BlogPublisher| {
        sink.deliver(&blog.title());
    });

    let blog = BlogPublisher::new(events);
    blog.set_title("The Title Changed");

    assert!(recorder.output().contains("The Title Changed"));
}
