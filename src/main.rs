use std::rc::Rc;

use clap::Parser;
use colored::Colorize;
use storefront_patterns::{
    ArrivalNotice, BlogPublisher, Channel, Console, Delivery, DeliveryError, DeliveryState,
    DesktopNotifier, EmailNotifier, EventManager, Mediator, Product, RouteVisualization,
    TrackingLogger, UserAddress, UserDetails,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the storefront patterns demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// State the delivery starts in (processing, on-route, at-destination)
    #[arg(long, default_value = "processing")]
    from: DeliveryState,

    /// Number of times to advance the delivery
    #[arg(long, default_value_t = 3)]
    steps: usize,

    /// New price announced to the product observers
    #[arg(long, default_value_t = 6969.0)]
    price: f64,

    /// New address relayed through the mediator
    #[arg(long, default_value = "221B Baker Street")]
    address: String,

    /// New blog title dispatched through the event manager
    #[arg(long, default_value = "The Title Changed")]
    title: String,

    /// Print the delivery route as a DOT graph
    #[arg(long)]
    dot: bool,

    /// Print a JSON snapshot of the delivery after the run
    #[arg(long)]
    snapshot: bool,

    /// Enable debug logging, ignoring RUST_LOG
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), DeliveryError> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("{}", "Storefront Patterns Demonstration".green().bold());
    println!("=====================================");

    let console: Rc<dyn Channel> = Rc::new(Console);

    delivery_demo(&args, &console)?;
    price_demo(args.price, &console);
    mediator_demo(&args.address);
    blog_demo(&args.title, &console);

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Send log output to stderr, filtered by `RUST_LOG` unless `verbose` is set
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Walks a package along the delivery route
fn delivery_demo(args: &Args, console: &Rc<dyn Channel>) -> Result<(), DeliveryError> {
    println!("{}", "\nDelivery tracking".yellow().bold());

    let mut delivery = Delivery::new(args.from);
    delivery.register_observer(Box::new(TrackingLogger));
    delivery.register_observer(Box::new(ArrivalNotice::new(Rc::clone(console))));

    println!("Starting at: {}", delivery.current_location().cyan());
    for step in 1..=args.steps {
        delivery.advance();
        println!("After step {step}: {}", delivery.current_location().cyan());
    }

    println!("\nRoute: {}", RouteVisualization::route_summary(&delivery));
    println!("\n{}", RouteVisualization::history_table(delivery.get_history()));

    if args.dot {
        println!("{}", RouteVisualization::generate_dot(&delivery, true));
    }

    if args.snapshot {
        println!("{}", delivery.to_json()?);
    }

    Ok(())
}

/// Announces a price change to an email and a desktop notifier
fn price_demo(price: f64, console: &Rc<dyn Channel>) {
    println!("{}", "\nPrice notifications".yellow().bold());

    let product = Rc::new(Product::new("Hard Disk", 0.0));
    product.register(Rc::new(EmailNotifier::new(&product, Rc::clone(console))));
    product.register(Rc::new(DesktopNotifier::new(&product, Rc::clone(console))));

    product.set_price(price);
}

/// Relays an address change into a dependent shipping address
fn mediator_demo(address: &str) {
    println!("{}", "\nAddress mediator".yellow().bold());

    let details = UserDetails::new("Unknown");
    let shipping = Rc::new(UserAddress::new());
    let mediator = Mediator::connect(details.observable(), Rc::clone(&shipping));

    details.change_address(address);
    println!("User address:     {}", details.address());
    println!("Shipping address: {}", shipping.address());

    details.observable().unregister(&mediator);
    details.change_address("Somewhere else");
    println!(
        "After unregistering, user moved to {} but shipping stays at {}",
        details.address(),
        shipping.address()
    );
}

/// Dispatches a blog title change to a subscribed listener
fn blog_demo(title: &str, console: &Rc<dyn Channel>) {
    println!("{}", "\nBlog events".yellow().bold());

    let events = Rc::new(EventManager::new());
    let sink = Rc::clone(console);
    events.listen(BlogPublisher::TITLE_UPDATED, move |blog: &BlogPublisher| {
        sink.deliver(&format!("Title updated: {}", blog.title()));
    });

    let blog = BlogPublisher::new(events);
    blog.set_title(title);
}
