use clap::Parser;
use linkseq::OrderedContainer;
use tracing::info;

/// Walk through the operations of an ordered container.
#[derive(Parser, Debug)]
#[command(name = "linkseq", version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let mut container = OrderedContainer::<f32>::new();

    container.append(9.81);
    container.append(42.0);
    container.append(7.25);
    info!(size = container.size(), "container populated");

    display_state(&container, "Initial");

    println!("Total items in the container: {}", container.size());
    println!("Item at index 0: {}", container.get(0)?);

    println!("All elements in the container:");
    let items = container
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>();
    println!("{}", items.join(" "));

    let removed = container.remove(1)?;
    info!(removed, "removed element at index 1");
    display_state(&container, "After removal at index 1");

    println!("Size after removal: {}", container.size());
    println!("Final fingerprint: {}", container.fingerprint());

    Ok(())
}

fn display_state(container: &OrderedContainer<f32>, label: &str) {
    println!("{} contents of the container: {}", label, container.render());
    println!("{} fingerprint: {}", label, container.fingerprint());
}
