//! Live Feed Example
//!
//! Starts the feed on the bundled snapshot with a one-second tick and
//! prints the fleet summary a few times before stopping.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p dualray-feed --example 02_live_feed
//! ```

use std::time::Duration;

use dualray_feed::{FeedConfig, FeedError, LiveFeed, StaticSource};

const SNAPSHOT: &str = include_str!("../../data/dual_ray_swarm_synthetic.csv");

#[tokio::main]
async fn main() -> Result<(), FeedError> {
    println!("DualRay Live Feed");
    println!("=================\n");

    let config = FeedConfig::default().seed(7).tick_interval_ms(1000);
    let mut feed = LiveFeed::new(config)?;
    feed.start(StaticSource::new(SNAPSHOT))?;

    let handle = feed.handle();
    for round in 1..=3 {
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let (readings, fleet) = handle.read(|hub| (hub.readings().len(), hub.fleet_snapshot()))?;
        println!(
            "round {}: {} readings, {} boats, {} sensors active, avg {:.2} ppm",
            round, readings, fleet.boats, fleet.active_sensors, fleet.average_concentration_ppm
        );
    }

    feed.stop().await?;
    println!("\nstopped");
    Ok(())
}
