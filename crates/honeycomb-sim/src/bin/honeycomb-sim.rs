//! Honeycomb session simulator
//!
//! Run a scripted session and print the JSON report.
//!
//! ```text
//! honeycomb-sim [items] [script.json]
//! ```

use std::env;

use honeycomb_sim::{default_script, parse_script, SimConfig, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "honeycomb_sim=info,honeycomb_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config = SimConfig::from_env()?;
    if let Some(items) = args.get(1) {
        config.feed.initial_page = items.parse()?;
    }

    let script = match args.get(2) {
        Some(path) => parse_script(&std::fs::read_to_string(path)?)?,
        None => default_script(),
    };

    tracing::info!(
        items = config.feed.initial_page,
        steps = script.len(),
        "starting session"
    );

    let mut sim = Simulation::start(config).await?;
    let report = sim.run(&script).await?;

    tracing::info!(
        frames = report.frames,
        items = report.items,
        events = report.events.len(),
        "session complete"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
