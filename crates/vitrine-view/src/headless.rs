use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;
use vitrine_shapes::build_renderable;
use vitrine_view::{
    InputEvent, JsonFileStore, MemoryStore, PreferenceStore, Showcase, ShowcaseConfig,
    WireframeRenderer,
};

use crate::cli::{DescribeArgs, HeadlessCommand, ReplayArgs, ShowcaseArgs};
use crate::setup::{load_catalog, resolve_layout};

const FRAME: Duration = Duration::from_millis(16);
/// Extra time simulated after the last event so pending resizes land.
const SETTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Deserialize)]
struct TimedEvent {
    at_ms: u64,
    #[serde(flatten)]
    event: InputEvent,
}

pub fn run_headless(args: &ShowcaseArgs, command: HeadlessCommand) -> Result<()> {
    match command {
        HeadlessCommand::List => list(args),
        HeadlessCommand::Describe(describe_args) => describe(args, &describe_args),
        HeadlessCommand::Replay(replay_args) => replay(args, &replay_args),
    }
}

fn list(args: &ShowcaseArgs) -> Result<()> {
    let catalog = load_catalog(args)?;
    for (index, product) in catalog.iter().enumerate() {
        println!(
            "{index}: {} [{}] {}",
            product.name,
            product.category.label(),
            product.price
        );
    }
    Ok(())
}

fn describe(args: &ShowcaseArgs, describe_args: &DescribeArgs) -> Result<()> {
    let catalog = load_catalog(args)?;
    let shape = build_renderable(&catalog, args.product)
        .with_context(|| format!("cannot describe product {}", args.product))?;
    let product = catalog
        .get(args.product)
        .context("product disappeared from catalog")?;
    print_json(
        &serde_json::json!({ "product": product, "shape": shape }),
        describe_args.pretty,
    )
}

fn replay(args: &ShowcaseArgs, replay_args: &ReplayArgs) -> Result<()> {
    let text = std::fs::read_to_string(&replay_args.events)
        .with_context(|| format!("failed to read {}", replay_args.events.display()))?;
    let mut events: Vec<TimedEvent> = serde_json::from_str(&text)
        .with_context(|| format!("invalid event script {}", replay_args.events.display()))?;
    events.sort_by_key(|entry| entry.at_ms);

    let catalog = load_catalog(args)?;
    let store: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let config = ShowcaseConfig {
        initial_product: args.product,
        layout: resolve_layout(args.device, replay_args.width),
    };
    let mut showcase = Showcase::new(config, catalog, store, WireframeRenderer::new());
    if !showcase.attach(replay_args.width, replay_args.height, 1.0) {
        anyhow::bail!(
            "surface {}x{} has no area",
            replay_args.width,
            replay_args.height
        );
    }

    let start = Instant::now();
    let mut clock = start;
    for entry in &events {
        let due = start + Duration::from_millis(entry.at_ms);
        clock = advance(&mut showcase, clock, due);
        showcase.handle(&entry.event, due);
    }
    advance(&mut showcase, clock, clock + SETTLE);

    let frames = showcase.viewport().backend().frames_rendered();
    info!(events = events.len(), frames, "replay finished");
    print_json(&showcase.snapshot(), replay_args.pretty)
}

/// Ticks whole frames from `clock` until `until` and returns the new clock.
fn advance<S: PreferenceStore>(
    showcase: &mut Showcase<WireframeRenderer, S>,
    mut clock: Instant,
    until: Instant,
) -> Instant {
    while clock + FRAME <= until {
        clock += FRAME;
        showcase.tick(clock);
    }
    clock
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
