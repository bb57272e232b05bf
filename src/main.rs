//! Node-Controller Demo.
//!
//! Headless-Lauf mit zwei Kontexten: ein Simulations-Thread besitzt das
//! Straßennetz und veröffentlicht pro Tick den aufgelösten Control-Point,
//! der Haupt-Thread spielt den Frame-Kontext mit Klicks und Overlay.

use glam::Vec3;
use node_controller::{
    ActionQueue, LogPanel, NetNode, NetworkPrefab, NodeControllerTool, NodeFlags, RoadNetwork,
    ToolInput, ToolOptions,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

const SIMULATION_TICK: Duration = Duration::from_millis(5);
const FRAME_TIME: Duration = Duration::from_millis(16);
const FRAME_COUNT: u32 = 120;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Node-Controller Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let options = ToolOptions::load_from_file(&ToolOptions::config_path());
    let world = Arc::new(RwLock::new(demo_network()));
    let queue: ActionQueue<RoadNetwork> = ActionQueue::new();

    let (mut tool, producer) =
        NodeControllerTool::<RoadNetwork, _>::create(options.clone(), queue.sender(), LogPanel);
    let running = Arc::new(AtomicBool::new(true));

    let simulation = {
        let world = Arc::clone(&world);
        let running = Arc::clone(&running);
        let pick_radius = options.hover_pick_radius;
        thread::Builder::new()
            .name("simulation".into())
            .spawn(move || {
                let mut tick: u64 = 0;
                while running.load(Ordering::Acquire) {
                    if let Ok(mut net) = world.write() {
                        queue.run_pending(&mut *net);
                    }
                    if let Ok(net) = world.read() {
                        let hover = net.hover_at(cursor_at(tick), pick_radius);
                        producer.simulation_step(&hover, &*net);
                    }
                    tick += 1;
                    thread::sleep(SIMULATION_TICK);
                }
                log::info!("Simulation beendet nach {} Ticks", tick);
            })?
    };

    let lock_failed = || anyhow::anyhow!("Straßennetz-Lock vergiftet");
    {
        let net = world.read().map_err(|_| lock_failed())?;
        tool.handle_input(ToolInput::Enable, &net);
    }

    for frame in 0..FRAME_COUNT {
        tool.frame_update();
        let net = world.read().map_err(|_| lock_failed())?;

        let input = match frame % 40 {
            10 | 25 => Some(ToolInput::PrimaryClick),
            39 => Some(ToolInput::SecondaryClick),
            _ => None,
        };
        if let Some(input) = input {
            if let Some(outcome) = tool.handle_input(input, &net) {
                log::info!("Frame {}: {:?} → {:?}", frame, input, outcome);
            }
        }

        let scene = tool.build_overlay(&net);
        log::debug!(
            "Frame {}: {:?}, {} Overlay-Kreis(e), {}",
            frame,
            tool.phase(),
            scene.circles.len(),
            tool.cached_state().control_point
        );
        drop(net);
        thread::sleep(FRAME_TIME);
    }

    {
        let net = world.read().map_err(|_| lock_failed())?;
        tool.handle_input(ToolInput::Disable, &net);
    }
    running.store(false, Ordering::Release);
    simulation
        .join()
        .map_err(|_| anyhow::anyhow!("Simulations-Thread abgebrochen"))?;

    let net = world.read().map_err(|_| lock_failed())?;
    log::info!(
        "Demo beendet: {} Nodes, {} Segmente, {} Zustände veröffentlicht",
        net.node_count(),
        net.segment_count(),
        tool.published_count()
    );
    Ok(())
}

/// Straße mit fünf Nodes entlang X und einer Abzweigung anderen Typs.
fn demo_network() -> RoadNetwork {
    let road = Arc::new(NetworkPrefab::new("Basic Road", 4.0, 8.0, 0.25));
    let avenue = Arc::new(NetworkPrefab::new("Avenue", 8.0, 12.0, 0.2));
    let mut net = RoadNetwork::new();

    for i in 0..5u64 {
        let flags = if i == 0 || i == 4 {
            NodeFlags::MOVEABLE
        } else {
            NodeFlags::MOVEABLE | NodeFlags::MIDDLE
        };
        net.add_node(NetNode::new(
            i + 1,
            Vec3::new(i as f32 * 60.0, 0.0, 0.0),
            0.0,
            flags,
        ));
        if i > 0 {
            net.add_segment(i, i + 1, road.clone());
        }
    }
    net.add_node(NetNode::new(
        6,
        Vec3::new(120.0, 0.0, 80.0),
        2.0,
        NodeFlags::MOVEABLE,
    ));
    net.add_segment(3, 6, avenue);
    net
}

/// Cursor pendelt entlang der Straße, leicht seitlich versetzt.
fn cursor_at(tick: u64) -> Vec3 {
    let phase = (tick % 400) as f32 / 400.0;
    let t = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
    Vec3::new(t * 240.0, 0.0, 3.0)
}
