//! patrol_room — a three-peer room in which patrol authority changes hands.
//!
//! The local process is peer 2.  Peer 1 starts as master, so the local
//! guards sit dormant until peer 1 leaves and authority falls to peer 2.
//! Later the room hands master to peer 3 and back again when peer 3 leaves.
//! Each guard keeps its place on the route across every handoff.
//!
//! Set `RUST_LOG=debug` (or `trace`) to watch the controllers decide.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use pt_authority::AuthorityHub;
use pt_core::{PeerId, Position, SimRng, SimTime, WorldConfig};
use pt_output::{CsvWriter, WorldOutputObserver};
use pt_patrol::load_route_reader;
use pt_sim::{AgentSnapshot, RoomEvent, WorldBuilder, WorldObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const GUARD_COUNT: usize = 3;
const LOCAL_PEER:  PeerId = PeerId(2);
const OUTPUT_DIR:  &str = "output/patrol_room";

const CONFIG_JSON: &str = r#"{
    "tick_duration_secs": 0.1,
    "total_ticks": 600,
    "seed": 7,
    "output_interval_ticks": 10,
    "patrol": {
        "action_interval_secs": 4.0,
        "speed": 3.5,
        "stopping_distance": 0.5,
        "action_duration_secs": 1.0,
        "action_failure_chance": 0.1
    }
}"#;

// A courtyard loop, metres.
const ROUTE_CSV: &str = "\
x,y,z\n\
0,0,0\n\
12,0,0\n\
12,0,8\n\
6,0,14\n\
0,0,8\n\
";

// Room timeline as seen by the local peer.
const ROOM_EVENTS_JSON: &str = r#"[
    { "at": 12.0, "kind": { "leave": 1 } },
    { "at": 30.0, "kind": { "set_master": 3 } },
    { "at": 45.0, "kind": { "leave": 3 } }
]"#;

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Counts rows and handoffs, logs room changes, and forwards every callback
/// to `inner`.
struct RoomObserver<O: WorldObserver> {
    inner:         O,
    snapshot_rows: usize,
    summary_rows:  usize,
    handoffs:      usize,
    last_active:   Option<usize>,
}

impl<O: WorldObserver> RoomObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, handoffs: 0, last_active: None }
    }
}

impl<O: WorldObserver> WorldObserver for RoomObserver<O> {
    fn on_room_event(&mut self, now: SimTime, event: &RoomEvent) {
        info!(%now, kind = ?event.kind, "room changed");
        self.inner.on_room_event(now, event);
    }

    fn on_tick_end(&mut self, tick: u64, now: SimTime, active: usize) {
        if self.last_active.is_some_and(|prev| (prev == 0) != (active == 0)) {
            self.handoffs += 1;
            info!(%now, active, "authority handoff reached the guards");
        }
        self.last_active = Some(active);
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, now, active);
    }

    fn on_snapshot(&mut self, now: SimTime, agents: &[AgentSnapshot]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(now, agents);
    }

    fn on_tick_start(&mut self, tick: u64, now: SimTime) {
        self.inner.on_tick_start(tick, now);
    }

    fn on_sim_end(&mut self, final_time: SimTime) {
        self.inner.on_sim_end(final_time);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== patrol_room — patrol_rs authority handoff ===");

    // 1. Config and route.
    let config = WorldConfig::from_json_str(CONFIG_JSON)?;
    let route = load_route_reader(Cursor::new(ROUTE_CSV))?;
    println!(
        "Guards: {GUARD_COUNT}  |  Waypoints: {}  |  Duration: {}  |  Seed: {}",
        route.len(),
        config.end_time(),
        config.seed,
    );

    // 2. Room: peers 1, 2 (local), 3 with peer 1 as master.
    let hub = AuthorityHub::new(LOCAL_PEER);
    hub.join(PeerId(1));
    hub.join(PeerId(3));
    hub.set_master(PeerId(1), SimTime::ZERO);
    let room_events: Vec<RoomEvent> = serde_json::from_str(ROOM_EVENTS_JSON)?;
    println!("Room: peers {:?}, master {:?}, {} scheduled changes", hub.peers(), hub.master(), room_events.len());
    println!();

    // 3. Spawns: jittered around the first waypoint.
    let mut rng = SimRng::new(config.seed);
    let origin = route.get(0);
    let spawns: Vec<Position> = (0..GUARD_COUNT)
        .map(|_| {
            Position::new(
                origin.x + rng.gen_range(-1.5..=1.5),
                origin.y,
                origin.z + rng.gen_range(-1.5..=1.5),
            )
        })
        .collect();

    // 4. Build world.
    let mut world = WorldBuilder::new(config, route, hub)
        .agent_count(GUARD_COUNT)
        .spawn_positions(spawns)
        .room_events(room_events)
        .build()?;

    // 5. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = RoomObserver::new(WorldOutputObserver::new(writer));

    // 6. Run.
    let t0 = Instant::now();
    world.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!("Simulation complete in {:.3} s ({} handoffs)", elapsed.as_secs_f64(), obs.handoffs);
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();

    println!("{:<8} {:<8} {:<10} {:<8} {:<8} {}", "Guard", "State", "Waypoint", "Moves", "Actions", "Position");
    println!("{}", "-".repeat(64));
    for s in world.snapshots() {
        println!(
            "{:<8} {:<8} {:<10} {:<8} {:<8} {}",
            s.agent.0,
            format!("{:?}", s.state),
            s.waypoint,
            s.move_commands,
            s.actions_performed,
            s.position,
        );
    }

    Ok(())
}
