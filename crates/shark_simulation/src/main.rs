//! Headless симуляция акулы
//!
//! Запускает Bevy App без рендера: демо-сцена, 3000 fixed тиков (60 секунд).
//!
//! Usage: shark_simulation [seed] [config.json]

use bevy::prelude::*;
use shark_simulation::scenario::{DemoSharkConfig, ScenarioPlugin};
use shark_simulation::{
    create_headless_app, log_error, log_info, BiteLanded, Kinematics, SharkAi, SharkConfig, SimulationPlugin,
};

const TICKS: u32 = 3000;

/// Счётчик укусов для итоговой сводки
#[derive(Resource, Default)]
struct BiteCount(u32);

fn count_bites(mut events: EventReader<BiteLanded>, mut count: ResMut<BiteCount>) {
    count.0 += events.read().count() as u32;
}

fn load_config(path: &str) -> Option<SharkConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log_error(&format!("Failed to read config '{}': {}", path, err));
            return None;
        }
    };

    match serde_json::from_str::<SharkConfig>(&text) {
        Ok(config) => Some(config),
        Err(err) => {
            log_error(&format!("Invalid config '{}': {}", path, err));
            None
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse::<u64>().ok()).unwrap_or(42);
    let config = args.next().and_then(|path| load_config(&path)).unwrap_or_default();

    println!("Starting shark headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(DemoSharkConfig(config))
        .init_resource::<BiteCount>()
        .add_plugins((SimulationPlugin, ScenarioPlugin))
        .add_systems(FixedUpdate, count_bites.after(shark_simulation::ai::shark_ai_tick));

    // Первый update: Startup + запуск часов
    app.update();

    for tick in 1..=TICKS {
        app.update();

        if tick % 250 == 0 {
            let world = app.world_mut();
            let mut sharks = world.query::<(&SharkAi, &Kinematics)>();
            for (ai, kinematics) in sharks.iter(world) {
                log_info(&format!(
                    "Tick {}: shark {:?} at ({:.2}, {:.2}), speed {:.2}",
                    tick,
                    ai.state(),
                    kinematics.position.x,
                    kinematics.position.y,
                    kinematics.speed()
                ));
            }
        }
    }

    let bites = app.world().resource::<BiteCount>().0;
    println!("Simulation complete! {} ticks, {} bites", TICKS, bites);
}
