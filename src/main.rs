use std::sync::Arc;
use std::time::Duration;

use glam::IVec2;
use shimeji::sprite::{ResourceId, SheetLoader, SpriteSheet};
use shimeji::{Bounds, PetError, Simulation, SpeedPreset, TickDriver};

/// Simulated frame interval for the headless run.
const FRAME: Duration = Duration::from_micros(16_667);
/// How long to run (simulated seconds).
const RUN_SECONDS: u64 = 20;
/// Usable area of a phone-sized screen minus status and nav bars.
const SCREEN: Bounds = Bounds {
    left: 0,
    top: 48,
    right: 1080,
    bottom: 2280,
};

/// Procedural sheets: a coloured blob per cell on a grey checkerboard, like
/// assets exported with a fake transparency grid.
struct CheckerLoader;

impl SheetLoader for CheckerLoader {
    fn load(&self, resource: ResourceId) -> Result<SpriteSheet, PetError> {
        let (cols, rows) = match resource.0 {
            1 | 2 => (4, 4),
            3 => (4, 7),
            _ => return Err(PetError::SheetLoad(resource, "no such asset".into())),
        };
        let cell = 32u32;
        let (w, h) = (cols * cell, rows * cell);
        let tint = [[160, 60, 200], [60, 90, 220], [220, 140, 60]][resource.0 as usize - 1];

        let mut pixels = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let (cx, cy) = ((x % cell) as i32 - 16, (y % cell) as i32 - 16);
                let rgb = if cx * cx + cy * cy < 100 {
                    tint
                } else if (x / 8 + y / 8) % 2 == 0 {
                    [255, 255, 255]
                } else {
                    [204, 204, 204]
                };
                pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        SpriteSheet::new(resource, w, h, pixels)
    }
}

fn main() {
    env_logger::init();
    log::info!("shimeji starting up");

    if let Err(e) = run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::new(Arc::new(CheckerLoader));
    sim.set_filter_enabled(true);

    let mut pets = Vec::new();
    let ids: Vec<String> = sim.roster().iter().map(|d| d.id.clone()).collect();
    for id in &ids {
        pets.push(sim.add_pet(id, None, SCREEN)?);
    }

    let mut driver = TickDriver::new(sim.config().tick_ms);
    driver.start();

    let frames = RUN_SECONDS * 1_000_000 / FRAME.as_micros() as u64;
    for frame in 0..frames {
        driver.advance(FRAME, &mut sim, SCREEN);

        // Pick the first pet up for a second, then drop it.
        match frame {
            120 => sim.begin_drag(pets[0])?,
            130 => {
                sim.drag_by(pets[0], IVec2::new(-200, -600), SCREEN)?;
            }
            180 => sim.end_drag(pets[0])?,
            600 => sim.apply_preset(SpeedPreset::Hyper),
            _ => {}
        }

        if driver.pets_visible() {
            let drawn = sim.instances().len();
            if frame % 300 == 0 {
                log::info!("frame {frame}: {drawn}/{} pets drawable", pets.len());
                for pet in sim.pets() {
                    log::info!(
                        "  {} at {} {} emote {:?}",
                        pet.id,
                        pet.position,
                        pet.behavior.label(),
                        pet.emote
                    );
                }
            }
        }

        if frame == 900 {
            driver.snooze(Duration::from_secs(2));
        }
    }

    for pet in pets {
        let last = sim.remove_pet(pet)?;
        log::info!("Last known position {last}");
    }
    driver.stop();
    log::info!("Done: {} ticks", sim.tick_count());
    Ok(())
}
