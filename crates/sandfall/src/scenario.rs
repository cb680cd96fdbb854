//! Built-in starting layouts for new levels

use glam::IVec2;
use rand_xoshiro::Xoshiro256StarStar;
use sandfall_core::{Level, Pixel, PixelFlags, PixelType};

/// A named level layout
pub struct ScenarioDef {
    pub name: &'static str,
    pub description: &'static str,
    pub generator: fn(&mut Level, &mut Xoshiro256StarStar),
}

pub static SCENARIOS: [ScenarioDef; 5] = [
    ScenarioDef {
        name: "empty",
        description: "Titanium box, nothing inside",
        generator: generate_empty,
    },
    ScenarioDef {
        name: "sandpile",
        description: "Sand and water poured onto rock ledges",
        generator: generate_sandpile,
    },
    ScenarioDef {
        name: "demolition",
        description: "Rock tower with a fuse leading to gunpowder and a battery-armed c4 charge",
        generator: generate_demolition,
    },
    ScenarioDef {
        name: "circuit",
        description: "Battery driving solder wires through a diode and a relay",
        generator: generate_circuit,
    },
    ScenarioDef {
        name: "chemistry",
        description: "Acid eating dirt, lava boiling water, oil on fire",
        generator: generate_chemistry,
    },
];

pub fn find(name: &str) -> Option<&'static ScenarioDef> {
    SCENARIOS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

pub fn list() {
    println!("Available scenarios:");
    println!();
    for scenario in &SCENARIOS {
        println!("  {:<12} {}", scenario.name, scenario.description);
    }
}

fn fill_rect(level: &mut Level, rng: &mut Xoshiro256StarStar, min: IVec2, size: IVec2, kind: PixelType) {
    let world = level.pixels_mut();
    for y in min.y..min.y + size.y {
        for x in min.x..min.x + size.x {
            let pos = IVec2::new(x, y);
            if world.is_valid_pixel(pos) {
                world.set(pos, Pixel::new(kind, rng));
            }
        }
    }
}

/// Titanium walls around the whole level
fn enclose(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    let width = level.pixels().width();
    let height = level.pixels().height();
    fill_rect(level, rng, IVec2::ZERO, IVec2::new(width, 2), PixelType::TITANIUM);
    fill_rect(level, rng, IVec2::new(0, height - 2), IVec2::new(width, 2), PixelType::TITANIUM);
    fill_rect(level, rng, IVec2::ZERO, IVec2::new(2, height), PixelType::TITANIUM);
    fill_rect(level, rng, IVec2::new(width - 2, 0), IVec2::new(2, height), PixelType::TITANIUM);
}

fn generate_empty(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    enclose(level, rng);
}

fn generate_sandpile(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    enclose(level, rng);
    let width = level.pixels().width();
    let height = level.pixels().height();

    // Ledges
    fill_rect(level, rng, IVec2::new(width / 8, height / 2), IVec2::new(width / 4, 6), PixelType::ROCK);
    fill_rect(level, rng, IVec2::new(width * 5 / 8, height * 2 / 3), IVec2::new(width / 4, 6), PixelType::ROCK);

    // Sand above the first ledge, water above the second
    fill_rect(level, rng, IVec2::new(width / 6, 8), IVec2::new(width / 8, height / 4), PixelType::SAND);
    fill_rect(level, rng, IVec2::new(width * 2 / 3, 8), IVec2::new(width / 8, height / 4), PixelType::WATER);
    fill_rect(level, rng, IVec2::new(width / 2 - 4, 8), IVec2::new(8, 16), PixelType::DIRT);

    level.set_spawn_point(IVec2::new(width / 2, height / 4));
}

fn generate_demolition(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    enclose(level, rng);
    let width = level.pixels().width();
    let height = level.pixels().height();
    let floor = height - 2;

    // Tower with a gunpowder core
    let tower = IVec2::new(width / 3, floor - 80);
    fill_rect(level, rng, tower, IVec2::new(40, 80), PixelType::ROCK);
    fill_rect(level, rng, tower + IVec2::new(12, 50), IVec2::new(16, 20), PixelType::GUNPOWDER);

    // Fuse running along the floor into the core, lit at the far end
    let fuse_y = floor - 1;
    fill_rect(level, rng, IVec2::new(8, fuse_y), IVec2::new(tower.x + 12 - 8, 1), PixelType::FUSE);
    fill_rect(level, rng, IVec2::new(tower.x + 12, tower.y + 70), IVec2::new(1, fuse_y - tower.y - 70), PixelType::FUSE);
    let start = IVec2::new(8, fuse_y);
    let world = level.pixels_mut();
    world.visit(start, |p| p.flags.insert(PixelFlags::BURNING));

    // C4 charge armed by a battery through a short solder wire
    let charge = IVec2::new(width * 3 / 4, floor - 12);
    fill_rect(level, rng, charge, IVec2::new(8, 8), PixelType::C4);
    fill_rect(level, rng, charge + IVec2::new(8, 7), IVec2::new(12, 1), PixelType::SOLDER);
    fill_rect(level, rng, charge + IVec2::new(20, 7), IVec2::new(1, 1), PixelType::BATTERY);
    fill_rect(level, rng, charge + IVec2::new(-4, 8), IVec2::new(28, 4), PixelType::ROCK);

    level.set_spawn_point(IVec2::new(width / 8, floor - 20));
}

fn generate_circuit(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    enclose(level, rng);
    let width = level.pixels().width();
    let height = level.pixels().height();
    let y = height / 2;

    fill_rect(level, rng, IVec2::new(8, y), IVec2::new(width - 16, 1), PixelType::SOLDER);
    fill_rect(level, rng, IVec2::new(8, y + 1), IVec2::new(width - 16, 2), PixelType::ROCK);
    fill_rect(level, rng, IVec2::new(8, y), IVec2::new(1, 1), PixelType::BATTERY);

    // One-way section and a relay gap
    fill_rect(level, rng, IVec2::new(width / 3, y), IVec2::new(1, 1), PixelType::DIODE_IN);
    fill_rect(level, rng, IVec2::new(width / 3 + 1, y), IVec2::new(1, 1), PixelType::DIODE_OUT);
    fill_rect(level, rng, IVec2::new(width * 2 / 3, y), IVec2::new(1, 1), PixelType::RELAY);

    // Titanium plate at the far end, carrying power like any conductor
    fill_rect(level, rng, IVec2::new(width - 24, y - 8), IVec2::new(8, 8), PixelType::TITANIUM);
}

fn generate_chemistry(level: &mut Level, rng: &mut Xoshiro256StarStar) {
    enclose(level, rng);
    let width = level.pixels().width();
    let height = level.pixels().height();
    let floor = height - 2;

    // Acid over dirt
    fill_rect(level, rng, IVec2::new(8, floor - 30), IVec2::new(width / 4, 30), PixelType::DIRT);
    fill_rect(level, rng, IVec2::new(12, 8), IVec2::new(width / 6, 12), PixelType::ACID);

    // Lava dropping into a water pool
    fill_rect(level, rng, IVec2::new(width / 2 - 20, floor - 16), IVec2::new(40, 16), PixelType::WATER);
    fill_rect(level, rng, IVec2::new(width / 2 - 6, 8), IVec2::new(12, 10), PixelType::LAVA);

    // Oil slick with coal, lit by an ember
    fill_rect(level, rng, IVec2::new(width * 3 / 4, floor - 10), IVec2::new(width / 6, 10), PixelType::COAL);
    fill_rect(level, rng, IVec2::new(width * 3 / 4, floor - 18), IVec2::new(width / 6, 8), PixelType::OIL);
    let ember = Pixel::ember(rng);
    level.pixels_mut().set(IVec2::new(width * 3 / 4 + 4, floor - 24), ember);
}
