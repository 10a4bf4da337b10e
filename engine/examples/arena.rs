//! A headless arena: fighters drift around, bump into each other, and die.
//!
//! Run with `cargo run --example arena`. Set `ARENA_LOG=debug` (or `trace`) to see the ECS's own
//! diagnostics.

use std::rc::Rc;

use log::LevelFilter;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::{
    ecs::{Component, Config, Coordinator, Entity, Event, EventBus, OrPanic, System},
    logging::ChannelLogger,
};

const FIGHTERS: usize = 200;
const ARENA_SIZE: f32 = 100.0;
const TICKS: u32 = 600;
const DT: f32 = 1.0 / 60.0;
const HIT_RANGE: f32 = 1.5;

#[derive(Component, Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, Copy)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Component, Debug, Clone, Copy)]
struct Health(i32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum Team {
    Red,
    Blue,
}

#[derive(Event, Debug, Clone, Copy)]
struct Hit {
    attacker: Entity,
    target: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
struct Died {
    entity: Entity,
    team: Team,
}

type Bus = EventBus<Coordinator>;

/// Integrates velocity and bounces off the arena walls.
struct Movement;

impl System for Movement {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], dt: f32) {
        for &entity in entities {
            let mut velocity = *coordinator.get_component::<Velocity>(entity).or_panic();
            let position = coordinator.get_component_mut::<Position>(entity).or_panic();
            position.x += velocity.dx * dt;
            position.y += velocity.dy * dt;
            if !(0.0..ARENA_SIZE).contains(&position.x) {
                velocity.dx = -velocity.dx;
                position.x = position.x.clamp(0.0, ARENA_SIZE);
            }
            if !(0.0..ARENA_SIZE).contains(&position.y) {
                velocity.dy = -velocity.dy;
                position.y = position.y.clamp(0.0, ARENA_SIZE);
            }
            *coordinator.get_component_mut::<Velocity>(entity).or_panic() = velocity;
        }
    }
}

/// Emits a hit for every pair of opposing fighters in range.
struct Combat {
    events: Rc<Bus>,
}

impl System for Combat {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &[Entity], _dt: f32) {
        for (i, &a) in entities.iter().enumerate() {
            let pa = *coordinator.get_component::<Position>(a).or_panic();
            let ta = *coordinator.get_component::<Team>(a).or_panic();
            for &b in &entities[i + 1..] {
                if *coordinator.get_component::<Team>(b).or_panic() == ta {
                    continue;
                }
                let pb = coordinator.get_component::<Position>(b).or_panic();
                let (dx, dy) = (pa.x - pb.x, pa.y - pb.y);
                if dx * dx + dy * dy <= HIT_RANGE * HIT_RANGE {
                    self.events.enqueue(Hit { attacker: a, target: b });
                    self.events.enqueue(Hit { attacker: b, target: a });
                }
            }
        }
    }
}

#[derive(Default)]
struct Scoreboard {
    red_losses: u32,
    blue_losses: u32,
}

impl System for Scoreboard {}

fn wire_listeners(bus: &Rc<Bus>) {
    let weak = Rc::downgrade(bus);
    bus.subscribe::<Hit, _>(move |coordinator, hit| {
        // Both sides of a mutual hit are queued; the second may land on a corpse.
        let Ok(health) = coordinator.get_component_mut::<Health>(hit.target) else {
            return;
        };
        if health.0 <= 0 {
            return;
        }
        health.0 -= 10;
        if health.0 <= 0 {
            let team = *coordinator.get_component::<Team>(hit.target).or_panic();
            log::debug!("{} was taken out by {}", hit.target, hit.attacker);
            if let Some(bus) = weak.upgrade() {
                bus.enqueue(Died {
                    entity: hit.target,
                    team,
                });
            }
        }
    });

    bus.subscribe::<Died, _>(|coordinator, died| {
        coordinator.destroy_entity(died.entity);
        let scoreboard = coordinator.get_system_mut::<Scoreboard>().or_panic();
        match died.team {
            Team::Red => scoreboard.red_losses += 1,
            Team::Blue => scoreboard.blue_losses += 1,
        }
    });
}

fn spawn(coordinator: &mut Coordinator, rng: &mut ChaCha8Rng) {
    for i in 0..FIGHTERS {
        let fighter = coordinator.create_entity().or_panic();
        coordinator
            .add_component(
                fighter,
                Position {
                    x: rng.gen_range(0.0..ARENA_SIZE),
                    y: rng.gen_range(0.0..ARENA_SIZE),
                },
            )
            .or_panic();
        coordinator
            .add_component(
                fighter,
                Velocity {
                    dx: rng.gen_range(-20.0..20.0),
                    dy: rng.gen_range(-20.0..20.0),
                },
            )
            .or_panic();
        coordinator.add_component(fighter, Health(30)).or_panic();
        let team = if i % 2 == 0 { Team::Red } else { Team::Blue };
        coordinator.add_component(fighter, team).or_panic();
    }
}

fn log_level() -> LevelFilter {
    std::env::var("ARENA_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn main() {
    let logs = ChannelLogger::install(log_level()).expect("logger already installed");

    let mut coordinator = Coordinator::new(Config::default().with_max_entities(FIGHTERS));
    coordinator.register_component::<Position>().or_panic();
    coordinator.register_component::<Velocity>().or_panic();
    coordinator.register_component::<Health>().or_panic();
    coordinator.register_component::<Team>().or_panic();

    let bus = Rc::new(Bus::new());
    wire_listeners(&bus);

    coordinator.register_system(Movement).or_panic();
    let required = coordinator.signature_of::<(Position, Velocity)>().or_panic();
    coordinator.set_system_signature::<Movement>(required).or_panic();

    coordinator
        .register_system(Combat {
            events: Rc::clone(&bus),
        })
        .or_panic();
    let required = coordinator
        .signature_of::<(Position, Health, Team)>()
        .or_panic();
    coordinator.set_system_signature::<Combat>(required).or_panic();

    coordinator.register_system(Scoreboard::default()).or_panic();

    let mut rng = ChaCha8Rng::seed_from_u64(0xA4E7A);
    spawn(&mut coordinator, &mut rng);

    for tick in 0..TICKS {
        coordinator.update_system::<Movement>(DT).or_panic();
        coordinator.update_system::<Combat>(DT).or_panic();

        // Hits resolve, then deaths they caused.
        bus.flush(&mut coordinator);
        bus.flush(&mut coordinator);
        coordinator.flush_destroyed_entities().or_panic();

        for message in logs.try_iter() {
            println!("[{:>5}] {}", message.level, message.message);
        }
        if tick % 60 == 0 {
            println!(
                "t={:>4.1}s alive={}",
                tick as f32 * DT,
                coordinator.entity_count()
            );
        }
    }

    let scoreboard = coordinator.get_system::<Scoreboard>().or_panic();
    println!(
        "done: {} left standing, red lost {}, blue lost {}",
        coordinator.entity_count(),
        scoreboard.red_losses,
        scoreboard.blue_losses
    );
}
