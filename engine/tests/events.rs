use std::{cell::Cell, rc::Rc};

use rusty_ecs::ecs::{
    Component, Coordinator, Entity, ErrorKind, Event, EventBus, OrPanic, System,
};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct Score(u32);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct Health(i32);

#[derive(Event, Debug, Clone, Copy)]
struct Scored {
    player: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
struct Hit {
    target: Entity,
    damage: i32,
}

#[derive(Event, Debug, Clone, Copy)]
struct Died {
    entity: Entity,
}

type Bus = EventBus<Coordinator>;

fn world() -> Coordinator {
    let mut coordinator = Coordinator::default();
    coordinator.register_component::<Score>().or_panic();
    coordinator.register_component::<Health>().or_panic();
    coordinator
}

// ==================== Scenarios ====================

#[test]
fn queued_event_runs_once_after_flush() {
    // Given
    let bus = EventBus::<()>::new();
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    bus.subscribe::<Scored, _>(move |_, _| counter.set(counter.get() + 1));

    // When
    bus.publish(&mut (), Scored { player: Entity::new(0) }, false);

    // Then
    assert_eq!(runs.get(), 0);

    // When
    bus.flush(&mut ());

    // Then
    assert_eq!(runs.get(), 1);
    bus.flush(&mut ());
    assert_eq!(runs.get(), 1);
}

#[test]
fn immediate_event_runs_before_publish_returns() {
    let bus = EventBus::<()>::new();
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    bus.subscribe::<Scored, _>(move |_, _| counter.set(counter.get() + 1));

    bus.publish(&mut (), Scored { player: Entity::new(0) }, true);

    assert_eq!(runs.get(), 1);
    assert_eq!(bus.pending(), 0);
}

// ==================== Listeners touching the world ====================

#[test]
fn listener_mutates_components_through_context() {
    // Given
    let mut coordinator = world();
    let player = coordinator.create_entity().or_panic();
    coordinator.add_component(player, Score(0)).or_panic();
    let bus = Bus::new();
    bus.subscribe::<Scored, _>(|coordinator, scored| {
        coordinator
            .get_component_mut::<Score>(scored.player)
            .or_panic()
            .0 += 10;
    });

    // When
    bus.enqueue(Scored { player });
    bus.enqueue(Scored { player });
    bus.flush(&mut coordinator);

    // Then
    assert_eq!(coordinator.get_component::<Score>(player), Ok(&Score(20)));
}

#[test]
fn cascading_events_settle_over_successive_flushes() {
    // Given - Hits lower health; reaching zero emits Died; Died queues destruction
    let mut coordinator = world();
    let target = coordinator.create_entity().or_panic();
    coordinator.add_component(target, Health(5)).or_panic();

    let bus = Rc::new(Bus::new());
    let weak = Rc::downgrade(&bus);
    bus.subscribe::<Hit, _>(move |coordinator, hit| {
        let health = coordinator.get_component_mut::<Health>(hit.target).or_panic();
        health.0 -= hit.damage;
        if health.0 <= 0
            && let Some(bus) = weak.upgrade()
        {
            bus.enqueue(Died { entity: hit.target });
        }
    });
    bus.subscribe::<Died, _>(|coordinator, died| coordinator.destroy_entity(died.entity));

    // When
    bus.enqueue(Hit { target, damage: 3 });
    bus.enqueue(Hit { target, damage: 3 });
    bus.flush(&mut coordinator);

    // Then - Died is waiting for the next flush
    assert_eq!(bus.pending(), 1);
    assert!(coordinator.pending_destroy().is_empty());

    // When
    bus.flush(&mut coordinator);
    coordinator.flush_destroyed_entities().or_panic();

    // Then
    assert!(!coordinator.is_alive(target));
}

#[test]
fn system_publishes_through_shared_bus() {
    /// Awards a point to every member each tick.
    struct Referee {
        events: Rc<Bus>,
    }

    impl System for Referee {
        fn update(&mut self, _: &mut Coordinator, entities: &[Entity], _: f32) {
            for &player in entities {
                self.events.enqueue(Scored { player });
            }
        }
    }

    // Given
    let mut coordinator = world();
    let bus = Rc::new(Bus::new());
    bus.subscribe::<Scored, _>(|coordinator, scored| {
        coordinator
            .get_component_mut::<Score>(scored.player)
            .or_panic()
            .0 += 1;
    });
    coordinator
        .register_system(Referee {
            events: Rc::clone(&bus),
        })
        .or_panic();
    let required = coordinator.signature_of::<Score>().or_panic();
    coordinator.set_system_signature::<Referee>(required).or_panic();
    let players: Vec<_> = (0..3)
        .map(|_| {
            let player = coordinator.create_entity().or_panic();
            coordinator.add_component(player, Score(0)).or_panic();
            player
        })
        .collect();

    // When - Two ticks
    for _ in 0..2 {
        coordinator.update_system::<Referee>(0.016).or_panic();
        bus.flush(&mut coordinator);
    }

    // Then
    for player in players {
        assert_eq!(coordinator.get_component::<Score>(player), Ok(&Score(2)));
    }
}

#[test]
fn unsubscribe_reports_missing_listeners() {
    let bus = Bus::new();
    let id = bus.subscribe::<Died, _>(|_, _| {});

    assert_eq!(
        bus.unsubscribe::<Hit>(id).unwrap_err().kind(),
        ErrorKind::NoListeners
    );
    bus.unsubscribe::<Died>(id).or_panic();
    assert_eq!(bus.listener_count::<Died>(), 0);
}
