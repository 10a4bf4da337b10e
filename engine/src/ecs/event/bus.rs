//! Type-indexed publish/subscribe.
//!
//! This module provides [`EventBus`], the channel systems use to talk to each other without
//! holding references to one another.
//!
//! # Delivery
//!
//! Every event type has an ordered list of listeners (registration order). An event reaches them
//! in one of two ways:
//!
//! - [`publish_now()`](EventBus::publish_now) delivers synchronously, before returning.
//! - [`enqueue()`](EventBus::enqueue) appends the event to a pending queue. Nothing is delivered
//!   until [`flush()`](EventBus::flush).
//!
//! `flush()` takes ownership of the whole pending queue first, then delivers each event in
//! enqueue order to the listener list *as it is at that moment*. Events enqueued by listeners
//! during a flush land in the fresh queue and wait for the next flush:
//!
//! ```text
//! enqueue(A), enqueue(B)     queue: [A, B]
//! flush()                    working: [A, B]   queue: []
//!   A → listener enqueues C                    queue: [C]
//!   B → ...
//! flush()                    working: [C]      queue: []
//! ```
//!
//! # Context
//!
//! Listeners are called with a mutable context `C` supplied by whoever publishes or flushes,
//! typically the [`Coordinator`](crate::ecs::Coordinator). This lets a listener touch the world
//! without capturing it. Buses that need no context use the default `C = ()`.
//!
//! ```rust,ignore
//! let bus: EventBus<Coordinator> = EventBus::new();
//!
//! bus.subscribe::<Scored, _>(|coordinator, scored| {
//!     if let Ok(score) = coordinator.get_component_mut::<Score>(scored.player) {
//!         score.value += 10;
//!     }
//! });
//!
//! bus.enqueue(Scored { player });
//! bus.flush(&mut coordinator);
//! ```
//!
//! # Re-entrancy
//!
//! Every method takes `&self`. Listeners may subscribe, unsubscribe, publish and enqueue on the
//! bus that is calling them; no internal borrow is held while a listener runs.

use std::{
    any::{Any, TypeId, type_name},
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use log::{debug, trace};

use crate::ecs::{
    error::{Error, Result},
    event::{Event, ListenerId},
};

/// A type-erased listener callback. The event is downcast back to its concrete type inside.
type Callback<C> = Rc<dyn Fn(&mut C, &dyn Any)>;

struct Listener<C> {
    id: ListenerId,
    callback: Callback<C>,
}

/// An event waiting in the queue, boxed with its runtime type.
struct Queued {
    type_id: TypeId,
    name: &'static str,
    event: Box<dyn Any>,
}

/// Type-indexed publish/subscribe channel with immediate and deferred delivery.
pub struct EventBus<C = ()> {
    /// The id handed to the next subscription.
    next_id: Cell<u64>,

    /// Listeners per event type. A type has an entry only while it has at least one listener.
    listeners: RefCell<HashMap<TypeId, Vec<Listener<C>>>>,

    /// Events waiting for the next flush.
    queue: RefCell<Vec<Queued>>,
}

impl<C: 'static> EventBus<C> {
    /// Creates a new bus with no listeners and nothing queued.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(ListenerId::INVALID.id() + 1),
            listeners: RefCell::new(HashMap::new()),
            queue: RefCell::new(Vec::new()),
        }
    }

    /// Register a listener for events of type `E`.
    ///
    /// Listeners of one type are called in the order they subscribed.
    pub fn subscribe<E, F>(&self, callback: F) -> ListenerId
    where
        E: Event,
        F: Fn(&mut C, &E) + 'static,
    {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(id.id() + 1);

        let callback: Callback<C> = Rc::new(move |context: &mut C, event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                callback(context, event);
            }
        });
        self.listeners
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Listener { id, callback });

        trace!("listener {id} subscribed to `{}`", type_name::<E>());
        id
    }

    /// Remove a listener for events of type `E`.
    ///
    /// Fails with [`Error::NoListeners`] if `E` has no listeners at all, and with
    /// [`Error::ListenerNotFound`] if none of them has this id. Removing the last listener of a
    /// type drops the type's list.
    pub fn unsubscribe<E: Event>(&self, id: ListenerId) -> Result<()> {
        let type_id = TypeId::of::<E>();
        let name = type_name::<E>();
        let mut listeners = self.listeners.borrow_mut();
        let list = listeners
            .get_mut(&type_id)
            .ok_or(Error::NoListeners(name))?;
        let position = list
            .iter()
            .position(|listener| listener.id == id)
            .ok_or(Error::ListenerNotFound { event: name, id })?;

        list.remove(position);
        if list.is_empty() {
            listeners.remove(&type_id);
        }
        trace!("listener {id} unsubscribed from `{name}`");
        Ok(())
    }

    /// Deliver an event to every current listener of `E` before returning.
    ///
    /// Returns the number of listeners called.
    pub fn publish_now<E: Event>(&self, context: &mut C, event: E) -> usize {
        self.dispatch(context, TypeId::of::<E>(), type_name::<E>(), &event)
    }

    /// Queue an event for the next [`flush()`](Self::flush). No listener runs now.
    pub fn enqueue<E: Event>(&self, event: E) {
        let name = type_name::<E>();
        trace!("queued `{name}`");
        self.queue.borrow_mut().push(Queued {
            type_id: TypeId::of::<E>(),
            name,
            event: Box::new(event),
        });
    }

    /// Deliver now when `immediate` is set, otherwise queue.
    pub fn publish<E: Event>(&self, context: &mut C, event: E, immediate: bool) {
        if immediate {
            self.publish_now(context, event);
        } else {
            self.enqueue(event);
        }
    }

    /// Take the pending queue and deliver every event in it, in the order queued.
    ///
    /// Events queued while this runs are left for the next flush. Returns the total number of
    /// listener calls made.
    pub fn flush(&self, context: &mut C) -> usize {
        let pending = std::mem::take(&mut *self.queue.borrow_mut());
        pending
            .iter()
            .map(|queued| self.dispatch(context, queued.type_id, queued.name, &*queued.event))
            .sum()
    }

    /// Drop every listener and every queued event.
    pub fn unsubscribe_all(&self) {
        self.listeners.borrow_mut().clear();
        self.queue.borrow_mut().clear();
        debug!("all listeners unsubscribed");
    }

    /// The number of listeners currently subscribed to `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listeners
            .borrow()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// The number of events waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Call the listeners registered for `type_id` right now.
    ///
    /// The listener list is copied out first so listeners are free to modify it.
    fn dispatch(
        &self,
        context: &mut C,
        type_id: TypeId,
        name: &'static str,
        event: &dyn Any,
    ) -> usize {
        let callbacks: Vec<Callback<C>> = match self.listeners.borrow().get(&type_id) {
            Some(list) => list
                .iter()
                .map(|listener| Rc::clone(&listener.callback))
                .collect(),
            None => {
                debug!("`{name}` has no listeners, dropping it");
                return 0;
            }
        };

        for callback in &callbacks {
            callback(context, event);
        }
        callbacks.len()
    }
}

impl<C: 'static> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: usize = self.listeners.borrow().values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("listeners", &listeners)
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}
