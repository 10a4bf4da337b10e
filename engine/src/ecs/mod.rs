pub mod component;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod event;
pub mod signature;
pub mod storage;
pub mod system;
pub(crate) mod util;

pub use component::Component;
pub use config::Config;
pub use coordinator::Coordinator;
pub use entity::Entity;
pub use error::{Error, ErrorKind, OrPanic, Result};
pub use event::{Event, EventBus, ListenerId};
pub use signature::{IntoSignature, Signature};
pub use system::System;

pub use rusty_ecs_macros::{Component, Event};
