//! A `log` sink that forwards records over a channel.
//!
//! The ECS logs through the `log` facade only. Hosts that want those diagnostics without handing
//! stdout to the library install a [`ChannelLogger`] and drain the receiver when convenient:
//!
//! ```rust,ignore
//! let receiver = ChannelLogger::install(LevelFilter::Debug)?;
//! // ... run a tick ...
//! for message in receiver.try_iter() {
//!     println!("[{}] {}: {}", message.level, message.target, message.message);
//! }
//! ```

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // A dropped receiver just means nobody is listening anymore.
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }

    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, level), receiver)
    }

    #[inline]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Install a channel logger as the process-wide logger and return its receiver.
    ///
    /// Fails if a logger is already installed.
    pub fn install(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
        let (logger, receiver) = Self::with_receiver(level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(receiver)
    }
}
