pub mod config;
pub mod events;
pub mod sys;
pub mod wheel;

pub use config::{Config, SpinConfig};
pub use events::{SpinObserver, WheelEvent};
pub use sys::storage::{JsonFileRepository, MemoryRepository, OptionRepository, WheelSnapshot};
pub use wheel::{SharedWheel, SpinState, WheelOption, WheelStore};
