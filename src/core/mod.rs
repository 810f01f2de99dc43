//! Core types shared by every engine: RNG, clock, configuration.
//!
//! Engines never reach for global randomness or the system time. Both are
//! injected through the types in this module so sessions replay exactly.

pub mod clock;
pub mod config;
pub mod rng;

pub use clock::{elapsed_ms, Clock, ManualClock, SharedClock, SystemClock};
pub use config::{
    ConfigError, HanoiConfig, NBackConfig, PalConfig, PlatformConfig, RecentResults, StroopConfig,
    TrailConfig,
};
pub use rng::GameRng;
