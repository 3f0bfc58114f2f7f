//! Runtime pieces of the vitalwatch binary: configuration, the periodic
//! alert scheduler, alert sinks, console rendering, report export and database seeding.

pub mod config;
pub mod console;
pub mod export;
pub mod notify;
pub mod scheduler;
pub mod seed;
