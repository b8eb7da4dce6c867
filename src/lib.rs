// Module declarations
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod interactive;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod observer;
pub mod trigger;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use config::{Config, load_config, save_config};
pub use error::{ScrollError, ScrollResult};
pub use lifecycle::{ComponentScope, ElementRef, Lifecycle};
pub use models::*;
pub use observer::{IntersectionEntry, IntersectionObserver, ObserverFactory, ObserverOptions, Page};
pub use trigger::{use_viewport_trigger, TriggerState, ViewportTrigger};
