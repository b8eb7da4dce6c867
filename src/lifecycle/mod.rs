pub mod element_ref;
pub mod scope;

pub use element_ref::ElementRef;
pub use scope::{ComponentScope, ScopePhase};

use crate::error::ScrollResult;

/// Runs once after the component's elements exist.
pub type SetupHook = Box<dyn FnOnce() -> ScrollResult<()>>;

/// Runs once before the component's elements are torn down.
pub type TeardownHook = Box<dyn FnOnce()>;

/// Component lifecycle registration.
pub trait Lifecycle {
    fn on_mounted(&mut self, setup: SetupHook);
    fn on_unmounted(&mut self, teardown: TeardownHook);
}
