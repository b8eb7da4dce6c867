//! Visibility observation.
//!
//! [`IntersectionObserver`] and [`ObserverFactory`] describe the platform
//! capability a trigger depends on. [`Page`] is the in-process
//! implementation: it keeps element rectangles and a scroll viewport and
//! delivers batched [`IntersectionEntry`] records once per rendered frame.

pub mod entry;
pub mod page;

pub use entry::{compute_intersection, Intersection, IntersectionEntry, ObserverOptions, RootMargin};
pub use page::{ElementId, Page, PageObserver};

/// Receives every record batch an observer delivers.
pub type EntryCallback<T> = Box<dyn FnMut(&[IntersectionEntry<T>])>;

/// A live observation over zero or more targets.
pub trait IntersectionObserver<T> {
    /// Start reporting on `target`. Observing an already observed target is a no-op.
    fn observe(&mut self, target: T);

    /// Stop reporting on `target` and drop its undelivered records.
    fn unobserve(&mut self, target: &T);

    /// Stop reporting on every target and drop all undelivered records.
    /// Must not fail when nothing is observed.
    fn disconnect(&mut self);
}

/// Creates observers bound to a callback.
pub trait ObserverFactory<T> {
    type Observer: IntersectionObserver<T>;

    fn create(&self, callback: EntryCallback<T>, options: ObserverOptions) -> Self::Observer;
}
