//! Viewport-bound "load more" trigger.
//!
//! A [`ViewportTrigger`] watches one element for as long as its component
//! is mounted and calls the caller's callback every time the observer
//! reports that element entering the viewport. It does no scheduling of its
//! own: repeated intersecting notifications call the callback repeatedly.

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::error::{ScrollError, ScrollResult};
use crate::lifecycle::{ElementRef, Lifecycle};
use crate::logging::{log_debug, log_error, log_info};
use crate::observer::{IntersectionEntry, IntersectionObserver, ObserverFactory, ObserverOptions};

/// Observation state of a trigger binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Before mount, or after unmount
    Unobserved,
    /// Between mount and unmount
    Observing,
}

struct TriggerInner<T, O> {
    target: ElementRef<T>,
    observer: RefCell<Option<O>>,
    state: Cell<TriggerState>,
    released: Cell<bool>,
    // Shared with the observer callback; gates delivery to mounted time only
    active: Rc<Cell<bool>>,
    invocations: Rc<Cell<usize>>,
}

/// One element bound to one observer for one component lifetime.
///
/// Cloning yields another handle to the same binding.
pub struct ViewportTrigger<T, O> {
    inner: Rc<TriggerInner<T, O>>,
}

impl<T, O> Clone for ViewportTrigger<T, O> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T, O> ViewportTrigger<T, O>
where
    T: Clone + Debug + 'static,
    O: IntersectionObserver<T>,
{
    /// Bind with default observer options (threshold 0, viewport root).
    pub fn new<F, C>(factory: &F, target: ElementRef<T>, load_more: C) -> Self
    where
        F: ObserverFactory<T, Observer = O>,
        C: FnMut() + 'static,
    {
        Self::with_options(factory, target, load_more, ObserverOptions::default())
    }

    pub fn with_options<F, C>(
        factory: &F,
        target: ElementRef<T>,
        mut load_more: C,
        options: ObserverOptions,
    ) -> Self
    where
        F: ObserverFactory<T, Observer = O>,
        C: FnMut() + 'static,
    {
        let active = Rc::new(Cell::new(false));
        let invocations = Rc::new(Cell::new(0));

        let gate = active.clone();
        let counter = invocations.clone();
        let observer = factory.create(
            Box::new(move |entries: &[IntersectionEntry<T>]| {
                if !gate.get() {
                    return;
                }
                // Only the first record of a batch is consulted
                if let Some(first) = entries.first() {
                    if first.is_intersecting {
                        counter.set(counter.get() + 1);
                        load_more();
                    }
                }
            }),
            options,
        );

        Self {
            inner: Rc::new(TriggerInner {
                target,
                observer: RefCell::new(Some(observer)),
                state: Cell::new(TriggerState::Unobserved),
                released: Cell::new(false),
                active,
                invocations,
            }),
        }
    }

    pub fn state(&self) -> TriggerState {
        self.inner.state.get()
    }

    /// How many times the callback has run.
    pub fn invocations(&self) -> usize {
        self.inner.invocations.get()
    }

    /// Start observing the element currently held by the reference.
    ///
    /// Fails with [`ScrollError::UnresolvedTarget`] when the reference is
    /// empty; the binding then stays unobserved.
    pub fn mount(&self) -> ScrollResult<()> {
        if self.inner.released.get() || self.state() == TriggerState::Observing {
            return Err(ScrollError::Lifecycle(
                "viewport trigger has already been mounted".to_string(),
            ));
        }

        let element = match self.inner.target.get() {
            Some(element) => element,
            None => {
                log_error("Viewport trigger mounted with an unresolved target element");
                return Err(ScrollError::UnresolvedTarget);
            }
        };

        let mut slot = self.inner.observer.borrow_mut();
        let observer = slot.as_mut().ok_or_else(|| {
            ScrollError::Lifecycle("viewport trigger observer was already released".to_string())
        })?;
        observer.observe(element.clone());
        self.inner.active.set(true);
        self.inner.state.set(TriggerState::Observing);
        log_debug(&format!("Viewport trigger observing {:?}", element));
        Ok(())
    }

    /// Stop observing and release the observer. Safe to call repeatedly.
    pub fn unmount(&self) {
        self.inner.active.set(false);
        self.inner.released.set(true);

        let observer = self.inner.observer.borrow_mut().take();
        if let Some(mut observer) = observer {
            observer.disconnect();
            log_debug(&format!(
                "Viewport trigger released after {} invocation(s)",
                self.invocations()
            ));
        }
        self.inner.state.set(TriggerState::Unobserved);
    }
}

/// Bind `load_more` to `target` for the lifetime of `lifecycle`.
///
/// Observation starts in the component's mount phase and stops in its
/// unmount phase. The returned handle is only needed for inspection.
pub fn use_viewport_trigger<L, F, T, C>(
    lifecycle: &mut L,
    factory: &F,
    target: ElementRef<T>,
    load_more: C,
) -> ViewportTrigger<T, F::Observer>
where
    L: Lifecycle + ?Sized,
    F: ObserverFactory<T>,
    F::Observer: 'static,
    T: Clone + Debug + 'static,
    C: FnMut() + 'static,
{
    use_viewport_trigger_with_options(lifecycle, factory, target, load_more, ObserverOptions::default())
}

pub fn use_viewport_trigger_with_options<L, F, T, C>(
    lifecycle: &mut L,
    factory: &F,
    target: ElementRef<T>,
    load_more: C,
    options: ObserverOptions,
) -> ViewportTrigger<T, F::Observer>
where
    L: Lifecycle + ?Sized,
    F: ObserverFactory<T>,
    F::Observer: 'static,
    T: Clone + Debug + 'static,
    C: FnMut() + 'static,
{
    let trigger = ViewportTrigger::with_options(factory, target, load_more, options);

    let on_mount = trigger.clone();
    lifecycle.on_mounted(Box::new(move || on_mount.mount()));

    let on_unmount = trigger.clone();
    lifecycle.on_unmounted(Box::new(move || on_unmount.unmount()));

    log_info("Viewport trigger registered");
    trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ComponentScope;
    use crate::observer::EntryCallback;

    /// Observer double whose batches are pushed by hand and which keeps
    /// delivering after disconnect, like a notification already in flight.
    #[derive(Default)]
    struct Manual {
        callback: RefCell<Option<EntryCallback<u32>>>,
        log: RefCell<Vec<&'static str>>,
    }

    impl Manual {
        fn deliver(&self, flags: &[bool]) {
            let entries: Vec<_> = flags
                .iter()
                .map(|flag| IntersectionEntry::new(1u32, *flag))
                .collect();
            if let Some(callback) = self.callback.borrow_mut().as_mut() {
                callback(&entries);
            }
        }
    }

    struct ManualObserver(Rc<Manual>);

    impl IntersectionObserver<u32> for ManualObserver {
        fn observe(&mut self, _target: u32) {
            self.0.log.borrow_mut().push("observe");
        }

        fn unobserve(&mut self, _target: &u32) {
            self.0.log.borrow_mut().push("unobserve");
        }

        fn disconnect(&mut self) {
            self.0.log.borrow_mut().push("disconnect");
        }
    }

    struct ManualFactory(Rc<Manual>);

    impl ObserverFactory<u32> for ManualFactory {
        type Observer = ManualObserver;

        fn create(&self, callback: EntryCallback<u32>, _options: ObserverOptions) -> ManualObserver {
            *self.0.callback.borrow_mut() = Some(callback);
            ManualObserver(self.0.clone())
        }
    }

    fn setup() -> (Rc<Manual>, ManualFactory, Rc<Cell<usize>>) {
        let manual = Rc::new(Manual::default());
        (manual.clone(), ManualFactory(manual), Rc::new(Cell::new(0)))
    }

    #[test]
    fn test_first_record_decides() {
        let (manual, factory, calls) = setup();
        let counter = calls.clone();
        let trigger = ViewportTrigger::new(&factory, ElementRef::with_element(1), move || {
            counter.set(counter.get() + 1)
        });
        trigger.mount().unwrap();

        manual.deliver(&[false, true]);
        assert_eq!(calls.get(), 0);
        manual.deliver(&[true, false]);
        assert_eq!(calls.get(), 1);
        manual.deliver(&[]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_every_intersecting_batch_invokes() {
        let (manual, factory, calls) = setup();
        let counter = calls.clone();
        let trigger = ViewportTrigger::new(&factory, ElementRef::with_element(1), move || {
            counter.set(counter.get() + 1)
        });
        trigger.mount().unwrap();

        for _ in 0..3 {
            manual.deliver(&[true]);
        }
        assert_eq!(calls.get(), 3);
        assert_eq!(trigger.invocations(), 3);
    }

    #[test]
    fn test_no_invocation_before_mount() {
        let (manual, factory, calls) = setup();
        let counter = calls.clone();
        let trigger = ViewportTrigger::new(&factory, ElementRef::with_element(1), move || {
            counter.set(counter.get() + 1)
        });
        manual.deliver(&[true]);
        assert_eq!(calls.get(), 0);
        assert_eq!(trigger.state(), TriggerState::Unobserved);
    }

    #[test]
    fn test_unresolved_target_fails_fast() {
        let (manual, factory, _calls) = setup();
        let trigger = ViewportTrigger::new(&factory, ElementRef::<u32>::new(), || {});
        assert!(matches!(trigger.mount(), Err(ScrollError::UnresolvedTarget)));
        assert_eq!(trigger.state(), TriggerState::Unobserved);
        assert!(manual.log.borrow().is_empty());

        trigger.unmount();
        assert_eq!(*manual.log.borrow(), vec!["disconnect"]);
    }

    #[test]
    fn test_reference_resolved_at_mount_time() {
        let (manual, factory, _calls) = setup();
        let target = ElementRef::new();
        let trigger = ViewportTrigger::new(&factory, target.clone(), || {});
        target.set(1u32);
        trigger.mount().unwrap();
        assert_eq!(*manual.log.borrow(), vec!["observe"]);
    }

    #[test]
    fn test_unmount_is_idempotent_and_final() {
        let (manual, factory, calls) = setup();
        let counter = calls.clone();
        let trigger = ViewportTrigger::new(&factory, ElementRef::with_element(1), move || {
            counter.set(counter.get() + 1)
        });
        trigger.mount().unwrap();
        trigger.unmount();
        trigger.unmount();

        assert_eq!(*manual.log.borrow(), vec!["observe", "disconnect"]);
        assert_eq!(trigger.state(), TriggerState::Unobserved);
        assert!(matches!(trigger.mount(), Err(ScrollError::Lifecycle(_))));

        // In-flight delivery after teardown is swallowed
        manual.deliver(&[true]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_scope_drives_trigger() {
        let (manual, factory, calls) = setup();
        let counter = calls.clone();
        let mut scope = ComponentScope::new("user-list");
        let trigger = use_viewport_trigger(&mut scope, &factory, ElementRef::with_element(1), move || {
            counter.set(counter.get() + 1)
        });

        scope.mount().unwrap();
        assert_eq!(trigger.state(), TriggerState::Observing);
        manual.deliver(&[true]);
        manual.deliver(&[false]);
        assert_eq!(calls.get(), 1);

        scope.unmount().unwrap();
        manual.deliver(&[true]);
        assert_eq!(calls.get(), 1);
        assert_eq!(*manual.log.borrow(), vec!["observe", "disconnect"]);
    }
}
