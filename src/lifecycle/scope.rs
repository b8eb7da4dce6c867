use super::{Lifecycle, SetupHook, TeardownHook};
use crate::error::{ScrollError, ScrollResult};
use crate::logging::{log_debug, log_error};

/// Where a component is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePhase {
    /// Hooks may be registered; nothing has run
    Created,
    /// Setup hooks have run
    Mounted,
    /// Teardown hooks have run; the scope is finished
    Unmounted,
}

/// A single component instance's mount/unmount hooks.
pub struct ComponentScope {
    name: String,
    phase: ScopePhase,
    setups: Vec<SetupHook>,
    teardowns: Vec<TeardownHook>,
}

impl ComponentScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: ScopePhase::Created,
            setups: Vec::new(),
            teardowns: Vec::new(),
        }
    }

    pub fn phase(&self) -> ScopePhase {
        self.phase
    }

    /// Run every setup hook once, in registration order.
    ///
    /// A failing hook does not stop the others; the first error is returned
    /// after all hooks have run.
    pub fn mount(&mut self) -> ScrollResult<()> {
        if self.phase != ScopePhase::Created {
            return Err(ScrollError::Lifecycle(format!(
                "component '{}' cannot mount from {:?}",
                self.name, self.phase
            )));
        }
        self.phase = ScopePhase::Mounted;
        log_debug(&format!("Mounting '{}' ({} setup hook(s))", self.name, self.setups.len()));

        let mut first_error = None;
        for setup in self.setups.drain(..) {
            if let Err(e) = setup() {
                log_error(&format!("Setup hook failed in '{}': {}", self.name, e));
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run every teardown hook once, in registration order.
    ///
    /// Runs whether or not mount happened or succeeded.
    pub fn unmount(&mut self) -> ScrollResult<()> {
        if self.phase == ScopePhase::Unmounted {
            return Err(ScrollError::Lifecycle(format!(
                "component '{}' is already unmounted",
                self.name
            )));
        }
        self.phase = ScopePhase::Unmounted;
        self.setups.clear();
        log_debug(&format!("Unmounting '{}' ({} teardown hook(s))", self.name, self.teardowns.len()));

        for teardown in self.teardowns.drain(..) {
            teardown();
        }
        Ok(())
    }
}

impl Lifecycle for ComponentScope {
    fn on_mounted(&mut self, setup: SetupHook) {
        if self.phase != ScopePhase::Created {
            log_error(&format!(
                "Setup hook registered on '{}' while {:?} will never run",
                self.name, self.phase
            ));
            return;
        }
        self.setups.push(setup);
    }

    fn on_unmounted(&mut self, teardown: TeardownHook) {
        if self.phase == ScopePhase::Unmounted {
            log_error(&format!("Teardown hook registered on '{}' after unmount will never run", self.name));
            return;
        }
        self.teardowns.push(teardown);
    }
}

impl Drop for ComponentScope {
    // A scope dropped while mounted still releases what it set up
    fn drop(&mut self) {
        if self.phase == ScopePhase::Mounted {
            let _ = self.unmount();
        }
    }
}
