//! Startup lifecycle hooks
//!
//! The host calls three hooks exactly once each, in a fixed order:
//! `init`, then `setup`, then `ready`. [`Lifecycle`] enforces that order and
//! hands each callback the injected [`HostPort`].

use std::fmt;

use crate::ports::{HostError, HostPort};

/// One of the three startup phases, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookPhase {
    Init,
    Setup,
    Ready,
}

impl HookPhase {
    /// All phases in firing order
    pub const ORDER: [HookPhase; 3] = [HookPhase::Init, HookPhase::Setup, HookPhase::Ready];

    pub fn name(&self) -> &'static str {
        match self {
            HookPhase::Init => "init",
            HookPhase::Setup => "setup",
            HookPhase::Ready => "ready",
        }
    }

    /// Phase that fires after this one
    pub fn next(&self) -> Option<HookPhase> {
        match self {
            HookPhase::Init => Some(HookPhase::Setup),
            HookPhase::Setup => Some(HookPhase::Ready),
            HookPhase::Ready => None,
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HookError {
    #[error("Hook '{got}' fired out of order, expected '{expected}'")]
    OutOfOrder { expected: HookPhase, got: HookPhase },
    #[error("Hook '{0}' already ran")]
    AlreadyRan(HookPhase),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Callbacks a module provides for each startup phase.
pub trait ModuleHooks {
    fn init(&mut self, host: &dyn HostPort) -> Result<(), HookError>;

    fn setup(&mut self, host: &dyn HostPort) -> Result<(), HookError>;

    fn ready(&mut self, host: &dyn HostPort) -> Result<(), HookError>;
}

/// A hook callback that failed during startup.
#[derive(Debug, Clone, PartialEq)]
pub struct HookFailure {
    pub phase: HookPhase,
    pub error: HookError,
}

/// Tracks which startup phases have fired.
#[derive(Debug, Default)]
pub struct Lifecycle {
    completed: Option<HookPhase>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last phase that fired, if any
    pub fn completed(&self) -> Option<HookPhase> {
        self.completed
    }

    pub fn is_ready(&self) -> bool {
        self.completed == Some(HookPhase::Ready)
    }

    /// Phase expected to fire next, `None` once `ready` has fired
    pub fn expected(&self) -> Option<HookPhase> {
        match self.completed {
            None => Some(HookPhase::Init),
            Some(phase) => phase.next(),
        }
    }

    /// Fire a single phase.
    ///
    /// The phase counts as fired even when its callback fails, so it never
    /// runs twice.
    pub fn fire(
        &mut self,
        phase: HookPhase,
        module: &mut dyn ModuleHooks,
        host: &dyn HostPort,
    ) -> Result<(), HookError> {
        match self.expected() {
            Some(expected) if expected == phase => {}
            Some(expected) if phase > expected => {
                return Err(HookError::OutOfOrder {
                    expected,
                    got: phase,
                })
            }
            _ => return Err(HookError::AlreadyRan(phase)),
        }

        tracing::debug!(phase = %phase, "Firing hook");
        let result = match phase {
            HookPhase::Init => module.init(host),
            HookPhase::Setup => module.setup(host),
            HookPhase::Ready => module.ready(host),
        };
        self.completed = Some(phase);

        if let Err(e) = &result {
            tracing::error!(phase = %phase, error = %e, "Hook callback failed");
        }
        result
    }

    /// Fire every remaining phase in order.
    ///
    /// A failing callback does not stop later phases; failures are collected
    /// for the caller.
    pub fn run_startup(
        &mut self,
        module: &mut dyn ModuleHooks,
        host: &dyn HostPort,
    ) -> Vec<HookFailure> {
        let mut failures = Vec::new();
        while let Some(phase) = self.expected() {
            if let Err(error) = self.fire(phase, module, host) {
                failures.push(HookFailure { phase, error });
            }
        }
        failures
    }
}
