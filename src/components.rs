//! Shared plumbing for pipeline components: the fit-time dependency record,
//! component metadata, and the errors components can fail with.
use tch::nn;
use thiserror::Error;

pub mod lr_scheduler;

#[derive(Debug, Error, PartialEq)]
pub enum ComponentError {
    #[error("pipeline dependency '{0}' has not been fitted yet")]
    MissingDependency(&'static str),
    #[error("invalid component parameter: {0}")]
    InvalidParameter(String),
}

/// Static metadata describing one pipeline component to the configuration
/// orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub shortname: &'static str,
    pub name: &'static str,
    /// Whether the component produces a cyclic learning rate.
    pub cyclic: bool,
}

/// A summary of the dataset the pipeline is being configured for. Scheduler
/// components accept it for interface parity with the orchestrator but do not
/// read it.
#[derive(Debug, Clone, Default)]
pub struct DatasetProperties {
    pub task_type: Option<String>,
    pub num_samples: Option<usize>,
}

/// Everything earlier pipeline stages hand to a scheduler component's `fit`.
///
/// The `optimizer` slot is populated by the optimizer-setup stage, so it is
/// still empty when the pipeline is executed out of order. `learning_rate` is
/// the base rate the optimizer was built with; `tch` offers no way to read it
/// back from the optimizer itself.
pub struct FitInput<'a> {
    pub optimizer: Option<&'a mut nn::Optimizer>,
    pub learning_rate: f64,
}

impl<'a> FitInput<'a> {
    pub fn new(optimizer: &'a mut nn::Optimizer, learning_rate: f64) -> Self {
        Self {
            optimizer: Some(optimizer),
            learning_rate,
        }
    }

    /// The requirement check shared by all scheduler-type components: every
    /// one of them needs an already-constructed optimizer to attach to.
    pub fn require_optimizer(&mut self) -> Result<&mut nn::Optimizer, ComponentError> {
        self.optimizer
            .as_mut()
            .map(|optimizer| &mut **optimizer)
            .ok_or(ComponentError::MissingDependency("optimizer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::nn::OptimizerConfig;

    #[test]
    fn missing_optimizer_is_reported_by_name() {
        let mut input = FitInput {
            optimizer: None,
            learning_rate: 0.01,
        };
        let err = match input.require_optimizer() {
            Err(err) => err,
            Ok(_) => panic!("expected the requirement check to fail"),
        };
        assert_eq!(err, ComponentError::MissingDependency("optimizer"));
    }

    #[test]
    fn present_optimizer_passes_the_requirement_check() {
        let vs = tch::nn::VarStore::new(tch::Device::Cpu);
        let _weights = vs.root().zeros("weights", &[2]);
        let mut optimizer = tch::nn::Sgd::default()
            .build(&vs, 0.01)
            .expect("Unable to build optimizer");
        let mut input = FitInput::new(&mut optimizer, 0.01);
        assert!(input.require_optimizer().is_ok());
    }
}
