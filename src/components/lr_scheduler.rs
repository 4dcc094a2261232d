//! Learning-rate scheduler components.
use rand::rngs::StdRng;

use crate::components::{ComponentError, ComponentMetadata, DatasetProperties, FitInput};
use crate::schedulers::CosineWarmRestartsSchedule;
use crate::search_space::{ConfigurationSpace, Hyperparameter, SearchSpaceError, ValueRange};

/// Ranges a configuration optimizer may tune for
/// [`CosineAnnealingWarmRestarts`], with the usual bounds as defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSpaceOptions {
    pub t_0: ValueRange<i64>,
    pub t_mult: ValueRange<f64>,
}

impl Default for SearchSpaceOptions {
    fn default() -> Self {
        Self {
            t_0: ValueRange::new(1, 20, 1),
            t_mult: ValueRange::new(1.0, 2.0, 1.0),
        }
    }
}

/// Pipeline component wrapping a [`CosineWarmRestartsSchedule`].
///
/// At search time it exposes the restart period `t_0` and the period growth
/// factor `t_mult` as tunable hyperparameters; at fit time it builds the
/// schedule around the optimizer constructed by an earlier pipeline stage and
/// holds on to it for the training driver to step each epoch.
#[derive(Debug)]
pub struct CosineAnnealingWarmRestarts {
    pub t_0: i64,
    pub t_mult: f64,
    /// Held for interface parity with stochastic components; this one draws
    /// nothing from it.
    pub random_state: Option<StdRng>,
    pub scheduler: Option<CosineWarmRestartsSchedule>,
}

impl CosineAnnealingWarmRestarts {
    pub fn new(t_0: i64, t_mult: f64, random_state: Option<StdRng>) -> Self {
        Self {
            t_0,
            t_mult,
            random_state,
            scheduler: None,
        }
    }

    /// Builds the schedule and primes the supplied optimizer with its
    /// epoch-0 learning rate. A repeated call replaces the previous schedule.
    /// On failure `scheduler` keeps whatever value it had before.
    pub fn fit(&mut self, input: &mut FitInput) -> Result<(), ComponentError> {
        let learning_rate = input.learning_rate;
        let optimizer = input.require_optimizer()?;
        let t_0 = self.t_0.max(0) as usize;
        // TODO: decide whether a fractional t_mult should be rejected instead
        // of truncated to a whole restart factor.
        let t_mult = self.t_mult as usize;
        let schedule = CosineWarmRestartsSchedule::new(learning_rate, 0.0, t_0, t_mult)?;
        schedule.attach(optimizer);
        self.scheduler = Some(schedule);
        Ok(())
    }

    pub fn get_properties(_dataset_properties: Option<&DatasetProperties>) -> ComponentMetadata {
        ComponentMetadata {
            shortname: "CosineAnnealingWarmRestarts",
            name: "Cosine Annealing WarmRestarts",
            cyclic: true,
        }
    }

    pub fn get_hyperparameter_search_space(
        _dataset_properties: Option<&DatasetProperties>,
        options: SearchSpaceOptions,
    ) -> Result<ConfigurationSpace, SearchSpaceError> {
        let mut space = ConfigurationSpace::new();
        space.add(Hyperparameter::uniform_integer("T_0", options.t_0)?)?;
        space.add(Hyperparameter::uniform_float("T_mult", options.t_mult)?)?;
        Ok(space)
    }
}
