//! Various learning rate schedulers.
use tch::nn;

use crate::components::ComponentError;

/// Cosine annealing with warm restarts, described in paper
/// "SGDR: stochastic gradient descent with warm restarts"
/// https://arxiv.org/abs/1608.03983
///
/// Each epoch it changes the learning rate, following one half of a cosine
/// wave from `eta_max` down to `eta_min`. The first descent takes `t_0`
/// epochs, after which the learning rate snaps back to `eta_max` (a warm
/// restart) and the descent starts over. With every restart the period is
/// multiplied by a factor of `t_mult`.
#[derive(Debug, Clone, PartialEq)]
pub struct CosineWarmRestartsSchedule {
    pub eta_max: f64,
    pub eta_min: f64,
    pub t_0: usize,
    pub t_mult: usize,
    last_epoch: usize,
}

impl CosineWarmRestartsSchedule {
    pub fn new(
        eta_max: f64,
        eta_min: f64,
        t_0: usize,
        t_mult: usize,
    ) -> Result<Self, ComponentError> {
        if t_0 < 1 {
            return Err(ComponentError::InvalidParameter(format!(
                "expected a positive restart period, got T_0 = {}",
                t_0
            )));
        }
        if t_mult < 1 {
            return Err(ComponentError::InvalidParameter(format!(
                "expected a restart period factor >= 1, got T_mult = {}",
                t_mult
            )));
        }
        Ok(Self {
            eta_max,
            eta_min,
            t_0,
            t_mult,
            last_epoch: 0,
        })
    }

    pub fn last_epoch(&self) -> usize {
        self.last_epoch
    }

    /// Calculates the learning rate for the given `epoch`.
    pub fn get_lr(&self, epoch: usize) -> f64 {
        let mut t_cur = epoch;
        let mut period = self.t_0;
        while t_cur >= period {
            t_cur -= period;
            period *= self.t_mult;
        }
        self.eta_min
            + 0.5 * (self.eta_max - self.eta_min)
                * (1.0 + (std::f64::consts::PI * t_cur as f64 / period as f64).cos())
    }

    /// Sets the optimizer's learning rate to the schedule's current value
    /// without advancing the epoch counter.
    pub fn attach(&self, optimizer: &mut nn::Optimizer) {
        optimizer.set_lr(self.get_lr(self.last_epoch));
    }

    /// Advances the schedule by one epoch and applies the new learning rate
    /// to the optimizer. Meant to be called once per epoch by the training
    /// driver.
    pub fn step(&mut self, optimizer: &mut nn::Optimizer) {
        self.last_epoch += 1;
        optimizer.set_lr(self.get_lr(self.last_epoch));
    }
}
