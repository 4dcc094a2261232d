//! Samples a few scheduler configurations from the component's search space
//! and prints the learning-rate trajectory each of them produces.
use tch::nn::{self, OptimizerConfig};

use tchrs_automl::components::lr_scheduler::CosineAnnealingWarmRestarts;
use tchrs_automl::components::FitInput;
use tchrs_automl::search_space::ParameterValue;

const LEARNING_RATE: f64 = 5e-5;
const NUM_CANDIDATES: usize = 4;
const NUM_EPOCHS: usize = 30;

fn main() {
    let space = CosineAnnealingWarmRestarts::get_hyperparameter_search_space(
        None,
        Default::default(),
    )
    .expect("Unable to build the search space");

    let mut rng = rand::thread_rng();
    for candidate in 0..NUM_CANDIDATES {
        let config = space.sample_configuration(&mut rng);
        let t_0 = config
            .iter()
            .find(|(name, _)| name == "T_0")
            .and_then(|(_, value)| value.as_int())
            .expect("T_0 missing from the sampled configuration");
        let t_mult = config
            .iter()
            .find(|(name, _)| name == "T_mult")
            .and_then(|(_, value)| match value {
                ParameterValue::Float(value) => Some(*value),
                ParameterValue::Int(value) => Some(*value as f64),
            })
            .expect("T_mult missing from the sampled configuration");
        println!(
            "Candidate {}: T_0 = {}, T_mult = {:.3}",
            candidate, t_0, t_mult
        );

        let vs = nn::VarStore::new(tch::Device::Cpu);
        let _weights = vs.root().zeros("weights", &[8]);
        let mut optimizer = nn::AdamW::default()
            .build(&vs, LEARNING_RATE)
            .expect("Unable to build optimizer");

        let mut component = CosineAnnealingWarmRestarts::new(t_0, t_mult, None);
        component
            .fit(&mut FitInput::new(&mut optimizer, LEARNING_RATE))
            .expect("Unable to fit the scheduler component");

        let schedule = component
            .scheduler
            .as_mut()
            .expect("The component must hold a schedule after fitting");
        for epoch in 0..NUM_EPOCHS {
            println!("  epoch {:>2}: lr = {:.3e}", epoch, schedule.get_lr(epoch));
            schedule.step(&mut optimizer);
        }
    }
}
