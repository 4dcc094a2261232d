//! Hyperparameter search-space types sampled by configuration optimizers.
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SearchSpaceError {
    #[error("invalid range for '{name}': lower={lower}, upper={upper}, default={default}")]
    InvalidRange {
        name: String,
        lower: f64,
        upper: f64,
        default: f64,
    },
    #[error("hyperparameter '{0}' already present in the space")]
    DuplicateName(String),
}

/// A single value drawn from a hyperparameter's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
}

impl ParameterValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParameterValue::Int(value) => Some(*value),
            ParameterValue::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParameterValue::Int(value) => Some(*value as f64),
            ParameterValue::Float(value) => Some(*value),
        }
    }
}

/// An inclusive `[lower, upper]` interval together with the value a
/// configuration optimizer should start from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub lower: T,
    pub upper: T,
    pub default: T,
}

impl<T> ValueRange<T> {
    pub fn new(lower: T, upper: T, default: T) -> Self {
        Self {
            lower,
            upper,
            default,
        }
    }
}

/// A named hyperparameter with a uniform prior over its range.
#[derive(Debug, Clone, PartialEq)]
pub enum Hyperparameter {
    UniformInteger {
        name: String,
        lower: i64,
        upper: i64,
        default: i64,
    },
    UniformFloat {
        name: String,
        lower: f64,
        upper: f64,
        default: f64,
    },
}

impl Hyperparameter {
    pub fn uniform_integer(
        name: impl Into<String>,
        range: ValueRange<i64>,
    ) -> Result<Self, SearchSpaceError> {
        let name = name.into();
        if range.lower > range.upper || range.default < range.lower || range.default > range.upper {
            return Err(SearchSpaceError::InvalidRange {
                name,
                lower: range.lower as f64,
                upper: range.upper as f64,
                default: range.default as f64,
            });
        }
        Ok(Self::UniformInteger {
            name,
            lower: range.lower,
            upper: range.upper,
            default: range.default,
        })
    }

    pub fn uniform_float(
        name: impl Into<String>,
        range: ValueRange<f64>,
    ) -> Result<Self, SearchSpaceError> {
        let name = name.into();
        if range.lower > range.upper || range.default < range.lower || range.default > range.upper {
            return Err(SearchSpaceError::InvalidRange {
                name,
                lower: range.lower,
                upper: range.upper,
                default: range.default,
            });
        }
        Ok(Self::UniformFloat {
            name,
            lower: range.lower,
            upper: range.upper,
            default: range.default,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Hyperparameter::UniformInteger { name, .. } => name,
            Hyperparameter::UniformFloat { name, .. } => name,
        }
    }

    pub fn default_value(&self) -> ParameterValue {
        match self {
            Hyperparameter::UniformInteger { default, .. } => ParameterValue::Int(*default),
            Hyperparameter::UniformFloat { default, .. } => ParameterValue::Float(*default),
        }
    }

    /// Draws a value uniformly from the hyperparameter's range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParameterValue {
        match self {
            Hyperparameter::UniformInteger { lower, upper, .. } => {
                ParameterValue::Int(rng.gen_range(*lower..=*upper))
            }
            Hyperparameter::UniformFloat { lower, upper, .. } => {
                ParameterValue::Float(rng.gen_range(*lower..=*upper))
            }
        }
    }
}

/// An ordered collection of hyperparameters describing everything a
/// configuration optimizer may tune for one pipeline component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSpace {
    hyperparameters: Vec<Hyperparameter>,
}

impl ConfigurationSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hyperparameter to the space. Names must be unique.
    pub fn add(&mut self, hyperparameter: Hyperparameter) -> Result<(), SearchSpaceError> {
        if self.get(hyperparameter.name()).is_some() {
            return Err(SearchSpaceError::DuplicateName(
                hyperparameter.name().to_string(),
            ));
        }
        self.hyperparameters.push(hyperparameter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Hyperparameter> {
        self.hyperparameters.iter().find(|hp| hp.name() == name)
    }

    pub fn len(&self) -> usize {
        self.hyperparameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hyperparameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hyperparameter> {
        self.hyperparameters.iter()
    }

    /// Draws one value per hyperparameter, in insertion order.
    pub fn sample_configuration<R: Rng>(&self, rng: &mut R) -> Vec<(String, ParameterValue)> {
        self.hyperparameters
            .iter()
            .map(|hp| (hp.name().to_string(), hp.sample(rng)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_inverted_bounds() {
        let result = Hyperparameter::uniform_integer("T_0", ValueRange::new(20, 1, 1));
        assert!(matches!(
            result,
            Err(SearchSpaceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_default_outside_bounds() {
        let result = Hyperparameter::uniform_float("T_mult", ValueRange::new(1.0, 2.0, 3.5));
        assert!(matches!(
            result,
            Err(SearchSpaceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut space = ConfigurationSpace::new();
        space
            .add(Hyperparameter::uniform_integer("T_0", ValueRange::new(1, 20, 1)).unwrap())
            .unwrap();
        let duplicate = Hyperparameter::uniform_integer("T_0", ValueRange::new(1, 5, 2)).unwrap();
        assert_eq!(
            space.add(duplicate),
            Err(SearchSpaceError::DuplicateName("T_0".to_string()))
        );
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn samples_stay_within_bounds() {
        let mut space = ConfigurationSpace::new();
        space
            .add(Hyperparameter::uniform_integer("T_0", ValueRange::new(1, 20, 1)).unwrap())
            .unwrap();
        space
            .add(Hyperparameter::uniform_float("T_mult", ValueRange::new(1.0, 2.0, 1.0)).unwrap())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let config = space.sample_configuration(&mut rng);
            assert_eq!(config.len(), 2);
            let t_0 = config[0].1.as_int().unwrap();
            assert!((1..=20).contains(&t_0));
            let t_mult = config[1].1.as_float().unwrap();
            assert!((1.0..=2.0).contains(&t_mult));
        }
    }

    #[test]
    fn default_values_follow_declared_ranges() {
        let hp = Hyperparameter::uniform_float("T_mult", ValueRange::new(1.0, 2.0, 1.5)).unwrap();
        assert_eq!(hp.default_value(), ParameterValue::Float(1.5));
        assert_eq!(hp.name(), "T_mult");
    }
}
