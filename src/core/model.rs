use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Model expects {expected} features, got {actual}")]
    InputWidth { expected: usize, actual: usize },

    #[error("Model produced a non-finite prediction: {0}")]
    NonFinite(f64),
}

/// Maps a normalized feature row to a single predicted value
pub trait Regressor: Send + Sync {
    fn n_features_in(&self) -> usize;

    fn feature_names_in(&self) -> Option<&[String]>;

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// Fitted linear regressor: `coef · x + intercept`
///
/// Ordinary least squares, ridge, lasso and elastic-net fits all share this
/// prediction form; `estimator` records which one produced the coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default = "default_estimator")]
    pub estimator: String,
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

fn default_estimator() -> String {
    "linear_regression".to_string()
}

/// Problems with fitted model parameters found while loading them
#[derive(Debug, Error, PartialEq)]
pub enum ModelSpecError {
    #[error("coef is empty")]
    EmptyCoef,

    #[error("coef[{0}] is not finite")]
    NonFiniteCoef(usize),

    #[error("intercept is not finite")]
    NonFiniteIntercept,

    #[error("feature_names_in has {names} entries for {coef} coefficients")]
    NamesWidth { names: usize, coef: usize },
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ModelSpecError> {
        if self.coef.is_empty() {
            return Err(ModelSpecError::EmptyCoef);
        }
        if let Some(idx) = self.coef.iter().position(|c| !c.is_finite()) {
            return Err(ModelSpecError::NonFiniteCoef(idx));
        }
        if !self.intercept.is_finite() {
            return Err(ModelSpecError::NonFiniteIntercept);
        }
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.coef.len() {
                return Err(ModelSpecError::NamesWidth {
                    names: names.len(),
                    coef: self.coef.len(),
                });
            }
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features_in(&self) -> usize {
        self.coef.len()
    }

    fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coef.len() {
            return Err(ModelError::InputWidth {
                expected: self.coef.len(),
                actual: row.len(),
            });
        }

        let value = row
            .iter()
            .zip(&self.coef)
            .map(|(x, c)| x * c)
            .sum::<f64>()
            + self.intercept;

        if !value.is_finite() {
            return Err(ModelError::NonFinite(value));
        }

        Ok(value)
    }
}
