use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("Scaler was fit on {expected} features, got {actual}")]
    InputWidth { expected: usize, actual: usize },
}

/// Maps an assembled feature row to a normalized row of the same width
pub trait FeatureScaler: Send + Sync {
    fn n_features_in(&self) -> usize;

    /// Column names recorded at fit time, if the scaler was fit on named columns
    fn feature_names_in(&self) -> Option<&[String]>;

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ScaleError>;
}

/// Standardization: `(x - mean) / scale`
///
/// Either statistic may be absent when the scaler was fit without centering or
/// without scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub n_features_in: usize,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

/// Range scaling: `x * scale + min`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub n_features_in: usize,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    pub scale: Vec<f64>,
    pub min: Vec<f64>,
}

/// Any scaler the artifact format can carry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

/// Problems with fitted scaler parameters found while loading them
#[derive(Debug, Error, PartialEq)]
pub enum ScalerSpecError {
    #[error("{name} has {actual} entries, expected {expected}")]
    StatsWidth {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name}[{index}] is not finite")]
    NonFinite { name: &'static str, index: usize },

    #[error("scale[{index}] is zero")]
    ZeroScale { index: usize },

    #[error("feature_names_in has {actual} entries, expected {expected}")]
    NamesWidth { expected: usize, actual: usize },
}

fn check_stats(name: &'static str, stats: &[f64], width: usize) -> Result<(), ScalerSpecError> {
    if stats.len() != width {
        return Err(ScalerSpecError::StatsWidth {
            name,
            expected: width,
            actual: stats.len(),
        });
    }
    if let Some(index) = stats.iter().position(|v| !v.is_finite()) {
        return Err(ScalerSpecError::NonFinite { name, index });
    }
    Ok(())
}

fn check_names(names: &Option<Vec<String>>, width: usize) -> Result<(), ScalerSpecError> {
    match names {
        Some(names) if names.len() != width => Err(ScalerSpecError::NamesWidth {
            expected: width,
            actual: names.len(),
        }),
        _ => Ok(()),
    }
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), ScalerSpecError> {
        check_names(&self.feature_names_in, self.n_features_in)?;
        if let Some(mean) = &self.mean {
            check_stats("mean", mean, self.n_features_in)?;
        }
        if let Some(scale) = &self.scale {
            check_stats("scale", scale, self.n_features_in)?;
            if let Some(index) = scale.iter().position(|s| *s == 0.0) {
                return Err(ScalerSpecError::ZeroScale { index });
            }
        }
        Ok(())
    }
}

impl MinMaxScaler {
    pub fn validate(&self) -> Result<(), ScalerSpecError> {
        check_names(&self.feature_names_in, self.n_features_in)?;
        check_stats("scale", &self.scale, self.n_features_in)?;
        check_stats("min", &self.min, self.n_features_in)
    }
}

impl ScalerSpec {
    pub fn validate(&self) -> Result<(), ScalerSpecError> {
        match self {
            ScalerSpec::Standard(s) => s.validate(),
            ScalerSpec::MinMax(s) => s.validate(),
        }
    }

    pub fn into_scaler(self) -> Box<dyn FeatureScaler> {
        match self {
            ScalerSpec::Standard(s) => Box::new(s),
            ScalerSpec::MinMax(s) => Box::new(s),
        }
    }
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), ScaleError> {
    if row.len() != expected {
        return Err(ScaleError::InputWidth {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}

impl FeatureScaler for StandardScaler {
    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ScaleError> {
        check_width(self.n_features_in, row)?;

        Ok(row
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => *x,
                };
                match &self.scale {
                    Some(scale) => centered / scale[i],
                    None => centered,
                }
            })
            .collect())
    }
}

impl FeatureScaler for MinMaxScaler {
    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ScaleError> {
        check_width(self.n_features_in, row)?;

        Ok(row
            .iter()
            .zip(self.scale.iter().zip(&self.min))
            .map(|(x, (scale, min))| x * scale + min)
            .collect())
    }
}
