//! Classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Dimension, DimensionScores};
use crate::domain::foundation::ValidationError;

/// How a profile's current values were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMethod {
    Ml,
    Heuristic,
    /// Never classified.
    Default,
}

impl fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassificationMethod::Ml => "ml",
            ClassificationMethod::Heuristic => "heuristic",
            ClassificationMethod::Default => "default",
        };
        write!(f, "{}", s)
    }
}

/// One classification outcome: values in `[-1, 1]`, confidences in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub(super) dimensions: DimensionScores,
    pub(super) confidence: DimensionScores,
    pub(super) method: ClassificationMethod,
}

impl Prediction {
    pub fn new(
        dimensions: DimensionScores,
        confidence: DimensionScores,
        method: ClassificationMethod,
    ) -> Result<Self, ValidationError> {
        if method == ClassificationMethod::Default {
            return Err(ValidationError::invalid_format(
                "method",
                "a prediction must come from the model or the heuristic",
            ));
        }
        for dim in Dimension::ALL {
            ValidationError::check_range(dim.key(), -1.0, 1.0, dimensions.get(dim))?;
            ValidationError::check_range(
                &format!("confidence.{}", dim.key()),
                0.0,
                1.0,
                confidence.get(dim),
            )?;
        }
        Ok(Self {
            dimensions,
            confidence,
            method,
        })
    }

    pub fn dimensions(&self) -> &DimensionScores {
        &self.dimensions
    }

    pub fn confidence(&self) -> &DimensionScores {
        &self.confidence
    }

    pub fn method(&self) -> ClassificationMethod {
        self.method
    }
}
