//! Per-drawing settings

use super::defaults;
use crate::types::{Angle, Length, NumericError, Point};

/// Settings fixed when a `Drawing` is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingConfig {
    /// Length of a two-terminal element when nothing else sets one
    pub unit: Length,
    /// Initial cursor position
    pub origin: Point,
    /// Initial drawing direction
    pub direction: Angle,
    /// Gap between an element's bounds and its labels
    pub label_offset: Length,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        DrawingConfig {
            unit: defaults::UNIT,
            origin: defaults::ORIGIN,
            direction: defaults::DIRECTION,
            label_offset: defaults::LABEL_OFFSET,
        }
    }
}

impl DrawingConfig {
    /// Default settings with a different unit length
    pub fn try_new(unit: f64) -> Result<Self, NumericError> {
        DrawingConfig::default().with_unit(unit)
    }

    pub fn with_unit(mut self, unit: f64) -> Result<Self, NumericError> {
        self.unit = Length::try_positive(unit)?;
        Ok(self)
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Result<Self, NumericError> {
        self.origin = Point::try_new(x, y)?;
        Ok(self)
    }

    pub fn with_direction(mut self, degrees: f64) -> Result<Self, NumericError> {
        self.direction = Angle::try_new(degrees)?;
        Ok(self)
    }

    pub fn with_label_offset(mut self, offset: f64) -> Result<Self, NumericError> {
        self.label_offset = Length::try_new(offset)?;
        Ok(self)
    }

    /// Re-check every field; public fields can be set directly
    pub fn validate(&self) -> Result<(), NumericError> {
        Length::try_positive(self.unit.0)?;
        Point::try_new(self.origin.x.0, self.origin.y.0)?;
        Angle::try_new(self.direction.0)?;
        Length::try_new(self.label_offset.0)?;
        Ok(())
    }
}
