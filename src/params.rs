//! Immutable parameter record for the lens simulation.
//!
//! The whole interactive state (incidence angle, media, selected object, lens
//! size and ray visibility) lives in one [`SimParams`] value. Controls never
//! mutate shared state: each one maps the current record to a new record, and
//! the calculator and every draw call receive the record explicitly.
//!
//! The parameter record provides:
//! - Saturating steppers for the incidence angle and lens diameter
//! - Object cycling and visibility toggles
//! - Range-checked setters for values typed in by a user
//! - Direct access to the refraction outcome and reflectance
//!
//! # Limits
//!
//! The angle stepper stays within [0°, 89°] and the lens diameter within
//! [60, 300] px. Values outside those limits can still come from configuration
//! and are then only moved back towards the range by the steppers.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controls::Control;
use crate::fresnel;
use crate::objects::ObjectKind;
use crate::settings::{
    Settings, ANGLE_STEP, LENS_DIAMETER_MAX, LENS_DIAMETER_MIN, LENS_DIAMETER_STEP, MAX_ANGLE,
    MIN_ANGLE,
};
use crate::snell::{self, Refraction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_initial_scene() {
        let params = SimParams::default();
        assert_eq!(params.angle_incident, 30.0);
        assert_eq!((params.n1, params.n2), (1.0, 1.5));
        assert_eq!(params.object, ObjectKind::Arrow);
        assert_eq!(params.lens_diameter, 120.0);
        assert!(params.show_reflection && params.show_refraction);
    }

    #[test]
    fn angle_stepper_saturates() {
        let params = SimParams {
            angle_incident: 88.0,
            ..SimParams::default()
        };
        let params = params.apply(Control::IncreaseAngle);
        assert_eq!(params.angle_incident, 89.0);
        let params = params.apply(Control::IncreaseAngle);
        assert_eq!(params.angle_incident, 89.0);

        let params = SimParams {
            angle_incident: 1.0,
            ..SimParams::default()
        };
        let params = params.apply(Control::DecreaseAngle);
        assert_eq!(params.angle_incident, 0.0);
        let params = params.apply(Control::DecreaseAngle);
        assert_eq!(params.angle_incident, 0.0);
    }

    #[test]
    fn fractional_angle_steps_stay_in_range() {
        let params = SimParams {
            angle_incident: 88.5,
            ..SimParams::default()
        };
        assert_eq!(params.apply(Control::IncreaseAngle).angle_incident, 89.0);

        let params = SimParams {
            angle_incident: 0.5,
            ..SimParams::default()
        };
        assert_eq!(params.apply(Control::DecreaseAngle).angle_incident, 0.0);
    }

    #[test]
    fn lens_stepper_saturates() {
        let mut params = SimParams::default();
        for _ in 0..30 {
            params = params.apply(Control::GrowLens);
        }
        assert_eq!(params.lens_diameter, 300.0);
        for _ in 0..30 {
            params = params.apply(Control::ShrinkLens);
        }
        assert_eq!(params.lens_diameter, 60.0);
    }

    #[test]
    fn controls_leave_original_untouched() {
        let params = SimParams::default();
        let toggled = params.apply(Control::ToggleReflection);
        assert!(params.show_reflection);
        assert!(!toggled.show_reflection);
        assert!(toggled.apply(Control::ToggleReflection).show_reflection);

        let next = params.apply(Control::NextObject);
        assert_eq!(next.object, ObjectKind::Pencil);
        assert_eq!(params.object, ObjectKind::Arrow);
    }

    #[test]
    fn setters_validate() {
        let params = SimParams::default();
        assert_eq!(params.with_angle(45.0).unwrap().angle_incident, 45.0);
        assert!(matches!(
            params.with_angle(90.0),
            Err(ParamError::AngleOutOfRange(_))
        ));
        assert!(params.with_angle(-1.0).is_err());
        assert!(params.with_angle(f32::NAN).is_err());

        assert!(params.with_indices(1.5, 1.0).is_ok());
        // degenerate n2 is accepted; the calculator reports TIR
        let degenerate = params.with_indices(1.0, 0.0).unwrap();
        assert!(degenerate.refraction().is_tir());
        assert!(matches!(
            params.with_indices(0.0, 1.0),
            Err(ParamError::InvalidIndex { name: "n1", .. })
        ));
        assert!(params.with_indices(1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn refraction_follows_record() {
        let params = SimParams::default();
        let theta_t = params.refraction().angle().unwrap();
        assert!((theta_t - 19.4712).abs() < 0.001);

        let params = params.with_indices(1.5, 1.0).unwrap().with_angle(60.0).unwrap();
        assert!(params.refraction().is_tir());
        assert_eq!(params.reflectance(), 1.0);
    }
}

/// Invalid input to the parameter record.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("incidence angle must lie in [0, 90) degrees, got {0}")]
    AngleOutOfRange(f32),
    #[error("refractive index {name} is invalid: {value}")]
    InvalidIndex { name: &'static str, value: f32 },
    #[error("unknown control '{0}'")]
    UnknownControl(String),
}

impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Complete state of the lens simulation.
#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Incidence angle in degrees from the optical axis.
    #[pyo3(get)]
    pub angle_incident: f32,
    /// Refractive index of the incident medium.
    #[pyo3(get)]
    pub n1: f32,
    /// Refractive index of the lens medium.
    #[pyo3(get)]
    pub n2: f32,
    pub object: ObjectKind,
    /// Lens height in pixels.
    #[pyo3(get)]
    pub lens_diameter: f32,
    #[pyo3(get)]
    pub show_reflection: bool,
    #[pyo3(get)]
    pub show_refraction: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            angle_incident: 30.0,
            n1: 1.0,
            n2: 1.5,
            object: ObjectKind::Arrow,
            lens_diameter: 120.0,
            show_reflection: true,
            show_refraction: true,
        }
    }
}

impl SimParams {
    /// Initial record taken from the runtime settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            angle_incident: settings.angle_incident,
            n1: settings.n1,
            n2: settings.n2,
            object: settings.object,
            lens_diameter: settings.lens_diameter,
            show_reflection: settings.show_reflection,
            show_refraction: settings.show_refraction,
        }
    }

    /// Applies a viewer control, returning the next record.
    ///
    /// **Context**: Every button in the viewer and every control name coming
    /// from Python ends up here, so this is the single place where stepper
    /// limits are enforced.
    ///
    /// **How it Works**: Steppers only move while the value is strictly inside
    /// the limit and then clamp to it. Toggles flip a flag and the object
    /// selector advances the cycle.
    pub fn apply(self, control: Control) -> Self {
        match control {
            Control::IncreaseAngle if self.angle_incident < MAX_ANGLE => Self {
                angle_incident: (self.angle_incident + ANGLE_STEP).min(MAX_ANGLE),
                ..self
            },
            Control::DecreaseAngle if self.angle_incident > MIN_ANGLE => Self {
                angle_incident: (self.angle_incident - ANGLE_STEP).max(MIN_ANGLE),
                ..self
            },
            Control::GrowLens if self.lens_diameter < LENS_DIAMETER_MAX => Self {
                lens_diameter: (self.lens_diameter + LENS_DIAMETER_STEP).min(LENS_DIAMETER_MAX),
                ..self
            },
            Control::ShrinkLens if self.lens_diameter > LENS_DIAMETER_MIN => Self {
                lens_diameter: (self.lens_diameter - LENS_DIAMETER_STEP).max(LENS_DIAMETER_MIN),
                ..self
            },
            Control::NextObject => Self {
                object: self.object.next(),
                ..self
            },
            Control::ToggleReflection => Self {
                show_reflection: !self.show_reflection,
                ..self
            },
            Control::ToggleRefraction => Self {
                show_refraction: !self.show_refraction,
                ..self
            },
            _ => self,
        }
    }

    /// Sets the incidence angle, which must lie in [0, 90).
    pub fn with_angle(self, angle_incident: f32) -> Result<Self, ParamError> {
        if !(0.0..90.0).contains(&angle_incident) {
            return Err(ParamError::AngleOutOfRange(angle_incident));
        }
        Ok(Self {
            angle_incident,
            ..self
        })
    }

    /// Sets both refractive indices. `n1` must be positive; `n2` only finite.
    pub fn with_indices(self, n1: f32, n2: f32) -> Result<Self, ParamError> {
        if !(n1.is_finite() && n1 > 0.0) {
            return Err(ParamError::InvalidIndex {
                name: "n1",
                value: n1,
            });
        }
        if !n2.is_finite() {
            return Err(ParamError::InvalidIndex {
                name: "n2",
                value: n2,
            });
        }
        Ok(Self { n1, n2, ..self })
    }

    pub fn with_object(self, object: ObjectKind) -> Self {
        Self { object, ..self }
    }

    /// Refraction of the incident ray for the current record.
    pub fn refraction(&self) -> Refraction {
        snell::refraction_angle(self.angle_incident, self.n1, self.n2)
    }

    /// Unpolarized power reflectance at the lens surface.
    pub fn reflectance(&self) -> f32 {
        fresnel::reflectance(self.n1, self.n2, self.angle_incident, &self.refraction())
    }
}

#[pymethods]
impl SimParams {
    #[new]
    #[pyo3(signature = (angle_incident=30.0, n1=1.0, n2=1.5))]
    fn py_new(angle_incident: f32, n1: f32, n2: f32) -> PyResult<Self> {
        Ok(SimParams::default()
            .with_angle(angle_incident)?
            .with_indices(n1, n2)?)
    }

    /// Name of the selected object.
    #[getter]
    fn get_object(&self) -> &'static str {
        self.object.label()
    }

    /// Apply a control by name, e.g. "increase-angle", returning a new record.
    #[pyo3(name = "apply")]
    fn py_apply(&self, control: &str) -> PyResult<Self> {
        Ok(self.apply(control.parse::<Control>()?))
    }

    #[pyo3(name = "with_angle")]
    fn py_with_angle(&self, angle_incident: f32) -> PyResult<Self> {
        Ok(self.with_angle(angle_incident)?)
    }

    #[pyo3(name = "with_indices")]
    fn py_with_indices(&self, n1: f32, n2: f32) -> PyResult<Self> {
        Ok(self.with_indices(n1, n2)?)
    }

    /// Refraction angle in degrees, or None under total internal reflection.
    fn refraction_angle(&self) -> Option<f32> {
        self.refraction().angle()
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self)
    }
}
