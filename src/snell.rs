//! Snell's law for a single refracting interface.
//!
//! This module is the physics core of the crate. Every consumer (the
//! interactive viewer, the angle sweep and the Python bindings) calls into the
//! same calculator rather than re-deriving the refraction angle itself.
//!
//! The calculator provides:
//! - Refraction angle from incidence angle and a refractive index pair
//! - Total internal reflection as an explicit, tagged outcome
//! - Clamping of floating-point overshoot at grazing refraction
//! - Critical angle for a dense-to-rare interface
//!
//! # Conventions
//!
//! Public angles are in degrees, measured from the optical axis. `n1` is the
//! index of the medium carrying the incident ray and `n2` the index of the
//! medium carrying the refracted ray.

use serde::{Deserialize, Serialize};

use crate::settings::SIN_CLAMP_TOLERANCE;


/// Outcome of refracting a ray at an interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Refraction {
    /// The ray is transmitted at `theta_t` degrees from the axis.
    Refracted { theta_t: f32 },
    /// No real refraction angle exists; the ray is fully reflected.
    TotalInternalReflection,
}

impl Refraction {
    /// The refraction angle in degrees, or `None` under total internal reflection.
    pub fn angle(&self) -> Option<f32> {
        match self {
            Refraction::Refracted { theta_t } => Some(*theta_t),
            Refraction::TotalInternalReflection => None,
        }
    }

    pub fn is_tir(&self) -> bool {
        matches!(self, Refraction::TotalInternalReflection)
    }
}

/// Computes the refraction angle for an incidence angle and refractive index pair.
///
/// **Context**: The interactive shells only know the current incidence angle and
/// the two media. They need either the angle of the transmitted ray or a clear
/// signal that none exists, without any chance of a domain error escaping.
///
/// **How it Works**: Evaluates `n1 sin(theta_i) / n2` and checks it against 1
/// before taking the inverse sine. Overshoot within [`SIN_CLAMP_TOLERANCE`] is
/// clamped to exactly 1. A non-positive `n2` or a non-finite sine resolves to
/// [`Refraction::TotalInternalReflection`].
///
/// # Example
/// ```rust
/// use lensa::snell::{refraction_angle, Refraction};
///
/// let theta_t = refraction_angle(30.0, 1.0, 1.5).angle().unwrap();
/// assert!((theta_t - 19.47).abs() < 0.01);
/// assert_eq!(refraction_angle(45.0, 1.5, 1.0), Refraction::TotalInternalReflection);
/// ```
pub fn refraction_angle(theta_i: f32, n1: f32, n2: f32) -> Refraction {
    if !(n2 > 0.0) {
        return Refraction::TotalInternalReflection;
    }
    if n1 == n2 && theta_i.is_finite() {
        return Refraction::Refracted { theta_t: theta_i };
    }

    let sin_theta_t = get_sin_theta_t(theta_i.to_radians(), n1, n2);

    // also rejects NaN
    if !(sin_theta_t.abs() <= 1.0 + SIN_CLAMP_TOLERANCE) {
        return Refraction::TotalInternalReflection;
    }

    let theta_t = sin_theta_t.clamp(-1.0, 1.0).asin().to_degrees();
    Refraction::Refracted { theta_t }
}

/// Sine of the transmitted angle from Snell's law. `theta_i` is in radians.
///
/// No domain checks are made: the result may exceed 1 in magnitude, or be
/// infinite when `n2` is zero.
pub fn get_sin_theta_t(theta_i: f32, n1: f32, n2: f32) -> f32 {
    n1 * theta_i.sin() / n2
}

/// Critical angle in degrees for light travelling from `n1` into `n2`.
///
/// Incidence angles above this produce total internal reflection. Returns
/// `None` when no critical angle exists, i.e. the ray enters an equally or more
/// dense medium, or either index is not positive.
pub fn critical_angle(n1: f32, n2: f32) -> Option<f32> {
    if !(n1 > 0.0 && n2 > 0.0) || n1 <= n2 {
        return None;
    }
    Some((n2 / n1).asin().to_degrees())
}
