//! Fresnel equations for a lossless interface.
//!
//! Snell's law gives the direction of the transmitted ray. The Fresnel
//! equations give how the incident power is shared between the reflected and
//! transmitted rays, which the info panel and the angle sweep report alongside
//! the refraction angle.
//!
//! The Fresnel calculations provide:
//! - Reflection and transmission amplitude coefficients for p and s polarizations
//! - Unpolarized power reflectance and transmittance
//! - Full reflection under total internal reflection
//!
//! Refractive indices are real here: the media are transparent.

use nalgebra::Vector2;

use crate::snell::Refraction;


/// Computes Fresnel reflection amplitude coefficients.
///
/// **Context**: The share of power reflected at the lens depends on
/// polarization as well as on the incidence and refraction angles.
///
/// **How it Works**: Applies the Fresnel reflection formulas to the p-polarized
/// (parallel) and s-polarized (perpendicular) components. Angles are in
/// radians. Returns `(rp, rs)`.
pub fn refl(n1: f32, n2: f32, theta_i: f32, theta_t: f32) -> Vector2<f32> {
    let cti = theta_i.cos();
    let ctt = theta_t.cos();
    let rp = (n2 * cti - n1 * ctt) / (n1 * ctt + n2 * cti);
    let rs = (n1 * cti - n2 * ctt) / (n1 * cti + n2 * ctt);
    Vector2::new(rp, rs)
}

/// Computes Fresnel transmission amplitude coefficients `(tp, ts)`. Angles in radians.
pub fn refr(n1: f32, n2: f32, theta_i: f32, theta_t: f32) -> Vector2<f32> {
    let cti = theta_i.cos();
    let ctt = theta_t.cos();
    let tp = (2.0 * n1 * cti) / (n1 * ctt + n2 * cti);
    let ts = (2.0 * n1 * cti) / (n1 * cti + n2 * ctt);
    Vector2::new(tp, ts)
}

/// Unpolarized power reflectance for an incidence angle in degrees.
///
/// Uses the refraction outcome from [`crate::snell`]; under total internal
/// reflection all power is reflected.
pub fn reflectance(n1: f32, n2: f32, theta_i: f32, refraction: &Refraction) -> f32 {
    match refraction {
        Refraction::TotalInternalReflection => 1.0,
        Refraction::Refracted { theta_t } => {
            let r = refl(n1, n2, theta_i.to_radians(), theta_t.to_radians());
            (r.norm_squared() / 2.0).clamp(0.0, 1.0)
        }
    }
}

/// Unpolarized power transmittance, the complement of [`reflectance`].
pub fn transmittance(n1: f32, n2: f32, theta_i: f32, refraction: &Refraction) -> f32 {
    1.0 - reflectance(n1, n2, theta_i, refraction)
}
