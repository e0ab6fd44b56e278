//! Refraction and reflection of a light ray at a convex lens.
//!
//! The physics lives in [`snell`] and [`fresnel`]. The interactive state is an
//! immutable [`params::SimParams`] record driven by [`controls`], and
//! [`scene`] turns it into ray geometry for the viewer. [`sweep`] tabulates the
//! refraction over a range of incidence angles.

pub mod controls;
pub mod fresnel;
#[cfg(feature = "macroquad")]
pub mod helpers;
pub mod objects;
pub mod output;
pub mod params;
pub mod result;
pub mod scene;
pub mod settings;
pub mod snell;
pub mod sweep;
#[cfg(feature = "macroquad")]
pub mod viewer;
