//! Ray geometry for the lens scene.
//!
//! Converts a [`SimParams`] record into line segments in screen space (origin
//! top-left, y pointing down). The lens sits at the scene centre on the
//! optical axis and the incident ray arrives from the upper left.
//!
//! The reflected ray is the incident ray mirrored about the optical axis. It
//! is not derived from the curved lens surface normal.

use nalgebra::{Point2, Vector2};

use crate::params::SimParams;
use crate::settings::{INCIDENT_RAY_LENGTH, OBJECT_DISTANCE, REFRACTED_RAY_LENGTH};
use crate::snell::Refraction;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Control;

    fn center() -> Point2<f32> {
        Point2::new(500.0, 325.0)
    }

    fn close(a: Point2<f32>, b: Point2<f32>) -> bool {
        (a - b).norm() < 1e-3
    }

    #[test]
    fn incident_ray_arrives_from_upper_left() {
        let paths = RayPaths::trace(&SimParams::default(), center());
        assert_eq!(paths.incident.end, center());
        assert!(paths.incident.start.x < center().x);
        assert!(paths.incident.start.y < center().y);
        assert!((paths.incident.length() - INCIDENT_RAY_LENGTH).abs() < 1e-3);
    }

    #[test]
    fn reflection_mirrors_incident_ray() {
        let paths = RayPaths::trace(&SimParams::default(), center());
        let reflected = paths.reflected.unwrap();
        let start = paths.incident.start;
        assert!(close(
            reflected.end,
            Point2::new(start.x, 2.0 * center().y - start.y)
        ));
    }

    #[test]
    fn refracted_ray_bends_toward_axis() {
        let paths = RayPaths::trace(&SimParams::default(), center());
        let refracted = paths.refracted.unwrap();
        let direction = refracted.direction();
        let theta_t = direction.y.atan2(direction.x).to_degrees();
        assert!((theta_t - 19.4712).abs() < 0.01, "theta_t: {}", theta_t);
        assert!(!paths.show_tir_warning);
    }

    #[test]
    fn normal_incidence_is_drawn() {
        let params = SimParams::default().with_angle(0.0).unwrap();
        let paths = RayPaths::trace(&params, center());
        let refracted = paths.refracted.unwrap();
        assert!((refracted.end.y - center().y).abs() < 1e-3);
        assert!((refracted.end.x - center().x - REFRACTED_RAY_LENGTH).abs() < 1e-3);
        assert!(!paths.show_tir_warning);
    }

    #[test]
    fn tir_hides_refracted_ray() {
        let params = SimParams::default()
            .with_indices(1.5, 1.0)
            .unwrap()
            .with_angle(60.0)
            .unwrap();
        let paths = RayPaths::trace(&params, center());
        assert!(paths.refracted.is_none());
        assert!(paths.refraction.is_tir());
        assert!(paths.show_tir_warning);

        // no warning while refraction is hidden
        let paths = RayPaths::trace(&params.apply(Control::ToggleRefraction), center());
        assert!(!paths.show_tir_warning);
    }

    #[test]
    fn toggles_hide_rays() {
        let params = SimParams::default()
            .apply(Control::ToggleReflection)
            .apply(Control::ToggleRefraction);
        let paths = RayPaths::trace(&params, center());
        assert!(paths.reflected.is_none());
        assert!(paths.refracted.is_none());
    }

    #[test]
    fn object_sits_left_of_lens() {
        assert_eq!(
            object_anchor(center()),
            Point2::new(center().x - OBJECT_DISTANCE, center().y)
        );
    }
}

/// A straight line segment in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

impl Segment {
    pub fn new(start: Point2<f32>, end: Point2<f32>) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector2<f32> {
        (self.end - self.start).normalize()
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }
}

/// The rays to draw for one parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct RayPaths {
    pub incident: Segment,
    /// `None` while reflection is hidden.
    pub reflected: Option<Segment>,
    /// `None` while refraction is hidden or under total internal reflection.
    pub refracted: Option<Segment>,
    pub refraction: Refraction,
    pub show_tir_warning: bool,
}

impl RayPaths {
    /// Traces the incident, reflected and refracted rays at the lens centre.
    ///
    /// **Context**: Both the window and any other front end need the same ray
    /// layout, and the layout depends only on the parameter record.
    ///
    /// **How it Works**: The incident ray ends at `center` at the incidence
    /// angle. The reflected ray mirrors it below the axis. The refracted ray
    /// leaves `center` to the right at the angle returned by
    /// [`crate::snell::refraction_angle`], and is omitted under total internal
    /// reflection.
    pub fn trace(params: &SimParams, center: Point2<f32>) -> Self {
        let theta_i = params.angle_incident.to_radians();
        let (sin_i, cos_i) = theta_i.sin_cos();

        let incident = Segment::new(
            center - Vector2::new(cos_i, sin_i) * INCIDENT_RAY_LENGTH,
            center,
        );

        let reflected = params.show_reflection.then(|| {
            Segment::new(
                center,
                center + Vector2::new(-cos_i, sin_i) * INCIDENT_RAY_LENGTH,
            )
        });

        let refraction = params.refraction();
        let refracted = match refraction {
            Refraction::Refracted { theta_t } if params.show_refraction => {
                let (sin_t, cos_t) = theta_t.to_radians().sin_cos();
                Some(Segment::new(
                    center,
                    center + Vector2::new(cos_t, sin_t) * REFRACTED_RAY_LENGTH,
                ))
            }
            _ => None,
        };

        Self {
            incident,
            reflected,
            refracted,
            refraction,
            show_tir_warning: params.show_refraction && refraction.is_tir(),
        }
    }
}

/// Base point of the object, on the optical axis left of the lens.
pub fn object_anchor(center: Point2<f32>) -> Point2<f32> {
    center - Vector2::new(OBJECT_DISTANCE, 0.0)
}
