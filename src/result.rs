use itertools::Itertools;
use serde::Serialize;

use crate::snell::Refraction;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(theta_i: f32, theta_t: Option<f32>) -> SweepRow {
        SweepRow {
            theta_i,
            refraction: match theta_t {
                Some(theta_t) => Refraction::Refracted { theta_t },
                None => Refraction::TotalInternalReflection,
            },
            reflectance: if theta_t.is_some() { 0.04 } else { 1.0 },
        }
    }

    #[test]
    fn tir_summary() {
        let result = SweepResult {
            n1: 1.5,
            n2: 1.0,
            critical_angle: Some(41.81),
            rows: vec![row(30.0, Some(48.6)), row(45.0, None), row(60.0, None)],
        };
        assert_eq!(result.first_tir(), Some(45.0));
        assert_eq!(result.tir_count(), 2);
    }

    #[test]
    fn no_tir() {
        let result = SweepResult {
            n1: 1.0,
            n2: 1.5,
            critical_angle: None,
            rows: vec![row(0.0, Some(0.0)), row(30.0, Some(19.47))],
        };
        assert_eq!(result.first_tir(), None);
        assert_eq!(result.tir_count(), 0);
    }
}

/// Outcome at a single incidence angle of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub theta_i: f32,
    pub refraction: Refraction,
    pub reflectance: f32,
}

/// Outcome of an incidence-angle sweep for one pair of media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub n1: f32,
    pub n2: f32,
    pub critical_angle: Option<f32>,
    /// Rows in ascending incidence angle.
    pub rows: Vec<SweepRow>,
}

impl SweepResult {
    /// Smallest swept incidence angle that is totally internally reflected.
    pub fn first_tir(&self) -> Option<f32> {
        self.rows
            .iter()
            .find(|row| row.refraction.is_tir())
            .map(|row| row.theta_i)
    }

    pub fn tir_count(&self) -> usize {
        self.rows.iter().filter(|row| row.refraction.is_tir()).count()
    }

    pub fn print(&self) {
        println!("n1 = {}, n2 = {}", self.n1, self.n2);
        match self.critical_angle {
            Some(theta_c) => println!("Critical angle: {:.4}°", theta_c),
            None => println!("Critical angle: none"),
        }
        println!(
            "Swept {} angles, {} totally internally reflected",
            self.rows.len(),
            self.tir_count()
        );
        if let Some(theta) = self.first_tir() {
            println!("First TIR angle: {:.4}°", theta);
        }
        let angles = self
            .rows
            .iter()
            .filter_map(|row| row.refraction.angle())
            .minmax();
        if let Some((min, max)) = angles.into_option() {
            println!("Refraction angles: {:.4}° .. {:.4}°", min, max);
        }
    }
}
