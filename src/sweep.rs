//! Incidence-angle sweeps for a fixed pair of media.
//!
//! A sweep evaluates the refraction calculator over a linear grid of incidence
//! angles and collects the refraction angle and reflectance at each one. It is
//! the headless counterpart of stepping the angle by hand in the viewer.
//!
//! The sweep system provides:
//! - Parallel evaluation of independent angles with rayon
//! - Progress tracking for long sweeps
//! - Critical angle and first-TIR reporting
//! - Table and JSON output through [`crate::output`]

use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array1;
use rayon::prelude::*;

use crate::{
    fresnel,
    result::{SweepResult, SweepRow},
    settings::{validate_sweep, Settings},
    snell,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(n1: f32, n2: f32, start: f32, end: f32, steps: usize) -> Settings {
        Settings {
            n1,
            n2,
            sweep_start: start,
            sweep_end: end,
            sweep_steps: steps,
            ..Settings::default()
        }
    }

    #[test]
    fn grid_is_linear_and_inclusive() {
        let sweep = Sweep::new(&settings(1.0, 1.5, 0.0, 80.0, 9)).unwrap();
        assert_eq!(sweep.angles.len(), 9);
        assert_eq!(sweep.angles[0], 0.0);
        assert!((sweep.angles[4] - 40.0).abs() < 1e-4);
        assert!((sweep.angles[8] - 80.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_invalid_range() {
        assert!(Sweep::new(&settings(1.0, 1.5, 10.0, 10.0, 5)).is_err());
        assert!(Sweep::new(&settings(1.0, 1.5, 0.0, 90.0, 5)).is_err());
        assert!(Sweep::new(&settings(1.0, 1.5, 0.0, 45.0, 1)).is_err());
    }

    #[test]
    fn range_errors_match_config_validation() {
        let bad = settings(1.0, 1.5, 60.0, 30.0, 5);
        let sweep_err = Sweep::new(&bad).unwrap_err().to_string();
        let direct_err = validate_sweep(60.0, 30.0, 5).unwrap_err().to_string();
        assert_eq!(sweep_err, direct_err);
        assert!(sweep_err.contains("[60, 30]"), "{}", sweep_err);

        let bad = settings(1.0, 1.5, 0.0, 45.0, 1);
        assert_eq!(
            Sweep::new(&bad).unwrap_err().to_string(),
            "Sweep needs at least 2 steps, got 1"
        );
    }

    #[test]
    fn rare_to_dense_has_no_tir() {
        let result = Sweep::new(&settings(1.0, 1.5, 0.0, 89.0, 90))
            .unwrap()
            .solve();
        assert_eq!(result.rows.len(), 90);
        assert_eq!(result.tir_count(), 0);
        assert_eq!(result.critical_angle, None);
        assert!(result
            .rows
            .windows(2)
            .all(|pair| pair[0].theta_i < pair[1].theta_i));
    }

    #[test]
    fn dense_to_rare_tir_starts_after_critical_angle() {
        let result = Sweep::new(&settings(1.5, 1.0, 0.0, 89.0, 90))
            .unwrap()
            .solve();
        let theta_c = result.critical_angle.unwrap();
        assert!((theta_c - 41.8103).abs() < 1e-3);
        assert_eq!(result.first_tir(), Some(42.0));
        assert_eq!(result.tir_count(), 48); // 42..=89
        for row in &result.rows {
            assert_eq!(row.refraction.is_tir(), row.theta_i > theta_c);
        }
    }
}

/// A linear grid of incidence angles for one pair of media.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub n1: f32,
    pub n2: f32,
    pub angles: Array1<f32>,
    show_progress: bool,
}

impl Sweep {
    /// Builds the angle grid from the sweep settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        validate_sweep(
            settings.sweep_start,
            settings.sweep_end,
            settings.sweep_steps,
        )?;

        let angles = Array1::linspace(
            settings.sweep_start,
            settings.sweep_end,
            settings.sweep_steps,
        );

        Ok(Self {
            n1: settings.n1,
            n2: settings.n2,
            angles,
            show_progress: false,
        })
    }

    /// Enables the terminal progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Evaluates every angle of the grid.
    ///
    /// **Context**: Each angle is an independent call to the calculator, so the
    /// grid is split across the rayon pool. Fine grids over many media pairs are
    /// the expected use.
    ///
    /// **How it Works**: Maps each angle to a [`SweepRow`] in parallel.
    /// `collect` keeps the grid order, so rows come back in ascending angle.
    pub fn solve(&self) -> SweepResult {
        let start = Instant::now();
        log::info!(
            "Sweeping {} angles for n1 = {}, n2 = {}",
            self.angles.len(),
            self.n1,
            self.n2
        );

        let pb = if self.show_progress {
            ProgressBar::new(self.angles.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg} ETA: {eta_precise}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("angle".to_string());

        let rows: Vec<SweepRow> = self
            .angles
            .to_vec()
            .par_iter()
            .map(|&theta_i| {
                let refraction = snell::refraction_angle(theta_i, self.n1, self.n2);
                let reflectance = fresnel::reflectance(self.n1, self.n2, theta_i, &refraction);
                pb.inc(1);
                SweepRow {
                    theta_i,
                    refraction,
                    reflectance,
                }
            })
            .collect();

        pb.finish_and_clear();

        let duration = start.elapsed();
        log::info!(
            "Time taken: {:.2?}, Time per angle: {:.2?}",
            duration,
            duration / rows.len().max(1) as u32
        );

        SweepResult {
            n1: self.n1,
            n2: self.n2,
            critical_angle: snell::critical_angle(self.n1, self.n2),
            rows,
        }
    }
}
