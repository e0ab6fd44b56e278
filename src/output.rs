use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::{params::SimParams, result::SweepResult, snell::Refraction};

/// Warning shown when the refracted ray does not exist.
pub const TIR_MESSAGE: &str = "Total internal reflection!";
pub const SWEEP_TABLE_FILE: &str = "refraction_sweep";
pub const SWEEP_SUMMARY_FILE: &str = "refraction_summary.json";


fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Text lines of the parameter panel.
///
/// **Context**: The viewer draws these in its top-left corner and the headless
/// mode prints them, so both show the same values for the same record.
///
/// **How it Works**: Formats each field of the record, then appends the
/// refraction angle (or the TIR outcome) and the reflectance.
pub fn info_lines(params: &SimParams) -> Vec<String> {
    let refraction = params.refraction();
    let refraction_line = match refraction {
        Refraction::Refracted { theta_t } => format!("Refraction angle: {:.2}°", theta_t),
        Refraction::TotalInternalReflection => {
            "Refraction angle: none (total internal reflection)".to_string()
        }
    };
    vec![
        format!("Incidence angle: {}°", params.angle_incident),
        format!("n1 (incident medium): {}", params.n1),
        format!("n2 (lens medium): {}", params.n2),
        format!("Object: {}", params.object),
        format!("Lens diameter: {}px", params.lens_diameter),
        format!("Reflection: {}", on_off(params.show_reflection)),
        format!("Refraction: {}", on_off(params.show_refraction)),
        refraction_line,
        format!("Reflectance: {:.1}%", params.reflectance() * 100.0),
    ]
}

/// Write the sweep as a whitespace separated table of
/// `theta_i theta_t reflectance`, with `nan` for totally reflected rows.
pub fn write_sweep(dir: &Path, result: &SweepResult) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(SWEEP_TABLE_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for row in &result.rows {
        let theta_t = row
            .refraction
            .angle()
            .map_or_else(|| "nan".to_string(), |theta_t| theta_t.to_string());
        writeln!(
            writer,
            "{}",
            [row.theta_i.to_string(), theta_t, row.reflectance.to_string()]
                .iter()
                .join(" ")
        )?;
    }
    writer.flush()?;

    Ok(path)
}

#[derive(Serialize)]
struct Summary<'a> {
    generated: String,
    tir_count: usize,
    first_tir: Option<f32>,
    #[serde(flatten)]
    result: &'a SweepResult,
}

/// Write a JSON summary of the sweep, stamped with the local time.
pub fn write_summary(dir: &Path, result: &SweepResult) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(SWEEP_SUMMARY_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let summary = Summary {
        generated: chrono::Local::now().to_rfc3339(),
        tir_count: result.tir_count(),
        first_tir: result.first_tir(),
        result,
    };
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writer.flush()?;

    Ok(path)
}
