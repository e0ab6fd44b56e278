use lensa::{fresnel, output, params::SimParams, snell};
use pyo3::prelude::*;

/// Refraction angle in degrees, or None under total internal reflection.
#[pyfunction]
#[pyo3(name = "snell")]
fn refraction_angle(theta_i: f32, n1: f32, n2: f32) -> Option<f32> {
    snell::refraction_angle(theta_i, n1, n2).angle()
}

/// Critical angle in degrees for light going from n1 into n2, if one exists.
#[pyfunction]
fn critical_angle(n1: f32, n2: f32) -> Option<f32> {
    snell::critical_angle(n1, n2)
}

/// Unpolarized power reflectance at the interface.
#[pyfunction]
fn reflectance(theta_i: f32, n1: f32, n2: f32) -> f32 {
    let refraction = snell::refraction_angle(theta_i, n1, n2);
    fresnel::reflectance(n1, n2, theta_i, &refraction)
}

/// Lines of the parameter panel for a parameter record.
#[pyfunction]
fn info_lines(params: SimParams) -> Vec<String> {
    output::info_lines(&params)
}

/// Refraction at a convex lens, implemented in Rust.
#[pymodule]
fn _lensa_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(refraction_angle, m)?)?;
    m.add_function(wrap_pyfunction!(critical_angle, m)?)?;
    m.add_function(wrap_pyfunction!(reflectance, m)?)?;
    m.add_function(wrap_pyfunction!(info_lines, m)?)?;
    m.add_class::<SimParams>()?;
    m.add("TIR_MESSAGE", output::TIR_MESSAGE)?;
    Ok(())
}
