//! Drawing routines for the interactive lens viewer.
//!
//! This module turns the pure scene description into macroquad draw calls.
//! Nothing here computes physics: ray directions come from
//! [`RayPaths`](crate::scene::RayPaths) and panel text from
//! [`output::info_lines`](crate::output::info_lines).
//!
//! The drawing system provides:
//! - Optical axis, lens and object rendering
//! - Incident, reflected and refracted rays with a TIR warning
//! - Parameter panel and control buttons with hover highlighting

use macroquad::prelude::*;
use nalgebra::Point2;

use crate::controls::Button;
use crate::objects::ObjectKind;
use crate::output::{self, TIR_MESSAGE};
use crate::params::SimParams;
use crate::scene::{object_anchor, RayPaths, Segment};

const FONT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 25.0;
const RAY_THICKNESS: f32 = 3.0;
const LENS_THICKNESS: f32 = 20.0;

const INCIDENT_COLOR: Color = YELLOW;
const REFLECTED_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const REFRACTED_COLOR: Color = Color::new(0.0, 0.78, 0.0, 1.0);
const LENS_COLOR: Color = Color::new(0.59, 0.78, 1.0, 1.0);
const GLASS_COLOR: Color = Color::new(0.71, 0.94, 1.0, 1.0);
const BUTTON_COLOR: Color = Color::new(0.82, 0.82, 0.82, 1.0);
const BUTTON_HOVER_COLOR: Color = Color::new(0.63, 0.63, 0.63, 1.0);

fn draw_segment(segment: &Segment, thickness: f32, color: Color) {
    draw_line(
        segment.start.x,
        segment.start.y,
        segment.end.x,
        segment.end.y,
        thickness,
        color,
    );
}

/// Horizontal optical axis through the lens centre, with its label.
pub fn draw_optical_axis(center: Point2<f32>) {
    draw_line(0.0, center.y, screen_width(), center.y, 2.0, BLACK);
    draw_text("Optical Axis", 20.0, center.y - 12.0, FONT_SIZE, BLACK);
}

/// Renders the selected object standing on the axis left of the lens.
///
/// **Context**: The object gives the scene a sense of scale and changes with
/// the object selector. It does not take part in the ray computation.
///
/// **How it Works**: Every shape is anchored at the point returned by
/// [`object_anchor`] and extends upwards from the axis.
pub fn draw_object(object: ObjectKind, center: Point2<f32>) {
    let base = object_anchor(center);
    let (x, y) = (base.x, base.y);

    match object {
        ObjectKind::Arrow => {
            draw_line(x, y, x, y - 100.0, 6.0, BLUE);
            draw_triangle(
                vec2(x - 10.0, y - 100.0),
                vec2(x + 10.0, y - 100.0),
                vec2(x, y - 120.0),
                BLUE,
            );
        }
        ObjectKind::Pencil => {
            draw_rectangle(x - 8.0, y - 100.0, 16.0, 100.0, BROWN);
            draw_triangle(
                vec2(x - 8.0, y - 100.0),
                vec2(x + 8.0, y - 100.0),
                vec2(x, y - 115.0),
                ORANGE,
            );
        }
        ObjectKind::Glass => {
            draw_rectangle(x - 25.0, y - 100.0, 50.0, 100.0, GLASS_COLOR);
            draw_rectangle_lines(x - 25.0, y - 100.0, 50.0, 100.0, 2.0, BLACK);
        }
        ObjectKind::Ball => {
            draw_circle(x, y - 50.0, 30.0, RED);
            draw_circle_lines(x, y - 50.0, 30.0, 2.0, WHITE);
        }
        ObjectKind::Book => {
            draw_rectangle(x - 30.0, y - 80.0, 60.0, 80.0, PURPLE);
            draw_line(x, y - 80.0, x, y, 2.0, WHITE);
            draw_rectangle_lines(x - 30.0, y - 80.0, 60.0, 80.0, 2.0, BLACK);
        }
    }
}

/// Convex lens as a thin ellipse centred on the axis.
pub fn draw_lens(center: Point2<f32>, diameter: f32) {
    draw_ellipse(
        center.x,
        center.y,
        LENS_THICKNESS / 2.0,
        diameter / 2.0,
        0.0,
        LENS_COLOR,
    );
    draw_text(
        "Convex Lens",
        center.x - 55.0,
        center.y + diameter / 2.0 + 25.0,
        FONT_SIZE,
        BLACK,
    );
}

/// Draws the traced rays and, when needed, the TIR warning.
pub fn draw_rays(paths: &RayPaths) {
    draw_segment(&paths.incident, RAY_THICKNESS, INCIDENT_COLOR);

    if let Some(reflected) = &paths.reflected {
        draw_segment(reflected, RAY_THICKNESS, REFLECTED_COLOR);
    }
    if let Some(refracted) = &paths.refracted {
        draw_segment(refracted, RAY_THICKNESS, REFRACTED_COLOR);
    }
    if paths.show_tir_warning {
        draw_text(
            TIR_MESSAGE,
            50.0,
            screen_height() - 40.0,
            FONT_SIZE,
            REFLECTED_COLOR,
        );
    }
}

/// Parameter panel in the top-left corner.
pub fn draw_info(params: &SimParams) {
    for (i, line) in output::info_lines(params).iter().enumerate() {
        draw_text(line, 20.0, 35.0 + i as f32 * LINE_HEIGHT, FONT_SIZE, BLACK);
    }
}

/// Draws the control buttons, highlighting the one under the mouse.
pub fn draw_buttons(buttons: &[Button], mouse: (f32, f32)) {
    for button in buttons {
        let color = if button.contains(mouse.0, mouse.1) {
            BUTTON_HOVER_COLOR
        } else {
            BUTTON_COLOR
        };
        draw_rectangle(button.x, button.y, button.w, button.h, color);
        draw_text(
            button.control.label(),
            button.x + 10.0,
            button.y + 26.0,
            FONT_SIZE,
            BLACK,
        );
    }
}
