use macroquad::prelude::*;
use nalgebra::Point2;

use crate::controls::{self, Button};
use crate::helpers::{draw_buttons, draw_info, draw_lens, draw_object, draw_optical_axis, draw_rays};
use crate::params::SimParams;
use crate::scene::RayPaths;
use crate::settings::Settings;

/// Opens the viewer window and runs it until the window is closed or Escape is pressed.
pub fn launch(settings: Settings) {
    let conf = Conf {
        window_title: settings.window_title.clone(),
        window_width: settings.window_width,
        window_height: settings.window_height,
        ..Default::default()
    };
    let params = SimParams::from_settings(&settings);
    macroquad::Window::from_config(conf, run(params));
}

/// Frame loop. The parameter record is replaced, never mutated, by each control.
pub async fn run(mut params: SimParams) {
    log::info!("Starting viewer with {:?}", params);

    loop {
        clear_background(WHITE);

        let center = Point2::new(screen_width() / 2.0, screen_height() / 2.0);
        let buttons: Vec<Button> = controls::buttons(screen_width());
        let mouse = mouse_position();

        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(control) = controls::button_at(&buttons, mouse.0, mouse.1) {
                params = params.apply(control);
                log::debug!("{} -> {:?}", control.name(), params);
            }
        }

        draw_optical_axis(center);
        draw_object(params.object, center);
        draw_lens(center, params.lens_diameter);
        draw_rays(&RayPaths::trace(&params, center));
        draw_info(&params);
        draw_buttons(&buttons, mouse);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        next_frame().await;
    }
}
