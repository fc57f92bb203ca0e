#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use cg_labs::{app, scenes::City};

fn main() -> eframe::Result {
    cg_labs::init_logging();

    let config = City::default_config().from_env();
    let city = City::new(config, &mut rand::thread_rng());
    app::run(city)
}
