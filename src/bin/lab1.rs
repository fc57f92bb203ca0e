#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use cg_labs::{app, scenes::AxisBoxes};

fn main() -> eframe::Result {
    cg_labs::init_logging();

    let config = AxisBoxes::default_config().from_env();
    app::run(AxisBoxes::new(config))
}
