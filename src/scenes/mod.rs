pub mod axis_boxes;
pub mod city;

pub use axis_boxes::AxisBoxes;
pub use city::City;

use crate::{
    config::LabConfig,
    gfx::{CameraModel, Model},
};

/// A self-contained demo: its objects, its shaders and the camera model it is
/// viewed through.
pub trait Scene: Model + Send + 'static {
    type Camera: CameraModel;

    fn config(&self) -> &LabConfig;
    fn initial_camera(&self) -> Self::Camera;
}
