use egui::Key;
use glam::{Mat4, Vec3};

use crate::input::KeyEvent;

/// Angle change applied by one arrow-key press or repeat, in radians.
pub const KEY_STEP: f32 = 0.1;

/// Distance travelled by one movement-key press or repeat in the free-look camera.
pub const MOVE_STEP: f32 = 10.0;

pub const PITCH_LIMIT: f32 = 89.0;

/// A camera whose state changes only through key events.
///
/// `on_key` never mutates in place: the frame loop owns the current value and
/// replaces it with the returned one.
pub trait CameraModel: Clone + Send + 'static {
    fn on_key(&self, event: &KeyEvent) -> Self;
    fn eye(&self) -> Vec3;
    fn view_matrix(&self) -> Mat4;

    /// The camera's reset pose, regardless of how the `R` key is handled.
    fn reset(&self) -> Self;

    /// Lines shown in the side panel.
    fn describe(&self) -> Vec<String>;
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                  Orbit Camera                                                     //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// What the `R` key does to an [`OrbitCamera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Log the request and keep the current angles.
    LogOnly,
    /// Set both angles to zero.
    Zero,
}

/// Camera on a sphere of radius `distance` around `target`.
///
/// `polar` is the elevation above the XZ plane, so `polar == 0` puts the eye at
/// `target + distance * (cos azimuth, 0, sin azimuth)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    azimuth: f32,
    polar: f32,
    distance: f32,
    target: Vec3,
    up: Vec3,
    reset: ResetMode,
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            azimuth: 0.0f32,
            polar: 0.0f32,
            distance,
            target: Vec3::ZERO,
            up: Vec3::Y,
            reset: ResetMode::Zero,
        }
    }

    pub fn with_reset(mut self, reset: ResetMode) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_azimuth(mut self, azimuth: f32) -> Self {
        self.azimuth = azimuth;
        self
    }

    pub fn with_polar(mut self, polar: f32) -> Self {
        self.polar = polar;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn reset_mode(&self) -> ResetMode {
        self.reset
    }
}

impl CameraModel for OrbitCamera {
    fn on_key(&self, event: &KeyEvent) -> Self {
        if event.key == Key::R {
            if !event.is_press() {
                return self.clone();
            }
            log::info!("Reset.");
            return match self.reset {
                ResetMode::LogOnly => self.clone(),
                ResetMode::Zero => self.reset(),
            };
        }

        let mut next = self.clone();

        if !event.is_held() {
            return next;
        }

        match event.key {
            Key::ArrowUp => next.polar -= KEY_STEP,
            Key::ArrowDown => next.polar += KEY_STEP,
            Key::ArrowLeft => next.azimuth -= KEY_STEP,
            Key::ArrowRight => next.azimuth += KEY_STEP,
            _ => {}
        }
        next
    }

    fn eye(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_pol, cos_pol) = self.polar.sin_cos();
        self.target + self.distance * Vec3::new(cos_pol * cos_az, sin_pol, cos_pol * sin_az)
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.up)
    }

    fn reset(&self) -> Self {
        Self {
            azimuth: 0.0,
            polar: 0.0,
            ..self.clone()
        }
    }

    fn describe(&self) -> Vec<String> {
        let eye = self.eye();
        vec![
            format!("Azimuth: {:.2}", self.azimuth),
            format!("Polar: {:.2}", self.polar),
            format!("Distance: {:.1}", self.distance),
            format!("Eye: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z),
        ]
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                Free-look Camera                                                   //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Position + yaw/pitch camera. Angles are kept in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeLookCamera {
    pos: Vec3,
    up: Vec3,
    pitch: f32,
    yaw: f32,

    home: (Vec3, f32, f32),
}

impl FreeLookCamera {
    pub fn new() -> Self {
        Self {
            pos: Vec3::ZERO,
            up: Vec3::Y,
            pitch: 0.0f32,
            yaw: 0.0f32,
            home: (Vec3::ZERO, 0.0f32, 0.0f32),
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.home.0 = pos;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self.home.1 = yaw;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.home.2 = self.pitch;
        self
    }

    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn move_forward(&mut self, amount: f32) {
        self.pos += amount * self.front();
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.pos -= amount * self.front();
    }

    pub fn move_right(&mut self, amount: f32) {
        self.pos += self.front().cross(self.up).normalize() * amount;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.pos -= self.front().cross(self.up).normalize() * amount;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.pos.y += amount;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.pos.y -= amount;
    }

    pub fn move_pitch(&mut self, amount: f32) {
        self.pitch = (self.pitch + amount).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn move_yaw(&mut self, amount: f32) {
        self.yaw += amount;
    }
}

impl Default for FreeLookCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraModel for FreeLookCamera {
    fn on_key(&self, event: &KeyEvent) -> Self {
        if event.key == Key::R {
            if !event.is_press() {
                return self.clone();
            }
            log::info!("Reset.");
            return self.reset();
        }

        let mut next = self.clone();

        if !event.is_held() {
            return next;
        }

        let step = KEY_STEP.to_degrees();
        match event.key {
            Key::ArrowUp => next.move_pitch(step),
            Key::ArrowDown => next.move_pitch(-step),
            Key::ArrowLeft => next.move_yaw(-step),
            Key::ArrowRight => next.move_yaw(step),
            Key::W => next.move_forward(MOVE_STEP),
            Key::S => next.move_backward(MOVE_STEP),
            Key::A => next.move_left(MOVE_STEP),
            Key::D => next.move_right(MOVE_STEP),
            Key::E => next.move_up(MOVE_STEP),
            Key::Q => next.move_down(MOVE_STEP),
            _ => {}
        }
        next
    }

    fn eye(&self) -> Vec3 {
        self.pos
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pos, self.pos + self.front(), self.up)
    }

    fn reset(&self) -> Self {
        let mut next = self.clone();
        (next.pos, next.yaw, next.pitch) = self.home;
        next
    }

    fn describe(&self) -> Vec<String> {
        vec![
            format!("Yaw: {:.1}°", self.yaw),
            format!("Pitch: {:.1}°", self.pitch),
            format!("Pos: ({:.1}, {:.1}, {:.1})", self.pos.x, self.pos.y, self.pos.z),
        ]
    }
}
