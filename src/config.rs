use std::path::PathBuf;

use egui::Color32;

pub const WIDTH: f32 = 1024f32;
pub const HEIGHT: f32 = 768f32;

pub const ASSET_DIR: &str = "assets";
pub const SHADER_DIR: &str = "Shaders";

pub const ASSET_DIR_ENV: &str = "LABS_ASSET_DIR";
pub const SHADER_DIR_ENV: &str = "LABS_SHADER_DIR";

/// Perspective parameters shared by every frame of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub fov_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl ViewConfig {
    pub fn with_far(mut self, z_far: f32) -> Self {
        self.z_far = z_far;
        self
    }
}

#[derive(Debug, Clone)]
pub struct LabConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub view: ViewConfig,
    pub clear_color: Color32,
    pub orbit_distance: f32,
    pub asset_dir: PathBuf,
    pub shader_dir: PathBuf,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            title: String::from("Lab"),
            width: WIDTH,
            height: HEIGHT,
            view: ViewConfig::default(),
            clear_color: Color32::BLACK,
            orbit_distance: 300.0,
            asset_dir: PathBuf::from(ASSET_DIR),
            shader_dir: PathBuf::from(SHADER_DIR),
        }
    }
}

impl LabConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    pub fn with_clear_color(mut self, clear_color: Color32) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Applies the directory overrides from the process environment.
    pub fn from_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies directory overrides from an arbitrary lookup (used by `from_env`).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ASSET_DIR_ENV).filter(|dir| !dir.is_empty()) {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(SHADER_DIR_ENV).filter(|dir| !dir.is_empty()) {
            self.shader_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn asset(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }

    pub fn shader(&self, name: &str) -> PathBuf {
        self.shader_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_window() {
        let config = LabConfig::default();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 768.0);
        assert_eq!(config.view.fov_deg, 45.0);
        assert_eq!(config.orbit_distance, 300.0);
    }

    #[test]
    fn overrides_replace_directories() {
        let config = LabConfig::default().with_overrides(|key| match key {
            ASSET_DIR_ENV => Some("/tmp/art".into()),
            _ => None,
        });
        assert_eq!(config.asset("facade0.jpg"), PathBuf::from("/tmp/art/facade0.jpg"));
        assert_eq!(config.shader("box.vert"), PathBuf::from("Shaders/box.vert"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let config = LabConfig::default().with_overrides(|_| Some(String::new()));
        assert_eq!(config.asset_dir, PathBuf::from(ASSET_DIR));
        assert_eq!(config.shader_dir, PathBuf::from(SHADER_DIR));
    }

    #[test]
    fn far_plane_is_adjustable() {
        assert_eq!(ViewConfig::default().with_far(10000.0).z_far, 10000.0);
    }
}
