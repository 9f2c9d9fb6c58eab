//! Command-line and environment settings.

use shapeforge_core::{ConfigError, Shape};
use shapeforge_render::ExportError;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "usage: shapeforge <scene.json> <output.png> [provider]";

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}\n{USAGE}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene: {0}")]
    Scene(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scene: PathBuf,
    pub output: PathBuf,
    pub provider: String,
    /// Optional editor config file.
    pub config: Option<PathBuf>,
}

impl Settings {
    /// Positional arguments win over `SHAPEFORGE_SCENE`, `SHAPEFORGE_OUTPUT`
    /// and `SHAPEFORGE_PROVIDER`. `SHAPEFORGE_CONFIG` names an editor config.
    pub fn resolve(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let mut args = args.into_iter();
        let mut next = |var: &str| args.next().or_else(|| env(var)).filter(|v| !v.is_empty());

        let scene = next("SHAPEFORGE_SCENE")
            .ok_or_else(|| AppError::Usage("missing scene path".into()))?;
        let output = next("SHAPEFORGE_OUTPUT")
            .ok_or_else(|| AppError::Usage("missing output path".into()))?;
        let provider = next("SHAPEFORGE_PROVIDER").unwrap_or_else(|| "passthrough".to_string());

        Ok(Self {
            scene: scene.into(),
            output: output.into(),
            provider,
            config: env("SHAPEFORGE_CONFIG").filter(|v| !v.is_empty()).map(PathBuf::from),
        })
    }
}

/// A scene file: canvas size plus shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    pub shapes: Vec<Shape>,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Scene {
    /// Accepts either a full scene object or a bare list of shapes.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Scene(Scene),
            Shapes(Vec<Shape>),
        }

        Ok(match serde_json::from_str(json)? {
            Wire::Scene(scene) => scene,
            Wire::Shapes(shapes) => Scene {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                shapes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_args() {
        let settings = Settings::resolve(args(&["scene.json", "out.png"]), |_| None).unwrap();
        assert_eq!(settings.scene, PathBuf::from("scene.json"));
        assert_eq!(settings.output, PathBuf::from("out.png"));
        assert_eq!(settings.provider, "passthrough");
        assert_eq!(settings.config, None);
    }

    #[test]
    fn test_env_fallback() {
        let env: HashMap<&str, &str> = [
            ("SHAPEFORGE_OUTPUT", "env.png"),
            ("SHAPEFORGE_PROVIDER", "custom"),
            ("SHAPEFORGE_CONFIG", "editor.json"),
        ]
        .into();
        let settings =
            Settings::resolve(args(&["scene.json"]), |k| env.get(k).map(|v| v.to_string()))
                .unwrap();
        assert_eq!(settings.output, PathBuf::from("env.png"));
        assert_eq!(settings.provider, "custom");
        assert_eq!(settings.config, Some(PathBuf::from("editor.json")));
    }

    #[test]
    fn test_missing_output_is_usage_error() {
        let err = Settings::resolve(args(&["scene.json"]), |_| None).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn test_scene_forms() {
        let shape = r##"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","type":"star","x":50,"y":60,"width":80,"height":80,"fill":"#E74C3C","zIndex":2}"##;

        let scene =
            Scene::from_json(&format!(r#"{{"width":320,"height":200,"shapes":[{shape}]}}"#))
                .unwrap();
        assert_eq!((scene.width, scene.height), (320, 200));
        assert_eq!(scene.shapes.len(), 1);

        let bare = Scene::from_json(&format!("[{shape}]")).unwrap();
        assert_eq!((bare.width, bare.height), (800, 600));
        assert_eq!(bare.shapes[0].rotation, 0.0);

        assert!(Scene::from_json("{").is_err());
    }
}
