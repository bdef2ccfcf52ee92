// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor configuration loaded from environment variables and flags.

use anyhow::{bail, Context};
use floorplan_rooms::BoundaryPolarity;
use std::path::PathBuf;

/// Editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Plan image to edit.
    pub image_path: PathBuf,
    /// Directory receiving room previews and the final image.
    pub output_dir: PathBuf,
    /// Rooms smaller than this (square pixels) are ignored.
    pub min_room_area: f64,
    /// Boundary intensity of the input image.
    pub polarity: BoundaryPolarity,
    /// Treat the input as already binarized and line-closed.
    pub skip_preprocess: bool,
    /// Also write the final registry as JSON.
    pub write_json: bool,
}

impl EditorConfig {
    /// Load defaults from environment variables.
    pub fn from_env() -> Self {
        Self {
            image_path: PathBuf::new(),
            output_dir: std::env::var("ROOM_EDITOR_OUTPUT_DIR")
                .unwrap_or_else(|_| "./out".into())
                .into(),
            min_room_area: std::env::var("ROOM_EDITOR_MIN_ROOM_AREA")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .unwrap_or(0.0),
            polarity: match std::env::var("ROOM_EDITOR_LIGHT_BOUNDARIES").as_deref() {
                Ok("1") | Ok("true") => BoundaryPolarity::LightOnDark,
                _ => BoundaryPolarity::DarkOnLight,
            },
            skip_preprocess: false,
            write_json: false,
        }
    }

    /// Apply command-line arguments (without the program name) on top.
    pub fn with_args(mut self, args: &[String]) -> anyhow::Result<Self> {
        let mut image_path = None;
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--output-dir" => {
                    i += 1;
                    let value = args.get(i).context("--output-dir needs a value")?;
                    self.output_dir = value.into();
                }
                "--min-room-area" => {
                    i += 1;
                    let value = args.get(i).context("--min-room-area needs a value")?;
                    self.min_room_area = value
                        .parse()
                        .with_context(|| format!("Invalid min room area '{value}'"))?;
                }
                "--light-boundaries" => self.polarity = BoundaryPolarity::LightOnDark,
                "--skip-preprocess" => self.skip_preprocess = true,
                "--json" => self.write_json = true,
                other if other.starts_with("--") => bail!("Unknown option: {other}"),
                path => {
                    if image_path.replace(PathBuf::from(path)).is_some() {
                        bail!("Only one image path may be given");
                    }
                }
            }
            i += 1;
        }

        self.image_path = image_path.context("Missing image path")?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn base() -> EditorConfig {
        EditorConfig {
            image_path: PathBuf::new(),
            output_dir: "./out".into(),
            min_room_area: 0.0,
            polarity: BoundaryPolarity::DarkOnLight,
            skip_preprocess: false,
            write_json: false,
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = base()
            .with_args(&args(&[
                "plan.png",
                "--output-dir",
                "/tmp/rooms",
                "--min-room-area",
                "250",
                "--light-boundaries",
                "--json",
            ]))
            .unwrap();

        assert_eq!(config.image_path, PathBuf::from("plan.png"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/rooms"));
        assert_eq!(config.min_room_area, 250.0);
        assert_eq!(config.polarity, BoundaryPolarity::LightOnDark);
        assert!(config.write_json);
        assert!(!config.skip_preprocess);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(base().with_args(&args(&[])).is_err());
        assert!(base().with_args(&args(&["a.png", "b.png"])).is_err());
        assert!(base().with_args(&args(&["a.png", "--bogus"])).is_err());
        assert!(base().with_args(&args(&["a.png", "--min-room-area"])).is_err());
        assert!(base()
            .with_args(&args(&["a.png", "--min-room-area", "lots"]))
            .is_err());
    }
}
