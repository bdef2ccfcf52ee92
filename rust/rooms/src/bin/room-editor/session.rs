// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interactive flow: detect rooms, name them, then resize on request.

use crate::config::EditorConfig;
use crate::prompt::Prompter;
use anyhow::Context;
use floorplan_rooms::registry::normalize_name;
use floorplan_rooms::render::{highlight_room, render_candidate, render_registry, to_rgb};
use floorplan_rooms::{
    commit, extract, preprocess, propose_resize, Axis, Choice, ExtractionConfig, Polygon,
    PreprocessConfig, RoomMetadata, RoomRegistry,
};
use image::{ImageReader, RgbImage};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// Run a full editing session and return the final registry.
pub fn run<R: BufRead, W: Write>(
    config: &EditorConfig,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<RoomRegistry> {
    let image = ImageReader::open(&config.image_path)
        .with_context(|| format!("Cannot open image '{}'", config.image_path.display()))?
        .decode()
        .with_context(|| format!("Cannot decode image '{}'", config.image_path.display()))?;
    let grayscale = image.to_luma8();

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Cannot create output directory '{}'", config.output_dir.display())
    })?;

    let preprocess_config = PreprocessConfig {
        polarity: config.polarity,
        ..Default::default()
    };
    let closed = if config.skip_preprocess {
        grayscale
    } else {
        preprocess(&grayscale, &preprocess_config)
    };
    save(&to_rgb(&closed), &config.output_dir, "closed.png")?;

    let extraction_config = ExtractionConfig {
        min_room_area: config.min_room_area,
        ..preprocess_config.extraction_config()
    };
    let extraction = extract(&closed, &extraction_config);
    prompter.say(&format!("Detected {} rooms", extraction.rooms.len()))?;

    let base = to_rgb(&closed);
    let mut registry = collect_rooms(&base, extraction.rooms, &config.output_dir, prompter)?;
    if !registry.is_empty() {
        edit_rooms(&base, &mut registry, &config.output_dir, prompter)?;
    }

    save(&render_registry(&base, &registry), &config.output_dir, "final.png")?;
    if config.write_json {
        let path = config.output_dir.join("rooms.json");
        let json = serde_json::to_string_pretty(&registry)?;
        fs::write(&path, json).with_context(|| format!("Cannot write '{}'", path.display()))?;
    }

    Ok(registry)
}

/// Show each detected room and ask for its name and real dimensions.
fn collect_rooms<R: BufRead, W: Write>(
    base: &RgbImage,
    polygons: Vec<Polygon>,
    output_dir: &Path,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<RoomRegistry> {
    let mut metadata: Vec<RoomMetadata> = Vec::with_capacity(polygons.len());

    for (i, polygon) in polygons.iter().enumerate() {
        let file = format!("room{i}.png");
        save(&highlight_room(base, polygon), output_dir, &file)?;

        let name = prompter.ask_until(
            &format!("Enter the name of the room displayed in {file}"),
            |answer| {
                let name = normalize_name(answer);
                if name.is_empty() {
                    Err("name must not be empty".to_string())
                } else if metadata.iter().any(|m| normalize_name(&m.name) == name) {
                    Err(format!("{name} is already used"))
                } else {
                    Ok(name)
                }
            },
        )?;
        let real_width = prompter.ask_until(
            &format!("Enter the width (x dimension) of {name} in metres"),
            parse_dimension,
        )?;
        let real_height = prompter.ask_until(
            &format!("Enter the length (y dimension) of {name} in metres"),
            parse_dimension,
        )?;

        metadata.push(RoomMetadata::new(name, real_width, real_height));
    }

    Ok(RoomRegistry::build(polygons, metadata)?)
}

/// Resize rooms until the user has no more alterations.
fn edit_rooms<R: BufRead, W: Write>(
    base: &RgbImage,
    registry: &mut RoomRegistry,
    output_dir: &Path,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()> {
    let mut canvas = base.clone();

    while prompter.confirm("Would you like to make any alterations? Y/N")? {
        prompter.say("Available rooms:")?;
        let names: Vec<String> = registry.names().map(str::to_string).collect();
        for name in &names {
            prompter.say(&format!("> {name}"))?;
        }

        let name = prompter.ask_until("Which room would you like to change?", |answer| {
            if registry.contains(answer) {
                Ok(normalize_name(answer))
            } else {
                Err(format!("unknown room '{answer}'"))
            }
        })?;
        let axis = prompter.ask_until("Which dimension would you like to change? X/Y", |answer| {
            Axis::parse(answer).map_err(|e| e.to_string())
        })?;

        let current = registry
            .get(&name)
            .map(|room| room.real_dimension(axis))
            .unwrap_or_default();
        let candidate = prompter.ask_until(
            &format!("Current value is {current} metres. What would you like to change it to?"),
            |answer| {
                let value: f64 = answer
                    .parse()
                    .map_err(|_| format!("'{answer}' is not a number"))?;
                propose_resize(&*registry, &name, axis, value).map_err(|e| e.to_string())
            },
        )?;

        for (polygon, file) in [
            (&candidate.candidate_a, "candidate_a.png"),
            (&candidate.candidate_b, "candidate_b.png"),
        ] {
            save(&render_candidate(&canvas, polygon), output_dir, file)?;
        }
        prompter.say(&format!(
            "Candidate A (far wall fixed): {:?}\nCandidate B (near wall fixed): {:?}",
            candidate.bounding_box_a(),
            candidate.bounding_box_b()
        ))?;

        let choice = prompter.ask_until(
            "Keep candidate_a.png, candidate_b.png or neither? A/B/N",
            |answer| Choice::parse(answer).ok_or_else(|| format!("'{answer}' is not A, B or N")),
        )?;

        match commit(registry, &name, choice, candidate)? {
            Some(room) => {
                canvas = render_candidate(&canvas, room.polygon());
                save(&canvas, output_dir, "new_image.png")?;
                prompter.say(&format!(
                    "{} is now {} x {} metres",
                    room.name(),
                    room.real_width,
                    room.real_height
                ))?;
            }
            None => prompter.say("No changes made")?,
        }
    }

    Ok(())
}

fn parse_dimension(answer: &str) -> Result<f64, String> {
    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("'{answer}' is not a non-negative number")),
    }
}

fn save(image: &RgbImage, dir: &Path, file: &str) -> anyhow::Result<()> {
    let path = dir.join(file);
    image
        .save(&path)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "Wrote image");
    Ok(())
}
