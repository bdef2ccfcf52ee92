// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-phase room resize: propose candidates, then commit a choice
//!
//! `propose_resize` only reads the registry. Nothing is mutated until
//! `commit` is called with the caller's choice, so a proposal that is never
//! committed needs no cleanup.

use crate::contour_scaler::scale;
use crate::error::{Result, RoomError};
use crate::registry::{normalize_name, Room, RoomRegistry};
use crate::types::{Axis, BoundingBox, Polygon};
use serde::{Deserialize, Serialize};

/// Which candidate of a proposal to keep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Choice {
    /// Far wall pinned
    A,
    /// Near wall pinned
    B,
    /// Keep the room as it is
    None,
}

impl Choice {
    /// Parse an answer such as `a`, `B`, `n` or `none`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Choice::A),
            "B" => Some(Choice::B),
            "N" | "NO" | "NONE" | "NEITHER" => Some(Choice::None),
            _ => Option::None,
        }
    }
}

/// Both outcomes of one resize request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditCandidate {
    pub room_name: String,
    pub axis: Axis,
    pub new_real_value: f64,
    pub factor: f64,
    pub candidate_a: Polygon,
    pub candidate_b: Polygon,
}

impl EditCandidate {
    pub fn bounding_box_a(&self) -> BoundingBox {
        self.candidate_a.bounding_box()
    }

    pub fn bounding_box_b(&self) -> BoundingBox {
        self.candidate_b.bounding_box()
    }

    pub fn polygon(&self, choice: Choice) -> Option<&Polygon> {
        match choice {
            Choice::A => Some(&self.candidate_a),
            Choice::B => Some(&self.candidate_b),
            Choice::None => Option::None,
        }
    }
}

/// Compute both resize candidates for `room_name` without touching the registry
pub fn propose_resize(
    registry: &RoomRegistry,
    room_name: &str,
    axis: Axis,
    new_real_value: f64,
) -> Result<EditCandidate> {
    let room = registry
        .get(room_name)
        .ok_or_else(|| RoomError::UnknownRoom(normalize_name(room_name)))?;

    if !new_real_value.is_finite() || new_real_value <= 0.0 {
        return Err(RoomError::InvalidScaleFactor(format!(
            "new {} of {} must be positive, got {new_real_value}",
            dimension_label(axis),
            room.name()
        )));
    }

    let current = room.real_dimension(axis);
    if current == 0.0 {
        return Err(RoomError::InvalidScaleFactor(format!(
            "current {} of {} is zero",
            dimension_label(axis),
            room.name()
        )));
    }

    let factor = new_real_value / current;
    let (candidate_a, candidate_b) = scale(room.polygon(), factor, axis)?;

    tracing::debug!(
        room = room.name(),
        %axis,
        current,
        new_real_value,
        factor,
        "Proposed resize"
    );

    Ok(EditCandidate {
        room_name: room.name().to_string(),
        axis,
        new_real_value,
        factor,
        candidate_a,
        candidate_b,
    })
}

/// Apply the chosen candidate to the room.
///
/// Returns the updated room, or `None` when `choice` is [`Choice::None`]
/// and the registry was left as it was.
pub fn commit<'r>(
    registry: &'r mut RoomRegistry,
    room_name: &str,
    choice: Choice,
    candidate: EditCandidate,
) -> Result<Option<&'r Room>> {
    let name = normalize_name(room_name);
    if !registry.contains(&name) {
        return Err(RoomError::UnknownRoom(name));
    }
    if candidate.room_name != name {
        return Err(RoomError::CandidateMismatch {
            expected: name,
            found: candidate.room_name,
        });
    }

    let EditCandidate {
        axis,
        new_real_value,
        candidate_a,
        candidate_b,
        ..
    } = candidate;

    let polygon = match choice {
        Choice::A => candidate_a,
        Choice::B => candidate_b,
        Choice::None => {
            tracing::info!(room = %name, "Resize rejected, room unchanged");
            return Ok(Option::None);
        }
    };

    let Some(room) = registry.get_mut(&name) else {
        return Err(RoomError::UnknownRoom(name));
    };
    room.set_polygon(polygon);
    room.set_real_dimension(axis, new_real_value);

    tracing::info!(
        room = %name,
        ?choice,
        %axis,
        new_real_value,
        "Committed resize"
    );
    Ok(Some(&*room))
}

fn dimension_label(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "width",
        Axis::Y => "height",
    }
}
