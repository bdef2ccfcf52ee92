// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for room geometry operations
pub type Result<T> = std::result::Result<T, RoomError>;

/// Errors that can occur while building or editing the room model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    #[error("Degenerate geometry: polygon with {vertices} vertices has zero area")]
    DegenerateGeometry { vertices: usize },

    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    #[error("Invalid axis '{0}': expected X or Y")]
    InvalidAxis(String),

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Duplicate room name: {0}")]
    DuplicateRoomName(String),

    #[error("Invalid room name: {0:?}")]
    InvalidRoomName(String),

    #[error("Invalid dimension for room {room}: {value}")]
    InvalidDimension { room: String, value: f64 },

    #[error("Metadata mismatch: {polygons} detected rooms but {entries} metadata entries")]
    MetadataMismatch { polygons: usize, entries: usize },

    #[error("Candidate was proposed for room {found}, not {expected}")]
    CandidateMismatch { expected: String, found: String },
}
