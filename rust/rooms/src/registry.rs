// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room records and the registry that owns them

use crate::error::{Result, RoomError};
use crate::types::{Axis, BoundingBox, Polygon};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// User-supplied description of one detected region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomMetadata {
    pub name: String,
    /// Real-world extent along X
    pub real_width: f64,
    /// Real-world extent along Y
    pub real_height: f64,
}

impl RoomMetadata {
    pub fn new(name: impl Into<String>, real_width: f64, real_height: f64) -> Self {
        Self {
            name: name.into(),
            real_width,
            real_height,
        }
    }
}

/// A detected room with its current geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    name: String,
    polygon: Polygon,
    bounding_box: BoundingBox,
    pub real_width: f64,
    pub real_height: f64,
}

impl Room {
    fn new(name: String, polygon: Polygon, real_width: f64, real_height: f64) -> Self {
        let bounding_box = polygon.bounding_box();
        Self {
            name,
            polygon,
            bounding_box,
            real_width,
            real_height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Real-world dimension measured along `axis`
    pub fn real_dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.real_width,
            Axis::Y => self.real_height,
        }
    }

    pub(crate) fn set_real_dimension(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.real_width = value,
            Axis::Y => self.real_height = value,
        }
    }

    pub(crate) fn set_polygon(&mut self, polygon: Polygon) {
        self.bounding_box = polygon.bounding_box();
        self.polygon = polygon;
    }
}

/// Normalize a room name for use as a registry key
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// All rooms of one plan, keyed by normalized name, in detection order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl RoomRegistry {
    /// Build the registry from extracted polygons and one metadata entry per polygon
    pub fn build(polygons: Vec<Polygon>, metadata: Vec<RoomMetadata>) -> Result<Self> {
        if polygons.len() != metadata.len() {
            return Err(RoomError::MetadataMismatch {
                polygons: polygons.len(),
                entries: metadata.len(),
            });
        }

        let mut registry = Self {
            rooms: Vec::with_capacity(polygons.len()),
            index: FxHashMap::default(),
        };

        for (polygon, meta) in polygons.into_iter().zip(metadata) {
            let name = normalize_name(&meta.name);
            if name.is_empty() {
                return Err(RoomError::InvalidRoomName(meta.name));
            }
            if registry.index.contains_key(&name) {
                return Err(RoomError::DuplicateRoomName(name));
            }
            for value in [meta.real_width, meta.real_height] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RoomError::InvalidDimension { room: name, value });
                }
            }

            registry.index.insert(name.clone(), registry.rooms.len());
            registry
                .rooms
                .push(Room::new(name, polygon, meta.real_width, meta.real_height));
        }

        tracing::debug!(rooms = registry.rooms.len(), "Built room registry");
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.rooms[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Room> {
        match self.index.get(&normalize_name(name)) {
            Some(&i) => Some(&mut self.rooms[i]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&normalize_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|room| room.name())
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl PartialEq for RoomRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms
    }
}
