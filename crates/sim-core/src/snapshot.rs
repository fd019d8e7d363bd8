//! Session snapshots: small JSON bags for copying a viewing position or a
//! branch layout between sessions. Imports are validated before any state is
//! touched; a malformed payload leaves everything unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::SimClock;
use crate::noise::RidgeParams;
use crate::render::ViewTransform;
use crate::topology::Branch;

pub const POSITION_SNAPSHOT_VERSION: u32 = 4;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Position-related state only: view, time and the octave/offset sliders.
/// Branches, sync mode and calibration are deliberately excluded (they have
/// their own snapshot). Every field is optional on import and falls back to
/// the current value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PositionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,
    #[serde(default)]
    pub version: Option<u32>,
}

impl PositionSnapshot {
    pub fn capture(view: &ViewTransform, clock: &SimClock, ridge: &RidgeParams) -> Self {
        Self {
            pan_x: Some(view.pan.x),
            pan_y: Some(view.pan.y),
            zoom: Some(view.zoom),
            t: Some(clock.now()),
            speed: Some(clock.speed()),
            oct: Some(ridge.octaves),
            offset: Some(ridge.offset),
            version: Some(POSITION_SNAPSHOT_VERSION),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply to live state. Missing fields keep their current values.
    pub fn apply(&self, view: &mut ViewTransform, clock: &mut SimClock, ridge: &mut RidgeParams) {
        if let Some(px) = self.pan_x {
            view.pan.x = px;
        }
        if let Some(py) = self.pan_y {
            view.pan.y = py;
        }
        if let Some(z) = self.zoom {
            view.zoom = z;
        }
        if let Some(s) = self.speed {
            clock.set_speed(s);
        }
        if let Some(t) = self.t {
            clock.set_time(t);
        }
        if let Some(o) = self.oct {
            ridge.octaves = o;
        }
        if let Some(off) = self.offset {
            ridge.offset = off;
        }
    }
}

/// The branch list, tagged so an unrelated JSON object pasted by mistake is
/// rejected instead of half-applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BranchesSnapshot {
    pub branches: Vec<Branch>,
    pub tag: String,
}

pub const BRANCHES_TAG: &str = "branches";

impl BranchesSnapshot {
    pub fn capture(branches: &[Branch]) -> Self {
        Self {
            branches: branches.to_vec(),
            tag: BRANCHES_TAG.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate. The `branches` array and the tag are required.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("branches").map(|b| b.is_array()) != Some(true) {
            return Err(SnapshotError::MissingField("branches"));
        }
        let snap: Self = serde_json::from_value(value)?;
        if snap.tag != BRANCHES_TAG {
            return Err(SnapshotError::MissingField("tag"));
        }
        Ok(snap)
    }
}
