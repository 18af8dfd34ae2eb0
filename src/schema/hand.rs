//! Hand state as reported by the tracking service.

use std::fmt;

use serde::{Deserialize, Serialize};

fn invalid_id() -> i32 {
    -1
}

/// A single tracked hand within a [`Frame`](super::Frame).
///
/// Field names mirror the keys of the tracking service's live protocol, so
/// the same shape deserializes from a live socket message and from a
/// recorded file. All positions and distances are in millimeters of device
/// space, velocities in mm/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    /// Session-unique hand id; -1 until populated.
    #[serde(default = "invalid_id")]
    pub id: i32,
    /// Unit vector pointing from the palm toward the fingers.
    #[serde(default)]
    pub direction: [f32; 3],
    /// Unit vector perpendicular to the palm plane.
    #[serde(default)]
    pub palm_normal: [f32; 3],
    /// Palm center position.
    #[serde(default)]
    pub palm_position: [f32; 3],
    /// Instantaneous palm velocity.
    #[serde(default)]
    pub palm_velocity: [f32; 3],
    /// Hand-space axis orientation. The live protocol does not document
    /// what this matrix encodes, so it is carried as a zeroed placeholder.
    #[serde(default, rename = "r")]
    pub rotation: [[f32; 3]; 3],
    /// Center of the sphere fitted to the palm curvature.
    #[serde(default)]
    pub sphere_center: [f32; 3],
    /// Radius of the fitted sphere.
    #[serde(default)]
    pub sphere_radius: f32,
    /// Palm position filtered to damp sensor jitter.
    #[serde(default)]
    pub stabilized_palm_position: [f32; 3],
    /// How long this hand has been continuously tracked, in seconds.
    #[serde(default)]
    pub time_visible: f32,
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            id: -1,
            direction: [0.0; 3],
            palm_normal: [0.0; 3],
            palm_position: [0.0; 3],
            palm_velocity: [0.0; 3],
            rotation: [[0.0; 3]; 3],
            sphere_center: [0.0; 3],
            sphere_radius: 0.0,
            stabilized_palm_position: [0.0; 3],
            time_visible: 0.0,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hand {} at [{:.1}, {:.1}, {:.1}], visible {:.2}s",
            self.id,
            self.palm_position[0],
            self.palm_position[1],
            self.palm_position[2],
            self.time_visible
        )
    }
}
