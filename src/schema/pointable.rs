//! Pointable (finger or tool) state as reported by the tracking service.

use std::fmt;

use serde::{Deserialize, Serialize};

fn invalid_id() -> i32 {
    -1
}

/// Relationship of a pointable tip to the virtual touch plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchZone {
    /// Too far from the touch plane to be considered.
    #[default]
    None,
    /// Approaching the touch plane.
    Hovering,
    /// Within the touch plane.
    Touching,
    /// A zone reported by a newer service version than this crate knows.
    #[serde(other)]
    Unknown,
}

/// A tracked finger or tool within a [`Frame`](super::Frame).
///
/// The owning hand is referenced by id only; resolve it through
/// [`Frame::pointables_on_hand`](super::Frame::pointables_on_hand) or by
/// scanning the frame's hand list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointable {
    /// Session-unique pointable id; -1 until populated.
    #[serde(default = "invalid_id")]
    pub id: i32,
    /// Id of the hand this pointable belongs to, or -1 if unattached.
    #[serde(default = "invalid_id")]
    pub hand_id: i32,
    /// Unit vector from base to tip.
    #[serde(default)]
    pub direction: [f32; 3],
    /// Tip position.
    #[serde(default)]
    pub tip_position: [f32; 3],
    /// Instantaneous tip velocity.
    #[serde(default)]
    pub tip_velocity: [f32; 3],
    /// Tip position filtered to damp sensor jitter.
    #[serde(default)]
    pub stabilized_tip_position: [f32; 3],
    /// Length of the visible portion, in millimeters.
    #[serde(default)]
    pub length: f32,
    /// How long this pointable has been continuously tracked, in seconds.
    #[serde(default)]
    pub time_visible: f32,
    /// True for tool-like objects (e.g. a pen), false for fingers.
    #[serde(default)]
    pub tool: bool,
    /// Signed distance to the touch plane, normalized to [-1, 1].
    #[serde(default)]
    pub touch_distance: f32,
    /// Which side of the touch plane the tip is on.
    #[serde(default)]
    pub touch_zone: TouchZone,
}

impl Default for Pointable {
    fn default() -> Self {
        Self {
            id: -1,
            hand_id: -1,
            direction: [0.0; 3],
            tip_position: [0.0; 3],
            tip_velocity: [0.0; 3],
            stabilized_tip_position: [0.0; 3],
            length: 0.0,
            time_visible: 0.0,
            tool: false,
            touch_distance: 0.0,
            touch_zone: TouchZone::None,
        }
    }
}

impl Pointable {
    /// Joint positions derived from tip, direction and length.
    ///
    /// Returns tip, distal, proximal and metacarpal positions in that
    /// order, spacing the joints back along the pointable axis with
    /// phalanx proportions of 1 : 1.618 : 2.617 over a total of 5.23.
    pub fn joint_positions(&self) -> [[f32; 3]; 4] {
        const SEGMENTS: [f32; 3] = [1.0, 1.618, 2.617];
        const TOTAL: f32 = 5.23;

        let mut joints = [self.tip_position; 4];
        for (joint, segment) in joints[1..].iter_mut().zip(SEGMENTS) {
            for axis in 0..3 {
                joint[axis] =
                    self.tip_position[axis] - self.direction[axis] * (segment / TOTAL) * self.length;
            }
        }
        joints
    }
}

impl fmt::Display for Pointable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on hand {}, tip at [{:.1}, {:.1}, {:.1}], length {:.1}",
            if self.tool { "tool" } else { "finger" },
            self.id,
            self.hand_id,
            self.tip_position[0],
            self.tip_position[1],
            self.tip_position[2],
            self.length
        )
    }
}
