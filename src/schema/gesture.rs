//! Gesture state as reported by the tracking service.

use std::fmt;

use serde::{Deserialize, Serialize};

fn invalid_id() -> i32 {
    -1
}

/// Phase of a recognized movement. Gestures span multiple frames; every
/// frame during the movement carries a gesture record with the same id and
/// an updated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureState {
    /// The movement was first recognized in this frame.
    Start,
    /// The movement is still in progress.
    Update,
    /// The movement completed in this frame.
    Stop,
    /// A state reported by a newer service version than this crate knows.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Kind of recognized movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureType {
    /// A finger tracing a circle.
    Circle,
    /// A straight-line hand sweep.
    Swipe,
    /// A forward poke toward the screen plane.
    ScreenTap,
    /// A downward press, like striking a key.
    KeyTap,
    /// A type reported by a newer service version than this crate knows.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A recognized temporal movement pattern within a [`Frame`](super::Frame).
///
/// Associated hands and pointables are referenced by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gesture {
    /// Shared by every per-frame record of the same movement; -1 until
    /// populated.
    #[serde(default = "invalid_id")]
    pub id: i32,
    /// Elapsed duration of the movement up to this frame, in microseconds.
    #[serde(default)]
    pub duration: i64,
    /// Ids of the hands involved, if any.
    #[serde(default)]
    pub hand_ids: Vec<i32>,
    /// Ids of the fingers and tools involved, if any.
    #[serde(default)]
    pub pointable_ids: Vec<i32>,
    /// Phase of the movement.
    #[serde(default)]
    pub state: GestureState,
    /// Kind of movement.
    #[serde(default, rename = "type")]
    pub kind: GestureType,
}

impl Default for Gesture {
    fn default() -> Self {
        Self {
            id: -1,
            duration: 0,
            hand_ids: Vec::new(),
            pointable_ids: Vec::new(),
            state: GestureState::Unknown,
            kind: GestureType::Unknown,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gesture {} ({:?}/{:?}), {} hands, {} pointables, {}us",
            self.id,
            self.kind,
            self.state,
            self.hand_ids.len(),
            self.pointable_ids.len(),
            self.duration
        )
    }
}
