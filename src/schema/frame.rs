//! Frame: one timestamped snapshot of everything the tracking service
//! reported.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Gesture, Hand, Pointable};

/// Calibrated spatial volume within which tracking is considered reliable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionBox {
    /// Center of the box in device space.
    #[serde(default)]
    pub center: [f32; 3],
    /// Width, height and depth of the box.
    #[serde(default)]
    pub size: [f32; 3],
}

/// One sampling instant of tracking data.
///
/// A frame is constructed unpopulated ([`Frame::is_valid`] returns false),
/// populated exactly once (from a decoded live message, a device snapshot,
/// or a deserialized record) and then read many times by consumers. The
/// only permitted mutation after population is
/// [`scale_pointable_lengths`](Frame::scale_pointable_lengths).
///
/// Cross-references between entities (pointable to hand, gesture to hands
/// and pointables) are by integer id only; nothing in a frame borrows live
/// device memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Monotonically increasing per device session; -1 until populated.
    pub id: i64,
    /// Device clock at capture time, in microseconds.
    pub timestamp: i64,
    /// Device-reported sampling rate in frames per second.
    #[serde(default)]
    pub current_frame_rate: f64,
    /// Tracked hands, in device-reported order. The order is not stable
    /// across frames.
    #[serde(default)]
    pub hands: Vec<Hand>,
    /// Tracked fingers and tools; each references its owning hand by id.
    #[serde(default)]
    pub pointables: Vec<Pointable>,
    /// Gestures recognized as of this frame.
    #[serde(default)]
    pub gestures: Vec<Gesture>,
    /// Calibration volume in effect for this frame.
    #[serde(default)]
    pub interaction_box: InteractionBox,
    /// Frame-level rotation since the previous frame. Undocumented in the
    /// live protocol; carried as a zeroed placeholder.
    #[serde(default, rename = "r")]
    pub rotation: [[f32; 3]; 3],
    /// Frame-level scale factor. Undocumented; zeroed placeholder.
    #[serde(default, rename = "s")]
    pub scale: f32,
    /// Frame-level translation. Undocumented; zeroed placeholder.
    #[serde(default, rename = "t")]
    pub translation: [f32; 3],
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            id: -1,
            timestamp: 0,
            current_frame_rate: 0.0,
            hands: Vec::new(),
            pointables: Vec::new(),
            gestures: Vec::new(),
            interaction_box: InteractionBox::default(),
            rotation: [[0.0; 3]; 3],
            scale: 0.0,
            translation: [0.0; 3],
        }
    }
}

impl Frame {
    /// Parse one live-socket message into a frame.
    ///
    /// Keys this crate does not model are ignored so newer service
    /// versions keep decoding; a message missing `id` or `timestamp` is
    /// rejected.
    pub fn from_message(text: &str) -> Result<Frame, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Whether this frame has been populated with real device data.
    ///
    /// A freshly constructed frame carries the sentinel id -1 and is
    /// invalid until populated.
    pub fn is_valid(&self) -> bool {
        self.id != -1
    }

    /// All pointables attached to the hand with the given id.
    pub fn pointables_on_hand(&self, hand_id: i32) -> Vec<&Pointable> {
        self.pointables
            .iter()
            .filter(|p| p.hand_id == hand_id)
            .collect()
    }

    /// Scale every pointable's length by `factor`.
    ///
    /// Used by consumers that map device space onto a differently sized
    /// scene, e.g. to fit finger bones to a skeleton.
    pub fn scale_pointable_lengths(&mut self, factor: f32) {
        for pointable in &mut self.pointables {
            pointable.length *= factor;
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} @ {}us: {} hands, {} pointables, {} gestures ({:.1} fps)",
            self.id,
            self.timestamp,
            self.hands.len(),
            self.pointables.len(),
            self.gestures.len(),
            self.current_frame_rate
        )
    }
}
