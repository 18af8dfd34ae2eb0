//! Plain-value snapshot types for the SDK acquisition path.
//!
//! An SDK binding hands one [`DeviceFrame`] to the capture loop per device
//! callback. Every vector is copied out into these plain values at the
//! callback boundary; nothing here borrows SDK memory, which is only valid
//! while the callback runs.

use crate::schema::{
    Frame, Gesture, GestureState, GestureType, Hand, InteractionBox, Pointable, TouchZone,
};

use super::TrackingListener;

/// Calibration volume as the SDK reports it: a center plus separate
/// extents per axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInteractionBox {
    pub center: [f32; 3],
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// One hand as delivered by an SDK callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceHand {
    pub id: i32,
    pub direction: [f32; 3],
    pub palm_normal: [f32; 3],
    pub palm_position: [f32; 3],
    pub palm_velocity: [f32; 3],
    pub sphere_center: [f32; 3],
    pub sphere_radius: f32,
    pub stabilized_palm_position: [f32; 3],
    pub time_visible: f32,
}

/// One finger or tool as delivered by an SDK callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevicePointable {
    pub id: i32,
    pub hand_id: i32,
    pub direction: [f32; 3],
    pub tip_position: [f32; 3],
    pub tip_velocity: [f32; 3],
    pub stabilized_tip_position: [f32; 3],
    pub length: f32,
    pub time_visible: f32,
    pub is_tool: bool,
    pub touch_distance: f32,
    pub touch_zone: TouchZone,
}

/// One recognized gesture as delivered by an SDK callback, with its hand
/// and pointable associations already reduced to ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceGesture {
    pub id: i32,
    pub duration_us: i64,
    pub hand_ids: Vec<i32>,
    pub pointable_ids: Vec<i32>,
    pub state: GestureState,
    pub kind: GestureType,
}

/// One full device callback's worth of tracking state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceFrame {
    pub id: i64,
    pub timestamp: i64,
    pub frame_rate: f64,
    pub hands: Vec<DeviceHand>,
    pub pointables: Vec<DevicePointable>,
    pub gestures: Vec<DeviceGesture>,
    pub interaction_box: DeviceInteractionBox,
}

impl From<&DeviceHand> for Hand {
    fn from(hand: &DeviceHand) -> Self {
        Hand {
            id: hand.id,
            direction: hand.direction,
            palm_normal: hand.palm_normal,
            palm_position: hand.palm_position,
            palm_velocity: hand.palm_velocity,
            // The SDK exposes no per-hand orientation matrix; zeroed until
            // the live protocol documents what "r" encodes.
            rotation: [[0.0; 3]; 3],
            sphere_center: hand.sphere_center,
            sphere_radius: hand.sphere_radius,
            stabilized_palm_position: hand.stabilized_palm_position,
            time_visible: hand.time_visible,
        }
    }
}

impl From<&DevicePointable> for Pointable {
    fn from(pointable: &DevicePointable) -> Self {
        Pointable {
            id: pointable.id,
            hand_id: pointable.hand_id,
            direction: pointable.direction,
            tip_position: pointable.tip_position,
            tip_velocity: pointable.tip_velocity,
            stabilized_tip_position: pointable.stabilized_tip_position,
            length: pointable.length,
            time_visible: pointable.time_visible,
            tool: pointable.is_tool,
            touch_distance: pointable.touch_distance,
            touch_zone: pointable.touch_zone,
        }
    }
}

impl From<&DeviceGesture> for Gesture {
    fn from(gesture: &DeviceGesture) -> Self {
        Gesture {
            id: gesture.id,
            duration: gesture.duration_us,
            hand_ids: gesture.hand_ids.clone(),
            pointable_ids: gesture.pointable_ids.clone(),
            state: gesture.state,
            kind: gesture.kind,
        }
    }
}

impl From<&DeviceFrame> for Frame {
    /// The live-SDK decode path: a field-for-field plain-value copy of the
    /// snapshot into the frame shape the recorder persists.
    fn from(snapshot: &DeviceFrame) -> Self {
        Frame {
            id: snapshot.id,
            timestamp: snapshot.timestamp,
            current_frame_rate: snapshot.frame_rate,
            hands: snapshot.hands.iter().map(Hand::from).collect(),
            pointables: snapshot.pointables.iter().map(Pointable::from).collect(),
            gestures: snapshot.gestures.iter().map(Gesture::from).collect(),
            interaction_box: InteractionBox {
                center: snapshot.interaction_box.center,
                size: [
                    snapshot.interaction_box.width,
                    snapshot.interaction_box.height,
                    snapshot.interaction_box.depth,
                ],
            },
            // Frame-level rotation/scale/translation are undocumented in
            // the live protocol; zero-filled rather than silently omitted.
            rotation: [[0.0; 3]; 3],
            scale: 0.0,
            translation: [0.0; 3],
        }
    }
}

/// Feed SDK-delivered snapshots through the same listener interface the
/// socket path drives. This is the whole of the SDK acquisition variant;
/// the binding that produces the snapshots lives outside this crate.
pub fn drive_device_frames<'a, I, L>(snapshots: I, listener: &mut L)
where
    I: IntoIterator<Item = &'a DeviceFrame>,
    L: TrackingListener + ?Sized,
{
    for snapshot in snapshots {
        listener.on_frame(Frame::from(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> DeviceFrame {
        DeviceFrame {
            id: 88,
            timestamp: 2_000_000,
            frame_rate: 60.0,
            hands: vec![DeviceHand {
                id: 4,
                palm_position: [5.0, 6.0, 7.0],
                sphere_radius: 70.0,
                ..Default::default()
            }],
            pointables: vec![DevicePointable {
                id: 13,
                hand_id: 4,
                length: 48.0,
                is_tool: true,
                touch_zone: TouchZone::Hovering,
                ..Default::default()
            }],
            gestures: vec![DeviceGesture {
                id: 2,
                duration_us: 500,
                hand_ids: vec![4],
                pointable_ids: vec![13],
                state: GestureState::Start,
                kind: GestureType::Circle,
            }],
            interaction_box: DeviceInteractionBox {
                center: [0.0, 200.0, 0.0],
                width: 220.0,
                height: 220.0,
                depth: 150.0,
            },
        }
    }

    #[test]
    fn test_snapshot_conversion() {
        let frame = Frame::from(&sample_snapshot());

        assert!(frame.is_valid());
        assert_eq!(frame.id, 88);
        assert_eq!(frame.hands[0].palm_position, [5.0, 6.0, 7.0]);
        assert_eq!(frame.pointables[0].hand_id, 4);
        assert!(frame.pointables[0].tool);
        assert_eq!(frame.gestures[0].kind, GestureType::Circle);
        assert_eq!(frame.interaction_box.size, [220.0, 220.0, 150.0]);
    }

    #[test]
    fn test_unresolved_fields_are_zero_filled() {
        let frame = Frame::from(&sample_snapshot());

        assert_eq!(frame.rotation, [[0.0; 3]; 3]);
        assert_eq!(frame.scale, 0.0);
        assert_eq!(frame.translation, [0.0; 3]);
        assert_eq!(frame.hands[0].rotation, [[0.0; 3]; 3]);
    }

    #[test]
    fn test_drive_device_frames() {
        struct Collect(Vec<Frame>);
        impl TrackingListener for Collect {
            fn on_frame(&mut self, frame: Frame) {
                self.0.push(frame);
            }
        }

        let snapshots = vec![sample_snapshot(), sample_snapshot()];
        let mut collect = Collect(Vec::new());
        drive_device_frames(&snapshots, &mut collect);

        assert_eq!(collect.0.len(), 2);
        assert!(collect.0.iter().all(|f| f.id == 88));
    }
}
