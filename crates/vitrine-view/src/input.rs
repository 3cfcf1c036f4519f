use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Separation of the first two touches, if there are at least two.
pub fn touch_distance(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [a, b, ..] => Some(a.distance(*b)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// `touches` lists every active touch after the change.
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd { touches: Vec<TouchPoint> },
    /// Browser convention: positive scrolls down, away from the model.
    Wheel { delta_y: f64 },
    Key { key: Key },
    Resize { width: f64, height: f64 },
    VisibilityChanged { hidden: bool },
    Unload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_needs_two_touches() {
        assert_eq!(touch_distance(&[TouchPoint::new(1.0, 1.0)]), None);
        let d = touch_distance(&[TouchPoint::new(0.0, 0.0), TouchPoint::new(3.0, 4.0)]);
        assert_eq!(d, Some(5.0));
    }

    #[test]
    fn events_use_tagged_json() -> serde_json::Result<()> {
        let event: InputEvent = serde_json::from_str(r#"{"type":"wheel","delta_y":-100.0}"#)?;
        assert_eq!(event, InputEvent::Wheel { delta_y: -100.0 });
        let event: InputEvent = serde_json::from_str(r#"{"type":"key","key":"Escape"}"#)?;
        assert_eq!(event, InputEvent::Key { key: Key::Escape });
        Ok(())
    }
}
