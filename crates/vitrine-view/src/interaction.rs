use serde::Serialize;
use std::f64::consts::FRAC_PI_3;
use std::time::Duration;
use vitrine_geometry::Rotation;

use crate::card::ViewportGate;
use crate::input::{Key, TouchPoint, touch_distance};
use crate::viewport::{ModelPose, RenderBackend, ViewportController};

pub const DRAG_ROTATE_SPEED: f64 = 0.01;
pub const KEY_ROTATE_STEP: f64 = 0.1;
pub const EASING_FACTOR: f64 = 0.05;
pub const AUTO_ROTATE_STEP: f64 = 0.01;
pub const MAX_TILT: f64 = FRAC_PI_3;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const WHEEL_ZOOM_SPEED: f64 = 0.001;
pub const BUTTON_ZOOM_STEP: f64 = 0.2;
pub const BOB_AMPLITUDE: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    #[default]
    Idle,
    /// Mouse button or single finger held down.
    Dragging,
    /// Two fingers down.
    Pinching,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Rotated,
    Escape,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionState {
    pub gesture: Gesture,
    pub last_pointer_x: f64,
    pub last_pointer_y: f64,
    pub target_rotation_x: f64,
    pub target_rotation_y: f64,
    pub current_rotation_x: f64,
    pub current_rotation_y: f64,
    pub zoom_level: f64,
    pub auto_rotate_enabled: bool,
    pub pinch_start_distance: f64,
    pub pinch_start_zoom: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            last_pointer_x: 0.0,
            last_pointer_y: 0.0,
            target_rotation_x: 0.0,
            target_rotation_y: 0.0,
            current_rotation_x: 0.0,
            current_rotation_y: 0.0,
            zoom_level: DEFAULT_ZOOM,
            auto_rotate_enabled: false,
            pinch_start_distance: 0.0,
            pinch_start_zoom: DEFAULT_ZOOM,
        }
    }
}

impl InteractionState {
    pub fn pointer_down(&self) -> bool {
        self.gesture == Gesture::Dragging
    }
}

/// Turns pointer, touch, wheel and key input into rotation targets and zoom.
///
/// Rotation is eased toward its target once per frame in [`tick`](Self::tick); zoom is
/// pushed to the viewport as soon as it changes. Every handler is a no-op until
/// [`ready`](Self::ready) has been called.
#[derive(Clone, Debug)]
pub struct InteractionController {
    state: InteractionState,
    mobile: bool,
    ready: bool,
    viewport_enabled: bool,
}

impl InteractionController {
    pub fn new(mobile: bool) -> Self {
        Self {
            state: InteractionState::default(),
            mobile,
            ready: false,
            viewport_enabled: true,
        }
    }

    pub fn ready(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn gesture(&self) -> Gesture {
        self.state.gesture
    }

    pub fn viewport_enabled(&self) -> bool {
        self.viewport_enabled
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        if !self.accepts_viewport_input() || self.mobile {
            return;
        }
        self.begin_drag(x, y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.ready || self.mobile || self.state.gesture != Gesture::Dragging {
            return;
        }
        self.drag_to(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        if self.state.gesture == Gesture::Dragging {
            self.state.gesture = Gesture::Idle;
        }
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        if !self.accepts_viewport_input() {
            return;
        }
        match touches {
            [single] => self.begin_drag(single.x, single.y),
            [_, _, ..] => self.begin_pinch(touches),
            [] => {}
        }
    }

    pub fn on_touch_move<B: RenderBackend>(
        &mut self,
        touches: &[TouchPoint],
        viewport: &mut ViewportController<B>,
    ) {
        if !self.accepts_viewport_input() {
            return;
        }
        match (self.state.gesture, touches) {
            (Gesture::Dragging, [single]) => self.drag_to(single.x, single.y),
            (Gesture::Pinching, [_, _, ..]) => {
                if let Some(distance) = touch_distance(touches) {
                    self.on_pinch_move(distance, viewport);
                }
            }
            _ => {}
        }
    }

    /// `remaining` lists the touches still down after the lift.
    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) {
        if !self.ready {
            return;
        }
        if self.state.gesture == Gesture::Pinching && remaining.len() >= 2 {
            self.begin_pinch(remaining);
            return;
        }
        self.state.gesture = Gesture::Idle;
        self.state.pinch_start_distance = 0.0;
    }

    pub fn on_drag_move(&mut self, dx: f64, dy: f64) {
        if !self.ready {
            return;
        }
        self.state.target_rotation_y += dx * DRAG_ROTATE_SPEED;
        self.state.target_rotation_x += dy * DRAG_ROTATE_SPEED;
        self.clamp_tilt();
    }

    pub fn on_pinch_move<B: RenderBackend>(
        &mut self,
        current_distance: f64,
        viewport: &mut ViewportController<B>,
    ) {
        if !self.ready || self.state.pinch_start_distance <= f64::EPSILON {
            return;
        }
        let scale = current_distance / self.state.pinch_start_distance;
        self.set_zoom(self.state.pinch_start_zoom * scale, viewport);
    }

    pub fn on_wheel<B: RenderBackend>(
        &mut self,
        delta_y: f64,
        viewport: &mut ViewportController<B>,
    ) {
        if !self.accepts_viewport_input() || self.mobile {
            return;
        }
        self.set_zoom(self.state.zoom_level - delta_y * WHEEL_ZOOM_SPEED, viewport);
    }

    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        if !self.ready {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::ArrowLeft => self.state.target_rotation_y -= KEY_ROTATE_STEP,
            Key::ArrowRight => self.state.target_rotation_y += KEY_ROTATE_STEP,
            Key::ArrowUp => self.state.target_rotation_x -= KEY_ROTATE_STEP,
            Key::ArrowDown => self.state.target_rotation_x += KEY_ROTATE_STEP,
            Key::Escape => return KeyOutcome::Escape,
            Key::Other => return KeyOutcome::Ignored,
        }
        self.clamp_tilt();
        KeyOutcome::Rotated
    }

    pub fn zoom_in<B: RenderBackend>(&mut self, viewport: &mut ViewportController<B>) {
        self.set_zoom(self.state.zoom_level + BUTTON_ZOOM_STEP, viewport);
    }

    pub fn zoom_out<B: RenderBackend>(&mut self, viewport: &mut ViewportController<B>) {
        self.set_zoom(self.state.zoom_level - BUTTON_ZOOM_STEP, viewport);
    }

    /// Zeroes the rotation targets and restores the default zoom. The displayed
    /// rotation eases back on later ticks.
    pub fn reset_view<B: RenderBackend>(&mut self, viewport: &mut ViewportController<B>) {
        self.state.target_rotation_x = 0.0;
        self.state.target_rotation_y = 0.0;
        self.set_zoom(DEFAULT_ZOOM, viewport);
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.state.auto_rotate_enabled = !self.state.auto_rotate_enabled;
        self.state.auto_rotate_enabled
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.state.auto_rotate_enabled = enabled;
    }

    /// Advances one display frame. `elapsed` is wall-clock time since startup.
    pub fn tick(&mut self, elapsed: Duration) -> Option<ModelPose> {
        if !self.ready {
            return None;
        }
        let state = &mut self.state;
        state.current_rotation_x +=
            (state.target_rotation_x - state.current_rotation_x) * EASING_FACTOR;
        state.current_rotation_y +=
            (state.target_rotation_y - state.current_rotation_y) * EASING_FACTOR;
        let pose = ModelPose {
            rotation: Rotation::new(state.current_rotation_x, state.current_rotation_y, 0.0),
            offset_y: bob_offset(elapsed),
        };
        if state.auto_rotate_enabled && !state.pointer_down() {
            state.target_rotation_y += AUTO_ROTATE_STEP;
        }
        Some(pose)
    }

    fn accepts_viewport_input(&self) -> bool {
        self.ready && self.viewport_enabled
    }

    fn begin_drag(&mut self, x: f64, y: f64) {
        self.state.gesture = Gesture::Dragging;
        self.state.last_pointer_x = x;
        self.state.last_pointer_y = y;
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        let dx = x - self.state.last_pointer_x;
        let dy = y - self.state.last_pointer_y;
        self.on_drag_move(dx, dy);
        self.state.last_pointer_x = x;
        self.state.last_pointer_y = y;
    }

    fn begin_pinch(&mut self, touches: &[TouchPoint]) {
        let Some(distance) = touch_distance(touches) else {
            return;
        };
        self.state.gesture = Gesture::Pinching;
        self.state.pinch_start_distance = distance;
        self.state.pinch_start_zoom = self.state.zoom_level;
    }

    fn set_zoom<B: RenderBackend>(&mut self, zoom: f64, viewport: &mut ViewportController<B>) {
        self.state.zoom_level = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        viewport.apply_zoom(self.state.zoom_level);
    }

    fn clamp_tilt(&mut self) {
        self.state.target_rotation_x = self.state.target_rotation_x.clamp(-MAX_TILT, MAX_TILT);
    }
}

impl ViewportGate for InteractionController {
    fn set_viewport_interactive(&mut self, interactive: bool) {
        self.viewport_enabled = interactive;
        if !interactive {
            self.state.gesture = Gesture::Idle;
            self.state.pinch_start_distance = 0.0;
        }
    }
}

/// Vertical float offset for the given time since startup.
pub fn bob_offset(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64().sin() * BOB_AMPLITUDE
}
