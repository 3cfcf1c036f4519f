use tracing::debug;
use vitrine_base::AccentColor;
use vitrine_shapes::{Segment, ShapeDescription};

use crate::overlay::{OverlayCollector, OverlayPainter};
use crate::ui::{Color32, Stroke};
use crate::viewport::{FrameParams, RenderBackend, SurfaceSize};

const LINE_WIDTH: f32 = 1.2;
/// Fraction of the gap to white added to every line, so dark accents stay visible.
const LIFT: f64 = 0.35;

/// Draws the current renderable as projected, depth-shaded line segments.
///
/// Each [`render`](RenderBackend::render) replaces the collected frame, which a
/// painter replays afterwards.
#[derive(Debug, Default)]
pub struct WireframeRenderer {
    segments: Vec<Segment>,
    frame: OverlayCollector,
    surface: Option<SurfaceSize>,
    pixel_ratio: f64,
    frames_rendered: u64,
    disposed: bool,
}

impl WireframeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &OverlayCollector {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl RenderBackend for WireframeRenderer {
    fn attach(&mut self, surface: SurfaceSize, pixel_ratio: f64) {
        self.surface = Some(surface);
        self.pixel_ratio = pixel_ratio;
        self.disposed = false;
    }

    fn resize(&mut self, surface: SurfaceSize, pixel_ratio: f64) {
        self.surface = Some(surface);
        self.pixel_ratio = pixel_ratio;
    }

    fn set_renderable(&mut self, renderable: Option<ShapeDescription>) {
        self.segments = renderable
            .as_ref()
            .map(ShapeDescription::wireframe)
            .unwrap_or_default();
    }

    fn render(&mut self, frame: &FrameParams<'_>) {
        if self.disposed {
            return;
        }
        self.frame.clear();
        let camera = frame.camera;
        for segment in &self.segments {
            let start = camera.project(frame.pose.apply(segment.start), frame.surface);
            let end = camera.project(frame.pose.apply(segment.end), frame.surface);
            if let (Some((a, depth_a)), Some((b, depth_b))) = (start, end) {
                let depth = (depth_a + depth_b) * 0.5;
                let color = shade(segment.color, depth, camera.distance);
                self.frame.line_segment(a, b, Stroke::new(LINE_WIDTH, color));
            }
        }
        self.frames_rendered += 1;
    }

    fn dispose(&mut self) {
        self.segments.clear();
        self.frame.clear();
        self.surface = None;
        self.disposed = true;
        debug!(frames = self.frames_rendered, "wireframe renderer disposed");
    }
}

/// Nearer lines are brighter; `focus` is the camera-to-origin distance.
fn shade(color: AccentColor, depth: f64, focus: f64) -> Color32 {
    let falloff = (1.0 - (depth - focus) * 0.25).clamp(0.45, 1.25);
    let [r, g, b] = color.scaled(falloff).rgb();
    let lift = |c: u8| (c as f64 + (255.0 - c as f64) * LIFT).round() as u8;
    Color32::from_rgb(lift(r), lift(g), lift(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_lines_are_brighter() {
        let color = AccentColor::from_hex(0x2563eb);
        let near = shade(color, 4.0, 5.0);
        let far = shade(color, 6.0, 5.0);
        assert!(near.b > far.b);
    }

    #[test]
    fn black_is_lifted_off_the_background() {
        let c = shade(AccentColor::BLACK, 5.0, 5.0);
        assert!(c.r > 0 && c.g > 0 && c.b > 0);
    }
}
