use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;
use vitrine_geometry::{Rotation, Vec3};
use vitrine_shapes::ShapeDescription;

use crate::ui::Point2;

pub const FIELD_OF_VIEW_DEG: f64 = 75.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;
pub const BASE_DISTANCE: f64 = 5.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const RESIZE_QUIET_PERIOD: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Perspective camera on +Z looking at the origin, Y up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraParams {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
    pub distance: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_deg: FIELD_OF_VIEW_DEG,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            aspect: 1.0,
            distance: BASE_DISTANCE,
        }
    }
}

impl CameraParams {
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// Screen position in surface pixels and view depth, or `None` outside the clip range.
    pub fn project(&self, point: Vec3, surface: SurfaceSize) -> Option<(Point2, f64)> {
        let depth = self.distance - point.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let half_height = (self.fov_deg.to_radians() * 0.5).tan();
        let ndc_x = point.x / depth / (half_height * self.aspect);
        let ndc_y = point.y / depth / half_height;
        let x = (ndc_x + 1.0) * 0.5 * surface.width;
        let y = (1.0 - ndc_y) * 0.5 * surface.height;
        Some((Point2::new(x as f32, y as f32), depth))
    }
}

/// Placement of the current renderable for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ModelPose {
    pub rotation: Rotation,
    pub offset_y: f64,
}

impl ModelPose {
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation.apply(point) + Vec3::new(0.0, self.offset_y, 0.0)
    }
}

pub struct FrameParams<'a> {
    pub camera: &'a CameraParams,
    pub surface: SurfaceSize,
    pub pixel_ratio: f64,
    pub pose: ModelPose,
}

/// The drawing engine behind the viewport.
pub trait RenderBackend {
    fn attach(&mut self, surface: SurfaceSize, pixel_ratio: f64);
    fn resize(&mut self, surface: SurfaceSize, pixel_ratio: f64);
    /// Replaces the single current renderable.
    fn set_renderable(&mut self, renderable: Option<ShapeDescription>);
    fn render(&mut self, frame: &FrameParams<'_>);
    fn dispose(&mut self);
}

/// Trailing-edge debounce: only the last size of a burst is delivered.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(SurfaceSize, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn push(&mut self, size: SurfaceSize, now: Instant) {
        self.pending = Some((size, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<SurfaceSize> {
        match self.pending {
            Some((size, at)) if now.saturating_duration_since(at) >= self.quiet => {
                self.pending = None;
                Some(size)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_QUIET_PERIOD)
    }
}

pub struct ViewportController<B> {
    backend: B,
    camera: CameraParams,
    surface: Option<SurfaceSize>,
    pixel_ratio: f64,
    resize: ResizeDebouncer,
    disposed: bool,
}

impl<B: RenderBackend> ViewportController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            camera: CameraParams::default(),
            surface: None,
            pixel_ratio: 1.0,
            resize: ResizeDebouncer::default(),
            disposed: false,
        }
    }

    /// Binds the render surface. A zero-area surface leaves the viewport unready.
    pub fn attach(&mut self, surface: SurfaceSize, device_pixel_ratio: f64) -> bool {
        if self.disposed || surface.is_empty() {
            return false;
        }
        self.pixel_ratio = clamp_pixel_ratio(device_pixel_ratio);
        self.camera.aspect = surface.aspect();
        self.surface = Some(surface);
        self.backend.attach(surface, self.pixel_ratio);
        debug!(
            width = surface.width,
            height = surface.height,
            pixel_ratio = self.pixel_ratio,
            "viewport attached"
        );
        true
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some() && !self.disposed
    }

    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn apply_zoom(&mut self, zoom_level: f64) {
        self.camera.distance = BASE_DISTANCE / zoom_level;
    }

    /// Takes effect on the backend immediately when a surface is bound.
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) {
        let ratio = clamp_pixel_ratio(device_pixel_ratio);
        if ratio == self.pixel_ratio {
            return;
        }
        self.pixel_ratio = ratio;
        if let Some(surface) = self.surface.filter(|_| !self.disposed) {
            self.backend.resize(surface, ratio);
        }
    }

    /// Queues a resize; it lands once the surface has been quiet for the debounce period.
    pub fn request_resize(&mut self, width: f64, height: f64, now: Instant) {
        if !self.is_ready() {
            return;
        }
        self.resize.push(SurfaceSize::new(width, height), now);
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn flush_resize(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some(size) => self.resize(size.width, size.height),
            None => false,
        }
    }

    /// Recomputes the projection immediately.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let size = SurfaceSize::new(width, height);
        if !self.is_ready() || size.is_empty() {
            return false;
        }
        self.surface = Some(size);
        self.camera.aspect = size.aspect();
        self.backend.resize(size, self.pixel_ratio);
        debug!(width, height, aspect = self.camera.aspect, "viewport resized");
        true
    }

    pub fn set_renderable(&mut self, renderable: Option<ShapeDescription>) {
        if self.disposed {
            return;
        }
        self.backend.set_renderable(renderable);
    }

    pub fn render_frame(&mut self, pose: ModelPose) {
        let Some(surface) = self.surface else {
            return;
        };
        if self.disposed {
            return;
        }
        let frame = FrameParams {
            camera: &self.camera,
            surface,
            pixel_ratio: self.pixel_ratio,
            pose,
        };
        self.backend.render(&frame);
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.backend.dispose();
        self.disposed = true;
        self.surface = None;
        debug!("viewport disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn clamp_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debouncer_delivers_last_size_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::default();
        debouncer.push(SurfaceSize::new(800.0, 600.0), start);
        debouncer.push(SurfaceSize::new(900.0, 600.0), start + Duration::from_millis(40));
        assert_eq!(debouncer.poll(start + Duration::from_millis(120)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(140)),
            Some(SurfaceSize::new(900.0, 600.0))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn origin_projects_to_surface_center() {
        let camera = CameraParams {
            aspect: 2.0,
            ..CameraParams::default()
        };
        let surface = SurfaceSize::new(200.0, 100.0);
        let projected = camera.project(Vec3::ZERO, surface);
        assert_eq!(projected, Some((Point2::new(100.0, 50.0), BASE_DISTANCE)));
    }

    #[test]
    fn points_behind_the_near_plane_are_clipped() {
        let camera = CameraParams::default();
        let surface = SurfaceSize::new(100.0, 100.0);
        assert!(camera.project(Vec3::new(0.0, 0.0, 4.95), surface).is_none());
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(clamp_pixel_ratio(3.0), MAX_PIXEL_RATIO);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
    }
}
