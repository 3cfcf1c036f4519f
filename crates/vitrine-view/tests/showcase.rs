use anyhow::Result;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use vitrine_catalog::Catalog;
use vitrine_shapes::ShapeDescription;
use vitrine_view::{
    CARD_CLOSED_KEY, FrameParams, InputEvent, JsonFileStore, Key, LayoutMode, MemoryStore,
    PreferenceStore, RenderBackend, Showcase, ShowcaseConfig, SurfaceSize, WireframeRenderer,
};

fn temp_path(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_nanos(),
        Err(_) => 0,
    };
    path.push(format!("vitrine_{stamp}_{file_name}"));
    path
}

#[derive(Default)]
struct RecordingBackend {
    attached: Vec<SurfaceSize>,
    resized: Vec<(SurfaceSize, f64)>,
    renderables: Vec<Option<ShapeDescription>>,
    frames: usize,
    last_distance: Option<f64>,
    disposals: usize,
}

impl RenderBackend for RecordingBackend {
    fn attach(&mut self, surface: SurfaceSize, _pixel_ratio: f64) {
        self.attached.push(surface);
    }

    fn resize(&mut self, surface: SurfaceSize, pixel_ratio: f64) {
        self.resized.push((surface, pixel_ratio));
    }

    fn set_renderable(&mut self, renderable: Option<ShapeDescription>) {
        self.renderables.push(renderable);
    }

    fn render(&mut self, frame: &FrameParams<'_>) {
        self.frames += 1;
        self.last_distance = Some(frame.camera.distance);
    }

    fn dispose(&mut self) {
        self.disposals += 1;
    }
}

fn showcase<S: PreferenceStore>(layout: LayoutMode, store: S) -> Showcase<RecordingBackend, S> {
    let config = ShowcaseConfig {
        initial_product: 0,
        layout,
    };
    Showcase::new(config, Catalog::builtin(), store, RecordingBackend::default())
}

#[test]
fn attach_builds_the_initial_product() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1280.0, 720.0, 1.0));
    let backend = shell.viewport().backend();
    assert_eq!(backend.attached, vec![SurfaceSize::new(1280.0, 720.0)]);
    assert_eq!(backend.renderables.len(), 1);
    assert_eq!(shell.current_index(), 0);
    assert!(shell.shape().is_some());
}

#[test]
fn zero_area_surface_stays_inert() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(!shell.attach(0.0, 720.0, 1.0));
    shell.tick(Instant::now());
    shell.handle(&InputEvent::Wheel { delta_y: -100.0 }, Instant::now());
    assert_eq!(shell.viewport().backend().frames, 0);
    assert_eq!(shell.interaction().state().zoom_level, 1.0);
}

#[test]
fn selecting_the_same_product_twice_is_deterministic() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(800.0, 600.0, 1.0));
    assert!(shell.select_product(2));
    let first = shell.shape().cloned();
    shell.handle(&InputEvent::Wheel { delta_y: -500.0 }, Instant::now());
    shell.handle(&InputEvent::Key { key: Key::ArrowRight }, Instant::now());
    assert!(shell.select_product(2));
    assert_eq!(shell.shape().cloned(), first);
    let state = shell.interaction().state();
    assert_eq!(state.target_rotation_y, 0.0);
    assert_eq!(state.zoom_level, 1.0);
    assert_eq!(shell.viewport().camera().distance, 5.0);
}

#[test]
fn out_of_range_selection_is_a_no_op() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(800.0, 600.0, 1.0));
    assert!(shell.select_product(1));
    let before = shell.viewport().backend().renderables.len();
    assert!(!shell.select_product(4));
    assert_eq!(shell.current_index(), 1);
    assert_eq!(shell.viewport().backend().renderables.len(), before);
}

#[test]
fn out_of_range_initial_product_falls_back_to_first() {
    let config = ShowcaseConfig {
        initial_product: 9,
        layout: LayoutMode::Desktop,
    };
    let mut shell = Showcase::new(
        config,
        Catalog::builtin(),
        MemoryStore::new(),
        RecordingBackend::default(),
    );
    assert!(shell.attach(800.0, 600.0, 1.0));
    assert_eq!(shell.current_index(), 0);
}

#[test]
fn mobile_card_gates_the_viewport() -> Result<()> {
    let mut shell = showcase(LayoutMode::Mobile, MemoryStore::new());
    assert!(shell.attach(390.0, 844.0, 3.0));
    assert!(shell.card().is_open());
    assert!(shell.card().scroll_locked());
    assert!(!shell.interaction().viewport_enabled());

    shell.close_card();
    assert!(shell.interaction().viewport_enabled());
    assert!(shell.card().reopen_affordance_visible());
    assert_eq!(shell.store().get(CARD_CLOSED_KEY)?.as_deref(), Some("true"));

    shell.open_card();
    assert!(!shell.interaction().viewport_enabled());
    assert!(!shell.card().reopen_affordance_visible());
    assert_eq!(shell.store().get(CARD_CLOSED_KEY)?.as_deref(), Some("false"));
    Ok(())
}

#[test]
fn desktop_viewport_stays_interactive_with_card_open() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1280.0, 720.0, 1.0));
    assert!(shell.card().is_open());
    assert!(shell.interaction().viewport_enabled());
    shell.toggle_card();
    shell.toggle_card();
    assert!(shell.interaction().viewport_enabled());
    assert!(!shell.card().scroll_locked());
}

#[test]
fn persisted_closed_card_starts_closed() {
    let store = MemoryStore::with_value(CARD_CLOSED_KEY, "true");
    let shell = showcase(LayoutMode::Desktop, store);
    assert!(shell.card().is_closed);
    assert!(!shell.card().reopen_affordance_visible());

    let store = MemoryStore::with_value(CARD_CLOSED_KEY, "true");
    let shell = showcase(LayoutMode::Mobile, store);
    assert!(shell.card().reopen_affordance_visible());
    assert!(shell.interaction().viewport_enabled());
}

#[test]
fn escape_closes_the_mobile_card_only() {
    let mut shell = showcase(LayoutMode::Mobile, MemoryStore::new());
    assert!(shell.attach(390.0, 844.0, 2.0));
    shell.handle(&InputEvent::Key { key: Key::Escape }, Instant::now());
    assert!(shell.card().is_closed);

    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1280.0, 720.0, 1.0));
    shell.handle(&InputEvent::Key { key: Key::Escape }, Instant::now());
    assert!(shell.card().is_open());
}

#[test]
fn resize_bursts_are_debounced() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1000.0, 500.0, 1.0));
    let start = Instant::now();
    for step in 0..5u64 {
        let width = 1000.0 + 100.0 * step as f64;
        let at = start + Duration::from_millis(step * 30);
        shell.handle(&InputEvent::Resize { width, height: 500.0 }, at);
        shell.tick(at);
    }
    assert!(shell.viewport().backend().resized.is_empty());
    assert!(shell.viewport().resize_pending());

    let last_push = start + Duration::from_millis(120);
    shell.tick(last_push + Duration::from_millis(99));
    assert!(shell.viewport().backend().resized.is_empty());
    shell.tick(last_push + Duration::from_millis(100));
    let resized = &shell.viewport().backend().resized;
    assert_eq!(resized, &vec![(SurfaceSize::new(1400.0, 500.0), 1.0)]);
    assert_eq!(shell.viewport().camera().aspect, 2.8);
    assert!(!shell.viewport().resize_pending());
}

#[test]
fn pixel_ratio_change_reaches_the_backend() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1000.0, 500.0, 1.0));
    shell.viewport_mut().set_device_pixel_ratio(3.0);
    assert_eq!(shell.viewport().pixel_ratio(), 2.0);
    let resized = &shell.viewport().backend().resized;
    assert_eq!(resized, &vec![(SurfaceSize::new(1000.0, 500.0), 2.0)]);

    shell.viewport_mut().set_device_pixel_ratio(2.5);
    assert_eq!(shell.viewport().backend().resized.len(), 1);

    shell.unload();
    shell.viewport_mut().set_device_pixel_ratio(1.0);
    assert_eq!(shell.viewport().backend().resized.len(), 1);
}

#[test]
fn zoom_reaches_the_renderer_on_the_next_frame() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1000.0, 500.0, 1.0));
    shell.zoom_in();
    shell.tick(Instant::now());
    let distance = shell.viewport().backend().last_distance;
    assert!(distance.is_some_and(|d| (d - 5.0 / 1.2).abs() < 1.0e-9));
}

#[test]
fn hidden_window_pauses_auto_rotate() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1000.0, 500.0, 1.0));
    assert!(shell.toggle_auto_rotate());
    shell.handle(&InputEvent::VisibilityChanged { hidden: true }, Instant::now());
    assert!(!shell.interaction().state().auto_rotate_enabled);
}

#[test]
fn unload_disposes_once_and_ignores_later_input() {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1000.0, 500.0, 1.0));
    shell.handle(&InputEvent::Unload, Instant::now());
    shell.unload();
    assert!(shell.is_unloaded());
    assert_eq!(shell.viewport().backend().disposals, 1);

    let frames = shell.viewport().backend().frames;
    shell.tick(Instant::now());
    assert_eq!(shell.viewport().backend().frames, frames);
    assert!(!shell.select_product(1));
}

#[test]
fn wireframe_renderer_draws_the_product() {
    let config = ShowcaseConfig::default();
    let mut shell = Showcase::new(
        config,
        Catalog::builtin(),
        MemoryStore::new(),
        WireframeRenderer::new(),
    );
    assert!(shell.attach(1280.0, 720.0, 1.0));
    shell.tick(Instant::now());
    let renderer = shell.viewport().backend();
    assert_eq!(renderer.frames_rendered(), 1);
    assert!(renderer.segment_count() > 0);
    assert!(renderer.frame().line_count() > 0);

    shell.unload();
    assert!(shell.viewport().backend().is_disposed());
}

#[test]
fn json_store_persists_across_sessions() -> Result<()> {
    let path = temp_path("prefs.json");
    {
        let mut shell = showcase(LayoutMode::Mobile, JsonFileStore::new(&path));
        assert!(shell.card().is_open());
        shell.close_card();
    }
    let shell = showcase(LayoutMode::Mobile, JsonFileStore::new(&path));
    assert!(shell.card().is_closed);
    assert!(shell.card().reopen_affordance_visible());

    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("productCardClosed"));
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn snapshot_serializes_current_state() -> Result<()> {
    let mut shell = showcase(LayoutMode::Desktop, MemoryStore::new());
    assert!(shell.attach(1280.0, 720.0, 1.0));
    assert!(shell.select_product(3));
    let value = serde_json::to_value(shell.snapshot())?;
    assert_eq!(value["product_index"], 3);
    assert_eq!(value["product_name"], "MacBook Ultra");
    assert_eq!(value["layout"], "desktop");
    assert_eq!(value["gesture"], "idle");
    Ok(())
}
