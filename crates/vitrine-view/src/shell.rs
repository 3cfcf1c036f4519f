use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};
use vitrine_catalog::{Catalog, ProductDescriptor};
use vitrine_shapes::{ShapeDescription, build_renderable};

use crate::card::{CardController, CardState};
use crate::device::LayoutMode;
use crate::input::InputEvent;
use crate::interaction::{Gesture, InteractionController, KeyOutcome};
use crate::prefs::PreferenceStore;
use crate::viewport::{RenderBackend, SurfaceSize, ViewportController};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowcaseConfig {
    pub initial_product: usize,
    pub layout: LayoutMode,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub product_index: usize,
    pub product_name: String,
    pub layout: LayoutMode,
    pub gesture: Gesture,
    pub target_rotation: [f64; 2],
    pub current_rotation: [f64; 2],
    pub zoom_level: f64,
    pub camera_distance: f64,
    pub camera_aspect: f64,
    pub auto_rotate: bool,
    pub viewport_interactive: bool,
    pub card: CardState,
    pub reopen_affordance_visible: bool,
    pub surface: Option<SurfaceSize>,
    pub unloaded: bool,
}

/// Owns every controller and routes input between them.
pub struct Showcase<B, S> {
    catalog: Catalog,
    layout: LayoutMode,
    current: usize,
    shape: Option<ShapeDescription>,
    interaction: InteractionController,
    viewport: ViewportController<B>,
    card: CardController<S>,
    started: Instant,
    unloaded: bool,
}

impl<B: RenderBackend, S: PreferenceStore> Showcase<B, S> {
    pub fn new(config: ShowcaseConfig, catalog: Catalog, store: S, backend: B) -> Self {
        let mobile = config.layout.is_mobile();
        let mut interaction = InteractionController::new(mobile);
        let card = CardController::load(store, mobile);
        card.sync_gate(&mut interaction);

        let current = if catalog.contains_index(config.initial_product) {
            config.initial_product
        } else {
            warn!(
                index = config.initial_product,
                len = catalog.len(),
                "initial product out of range, showing the first one"
            );
            0
        };

        Self {
            catalog,
            layout: config.layout,
            current,
            shape: None,
            interaction,
            viewport: ViewportController::new(backend),
            card,
            started: Instant::now(),
            unloaded: false,
        }
    }

    /// Binds the render surface and shows the initial product. Returns `false` and
    /// stays inert if the surface has no area.
    pub fn attach(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        let surface = SurfaceSize::new(width, height);
        if self.unloaded || !self.viewport.attach(surface, device_pixel_ratio) {
            return false;
        }
        self.interaction.ready();
        self.started = Instant::now();
        self.select_product(self.current);
        info!(
            product = self.current,
            layout = ?self.layout,
            card_closed = self.card.state().is_closed,
            "showcase ready"
        );
        true
    }

    /// Switches the current product and resets the view. Out-of-range indices are ignored.
    pub fn select_product(&mut self, index: usize) -> bool {
        if self.unloaded || !self.catalog.contains_index(index) {
            debug!(index, "ignoring product selection");
            return false;
        }
        let shape = match build_renderable(&self.catalog, index) {
            Ok(shape) => shape,
            Err(err) => {
                warn!(index, error = %err, "could not build renderable");
                return false;
            }
        };
        self.viewport.set_renderable(Some(shape.clone()));
        self.shape = Some(shape);
        self.current = index;
        self.interaction.reset_view(&mut self.viewport);
        debug!(index, "product selected");
        true
    }

    pub fn handle(&mut self, event: &InputEvent, now: Instant) {
        if self.unloaded {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.interaction.on_pointer_down(*x, *y),
            InputEvent::PointerMove { x, y } => self.interaction.on_pointer_move(*x, *y),
            InputEvent::PointerUp => self.interaction.on_pointer_up(),
            InputEvent::TouchStart { touches } => self.interaction.on_touch_start(touches),
            InputEvent::TouchMove { touches } => {
                self.interaction.on_touch_move(touches, &mut self.viewport)
            }
            InputEvent::TouchEnd { touches } => self.interaction.on_touch_end(touches),
            InputEvent::Wheel { delta_y } => {
                self.interaction.on_wheel(*delta_y, &mut self.viewport)
            }
            InputEvent::Key { key } => {
                if self.interaction.on_key(*key) == KeyOutcome::Escape {
                    let card = self.card.state();
                    if card.is_mobile_layout && card.is_open() {
                        self.card.close(&mut self.interaction);
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                self.viewport.request_resize(*width, *height, now)
            }
            InputEvent::VisibilityChanged { hidden } => {
                if *hidden && self.interaction.state().auto_rotate_enabled {
                    self.interaction.set_auto_rotate(false);
                    debug!("auto-rotate paused while hidden");
                }
            }
            InputEvent::Unload => self.unload(),
        }
    }

    /// One display frame: pending resize, easing, then render.
    pub fn tick(&mut self, now: Instant) {
        if self.unloaded {
            return;
        }
        self.viewport.flush_resize(now);
        let elapsed = now.saturating_duration_since(self.started);
        if let Some(pose) = self.interaction.tick(elapsed) {
            self.viewport.render_frame(pose);
        }
    }

    pub fn unload(&mut self) {
        if self.unloaded {
            return;
        }
        self.viewport.dispose();
        self.unloaded = true;
        info!("showcase unloaded");
    }

    pub fn reset_view(&mut self) {
        self.interaction.reset_view(&mut self.viewport);
    }

    pub fn zoom_in(&mut self) {
        self.interaction.zoom_in(&mut self.viewport);
    }

    pub fn zoom_out(&mut self) {
        self.interaction.zoom_out(&mut self.viewport);
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.interaction.toggle_auto_rotate()
    }

    pub fn open_card(&mut self) {
        self.card.open(&mut self.interaction);
    }

    pub fn close_card(&mut self) {
        self.card.close(&mut self.interaction);
    }

    pub fn toggle_card(&mut self) {
        self.card.toggle(&mut self.interaction);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_product(&self) -> Option<&ProductDescriptor> {
        self.catalog.get(self.current)
    }

    pub fn shape(&self) -> Option<&ShapeDescription> {
        self.shape.as_ref()
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn viewport(&self) -> &ViewportController<B> {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController<B> {
        &mut self.viewport
    }

    pub fn card(&self) -> CardState {
        self.card.state()
    }

    pub fn store(&self) -> &S {
        self.card.store()
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.interaction.state();
        let camera = self.viewport.camera();
        let card = self.card.state();
        Snapshot {
            product_index: self.current,
            product_name: self
                .current_product()
                .map(|product| product.name.clone())
                .unwrap_or_default(),
            layout: self.layout,
            gesture: state.gesture,
            target_rotation: [state.target_rotation_x, state.target_rotation_y],
            current_rotation: [state.current_rotation_x, state.current_rotation_y],
            zoom_level: state.zoom_level,
            camera_distance: camera.distance,
            camera_aspect: camera.aspect,
            auto_rotate: state.auto_rotate_enabled,
            viewport_interactive: self.interaction.viewport_enabled(),
            card,
            reopen_affordance_visible: card.reopen_affordance_visible(),
            surface: self.viewport.surface(),
            unloaded: self.unloaded,
        }
    }
}
