use anyhow::Result;
use egui::RichText;
use egui_wgpu::winit::Painter;
use egui_wgpu::{RendererOptions, WgpuConfiguration, WgpuSetup, WgpuSetupCreateNew};
use egui_winit::State as EguiWinitState;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use vitrine_base::AccentColor;
use vitrine_catalog::ProductDescriptor;
use vitrine_view::overlay::OverlayPainter;
use vitrine_view::ui::{Align2, Color32, Point2};
use vitrine_view::{
    Gesture, InputEvent, Key, PreferenceStore, Showcase, ShowcaseConfig, TouchPoint,
    WireframeRenderer,
};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use super::overlay::EguiOverlayPainter;
use crate::cli::ShowcaseArgs;
use crate::setup::{load_catalog, open_store, resolve_layout};

const POWER_PREF_ENV: &str = "VITRINE_POWER_PREF";
const CARD_WIDTH: f32 = 320.0;
const MOBILE_CARD_MAX_HEIGHT: f32 = 420.0;
const LINES_PER_WHEEL_NOTCH: f64 = 100.0;
const PAGE_HEIGHT: f64 = 800.0;

type AppShowcase = Showcase<WireframeRenderer, Box<dyn PreferenceStore>>;

pub fn run_gui(args: &ShowcaseArgs) -> Result<()> {
    let catalog = load_catalog(args)?;
    let store = open_store(args);

    let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = event_loop
        .create_window(
            winit::window::Window::default_attributes()
                .with_title("Vitrine")
                .with_inner_size(LogicalSize::new(1280.0, 800.0))
                .with_min_inner_size(LogicalSize::new(360.0, 560.0)),
        )
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = Arc::new(window);

    let logical_width = window
        .inner_size()
        .to_logical::<f64>(window.scale_factor())
        .width;
    let config = ShowcaseConfig {
        initial_product: args.product,
        layout: resolve_layout(args.device, logical_width),
    };
    info!(layout = ?config.layout, logical_width, "starting showcase window");
    let mut app = ShowcaseApp::new(Showcase::new(
        config,
        catalog,
        store,
        WireframeRenderer::new(),
    ));

    let egui_ctx = egui::Context::default();
    let mut painter = create_painter(egui_ctx.clone())?;
    pollster::block_on(painter.set_window(egui::ViewportId::ROOT, Some(window.clone())))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    let mut egui_state = EguiWinitState::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &event_loop,
        Some(window.scale_factor() as f32),
        window.theme(),
        painter.max_texture_side(),
    );

    let clear_color = egui_ctx.style().visuals.window_fill;
    let [r, g, b, a] = clear_color.to_array();
    let clear_color = [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ];

    #[allow(deprecated)]
    event_loop
        .run(move |event, event_loop| {
            event_loop.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    if matches!(event, WindowEvent::CloseRequested) {
                        app.showcase.unload();
                        event_loop.exit();
                        return;
                    }
                    if let WindowEvent::Occluded(hidden) = event {
                        app.showcase.handle(
                            &InputEvent::VisibilityChanged { hidden },
                            Instant::now(),
                        );
                    }

                    let response = egui_state.on_window_event(&window, &event);
                    if response.repaint {
                        window.request_redraw();
                    }

                    match event {
                        WindowEvent::Resized(size) => {
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            let size = window.inner_size();
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let raw_input = egui_state.take_egui_input(&window);
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                app.ui(ctx);
                            });

                            egui_state.handle_platform_output(&window, full_output.platform_output);

                            let clipped_primitives = egui_ctx
                                .tessellate(full_output.shapes, full_output.pixels_per_point);
                            let _ = painter.paint_and_update_textures(
                                egui::ViewportId::ROOT,
                                full_output.pixels_per_point,
                                clear_color,
                                &clipped_primitives,
                                &full_output.textures_delta,
                                Vec::new(),
                            );
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}

fn create_painter(ctx: egui::Context) -> Result<Painter> {
    let mut configuration = WgpuConfiguration::default();
    let power_preference = match std::env::var(POWER_PREF_ENV) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "low" | "low_power" | "low-power" => wgpu::PowerPreference::LowPower,
            "default" | "none" => wgpu::PowerPreference::default(),
            _ => wgpu::PowerPreference::HighPerformance,
        },
        Err(_) => wgpu::PowerPreference::HighPerformance,
    };
    configuration.wgpu_setup = WgpuSetup::CreateNew(WgpuSetupCreateNew {
        power_preference,
        device_descriptor: Arc::new(|adapter| {
            let required_limits =
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
            wgpu::DeviceDescriptor {
                label: Some("vitrine"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::default(),
            }
        }),
        ..Default::default()
    });

    let painter = pollster::block_on(Painter::new(
        ctx,
        configuration,
        false,
        RendererOptions::default(),
    ));
    Ok(painter)
}

struct ShowcaseApp {
    showcase: AppShowcase,
    attached: bool,
    last_size: Option<egui::Vec2>,
    pixels_per_point: f32,
    /// Touches that began inside the viewport, keyed by egui touch id.
    touches: BTreeMap<u64, TouchPoint>,
}

impl ShowcaseApp {
    fn new(showcase: AppShowcase) -> Self {
        Self {
            showcase,
            attached: false,
            last_size: None,
            pixels_per_point: 1.0,
            touches: BTreeMap::new(),
        }
    }

    fn ui(&mut self, ctx: &egui::Context) {
        self.top_bar(ctx);

        let card = self.showcase.card();
        let product = self.showcase.current_product().cloned();
        if card.is_open() && !card.is_mobile_layout {
            egui::SidePanel::right("product_card")
                .resizable(false)
                .exact_width(CARD_WIDTH)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            if let Some(product) = &product {
                                self.card_contents(ui, product);
                            }
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click_and_drag());
            self.draw_viewport(ctx, ui, rect, response);
        });

        if card.is_open() && card.is_mobile_layout {
            self.mobile_card(ctx, product.as_ref());
        }
        if card.reopen_affordance_visible() {
            egui::Area::new(egui::Id::new("reopen_card"))
                .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
                .show(ctx, |ui| {
                    if ui.button("ℹ Details").clicked() {
                        self.showcase.open_card();
                    }
                });
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        let names: Vec<String> = self
            .showcase
            .catalog()
            .iter()
            .map(|product| product.name.clone())
            .collect();
        let current = self.showcase.current_index();
        let auto_rotate = self.showcase.interaction().state().auto_rotate_enabled;
        let card_open = self.showcase.card().is_open();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 4.0);
                ui.heading("Vitrine");
                ui.add(egui::Separator::default().vertical());

                for (index, name) in names.iter().enumerate() {
                    if ui.selectable_label(index == current, name).clicked() {
                        self.showcase.select_product(index);
                    }
                }
                ui.add(egui::Separator::default().vertical());

                if ui.button("Reset View").clicked() {
                    self.showcase.reset_view();
                }
                if ui.button("Zoom +").clicked() {
                    self.showcase.zoom_in();
                }
                if ui.button("Zoom −").clicked() {
                    self.showcase.zoom_out();
                }
                if ui.selectable_label(auto_rotate, "Auto-rotate").clicked() {
                    let enabled = self.showcase.toggle_auto_rotate();
                    debug!(enabled, "auto-rotate toggled");
                }
                if ui.selectable_label(card_open, "Details").clicked() {
                    self.showcase.toggle_card();
                }
            });
        });
    }

    fn mobile_card(&mut self, ctx: &egui::Context, product: Option<&ProductDescriptor>) {
        egui::Window::new("Product")
            .id(egui::Id::new("product_card_mobile"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -12.0])
            .default_width(CARD_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(MOBILE_CARD_MAX_HEIGHT)
                    .show(ui, |ui| {
                        if let Some(product) = product {
                            self.card_contents(ui, product);
                        }
                    });
            });
    }

    fn card_contents(&mut self, ui: &mut egui::Ui, product: &ProductDescriptor) {
        ui.horizontal(|ui| {
            ui.heading(&product.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✕").on_hover_text("Close").clicked() {
                    self.showcase.close_card();
                }
            });
        });
        ui.label(
            RichText::new(&product.price)
                .strong()
                .size(20.0)
                .color(accent_color(product.accent_color)),
        );
        ui.label(RichText::new(product.category.label()).weak());
        ui.add_space(8.0);
        ui.label(&product.description);
        ui.add_space(12.0);
        egui::Grid::new("spec_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for entry in &product.specs {
                    ui.label(RichText::new(&entry.label).strong());
                    ui.label(&entry.value);
                    ui.end_row();
                }
            });
    }

    fn draw_viewport(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        response: egui::Response,
    ) {
        let bg = ui.visuals().extreme_bg_color;
        ui.painter().rect_filled(rect, 0.0, bg);

        let now = Instant::now();
        self.sync_surface(ctx, rect, now);
        self.forward_input(ctx, rect, response.hovered(), now);
        self.showcase.tick(now);

        let cursor = match self.showcase.interaction().gesture() {
            Gesture::Dragging => egui::CursorIcon::Grabbing,
            _ => egui::CursorIcon::Grab,
        };
        response.on_hover_cursor(cursor);

        if self.showcase.card().scroll_locked() {
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(140));
        }

        let overlay_painter = ui.painter().with_clip_rect(rect);
        let mut overlay = EguiOverlayPainter::new(&overlay_painter, rect.min.to_vec2());
        self.showcase.viewport().backend().frame().replay(&mut overlay);

        if let Some(product) = self.showcase.current_product() {
            overlay.text(
                Point2::new(12.0, 12.0),
                Align2::LeftTop,
                product.name.clone(),
                16.0,
                Color32::from_gray(200),
            );
        }
        let hint = if self.showcase.layout().is_mobile() {
            "Drag to rotate · Pinch to zoom"
        } else {
            "Drag to rotate · Scroll to zoom · Arrow keys to turn"
        };
        overlay.text(
            Point2::new(rect.width() * 0.5, rect.height() - 20.0),
            Align2::CenterCenter,
            hint.to_string(),
            13.0,
            Color32::from_rgba_unmultiplied(180, 180, 180, 200),
        );
    }

    /// Attaches on the first frame with a usable rect; later size changes go
    /// through the debounced resize path.
    fn sync_surface(&mut self, ctx: &egui::Context, rect: egui::Rect, now: Instant) {
        let size = rect.size();
        let pixels_per_point = ctx.pixels_per_point();
        if !self.attached {
            self.attached = self.showcase.attach(
                size.x as f64,
                size.y as f64,
                pixels_per_point as f64,
            );
            self.last_size = Some(size);
            self.pixels_per_point = pixels_per_point;
            return;
        }
        if pixels_per_point != self.pixels_per_point {
            self.pixels_per_point = pixels_per_point;
            self.showcase
                .viewport_mut()
                .set_device_pixel_ratio(pixels_per_point as f64);
        }
        if self.last_size != Some(size) {
            self.last_size = Some(size);
            let event = InputEvent::Resize {
                width: size.x as f64,
                height: size.y as f64,
            };
            self.showcase.handle(&event, now);
        }
    }

    fn forward_input(&mut self, ctx: &egui::Context, rect: egui::Rect, hovered: bool, now: Instant) {
        let events = ctx.input(|i| i.events.clone());
        let keyboard_free = !ctx.wants_keyboard_input();
        let local = |pos: egui::Pos2| ((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        for event in events {
            let translated = match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed && hovered && rect.contains(pos) {
                        let (x, y) = local(pos);
                        Some(InputEvent::PointerDown { x, y })
                    } else if !pressed {
                        Some(InputEvent::PointerUp)
                    } else {
                        None
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let (x, y) = local(pos);
                    Some(InputEvent::PointerMove { x, y })
                }
                egui::Event::MouseWheel { unit, delta, .. } if hovered => {
                    let scale = match unit {
                        egui::MouseWheelUnit::Point => 1.0,
                        egui::MouseWheelUnit::Line => LINES_PER_WHEEL_NOTCH,
                        egui::MouseWheelUnit::Page => PAGE_HEIGHT,
                    };
                    Some(InputEvent::Wheel {
                        delta_y: -(delta.y as f64) * scale,
                    })
                }
                egui::Event::Touch { id, phase, pos, .. } => {
                    self.track_touch(id.0, phase, pos, rect, hovered)
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } if keyboard_free => translate_key(key).map(|key| InputEvent::Key { key }),
                _ => None,
            };
            if let Some(event) = translated {
                self.showcase.handle(&event, now);
            }
        }
    }

    fn track_touch(
        &mut self,
        id: u64,
        phase: egui::TouchPhase,
        pos: egui::Pos2,
        rect: egui::Rect,
        hovered: bool,
    ) -> Option<InputEvent> {
        let point = TouchPoint::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        match phase {
            egui::TouchPhase::Start => {
                if !(hovered && rect.contains(pos)) {
                    return None;
                }
                self.touches.insert(id, point);
                Some(InputEvent::TouchStart {
                    touches: self.active_touches(),
                })
            }
            egui::TouchPhase::Move => {
                let slot = self.touches.get_mut(&id)?;
                *slot = point;
                Some(InputEvent::TouchMove {
                    touches: self.active_touches(),
                })
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                self.touches.remove(&id)?;
                Some(InputEvent::TouchEnd {
                    touches: self.active_touches(),
                })
            }
        }
    }

    fn active_touches(&self) -> Vec<TouchPoint> {
        self.touches.values().copied().collect()
    }
}

fn translate_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::ArrowLeft => Some(Key::ArrowLeft),
        egui::Key::ArrowRight => Some(Key::ArrowRight),
        egui::Key::ArrowUp => Some(Key::ArrowUp),
        egui::Key::ArrowDown => Some(Key::ArrowDown),
        egui::Key::Escape => Some(Key::Escape),
        _ => None,
    }
}

fn accent_color(color: AccentColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}
