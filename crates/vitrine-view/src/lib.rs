use thiserror::Error;

pub mod card;
pub mod device;
pub mod input;
pub mod interaction;
pub mod overlay;
pub mod prefs;
pub mod render;
pub mod shell;
pub mod ui;
pub mod viewport;

pub use card::{CARD_CLOSED_KEY, CardController, CardState, ViewportGate};
pub use device::LayoutMode;
pub use input::{InputEvent, Key, TouchPoint};
pub use interaction::{Gesture, InteractionController, InteractionState, KeyOutcome};
pub use prefs::{
    JsonFileStore, MemoryStore, PreferenceStore, default_prefs_path, resolve_prefs_path,
};
pub use render::WireframeRenderer;
pub use shell::{Showcase, ShowcaseConfig, Snapshot};
pub use viewport::{
    CameraParams, FrameParams, ModelPose, RenderBackend, SurfaceSize, ViewportController,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("preference storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
