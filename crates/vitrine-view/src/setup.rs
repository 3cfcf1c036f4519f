use anyhow::{Context, Result};
use tracing::info;
use vitrine_catalog::Catalog;
use vitrine_view::prefs;
use vitrine_view::{LayoutMode, PreferenceStore, default_prefs_path};

use crate::cli::{DeviceArg, ShowcaseArgs};

pub const USER_AGENT_ENV: &str = "VITRINE_USER_AGENT";

pub fn load_catalog(args: &ShowcaseArgs) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => {
            let catalog = Catalog::from_json_path(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            info!(path = %path.display(), products = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

/// `--device` wins; `auto` looks at `$VITRINE_USER_AGENT` and the logical width.
pub fn resolve_layout(device: DeviceArg, viewport_width: f64) -> LayoutMode {
    match device {
        DeviceArg::Mobile => LayoutMode::Mobile,
        DeviceArg::Desktop => LayoutMode::Desktop,
        DeviceArg::Auto => {
            let agent = std::env::var(USER_AGENT_ENV).ok();
            LayoutMode::detect(agent.as_deref(), viewport_width)
        }
    }
}

/// `--prefs`, then `$VITRINE_PREFS`, then the platform config dir, then memory.
pub fn open_store(args: &ShowcaseArgs) -> Box<dyn PreferenceStore> {
    prefs::open_store(args.prefs.clone().or_else(default_prefs_path))
}
