use std::borrow::Cow;
use std::sync::OnceLock;

use egui::{FontDefinitions, FontFamily};
use plotters::style::{register_font, FontStyle};

use crate::error::{ObserverError, Result};

/// Family name plotters resolves for axis ticks and legend labels
pub const PLOT_FONT_FAMILY: &str = "sans-serif";

static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Register egui's bundled proportional font with plotters, once per process
///
/// Plots never depend on fonts installed on the host.
pub fn ensure_registered() -> Result<()> {
    REGISTERED
        .get_or_init(register_bundled_font)
        .clone()
        .map_err(ObserverError::Render)
}

fn register_bundled_font() -> std::result::Result<(), String> {
    let definitions = FontDefinitions::default();
    let name = definitions
        .families
        .get(&FontFamily::Proportional)
        .and_then(|names| names.first())
        .ok_or("no proportional font bundled")?;
    let data = definitions
        .font_data
        .get(name)
        .ok_or_else(|| format!("font data for {} missing", name))?;

    let bytes: &'static [u8] = match data.font.clone() {
        Cow::Borrowed(bytes) => bytes,
        Cow::Owned(bytes) => Box::leak(bytes.into_boxed_slice()),
    };

    register_font(PLOT_FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| format!("failed to register {}", name))?;
    log::debug!("registered bundled font {} as {}", name, PLOT_FONT_FAMILY);
    Ok(())
}
