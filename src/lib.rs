//! flow-field: Interactive spring-anchored particle field.
//!
//! This crate provides a WASM canvas component that lays a grid of particles
//! over the viewport, lets the pointer attract or repel them, and exports the
//! current frame as SVG, PNG or JPEG.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::controls::ControlsPanel;
pub use components::flow_field::{
	ExportFormat, FlowFieldCanvas, InteractionMode, Settings, ShapeType,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("flow-field: logging initialized");
}

/// Parses a settings document; absent keys fall back to defaults.
fn parse_settings(json: &str) -> Result<Settings, serde_json::Error> {
	serde_json::from_str::<Settings>(json).map(Settings::sanitized)
}

/// Load initial settings from a script element with id="flow-settings".
fn load_settings() -> Option<Settings> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("flow-settings")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_settings(&json_text) {
		Ok(settings) => {
			info!(
				"flow-field: loaded settings, {} particles",
				settings.particle_count()
			);
			Some(settings)
		}
		Err(e) => {
			warn!("flow-field: failed to parse settings: {}", e);
			None
		}
	}
}

/// Main application component.
/// Canvas on the left (top on narrow screens), controls panel beside it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let settings = RwSignal::new(load_settings().unwrap_or_default());
	let (export_request, request_export) = signal(None::<ExportFormat>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Force Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<div class="canvas-container">
				<FlowFieldCanvas settings=settings export_request=export_request />
			</div>
			<aside class="side-panel">
				<ControlsPanel
					settings=settings
					on_export=move |format: ExportFormat| request_export.set(Some(format))
				/>
			</aside>
		</div>
	}
}
