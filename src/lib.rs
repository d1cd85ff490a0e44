//! drift-field: ambient particle-field background animation for web canvases.
//!
//! This crate provides a WASM-based canvas component that animates a field of
//! drifting, wave-displaced particles behind page content, with click-reactive
//! effects and light/dark palette switching.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	FieldSettings, MotionStyle, ParticleField, ParticleFieldCanvas, PointerEffect,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("drift-field: logging initialized");
}

/// Load field settings from a script element with id="field-settings".
/// Expected format: JSON matching [`FieldSettings`]; absent fields use the
/// defaults. Returns `None` when the element is missing or malformed.
fn load_field_settings() -> Option<FieldSettings> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-settings")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldSettings>(&json_text) {
		Ok(settings) => {
			info!(
				"drift-field: loaded settings, {} particles, pointer {:?}",
				settings.dot_count, settings.pointer
			);
			Some(settings)
		}
		Err(e) => {
			warn!("drift-field: failed to parse field settings: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads settings from the DOM and renders the fullscreen particle field
/// behind a content overlay, with a theme toggle driving the palette.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let settings = load_field_settings();
	let dark = RwSignal::new(true);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="drift-field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field">
			<ParticleFieldCanvas dark=dark settings=settings fullscreen=true />
			<div class="field-overlay">
				<h1>"drift-field"</h1>
				<p class="subtitle">"Click the background to stir the particles."</p>
				<button on:click=move |_| dark.update(|d| *d = !*d)>
					{move || if dark.get() { "Light theme" } else { "Dark theme" }}
				</button>
			</div>
		</div>
	}
}
