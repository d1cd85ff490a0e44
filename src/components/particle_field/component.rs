//! Leptos component wrapping the particle-field canvas.
//!
//! The component creates an HTML canvas element, builds a [`ParticleField`]
//! bound to it, and runs the animation loop via `requestAnimationFrame`,
//! advancing the simulation and redrawing each frame. Window resizes
//! regenerate the field at the new dimensions; clicks are translated to
//! canvas coordinates and forwarded to the configured pointer effect. Every
//! mounted field is tracked in a registry and stopped and unregistered when
//! the component unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::field::ParticleField;
use super::registry::FieldRegistry;
use super::render;
use super::settings::{FieldSettings, PointerEffect};

thread_local! {
	static REGISTRY: RefCell<FieldRegistry<u64>> = RefCell::new(FieldRegistry::new());
	static NEXT_FIELD_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_field_id() -> u64 {
	NEXT_FIELD_ID.with(|id| {
		let next = id.get() + 1;
		id.set(next);
		next
	})
}

/// Number of fields currently registered. Exposed for host diagnostics.
pub fn active_fields() -> usize {
	REGISTRY.with(|r| r.borrow().len())
}

/// Bundles the simulation with the click behavior chosen by its settings.
struct FieldContext {
	field: ParticleField,
	pointer: PointerEffect,
}

/// Renders an ambient particle-field animation on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and regenerate on window resize.
/// Explicit `width`/`height` override automatic sizing. `dark` switches the
/// render palette reactively; `settings` defaults to the viewport-scaled
/// configuration when not given.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] dark: Signal<bool>,
	#[prop(default = None)] settings: Option<FieldSettings>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let field_id = next_field_id();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// A surface without a 2d context gets no animation, not a panic.
		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				log::warn!("drift-field: 2d context unavailable, animation disabled");
				return;
			}
		};

		let settings = settings
			.clone()
			.unwrap_or_else(|| FieldSettings::for_viewport(w));
		let pointer = settings.pointer;
		let seed = (js_sys::Math::random() * 9.0e15) as u64;
		let mut field = ParticleField::new(settings, w, h, seed);
		field.set_dark(dark.get_untracked());

		log::info!(
			"drift-field: field {field_id} initialized, {} particles at {w}x{h}",
			field.particles().len()
		);

		*context_init.borrow_mut() = Some(FieldContext { field, pointer });

		let handle = REGISTRY.with(|r| r.borrow_mut().register(field_id));

		if fullscreen {
			let (context_resize, canvas_resize, handle_resize) =
				(context_init.clone(), canvas.clone(), handle.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				if !handle_resize.is_running() {
					return;
				}
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.field.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !handle.is_running() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.field.tick();
				render::render(&c.field, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Palette follows the host's theme toggle; physics is untouched.
	let context_theme = context.clone();
	Effect::new(move |_| {
		let is_dark = dark.get();
		if let Some(ref mut c) = *context_theme.borrow_mut() {
			c.field.set_dark(is_dark);
		}
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_click.borrow_mut() {
			match c.pointer {
				PointerEffect::None => {}
				PointerEffect::Ripple { radius, strength } => {
					c.field.apply_impulse(x, y, radius, strength);
				}
				PointerEffect::Spawn { count, speed } => {
					c.field.spawn_burst(x, y, count, speed);
				}
			}
		}
	};

	on_cleanup(move || {
		REGISTRY.with(|r| r.borrow_mut().remove(&field_id));
		log::debug!("drift-field: field {field_id} destroyed");
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:click=on_click
			style="display: block;"
		/>
	}
}
