//! Leptos component wrapping the flow field canvas.
//!
//! The component sizes a canvas to its parent container and runs an
//! animation loop via `requestAnimationFrame`: each frame performs one
//! simulation tick and redraws. Pointer and touch events update the shared
//! pointer position, which the next tick picks up. The loop stops when the
//! component is unmounted.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use leptos::ev;
use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::export::{self, ExportError, ExportFormat};
use super::render;
use super::state::FlowFieldState;
use super::theme::Theme;
use super::types::Settings;

/// Simulation state together with the 2d context it is drawn to.
struct CanvasContext {
	state: FlowFieldState,
	ctx: CanvasRenderingContext2d,
}

type SharedContext = Rc<RefCell<Option<CanvasContext>>>;

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((0.0, 0.0))
}

/// Converts client coordinates to canvas-local ones.
fn local_coords(canvas_ref: NodeRef<Canvas>, client_x: i32, client_y: i32) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
}

fn set_pointer(context: &SharedContext, pointer: Option<(f64, f64)>) {
	if let Some(ref mut c) = *context.borrow_mut() {
		c.state.set_pointer(pointer);
	}
}

/// Renders the interactive particle field on a canvas element.
///
/// `settings` is read once per frame. Each time `export_request` is set to a
/// format, the frame current at that moment is exported.
#[component]
pub fn FlowFieldCanvas(
	#[prop(into)] settings: Signal<Settings>,
	#[prop(into)] export_request: Signal<Option<ExportFormat>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let frame_id = Arc::new(AtomicI32::new(0));
	let (context_init, animate_init) = (context.clone(), animate.clone());
	let (alive_init, frame_init) = (alive.clone(), frame_id.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("flow-field: 2d canvas context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(CanvasContext {
			state: FlowFieldState::new(w, h, Theme::default()),
			ctx,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let resize_handle = window_event_listener(ev::resize, move |_| {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		});
		// Runs when the effect re-runs or the component unmounts.
		on_cleanup(move || resize_handle.remove());

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let (alive_anim, frame_anim) = (alive_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			let Some(current) = settings.try_get_untracked() else {
				return;
			};
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if let Some(scene) = c.state.frame(&current) {
					render::render(&scene, &c.ctx);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
						frame_anim.store(id, Ordering::Relaxed);
					}
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_init.store(id, Ordering::Relaxed);
			}
		}
		debug!("flow-field: animation loop started at {}x{}", w, h);
	});

	on_cleanup(move || {
		alive.store(false, Ordering::Relaxed);
		let window: Option<Window> = web_sys::window();
		if let Some(win) = window {
			let _ = win.cancel_animation_frame(frame_id.load(Ordering::Relaxed));
		}
		debug!("flow-field: animation loop stopped");
	});

	let context_export = context.clone();
	Effect::new(move |_| {
		let Some(format) = export_request.get() else {
			return;
		};
		let Some(current) = settings.try_get_untracked() else {
			return;
		};
		let scene = match *context_export.borrow() {
			Some(ref c) => c.state.scene(&current),
			None => return,
		};
		match export::export(&scene, format) {
			Ok(()) => {}
			Err(ExportError::NoSurface) => debug!("flow-field: nothing to export yet"),
			Err(e) => error!("flow-field: {} export failed: {}", format.label(), e),
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		set_pointer(&context_mm, local_coords(canvas_ref, ev.client_x(), ev.client_y()));
	};

	let context_me = context.clone();
	let on_mouseenter = move |ev: MouseEvent| {
		set_pointer(&context_me, local_coords(canvas_ref, ev.client_x(), ev.client_y()));
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		set_pointer(&context_ml, None);
	};

	// Only the first touch point steers; page scroll/zoom is suppressed while touching.
	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some(t) = ev.touches().get(0) {
			set_pointer(&context_ts, local_coords(canvas_ref, t.client_x(), t.client_y()));
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some(t) = ev.touches().get(0) {
			set_pointer(&context_tm, local_coords(canvas_ref, t.client_x(), t.client_y()));
		}
	};

	let context_te = context.clone();
	let on_touchend = move |_: TouchEvent| {
		set_pointer(&context_te, None);
	};

	let context_tc = context.clone();
	let on_touchcancel = move |_: TouchEvent| {
		set_pointer(&context_tc, None);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="flow-field-canvas"
			on:mousemove=on_mousemove
			on:mouseenter=on_mouseenter
			on:mouseleave=on_mouseleave
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:touchcancel=on_touchcancel
			style="display: block; width: 100%; height: 100%; touch-action: none;"
		/>
	}
}
