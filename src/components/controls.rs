//! Side panel with the flow field controls.
//!
//! Every control writes straight into the shared [`Settings`] signal; the
//! canvas picks up the new value on its next frame.

use leptos::prelude::*;

use super::flow_field::{Color, ExportFormat, InteractionMode, Settings, ShapeType, SliderRange};

/// Formats a slider value with the number of decimals its step implies.
fn format_value(value: f64, precision: usize) -> String {
	format!("{:.*}", precision, value)
}

/// Swaps in a copy of the settings with `change` applied.
fn replace(settings: RwSignal<Settings>, change: impl FnOnce(&mut Settings)) {
	let mut next = settings.get_untracked();
	change(&mut next);
	settings.set(next);
}

/// Labelled range input showing its current value.
#[component]
pub fn Slider(
	label: &'static str,
	range: SliderRange,
	#[prop(into)] value: Signal<f64>,
	#[prop(into)] on_change: Callback<f64>,
) -> impl IntoView {
	let precision = range.precision();
	let (min, max) = (range.range.start().to_string(), range.range.end().to_string());
	let step = range.step.to_string();

	view! {
		<div class="control">
			<label class="control-label">
				{label}
				": "
				<span class="control-value">{move || format_value(value.get(), precision)}</span>
			</label>
			<input
				type="range"
				class="slider"
				min=min
				max=max
				step=step
				prop:value=move || value.get().to_string()
				on:input=move |ev| {
					if let Ok(v) = event_target_value(&ev).parse::<f64>() {
						on_change.run(v);
					}
				}
			/>
		</div>
	}
}

/// Segmented button group selecting one of a fixed set of values.
#[component]
pub fn ToggleSwitch<T>(
	label: &'static str,
	options: Vec<(T, &'static str)>,
	#[prop(into)] value: Signal<T>,
	#[prop(into)] on_change: Callback<T>,
) -> impl IntoView
where
	T: Copy + PartialEq + Send + Sync + 'static,
{
	view! {
		<div class="control">
			<span class="control-label">{label}</span>
			<div class="toggle">
				{options
					.into_iter()
					.map(|(option, text)| {
						view! {
							<button
								class="toggle-option"
								class:selected=move || value.get() == option
								on:click=move |_| on_change.run(option)
							>
								{text}
							</button>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}

fn on_off() -> Vec<(bool, &'static str)> {
	vec![(true, "On"), (false, "Off")]
}

/// Export dropdown; closes after a choice or when the pointer leaves it.
#[component]
fn DownloadMenu(#[prop(into)] on_export: Callback<ExportFormat>) -> impl IntoView {
	let (open, set_open) = signal(false);

	view! {
		<div class="dropdown" on:mouseleave=move |_| set_open.set(false)>
			<button
				class="dropdown-toggle"
				aria-haspopup="true"
				aria-expanded=move || if open.get() { "true" } else { "false" }
				on:click=move |_| set_open.update(|o| *o = !*o)
			>
				"Download"
				<span class="chevron" class:open=move || open.get()>
					"▾"
				</span>
			</button>
			<Show when=move || open.get()>
				<div class="dropdown-menu">
					{ExportFormat::ALL
						.into_iter()
						.map(|format| {
							view! {
								<a
									href="#"
									class="dropdown-item"
									on:click=move |ev| {
										ev.prevent_default();
										set_open.set(false);
										on_export.run(format);
									}
								>
									{format.label()}
								</a>
							}
						})
						.collect_view()}
				</div>
			</Show>
		</div>
	}
}

/// The full controls panel.
#[component]
pub fn ControlsPanel(
	settings: RwSignal<Settings>,
	#[prop(into)] on_export: Callback<ExportFormat>,
) -> impl IntoView {
	let total_shapes = move || settings.with(|s| s.particle_count());

	view! {
		<div class="controls">
			<h1 class="controls-title">"Force Field"</h1>
			<hr class="divider" />

			<ToggleSwitch
				label="Interaction Mode"
				options=vec![(InteractionMode::Attract, "Attract"), (InteractionMode::Repulse, "Repulse")]
				value=Signal::derive(move || settings.with(|s| s.interaction_mode))
				on_change=move |v: InteractionMode| replace(settings, |s| s.interaction_mode = v)
			/>

			<Slider
				label="Grid Density"
				range=Settings::GRID_SIZE
				value=Signal::derive(move || settings.with(|s| s.grid_size as f64))
				on_change=move |v: f64| replace(settings, |s| s.grid_size = v.round().max(0.0) as usize)
			/>
			<div class="hint">"Total shapes: " {total_shapes}</div>

			<ToggleSwitch
				label="Shape Type"
				options=vec![(ShapeType::Circle, "Circle"), (ShapeType::Square, "Square")]
				value=Signal::derive(move || settings.with(|s| s.shape_type))
				on_change=move |v: ShapeType| replace(settings, |s| s.shape_type = v)
			/>

			<ToggleSwitch
				label="Animate Shape Rotation"
				options=on_off()
				value=Signal::derive(move || settings.with(|s| s.animate_rotation))
				on_change=move |v: bool| replace(settings, |s| s.animate_rotation = v)
			/>

			<Slider
				label="Interaction Strength"
				range=Settings::INTERACTION_STRENGTH
				value=Signal::derive(move || settings.with(|s| s.interaction_strength))
				on_change=move |v: f64| replace(settings, |s| s.interaction_strength = v)
			/>

			<Slider
				label="Mouse Effect Radius"
				range=Settings::MOUSE_EFFECT_RADIUS
				value=Signal::derive(move || settings.with(|s| s.mouse_effect_radius))
				on_change=move |v: f64| replace(settings, |s| s.mouse_effect_radius = v)
			/>

			<ToggleSwitch
				label="Enable Glow Effect"
				options=on_off()
				value=Signal::derive(move || settings.with(|s| s.enable_glow))
				on_change=move |v: bool| replace(settings, |s| s.enable_glow = v)
			/>
			<Show when=move || settings.with(|s| s.enable_glow)>
				<div class="control">
					<label class="control-label" for="glow-color">
						"Glow Color"
					</label>
					<input
						id="glow-color"
						type="color"
						class="color-input"
						prop:value=move || settings.with(|s| s.glow_color.to_css_rgb())
						on:input=move |ev| {
							if let Some(c) = Color::from_hex(&event_target_value(&ev)) {
								replace(settings, |s| s.glow_color = c);
							}
						}
					/>
				</div>
			</Show>

			<ToggleSwitch
				label="Enable Dynamic Colors"
				options=on_off()
				value=Signal::derive(move || settings.with(|s| s.enable_dynamic_colors))
				on_change=move |v: bool| replace(settings, |s| s.enable_dynamic_colors = v)
			/>

			<Slider
				label="Return Force"
				range=Settings::RETURN_FORCE
				value=Signal::derive(move || settings.with(|s| s.return_force))
				on_change=move |v: f64| replace(settings, |s| s.return_force = v)
			/>

			<Slider
				label="Damping"
				range=Settings::DAMPING
				value=Signal::derive(move || settings.with(|s| s.damping))
				on_change=move |v: f64| replace(settings, |s| s.damping = v)
			/>

			<Slider
				label="Shape Base Size"
				range=Settings::BASE_RADIUS
				value=Signal::derive(move || settings.with(|s| s.base_radius))
				on_change=move |v: f64| replace(settings, |s| s.base_radius = v)
			/>

			<ToggleSwitch
				label="Show Base Points"
				options=on_off()
				value=Signal::derive(move || settings.with(|s| s.show_base_points))
				on_change=move |v: bool| replace(settings, |s| s.show_base_points = v)
			/>

			<div class="export">
				<h3>"Export"</h3>
				<DownloadMenu on_export=on_export />
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn values_follow_step_precision() {
		assert_eq!(format_value(0.25, Settings::INTERACTION_STRENGTH.precision()), "0.25");
		assert_eq!(format_value(0.02, Settings::RETURN_FORCE.precision()), "0.020");
		assert_eq!(format_value(200.0, Settings::MOUSE_EFFECT_RADIUS.precision()), "200");
		assert_eq!(format_value(3.5, Settings::BASE_RADIUS.precision()), "3.5");
		assert_eq!(format_value(30.0, Settings::GRID_SIZE.precision()), "30");
	}
}
