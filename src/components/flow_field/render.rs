//! Canvas rendering for the flow field.
//!
//! Draws a [`Scene`] in display-list order: background, base points, then
//! particles on top.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{Scene, Shape};

/// Renders the complete scene to the canvas.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for shape in &scene.shapes {
		match *shape {
			Shape::Background { fill } => {
				ctx.set_fill_style_str(&fill.to_css());
				ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
			}
			Shape::BasePoint {
				x,
				y,
				radius,
				fill,
				opacity,
			} => {
				ctx.set_global_alpha(opacity);
				ctx.set_fill_style_str(&fill.to_css());
				fill_circle(ctx, x, y, radius);
				ctx.set_global_alpha(1.0);
			}
			Shape::Circle {
				x,
				y,
				radius,
				fill,
				..
			} => {
				// A rotated circle looks identical, skip the transform.
				ctx.set_fill_style_str(&fill.to_css());
				fill_circle(ctx, x, y, radius);
			}
			Shape::Square {
				x,
				y,
				half,
				fill,
				rotation,
			} => {
				ctx.set_fill_style_str(&fill.to_css());
				match rotation {
					Some(deg) if deg != 0.0 => {
						ctx.save();
						let _ = ctx.translate(x, y);
						let _ = ctx.rotate(deg.to_radians());
						ctx.fill_rect(-half, -half, half * 2.0, half * 2.0);
						ctx.restore();
					}
					_ => ctx.fill_rect(x - half, y - half, half * 2.0, half * 2.0),
				}
			}
		}
	}
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, PI * 2.0);
	ctx.fill();
}
