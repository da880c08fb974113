//! Serialises a [`Scene`] into a standalone SVG document.

use std::fmt::Write;

use super::scene::{Scene, Shape};
use super::theme::Color;

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
	let s = format!("{:.3}", v);
	let s = s.trim_end_matches('0').trim_end_matches('.');
	if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// `fill` plus `fill-opacity` when the color is translucent.
fn fill_attrs(color: Color) -> String {
	if (color.a - 1.0).abs() < 0.001 {
		format!(r#"fill="{}""#, color.to_css_rgb())
	} else {
		format!(r#"fill="{}" fill-opacity="{}""#, color.to_css_rgb(), num(color.a))
	}
}

fn rotate_attr(rotation: Option<f64>, x: f64, y: f64) -> String {
	match rotation {
		Some(deg) => format!(r#" transform="rotate({} {} {})""#, num(deg), num(x), num(y)),
		None => String::new(),
	}
}

/// Renders the scene as an SVG document with inline fills.
pub fn to_svg(scene: &Scene) -> String {
	let (w, h) = (num(scene.width), num(scene.height));
	let mut out = String::with_capacity(64 + scene.shapes.len() * 72);

	let _ = write!(
		out,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
	);

	for shape in &scene.shapes {
		let _ = match *shape {
			Shape::Background { fill } => {
				write!(out, r#"<rect width="100%" height="100%" {}/>"#, fill_attrs(fill))
			}
			Shape::BasePoint {
				x,
				y,
				radius,
				fill,
				opacity,
			} => write!(
				out,
				r#"<circle cx="{}" cy="{}" r="{}" {} opacity="{}"/>"#,
				num(x),
				num(y),
				num(radius),
				fill_attrs(fill),
				num(opacity)
			),
			Shape::Circle {
				x,
				y,
				radius,
				fill,
				rotation,
			} => write!(
				out,
				r#"<circle cx="{}" cy="{}" r="{}" {}{}/>"#,
				num(x),
				num(y),
				num(radius),
				fill_attrs(fill),
				rotate_attr(rotation, x, y)
			),
			Shape::Square {
				x,
				y,
				half,
				fill,
				rotation,
			} => write!(
				out,
				r#"<rect x="{}" y="{}" width="{}" height="{}" {}{}/>"#,
				num(x - half),
				num(y - half),
				num(half * 2.0),
				num(half * 2.0),
				fill_attrs(fill),
				rotate_attr(rotation, x, y)
			),
		};
	}

	out.push_str("</svg>");
	out
}
