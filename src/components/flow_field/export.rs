//! Saving the current frame as SVG, PNG or JPEG.
//!
//! The scene is serialised to SVG at call time. Raster formats load that SVG
//! into an image element and paint it onto an off-screen canvas; the
//! download happens once the image has decoded.

use std::fmt;

use log::{error, info};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
	Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, HtmlAnchorElement,
	HtmlCanvasElement, HtmlImageElement, Url,
};

use super::scene::Scene;
use super::svg::to_svg;

/// Encoder quality for lossy raster formats.
const LOSSY_QUALITY: f64 = 0.9;

/// Output file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	Svg,
	Png,
	Jpeg,
}

impl ExportFormat {
	/// All formats, in menu order.
	pub const ALL: [ExportFormat; 3] = [ExportFormat::Svg, ExportFormat::Png, ExportFormat::Jpeg];

	pub fn extension(self) -> &'static str {
		match self {
			ExportFormat::Svg => "svg",
			ExportFormat::Png => "png",
			ExportFormat::Jpeg => "jpeg",
		}
	}

	pub fn mime(self) -> &'static str {
		match self {
			ExportFormat::Svg => "image/svg+xml",
			ExportFormat::Png => "image/png",
			ExportFormat::Jpeg => "image/jpeg",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			ExportFormat::Svg => "SVG",
			ExportFormat::Png => "PNG",
			ExportFormat::Jpeg => "JPEG",
		}
	}
}

/// `flow-field-<millis>.<ext>`
pub fn file_name(format: ExportFormat, timestamp_ms: u64) -> String {
	format!("flow-field-{}.{}", timestamp_ms, format.extension())
}

/// Errors that can abort an export.
#[derive(Debug)]
pub enum ExportError {
	/// Nothing has been laid out or the viewport has no area yet.
	NoSurface,
	/// A DOM call failed.
	Dom(String),
	/// The browser could not decode the SVG for rasterisation.
	ImageLoad,
	/// The off-screen canvas could not be encoded.
	Encode(String),
}

impl fmt::Display for ExportError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExportError::NoSurface => write!(f, "no rendered scene to export"),
			ExportError::Dom(msg) => write!(f, "DOM operation failed: {}", msg),
			ExportError::ImageLoad => write!(f, "failed to load SVG for rasterisation"),
			ExportError::Encode(msg) => write!(f, "failed to encode image: {}", msg),
		}
	}
}

impl std::error::Error for ExportError {}

impl From<JsValue> for ExportError {
	fn from(value: JsValue) -> Self {
		ExportError::Dom(format!("{:?}", value))
	}
}

/// Exports the scene in the given format.
///
/// Raster formats complete asynchronously; failures after this call returns
/// are logged rather than reported.
pub fn export(scene: &Scene, format: ExportFormat) -> Result<(), ExportError> {
	if !scene.is_drawable() {
		return Err(ExportError::NoSurface);
	}

	let svg = to_svg(scene);
	let name = file_name(format, js_sys::Date::now() as u64);

	match format {
		ExportFormat::Svg => download_svg(&svg, &name),
		ExportFormat::Png | ExportFormat::Jpeg => {
			rasterize(&svg, scene.width as u32, scene.height as u32, format, name)
		}
	}
}

fn document() -> Result<Document, ExportError> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Dom("no document".into()))
}

/// Clicks a temporary anchor pointing at `href`.
fn trigger_download(href: &str, name: &str) -> Result<(), ExportError> {
	let document = document()?;
	let body = document
		.body()
		.ok_or_else(|| ExportError::Dom("no body".into()))?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(JsValue::from)?;
	anchor.set_href(href);
	anchor.set_download(name);
	body.append_child(&anchor)?;
	anchor.click();
	body.remove_child(&anchor)?;
	info!("flow-field: exported {}", name);
	Ok(())
}

fn download_svg(svg: &str, name: &str) -> Result<(), ExportError> {
	let options = BlobPropertyBag::new();
	options.set_type(ExportFormat::Svg.mime());
	let parts = js_sys::Array::of1(&JsValue::from_str(svg));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;
	let result = trigger_download(&url, name);
	let _ = Url::revoke_object_url(&url);
	result
}

fn rasterize(
	svg: &str,
	width: u32,
	height: u32,
	format: ExportFormat,
	name: String,
) -> Result<(), ExportError> {
	let image = HtmlImageElement::new()?;

	let loaded = image.clone();
	let onload = Closure::once_into_js(move || {
		if let Err(e) = paint_and_download(&loaded, width, height, format, &name) {
			error!("flow-field: image export failed: {}", e);
		}
	});
	let onerror = Closure::once_into_js(move || {
		error!("flow-field: image export failed: {}", ExportError::ImageLoad);
	});

	image.set_onload(Some(onload.unchecked_ref()));
	image.set_onerror(Some(onerror.unchecked_ref()));
	let encoded = String::from(js_sys::encode_uri_component(svg));
	image.set_src(&format!("data:image/svg+xml;charset=utf-8,{}", encoded));
	Ok(())
}

fn paint_and_download(
	image: &HtmlImageElement,
	width: u32,
	height: u32,
	format: ExportFormat,
	name: &str,
) -> Result<(), ExportError> {
	let canvas: HtmlCanvasElement = document()?
		.create_element("canvas")?
		.dyn_into()
		.map_err(JsValue::from)?;
	canvas.set_width(width);
	canvas.set_height(height);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| ExportError::Dom("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| ExportError::Dom("unexpected context type".into()))?;
	ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
	ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;

	let data_url = canvas
		.to_data_url_with_type_and_encoder_options(format.mime(), &JsValue::from_f64(LOSSY_QUALITY))
		.map_err(|e| ExportError::Encode(format!("{:?}", e)))?;
	trigger_download(&data_url, name)
}
