//! Spring-anchored particle field reacting to the pointer.
//!
//! A square grid of particles is laid out over the canvas. Each particle is
//! tied to its home position by a spring and is pulled towards (or pushed
//! away from) the pointer while it is within the effect radius. Optional
//! extras: square shapes with rotation, a glow tint near the pointer, a slow
//! hue cycle of the palette and export of the current frame.
//!
//! # Example
//!
//! ```ignore
//! let settings = RwSignal::new(Settings::default());
//! let (export_request, request_export) = signal(None::<ExportFormat>);
//!
//! view! { <FlowFieldCanvas settings=settings export_request=export_request /> }
//! ```

mod ambient;
mod component;
pub mod export;
mod particles;
mod physics;
mod render;
mod scene;
mod state;
mod svg;
pub mod theme;
mod types;

pub use component::FlowFieldCanvas;
pub use export::ExportFormat;
pub use theme::{Color, Theme};
pub use types::{InteractionMode, Settings, ShapeType, SliderRange};
