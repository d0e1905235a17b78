//! Drawing vocabulary for resolved decks.
//!
//! Closed enumerations for every category the resolver decides on, with the
//! name tables that map draw.io style tokens onto them and the SVG primitives
//! used to render each category.
//!
//! - [`ShapeKind`] - shape outline category
//! - [`DockingSite`] - one of the four connection sites of a shape
//! - [`Routing`] - connector path category
//! - [`ArrowHead`] - arrowhead category and size bucket
//! - [`StrokeDefinition`] and [`DashStyle`] - line appearance

mod arrow;
mod routing;
mod shape;
mod site;
mod stroke;

pub use arrow::{ArrowHead, ArrowKind, ArrowSize};
pub use routing::Routing;
pub use shape::ShapeKind;
pub use site::DockingSite;
pub use stroke::{DashStyle, StrokeDefinition};
