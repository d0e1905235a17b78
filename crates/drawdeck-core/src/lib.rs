//! drawdeck Core Types and Definitions
//!
//! This crate provides the foundational types shared by the drawdeck
//! parser, resolver and exporters:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Styles**: draw.io style declaration parsing ([`style::Style`])
//! - **Text**: Rich text segmentation into styled runs ([`text`] module)
//! - **Draw**: Shape, connector and arrowhead categories ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod style;
pub mod text;
