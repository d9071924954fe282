//! Kintree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the kintree family
//! diagram pipeline. It includes:
//!
//! - **Colors**: CSS color handling and gradient shading ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Renderer-agnostic drawing primitives and the [`draw::Scene`]
//! - **Family**: The member record set, style settings and the
//!   [`family::FamilyData`] snapshot supplied by the surrounding application

pub mod color;
pub mod draw;
pub mod family;
pub mod geometry;
