//! Sketchflow Core Types and Definitions
//!
//! This crate provides the pure, UI-independent building blocks of the
//! Sketchflow diagram engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Path data**: SVG path commands shared by outlines and edges ([`path`] module)
//! - **Shapes**: The shape geometry renderer ([`shape`] module)
//! - **Edge paths**: The edge routing engine ([`edge_path`] module)
//! - **Draw**: Strokes, markers, text measurement and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod edge_path;
pub mod geometry;
pub mod identifier;
pub mod path;
pub mod shape;
