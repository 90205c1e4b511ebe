//! Plenum Core Types and Definitions
//!
//! This crate provides the foundational types for Plenum schematic drawings.
//! It includes:
//!
//! - **Identifiers**: Stable object ids ([`identifier::ObjectId`])
//! - **Geometry**: Points, sizes, frames and directions ([`geometry`] module)
//! - **Objects**: The shape / connector / line object model and its hooks
//!   ([`object`] module)
//! - **Polylines**: Wall outlines and their corner / split edits
//!   ([`polyline`] module)

pub mod error;
pub mod geometry;
pub mod identifier;
pub mod object;
pub mod polyline;
