//! Lifeline Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Lifeline
//! interpreter, layout engine and renderer:
//!
//! - **Identifiers**: Typed arena indices ([`identifier::ActorId`],
//!   [`identifier::ActivityId`], [`identifier::MessageId`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Semantic**: The validated diagram model ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
