//! Turns the kills of one player into highlights, recording segments and an
//! HLAE command script.
//!
//! Everything in here is synchronous and total: any input produces a result,
//! possibly an empty one.

pub mod highlights;
pub mod script;
pub mod segments;
