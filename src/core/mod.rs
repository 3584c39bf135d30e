// src/core/mod.rs

pub mod html;
pub mod normalize;
pub mod rating;
pub mod sanitize;

pub use rating::AgeBand;
