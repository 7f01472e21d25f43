pub mod attributes;
pub mod clamp;
pub mod error;
pub mod probability;
pub mod sampler;
