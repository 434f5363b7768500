// Adapters layer: concrete implementations of the domain ports.

pub mod storyblok;
pub mod views;
