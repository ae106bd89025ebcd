// Domain layer - Core timeline and crop logic

pub mod errors;
pub mod keyframes;
pub mod model;
pub mod segments;
pub mod timeline;
