//! Concrete repository implementations.

pub mod subscription;
