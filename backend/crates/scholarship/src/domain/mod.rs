//! Domain Layer
//!
//! Resource documents, value objects, collaborator traits and the little
//! arithmetic the routes need.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
