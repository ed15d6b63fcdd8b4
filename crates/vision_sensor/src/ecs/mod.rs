//! Entity handles shared with the host world
//!
//! The sensor never owns entities. It only stores the opaque handles the
//! host's spatial index hands back.

pub mod entity;

pub use entity::Entity;
