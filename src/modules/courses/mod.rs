//! The course catalog.
//!
//! Reads are open to every authenticated role but filtered by each course's
//! audience. A course outside the caller's audience is reported exactly like
//! a course that does not exist. Writes are reserved for catalog managers.

pub mod controller;
pub mod router;
pub mod service;

pub use router::init_courses_router;
