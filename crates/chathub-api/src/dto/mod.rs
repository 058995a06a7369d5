//! Data transfer objects for the REST surface.

pub mod response;
