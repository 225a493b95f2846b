//! Inputs from the host: table resources and language collaborators.

pub mod language;
pub mod resource;
