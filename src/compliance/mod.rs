//! Core compliance logic: the SBOM model, license facts and the pure services
//! that work on them. Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
