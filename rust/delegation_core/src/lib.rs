//! `delegation_core`: portable permission-inheritance and deletability engine.
//!
//! Takes the flat permission relations returned by an access-management
//! backend and derives a connection hierarchy, inheritance flags and
//! revocability verdicts. Pure computation: no I/O, WASM-safe.
//!
//! Modules:
//! - `types`:       relation model and derived verdict types
//! - `inheritance`: direct vs. inherited classification and its origin
//! - `connections`: flat relations folded into a party hierarchy
//! - `deletable`:   per package/role revocability
//! - `deletion`:    whole-relationship deletion level and audience
//! - `config`:      role-code vocabularies
//! - `payload`:     backend JSON decoding
//! - `error`:       crate error type

pub mod config;
pub mod connections;
pub mod deletable;
pub mod deletion;
pub mod error;
pub mod inheritance;
pub mod payload;
pub mod types;

pub use config::EngineConfig;
pub use connections::build_connections;
pub use deletable::get_deletable_status;
pub use deletion::{get_deletion_status, get_deletion_status_checked, non_deletable_reasons};
pub use error::{EngineError, Result};
pub use inheritance::{
    inheritance_origin, inheritance_origins, is_inherited, InheritanceOrigin, RIGHTHOLDER_ROLE_CODE,
};
