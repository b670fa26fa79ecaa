//! Credential resolver adapters.
//!
//! - `EnvCredentialResolver` - reads the environment on every resolution
//! - `StaticCredentialResolver` - serves a configuration loaded at startup

mod env_resolver;
mod static_resolver;

pub use env_resolver::EnvCredentialResolver;
pub use static_resolver::StaticCredentialResolver;
