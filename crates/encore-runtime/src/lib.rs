//! Encore runtime - wiring and storage layer.
//!
//! Assembles the policy engine and the grant lifecycle into a running
//! service: in-memory repositories, the system catalogue seeder, the
//! principal context resolver, and configuration loading.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  encore-types  : ID types, Principal, ErrorCode             │
//! │  encore-policy : Statement, Policy, Role, PolicyEvaluator   │
//! │  encore-event  : AffiliationEvent, EventHandler             │
//! │  encore-grant  : AffiliationGrant, GrantLifecycle           │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Runtime Layer (THIS CRATE)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  memory/    : in-memory repositories, grant unit of work    │
//! │  bootstrap/ : system policy and role seeding                │
//! │  resolver/  : PrincipalContext resolution                   │
//! │  config/    : TOML runtime configuration                    │
//! │  telemetry/ : tracing subscriber setup                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Typical Startup
//!
//! ```
//! use encore_runtime::{seed_system_catalogue, MemoryStores, PrincipalContextResolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stores = MemoryStores::new();
//! seed_system_catalogue(stores.policies.as_ref(), stores.roles.as_ref())?;
//!
//! let resolver = PrincipalContextResolver::new(
//!     stores.principals.clone(),
//!     stores.groups.clone(),
//!     stores.roles.clone(),
//!     stores.policies.clone(),
//! );
//! # let _ = resolver;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod memory;
pub mod resolver;
pub mod telemetry;

pub use bootstrap::{seed_system_catalogue, BootstrapError};
pub use config::{ConfigError, GrantConfig, RuntimeConfig};
pub use memory::{
    MemoryGrantStore, MemoryGroupStore, MemoryPolicyStore, MemoryPrincipalStore, MemoryRoleStore,
    MemoryStores, MemoryTalentStore,
};
pub use resolver::{PrincipalContextResolver, ResolveError};
pub use telemetry::init_tracing;
