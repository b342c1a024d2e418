//! Infrastructure Layer - Switchboard
//!
//! Everything that touches the outside world: configuration files and
//! environment, the adapters manifest, filesystem discovery, logging, the
//! dependency container and the resolver built on top of them.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `AppConfig`, Figment loader, manifest reader |
//! | [`discovery`] | Directory-convention scanner |
//! | [`container`] | Keyed singleton store with deferred slots and injection |
//! | [`resolver`] | `AdapterSession`: configure, resolve, cache |
//! | [`logging`] | tracing subscriber setup |
//! | [`error_ext`] | `ErrorContext` extension trait |
//! | [`constants`] | File names, env prefixes, logging defaults |

pub mod config;
pub mod constants;
pub mod container;
pub mod discovery;
pub mod error_ext;
pub mod logging;
pub mod resolver;

pub use config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig};
pub use container::{Container, ContainerKey, FromContainer};
pub use discovery::AdapterScanner;
pub use error_ext::ErrorContext;
pub use logging::init_logging;
pub use resolver::{AdapterSession, AdapterSessionBuilder, ResolvedInstance};
