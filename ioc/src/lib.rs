//! # Fibre Container
//!
//! An Inversion of Control (IoC) container with named and type-keyed
//! bindings, parameter injection, swaps and lifecycle hooks.
//!
//! The container is an explicit context object: create one during
//! application bootstrap, bind into it, and pass it to whatever needs
//! resolution. There is no global instance.
//!
//! ## Core Concepts
//!
//! - **Binding**: a key (a string or a type) associated with a [`Value`]:
//!   an object, a class, or nothing.
//! - **Type registry**: Rust has no runtime subclass relation, so is-a
//!   relations between types are declared on the container's
//!   [`TypeRegistry`] and every type-based lookup consults it.
//! - **Resolution**: targets declare their [`Parameter`]s. Annotated
//!   parameters are matched against bindings by type, plain ones by name.
//! - **Swaps**: per-annotation overrides consulted before any binding.
//! - **Hooks**: listeners fired on bind, make and resolve.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_container::{Container, Injectable, Search, Value};
//! use std::sync::Arc;
//!
//! trait Cache: Send + Sync {
//!     fn driver(&self) -> &'static str;
//! }
//!
//! struct DiskCache;
//! impl Cache for DiskCache {
//!     fn driver(&self) -> &'static str {
//!         "disk"
//!     }
//! }
//!
//! fn main() -> fibre_container::Result<()> {
//!     let mut container = Container::builder()
//!         .types(|types| {
//!             types.implements::<DiskCache, dyn Cache, _>(|cache| cache as Arc<dyn Cache>);
//!         })
//!         .build();
//!
//!     container
//!         .bind("Cache", Value::instance(DiskCache))?
//!         .bind("SentryExceptionHook", Value::Empty)?;
//!
//!     // Inject by annotation.
//!     let report = Injectable::new(|args| Ok(args.interface::<dyn Cache>(0)?.driver()))
//!         .typed::<dyn Cache>("cache");
//!     assert_eq!(container.resolve(&report)?, "disk");
//!
//!     // Bulk lookup by wildcard.
//!     assert_eq!(container.collect(Search::from("*ExceptionHook"))?.len(), 1);
//!     Ok(())
//! }
//! ```

mod config;
mod container;
mod core;
mod error;
mod hooks;
mod macros;
mod provider;
mod resolve;
mod search;
mod swap;
mod types;

pub use config::{ContainerBuilder, ContainerConfig, HookDispatch};
pub use container::Container;
pub use crate::core::{Instance, Key, TypeTag, Value};
pub use error::{BoxError, Error, Result};
pub use hooks::{Listener, Phase};
pub use provider::ServiceProvider;
pub use resolve::{Arguments, Injectable, Parameter, Resolvable};
pub use search::Search;
pub use swap::{Swap, SwapFactory};
pub use types::TypeRegistry;
