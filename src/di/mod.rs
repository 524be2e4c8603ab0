//! Explicit service registry.
//!
//! Design:
//! - `ServiceCollection` gathers descriptors at startup; `build_provider` freezes them.
//! - `ServiceProvider` resolves by type. Key = `type_name::<T>()`, value = `Arc<T>` stored
//!   as `Box<dyn Any + Send + Sync>` and downcast on read.
//! - Lifetimes are caching policy: singletons live in the root, scoped instances live in
//!   the scope that built them, transients are never cached.
//!
//! Notes:
//! - Several descriptors may exist for one type; resolution uses the last one.
//! - No lock is held while a factory runs, so factories can resolve their own dependencies.

mod collection;
mod provider;

pub use collection::ServiceCollection;
pub use provider::ServiceProvider;

use crate::error::BlogError;
use serde::{Deserialize, Serialize};
use std::{any::Any, fmt, sync::Arc};

/// How long a resolved instance is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLifetime {
    /// One instance for the whole provider tree.
    Singleton,
    /// One instance per scope.
    Scoped,
    /// A new instance on every resolution.
    Transient,
}

/// Stable type key, `type_name::<T>()`.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct TypeKey(&'static str);

impl TypeKey {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey(std::any::type_name::<T>())
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub(crate) type Boxed = Box<dyn Any + Send + Sync>;

pub(crate) type Factory =
    Arc<dyn Fn(&ServiceProvider) -> Result<Boxed, BlogError> + Send + Sync>;

/// A single registration: which type, how long it lives, and how to build it.
#[derive(Clone)]
pub struct ServiceDescriptor {
    type_key: TypeKey,
    lifetime: ServiceLifetime,
    factory: Factory,
}

impl ServiceDescriptor {
    /// Describe a service of type `T` built by `factory`.
    pub fn new<T, F>(lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BlogError> + Send + Sync + 'static,
    {
        Self {
            type_key: TypeKey::of::<T>(),
            lifetime,
            factory: Arc::new(move |sp: &ServiceProvider| {
                factory(sp).map(|svc| Box::new(svc) as Boxed)
            }),
        }
    }

    /// Describe a service backed by an already built instance. Always a singleton.
    pub fn instance<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self::new::<T, _>(ServiceLifetime::Singleton, move |_| Ok(value.clone()))
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("type_key", &self.type_key)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
