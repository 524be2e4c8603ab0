use super::{ServiceDescriptor, ServiceLifetime, ServiceProvider, TypeKey};
use crate::error::BlogError;
use std::sync::Arc;
use tracing::debug;

/// Mutable list of service registrations, filled once at startup.
#[derive(Debug, Default, Clone)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor, even if the type is already registered.
    pub fn add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        debug!(
            service = descriptor.type_key().name(),
            lifetime = ?descriptor.lifetime(),
            "registering service"
        );
        self.descriptors.push(descriptor);
        self
    }

    /// Append a descriptor only if nothing is registered for its type yet.
    pub fn try_add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        if self.contains_key(descriptor.type_key()) {
            debug!(
                service = descriptor.type_key().name(),
                "service already registered; skipping"
            );
            return self;
        }
        self.add(descriptor)
    }

    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BlogError> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::new::<T, F>(ServiceLifetime::Singleton, factory))
    }

    pub fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BlogError> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::new::<T, F>(ServiceLifetime::Scoped, factory))
    }

    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BlogError> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::new::<T, F>(ServiceLifetime::Transient, factory))
    }

    /// Register a ready-made instance as a singleton.
    pub fn add_instance<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::instance(value))
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.contains_key(TypeKey::of::<T>())
    }

    /// Lifetime of the registration that would win at resolution time.
    pub fn lifetime_of<T: ?Sized + 'static>(&self) -> Option<ServiceLifetime> {
        let key = TypeKey::of::<T>();
        self.descriptors
            .iter()
            .rev()
            .find(|d| d.type_key() == key)
            .map(ServiceDescriptor::lifetime)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn build_provider(&self) -> ServiceProvider {
        ServiceProvider::new(self.descriptors.clone())
    }

    fn contains_key(&self, key: TypeKey) -> bool {
        self.descriptors.iter().any(|d| d.type_key() == key)
    }
}
