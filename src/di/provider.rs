use super::{Boxed, ServiceDescriptor, ServiceLifetime, TypeKey};
use crate::error::BlogError;
use parking_lot::RwLock;
use std::{cell::RefCell, collections::HashMap, sync::Arc};

/// Internal cache type: resolved instances keyed by service type.
type InstanceMap = HashMap<TypeKey, Boxed>;

thread_local! {
    /// Services whose factories are running on this thread, outermost first.
    static RESOLVING: RefCell<Vec<TypeKey>> = const { RefCell::new(Vec::new()) };
}

/// Marks `key` as in flight until dropped.
struct ResolveGuard;

impl ResolveGuard {
    fn enter(key: TypeKey) -> Result<Self, BlogError> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&key) {
                return Err(BlogError::CircularDependency(key.name()));
            }
            stack.push(key);
            Ok(ResolveGuard)
        })
    }
}

impl Drop for ResolveGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

struct Root {
    descriptors: HashMap<TypeKey, ServiceDescriptor>,
    singletons: RwLock<InstanceMap>,
    /// Scoped cache of the root provider itself.
    root_scope: Arc<RwLock<InstanceMap>>,
}

/// Resolves services registered in a [`ServiceCollection`](super::ServiceCollection).
///
/// The provider returned by `build_provider` is the root scope; `create_scope`
/// opens child scopes that share singletons but keep their own scoped instances.
pub struct ServiceProvider {
    root: Arc<Root>,
    scoped: Arc<RwLock<InstanceMap>>,
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        // later registrations overwrite earlier ones
        let descriptors = descriptors
            .into_iter()
            .map(|d| (d.type_key(), d))
            .collect();
        let root_scope = Arc::new(RwLock::new(HashMap::new()));
        Self {
            root: Arc::new(Root {
                descriptors,
                singletons: RwLock::new(HashMap::new()),
                root_scope: root_scope.clone(),
            }),
            scoped: root_scope,
        }
    }

    /// Open a child scope. Scoped services resolved from it are dropped with it.
    pub fn create_scope(&self) -> ServiceProvider {
        Self {
            root: self.root.clone(),
            scoped: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Resolve a service by type.
    pub fn get<T>(&self) -> Result<Arc<T>, BlogError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let descriptor = self
            .root
            .descriptors
            .get(&key)
            .ok_or(BlogError::ServiceNotRegistered(key.name()))?;
        let _guard = ResolveGuard::enter(key)?;

        match descriptor.lifetime() {
            ServiceLifetime::Transient => {
                let built = (descriptor.factory)(self)?;
                downcast::<T>(key, &built)
            }
            ServiceLifetime::Scoped => self.cached::<T>(&self.scoped, descriptor),
            ServiceLifetime::Singleton => {
                // singletons only ever see root-scoped dependencies
                let root = self.root_view();
                root.cached::<T>(&self.root.singletons, descriptor)
            }
        }
    }

    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.root.descriptors.contains_key(&TypeKey::of::<T>())
    }

    fn root_view(&self) -> ServiceProvider {
        Self {
            root: self.root.clone(),
            scoped: self.root.root_scope.clone(),
        }
    }

    fn cached<T>(
        &self,
        cache: &RwLock<InstanceMap>,
        descriptor: &ServiceDescriptor,
    ) -> Result<Arc<T>, BlogError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = descriptor.type_key();
        if let Some(existing) = cache.read().get(&key) {
            return downcast::<T>(key, existing);
        }

        // build without holding the lock; if another caller won the race keep theirs
        let built = (descriptor.factory)(self)?;
        let mut w = cache.write();
        let stored = w.entry(key).or_insert(built);
        downcast::<T>(key, stored)
    }
}

fn downcast<T>(key: TypeKey, boxed: &Boxed) -> Result<Arc<T>, BlogError>
where
    T: ?Sized + Send + Sync + 'static,
{
    boxed
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(BlogError::ServiceTypeMismatch(key.name()))
}
