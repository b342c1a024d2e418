//! Dependency Container
//!
//! Keyed singleton store. A slot holds a ready value, an uninitialized
//! placeholder, or a deferred value produced by a future.
//!
//! ```ignore
//! let container = Container::new();
//! container.register(Arc::new(ConfigAdapter::default()));
//!
//! // Parameters are supplied from type-keyed entries
//! let version = container.inject(|(config,): (Arc<ConfigAdapter>,)| {
//!     config.framework_version().to_string()
//! })?;
//! ```

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use switchboard_domain::error::{Error, Result};

type SharedValue = Arc<dyn Any + Send + Sync>;
type DeferredValue = Shared<BoxFuture<'static, std::result::Result<SharedValue, Arc<Error>>>>;

/// Container key: a type or an identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKey {
    /// Keyed by type
    Type(TypeId, &'static str),
    /// Keyed by identifier (module paths for adapter singletons)
    Named(String),
}

impl ContainerKey {
    /// Key for a type
    pub fn of<T: 'static>() -> Self {
        Self::Type(TypeId::of::<T>(), type_name::<T>())
    }

    /// Key for an identifier
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(_, name) => write!(f, "{}", name),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for ContainerKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ContainerKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

#[derive(Clone)]
enum Slot {
    Placeholder,
    Ready(SharedValue),
    Deferred(DeferredValue),
}

/// Keyed singleton store
#[derive(Default)]
pub struct Container {
    slots: DashMap<ContainerKey, Slot>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide container
    pub fn global() -> Arc<Container> {
        static GLOBAL: OnceLock<Arc<Container>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Container::new())))
    }

    /// Store or overwrite a ready value
    pub fn set<K, T>(&self, key: K, value: T)
    where
        K: Into<ContainerKey>,
        T: Send + Sync + 'static,
    {
        self.slots.insert(key.into(), Slot::Ready(Arc::new(value)));
    }

    /// Store the uninitialized marker
    pub fn set_placeholder<K: Into<ContainerKey>>(&self, key: K) {
        self.slots.insert(key.into(), Slot::Placeholder);
    }

    /// Store a value produced later by a future
    ///
    /// The future runs once, on the first [`get_async`](Self::get_async).
    pub fn set_deferred<K, T, F>(&self, key: K, future: F)
    where
        K: Into<ContainerKey>,
        T: Send + Sync + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let deferred = future
            .map(|result| {
                result
                    .map(|value| Arc::new(value) as SharedValue)
                    .map_err(Arc::new)
            })
            .boxed()
            .shared();
        self.slots.insert(key.into(), Slot::Deferred(deferred));
    }

    /// Store an `Arc<T>` under its type key
    pub fn register<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.set(ContainerKey::of::<T>(), value);
    }

    /// `Arc<T>` stored under its type key
    pub fn resolve_type<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.get::<Arc<T>, _>(ContainerKey::of::<T>())
    }

    /// Stored value
    ///
    /// Fails with [`Error::AsyncValueRequested`] when the slot is deferred and
    /// with [`Error::DependencyMissing`] when it is absent or a placeholder.
    pub fn get<T, K>(&self, key: K) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        K: Into<ContainerKey>,
    {
        let key = key.into();
        let slot = self.slots.get(&key).map(|slot| slot.value().clone());
        match slot {
            Some(Slot::Ready(value)) => downcast::<T>(&key, &value),
            Some(Slot::Deferred(_)) => Err(Error::AsyncValueRequested {
                key: key.to_string(),
            }),
            Some(Slot::Placeholder) | None => Err(Error::DependencyMissing {
                key: key.to_string(),
            }),
        }
    }

    /// Stored value, awaiting a deferred slot
    ///
    /// A resolved deferred slot is replaced by its ready value.
    pub async fn get_async<T, K>(&self, key: K) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        K: Into<ContainerKey>,
    {
        let key = key.into();
        // Clone out of the map so no shard guard is held across the await
        let slot = self.slots.get(&key).map(|slot| slot.value().clone());
        match slot {
            Some(Slot::Deferred(deferred)) => {
                let value = deferred
                    .await
                    .map_err(|e| Error::internal(format!("Deferred value '{}' failed: {}", key, e)))?;
                self.slots.insert(key.clone(), Slot::Ready(Arc::clone(&value)));
                downcast::<T>(&key, &value)
            }
            _ => self.get(key),
        }
    }

    /// Ready value of type `T`, if present
    pub fn try_get<T, K>(&self, key: K) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
        K: Into<ContainerKey>,
    {
        match self.slots.get(&key.into())?.value() {
            Slot::Ready(value) => value.downcast_ref::<T>().cloned(),
            _ => None,
        }
    }

    /// Ready value, constructing and storing it when absent or a placeholder
    ///
    /// `f` runs while the key's shard is locked and must not touch the
    /// container.
    pub fn get_or_insert_with<T, K, F>(&self, key: K, f: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        K: Into<ContainerKey>,
        F: FnOnce() -> Result<T>,
    {
        let key = key.into();
        match self.slots.entry(key.clone()) {
            Entry::Occupied(mut occupied) => match occupied.get() {
                Slot::Ready(value) => downcast::<T>(&key, value),
                Slot::Deferred(_) => Err(Error::AsyncValueRequested {
                    key: key.to_string(),
                }),
                Slot::Placeholder => {
                    let value = f()?;
                    occupied.insert(Slot::Ready(Arc::new(value.clone())));
                    Ok(value)
                }
            },
            Entry::Vacant(vacant) => {
                let value = f()?;
                vacant.insert(Slot::Ready(Arc::new(value.clone())));
                Ok(value)
            }
        }
    }

    /// Whether a key holds any slot
    pub fn contains<K: Into<ContainerKey>>(&self, key: K) -> bool {
        self.slots.contains_key(&key.into())
    }

    /// Whether a key holds the uninitialized marker
    pub fn is_placeholder<K: Into<ContainerKey>>(&self, key: K) -> bool {
        self.slots
            .get(&key.into())
            .is_some_and(|slot| matches!(slot.value(), Slot::Placeholder))
    }

    /// Remove a slot
    pub fn remove<K: Into<ContainerKey>>(&self, key: K) -> bool {
        self.slots.remove(&key.into()).is_some()
    }

    /// Remove every slot
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the container is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Call `f` with its parameters supplied from type-keyed entries
    pub fn inject<A, R, F>(&self, f: F) -> Result<R>
    where
        A: FromContainer,
        F: FnOnce(A) -> R,
    {
        Ok(f(A::from_container(self)?))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.slots.iter().map(|slot| slot.key().to_string()).collect();
        f.debug_struct("Container").field("keys", &keys).finish()
    }
}

fn downcast<T: Clone + 'static>(key: &ContainerKey, value: &SharedValue) -> Result<T> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| Error::ContainerTypeMismatch {
            key: key.to_string(),
            expected: type_name::<T>(),
        })
}

/// Parameters an injected callable can receive
pub trait FromContainer: Sized {
    /// Pull the parameters out of the container
    fn from_container(container: &Container) -> Result<Self>;
}

impl<T: Send + Sync + 'static> FromContainer for Arc<T> {
    fn from_container(container: &Container) -> Result<Self> {
        container.resolve_type::<T>().map_err(|e| match e {
            Error::ContainerTypeMismatch { key, .. } => Error::DependencyMissing { key },
            other => other,
        })
    }
}

macro_rules! impl_from_container_tuple {
    ($($name:ident),+) => {
        impl<$($name: FromContainer),+> FromContainer for ($($name,)+) {
            fn from_container(container: &Container) -> Result<Self> {
                Ok(($($name::from_container(container)?,)+))
            }
        }
    };
}

impl_from_container_tuple!(A);
impl_from_container_tuple!(A, B);
impl_from_container_tuple!(A, B, C);
impl_from_container_tuple!(A, B, C, D);
