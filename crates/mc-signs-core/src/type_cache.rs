//! Block entity type registry lookups.
//!
//! Since 1.18 chunk and tile packets identify block entities by registry
//! id. Resolving an id goes through the server registry, so resolved keys
//! are cached.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The server's block entity type registry.
pub trait BlockEntityTypes: Send + Sync {
    fn key_of(&self, id: i32) -> Option<String>;
    fn id_of(&self, key: &str) -> Option<i32>;
}

/// Registry key of sign block entities on 1.18+.
pub const SIGN_KEY: &str = "minecraft:sign";

/// Read-through cache of registry id -> namespaced key.
///
/// Concurrent misses on the same id may both hit the registry; the last
/// insert wins, and both resolve to the same key.
pub struct TypeCache {
    registry: Arc<dyn BlockEntityTypes>,
    keys: RwLock<HashMap<i32, Option<String>>>,
}

impl TypeCache {
    pub fn new(registry: Arc<dyn BlockEntityTypes>) -> Self {
        Self {
            registry,
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Namespaced key for a registry id, or `None` if unregistered.
    pub fn key_of(&self, id: i32) -> Option<String> {
        if let Ok(keys) = self.keys.read() {
            if let Some(key) = keys.get(&id) {
                return key.clone();
            }
        }

        let resolved = self.registry.key_of(id).map(|k| namespaced(&k));
        if let Ok(mut keys) = self.keys.write() {
            keys.insert(id, resolved.clone());
        }
        resolved
    }

    pub fn is_sign(&self, id: i32) -> bool {
        self.key_of(id).as_deref() == Some(SIGN_KEY)
    }

    /// Registry id of signs, for building synthetic packets.
    pub fn sign_id(&self) -> Option<i32> {
        self.registry.id_of(SIGN_KEY)
    }
}

fn namespaced(key: &str) -> String {
    if key.contains(':') {
        key.to_string()
    } else {
        format!("minecraft:{key}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Registry with a fixed id table that counts `key_of` calls.
    pub(crate) struct FixedRegistry {
        pub(crate) entries: Vec<(i32, &'static str)>,
        pub(crate) lookups: AtomicUsize,
    }

    impl FixedRegistry {
        pub(crate) fn vanilla() -> Self {
            Self {
                entries: vec![(0, "minecraft:furnace"), (7, "minecraft:sign"), (8, "hanging_sign")],
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl BlockEntityTypes for FixedRegistry {
        fn key_of(&self, id: i32) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.entries
                .iter()
                .find(|(i, _)| *i == id)
                .map(|(_, k)| k.to_string())
        }

        fn id_of(&self, key: &str) -> Option<i32> {
            self.entries
                .iter()
                .find(|(_, k)| namespaced(k) == key)
                .map(|(i, _)| *i)
        }
    }

    #[test]
    fn resolves_once_per_id() {
        let registry = Arc::new(FixedRegistry::vanilla());
        let cache = TypeCache::new(registry.clone());

        assert!(cache.is_sign(7));
        assert!(cache.is_sign(7));
        assert!(!cache.is_sign(0));
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn caches_unregistered_ids() {
        let registry = Arc::new(FixedRegistry::vanilla());
        let cache = TypeCache::new(registry.clone());

        assert_eq!(cache.key_of(99), None);
        assert_eq!(cache.key_of(99), None);
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bare_keys_are_namespaced() {
        let cache = TypeCache::new(Arc::new(FixedRegistry::vanilla()));
        assert_eq!(cache.key_of(8).as_deref(), Some("minecraft:hanging_sign"));
        assert_eq!(cache.sign_id(), Some(7));
    }

    #[test]
    fn concurrent_population() {
        let registry = Arc::new(FixedRegistry::vanilla());
        let cache = Arc::new(TypeCache::new(registry));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.is_sign(7))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.key_of(7).as_deref(), Some(SIGN_KEY));
    }
}
