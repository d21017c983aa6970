use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

pub trait CacheKey: Hash + Eq + Clone + Debug {}
impl<T> CacheKey for T where T: Hash + Eq + Clone + Debug {}

/// A generic read-through cache for a hashmap-backed data structure
#[derive(Debug)]
pub struct CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Debug,
{
    map: FxHashMap<K, Arc<V>>,
    metadata: Meta,
}

impl<K, V, Meta> Default for CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Default + Debug,
{
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            metadata: Meta::default(),
        }
    }
}

/// Derives the value, [`V`], of a cache entry from its key, [`K`],
/// given some calculation context, [`Ctx`].
///
/// ### Examples
///
/// The [`BundleCache`] is calculable from a [`BundleContext`], deriving
/// a routing bundle for each shape (or mode set) key.
pub trait Calculable<Ctx, K: CacheKey, V> {
    /// The concrete implementation of the function which derives the
    /// value, [`V`], from the key, [`K`].
    fn calculate(&mut self, ctx: &Ctx, key: &K) -> V;
}

impl<K, V, Meta> CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Debug,
{
    /// Exposes a query call for the cache map, allowing the caller
    /// to use the cache in its intended read-through pattern design.
    ///
    /// ### Behaviour
    ///
    /// The value is calculated on the first query of a key only, every
    /// later query of that key returns the same reference-counted value.
    pub fn query<Ctx>(&mut self, ctx: &Ctx, key: K) -> Arc<V>
    where
        Self: Calculable<Ctx, K, V>,
    {
        if let Some(value) = self.map.get(&key) {
            return Arc::clone(value);
        }

        let calculated = Arc::new(self.calculate(ctx, &key));
        self.map.insert(key, Arc::clone(&calculated));

        calculated
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&Arc<V>> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn metadata(&self) -> &Meta {
        &self.metadata
    }
}

mod bundle {
    use super::*;
    use crate::config::MappingConfig;
    use crate::network::Network;
    use crate::route::RouterBundle;
    use crate::schedule::RouteShape;

    use measure_time::debug_time;
    use std::collections::BTreeSet;

    /// Everything a [`RouterBundle`] is derived from, besides its key.
    #[derive(Debug, Clone, Copy)]
    pub struct BundleContext<'a> {
        /// The full, unfiltered network.
        pub network: &'a Network,
        pub config: &'a MappingConfig,

        /// Network modes the bundle may route over.
        pub modes: &'a BTreeSet<String>,

        /// The shape to clip around and bias towards, if any.
        pub shape: Option<&'a Arc<RouteShape>>,
    }

    #[derive(Debug, Default)]
    pub struct BuildStats {
        /// The number of bundles constructed by the cache.
        pub builds: usize,
    }

    /// Routing bundles, built once per key and shared thereafter.
    pub type BundleCache<K> = CacheMap<K, RouterBundle, BuildStats>;

    impl<'a, K: CacheKey> Calculable<BundleContext<'a>, K, RouterBundle> for BundleCache<K> {
        fn calculate(&mut self, ctx: &BundleContext<'a>, key: &K) -> RouterBundle {
            debug_time!("bundle construction for {:?}", key);
            self.metadata.builds += 1;

            RouterBundle::build(ctx.network, ctx.modes, ctx.shape, ctx.config)
        }
    }
}

pub use bundle::{BuildStats, BundleCache, BundleContext};
