use std::collections::HashMap;
use std::hash::Hash;

pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const DEFERRED_SOURCE_ATTRIBUTE: &str = "data-src";

#[derive(Debug)]
pub struct LazyImageLoader<K> {
    pending: HashMap<K, String>,
}

impl<K> Default for LazyImageLoader<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> LazyImageLoader<K> {
    pub fn register(&mut self, key: K, deferred_source: String) {
        self.pending.insert(key, deferred_source);
    }

    pub fn on_intersect(&mut self, key: &K, is_intersecting: bool) -> Option<String> {
        if !is_intersecting {
            return None;
        }
        self.pending.remove(key)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
