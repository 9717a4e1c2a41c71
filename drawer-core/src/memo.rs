/// Caches one value keyed on its inputs and recomputes only when the key
/// changes.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                return value.clone();
            }
        }
        let value = compute(&key);
        self.computations += 1;
        self.entry = Some((key, value.clone()));
        value
    }

    /// Like [`Memo::get_or_compute`], but checks the cached key with
    /// `matches` and only builds an owned key on a miss.
    pub fn get_or_compute_by(
        &mut self,
        matches: impl FnOnce(&K) -> bool,
        key: impl FnOnce() -> K,
        compute: impl FnOnce(&K) -> V,
    ) -> V {
        if let Some((cached_key, value)) = &self.entry {
            if matches(cached_key) {
                return value.clone();
            }
        }
        let key = key();
        let value = compute(&key);
        self.computations += 1;
        self.entry = Some((key, value.clone()));
        value
    }

    /// Number of times the value has been (re)computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
