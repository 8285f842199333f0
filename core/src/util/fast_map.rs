pub type FastHashSet<K> = rustc_hash::FxHashSet<K>;
