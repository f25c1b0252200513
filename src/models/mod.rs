// ============ Model implementations ============

pub(crate) mod pooled_classifier;

pub use pooled_classifier::PooledEmbeddingClassifier;
