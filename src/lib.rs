//! Movie-review sentiment inference on [Candle](https://github.com/huggingface/candle).
//!
//! Loads a pre-trained binary classifier and its vocabulary, converts free
//! text into the fixed-length integer sequences the model was trained on,
//! and runs a single forward pass to produce a Positive/Negative label with
//! a confidence percentage. Training and export happen elsewhere; this
//! crate's only contract with them is two artifact files — `config.json` +
//! `model.safetensors` for the classifier and `word_index.json` for the
//! vocabulary.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod error;
pub mod sequence;
pub mod text;
pub mod vocab;

pub use pipelines::sentiment;
