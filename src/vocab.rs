//! Vocabulary index loaded from `word_index.json`.
//!
//! The artifact is a flat JSON object mapping lowercase words to integer
//! ids, produced by the external training pipeline. Two ids are reserved by
//! that pipeline's convention: 0 marks padding positions and 1 marks
//! out-of-vocabulary tokens.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Reserved id for padding positions.
pub const PAD_ID: u32 = 0;

/// Reserved sentinel id for out-of-vocabulary tokens.
pub const OOV_ID: u32 = 1;

/// Immutable word → id mapping.
///
/// Loaded once at startup and read-only afterwards. Lookups are exact and
/// case-sensitive; keys are lowercase by construction of the artifact, and
/// [`crate::text::tokenize`] lowercases its input to match.
#[derive(Debug, Clone)]
pub struct WordIndex {
    index: HashMap<String, u32>,
}

impl WordIndex {
    /// Parse a word index from raw JSON.
    ///
    /// Entries mapped to id 0 are rejected: 0 is the padding fill value, and
    /// a word colliding with it would be indistinguishable from padding.
    /// Id 1 is allowed — the training export usually carries its OOV marker
    /// word as an ordinary entry with that id.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let index: HashMap<String, u32> = serde_json::from_str(raw)?;

        for (word, &id) in &index {
            if id == PAD_ID {
                return Err(PipelineError::Artifact(format!(
                    "word index entry '{word}' uses id 0, which is reserved for padding"
                )));
            }
        }

        Ok(Self { index })
    }

    /// Read and parse a word index file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Artifact(format!(
                "failed to read word index '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Number of words in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the index holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact lookup of one token.
    pub fn id(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Map tokens to ids, substituting [`OOV_ID`] for unknown tokens.
    ///
    /// Unknown tokens are expected input, not an error: the sentinel is what
    /// the model was trained to see for them.
    pub fn encode(&self, tokens: &[String]) -> Vec<u32> {
        tokens
            .iter()
            .map(|token| self.id(token).unwrap_or(OOV_ID))
            .collect()
    }
}
