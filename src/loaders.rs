use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::vocab::WordIndex;

// File names the export pipeline writes into an artifact location.
pub(crate) const CONFIG_FILE: &str = "config.json";
pub(crate) const WEIGHTS_FILE: &str = "model.safetensors";
pub(crate) const WORD_INDEX_FILE: &str = "word_index.json";

/// Where the classifier and vocabulary artifacts live.
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    /// A directory holding `config.json`, `model.safetensors` and
    /// `word_index.json`.
    LocalDir(PathBuf),
    /// A Hugging Face Hub model repo holding the same three files.
    HfHub {
        /// Repo id, e.g. `"user/imdb-sentiment"`.
        repo: String,
    },
}

impl ArtifactSource {
    pub(crate) fn cache_key(&self) -> String {
        match self {
            ArtifactSource::LocalDir(dir) => format!("dir:{}", dir.display()),
            ArtifactSource::HfHub { repo } => format!("hub:{repo}"),
        }
    }

    /// Resolve one artifact file to a local path, downloading when remote.
    pub(crate) fn locate(&self, filename: &str) -> Result<PathBuf> {
        match self {
            ArtifactSource::LocalDir(dir) => {
                let path = dir.join(filename);
                if !path.is_file() {
                    return Err(PipelineError::Artifact(format!(
                        "missing artifact '{filename}' in '{}'",
                        dir.display()
                    )));
                }
                Ok(path)
            }
            ArtifactSource::HfHub { repo } => {
                let api = hf_hub::api::sync::Api::new()?;
                let repo =
                    api.repo(hf_hub::Repo::new(repo.clone(), hf_hub::RepoType::Model));
                repo.get(filename).map_err(|e| {
                    PipelineError::Download(format!("failed to fetch '{filename}': {e}"))
                })
            }
        }
    }
}

/// Shape parameters of the exported classifier, read from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Rows in the embedding table (reserved ids included).
    pub vocab_size: usize,
    /// Embedding width.
    pub embedding_dim: usize,
    /// Width of the hidden dense layer.
    pub hidden_dim: usize,
    /// Fixed input sequence length the model was exported with.
    #[serde(default = "default_max_len")]
    pub max_len: usize,
}

fn default_max_len() -> usize {
    236
}

pub(crate) struct ModelConfigLoader {
    source: ArtifactSource,
}

impl ModelConfigLoader {
    pub(crate) fn new(source: ArtifactSource) -> Self {
        Self { source }
    }

    pub(crate) fn load(&self) -> Result<ModelConfig> {
        let path = self.source.locate(CONFIG_FILE)?;
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            PipelineError::Artifact(format!(
                "failed to read model config '{}': {e}",
                path.display()
            ))
        })?;
        let config: ModelConfig = serde_json::from_str(&raw)?;

        if config.max_len == 0 {
            return Err(PipelineError::Artifact(
                "model config declares max_len 0".to_string(),
            ));
        }

        Ok(config)
    }
}

pub(crate) struct WordIndexLoader {
    source: ArtifactSource,
}

impl WordIndexLoader {
    pub(crate) fn new(source: ArtifactSource) -> Self {
        Self { source }
    }

    pub(crate) fn load(&self) -> Result<WordIndex> {
        let path = self.source.locate(WORD_INDEX_FILE)?;
        let word_index = WordIndex::from_file(&path)?;
        tracing::debug!(
            path = %path.display(),
            words = word_index.len(),
            "word index loaded"
        );
        Ok(word_index)
    }
}
