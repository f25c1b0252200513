use candle_core::Device;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{PipelineError, Result};
use crate::loaders::ArtifactSource;

/// Requested inference device, resolved at build time.
#[derive(Clone, Default)]
pub enum DeviceRequest {
    /// Plain CPU inference (default).
    #[default]
    Cpu,
    /// A specific CUDA GPU by index.
    Cuda(usize),
}

impl DeviceRequest {
    pub(crate) fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => {
                // Cache one Device per GPU so cached models and new
                // pipelines share a stream.
                static CUDA_DEVICE_CACHE: Lazy<Mutex<HashMap<usize, Device>>> =
                    Lazy::new(|| Mutex::new(HashMap::new()));

                let mut cache = CUDA_DEVICE_CACHE.lock().unwrap();
                if let Some(device) = cache.get(&i) {
                    return Ok(device.clone());
                }

                let device = Device::new_cuda(i).map_err(|e| {
                    PipelineError::Device(format!(
                        "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                    ))
                })?;
                cache.insert(i, device.clone());
                Ok(device)
            }
        }
    }
}

pub(crate) fn build_cache_key(source: &ArtifactSource, device: &Device) -> String {
    format!("{}-{:?}", source.cache_key(), device.location())
}
