//! Model artifact format.
//!
//! The artifact is a bincode-encoded [`ArtifactPayload`]: four magic bytes,
//! a format version, model metadata, then the fitted parameters as plain
//! vectors. Loading rejects files without the magic prefix and payloads
//! written by an unsupported format version.
//!
//! One artifact exists per pipeline run; saving overwrites any previous file
//! at the same path.

use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{LogisticModel, ModelError, ModelMeta};

/// Magic bytes identifying a tabpipe model file.
pub const MAGIC: [u8; 4] = *b"TPML";

/// Current artifact format version.
pub const CURRENT_VERSION: u32 = 1;

/// Serialized form of a fitted model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactPayload {
    magic: [u8; 4],
    version: u32,
    meta: ModelMeta,
    weights: Vec<f32>,
    bias: f32,
    feature_means: Vec<f32>,
    feature_stds: Vec<f32>,
}

impl LogisticModel {
    /// Serialize the fitted model to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let (means, stds) = self.scaling();
        let payload = ArtifactPayload {
            magic: MAGIC,
            version: CURRENT_VERSION,
            meta: self.meta().clone(),
            weights: self.weights().to_vec(),
            bias: self.bias(),
            feature_means: means.to_vec(),
            feature_stds: stds.to_vec(),
        };
        Ok(bincode::serialize(&payload)?)
    }

    /// Deserialize a model from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(ModelError::BadMagic);
        }
        let payload: ArtifactPayload = bincode::deserialize(bytes)?;
        if payload.version != CURRENT_VERSION {
            return Err(ModelError::UnsupportedVersion(payload.version));
        }
        Ok(Self::from_parts(
            Array1::from(payload.weights),
            payload.bias,
            Array1::from(payload.feature_means),
            Array1::from(payload.feature_stds),
            payload.meta,
        ))
    }

    /// Write the artifact to `path`, creating parent directories and
    /// overwriting any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Load an artifact from `path`.
    ///
    /// A missing file maps to [`ModelError::ArtifactMissing`] so callers can
    /// distinguish "never trained" from a corrupt artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ModelError::ArtifactMissing {
                    path: path.to_path_buf(),
                }
            } else {
                ModelError::Io(err)
            }
        })?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainParams;
    use crate::testing::synthetic_binary;

    fn fitted_model() -> LogisticModel {
        let (x, y) = synthetic_binary(100, 3, 17);
        LogisticModel::train(x.view(), y.view(), &TrainParams::default())
            .unwrap()
            .with_feature_names(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn save_load_roundtrip() {
        let model = fitted_model();
        let path = std::env::temp_dir().join("tabpipe_artifact_roundtrip.bin");

        model.save(&path).unwrap();
        let loaded = LogisticModel::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(model.meta(), loaded.meta());
        assert_eq!(model.weights().to_vec(), loaded.weights().to_vec());
        assert_eq!(model.bias(), loaded.bias());

        let (x, _) = synthetic_binary(10, 3, 99);
        assert_eq!(
            model.predict_proba(x.view()).unwrap().to_vec(),
            loaded.predict_proba(x.view()).unwrap().to_vec()
        );
    }

    #[test]
    fn save_overwrites_previous_artifact() {
        let path = std::env::temp_dir().join("tabpipe_artifact_overwrite.bin");
        std::fs::write(&path, b"stale").unwrap();

        let model = fitted_model();
        model.save(&path).unwrap();
        let loaded = LogisticModel::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.n_features(), 3);
    }

    #[test]
    fn load_missing_artifact() {
        let path = std::env::temp_dir().join("tabpipe_artifact_never_written.bin");
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            LogisticModel::load(&path),
            Err(ModelError::ArtifactMissing { .. })
        ));
    }

    #[test]
    fn rejects_foreign_file() {
        assert!(matches!(
            LogisticModel::from_bytes(b"not a model at all"),
            Err(ModelError::BadMagic)
        ));
        assert!(matches!(
            LogisticModel::from_bytes(b"TP"),
            Err(ModelError::BadMagic)
        ));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = fitted_model().to_bytes().unwrap();
        // Version is the u32 immediately after the magic bytes.
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        assert!(matches!(
            LogisticModel::from_bytes(&bytes),
            Err(ModelError::UnsupportedVersion(99))
        ));
    }
}
