use super::{FlowGraph, FlowGraphBuilder, GraphOptions};
use crate::error::ArtifactError;
use crate::funnel::StageSet;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

const ARTIFACT_VERSION: u32 = 1;

/// A saved graph build: the stages and options it was built from.
///
/// The builder is deterministic, so the inputs are the artifact; [`GraphArtifact::graph`]
/// reproduces the exact graph that was on screen when the artifact was saved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphArtifact {
    pub version: u32,
    pub stages: StageSet,
    pub options: GraphOptions,
}

impl GraphArtifact {
    pub fn new(stages: StageSet, options: GraphOptions) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            stages,
            options,
        }
    }

    /// Captures the inputs of a configured builder.
    pub fn from_builder(builder: &FlowGraphBuilder<'_>) -> Self {
        Self::new(builder.stages().clone(), builder.options().clone())
    }

    /// Rebuilds the graph.
    pub fn graph(&self) -> FlowGraph {
        FlowGraph::builder(Some(&self.stages))
            .with_options(self.options.clone())
            .build()
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|source| ArtifactError::Io {
            path: path.to_string(),
            source,
        })?;
        file.write_all(&bytes).map_err(|source| ArtifactError::Io {
            path: path.to_string(),
            source,
        })?;
        debug!("Wrote {} byte graph artifact to '{}'", bytes.len(), path);
        Ok(())
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| ArtifactError::Io {
                path: path.to_string(),
                source,
            })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    /// Deserializes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: Self = decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns (data, bytes_read)
            .map_err(|e| ArtifactError::Decode(e.to_string()))?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(ArtifactError::Decode(format!(
                "unsupported artifact version {}",
                artifact.version
            )));
        }
        Ok(artifact)
    }
}
