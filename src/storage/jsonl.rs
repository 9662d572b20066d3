//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};

/// Entity types stored per tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Roster,
    Assignment,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Roster => "roster.jsonl",
            EntityType::Assignment => "assignments.jsonl",
        }
    }
}

/// Get the path for a tournament's entity file.
pub fn entity_path(
    config: &StorageConfig,
    entity: EntityType,
    tournament_id: &str,
) -> Result<PathBuf, StorageError> {
    Ok(config.tournament_dir(tournament_id)?.join(entity.filename()))
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type and tournament.
    pub fn for_entity(
        config: &StorageConfig,
        entity: EntityType,
        tournament_id: &str,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(entity_path(config, entity, tournament_id)?))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type and tournament.
    pub fn for_entity(
        config: &StorageConfig,
        entity: EntityType,
        tournament_id: &str,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(entity_path(config, entity, tournament_id)?))
    }

    /// Read all entities from the file. A missing file reads as empty;
    /// malformed lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Read a JSON array or JSON Lines document from a string.
///
/// Used for CLI input files where either format is accepted.
pub fn parse_json_or_jsonl<T: DeserializeOwned>(contents: &str) -> Result<Vec<T>, StorageError> {
    let trimmed = contents.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut entities = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        entities.push(serde_json::from_str(line)?);
    }
    Ok(entities)
}
