// Shared file handling for the JSON documents.
//
// Documents are plain JSON objects. Reading never fails hard: a missing file is
// an empty document, and a file that cannot be parsed is moved aside to
// `<name>.corrupt` so the next write does not silently destroy it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a JSON object from disk.
pub fn load_object(path: &Path) -> Map<String, Value> {
    if !path.exists() {
        return Map::new();
    }

    let parsed = File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|file| {
            serde_json::from_reader::<_, Value>(BufReader::new(file)).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(
                path = %path.display(),
                kind = json_kind(&other),
                "Expected a JSON object"
            );
            quarantine(path);
            Map::new()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read document");
            quarantine(path);
            Map::new()
        }
    }
}

/// Convert an object keyed by numeric ids into a typed map.
///
/// Keys are stored as strings on disk; anything that is not a non-zero id, or a
/// value that does not deserialize (including one that fails validation), is
/// skipped with a warning instead of poisoning the whole document.
pub fn typed_entries<V: DeserializeOwned>(
    path: &Path,
    object: Map<String, Value>,
) -> BTreeMap<u64, V> {
    let mut entries = BTreeMap::new();
    for (key, value) in object {
        let Some(id) = key.parse::<u64>().ok().filter(|id| *id != 0) else {
            tracing::warn!(
                path = %path.display(),
                key = %key,
                "Skipping entry with invalid id key"
            );
            continue;
        };
        match serde_json::from_value::<V>(value) {
            Ok(v) => {
                entries.insert(id, v);
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    id,
                    error = %e,
                    "Skipping invalid entry"
                );
            }
        }
    }
    entries
}

/// Overwrite the whole document via a sibling temp file renamed over the target.
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = sibling(path, "tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)
}

fn quarantine(path: &Path) {
    let target = sibling(path, "corrupt");
    if let Err(e) = std::fs::rename(path, &target) {
        tracing::error!(
            path = %path.display(),
            error = %e,
            "Failed to move unreadable document aside"
        );
    } else {
        tracing::warn!(
            from = %path.display(),
            to = %target.display(),
            "Moved unreadable document aside"
        );
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
