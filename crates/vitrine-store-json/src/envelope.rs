//! On-disk envelope handling for collection files.
//!
//! Every file persists as `{"version": N, "<collection>": ...}` where the
//! payload is an array for collections and an object for singletons. The
//! version stamp starts at 0 for an absent file and increments by exactly one
//! on every successful write; writers verify it immediately before renaming
//! the replacement file into place.

use std::{
  fs,
  io::{self, Write as _},
  path::Path,
};

use serde_json::{Map, Value};
use vitrine_core::{Error as CoreError, document::Document};

use crate::Result;

/// Read `path`, returning the version stamp and the payload stored under
/// `key`.
///
/// An absent file reads as version 0 with no payload. A present file with a
/// missing version stamp also reads as version 0 rather than failing, so
/// hand-seeded files without a stamp import cleanly.
pub(crate) fn read(path: &Path, key: &str) -> Result<(u64, Option<Value>)> {
  let bytes = match fs::read(path) {
    Ok(bytes) => bytes,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok((0, None)),
    Err(err) => return Err(err.into()),
  };
  let mut envelope: Map<String, Value> = serde_json::from_slice(&bytes)?;
  let version = envelope.get("version").and_then(Value::as_u64).unwrap_or(0);
  Ok((version, envelope.remove(key)))
}

/// Atomically replace `path` with a new envelope at `expected_version + 1`.
///
/// The bytes land in a sibling `.tmp` file which is fsynced and renamed over
/// the target, so a crash at any point leaves the previous file intact. The
/// on-disk version is re-read immediately before the rename; if an external
/// writer bumped it since the caller's read, the write fails with
/// [`CoreError::StaleWrite`] and the external writer's file survives.
pub(crate) fn write(
  path: &Path,
  key: &'static str,
  expected_version: u64,
  payload: Value,
) -> Result<()> {
  let (found, _) = read(path, key)?;
  if found != expected_version {
    return Err(
      CoreError::StaleWrite {
        collection: key,
        expected: expected_version,
        found,
      }
      .into(),
    );
  }

  let mut envelope = Map::new();
  envelope.insert("version".to_string(), Value::from(expected_version + 1));
  envelope.insert(key.to_string(), payload);

  let mut bytes = serde_json::to_vec_pretty(&Value::Object(envelope))?;
  bytes.push(b'\n');

  let tmp = path.with_extension("json.tmp");
  let mut file = fs::File::create(&tmp)?;
  file.write_all(&bytes)?;
  file.sync_all()?;
  fs::rename(&tmp, path)?;
  Ok(())
}

/// Decode a collection payload. No payload means an empty collection.
pub(crate) fn decode_items<T: Document>(
  payload: Option<Value>,
) -> Result<Vec<T>> {
  match payload {
    Some(value) => Ok(serde_json::from_value(value)?),
    None => Ok(Vec::new()),
  }
}

/// Encode a collection payload.
pub(crate) fn encode_items<T: Document>(items: &[T]) -> Result<Value> {
  Ok(serde_json::to_value(items)?)
}
