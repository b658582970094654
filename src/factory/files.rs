use indexmap::IndexMap;
use serde_json::Value;

use super::FilesError;
use crate::upload::{FileTree, UploadStatus, UploadedFile};

const FIELDS: [&str; 5] = ["tmp_name", "size", "error", "name", "type"];

/// Raw uploaded files specification, as reported by the upload handler.
///
/// A file is described by a map of `tmp_name`, `size`, `error`, `name` and `type`. Multiple
/// files under one field are described by parallel maps, each indexed identically:
///
/// ```json
/// { "tmp_name": { "0": "/tmp/a", "1": "/tmp/b" }, "size": { "0": "1", "1": "2" }, ... }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FileSpec {
    /// Already built file.
    File(UploadedFile),
    Map(IndexMap<String, FileSpec>),
    Scalar(Value),
}

impl From<UploadedFile> for FileSpec {
    #[inline]
    fn from(value: UploadedFile) -> Self {
        Self::File(value)
    }
}

impl From<Value> for FileSpec {
    /// Objects and arrays become [`FileSpec::Map`], array indices are used as keys.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
            Value::Array(vec) => Self::Map(
                vec.into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.into()))
                    .collect(),
            ),
            value => Self::Scalar(value),
        }
    }
}

impl<K: Into<String>, V: Into<FileSpec>> FromIterator<(K, V)> for FileSpec {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Normalize files specification into [`FileTree`]s.
pub(crate) fn normalize(
    files: IndexMap<String, FileSpec>,
) -> Result<IndexMap<String, FileTree>, FilesError> {
    let mut result = IndexMap::with_capacity(files.len());
    for (key, spec) in files {
        let tree = match spec {
            FileSpec::File(file) => FileTree::File(file),
            FileSpec::Map(map) if map.contains_key("tmp_name") => from_spec(map)?,
            FileSpec::Map(map) => FileTree::Nested(normalize(map)?),
            FileSpec::Scalar(_) => return Err(FilesError::InvalidSpec),
        };
        result.insert(key, tree);
    }
    Ok(result)
}

fn from_spec(mut spec: IndexMap<String, FileSpec>) -> Result<FileTree, FilesError> {
    if matches!(spec.get("tmp_name"), Some(FileSpec::Map(_))) {
        return transpose(spec);
    }

    let mut field = |name: &str| match spec.swap_remove(name) {
        None | Some(FileSpec::Scalar(Value::Null)) => Ok(None),
        Some(FileSpec::Scalar(value)) => Ok(Some(value)),
        Some(_) => Err(FilesError::InvalidSpec),
    };

    let tmp_name = field("tmp_name")?.map(scalar_string).unwrap_or_default();
    let size = field("size")?.map(scalar_int).transpose()?.unwrap_or(0);
    let status = field("error")?.map(scalar_int).transpose()?.unwrap_or(0);
    let name = field("name")?.map(scalar_string);
    let media_type = field("type")?.map(scalar_string);

    let status = UploadStatus::from_code(status)?;
    let size = u64::try_from(size).map_err(|_| FilesError::InvalidSpec)?;
    Ok(FileTree::File(UploadedFile::new(tmp_name, size, status, name, media_type)))
}

/// Turn parallel field maps into one specification per key, recursively.
fn transpose(mut spec: IndexMap<String, FileSpec>) -> Result<FileTree, FilesError> {
    let Some(FileSpec::Map(tmp_names)) = spec.swap_remove("tmp_name") else {
        return Err(FilesError::InvalidSpec);
    };
    let keys: Vec<String> = tmp_names.keys().cloned().collect();

    let mut fields = Vec::with_capacity(FIELDS.len());
    fields.push(("tmp_name", tmp_names));
    for name in FIELDS.into_iter().skip(1) {
        match spec.swap_remove(name) {
            Some(FileSpec::Map(map))
                if map.len() == keys.len() && keys.iter().all(|key| map.contains_key(key)) =>
            {
                fields.push((name, map))
            }
            None => {}
            Some(_) => return Err(FilesError::ParallelKeys(name)),
        }
    }

    let mut result = IndexMap::with_capacity(keys.len());
    for key in keys {
        let mut nested = IndexMap::with_capacity(fields.len());
        for (name, map) in &mut fields {
            if let Some(value) = map.swap_remove(&key) {
                nested.insert((*name).to_owned(), value);
            }
        }
        result.insert(key, from_spec(nested)?);
    }
    Ok(FileTree::Nested(result))
}

fn scalar_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        value => value.to_string(),
    }
}

fn scalar_int(value: Value) -> Result<i64, FilesError> {
    match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or(FilesError::InvalidSpec)
}
