//! Structured and textual views of a handle

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use serde_json::ser::PrettyFormatter;

use crate::{Error, PathHandle, PathKind, Result};

/// Widest indent honoured by [`PathHandle::to_text`].
const MAX_INDENT: usize = 10;

/// Fixed-shape description of a handle.
///
/// `exists` and `type` are read from the filesystem when the record is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    pub path: String,
    pub exists: bool,
    #[serde(rename = "type")]
    pub kind: PathKind,
    pub root: String,
    pub name: String,
    pub fullname: String,
    pub ext: String,
}

impl PathHandle {
    pub fn to_structured(&self) -> PathRecord {
        let snapshot = self.snapshot();
        PathRecord {
            path: self.path().to_string_lossy().into_owned(),
            exists: snapshot.exists,
            kind: snapshot.kind,
            root: self.root().to_string_lossy().into_owned(),
            name: self.name().to_string(),
            fullname: self.fullname().to_string(),
            ext: self.ext().to_string(),
        }
    }

    /// Render the record as JSON.
    ///
    /// `fields` keeps only the named keys, written in the order they are
    /// listed. Unknown and repeated names are skipped. `indent`
    /// pretty-prints with that many spaces, capped at 10; `None` or `0`
    /// gives compact output.
    pub fn to_text(&self, fields: Option<&[&str]>, indent: Option<usize>) -> Result<String> {
        let mut value = serde_json::to_value(self.to_structured()).map_err(|e| self.json_error(e))?;

        if let (Some(fields), Value::Object(record)) = (fields, &mut value) {
            let mut picked = Map::new();
            // taking from the record drops later repeats of a name
            for &field in fields {
                if let Some(v) = record.remove(field) {
                    picked.insert(field.to_string(), v);
                }
            }
            value = Value::Object(picked);
        }

        match indent.map(|n| n.min(MAX_INDENT)) {
            None | Some(0) => serde_json::to_string(&value).map_err(|e| self.json_error(e)),
            Some(width) => {
                let pad = " ".repeat(width);
                let mut out = Vec::new();
                let mut ser = serde_json::Serializer::with_formatter(
                    &mut out,
                    PrettyFormatter::with_indent(pad.as_bytes()),
                );
                value.serialize(&mut ser).map_err(|e| self.json_error(e))?;
                String::from_utf8(out).map_err(|e| Error::Serialize {
                    path: self.path().to_path_buf(),
                    format: "JSON".into(),
                    message: e.to_string(),
                })
            }
        }
    }

    fn json_error(&self, e: serde_json::Error) -> Error {
        Error::Serialize {
            path: self.path().to_path_buf(),
            format: "JSON".into(),
            message: e.to_string(),
        }
    }
}

impl Serialize for PathHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_structured().serialize(serializer)
    }
}
