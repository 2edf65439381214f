//! The persisted design and the collaborator boundary for storing it.
//!
//! Loading is deliberately forgiving: rows written by older versions nest the design under a
//! `data` field (sometimes as a JSON string), spell ids and names differently, or carry only
//! keyframes. Anything unreadable degrades to an empty scene with a warning.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::animation::migrate::steps_or_migrate;
use crate::animation::step::Step;
use crate::animation::track::Track;
use crate::foundation::error::{BoardError, BoardResult};
use crate::pitch::layout::DEFAULT_PITCH_ID;
use crate::scene::item::Item;

/// Name given to designs that have none.
pub const UNTITLED: &str = "Untitled Session";

/// Outbound save payload; also accepted on load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub id: String,
    pub name: String,
    pub pitch: String,
    pub items: Vec<Item>,
    /// Compiled tracks, included for consumers that do not compile steps themselves.
    pub keyframes_by_id: BTreeMap<String, Track>,
    pub timeline: f64,
    pub steps: Vec<Step>,
    pub notes: String,
}

/// A design as loaded, before it is handed to a [`Designer`](crate::Designer).
#[derive(Clone, Debug, PartialEq)]
pub struct Design {
    pub id: String,
    pub name: String,
    pub pitch_id: String,
    pub items: Vec<Item>,
    pub steps: Vec<Step>,
    /// Legacy tracks as stored; only consulted when `steps` is empty.
    pub tracks: BTreeMap<String, Track>,
    pub timeline: f64,
    pub notes: String,
}

impl Design {
    /// Empty design with a fresh id.
    pub fn empty() -> Self {
        Self {
            id: new_id(),
            name: UNTITLED.to_owned(),
            pitch_id: DEFAULT_PITCH_ID.to_owned(),
            items: Vec::new(),
            steps: Vec::new(),
            tracks: BTreeMap::new(),
            timeline: 0.0,
            notes: String::new(),
        }
    }

    /// Parse a stored row. Never fails; malformed input yields an empty design.
    pub fn from_json_str(s: &str) -> Self {
        match serde_json::from_str::<Value>(s) {
            Ok(v) => Self::from_value(&v),
            Err(e) => {
                tracing::warn!(error = %e, "unparsable design payload; starting from an empty scene");
                Self::empty()
            }
        }
    }

    /// Normalise a stored row of any supported shape.
    pub fn from_value(raw: &Value) -> Self {
        let mut raw = raw.clone();
        inline_string_data(&mut raw);
        let Some(row) = raw.as_object() else {
            tracing::warn!("design payload is not an object; starting from an empty scene");
            return Self::empty();
        };
        let data = nested_data(row);
        let field = |key: &str| data.and_then(|d| d.get(key)).or_else(|| row.get(key));

        let id = ["id", "uuid", "_id"]
            .iter()
            .find_map(|k| row.get(*k).and_then(non_empty_str))
            .map_or_else(new_id, str::to_owned);
        let name = ["name", "title"]
            .iter()
            .find_map(|k| row.get(*k).and_then(non_empty_str))
            .unwrap_or(UNTITLED)
            .to_owned();
        let pitch_id = ["pitch", "pitchId"]
            .iter()
            .find_map(|k| {
                row.get(*k)
                    .and_then(non_empty_str)
                    .or_else(|| data.and_then(|d| d.get(*k)).and_then(non_empty_str))
            })
            .unwrap_or(DEFAULT_PITCH_ID)
            .to_owned();
        let notes = data
            .and_then(|d| d.get("meta"))
            .and_then(|m| m.get("notes"))
            .and_then(non_empty_str)
            .or_else(|| field("notes").and_then(non_empty_str))
            .unwrap_or_default()
            .to_owned();
        let timeline = field("timeline")
            .and_then(number)
            .filter(|t| *t >= 0.0)
            .unwrap_or(0.0);

        let items = parse_list::<Item>(field("items"), "item");
        let steps = parse_list::<Step>(field("steps"), "step");
        let tracks = parse_tracks(field("keyframesById"));

        let mut design = Self {
            id,
            name,
            pitch_id,
            items,
            steps,
            tracks,
            timeline,
            notes,
        };
        design.sanitize();
        design
    }

    fn sanitize(&mut self) {
        for it in &mut self.items {
            it.sanitize();
        }
        for st in &mut self.steps {
            st.sanitize();
        }
    }

    /// Steps to edit: the stored ones, or a reconstruction from legacy tracks.
    pub fn resolved_steps(&self) -> Vec<Step> {
        let mut next = new_id;
        steps_or_migrate(self.steps.clone(), &self.tracks, &mut next)
    }
}

fn nested_data(row: &Map<String, Value>) -> Option<&Map<String, Value>> {
    row.get("data").and_then(Value::as_object)
}

fn non_empty_str(v: &Value) -> Option<&str> {
    v.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}

fn parse_list<T: serde::de::DeserializeOwned>(v: Option<&Value>, what: &str) -> Vec<T> {
    let Some(arr) = v.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<T>(entry.clone()) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "dropping malformed {what}");
                None
            }
        })
        .collect()
}

fn parse_tracks(v: Option<&Value>) -> BTreeMap<String, Track> {
    let Some(map) = v.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(id, keys)| match serde_json::from_value::<Track>(keys.clone()) {
            Ok(tr) => Some((id.clone(), tr)),
            Err(e) => {
                tracing::warn!(item = %id, error = %e, "dropping malformed keyframe track");
                None
            }
        })
        .collect()
}

/// Expand a `data` field stored as a JSON string into an object in place.
fn inline_string_data(raw: &mut Value) {
    let Some(row) = raw.as_object_mut() else {
        return;
    };
    let parsed = match row.get("data") {
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).ok(),
        _ => return,
    };
    match parsed {
        Some(v @ Value::Object(_)) => {
            row.insert("data".to_owned(), v);
        }
        _ => {
            tracing::warn!("design `data` string is not a JSON object; ignoring it");
            row.remove("data");
        }
    }
}

/// Fresh random id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient, user-facing message about a save or export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Storage collaborator. How and where designs live is up to the implementation.
pub trait DesignStore {
    /// Persist `payload`, with an optional PNG thumbnail.
    fn save(&mut self, payload: &SavePayload, thumbnail_png: Option<&[u8]>) -> BoardResult<()>;
    /// Fetch a stored row by id, in whatever shape it was stored.
    fn load(&mut self, id: &str) -> BoardResult<Option<Value>>;
}

/// [`DesignStore`] backed by a map; useful for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryDesignStore {
    rows: BTreeMap<String, Value>,
    thumbnails: BTreeMap<String, Vec<u8>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw row, e.g. a legacy-shaped one.
    pub fn insert_raw(&mut self, id: impl Into<String>, row: Value) {
        self.rows.insert(id.into(), row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn thumbnail(&self, id: &str) -> Option<&[u8]> {
        self.thumbnails.get(id).map(Vec::as_slice)
    }
}

impl DesignStore for MemoryDesignStore {
    fn save(&mut self, payload: &SavePayload, thumbnail_png: Option<&[u8]>) -> BoardResult<()> {
        let row = serde_json::to_value(payload)?;
        self.rows.insert(payload.id.clone(), row);
        if let Some(png) = thumbnail_png {
            self.thumbnails.insert(payload.id.clone(), png.to_vec());
        }
        Ok(())
    }

    fn load(&mut self, id: &str) -> BoardResult<Option<Value>> {
        Ok(self.rows.get(id).cloned())
    }
}

/// Load and normalise design `id` from `store`.
pub fn load_design(store: &mut dyn DesignStore, id: &str) -> BoardResult<Design> {
    let raw = store
        .load(id)?
        .ok_or_else(|| BoardError::persistence(format!("design '{id}' not found")))?;
    Ok(Design::from_value(&raw))
}

#[cfg(test)]
#[path = "../../tests/unit/design/document.rs"]
mod tests;
