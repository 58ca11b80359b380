//! The frame store orchestrator.
//!
//! `FrameStore` owns one storage backend and funnels every write through the
//! same path: schema validation, merge against any existing frame, then a
//! synchronous persist — all under one exclusive lock, so no operation is
//! ever interleaved mid-merge and the in-memory view never diverges from the
//! durable view.
//!
//! # Merge policy
//!
//! Re-adding an existing `(identity, kind)` pair merges rather than replaces:
//! caller-supplied property values override old ones key by key (a type-tag
//! change is logged as an override, never applied silently), relationships
//! union per relation name, and the revision counter increments.  A kind
//! mismatch on an existing identity is rejected outright.
//!
//! # Example
//!
//! ```rust
//! use engram_store::FrameStore;
//! use engram_types::{Kind, RawEntity};
//! use serde_json::json;
//!
//! let store = FrameStore::in_memory().unwrap();
//! store
//!     .add(
//!         &RawEntity::new("Python_Language", Kind::Semantic)
//!             .with_property("creator", json!("Guido van Rossum"))
//!             .with_property("year", json!("1991"))
//!             .with_relationship("used_for", json!(["Web_Development"])),
//!     )
//!     .unwrap();
//!
//! let frame = store.get("python_language").unwrap(); // case-insensitive fallback
//! assert_eq!(frame.identity, "Python_Language");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use engram_schema::validate;
use engram_storage::{DurableBackend, EphemeralBackend, StorageBackend};
use engram_types::{Frame, Kind, RawEntity, StorageError, StoreError, ValidationError};

use crate::config::{BackendChoice, StoreConfig};
use crate::graph::{RelationshipGraph, Resolution};

/// Synchronized frame store over a pluggable storage backend.
pub struct FrameStore {
    inner: Mutex<Inner>,
}

struct Inner {
    frames: BTreeMap<String, Frame>,
    graph: RelationshipGraph,
    backend: Box<dyn StorageBackend>,
}

impl FrameStore {
    /// Open a store on the backend named by `config`, loading every persisted
    /// frame into the in-memory index.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let backend: Box<dyn StorageBackend> = match config.backend {
            BackendChoice::Durable => Box::new(DurableBackend::open(
                &config.path,
                Duration::from_millis(config.lock_wait_ms),
            )?),
            BackendChoice::Ephemeral => Box::new(EphemeralBackend::open(&config.path)?),
        };
        Self::with_backend(backend)
    }

    /// Open a store over an explicit backend instance.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Result<Self, StoreError> {
        let mut frames = BTreeMap::new();
        let mut graph = RelationshipGraph::new();
        for frame in backend.load_all()? {
            graph.replace_node(&frame.identity, &frame.relationships);
            frames.insert(frame.identity.clone(), frame);
        }
        debug!(frames = frames.len(), "frame store opened");
        Ok(Self {
            inner: Mutex::new(Inner {
                frames,
                graph,
                backend,
            }),
        })
    }

    /// Open a store over an in-memory durable backend (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_backend(Box::new(DurableBackend::open_in_memory()?))
    }

    /// Validate `raw` and store it, merging into any existing frame with the
    /// same identity and kind.  The returned frame is the stored state after
    /// the merge.  On any error the persisted state is unchanged.
    pub fn add(&self, raw: &RawEntity) -> Result<Frame, StoreError> {
        self.lock().add(raw)
    }

    /// Fetch a frame by identity or name: exact match first, then a
    /// case-insensitive fallback before reporting `NotFound`.
    pub fn get(&self, key: &str) -> Result<Frame, StoreError> {
        let inner = self.lock();
        let identity = inner
            .resolve_identity(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(inner.frames[&identity].clone())
    }

    /// All frames (optionally restricted to one kind), ordered by creation
    /// time ascending, ties broken by identity.
    pub fn list(&self, kind: Option<Kind>) -> Vec<Frame> {
        let inner = self.lock();
        let mut frames: Vec<Frame> = inner
            .frames
            .values()
            .filter(|f| kind.is_none_or(|k| f.kind == k))
            .cloned()
            .collect();
        sort_by_creation(&mut frames);
        frames
    }

    /// Every stored identity, in creation order.
    pub fn list_identities(&self) -> Vec<String> {
        self.list(None).into_iter().map(|f| f.identity).collect()
    }

    /// Frames whose identity contains `fragment` (case-insensitive
    /// substring), in creation order.  This is the whole search surface:
    /// ranking and relevance belong to layers above this core.
    pub fn search(&self, fragment: &str) -> Vec<Frame> {
        let needle = fragment.to_lowercase();
        let inner = self.lock();
        let mut frames: Vec<Frame> = inner
            .frames
            .values()
            .filter(|f| f.identity.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_by_creation(&mut frames);
        frames
    }

    /// Delete a frame by exact identity.  Returns `false` when nothing
    /// matched.  Other frames' edges pointing at the deleted identity stay
    /// in place and resolve as unresolved from now on.
    pub fn delete(&self, identity: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        if !inner.frames.contains_key(identity) {
            return Ok(false);
        }
        inner.backend.remove(identity)?;
        inner.frames.remove(identity);
        inner.graph.remove_node(identity);
        info!(identity, "frame deleted");
        Ok(true)
    }

    /// Classify the relationship targets of a frame by live presence:
    /// forward references are reported as unresolved rather than failing the
    /// query.
    pub fn resolve(&self, key: &str) -> Result<Resolution, StoreError> {
        let inner = self.lock();
        let identity = inner
            .resolve_identity(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(inner.graph.resolve(&identity, |id| inner.frames.contains_key(id)))
    }

    /// Propose additional properties for an existing frame (the enrichment
    /// entry point).  The proposal is overlaid on the frame's current state
    /// and revalidated through the full schema path — no privileged bypass.
    pub fn update_properties(
        &self,
        key: &str,
        properties: BTreeMap<String, JsonValue>,
    ) -> Result<Frame, StoreError> {
        let mut inner = self.lock();
        let raw = inner.reconstruct_raw(key)?.tap_properties(properties);
        inner.add(&raw)
    }

    /// Propose additional relationships for an existing frame.  Targets
    /// union with the existing ones per relation name.
    pub fn add_relationships(
        &self,
        key: &str,
        relationships: BTreeMap<String, JsonValue>,
    ) -> Result<Frame, StoreError> {
        let mut inner = self.lock();
        let mut raw = inner.reconstruct_raw(key)?;
        for (relation, targets) in relationships {
            raw.relationships.insert(relation, targets);
        }
        inner.add(&raw)
    }

    /// Flush and release the backend.
    pub fn close(&self) -> Result<(), StoreError> {
        self.lock().backend.close()?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means another caller panicked mid-operation; the
        // store's state can no longer be trusted, so propagate the panic.
        self.inner.lock().expect("frame store lock poisoned")
    }
}

impl Inner {
    fn add(&mut self, raw: &RawEntity) -> Result<Frame, StoreError> {
        let validated = validate(raw)?;

        let frame = match self.frames.get(&validated.identity) {
            Some(existing) if existing.kind != validated.kind => {
                return Err(ValidationError::KindConflict {
                    identity: validated.identity.clone(),
                    existing: existing.kind,
                    requested: validated.kind,
                }
                .into());
            }
            Some(existing) => merge(existing, validated, raw),
            None => validated,
        };

        // Persist before touching the in-memory view: a storage failure must
        // leave both views exactly as they were.
        self.backend.persist(&frame)?;
        self.graph.replace_node(&frame.identity, &frame.relationships);
        self.frames.insert(frame.identity.clone(), frame.clone());
        info!(
            identity = %frame.identity,
            kind = %frame.kind,
            revision = frame.metadata.revision,
            "frame stored"
        );
        Ok(frame)
    }

    fn resolve_identity(&self, key: &str) -> Option<String> {
        if self.frames.contains_key(key) {
            return Some(key.to_string());
        }
        self.frames
            .keys()
            .find(|candidate| candidate.eq_ignore_ascii_case(key))
            .cloned()
    }

    /// Rebuild a raw entity view of an existing frame so that enrichment
    /// proposals can be overlaid and re-run through the normal add path.
    /// Canonical values serialize to their tagged wire shape, which the
    /// coercer passes through unchanged.
    fn reconstruct_raw(&self, key: &str) -> Result<RawEntity, StoreError> {
        let identity = self
            .resolve_identity(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let frame = &self.frames[&identity];
        let mut raw = RawEntity::new(frame.identity.clone(), frame.kind);
        for (key, value) in &frame.properties {
            let tagged = serde_json::to_value(value)
                .map_err(|e| StorageError::IoFailure(e.to_string()))?;
            raw.properties.insert(key.clone(), tagged);
        }
        for (relation, targets) in &frame.relationships {
            raw.relationships.insert(relation.clone(), serde_json::json!(targets));
        }
        Ok(raw)
    }
}

/// Merge a freshly validated frame into the existing one.
///
/// Only properties the caller actually supplied override; kind defaults
/// introduced during validation stay additive.  Relationships union per
/// relation, preserving the existing order and appending new targets.
fn merge(existing: &Frame, incoming: Frame, raw: &RawEntity) -> Frame {
    let supplied = supplied_keys(raw);
    let mut merged = existing.clone();

    for (key, value) in incoming.properties {
        match merged.properties.get(&key) {
            // A kind default for a key the caller did not touch; the stored
            // value wins.
            Some(_) if !supplied.contains(key.as_str()) => {}
            Some(old) => {
                if !old.same_tag(&value) {
                    warn!(
                        identity = %merged.identity,
                        property = %key,
                        old_tag = old.tag_name(),
                        new_tag = value.tag_name(),
                        "property type tag overridden"
                    );
                }
                merged.properties.insert(key, value);
            }
            None => {
                merged.properties.insert(key, value);
            }
        }
    }

    for (relation, targets) in incoming.relationships {
        let union = merged.relationships.entry(relation).or_default();
        for target in targets {
            if !union.iter().any(|t| t == &target) {
                union.push(target);
            }
        }
    }

    if raw.confidence.is_some() {
        merged.metadata.confidence = incoming.metadata.confidence;
    }
    merged.metadata.updated_at = Utc::now();
    merged.metadata.revision += 1;
    merged
}

/// Property keys the caller actually supplied (non-null, explicit or
/// top-level extra) — as opposed to kind defaults added during validation.
fn supplied_keys(raw: &RawEntity) -> BTreeSet<&str> {
    raw.properties
        .iter()
        .chain(raw.extra.iter())
        .filter(|(_, v)| !v.is_null())
        .map(|(k, _)| k.as_str())
        .collect()
}

fn sort_by_creation(frames: &mut [Frame]) {
    frames.sort_by(|a, b| {
        a.metadata
            .created_at
            .cmp(&b.metadata.created_at)
            .then_with(|| a.identity.cmp(&b.identity))
    });
}

// Small builder-style helper used by `update_properties`.
trait TapProperties {
    fn tap_properties(self, properties: BTreeMap<String, JsonValue>) -> Self;
}

impl TapProperties for RawEntity {
    fn tap_properties(mut self, properties: BTreeMap<String, JsonValue>) -> Self {
        for (key, value) in properties {
            self.properties.insert(key, value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engram_types::Value;
    use serde_json::json;

    fn make_store() -> FrameStore {
        FrameStore::in_memory().unwrap()
    }

    fn python() -> RawEntity {
        RawEntity::new("Python_Language", Kind::Semantic)
            .with_property("creator", json!("Guido van Rossum"))
            .with_property("year", json!("1991"))
            .with_relationship("used_for", json!(["Web_Development", "Data_Science"]))
    }

    fn first_project() -> RawEntity {
        RawEntity::new("First_Python_Project", Kind::Episodic)
            .with_property("timestamp", json!(1714004800))
            .with_property("action", json!("completed first Python project"))
            .with_property("duration_hours", json!("2"))
    }

    // ── round-trip ───────────────────────────────────────────────────────────

    #[test]
    fn add_then_get_reconstructs_the_frame() {
        let store = make_store();
        let stored = store.add(&python()).unwrap();
        let fetched = store.get("Python_Language").unwrap();
        assert_eq!(stored, fetched);
        assert_eq!(fetched.properties.get("year"), Some(&Value::Integer(1991)));
        assert_eq!(
            fetched.relationships.get("used_for"),
            Some(&vec!["Web_Development".to_string(), "Data_Science".to_string()])
        );
    }

    #[test]
    fn frames_survive_store_reopen_on_durable_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::at(BackendChoice::Durable, dir.path().join("frames.db"));
        let stored = {
            let store = FrameStore::open(&config).unwrap();
            let stored = store.add(&python()).unwrap();
            store.close().unwrap();
            stored
        };
        let store = FrameStore::open(&config).unwrap();
        let loaded = store.get("Python_Language").unwrap();
        assert!(loaded.content_eq(&stored));
    }

    #[test]
    fn frames_survive_store_reopen_on_ephemeral_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::at(BackendChoice::Ephemeral, dir.path().join("frames.json"));
        let stored = {
            let store = FrameStore::open(&config).unwrap();
            store.add(&first_project()).unwrap()
        };
        let store = FrameStore::open(&config).unwrap();
        let loaded = store.get("First_Python_Project").unwrap();
        assert!(loaded.content_eq(&stored));
        // Tag preserved across the document rewrite.
        assert!(matches!(loaded.properties.get("timestamp"), Some(Value::Timestamp(_))));
    }

    // ── identity resolution ──────────────────────────────────────────────────

    #[test]
    fn get_falls_back_to_case_insensitive_lookup() {
        let store = make_store();
        store.add(&python()).unwrap();
        let frame = store.get("python_language").unwrap();
        assert_eq!(frame.identity, "Python_Language");
    }

    #[test]
    fn get_unknown_name_is_not_found() {
        let store = make_store();
        let err = store.get("Nobody_Home").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn exact_match_wins_over_case_variant() {
        let store = make_store();
        store.add(&RawEntity::new("alpha", Kind::Semantic)).unwrap();
        store.add(&RawEntity::new("Alpha", Kind::Semantic)).unwrap();
        assert_eq!(store.get("Alpha").unwrap().identity, "Alpha");
        assert_eq!(store.get("alpha").unwrap().identity, "alpha");
    }

    // ── type stability ───────────────────────────────────────────────────────

    #[test]
    fn numeric_string_lands_as_integer_not_string() {
        let store = make_store();
        store.add(&python()).unwrap();
        let updated = store
            .add(&RawEntity::new("Python_Language", Kind::Semantic)
                .with_property("year", json!("1991")))
            .unwrap();
        assert_eq!(updated.properties.get("year"), Some(&Value::Integer(1991)));
    }

    #[test]
    fn boolean_string_lands_as_boolean() {
        let store = make_store();
        let frame = store
            .add(&RawEntity::new("Flag", Kind::Semantic).with_property("active", json!("true")))
            .unwrap();
        assert_eq!(frame.properties.get("active"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn explicit_tag_change_replaces_and_is_not_silent_loss() {
        let store = make_store();
        store
            .add(&RawEntity::new("Thing", Kind::Semantic).with_property("size", json!("large")))
            .unwrap();
        // Caller now supplies a number; the new tag replaces the old one.
        let updated = store
            .add(&RawEntity::new("Thing", Kind::Semantic).with_property("size", json!(42)))
            .unwrap();
        assert_eq!(updated.properties.get("size"), Some(&Value::Integer(42)));
    }

    // ── merge policy ─────────────────────────────────────────────────────────

    #[test]
    fn relationships_union_instead_of_replacing() {
        let store = make_store();
        store
            .add(&RawEntity::new("Tool", Kind::Semantic).with_relationship("uses", json!(["A"])))
            .unwrap();
        let merged = store
            .add(&RawEntity::new("Tool", Kind::Semantic).with_relationship("uses", json!(["B"])))
            .unwrap();
        assert_eq!(
            merged.relationships.get("uses"),
            Some(&vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn merge_increments_revision_and_keeps_created_at() {
        let store = make_store();
        let first = store.add(&python()).unwrap();
        let second = store
            .add(&RawEntity::new("Python_Language", Kind::Semantic)
                .with_property("paradigm", json!("multi-paradigm")))
            .unwrap();
        assert_eq!(second.metadata.revision, first.metadata.revision + 1);
        assert_eq!(second.metadata.created_at, first.metadata.created_at);
        // Old properties survive the merge.
        assert_eq!(second.properties.get("year"), Some(&Value::Integer(1991)));
    }

    #[test]
    fn merge_keeps_confidence_unless_resupplied() {
        let store = make_store();
        store
            .add(&RawEntity::new("Thing", Kind::Semantic).with_confidence(0.6))
            .unwrap();
        let merged = store
            .add(&RawEntity::new("Thing", Kind::Semantic).with_property("a", json!(1)))
            .unwrap();
        assert!((merged.metadata.confidence - 0.6).abs() < f64::EPSILON);

        let merged = store
            .add(&RawEntity::new("Thing", Kind::Semantic).with_confidence(0.9))
            .unwrap();
        assert!((merged.metadata.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn kind_default_never_clobbers_stored_value_on_merge() {
        let store = make_store();
        store
            .add(&first_project().with_property("location", json!("home office")))
            .unwrap();
        // Re-add without location: the validator's empty-string default must
        // not overwrite the stored value.
        let merged = store.add(&first_project()).unwrap();
        assert_eq!(
            merged.properties.get("location"),
            Some(&Value::String("home office".to_string()))
        );
    }

    // ── kind conflict ────────────────────────────────────────────────────────

    #[test]
    fn kind_conflict_is_rejected_and_original_untouched() {
        let store = make_store();
        let original = store.add(&RawEntity::new("X", Kind::Semantic)).unwrap();

        let conflicting = RawEntity::new("X", Kind::Episodic)
            .with_property("timestamp", json!(1714004800))
            .with_property("action", json!("tried to replace X"));
        let err = store.add(&conflicting).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::KindConflict { .. })
        ));

        let fetched = store.get("X").unwrap();
        assert_eq!(fetched, original);
    }

    // ── required fields leave the store unchanged ────────────────────────────

    #[test]
    fn failed_validation_leaves_store_unchanged() {
        let store = make_store();
        store.add(&python()).unwrap();
        let before = store.list(None).len();

        let invalid = RawEntity::new("Broken_Event", Kind::Episodic)
            .with_property("action", json!("no timestamp supplied"));
        let err = store.add(&invalid).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingRequiredField {
                field: "timestamp",
                ..
            })
        ));
        assert_eq!(store.list(None).len(), before);
        assert!(store.get("Broken_Event").is_err());
    }

    // ── forward references ───────────────────────────────────────────────────

    #[test]
    fn forward_reference_resolves_once_target_exists() {
        let store = make_store();
        store
            .add(&RawEntity::new("A", Kind::Semantic).with_relationship("uses", json!(["B"])))
            .unwrap();

        let before = store.resolve("A").unwrap();
        assert!(before.unresolved.contains("B"));
        assert!(before.resolved.is_empty());

        store.add(&RawEntity::new("B", Kind::Semantic)).unwrap();
        let after = store.resolve("A").unwrap();
        assert!(after.resolved.contains("B"));
        assert!(after.unresolved.is_empty());
    }

    #[test]
    fn delete_turns_inbound_edges_into_forward_references() {
        let store = make_store();
        store
            .add(&RawEntity::new("A", Kind::Semantic).with_relationship("uses", json!(["B"])))
            .unwrap();
        store.add(&RawEntity::new("B", Kind::Semantic)).unwrap();
        assert!(store.delete("B").unwrap());

        // A's pointer is not silently dropped; it reports as unresolved.
        let resolution = store.resolve("A").unwrap();
        assert!(resolution.unresolved.contains("B"));
        assert_eq!(
            store.get("A").unwrap().relationships.get("uses"),
            Some(&vec!["B".to_string()])
        );
    }

    #[test]
    fn delete_reports_absence_as_false() {
        let store = make_store();
        assert!(!store.delete("ghost").unwrap());
    }

    // ── list & search ────────────────────────────────────────────────────────

    #[test]
    fn list_orders_by_creation_time() {
        let store = make_store();
        store.add(&RawEntity::new("Alpha", Kind::Semantic)).unwrap();
        store.add(&first_project()).unwrap();
        store.add(&RawEntity::new("Zeta", Kind::Semantic)).unwrap();

        let ids = store.list_identities();
        assert_eq!(ids, vec!["Alpha", "First_Python_Project", "Zeta"]);
    }

    #[test]
    fn list_filters_by_kind() {
        let store = make_store();
        store.add(&python()).unwrap();
        store.add(&first_project()).unwrap();

        let episodic = store.list(Some(Kind::Episodic));
        assert_eq!(episodic.len(), 1);
        assert_eq!(episodic[0].identity, "First_Python_Project");
        assert_eq!(store.list(None).len(), 2);
    }

    #[test]
    fn search_matches_substrings_case_insensitively() {
        let store = make_store();
        store.add(&python()).unwrap();
        store.add(&first_project()).unwrap();
        store.add(&RawEntity::new("Tesla_Model_3", Kind::Semantic)).unwrap();

        let hits = store.search("python");
        let ids: Vec<&str> = hits.iter().map(|f| f.identity.as_str()).collect();
        assert_eq!(ids, vec!["Python_Language", "First_Python_Project"]);
        assert!(store.search("nonexistent").is_empty());
    }

    // ── enrichment entry points ──────────────────────────────────────────────

    #[test]
    fn update_properties_merges_through_validation() {
        let store = make_store();
        store.add(&python()).unwrap();

        let mut proposal = BTreeMap::new();
        proposal.insert("typing".to_string(), json!("dynamic"));
        proposal.insert("first_release_year".to_string(), json!("1991"));
        let updated = store.update_properties("Python_Language", proposal).unwrap();

        assert_eq!(updated.properties.get("typing"), Some(&Value::String("dynamic".to_string())));
        assert_eq!(updated.properties.get("first_release_year"), Some(&Value::Integer(1991)));
        // Prior state intact.
        assert_eq!(updated.properties.get("year"), Some(&Value::Integer(1991)));
        assert_eq!(updated.metadata.revision, 2);
    }

    #[test]
    fn update_properties_on_unknown_frame_is_not_found() {
        let store = make_store();
        let err = store
            .update_properties("ghost", BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_properties_preserves_required_fields() {
        let store = make_store();
        store.add(&first_project()).unwrap();
        let mut proposal = BTreeMap::new();
        proposal.insert("outcome".to_string(), json!("successful"));
        // Must not trip required-field checks: the existing timestamp/action
        // ride along through the revalidation.
        let updated = store.update_properties("First_Python_Project", proposal).unwrap();
        assert!(matches!(updated.properties.get("timestamp"), Some(Value::Timestamp(_))));
    }

    #[test]
    fn add_relationships_unions_with_existing() {
        let store = make_store();
        store.add(&python()).unwrap();

        let mut proposal = BTreeMap::new();
        proposal.insert("used_for".to_string(), json!(["Automation"]));
        proposal.insert("influenced".to_string(), json!(["Ruby"]));
        let updated = store.add_relationships("Python_Language", proposal).unwrap();

        assert_eq!(
            updated.relationships.get("used_for"),
            Some(&vec![
                "Web_Development".to_string(),
                "Data_Science".to_string(),
                "Automation".to_string()
            ])
        );
        assert_eq!(updated.relationships.get("influenced"), Some(&vec!["Ruby".to_string()]));
    }
}
