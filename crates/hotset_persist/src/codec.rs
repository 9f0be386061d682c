//! Equipset document codec
//!
//! Document layout:
//!
//! ```json
//! {
//!   "version": 1,
//!   "equipsets": [
//!     { "type": "Normal", "name": "Archer", "order": 0, "actions": [ ... ] },
//!     { "type": "Cycle", "name": "Swap", "order": 1, "members": ["Archer"] }
//!   ]
//! }
//! ```
//!
//! A bare array of records is read as a legacy document, and `type` may be
//! the legacy integers 0, 1 and 2.

use crate::error::PersistError;
use hotset_core::{EquipsetError, FormId};
use hotset_equipset::{
    ConsumePolicy, CycleSet, EquipAction, Equipset, EquipsetBody, EquipsetKind, EquipsetStore,
    Hotkey, NormalSet, PotionSet, WidgetBackend, WidgetOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Current document version
pub const DOCUMENT_VERSION: u32 = 1;

fn default_equip_sound() -> bool {
    true
}

/// Fields every record carries
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommonFields {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<u32>,
    #[serde(default)]
    hotkey: Hotkey,
    #[serde(default)]
    widget: WidgetOptions,
    #[serde(default = "default_equip_sound")]
    equip_sound: bool,
}

impl CommonFields {
    fn from_set(set: &Equipset) -> Self {
        Self {
            name: set.name.clone(),
            order: Some(set.order),
            hotkey: set.hotkey,
            widget: set.widget.clone(),
            equip_sound: set.equip_sound,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NormalRecord {
    #[serde(flatten)]
    common: CommonFields,
    #[serde(default)]
    actions: Vec<EquipAction>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PotionRecord {
    #[serde(flatten)]
    common: CommonFields,
    item: FormId,
    #[serde(default)]
    policy: ConsumePolicy,
}

#[derive(Debug, Serialize, Deserialize)]
struct CycleRecord {
    #[serde(flatten)]
    common: CommonFields,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Serialize)]
struct Tagged<T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    record: T,
}

#[derive(Serialize)]
struct DocumentOut {
    version: u32,
    equipsets: Vec<Value>,
}

/// Result of decoding a document
#[derive(Debug, Default)]
pub struct DecodedDocument {
    /// Version stamped in the document (0 for legacy arrays)
    pub version: u32,
    /// Decoded sets, in document order, every `order` filled in
    pub sets: Vec<Equipset>,
    /// Records that were skipped
    pub skipped: Vec<EquipsetError>,
}

/// Encode sets, in the order given, into a document
pub fn encode_document<'a>(sets: impl IntoIterator<Item = &'a Equipset>) -> Result<String, PersistError> {
    let equipsets = sets
        .into_iter()
        .map(encode_record)
        .collect::<Result<Vec<_>, _>>()?;

    let document = DocumentOut {
        version: DOCUMENT_VERSION,
        equipsets,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn encode_record(set: &Equipset) -> Result<Value, serde_json::Error> {
    let common = CommonFields::from_set(set);
    let kind = set.kind().as_str();

    match &set.body {
        EquipsetBody::Normal(normal) => serde_json::to_value(Tagged {
            kind,
            record: NormalRecord {
                common,
                actions: normal.actions.clone(),
            },
        }),
        EquipsetBody::Potion(potion) => serde_json::to_value(Tagged {
            kind,
            record: PotionRecord {
                common,
                item: potion.item,
                policy: potion.policy,
            },
        }),
        EquipsetBody::Cycle(cycle) => serde_json::to_value(Tagged {
            kind,
            record: CycleRecord {
                common,
                members: cycle.members.clone(),
            },
        }),
    }
}

/// Decode a document.
///
/// Only a document that is not JSON, or not shaped like one of ours, is an
/// error. Individual records that fail are logged and reported in
/// [`DecodedDocument::skipped`].
pub fn decode_document(text: &str) -> Result<DecodedDocument, PersistError> {
    let (version, records) = match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => (0, records),
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(DOCUMENT_VERSION);
            match map.remove("equipsets") {
                Some(Value::Array(records)) => (version, records),
                None => (version, Vec::new()),
                Some(_) => {
                    return Err(PersistError::Malformed("'equipsets' is not an array".into()));
                }
            }
        }
        _ => return Err(PersistError::Malformed("expected an object or array".into())),
    };

    let mut decoded = DecodedDocument {
        version,
        ..Default::default()
    };
    let mut missing_order = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match decode_record(index, record) {
            Ok((set, has_order)) => {
                if !has_order {
                    missing_order.push(decoded.sets.len());
                }
                decoded.sets.push(set);
            }
            Err(err) => {
                log::warn!("Skipping equipset record: {}", err);
                decoded.skipped.push(err);
            }
        }
    }

    // Records without an order go after the highest explicit one, in document order.
    let explicit_max = decoded
        .sets
        .iter()
        .enumerate()
        .filter(|(i, _)| !missing_order.contains(i))
        .map(|(_, s)| s.order)
        .max();
    let mut next = explicit_max.map_or(Some(0), |m| m.checked_add(1));
    for i in missing_order {
        let Some(order) = next else {
            log::warn!(
                "No free sort position above {:?}; renumbering {} records",
                explicit_max,
                decoded.sets.len()
            );
            renumber(&mut decoded.sets);
            break;
        };
        decoded.sets[i].order = order;
        next = order.checked_add(1);
    }

    Ok(decoded)
}

/// Set every `order` to its document position
fn renumber(sets: &mut [Equipset]) {
    for (i, set) in sets.iter_mut().enumerate() {
        set.order = u32::try_from(i).unwrap_or(u32::MAX);
    }
}

fn decode_record(index: usize, record: Value) -> Result<(Equipset, bool), EquipsetError> {
    let malformed = |reason: String| EquipsetError::MalformedRecord { index, reason };

    let kind = match record.get("type") {
        Some(Value::String(tag)) => EquipsetKind::from_tag(tag),
        Some(Value::Number(n)) => n.as_u64().and_then(EquipsetKind::from_legacy),
        _ => None,
    }
    .ok_or_else(|| {
        let tag = record.get("type").map(Value::to_string).unwrap_or_default();
        malformed(format!("unknown kind '{}'", tag))
    })?;

    let (common, body) = match kind {
        EquipsetKind::Normal => {
            let r: NormalRecord = serde_json::from_value(record).map_err(|e| malformed(e.to_string()))?;
            (r.common, EquipsetBody::Normal(NormalSet { actions: r.actions }))
        }
        EquipsetKind::Potion => {
            let r: PotionRecord = serde_json::from_value(record).map_err(|e| malformed(e.to_string()))?;
            (
                r.common,
                EquipsetBody::Potion(PotionSet::new(r.item).with_policy(r.policy)),
            )
        }
        EquipsetKind::Cycle => {
            let r: CycleRecord = serde_json::from_value(record).map_err(|e| malformed(e.to_string()))?;
            (r.common, EquipsetBody::Cycle(CycleSet::with_members(r.members)))
        }
    };

    let set = Equipset::from_parts(common.name, common.order.unwrap_or(0), body)
        .with_hotkey(common.hotkey)
        .with_widget(common.widget)
        .with_equip_sound(common.equip_sound);
    Ok((set, common.order.is_some()))
}

/// Outcome of importing a document into a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Sets now in the store
    pub imported: usize,
    /// Records dropped as malformed or of unknown kind
    pub skipped: usize,
    /// Sets kept but flagged invalid
    pub flagged: usize,
    /// Sets whose duplicate `order` was reassigned
    pub reordered: usize,
}

/// Encode a store's sets in natural order
pub fn export_store<W: WidgetBackend>(store: &EquipsetStore<W>) -> Result<String, PersistError> {
    encode_document(store.iter().map(|(_, set)| set))
}

/// Replace a store's contents with a decoded document.
///
/// Decoding happens before this call, so a document that fails to parse
/// never reaches the store.
pub fn import_into<W: WidgetBackend>(
    store: &mut EquipsetStore<W>,
    decoded: DecodedDocument,
) -> ImportReport {
    let skipped = decoded.skipped.len();
    let summary = store.load_batch(decoded.sets);
    ImportReport {
        imported: summary.loaded,
        skipped,
        flagged: summary.flagged,
        reordered: summary.reordered,
    }
}

/// Read and decode a document. A missing file is `Ok(None)`.
pub fn read_document(path: impl AsRef<Path>) -> Result<Option<DecodedDocument>, PersistError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("No equipset document at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let decoded = decode_document(&text)?;
    log::info!(
        "Read {} equipsets from {} ({} skipped)",
        decoded.sets.len(),
        path.display(),
        decoded.skipped.len()
    );
    Ok(Some(decoded))
}

/// Encode and write a document, replacing the file
pub fn write_document<'a>(
    path: impl AsRef<Path>,
    sets: impl IntoIterator<Item = &'a Equipset>,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, encode_document(sets)?)?;
    log::info!("Wrote equipset document {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotset_core::ExtraDataRef;
    use hotset_equipset::{EquipSlot, RecordingBackend};

    fn sample() -> Vec<Equipset> {
        let normal = Equipset::normal(
            "Archer",
            NormalSet::new()
                .with_action(EquipAction::equip(EquipSlot::LeftHand, FormId(0x1398A)))
                .with_action(
                    EquipAction::equip(EquipSlot::Item, FormId(0x13911)).with_extra(ExtraDataRef(77)),
                )
                .with_action(EquipAction::unequip(EquipSlot::Shout)),
        )
        .unwrap()
        .with_hotkey(Hotkey::new(2).with_modifier(42))
        .with_widget(WidgetOptions {
            icon: "Bow".into(),
            offset_x: -20,
            offset_y: 15,
            show_name: true,
        });
        let mut potion = Equipset::potion(
            "Heal",
            PotionSet::new(FormId(0x3EADE)).with_policy(ConsumePolicy::Count(2)),
        )
        .unwrap()
        .with_equip_sound(false);
        potion.order = 4;
        let mut cycle = Equipset::cycle("Swap", CycleSet::with_members(["Archer", "Missing"])).unwrap();
        cycle.order = 2;

        vec![normal, potion, cycle]
    }

    #[test]
    fn test_round_trip() {
        let sets = sample();
        let text = encode_document(&sets).unwrap();
        let decoded = decode_document(&text).unwrap();

        assert_eq!(decoded.version, DOCUMENT_VERSION);
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.sets, sets);
    }

    #[test]
    fn test_record_shape() {
        let text = encode_document(&sample()[1..2]).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let record = &value["equipsets"][0];

        assert_eq!(record["type"], "Potion");
        assert_eq!(record["name"], "Heal");
        assert_eq!(record["order"], 4);
        assert_eq!(record["item"], 0x3EADE);
        assert_eq!(record["equip_sound"], false);
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let text = r#"{
            "version": 1,
            "equipsets": [
                { "type": "Spellbook", "name": "Bad" },
                { "type": "Normal", "name": "Good", "order": 0 },
                { "type": "Potion", "name": "No Item" }
            ]
        }"#;
        let decoded = decode_document(text).unwrap();

        assert_eq!(decoded.sets.len(), 1);
        assert_eq!(decoded.sets[0].name, "Good");
        assert_eq!(decoded.skipped.len(), 2);
        assert!(matches!(
            decoded.skipped[0],
            EquipsetError::MalformedRecord { index: 0, .. }
        ));
        assert!(matches!(
            decoded.skipped[1],
            EquipsetError::MalformedRecord { index: 2, .. }
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let text = r#"{ "equipsets": [
            { "type": "Normal", "name": "A", "order": 5 },
            { "type": "Cycle", "name": "B" },
            { "type": "Potion", "name": "C", "item": 10 }
        ] }"#;
        let decoded = decode_document(text).unwrap();
        let orders: Vec<_> = decoded.sets.iter().map(|s| s.order).collect();

        assert_eq!(orders, vec![5, 6, 7]);
        assert!(decoded.sets[1].equip_sound);
        assert_eq!(decoded.sets[1].hotkey, Hotkey::default());
        assert_eq!(decoded.sets[1].cycle_members().unwrap().len(), 0);
        match &decoded.sets[2].body {
            EquipsetBody::Potion(p) => assert_eq!(p.policy, ConsumePolicy::Single),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_top_order_is_kept() {
        let text = r#"{ "equipsets": [ { "type": "Normal", "name": "A", "order": 4294967295 } ] }"#;
        let decoded = decode_document(text).unwrap();
        assert_eq!(decoded.sets[0].order, u32::MAX);
    }

    #[test]
    fn test_missing_order_above_top_renumbers() {
        let text = r#"{ "equipsets": [
            { "type": "Normal", "name": "A", "order": 4294967295 },
            { "type": "Normal", "name": "B" },
            { "type": "Normal", "name": "C", "order": 9 }
        ] }"#;
        let decoded = decode_document(text).unwrap();
        let orders: Vec<_> = decoded.sets.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_legacy_array_and_numeric_tags() {
        let text = r#"[
            { "type": 2, "name": "Cycle", "members": ["Melee"] },
            { "type": 0, "name": "Melee" }
        ]"#;
        let decoded = decode_document(text).unwrap();

        assert_eq!(decoded.version, 0);
        assert_eq!(decoded.sets[0].kind(), EquipsetKind::Cycle);
        assert_eq!(decoded.sets[1].kind(), EquipsetKind::Normal);
        assert_eq!(decoded.sets[1].order, 1);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(decode_document("not json"), Err(PersistError::Json(_))));
        assert!(matches!(decode_document("42"), Err(PersistError::Malformed(_))));
        assert!(matches!(
            decode_document(r#"{ "equipsets": {} }"#),
            Err(PersistError::Malformed(_))
        ));
    }

    #[test]
    fn test_import_into_store() {
        let mut store = EquipsetStore::new(RecordingBackend::new());
        store
            .add(Equipset::normal("Old", NormalSet::new()).unwrap())
            .unwrap();

        let text = r#"{ "version": 1, "equipsets": [
            { "type": "Cycle", "name": "Swap", "order": 0, "members": ["Melee", "Ranged"] },
            { "type": "Normal", "name": "Melee", "order": 1 },
            { "type": "Cycle", "name": "Loop A", "order": 2, "members": ["Loop B"] },
            { "type": "Cycle", "name": "Loop B", "order": 3, "members": ["Loop A"] },
            { "type": "Mystery", "name": "Skip" }
        ] }"#;
        let report = import_into(&mut store, decode_document(text).unwrap());

        assert_eq!(
            report,
            ImportReport {
                imported: 4,
                skipped: 1,
                flagged: 2,
                reordered: 0,
            }
        );
        assert!(store.find_by_name("Old").is_none());
        let swap = store.find_by_name("Swap").unwrap();
        assert!(!store.is_flagged(swap));
        assert!(store.is_flagged(store.find_by_name("Loop A").unwrap()));
        assert_eq!(store.live_widget_count(), 2);
    }

    #[test]
    fn test_export_store_natural_order() {
        let mut store = EquipsetStore::new(RecordingBackend::new());
        for name in ["C", "A", "B"] {
            store.add(Equipset::normal(name, NormalSet::new()).unwrap()).unwrap();
        }
        let decoded = decode_document(&export_store(&store).unwrap()).unwrap();
        let names: Vec<_> = decoded.sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("Equipset.json");

        assert!(read_document(&path).unwrap().is_none());

        write_document(&path, &sample()).unwrap();
        let decoded = read_document(&path).unwrap().unwrap();
        assert_eq!(decoded.sets, sample());
    }
}
