//! File emission.
//!
//! Maps the optimized function map, the load/tick tags and the pack metadata
//! to output paths. Nothing here changes function bodies.

use std::collections::BTreeMap;

use mcpack_common::{BuildError, Identifier};
use serde::{Deserialize, Serialize};

use crate::text_map::{FunctionTextMap, TagSet};

pub const PACK_META_PATH: &str = "pack.mcmeta";
pub const LOAD_TAG_PATH: &str = "data/minecraft/tags/functions/load.json";
pub const TICK_TAG_PATH: &str = "data/minecraft/tags/functions/tick.json";

/// Contents of `pack.mcmeta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMeta {
    pub pack: PackInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackInfo {
    pub pack_format: u32,
    pub description: String,
}

impl PackMeta {
    pub fn new(pack_format: u32, description: impl Into<String>) -> Self {
        Self {
            pack: PackInfo {
                pack_format,
                description: description.into(),
            },
        }
    }
}

#[derive(Serialize)]
struct TagFile<'a> {
    replace: bool,
    values: &'a [String],
}

/// `data/<namespace>/functions/<path>.mcfunction`
pub fn function_path(id: &Identifier) -> String {
    format!("data/{}/functions/{}.mcfunction", id.namespace(), id.path())
}

/// Serialize a function tag, e.g. `{"replace":false,"values":["ns:main"]}`.
pub fn tag_json(replace: bool, values: &[String]) -> Result<String, BuildError> {
    serde_json::to_string(&TagFile { replace, values })
        .map_err(|e| BuildError::Serialize(e.to_string()))
}

pub fn emit(
    map: &FunctionTextMap,
    static_files: &BTreeMap<String, String>,
    pack_meta: Option<&PackMeta>,
) -> Result<BTreeMap<String, String>, BuildError> {
    let mut files = static_files.clone();

    if let Some(meta) = pack_meta {
        let json =
            serde_json::to_string(meta).map_err(|e| BuildError::Serialize(e.to_string()))?;
        files.insert(PACK_META_PATH.to_string(), json);
    }

    for (key, entry) in map.iter() {
        if let Some(text) = map.render(key) {
            files.insert(function_path(&entry.id), text);
        }
    }

    emit_tag(map, &map.load, LOAD_TAG_PATH, &mut files)?;
    emit_tag(map, &map.tick, TICK_TAG_PATH, &mut files)?;

    tracing::debug!(files = files.len(), "emitted datapack files");
    Ok(files)
}

fn emit_tag(
    map: &FunctionTextMap,
    set: &TagSet,
    path: &str,
    files: &mut BTreeMap<String, String>,
) -> Result<(), BuildError> {
    if set.is_empty() {
        return Ok(());
    }
    let values = map.render_tag_values(set);
    files.insert(path.to_string(), tag_json(set.replace, &values)?);
    Ok(())
}
