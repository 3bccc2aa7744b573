//! Cabinet manifest loading.
//!
//! This module loads a cabinet description from a JSON or TOML manifest
//! file. A manifest lists the top-level folders; each folder is either a
//! plain entry (name and declared size) or a group (an entry that also
//! carries a `children` list, possibly empty).
//!
//! An entry may declare an `id`, and later entries may refer to it with
//! `{"ref": "<id>"}` instead of repeating it. A reference reuses the same
//! folder instance, which is how shared folders are described. References
//! only resolve to ids declared earlier in the manifest, so a manifest can
//! never describe a cycle.
//!
//! # Example manifest (JSON)
//!
//! ```json
//! {
//!   "folders": [
//!     {
//!       "name": "G1",
//!       "size": "900MB",
//!       "children": [
//!         { "name": "A-small", "size": "50MB", "id": "a" },
//!         { "name": "B-medium", "size": "850MB" }
//!       ]
//!     },
//!     { "name": "G2", "size": "910MB", "children": [ { "ref": "a" } ] },
//!     { "name": "C-large", "size": "2GB" }
//!   ]
//! }
//! ```
//!
//! # Example manifest (TOML)
//!
//! ```toml
//! [[folders]]
//! name = "G1"
//! size = "900MB"
//!
//! [[folders.children]]
//! name = "A-small"
//! size = "50MB"
//!
//! [[folders]]
//! name = "C-large"
//! size = "2GB"
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::cabinet::Cabinet;
use crate::folder::{Folder, FolderHandle};

/// Top-level manifest structure.
#[derive(Deserialize, Debug)]
struct Manifest {
    /// Top-level folders in declared order
    folders: Vec<FolderNode>,
}

/// One node of the manifest: a folder entry or a reference to one.
///
/// Deserialization tries the reference shape first, so an object with a
/// `ref` key is always a reference; anything else must be a full entry
/// with `name` and `size`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum FolderNode {
    /// Reference to a folder declared earlier under the given `id`
    Reference {
        #[serde(rename = "ref")]
        target: String,
    },

    /// Inline folder entry
    Entry {
        /// Name of the folder
        name: String,

        /// Declared size string exactly as written
        size: String,

        /// Optional id other nodes can reference
        #[serde(default)]
        id: Option<String>,

        /// Child nodes; present (even empty) for a group, absent for a
        /// plain folder
        #[serde(default)]
        children: Option<Vec<FolderNode>>,
    },
}

/// Load a cabinet from a manifest file.
///
/// The format is chosen by file extension: `.json` manifests are parsed
/// as JSON, `.toml` manifests as TOML.
///
/// # Arguments
///
/// * `path` - Path to the manifest file
///
/// # Errors
///
/// Returns an error if:
/// - The file has an extension other than `.json` or `.toml`
/// - The file cannot be read
/// - The content is not valid JSON/TOML or does not match the manifest shape
/// - A reference points at an id that was not declared earlier
/// - Two entries declare the same id
pub fn load_cabinet(path: &Path) -> Result<Cabinet> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let format = match format.as_deref() {
        Some(format @ ("json" | "toml")) => format.to_string(),
        _ => bail!(
            "Unsupported manifest format for {}: expected a .json or .toml file",
            path.display()
        ),
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read manifest at {}: {e}", path.display()))?;

    let cabinet = if format == "json" {
        cabinet_from_json(&content)
    } else {
        cabinet_from_toml(&content)
    };

    cabinet.map_err(|e| anyhow::anyhow!("Failed to load manifest at {}: {e}", path.display()))
}

/// Build a cabinet from a JSON manifest string.
///
/// # Errors
///
/// Returns an error if the string is not a valid JSON manifest or its
/// references do not resolve.
pub fn cabinet_from_json(content: &str) -> Result<Cabinet> {
    let manifest: Manifest = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Invalid JSON manifest: {e}"))?;
    build_cabinet(manifest)
}

/// Build a cabinet from a TOML manifest string.
///
/// # Errors
///
/// Returns an error if the string is not a valid TOML manifest or its
/// references do not resolve.
pub fn cabinet_from_toml(content: &str) -> Result<Cabinet> {
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML manifest: {e}"))?;
    build_cabinet(manifest)
}

/// Turn a parsed manifest into a cabinet.
///
/// Nodes are built in document order, children before their parent, and
/// ids become referencable as soon as the entry declaring them is built.
fn build_cabinet(manifest: Manifest) -> Result<Cabinet> {
    let mut registry: HashMap<String, FolderHandle> = HashMap::new();
    let top_level = build_nodes(manifest.folders, &mut registry)?;
    Ok(Cabinet::new(top_level))
}

fn build_nodes(
    nodes: Vec<FolderNode>,
    registry: &mut HashMap<String, FolderHandle>,
) -> Result<Vec<FolderHandle>> {
    nodes
        .into_iter()
        .map(|node| build_node(node, registry))
        .collect()
}

fn build_node(
    node: FolderNode,
    registry: &mut HashMap<String, FolderHandle>,
) -> Result<FolderHandle> {
    match node {
        FolderNode::Reference { target } => registry.get(&target).map(Arc::clone).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown folder reference '{target}': references must point at an id declared earlier"
            )
        }),
        FolderNode::Entry {
            name,
            size,
            id,
            children,
        } => {
            let folder = match children {
                Some(children) => Folder::group(name, size, build_nodes(children, registry)?),
                None => Folder::leaf(name, size),
            };

            if let Some(id) = id {
                if registry.insert(id.clone(), Arc::clone(&folder)).is_some() {
                    bail!("Duplicate folder id '{id}'");
                }
            }

            Ok(folder)
        }
    }
}
