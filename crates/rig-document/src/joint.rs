use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn vec3_one() -> Vec3 {
    Vec3::ONE
}

/// One joint as it appears inside a skeleton document.
///
/// `parent` and `children` are plain node names, never nested records,
/// which keeps the document acyclic and the hierarchy resolvable by
/// lookup. An empty `parent` marks a root joint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JointRecord {
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_translation", default)]
    pub translation: Vec3,
    #[serde(rename = "_rotation", default)]
    pub rotation: Vec3,
    #[serde(rename = "_scale", default = "vec3_one")]
    pub scale: Vec3,
    #[serde(rename = "_orientation", default)]
    pub orientation: Vec3,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_children", default)]
    pub children: Vec<String>,
    #[serde(rename = "_mirrored_joint", default)]
    pub mirrored_joint: Option<String>,
    #[serde(rename = "_mirror", default)]
    pub mirror: bool,
    #[serde(rename = "_group", default)]
    pub group: String,
    #[serde(rename = "_custom_attributes", default)]
    pub custom_attributes: BTreeMap<String, Value>,
    /// Placeholder for the live binding, always `null` on disk.
    #[serde(rename = "_node", default)]
    pub node: Value,
    /// Keys this version of the format does not know about.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl Default for JointRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            orientation: Vec3::ZERO,
            parent: String::new(),
            children: Vec::new(),
            mirrored_joint: None,
            mirror: false,
            group: String::new(),
            custom_attributes: BTreeMap::new(),
            node: Value::Null,
            unknown: BTreeMap::new(),
        }
    }
}

impl JointRecord {
    /// Names of keys the decoder did not recognize.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.unknown.keys().map(String::as_str)
    }
}
