use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use glam::Vec3;
use log::warn;
use serde_json::Value;

use rig_document::joint::JointRecord;

use crate::{
    error::Error,
    host::{Environment, Host, HostError, NodeId},
    transform::Transform,
};

/// Where a captured joint comes from.
#[derive(Debug, Clone)]
pub enum JointSource {
    Name(String),
    Node(NodeId),
}

/// One joint of a skeleton definition.
///
/// Holds the transform attributes authoritative for serialization
/// plus identity and tagging. When the joint was captured from or
/// created in a live host it also carries a node binding; the binding
/// never reaches a document. Setters follow a dual-write policy: the
/// local value is always updated, and when a binding exists and the
/// environment is live the change is also written through to the
/// host, best-effort.
#[derive(Debug, Clone, Default)]
pub struct JointData {
    name: String,
    transform: Transform,
    mirrored_joint: Option<String>,
    mirror: bool,
    group: String,
    custom_attributes: BTreeMap<String, Value>,
    node: Option<NodeId>,
}

impl Display for JointData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "JointData({})", self.name)
    }
}

impl JointData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures a joint from the environment.
    ///
    /// With a live host and a source this resolves the node (failing
    /// with a not-found error for an unknown name) and reads its
    /// world-space translation and rotation, its orientation when the
    /// node exposes one, the parent name when the parent is itself a
    /// joint (root otherwise) and the names of its joint children.
    /// Detached, or without a source, this is a default joint.
    pub fn capture(env: &Environment, source: Option<JointSource>) -> Result<Self, Error> {
        let (Some(host), Some(source)) = (env.host(), source) else {
            return Ok(Self::default());
        };
        let node = match source {
            JointSource::Name(name) => host
                .resolve(&name)
                .ok_or(Error::Host(HostError::NotFound(name)))?,
            JointSource::Node(node) => node,
        };

        let mut joint = Self {
            name: host.name(node)?,
            node: Some(node),
            ..Self::default()
        };
        joint.transform.translation = host.world_translation(node)?;
        joint.transform.rotation = host.world_rotation(node)?;
        if let Some(orientation) = host.orientation(node)? {
            joint.transform.orientation = orientation;
        }
        joint.transform.parent = match host.parent(node)? {
            Some(parent) if host.is_joint(parent)? => Some(host.name(parent)?),
            _ => None,
        };
        for child in host.children(node)? {
            if host.is_joint(child)? {
                joint.transform.children.push(host.name(child)?);
            }
        }
        Ok(joint)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), Error> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyName);
        }
        self.name = value;
        Ok(())
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn orientation(&self) -> Vec3 {
        self.transform.orientation
    }

    pub fn parent(&self) -> Option<&str> {
        self.transform.parent.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.transform.children
    }

    pub fn mirrored_joint(&self) -> Option<&str> {
        self.mirrored_joint.as_deref()
    }

    pub fn set_mirrored_joint(&mut self, value: Option<&str>) {
        self.mirrored_joint = value.map(str::to_owned);
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn set_mirror(&mut self, value: bool) {
        self.mirror = value;
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn set_group(&mut self, value: impl Into<String>) {
        self.group = value.into();
    }

    pub fn custom_attributes(&self) -> &BTreeMap<String, Value> {
        &self.custom_attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.custom_attributes.get(key)
    }

    /// Inserts or overwrites a custom attribute.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.custom_attributes.insert(key.into(), value);
    }

    /// The live binding, if any. Never serialized.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_bound(&self) -> bool {
        self.node.is_some()
    }

    pub fn set_translation(&mut self, env: &mut Environment, value: Vec3) {
        self.transform.translation = value;
        self.write_through(env, "translation", |host, node| {
            host.set_translation(node, value)
        });
    }

    pub fn set_rotation(&mut self, env: &mut Environment, value: Vec3) {
        self.transform.rotation = value;
        self.write_through(env, "rotation", |host, node| host.set_rotation(node, value));
    }

    pub fn set_scale(&mut self, env: &mut Environment, value: Vec3) {
        self.transform.scale = value;
        self.write_through(env, "scale", |host, node| host.set_scale(node, value));
    }

    pub fn set_orientation(&mut self, env: &mut Environment, value: Vec3) {
        self.transform.orientation = value;
        self.write_through(env, "orientation", |host, node| {
            host.set_orientation(node, value)
        });
    }

    pub fn set_parent(&mut self, env: &mut Environment, parent: Option<&str>) {
        self.transform.parent = parent.map(str::to_owned);
        let parent = parent.map(str::to_owned);
        self.write_through(env, "parent", move |host, node| match parent {
            Some(name) => {
                let parent = host.resolve(&name).ok_or(HostError::NotFound(name))?;
                host.set_parent(node, Some(parent))
            }
            None => host.set_parent(node, None),
        });
    }

    // Write-through is best-effort: a failure leaves the local value
    // authoritative and is only logged.
    fn write_through(
        &self,
        env: &mut Environment,
        attribute: &str,
        write: impl FnOnce(&mut dyn Host, NodeId) -> Result<(), HostError>,
    ) {
        let Some(node) = self.node else {
            return;
        };
        let Some(host) = env.host_mut() else {
            return;
        };
        if let Err(error) = write(host, node) {
            warn!(
                "Write-through of {} on {} failed: {}",
                attribute, self, error
            );
        }
    }

    /// Creates this joint in the live host from the stored
    /// translation and orientation.
    ///
    /// The stored parent name is resolved in the host; a missing or
    /// unresolvable parent makes the new joint a root. The returned
    /// binding is kept on the instance. Detached environments cannot
    /// create anything and report [`Error::NoLiveHost`].
    pub fn create(&mut self, env: &mut Environment) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }
        let Some(host) = env.host_mut() else {
            return Err(Error::NoLiveHost);
        };
        let parent = self
            .transform
            .parent
            .as_deref()
            .and_then(|name| host.resolve(name));
        let node = host.create_joint(
            &self.name,
            parent,
            self.transform.translation,
            self.transform.orientation,
        )?;
        self.node = Some(node);
        Ok(())
    }

    /// Snapshot of the joint state without its live binding.
    pub fn to_record(&self) -> JointRecord {
        JointRecord {
            name: self.name.clone(),
            translation: self.transform.translation,
            rotation: self.transform.rotation,
            scale: self.transform.scale,
            orientation: self.transform.orientation,
            parent: self.transform.parent.clone().unwrap_or_default(),
            children: self.transform.children.clone(),
            mirrored_joint: self.mirrored_joint.clone(),
            mirror: self.mirror,
            group: self.group.clone(),
            custom_attributes: self.custom_attributes.clone(),
            ..JointRecord::default()
        }
    }

    /// Rebuilds a joint from a decoded record. Unknown document keys
    /// are logged and dropped; the binding starts out empty.
    pub fn from_record(record: JointRecord) -> Self {
        for key in record.unknown_keys() {
            warn!(
                "Ignoring unknown key {:?} in joint document {:?}",
                key, record.name
            );
        }
        Self {
            name: record.name,
            transform: Transform {
                translation: record.translation,
                rotation: record.rotation,
                scale: record.scale,
                orientation: record.orientation,
                parent: (!record.parent.is_empty()).then_some(record.parent),
                children: record.children,
            },
            mirrored_joint: record.mirrored_joint,
            mirror: record.mirror,
            group: record.group,
            custom_attributes: record.custom_attributes,
            node: None,
        }
    }
}
