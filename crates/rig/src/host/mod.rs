use std::{
    error,
    fmt::{self, Display, Formatter},
};

use glam::Vec3;

pub mod scene;

pub use scene::{NodeKind, Scene};

/// Opaque handle to a node owned by a live host session.
///
/// Handles are only meaningful for the session that issued them and
/// are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug)]
pub enum HostError {
    NotFound(String),
    StaleNode(NodeId),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NotFound(name) => write!(f, "No node named {:?} in the host", name),
            HostError::StaleNode(node) => write!(f, "Host no longer knows {}", node),
        }
    }
}

impl error::Error for HostError {}

/// Capabilities a live authoring host has to offer for skeletons to
/// be captured from and rebuilt into it.
///
/// All coordinates are world-space. Writes are applied immediately;
/// the host owns the session state and nothing here is buffered.
pub trait Host {
    fn resolve(&self, name: &str) -> Option<NodeId>;
    fn name(&self, node: NodeId) -> Result<String, HostError>;
    /// Whether the node is a joint as opposed to any other node kind.
    fn is_joint(&self, node: NodeId) -> Result<bool, HostError>;

    fn world_translation(&self, node: NodeId) -> Result<Vec3, HostError>;
    fn world_rotation(&self, node: NodeId) -> Result<Vec3, HostError>;
    /// Joint orientation, `None` when the node does not expose one.
    fn orientation(&self, node: NodeId) -> Result<Option<Vec3>, HostError>;
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, HostError>;
    fn children(&self, node: NodeId) -> Result<Vec<NodeId>, HostError>;

    fn set_translation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError>;
    fn set_rotation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError>;
    fn set_scale(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError>;
    fn set_orientation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError>;
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<(), HostError>;

    /// Create a joint under `parent` (the world root when `None`) and
    /// return its handle.
    fn create_joint(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        translation: Vec3,
        orientation: Vec3,
    ) -> Result<NodeId, HostError>;

    fn roots(&self) -> Vec<NodeId>;
    fn selection(&self) -> Vec<NodeId>;
    fn clear_selection(&mut self);
}

/// The injected backend strategy: either a live host session or
/// nothing at all.
///
/// Operations given a detached environment degrade to their purely
/// in-memory behavior, so one skeleton definition can be authored and
/// consumed identically with or without a host attached.
pub enum Environment {
    Live(Box<dyn Host>),
    Detached,
}

impl Environment {
    pub fn live<H: Host + 'static>(host: H) -> Self {
        Self::Live(Box::new(host))
    }

    pub fn detached() -> Self {
        Self::Detached
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn host(&self) -> Option<&dyn Host> {
        match self {
            Self::Live(host) => Some(host.as_ref()),
            Self::Detached => None,
        }
    }

    pub fn host_mut(&mut self) -> Option<&mut dyn Host> {
        match self {
            Self::Live(host) => Some(host.as_mut()),
            Self::Detached => None,
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live(_) => write!(f, "Environment::Live"),
            Self::Detached => write!(f, "Environment::Detached"),
        }
    }
}
