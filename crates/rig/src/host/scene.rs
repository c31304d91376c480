use glam::Vec3;

use super::{Host, HostError, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A joint in a rig hierarchy; exposes an orientation.
    Joint,
    /// Any other transform node.
    Transform,
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    kind: NodeKind,
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
    orientation: Option<Vec3>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// In-memory scene graph implementing [`Host`].
///
/// Stands in for a live authoring host session: tests and the CLI
/// build skeletons into it and capture skeletons from it. All stored
/// coordinates are world-space. Nodes are never removed, so handles
/// stay valid for the lifetime of the scene.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    selection: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let orientation = match kind {
            NodeKind::Joint => Some(Vec3::ZERO),
            NodeKind::Transform => None,
        };
        let parent = parent
            .map(|node| node.0 as usize)
            .filter(|index| *index < self.nodes.len());
        let index = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.to_owned(),
            kind,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            orientation,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        NodeId(index as u64)
    }

    pub fn add_joint(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.add_node(name, NodeKind::Joint, parent)
    }

    /// Replaces the active selection, keeping the given order.
    pub fn select(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        self.selection = nodes
            .into_iter()
            .filter(|node| (node.0 as usize) < self.nodes.len())
            .collect();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, node: NodeId) -> Result<&SceneNode, HostError> {
        self.nodes
            .get(node.0 as usize)
            .ok_or(HostError::StaleNode(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut SceneNode, HostError> {
        self.nodes
            .get_mut(node.0 as usize)
            .ok_or(HostError::StaleNode(node))
    }
}

impl Host for Scene {
    /// Resolves to the first node carrying the name; later duplicates
    /// are shadowed.
    fn resolve(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(|index| NodeId(index as u64))
    }

    fn name(&self, node: NodeId) -> Result<String, HostError> {
        Ok(self.node(node)?.name.clone())
    }

    fn is_joint(&self, node: NodeId) -> Result<bool, HostError> {
        Ok(self.node(node)?.kind == NodeKind::Joint)
    }

    fn world_translation(&self, node: NodeId) -> Result<Vec3, HostError> {
        Ok(self.node(node)?.translation)
    }

    fn world_rotation(&self, node: NodeId) -> Result<Vec3, HostError> {
        Ok(self.node(node)?.rotation)
    }

    fn orientation(&self, node: NodeId) -> Result<Option<Vec3>, HostError> {
        Ok(self.node(node)?.orientation)
    }

    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, HostError> {
        Ok(self.node(node)?.parent.map(|index| NodeId(index as u64)))
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>, HostError> {
        Ok(self
            .node(node)?
            .children
            .iter()
            .map(|index| NodeId(*index as u64))
            .collect())
    }

    fn set_translation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError> {
        self.node_mut(node)?.translation = value;
        Ok(())
    }

    fn set_rotation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError> {
        self.node_mut(node)?.rotation = value;
        Ok(())
    }

    fn set_scale(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError> {
        self.node_mut(node)?.scale = value;
        Ok(())
    }

    fn set_orientation(&mut self, node: NodeId, value: Vec3) -> Result<(), HostError> {
        self.node_mut(node)?.orientation = Some(value);
        Ok(())
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<(), HostError> {
        let index = node.0 as usize;
        self.node(node)?;
        let new_parent = match parent {
            Some(parent) => {
                self.node(parent)?;
                Some(parent.0 as usize)
            }
            None => None,
        };
        if let Some(old_parent) = self.nodes[index].parent {
            self.nodes[old_parent].children.retain(|child| *child != index);
        }
        self.nodes[index].parent = new_parent;
        if let Some(new_parent) = new_parent {
            self.nodes[new_parent].children.push(index);
        }
        Ok(())
    }

    fn create_joint(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        translation: Vec3,
        orientation: Vec3,
    ) -> Result<NodeId, HostError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let node = self.add_node(name, NodeKind::Joint, parent);
        self.set_translation(node, translation)?;
        self.set_orientation(node, orientation)?;
        Ok(node)
    }

    fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index as u64))
            .collect()
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod test {
    use glam::Vec3;

    use super::{Host, HostError, NodeId, NodeKind, Scene};

    #[test]
    fn resolve_finds_nodes_by_name() {
        let mut scene = Scene::new();
        let root = scene.add_joint("root", None);
        let child = scene.add_joint("spine", Some(root));
        assert_eq!(scene.resolve("root"), Some(root));
        assert_eq!(scene.resolve("spine"), Some(child));
        assert_eq!(scene.resolve("tail"), None);
    }

    #[test]
    fn create_joint_links_parent_and_children() {
        let mut scene = Scene::new();
        let root = scene.add_joint("root", None);
        let node = scene
            .create_joint("spine", Some(root), Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO)
            .unwrap();
        assert_eq!(scene.parent(node).unwrap(), Some(root));
        assert_eq!(scene.children(root).unwrap(), vec![node]);
        assert_eq!(
            scene.world_translation(node).unwrap(),
            Vec3::new(0.0, 1.0, 0.0)
        );
        assert_eq!(scene.orientation(node).unwrap(), Some(Vec3::ZERO));
    }

    #[test]
    fn plain_transform_nodes_expose_no_orientation() {
        let mut scene = Scene::new();
        let group = scene.add_node("group", NodeKind::Transform, None);
        assert!(!scene.is_joint(group).unwrap());
        assert_eq!(scene.orientation(group).unwrap(), None);
    }

    #[test]
    fn reparenting_moves_child_links() {
        let mut scene = Scene::new();
        let a = scene.add_joint("a", None);
        let b = scene.add_joint("b", None);
        let child = scene.add_joint("child", Some(a));
        scene.set_parent(child, Some(b)).unwrap();
        assert!(scene.children(a).unwrap().is_empty());
        assert_eq!(scene.children(b).unwrap(), vec![child]);
        assert_eq!(scene.parent(child).unwrap(), Some(b));
    }

    #[test]
    fn stale_handles_are_reported() {
        let scene = Scene::new();
        assert!(matches!(
            scene.name(NodeId(7)),
            Err(HostError::StaleNode(NodeId(7)))
        ));
    }

    #[test]
    fn selection_keeps_order_and_clears() {
        let mut scene = Scene::new();
        let a = scene.add_joint("a", None);
        let b = scene.add_joint("b", None);
        scene.select([b, a]);
        assert_eq!(scene.selection(), vec![b, a]);
        scene.clear_selection();
        assert!(scene.selection().is_empty());
    }
}
