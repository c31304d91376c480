use glam::Vec3;

/// Transform attributes shared by every joint.
///
/// `parent` and `children` are weak name references resolved by
/// lookup, never embedded links, so a transform tree stays acyclic
/// and trivially serializable. `None` as parent marks a root. The
/// children list is derived at capture time and not authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub orientation: Vec3,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            orientation: Vec3::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use glam::Vec3;

    use super::Transform;

    #[test]
    fn default_scale_is_one() {
        let transform = Transform::default();
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(transform.rotation, Vec3::ZERO);
        assert_eq!(transform.scale, Vec3::ONE);
        assert_eq!(transform.orientation, Vec3::ZERO);
        assert_eq!(transform.parent, None);
        assert!(transform.children.is_empty());
    }
}
