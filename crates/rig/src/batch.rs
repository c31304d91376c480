use std::path::PathBuf;

use log::{debug, warn};

use crate::{error::Error, host::Environment, skeleton::Skeleton};

/// One entry of a build batch: a skeleton that is already in memory
/// or a document file to load one from.
#[derive(Debug)]
pub enum SkeletonSource {
    Loaded(Skeleton),
    File(PathBuf),
}

impl From<Skeleton> for SkeletonSource {
    fn from(value: Skeleton) -> Self {
        Self::Loaded(value)
    }
}

impl From<PathBuf> for SkeletonSource {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

/// Builds every skeleton in the batch against the environment.
///
/// An empty batch is a validation error. File entries are loaded into
/// a fresh skeleton first; one that fails to load is skipped with a
/// warning rather than aborting the batch. `Ok` only means the batch
/// was processed. Callers that need per-entry diagnostics inspect the
/// returned skeletons.
pub fn build_skeletons(
    env: &mut Environment,
    sources: Vec<SkeletonSource>,
) -> Result<Vec<Skeleton>, Error> {
    if sources.is_empty() {
        return Err(Error::EmptyBatch);
    }
    let mut built = Vec::with_capacity(sources.len());
    for source in sources {
        let mut skeleton = match source {
            SkeletonSource::Loaded(skeleton) => skeleton,
            SkeletonSource::File(path) => {
                let mut skeleton = Skeleton::default();
                if let Err(error) = skeleton.load(&path) {
                    warn!("Skipping skeleton at {}: {}", path.display(), error);
                    continue;
                }
                skeleton
            }
        };
        debug!("Building {}", skeleton);
        skeleton.build(env);
        built.push(skeleton);
    }
    Ok(built)
}

#[cfg(test)]
mod test {
    use std::fs;

    use glam::Vec3;

    use crate::{
        error::Error,
        host::{Environment, Host, Scene},
        joint::JointData,
        skeleton::Skeleton,
    };

    use super::{build_skeletons, SkeletonSource};

    fn one_joint_skeleton(name: &str) -> Skeleton {
        let mut env = Environment::detached();
        let mut skeleton = Skeleton::new("char");
        let mut joint = JointData::new();
        joint.set_name(name).unwrap();
        joint.set_translation(&mut env, Vec3::ZERO);
        skeleton.push_joint(joint);
        skeleton
    }

    #[test]
    fn empty_batch_is_a_validation_error() {
        let mut env = Environment::detached();
        let result = build_skeletons(&mut env, Vec::new());
        assert!(matches!(result, Err(Error::EmptyBatch)));
    }

    #[test]
    fn single_skeleton_builds_detached() {
        let mut env = Environment::detached();
        let sources = vec![SkeletonSource::from(one_joint_skeleton("hip"))];
        let built = build_skeletons(&mut env, sources).unwrap();
        assert_eq!(built.len(), 1);
    }

    #[test]
    fn file_sources_are_loaded_and_built() {
        let dir = std::env::temp_dir().join(format!("rig-batch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hero.json");
        one_joint_skeleton("hip").save(&path).unwrap();

        let mut env = Environment::live(Scene::new());
        let built = build_skeletons(&mut env, vec![SkeletonSource::from(path)]).unwrap();
        assert_eq!(built.len(), 1);
        assert!(env.host().unwrap().resolve("hip").is_some());
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = std::env::temp_dir().join(format!("rig-batch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("basic.json");
        one_joint_skeleton("root").save(&path).unwrap();

        let mut env = Environment::live(Scene::new());
        let sources = vec![
            SkeletonSource::File(dir.join("missing.json")),
            SkeletonSource::File(path),
        ];
        let built = build_skeletons(&mut env, sources).unwrap();
        assert_eq!(built.len(), 1);
        assert!(env.host().unwrap().resolve("root").is_some());
    }
}
