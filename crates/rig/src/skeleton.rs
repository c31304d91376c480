use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use rig_document::skeleton::SkeletonRecord;

use crate::{
    error::Error,
    host::Environment,
    joint::{JointData, JointSource},
};

/// An ordered collection of joints under a naming prefix.
///
/// Joint order is significant: it is the order `build` creates nodes
/// in. Next to the sequence a name-to-index lookup is kept so parent
/// references resolve without embedding object links.
#[derive(Debug, Default)]
pub struct Skeleton {
    prefix: String,
    joints: Vec<JointData>,
    index: HashMap<String, usize>,
    data_path: Option<PathBuf>,
}

impl Display for Skeleton {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Skeleton({})", self.prefix)
    }
}

impl Skeleton {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, value: impl Into<String>) -> Result<(), Error> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyPrefix);
        }
        self.prefix = value;
        Ok(())
    }

    /// The file the skeleton was last saved to or loaded from.
    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    /// Points the skeleton at a document file without touching it.
    /// Unlike `save`, this does not require the file to exist yet.
    pub fn set_data_path(&mut self, value: impl Into<PathBuf>) -> Result<(), Error> {
        let value = value.into();
        if value.as_os_str().is_empty() {
            return Err(Error::EmptyDataPath);
        }
        self.data_path = Some(value);
        Ok(())
    }

    pub fn joints(&self) -> &[JointData] {
        &self.joints
    }

    pub fn joint(&self, name: &str) -> Option<&JointData> {
        self.index.get(name).map(|index| &self.joints[*index])
    }

    /// Appends a joint, keeping the name lookup current. Duplicate
    /// names are allowed but logged; the last entry wins the lookup.
    pub fn push_joint(&mut self, joint: JointData) {
        let index = self.joints.len();
        if !joint.name().is_empty()
            && self
                .index
                .insert(joint.name().to_owned(), index)
                .is_some()
        {
            warn!(
                "Duplicate joint name {:?} in skeleton {:?}",
                joint.name(),
                self.prefix
            );
        }
        self.joints.push(joint);
    }

    fn reindex(&mut self) {
        let prefix = self.prefix.clone();
        self.index.clear();
        for (index, joint) in self.joints.iter().enumerate() {
            if joint.name().is_empty() {
                continue;
            }
            if self
                .index
                .insert(joint.name().to_owned(), index)
                .is_some()
            {
                warn!(
                    "Duplicate joint name {:?} in skeleton {:?}",
                    joint.name(),
                    prefix
                );
            }
        }
    }

    /// Captures every currently selected joint node, in selection
    /// order, and appends the results. Detached environments have no
    /// selection source, so nothing happens.
    pub fn from_selection(&mut self, env: &Environment) {
        let Some(host) = env.host() else {
            return;
        };
        for node in host.selection() {
            if !host.is_joint(node).unwrap_or(false) {
                continue;
            }
            match JointData::capture(env, Some(JointSource::Node(node))) {
                Ok(joint) => self.push_joint(joint),
                Err(error) => warn!("Skipping selected {}: {}", node, error),
            }
        }
    }

    /// Creates every joint in the live host, in stored order.
    ///
    /// Individual failures are skipped with a warning so one bad
    /// entry does not abort the rest. The host selection is cleared
    /// afterwards. With a detached environment there is nothing to
    /// create and the call is a no-op.
    pub fn build(&mut self, env: &mut Environment) {
        if !env.is_live() {
            debug!(
                "No live host, skipping creation of {} joints for {:?}",
                self.joints.len(),
                self.prefix
            );
            return;
        }
        for index in 0..self.joints.len() {
            if let Some(parent) = self.joints[index].parent() {
                if self.index.get(parent).is_some_and(|p| *p > index) {
                    warn!(
                        "Joint {:?} is built before its parent {:?}",
                        self.joints[index].name(),
                        parent
                    );
                }
            }
            if let Err(error) = self.joints[index].create(env) {
                warn!("Skipping {}: {}", self.joints[index], error);
            }
        }
        if let Some(host) = env.host_mut() {
            host.clear_selection();
        }
    }

    /// Writes the skeleton document to `path`, creating missing
    /// directories on the way, and remembers the path.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyDataPath);
        }
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let record = SkeletonRecord {
            prefix: Some(self.prefix.clone()),
            joints: Some(self.joints.iter().map(JointData::to_record).collect()),
        };
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &record)?;
        self.data_path = Some(path.to_owned());
        Ok(())
    }

    /// Reads a skeleton document back.
    ///
    /// A path that does not exist falls back to the remembered
    /// `data_path`; when neither resolves this is an I/O error. Keys
    /// missing from the document leave the current state untouched,
    /// so a document without `_joints` keeps the joint list as-is.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let resolved = if path.exists() {
            path.to_owned()
        } else {
            match &self.data_path {
                Some(stored) if stored.exists() => stored.clone(),
                _ => return Err(Error::MissingDocument(path.to_owned())),
            }
        };

        let file = File::open(&resolved)?;
        let record: SkeletonRecord = serde_json::from_reader(BufReader::new(file))?;
        if let Some(joints) = record.joints {
            self.joints = joints.into_iter().map(JointData::from_record).collect();
            self.reindex();
        }
        if let Some(prefix) = record.prefix {
            self.prefix = prefix;
        }
        self.data_path = Some(resolved);
        Ok(())
    }
}
