use serde::{Deserialize, Serialize};

use crate::joint::JointRecord;

/// A whole skeleton document.
///
/// Both keys are optional so a loader can tell a missing key apart
/// from an empty one and leave its current state untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SkeletonRecord {
    #[serde(rename = "_prefix", default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(rename = "_joints", default, skip_serializing_if = "Option::is_none")]
    pub joints: Option<Vec<JointRecord>>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::SkeletonRecord;

    #[test]
    fn decode_empty_document() {
        let record: SkeletonRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.prefix, None);
        assert_eq!(record.joints, None);
    }

    #[test]
    fn round_trip_keeps_joint_order() {
        let record: SkeletonRecord = serde_json::from_value(json!({
            "_prefix": "char",
            "_joints": [
                { "_name": "a" },
                { "_name": "b", "_parent": "a" },
            ],
        }))
        .unwrap();
        let encoded = serde_json::to_value(&record).unwrap();
        let decoded: SkeletonRecord = serde_json::from_value(encoded).unwrap();
        let joints = decoded.joints.unwrap();
        assert_eq!(joints[0].name, "a");
        assert_eq!(joints[1].name, "b");
        assert_eq!(joints[1].parent, "a");
        assert_eq!(decoded.prefix.as_deref(), Some("char"));
    }
}
