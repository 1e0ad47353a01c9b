//! Filter per-marker poses by requested identifiers.

use std::collections::{HashMap, HashSet};

use tagtrack_core::Pose;

/// Keep the poses whose marker id matches a requested identifier.
///
/// An empty request means "return all". Requested identifiers that match
/// no detection are silently omitted; absence from the map is the only
/// signal. Keys are the marker id rendered as a string; a duplicate
/// detector id keeps the last occurrence.
pub fn filter_poses(poses: Vec<(i32, Pose)>, requested: &[String]) -> HashMap<String, Pose> {
    let mut out = HashMap::with_capacity(poses.len());
    if requested.is_empty() {
        for (id, pose) in poses {
            out.insert(id.to_string(), pose);
        }
        return out;
    }

    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
    for (id, pose) in poses {
        let key = id.to_string();
        if wanted.contains(key.as_str()) {
            out.insert(key, pose);
        }
    }
    out
}
