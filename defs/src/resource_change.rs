use serde::{Deserialize, Serialize};

/// Compose the identity key for a resource within a single diff pass.
/// The namespace segment is omitted when the resource is cluster-scoped
/// or lives in the default namespace.
pub fn resource_key(kind: &str, name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("{}/{}/{}", kind, name, ns),
        None => format!("{}/{}", kind, name),
    }
}

/// Classification of a single raw diff line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffLine {
    /// Unified diff file header (`+++` / `---`)
    Header,
    Addition,
    Removal,
    Context,
}

impl DiffLine {
    pub fn classify(line: &str) -> Self {
        if line.starts_with("+++") || line.starts_with("---") {
            DiffLine::Header
        } else if line.starts_with('+') {
            DiffLine::Addition
        } else if line.starts_with('-') {
            DiffLine::Removal
        } else {
            DiffLine::Context
        }
    }

    pub fn is_change(self) -> bool {
        matches!(self, DiffLine::Addition | DiffLine::Removal)
    }
}

/// A contiguous block of diff lines belonging to one rendered resource.
/// Produced by segmentation, categorized afterwards, trimmed by the
/// context filter before display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceChange {
    /// Category assigned by the categorizer (e.g. "Workloads", "Scaling")
    pub category: String,
    /// Changed-field path preceding the resource identifier, empty if unknown
    pub path: String,
    /// Resource kind (e.g. "Deployment")
    pub kind: String,
    /// Resource name
    pub name: String,
    /// Namespace; omitted when equal to "default" or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Raw diff lines of this change, header line included
    pub lines: Vec<String>,
}

impl ResourceChange {
    pub fn key(&self) -> String {
        resource_key(&self.kind, &self.name, self.namespace.as_deref())
    }

    /// Normalize a parsed namespace value: "default" and empty collapse to None
    pub fn normalize_namespace(namespace: &str) -> Option<String> {
        let ns = namespace.trim();
        if ns.is_empty() || ns == "default" {
            None
        } else {
            Some(ns.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_key_with_namespace() {
        assert_eq!(
            resource_key("Deployment", "my-app", Some("ns1")),
            "Deployment/my-app/ns1"
        );
    }

    #[test]
    fn test_resource_key_without_namespace() {
        assert_eq!(resource_key("ClusterRole", "admin", None), "ClusterRole/admin");
    }

    #[test]
    fn test_normalize_namespace() {
        assert_eq!(ResourceChange::normalize_namespace("ns1"), Some("ns1".to_string()));
        assert_eq!(ResourceChange::normalize_namespace("default"), None);
        assert_eq!(ResourceChange::normalize_namespace(""), None);
        assert_eq!(ResourceChange::normalize_namespace("  "), None);
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(DiffLine::classify("+ replicas: 3"), DiffLine::Addition);
        assert_eq!(DiffLine::classify("- replicas: 1"), DiffLine::Removal);
        assert_eq!(DiffLine::classify("+++ b/deployment.yaml"), DiffLine::Header);
        assert_eq!(DiffLine::classify("--- a/deployment.yaml"), DiffLine::Header);
        assert_eq!(DiffLine::classify("  image: nginx"), DiffLine::Context);
        assert_eq!(DiffLine::classify(""), DiffLine::Context);
    }

    #[test]
    fn test_change_markers_only() {
        assert!(DiffLine::Addition.is_change());
        assert!(DiffLine::Removal.is_change());
        assert!(!DiffLine::Header.is_change());
        assert!(!DiffLine::Context.is_change());
    }

    #[test]
    fn test_serialization_skips_absent_namespace() {
        let change = ResourceChange {
            category: "Workloads".to_string(),
            path: "spec.replicas".to_string(),
            kind: "Deployment".to_string(),
            name: "my-app".to_string(),
            namespace: None,
            lines: vec!["- 1".to_string(), "+ 3".to_string()],
        };

        let json = serde_json::to_value(&change).unwrap();
        assert!(json.get("namespace").is_none());
        assert_eq!(json["kind"], "Deployment");

        let roundtrip: ResourceChange = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, change);
    }
}
