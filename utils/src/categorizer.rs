use chart_defs::{CategoryGroup, ResourceChange};

/// Kind-to-category table for standard Kubernetes kinds.
const KIND_CATEGORIES: &[(&str, &str)] = &[
    ("Deployment", "Workloads"),
    ("StatefulSet", "Workloads"),
    ("DaemonSet", "Workloads"),
    ("ReplicaSet", "Workloads"),
    ("Job", "Workloads"),
    ("CronJob", "Workloads"),
    ("Pod", "Workloads"),
    ("Service", "Services"),
    ("Endpoints", "Services"),
    ("EndpointSlice", "Services"),
    ("Ingress", "Networking"),
    ("IngressClass", "Networking"),
    ("NetworkPolicy", "Networking"),
    ("PersistentVolume", "Storage"),
    ("PersistentVolumeClaim", "Storage"),
    ("StorageClass", "Storage"),
    ("VolumeAttachment", "Storage"),
    ("ConfigMap", "Configuration"),
    ("Secret", "Configuration"),
    ("ServiceAccount", "RBAC"),
    ("Role", "RBAC"),
    ("RoleBinding", "RBAC"),
    ("ClusterRole", "RBAC"),
    ("ClusterRoleBinding", "RBAC"),
    ("PodDisruptionBudget", "Policy"),
    ("PodSecurityPolicy", "Policy"),
    ("LimitRange", "Policy"),
    ("ResourceQuota", "Policy"),
    ("PriorityClass", "Policy"),
    ("HorizontalPodAutoscaler", "Autoscaling"),
    ("VerticalPodAutoscaler", "Autoscaling"),
];

/// Standard Kubernetes kinds, a superset of the category table. Anything
/// outside this set is treated as a custom resource.
const KNOWN_KINDS: &[&str] = &[
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "ReplicaSet",
    "Job",
    "CronJob",
    "Pod",
    "Service",
    "Endpoints",
    "EndpointSlice",
    "Ingress",
    "IngressClass",
    "NetworkPolicy",
    "PersistentVolume",
    "PersistentVolumeClaim",
    "StorageClass",
    "VolumeAttachment",
    "ConfigMap",
    "Secret",
    "ServiceAccount",
    "Role",
    "RoleBinding",
    "ClusterRole",
    "ClusterRoleBinding",
    "PodDisruptionBudget",
    "PodSecurityPolicy",
    "LimitRange",
    "ResourceQuota",
    "PriorityClass",
    "HorizontalPodAutoscaler",
    "VerticalPodAutoscaler",
    "Namespace",
    "Node",
    "CustomResourceDefinition",
    "MutatingWebhookConfiguration",
    "ValidatingWebhookConfiguration",
    "APIService",
    "ControllerRevision",
    "Lease",
    "Event",
    "CertificateSigningRequest",
    "RuntimeClass",
    "CSIDriver",
    "CSINode",
    "CSIStorageCapacity",
];

/// Display rank: field-level categories first, then resource-level ones,
/// then the metadata and status buckets. "Other" always sorts last and
/// unlisted categories sort alphabetically between the two.
const CATEGORY_ORDER: &[&str] = &[
    "Container & Image",
    "Scaling",
    "Resources",
    "Service Configuration",
    "Selectors & Matching",
    "Environment & Config",
    "Storage & Volumes",
    "Networking",
    "Configuration Data",
    "Spec Changes",
    "Workloads",
    "Services",
    "Storage",
    "Configuration",
    "RBAC",
    "Policy",
    "Autoscaling",
    "Custom Resources",
    "All Changes",
    "Metadata & Tags",
    "Status",
];

/// Assign a category from the changed-field path and the resource kind.
/// Field-path cues are checked first so that a known kind with a
/// categorizable path lands in the field-level category; the kind table
/// applies when no cue matches, which is always the case on the fallback
/// route where the path is empty.
pub fn categorize(path: &str, kind: &str) -> String {
    let p = path.to_lowercase();
    if !p.is_empty() {
        if p.contains("metadata.labels") || p.contains("metadata.annotations") {
            return "Metadata & Tags".to_string();
        }
        if has_segment(&p, "status") {
            return "Status".to_string();
        }
        if has_segment(&p, "spec") {
            return spec_category(&p).to_string();
        }
        if has_segment(&p, "data") || p.contains("configmap") || p.contains("secret") {
            return "Configuration Data".to_string();
        }
    }

    if let Some((_, category)) = KIND_CATEGORIES.iter().find(|(k, _)| *k == kind) {
        return category.to_string();
    }
    if !kind.is_empty() && !KNOWN_KINDS.contains(&kind) {
        return "Custom Resources".to_string();
    }
    if kind.is_empty() {
        "Other".to_string()
    } else {
        kind.to_string()
    }
}

/// True when the lower-cased path contains `segment.` as a path component,
/// either at the start or after a dot.
fn has_segment(path: &str, segment: &str) -> bool {
    path.starts_with(&format!("{}.", segment)) || path.contains(&format!(".{}.", segment))
}

fn spec_category(p: &str) -> &'static str {
    if p.contains("containers") || p.contains("image") || p.contains("template") {
        "Container & Image"
    } else if p.contains("replicas") || p.contains("scale") {
        "Scaling"
    } else if p.contains("service") || p.contains("port") || p.contains("type") {
        "Service Configuration"
    } else if p.contains("selector") || p.contains("matchlabels") {
        "Selectors & Matching"
    } else if p.contains("resources") || p.contains("limits") || p.contains("requests") {
        "Resources"
    } else if p.contains("env") || p.contains("configmap") || p.contains("secret") {
        "Environment & Config"
    } else if p.contains("volume") || p.contains("persistentvolume") {
        "Storage & Volumes"
    } else if p.contains("ingress") || p.contains("host") || p.contains("path") {
        "Networking"
    } else {
        "Spec Changes"
    }
}

/// Sort key over category names: listed categories by table position,
/// unlisted ones alphabetically after them, "Other" last.
pub fn category_rank(category: &str) -> (usize, String) {
    if category == "Other" {
        return (CATEGORY_ORDER.len() + 1, String::new());
    }
    match CATEGORY_ORDER.iter().position(|c| *c == category) {
        Some(idx) => (idx, String::new()),
        None => (CATEGORY_ORDER.len(), category.to_lowercase()),
    }
}

/// Bucket changes by category, in display rank order. Changes keep their
/// source order within each bucket.
pub fn group_by_category(changes: &[ResourceChange]) -> Vec<CategoryGroup> {
    let mut buckets: Vec<CategoryGroup> = Vec::new();
    for change in changes {
        match buckets.iter_mut().find(|g| g.category == change.category) {
            Some(group) => group.changes.push(change.clone()),
            None => buckets.push(CategoryGroup {
                category: change.category.clone(),
                changes: vec![change.clone()],
            }),
        }
    }
    buckets.sort_by_key(|g| category_rank(&g.category));
    buckets
}
