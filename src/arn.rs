//! Short names from ECS resource ARNs.
//!
//! An ECS ARN looks like `arn:aws:ecs:<region>:<account>:<resource>` where the
//! resource part is `cluster/<name>` or `service/<cluster>/<name>` (older
//! accounts still return `service/<name>`). Task ARNs are never shortened:
//! `aws ecs execute-command` wants them whole.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Cluster,
    Service,
}

impl ResourceKind {
    fn prefix(self) -> &'static str {
        match self {
            ResourceKind::Cluster => "cluster",
            ResourceKind::Service => "service",
        }
    }
}

/// Extracts the human-readable name, or `None` if `arn` is not an ECS ARN of
/// the given kind.
pub fn short_name(arn: &str, kind: ResourceKind) -> Option<&str> {
    let resource = arn.split(':').nth(5)?;
    let mut parts = resource.split('/');
    if parts.next()? != kind.prefix() {
        return None;
    }

    let name = match kind {
        ResourceKind::Cluster => parts.next(),
        ResourceKind::Service => parts.last(),
    }?;

    (!name.is_empty()).then_some(name)
}

/// Like [`short_name`] but falls back to the identifier as given.
pub fn display_name(arn: &str, kind: ResourceKind) -> String {
    match short_name(arn, kind) {
        Some(name) => name.to_string(),
        None => {
            debug!(
                "keeping unrecognised {} identifier as-is: {}",
                kind.prefix(),
                arn
            );
            arn.to_string()
        }
    }
}
