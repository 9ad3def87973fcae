// names.rs — Resource and permission name resolution.
//
// Every permission lives under exactly one owner resource and is addressed by
// the canonical path:
//
//   corpora/<corpus_id>/permissions/<permission_id>
//   tunedModels/<model_id>/permissions/<permission_id>
//
// Callers rarely have that string in hand. They may pass the full path, an
// owner name plus a numeric id, or a bare owner id plus a type hint. The
// resolver turns any of those into one `PermissionName`, or fails without
// touching the network.
//
// Resolution order:
//   1. `name` present                  → must be the full canonical path
//   2. `resource_name` + `permission_id` → prefix on the resource name wins;
//      a bare id needs `resource_type` ("corpora" or "tunedModels")
//   3. anything else                   → error

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PermissionError, Result};

static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(corpora|tunedModels)/([^/]+)/permissions/([^/]+)$")
        .expect("permission name pattern is valid")
});

static CORPUS_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,38}[a-z0-9])?$").expect("corpus id pattern is valid")
});

static TUNED_MODEL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]([a-z0-9-]{0,38}[a-z0-9])?$").expect("tuned model id pattern is valid")
});

static PERMISSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("permission id pattern is valid"));

/// The two kinds of resource that can carry permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Corpus,
    TunedModel,
}

impl ResourceType {
    /// Collection segment used in resource paths.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceType::Corpus => "corpora",
            ResourceType::TunedModel => "tunedModels",
        }
    }

    /// Only tuned models can change owner.
    pub fn supports_ownership_transfer(&self) -> bool {
        matches!(self, ResourceType::TunedModel)
    }

    /// Look up a type by its exact collection segment.
    pub fn from_collection(segment: &str) -> Option<Self> {
        match segment {
            "corpora" => Some(ResourceType::Corpus),
            "tunedModels" => Some(ResourceType::TunedModel),
            _ => None,
        }
    }

    fn validate_id(&self, id: &str) -> std::result::Result<(), String> {
        let (pattern, what) = match self {
            ResourceType::Corpus => (&*CORPUS_ID, "corpus id"),
            ResourceType::TunedModel => (&*TUNED_MODEL_ID, "tuned model id"),
        };
        if pattern.is_match(id) {
            Ok(())
        } else {
            Err(format!(
                "'{}' is not a valid {} (lowercase letters, digits and inner hyphens, at most 40 characters)",
                id, what
            ))
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for ResourceType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_collection(s)
            .ok_or_else(|| PermissionError::UnsupportedResourceType(s.to_string()))
    }
}

/// A permission id supplied as either a string or an integer.
///
/// Stored in its decimal string form; validated when a name is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionId(String);

impl PermissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(value: &str) -> Self {
        PermissionId(value.to_string())
    }
}

impl From<String> for PermissionId {
    fn from(value: String) -> Self {
        PermissionId(value)
    }
}

impl From<&String> for PermissionId {
    fn from(value: &String) -> Self {
        PermissionId(value.clone())
    }
}

macro_rules! permission_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for PermissionId {
            fn from(value: $t) -> Self {
                PermissionId(value.to_string())
            }
        })*
    };
}

permission_id_from_int!(u32, u64, i32, i64, usize);

/// Handle to a resource that owns permissions: a corpus or a tuned model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    resource_type: ResourceType,
    resource_id: String,
}

impl ResourceRef {
    /// Build a handle, validating the id against the type's id syntax.
    pub fn new(resource_type: ResourceType, resource_id: impl Into<String>) -> Result<Self> {
        let resource_id = resource_id.into();
        resource_type.validate_id(&resource_id).map_err(|reason| {
            PermissionError::invalid_name(
                format!("{}/{}", resource_type.collection(), resource_id),
                reason,
            )
        })?;
        Ok(Self {
            resource_type,
            resource_id,
        })
    }

    pub fn corpus(resource_id: impl Into<String>) -> Result<Self> {
        Self::new(ResourceType::Corpus, resource_id)
    }

    pub fn tuned_model(resource_id: impl Into<String>) -> Result<Self> {
        Self::new(ResourceType::TunedModel, resource_id)
    }

    /// Parse `corpora/<id>` or `tunedModels/<id>`.
    pub fn parse(name: &str) -> Result<Self> {
        let (prefix, id) = name.split_once('/').ok_or_else(|| {
            PermissionError::invalid_name(name, "expected '<collection>/<resource_id>'")
        })?;
        let resource_type = ResourceType::from_collection(prefix).ok_or_else(|| {
            PermissionError::invalid_name(
                name,
                format!(
                    "unrecognized collection '{}': expected 'corpora' or 'tunedModels'",
                    prefix
                ),
            )
        })?;
        if id.contains('/') {
            return Err(PermissionError::invalid_name(
                name,
                "resource id must not contain '/'",
            ));
        }
        Self::new(resource_type, id)
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Canonical resource path, e.g. `corpora/demo-corpus`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Name of a permission under this resource.
    pub fn permission_name(&self, permission_id: impl Into<PermissionId>) -> Result<PermissionName> {
        let permission_id = permission_id.into();
        PermissionName::parse(&format!("{}/permissions/{}", self, permission_id))
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type.collection(), self.resource_id)
    }
}

impl FromStr for ResourceRef {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Fully resolved permission identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionName {
    resource: ResourceRef,
    permission_id: String,
}

impl PermissionName {
    /// Parse the full canonical path. Nothing else is accepted.
    pub fn parse(name: &str) -> Result<Self> {
        let Some(caps) = FULL_NAME.captures(name) else {
            let reason = if ResourceType::from_collection(name.split('/').next().unwrap_or(""))
                .is_none()
            {
                "expected prefix 'corpora/' or 'tunedModels/'"
            } else {
                "expected '<collection>/<resource_id>/permissions/<permission_id>'"
            };
            return Err(PermissionError::invalid_name(name, reason));
        };

        let resource_type = ResourceType::from_collection(&caps[1])
            .ok_or_else(|| PermissionError::invalid_name(name, "unrecognized collection"))?;
        resource_type
            .validate_id(&caps[2])
            .map_err(|reason| PermissionError::invalid_name(name, reason))?;

        let permission_id = &caps[3];
        if !PERMISSION_ID.is_match(permission_id) {
            return Err(PermissionError::invalid_name(
                name,
                format!("permission id '{}' must be numeric", permission_id),
            ));
        }

        Ok(Self {
            resource: ResourceRef {
                resource_type,
                resource_id: caps[2].to_string(),
            },
            permission_id: permission_id.to_string(),
        })
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource.resource_type
    }

    pub fn resource_id(&self) -> &str {
        &self.resource.resource_id
    }

    pub fn permission_id(&self) -> &str {
        &self.permission_id
    }

    /// The owning resource.
    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/permissions/{}", self.resource, self.permission_id)
    }
}

impl FromStr for PermissionName {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Resolve loosely-specified input into a single permission name.
///
/// See the module docs for the accepted shapes and their priority.
pub fn resolve(
    name: Option<&str>,
    resource_name: Option<&str>,
    permission_id: Option<PermissionId>,
    resource_type: Option<&str>,
) -> Result<PermissionName> {
    if let Some(name) = name {
        return PermissionName::parse(name);
    }

    let (resource_name, permission_id) = match (resource_name, permission_id) {
        (Some(resource_name), Some(permission_id)) => (resource_name, permission_id),
        (None, None) => {
            return Err(PermissionError::MissingIdentity(
                "provide either name, or resource_name and permission_id".to_string(),
            ))
        }
        (Some(_), None) => {
            return Err(PermissionError::MissingIdentity(
                "permission_id is required alongside resource_name".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(PermissionError::MissingIdentity(
                "resource_name is required alongside permission_id".to_string(),
            ))
        }
    };

    // A recognized prefix decides the type; the hint is ignored.
    if let Some((prefix, _)) = resource_name.split_once('/') {
        if ResourceType::from_collection(prefix).is_none() {
            return Err(PermissionError::invalid_name(
                resource_name,
                format!(
                    "unrecognized collection '{}': expected 'corpora' or 'tunedModels'",
                    prefix
                ),
            ));
        }
        return PermissionName::parse(&format!(
            "{}/permissions/{}",
            resource_name, permission_id
        ));
    }

    let resource_type: ResourceType = match resource_type {
        Some(hint) => hint.parse()?,
        None => {
            return Err(PermissionError::MissingIdentity(format!(
                "resource_type is required when resource_name '{}' has no 'corpora/' or 'tunedModels/' prefix",
                resource_name
            )))
        }
    };

    PermissionName::parse(&format!(
        "{}/{}/permissions/{}",
        resource_type.collection(),
        resource_name,
        permission_id
    ))
}

/// Builder over the four optional inputs of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct NameQuery {
    name: Option<String>,
    resource_name: Option<String>,
    permission_id: Option<PermissionId>,
    resource_type: Option<String>,
}

impl NameQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query by full canonical path.
    pub fn full(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    /// Query by owner name (prefixed or bare) plus permission id.
    pub fn scoped(resource_name: impl Into<String>, permission_id: impl Into<PermissionId>) -> Self {
        Self::new()
            .resource_name(resource_name)
            .permission_id(permission_id)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn resource_name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    pub fn permission_id(mut self, permission_id: impl Into<PermissionId>) -> Self {
        self.permission_id = Some(permission_id.into());
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn resolve(&self) -> Result<PermissionName> {
        resolve(
            self.name.as_deref(),
            self.resource_name.as_deref(),
            self.permission_id.clone(),
            self.resource_type.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ── Full path ────────────────────────────────────────────────

    #[test]
    fn full_corpus_name_parses() {
        let name = PermissionName::parse("corpora/demo-corpus/permissions/123456789").unwrap();
        assert_eq!(name.resource_type(), ResourceType::Corpus);
        assert_eq!(name.resource_id(), "demo-corpus");
        assert_eq!(name.permission_id(), "123456789");
    }

    #[test]
    fn full_name_round_trips_through_display() {
        for raw in [
            "corpora/demo-corpus/permissions/1",
            "corpora/2323/permissions/42",
            "tunedModels/fake-pig-001/permissions/987654321",
        ] {
            assert_eq!(PermissionName::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn malformed_full_names_are_rejected() {
        for raw in [
            "corpora/demo-corpus-/permissions/123456789",
            "corpora/demo-corpus/permissions/*",
            "tunedModels/my_text_model/permissions/123456789",
            "dataset/demo-corpus/permissions/123456789",
            "corpora/demo-corpus/permissions/123456789/extra",
            "corpora/demo-corpus/permissions/123456789/",
            "corpora/2323",
            "corpora",
            "",
        ] {
            let err = PermissionName::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IdentityFormat, "{raw}");
        }
    }

    #[test]
    fn tuned_model_id_must_start_with_letter() {
        assert!(PermissionName::parse("tunedModels/1model/permissions/1").is_err());
        assert!(PermissionName::parse("corpora/1corpus/permissions/1").is_ok());
    }

    #[test]
    fn id_length_is_capped() {
        let ok = "a".repeat(40);
        let too_long = "a".repeat(41);
        assert!(ResourceRef::corpus(ok).is_ok());
        assert!(ResourceRef::corpus(too_long).is_err());
    }

    // ── resolve() priority ───────────────────────────────────────

    #[test]
    fn name_wins_over_other_inputs() {
        let resolved = resolve(
            Some("corpora/a/permissions/1"),
            Some("tunedModels/b"),
            Some(2u64.into()),
            Some("tunedModels"),
        )
        .unwrap();
        assert_eq!(resolved.to_string(), "corpora/a/permissions/1");
    }

    #[test]
    fn prefixed_resource_name_ignores_type_hint() {
        let resolved = resolve(
            None,
            Some("tunedModels/demo-model"),
            Some(42u64.into()),
            Some("corpora"),
        )
        .unwrap();
        assert_eq!(resolved.resource_type(), ResourceType::TunedModel);
        assert_eq!(resolved.resource_id(), "demo-model");
        assert_eq!(resolved.permission_id(), "42");
    }

    #[test]
    fn bare_resource_name_uses_type_hint() {
        let resolved = NameQuery::scoped("demo-model", 42)
            .resource_type("tunedModels")
            .resolve()
            .unwrap();
        assert_eq!(resolved.to_string(), "tunedModels/demo-model/permissions/42");
    }

    #[test]
    fn bare_resource_name_without_hint_fails() {
        let err = NameQuery::scoped("demo-corpus", "1").resolve().unwrap_err();
        assert!(matches!(err, PermissionError::MissingIdentity(_)));
    }

    #[test]
    fn unknown_type_hint_fails() {
        let err = NameQuery::scoped("my-dataset", "123456789")
            .resource_type("dataset")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, PermissionError::UnsupportedResourceType(ref t) if t == "dataset"));
        assert_eq!(err.kind(), ErrorKind::IdentityFormat);
    }

    #[test]
    fn type_hint_is_case_sensitive() {
        assert!("tunedmodels".parse::<ResourceType>().is_err());
        assert!("corpus".parse::<ResourceType>().is_err());
    }

    #[test]
    fn unknown_prefix_on_resource_name_fails() {
        let err = NameQuery::scoped("dataset/x", 1)
            .resource_type("corpora")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, PermissionError::InvalidName { .. }));
    }

    #[test]
    fn missing_pieces_fail() {
        assert!(NameQuery::new().resolve().is_err());
        assert!(NameQuery::new().resource_name("demo-corpus").resolve().is_err());
        assert!(NameQuery::new().permission_id("123456789").resolve().is_err());
    }

    #[test]
    fn string_and_integer_ids_agree() {
        let a = NameQuery::scoped("corpora/demo-corpus", 123456789u64)
            .resolve()
            .unwrap();
        let b = NameQuery::scoped("corpora/demo-corpus", "123456789")
            .resolve()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_integer_id_fails() {
        assert!(NameQuery::scoped("corpora/demo-corpus", -5i64)
            .resolve()
            .is_err());
    }

    // ── ResourceRef ──────────────────────────────────────────────

    #[test]
    fn resource_ref_parses_prefixed_name() {
        let owner = ResourceRef::parse("tunedModels/fake-pig-001").unwrap();
        assert_eq!(owner.resource_type(), ResourceType::TunedModel);
        assert_eq!(owner.resource_id(), "fake-pig-001");
        assert_eq!(owner.name(), "tunedModels/fake-pig-001");
    }

    #[test]
    fn resource_ref_rejects_nested_paths() {
        assert!(ResourceRef::parse("corpora/a/b").is_err());
        assert!(ResourceRef::parse("corpora").is_err());
        assert!(ResourceRef::parse("models/x").is_err());
    }

    #[test]
    fn resource_ref_builds_permission_names() {
        let owner = ResourceRef::corpus("demo-corpus").unwrap();
        let name = owner.permission_name(7u32).unwrap();
        assert_eq!(name.to_string(), "corpora/demo-corpus/permissions/7");
        assert_eq!(name.resource(), &owner);
    }
}
