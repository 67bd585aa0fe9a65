//! Installation identity and patch metadata records.

use serde::{Deserialize, Serialize};

/// The named, versioned product instance a patch history belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Product name (e.g. "eap").
    pub name: String,

    /// Product version the patches target (e.g. "8.0.0.Final").
    pub version: String,
}

impl Identity {
    /// Create an identity from a name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Error returned when a stored patch type name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown patch type: '{0}'")]
pub struct UnknownPatchType(pub String);

/// Whether a patch is a one-off fix or a cumulative release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatchType {
    /// A targeted fix applied on top of the current cumulative level.
    #[serde(rename = "one-off")]
    OneOff,
    /// A release that supersedes every earlier patch.
    #[serde(rename = "cumulative")]
    Cumulative,
}

impl PatchType {
    /// The external name of this type, as stored and as reported to callers.
    pub fn name(self) -> &'static str {
        match self {
            Self::OneOff => "one-off",
            Self::Cumulative => "cumulative",
        }
    }

    /// Parse a stored type name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownPatchType`] if `name` is neither `one-off` nor `cumulative`.
    pub fn from_name(name: &str) -> Result<Self, UnknownPatchType> {
        match name {
            "one-off" => Ok(Self::OneOff),
            "cumulative" => Ok(Self::Cumulative),
            other => Err(UnknownPatchType(other.to_string())),
        }
    }
}

impl std::fmt::Display for PatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PatchType {
    type Err = UnknownPatchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Classification of the installation component a patch element targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// An optional add-on shipped alongside the base layers.
    #[serde(rename = "add-on")]
    AddOn,
    /// A module layer of the base distribution.
    #[serde(rename = "layer")]
    Layer,
}

impl ElementKind {
    /// Tag used for this kind in projected output.
    pub fn tag(self) -> &'static str {
        match self {
            Self::AddOn => "add-on",
            Self::Layer => "layer",
        }
    }

    /// True for [`ElementKind::AddOn`].
    pub fn is_add_on(self) -> bool {
        matches!(self, Self::AddOn)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The add-on or layer a patch element is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementProvider {
    /// Name of the add-on or layer (e.g. "base").
    pub name: String,

    /// Whether the target is an add-on or a layer.
    pub kind: ElementKind,
}

impl ElementProvider {
    /// Provider for a layer with the given name.
    pub fn layer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::Layer,
        }
    }

    /// Provider for an add-on with the given name.
    pub fn add_on(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::AddOn,
        }
    }

    /// True when this provider is an add-on.
    pub fn is_add_on(&self) -> bool {
        self.kind.is_add_on()
    }
}

/// A sub-unit of a patch that modifies a single add-on or layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchElement {
    /// Element id, unique within the patch.
    pub id: String,

    /// The add-on or layer this element changes.
    pub provider: ElementProvider,

    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl PatchElement {
    /// Create an element.
    pub fn new(
        id: impl Into<String>,
        provider: ElementProvider,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            provider,
            description: description.into(),
        }
    }
}

/// Descriptive metadata recorded for an applied patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchMetadata {
    /// Patch description.
    #[serde(default)]
    pub description: String,

    /// Optional link to release notes or an advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Identity the patch was built for.
    pub identity: Identity,

    /// Elements in declaration order.
    #[serde(default)]
    pub elements: Vec<PatchElement>,
}

impl PatchMetadata {
    /// Metadata with a description and no link or elements.
    pub fn new(description: impl Into<String>, identity: Identity) -> Self {
        Self {
            description: description.into(),
            link: None,
            identity,
            elements: Vec::new(),
        }
    }

    /// Set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Append an element, keeping declaration order.
    pub fn with_element(mut self, element: PatchElement) -> Self {
        self.elements.push(element);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_type_names_round_trip() {
        for ty in [PatchType::OneOff, PatchType::Cumulative] {
            assert_eq!(PatchType::from_name(ty.name()), Ok(ty));
        }
        assert_eq!(
            PatchType::from_name("hotfix"),
            Err(UnknownPatchType("hotfix".to_string()))
        );
    }

    #[test]
    fn element_kind_tags() {
        assert_eq!(ElementKind::AddOn.tag(), "add-on");
        assert_eq!(ElementKind::Layer.tag(), "layer");
        assert!(ElementProvider::add_on("x").is_add_on());
        assert!(!ElementProvider::layer("base").is_add_on());
    }

    #[test]
    fn metadata_json_without_link_omits_key() {
        let meta = PatchMetadata::new("fixes", Identity::new("eap", "6.2.0"));
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("link").is_none());

        let back: PatchMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn metadata_builder_keeps_element_order() {
        let meta = PatchMetadata::new("cp", Identity::new("eap", "6.2.0"))
            .with_element(PatchElement::new("e1", ElementProvider::layer("base"), ""))
            .with_element(PatchElement::new("e2", ElementProvider::add_on("rhq"), ""));
        let ids: Vec<_> = meta.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
    }
}
