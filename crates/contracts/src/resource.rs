//! Resource - payload records carried by action responses
//!
//! A resource is one domain entity plus its directed relations to other
//! entities, expressed as lookups (type, field, value).

use serde::{Deserialize, Serialize};

/// Identifier value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifikator {
    pub identifikatorverdi: String,
}

impl Identifikator {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            identifikatorverdi: value.into(),
        }
    }
}

/// Identity (a user account)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identitet {
    pub system_id: Identifikator,
}

impl Identitet {
    /// Relation to the employee record
    pub const REL_PERSONALRESSURS: &'static str = "personalressurs";
    /// Relation to granted rights
    pub const REL_RETTIGHET: &'static str = "rettighet";

    pub fn new(system_id: impl Into<String>) -> Self {
        Self {
            system_id: Identifikator::new(system_id),
        }
    }
}

/// Access right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rettighet {
    pub system_id: Identifikator,
    pub navn: String,
    pub kode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beskrivelse: Option<String>,
}

impl Rettighet {
    /// Relation to identities holding the right
    pub const REL_IDENTITET: &'static str = "identitet";
}

/// Resource body, tagged by type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceBody {
    Identitet(Identitet),
    Rettighet(Rettighet),
}

/// Type tag used as relation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Identitet,
    Rettighet,
    Personalressurs,
}

impl ResourceType {
    /// Model path used in relation links
    pub fn type_path(&self) -> &'static str {
        match self {
            Self::Identitet => "ressurser.tilganger.identitet",
            Self::Rettighet => "ressurser.tilganger.rettighet",
            Self::Personalressurs => "administrasjon.personal.personalressurs",
        }
    }
}

/// Directed relation to another resource, resolved by lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Relation name (e.g. "rettighet")
    pub rel_name: String,
    /// Target resource type
    pub target_type: ResourceType,
    /// Lookup field on the target
    pub field: String,
    /// Lookup value
    pub value: String,
}

impl Relation {
    pub fn new(
        rel_name: impl Into<String>,
        target_type: ResourceType,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            rel_name: rel_name.into(),
            target_type,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Link placeholder resolved by the consumer, e.g.
    /// `${ressurser.tilganger.identitet}/systemid/BATMAN`
    pub fn link(&self) -> String {
        format!(
            "${{{}}}/{}/{}",
            self.target_type.type_path(),
            self.field,
            self.value
        )
    }
}

/// Payload record: a resource body plus its relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub resource: ResourceBody,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Resource {
    /// Wrap a resource body without relations
    pub fn new(resource: ResourceBody) -> Self {
        Self {
            resource,
            relations: Vec::new(),
        }
    }

    /// Append a relation (builder style)
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Identifier value of the wrapped resource
    pub fn id(&self) -> &str {
        match &self.resource {
            ResourceBody::Identitet(i) => &i.system_id.identifikatorverdi,
            ResourceBody::Rettighet(r) => &r.system_id.identifikatorverdi,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match &self.resource {
            ResourceBody::Identitet(_) => ResourceType::Identitet,
            ResourceBody::Rettighet(_) => ResourceType::Rettighet,
        }
    }
}

impl From<Identitet> for Resource {
    fn from(identitet: Identitet) -> Self {
        Self::new(ResourceBody::Identitet(identitet))
    }
}

impl From<Rettighet> for Resource {
    fn from(rettighet: Rettighet) -> Self {
        Self::new(ResourceBody::Rettighet(rettighet))
    }
}
