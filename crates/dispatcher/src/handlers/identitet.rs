//! GET_ALL_IDENTITET example handler

use contracts::{Identitet, InboundEvent, Relation, Resource, ResourceType, TilgangerAction};
use tracing::debug;

use super::SYSTEM_ID_FIELD;
use crate::registry::{ActionHandler, ResponseData};

/// Returns the two sample identities
pub struct GetAllIdentitetHandler;

impl GetAllIdentitetHandler {
    fn identity(system_id: &str, ansattnummer: &str, rights: &[&str]) -> Resource {
        let resource = Resource::from(Identitet::new(system_id)).with_relation(Relation::new(
            Identitet::REL_PERSONALRESSURS,
            ResourceType::Personalressurs,
            "ansattnummer",
            ansattnummer,
        ));

        rights.iter().fold(resource, |resource, right| {
            resource.with_relation(Relation::new(
                Identitet::REL_RETTIGHET,
                ResourceType::Rettighet,
                SYSTEM_ID_FIELD,
                *right,
            ))
        })
    }
}

impl ActionHandler for GetAllIdentitetHandler {
    fn action(&self) -> TilgangerAction {
        TilgangerAction::GetAllIdentitet
    }

    fn produce(&self, request: &InboundEvent, data: &mut ResponseData<'_>) {
        debug!(corr_id = %request.corr_id, "Producing sample identities");
        data.add(Self::identity("BATMAN", "100001", &["BATCAVE", "BATMOBILE"]));
        data.add(Self::identity("ROBIN", "100002", &["BATCAVE"]));
    }
}
