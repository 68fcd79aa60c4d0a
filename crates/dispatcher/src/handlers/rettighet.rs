//! GET_ALL_RETTIGHET example handler

use contracts::{
    Identifikator, InboundEvent, Relation, Resource, ResourceType, Rettighet, TilgangerAction,
};
use tracing::debug;

use super::SYSTEM_ID_FIELD;
use crate::registry::{ActionHandler, ResponseData};

/// Returns the two sample rights
pub struct GetAllRettighetHandler;

impl GetAllRettighetHandler {
    fn right(system_id: &str, navn: &str, kode: &str, beskrivelse: &str, holders: &[&str]) -> Resource {
        let resource = Resource::from(Rettighet {
            system_id: Identifikator::new(system_id),
            navn: navn.to_string(),
            kode: kode.to_string(),
            beskrivelse: Some(beskrivelse.to_string()),
        });

        holders.iter().fold(resource, |resource, holder| {
            resource.with_relation(Relation::new(
                Rettighet::REL_IDENTITET,
                ResourceType::Identitet,
                SYSTEM_ID_FIELD,
                *holder,
            ))
        })
    }
}

impl ActionHandler for GetAllRettighetHandler {
    fn action(&self) -> TilgangerAction {
        TilgangerAction::GetAllRettighet
    }

    fn produce(&self, request: &InboundEvent, data: &mut ResponseData<'_>) {
        debug!(corr_id = %request.corr_id, "Producing sample rights");
        data.add(Self::right(
            "BATCAVE",
            "Batcave",
            "BAT-002",
            "Grants access to the secret cave",
            &["BATMAN", "ROBIN"],
        ));
        data.add(Self::right(
            "BATMOBILE",
            "Batmobile",
            "BAT-001",
            "Grants access to driving the ultimate vehicle",
            &["BATMAN"],
        ));
    }
}
