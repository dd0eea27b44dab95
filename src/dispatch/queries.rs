use super::EventDispatcher;
use crate::types::{DiscoIdentity, DiscoItem, SoftwareVersion};

impl EventDispatcher {
    /// Reply to a software version query.
    pub fn handle_software_version_result(&mut self, version: &SoftwareVersion) {
        self.ui.software_version(version);
    }

    /// Reply to a disco#info query.
    pub fn handle_disco_info(
        &mut self,
        from: &str,
        identities: &[DiscoIdentity],
        features: &[String],
    ) {
        self.ui.disco_info(from, identities, features);
    }

    /// Reply to a disco#items query.
    pub fn handle_disco_items(&mut self, jid: &str, items: &[DiscoItem]) {
        self.ui.disco_items(jid, items);
    }

    /// Room listing from a conference service.
    pub fn handle_room_list(&mut self, conference_node: &str, rooms: &[DiscoItem]) {
        self.ui.room_list(conference_node, rooms);
    }

    /// Answer from the DuckDuckGo search bot.
    pub fn handle_duck_result(&mut self, result: &str) {
        self.ui.duck_result(result);
    }
}
