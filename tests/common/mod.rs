//! Recording collaborators shared by the dispatcher integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use courier::collaborators::{
    AccountStore, ChatLogger, ChatSessions, Collaborators, Decrypted, DesktopNotifier,
    MessageCrypto, NullCrypto, RoomStore, RosterStore, UiNotifier,
};
use courier::config::Preferences;
use courier::dispatch::{EventDispatcher, Session};
use courier::muc::MemoryRooms;
use courier::roster::MemoryRoster;
use courier::types::{
    Account, ContactPresence, ContactRecord, Direction, DiscoIdentity, DiscoItem, InviteKind,
    Occupant, Resource, SoftwareVersion, Timestamp,
};

pub const ACCOUNT: &str = "work";
pub const OWN_JID: &str = "me@example.org/courier";
pub const OWN_BARE: &str = "me@example.org";

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ── UI ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Error { from: String, message: String },
    ConsoleError(String),
    Console(String),
    LoginSuccess { account: String, presence: ContactPresence },
    Disconnected,
    RoomInvite { kind: InviteKind, invitor: String, room: String, reason: Option<String> },
    Message { from: String, text: String, timestamp: Option<Timestamp>, private: bool },
    RoomMessage { room: String, nick: String, text: String },
    SystemMessage { from: String, text: String },
    ContactOnline { contact: String, resource: String, show: String, status: Option<String> },
    ContactOffline { full_jid: String, show: String, status: Option<String> },
    RoomRoster { room: String, nicks: Vec<String> },
    MemberPresence { room: String, nick: String, show: Option<String> },
    MemberOnline { room: String, nick: String },
    MemberOffline { room: String, nick: String },
    MemberNickChange { room: String, old_nick: String, nick: String },
    RosterAdd { barejid: String, name: Option<String> },
    RosterRemove(String),
    Passthrough { call: &'static str, args: Vec<String> },
}

#[derive(Clone, Default)]
pub struct RecordingUi {
    calls: Arc<Mutex<Vec<UiCall>>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        lock(&self.calls).clone()
    }

    pub fn clear(&self) {
        lock(&self.calls).clear();
    }

    pub fn count(&self, pred: impl Fn(&UiCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: UiCall) {
        lock(&self.calls).push(call);
    }

    fn passthrough(&self, call: &'static str, args: &[&str]) {
        self.push(UiCall::Passthrough {
            call,
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        });
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_owned)
}

impl UiNotifier for RecordingUi {
    fn show_error(&mut self, from: &str, message: &str) {
        self.push(UiCall::Error {
            from: from.to_owned(),
            message: message.to_owned(),
        });
    }

    fn console_error(&mut self, message: &str) {
        self.push(UiCall::ConsoleError(message.to_owned()));
    }

    fn console_message(&mut self, message: &str) {
        self.push(UiCall::Console(message.to_owned()));
    }

    fn login_success(&mut self, account: &Account, presence: ContactPresence) {
        self.push(UiCall::LoginSuccess {
            account: account.name.clone(),
            presence,
        });
    }

    fn disconnected(&mut self) {
        self.push(UiCall::Disconnected);
    }

    fn software_version(&mut self, version: &SoftwareVersion) {
        self.passthrough("software_version", &[&version.jid]);
    }

    fn disco_info(&mut self, from: &str, _identities: &[DiscoIdentity], features: &[String]) {
        let mut args = vec![from];
        args.extend(features.iter().map(String::as_str));
        self.passthrough("disco_info", &args);
    }

    fn disco_items(&mut self, jid: &str, items: &[DiscoItem]) {
        let mut args = vec![jid];
        args.extend(items.iter().map(|i| i.jid.as_str()));
        self.passthrough("disco_items", &args);
    }

    fn room_list(&mut self, conference_node: &str, rooms: &[DiscoItem]) {
        let mut args = vec![conference_node];
        args.extend(rooms.iter().map(|i| i.jid.as_str()));
        self.passthrough("room_list", &args);
    }

    fn duck_result(&mut self, result: &str) {
        self.passthrough("duck_result", &[result]);
    }

    fn room_invite(&mut self, kind: InviteKind, invitor: &str, room: &str, reason: Option<&str>) {
        self.push(UiCall::RoomInvite {
            kind,
            invitor: invitor.to_owned(),
            room: room.to_owned(),
            reason: owned(reason),
        });
    }

    fn room_broadcast(&mut self, room: &str, message: &str) {
        self.passthrough("room_broadcast", &[room, message]);
    }

    fn room_subject(&mut self, room: &str, subject: &str) {
        self.passthrough("room_subject", &[room, subject]);
    }

    fn room_history(&mut self, room: &str, nick: &str, timestamp: Timestamp, message: &str) {
        let ts = timestamp.to_rfc3339();
        self.passthrough("room_history", &[room, nick, &ts, message]);
    }

    fn room_message(&mut self, room: &str, nick: &str, message: &str) {
        self.push(UiCall::RoomMessage {
            room: room.to_owned(),
            nick: nick.to_owned(),
            text: message.to_owned(),
        });
    }

    fn incoming_message(
        &mut self,
        from: &str,
        message: &str,
        timestamp: Option<Timestamp>,
        private: bool,
    ) {
        self.push(UiCall::Message {
            from: from.to_owned(),
            text: message.to_owned(),
            timestamp,
            private,
        });
    }

    fn contact_typing(&mut self, from: &str) {
        self.passthrough("typing", &[from]);
    }

    fn recipient_gone(&mut self, from: &str) {
        self.passthrough("gone", &[from]);
    }

    fn system_message_from(&mut self, from: &str, message: &str) {
        self.push(UiCall::SystemMessage {
            from: from.to_owned(),
            text: message.to_owned(),
        });
    }

    fn contact_online(
        &mut self,
        contact: &str,
        resource: &str,
        show: &str,
        status: Option<&str>,
        _last_activity: Option<Timestamp>,
    ) {
        self.push(UiCall::ContactOnline {
            contact: contact.to_owned(),
            resource: resource.to_owned(),
            show: show.to_owned(),
            status: owned(status),
        });
    }

    fn contact_offline(&mut self, full_jid: &str, show: &str, status: Option<&str>) {
        self.push(UiCall::ContactOffline {
            full_jid: full_jid.to_owned(),
            show: show.to_owned(),
            status: owned(status),
        });
    }

    fn room_nick_change(&mut self, room: &str, nick: &str) {
        self.passthrough("room_nick_change", &[room, nick]);
    }

    fn room_roster(&mut self, room: &str, occupants: &[Occupant], _presence: Option<&str>) {
        self.push(UiCall::RoomRoster {
            room: room.to_owned(),
            nicks: occupants.iter().map(|o| o.nick.clone()).collect(),
        });
    }

    fn room_member_presence(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        _status: Option<&str>,
    ) {
        self.push(UiCall::MemberPresence {
            room: room.to_owned(),
            nick: nick.to_owned(),
            show: owned(show),
        });
    }

    fn room_member_online(&mut self, room: &str, nick: &str, _show: Option<&str>, _status: Option<&str>) {
        self.push(UiCall::MemberOnline {
            room: room.to_owned(),
            nick: nick.to_owned(),
        });
    }

    fn room_member_offline(&mut self, room: &str, nick: &str) {
        self.push(UiCall::MemberOffline {
            room: room.to_owned(),
            nick: nick.to_owned(),
        });
    }

    fn room_member_nick_change(&mut self, room: &str, old_nick: &str, nick: &str) {
        self.push(UiCall::MemberNickChange {
            room: room.to_owned(),
            old_nick: old_nick.to_owned(),
            nick: nick.to_owned(),
        });
    }

    fn group_added(&mut self, contact: &str, group: &str) {
        self.passthrough("group_added", &[contact, group]);
    }

    fn group_removed(&mut self, contact: &str, group: &str) {
        self.passthrough("group_removed", &[contact, group]);
    }

    fn roster_add(&mut self, barejid: &str, name: Option<&str>) {
        self.push(UiCall::RosterAdd {
            barejid: barejid.to_owned(),
            name: owned(name),
        });
    }

    fn roster_remove(&mut self, barejid: &str) {
        self.push(UiCall::RosterRemove(barejid.to_owned()));
    }
}

// ── Chat log ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Chat {
        owner: String,
        peer: String,
        text: String,
        direction: Direction,
        timestamp: Option<Timestamp>,
    },
    Group {
        owner: String,
        room: String,
        nick: String,
        text: String,
    },
}

#[derive(Clone, Default)]
pub struct RecordingLog {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<LogLine> {
        lock(&self.lines).clone()
    }

    pub fn texts(&self) -> Vec<String> {
        lock(&self.lines)
            .iter()
            .map(|l| match l {
                LogLine::Chat { text, .. } | LogLine::Group { text, .. } => text.clone(),
            })
            .collect()
    }
}

impl ChatLogger for RecordingLog {
    fn append_chat_line(
        &mut self,
        owner: &str,
        peer: &str,
        text: &str,
        direction: Direction,
        timestamp: Option<Timestamp>,
    ) {
        lock(&self.lines).push(LogLine::Chat {
            owner: owner.to_owned(),
            peer: peer.to_owned(),
            text: text.to_owned(),
            direction,
            timestamp,
        });
    }

    fn append_groupchat_line(&mut self, owner: &str, room: &str, nick: &str, text: &str) {
        lock(&self.lines).push(LogLine::Group {
            owner: owner.to_owned(),
            room: room.to_owned(),
            nick: nick.to_owned(),
            text: text.to_owned(),
        });
    }
}

// ── Stores ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SharedRoster(pub Arc<Mutex<MemoryRoster>>);

impl SharedRoster {
    pub fn add(&self, barejid: &str, subscription: Option<&str>) {
        lock(&self.0).add_contact(ContactRecord::new(barejid, subscription));
    }

    pub fn contact(&self, barejid: &str) -> Option<ContactRecord> {
        lock(&self.0).get_contact(barejid)
    }

    pub fn len(&self) -> usize {
        lock(&self.0).len()
    }
}

impl RosterStore for SharedRoster {
    fn update_presence(
        &mut self,
        contact: &str,
        resource: &Resource,
        last_activity: Option<Timestamp>,
    ) -> bool {
        lock(&self.0).update_presence(contact, resource, last_activity)
    }

    fn set_offline(&mut self, contact: &str, resource: Option<&str>, status: Option<&str>) -> bool {
        lock(&self.0).set_offline(contact, resource, status)
    }

    fn get_contact(&self, barejid: &str) -> Option<ContactRecord> {
        lock(&self.0).get_contact(barejid)
    }

    fn clear(&mut self) {
        lock(&self.0).clear();
    }
}

#[derive(Clone, Default)]
pub struct SharedRooms(pub Arc<Mutex<MemoryRooms>>);

impl SharedRooms {
    pub fn join(&self, room: &str, nick: &str) {
        lock(&self.0).join(room, nick);
    }

    pub fn is_active(&self, room: &str) -> bool {
        lock(&self.0).is_active(room)
    }

    pub fn roster_received(&self, room: &str) -> bool {
        lock(&self.0).roster_received(room)
    }

    pub fn nicks(&self, room: &str) -> Vec<String> {
        lock(&self.0).roster(room).into_iter().map(|o| o.nick).collect()
    }
}

impl RoomStore for SharedRooms {
    fn is_active(&self, room: &str) -> bool {
        lock(&self.0).is_active(room)
    }

    fn roster_received(&self, room: &str) -> bool {
        lock(&self.0).roster_received(room)
    }

    fn set_roster_received(&mut self, room: &str) {
        lock(&self.0).set_roster_received(room);
    }

    fn roster(&self, room: &str) -> Vec<Occupant> {
        lock(&self.0).roster(room)
    }

    fn add_to_roster(
        &mut self,
        room: &str,
        nick: &str,
        show: Option<&str>,
        status: Option<&str>,
        caps: Option<&str>,
    ) -> bool {
        lock(&self.0).add_to_roster(room, nick, show, status, caps)
    }

    fn remove_from_roster(&mut self, room: &str, nick: &str) {
        lock(&self.0).remove_from_roster(room, nick);
    }

    fn change_member_nick(&mut self, room: &str, old_nick: &str, nick: &str) {
        lock(&self.0).change_member_nick(room, old_nick, nick);
    }

    fn leave(&mut self, room: &str) {
        lock(&self.0).leave(room);
    }
}

// ── Crypto, accounts, sessions, desktop ─────────────────────────

/// Crypto layer with canned answers per ciphertext; anything else passes
/// through as plaintext.
#[derive(Clone, Default)]
pub struct ScriptedCrypto {
    answers: HashMap<String, Decrypted>,
    connected: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encrypted(mut self, ciphertext: &str, plaintext: &str) -> Self {
        self.answers.insert(
            ciphertext.to_owned(),
            Decrypted {
                plaintext: Some(plaintext.to_owned()),
                was_decrypted: true,
            },
        );
        self
    }

    pub fn internal(mut self, ciphertext: &str) -> Self {
        self.answers.insert(
            ciphertext.to_owned(),
            Decrypted {
                plaintext: None,
                was_decrypted: true,
            },
        );
        self
    }

    pub fn connected_accounts(&self) -> Vec<String> {
        lock(&self.connected).clone()
    }
}

impl MessageCrypto for ScriptedCrypto {
    fn on_connect(&mut self, account: &Account) {
        lock(&self.connected).push(account.name.clone());
    }

    fn decrypt(&mut self, _peer: &str, ciphertext: &str) -> Decrypted {
        self.answers.get(ciphertext).cloned().unwrap_or(Decrypted {
            plaintext: Some(ciphertext.to_owned()),
            was_decrypted: false,
        })
    }
}

pub struct StaticAccounts(pub Vec<Account>);

impl AccountStore for StaticAccounts {
    fn get_account(&self, name: &str) -> Option<Account> {
        self.0.iter().find(|a| a.name == name).cloned()
    }
}

#[derive(Clone, Default)]
pub struct CountingChatSessions(pub Arc<Mutex<usize>>);

impl CountingChatSessions {
    pub fn clears(&self) -> usize {
        *lock(&self.0)
    }
}

impl ChatSessions for CountingChatSessions {
    fn clear(&mut self) {
        let mut count = lock(&self.0);
        *count = count.saturating_add(1);
    }
}

#[derive(Clone, Default)]
pub struct RecordingDesktop(pub Arc<Mutex<Vec<String>>>);

impl RecordingDesktop {
    pub fn notifications(&self) -> Vec<String> {
        lock(&self.0).clone()
    }
}

impl DesktopNotifier for RecordingDesktop {
    fn notify_subscription(&mut self, from: &str) {
        lock(&self.0).push(from.to_owned());
    }
}

// ── Harness ─────────────────────────────────────────────────────

pub fn work_account() -> Account {
    Account {
        name: ACCOUNT.to_owned(),
        jid: OWN_JID.to_owned(),
        login_presence: None,
    }
}

pub struct Harness {
    pub dispatcher: EventDispatcher,
    pub session: Session,
    pub ui: RecordingUi,
    pub log: RecordingLog,
    pub roster: SharedRoster,
    pub rooms: SharedRooms,
    pub chat_sessions: CountingChatSessions,
    pub desktop: RecordingDesktop,
}

pub struct HarnessBuilder {
    prefs: Preferences,
    crypto: Box<dyn MessageCrypto>,
    accounts: Vec<Account>,
}

impl HarnessBuilder {
    pub fn prefs(mut self, f: impl FnOnce(&mut Preferences)) -> Self {
        f(&mut self.prefs);
        self
    }

    pub fn crypto(mut self, crypto: impl MessageCrypto + 'static) -> Self {
        self.crypto = Box::new(crypto);
        self
    }

    pub fn account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn build(self) -> Harness {
        let ui = RecordingUi::default();
        let log = RecordingLog::default();
        let roster = SharedRoster::default();
        let rooms = SharedRooms::default();
        let chat_sessions = CountingChatSessions::default();
        let desktop = RecordingDesktop::default();

        let dispatcher = EventDispatcher::new(
            self.prefs,
            Collaborators {
                ui: Box::new(ui.clone()),
                chat_log: Box::new(log.clone()),
                roster: Box::new(roster.clone()),
                rooms: Box::new(rooms.clone()),
                crypto: self.crypto,
                accounts: Box::new(StaticAccounts(self.accounts)),
                chat_sessions: Box::new(chat_sessions.clone()),
                desktop: Box::new(desktop.clone()),
            },
        );

        Harness {
            dispatcher,
            session: Session::new(),
            ui,
            log,
            roster,
            rooms,
            chat_sessions,
            desktop,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            prefs: Preferences::default(),
            crypto: Box::new(NullCrypto),
            accounts: vec![work_account()],
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Log in as the work account and forget the UI calls it made.
    pub fn logged_in(mut self) -> Self {
        if let Err(e) = self
            .dispatcher
            .handle_login_success(&mut self.session, ACCOUNT)
        {
            panic!("login should succeed: {e}");
        }
        self.ui.clear();
        self
    }
}
