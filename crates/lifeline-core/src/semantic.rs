//! Semantic model of a sequence diagram.
//!
//! The [`Model`] owns every [`Actor`], [`Activity`] and [`Message`] in
//! arenas and hands out typed identifiers for cross references. It is built
//! by a single interpretation pass and read by layout and rendering; once
//! interpretation finishes nothing mutates it.
//!
//! The mutating methods record what they are told and enforce no causal
//! rules. Validation belongs to the interpreter, which must check a command
//! completely before calling any of them so that a rejected command leaves
//! the model untouched.

mod actor;
mod message;
mod time;

pub use actor::{Activity, Actor};
pub use message::{Endpoint, Message, MessageKind};
pub use time::Tick;

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::identifier::{ActivityId, ActorId, MessageId};

/// Actors, activities and messages of one diagram.
///
/// Methods taking an identifier panic if the identifier was not handed out
/// by this model.
///
/// # Examples
///
/// ```
/// # use lifeline_core::semantic::{Endpoint, Message, MessageKind, Model, Tick};
/// let mut model = Model::new();
/// let alice = model.ensure_actor("alice");
/// let bob = model.ensure_actor("bob");
/// let activity = model.open_activity(alice, Tick::FIRST, 0);
///
/// let sent = Endpoint::new(alice, Tick::FIRST, 0);
/// let msg = model.add_message(Message::new("m1", MessageKind::Send, "hello", sent));
/// model.deliver(msg, Endpoint::new(bob, Tick::new(2), 0));
/// model.close_activity(activity, Tick::new(2));
///
/// assert_eq!(model.actor(bob).name(), "bob");
/// assert!(model.message(msg).is_received());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    actors: IndexMap<String, Actor>,
    activities: Vec<Activity>,
    messages: Vec<Message>,
    message_names: HashMap<String, MessageId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the actor registered under `name`, creating it if needed.
    pub fn ensure_actor(&mut self, name: &str) -> ActorId {
        if let Some(index) = self.actors.get_index_of(name) {
            return ActorId::new(index);
        }
        let (index, _) = self
            .actors
            .insert_full(name.to_string(), Actor::new(name));
        debug!(actor = name, display_order = index; "Actor created");
        ActorId::new(index)
    }

    /// Looks up an actor by name without creating it.
    pub fn actor_id(&self, name: &str) -> Option<ActorId> {
        self.actors.get_index_of(name).map(ActorId::new)
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    /// Iterates actors in display order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .values()
            .enumerate()
            .map(|(index, actor)| (ActorId::new(index), actor))
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn set_label(&mut self, id: ActorId, label: impl Into<String>) {
        self.actors[id.index()].set_label(label.into());
    }

    /// Appends a new open activity to `actor`.
    pub fn open_activity(&mut self, actor: ActorId, start: Tick, layer: usize) -> ActivityId {
        let id = ActivityId::new(self.activities.len());
        self.activities.push(Activity::new(actor, start, layer));
        self.actors[actor.index()].push_activity(id);
        id
    }

    pub fn close_activity(&mut self, id: ActivityId, stop: Tick) {
        self.activities[id.index()].close(stop);
    }

    pub fn activity(&self, id: ActivityId) -> &Activity {
        &self.activities[id.index()]
    }

    /// Iterates activities in the order they were opened.
    pub fn activities(&self) -> impl Iterator<Item = (ActivityId, &Activity)> {
        self.activities
            .iter()
            .enumerate()
            .map(|(index, activity)| (ActivityId::new(index), activity))
    }

    /// Stores a message and binds its name to it.
    ///
    /// If the name was already bound, the binding moves to the new message.
    pub fn add_message(&mut self, message: Message) -> MessageId {
        let id = MessageId::new(self.messages.len());
        self.message_names.insert(message.name().to_string(), id);
        self.messages.push(message);
        id
    }

    /// Looks up the message currently bound to `name`.
    pub fn message_id(&self, name: &str) -> Option<MessageId> {
        self.message_names.get(name).copied()
    }

    pub fn message(&self, id: MessageId) -> &Message {
        &self.messages[id.index()]
    }

    /// Iterates messages in the order they were sent.
    pub fn messages(&self) -> impl Iterator<Item = (MessageId, &Message)> {
        self.messages
            .iter()
            .enumerate()
            .map(|(index, message)| (MessageId::new(index), message))
    }

    /// Records the receiving end of a message.
    pub fn deliver(&mut self, id: MessageId, receiver: Endpoint) {
        self.messages[id.index()].deliver(receiver);
    }
}
