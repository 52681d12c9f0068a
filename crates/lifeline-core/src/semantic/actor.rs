use crate::{
    identifier::{ActivityId, ActorId},
    semantic::Tick,
};

/// A named participant with a lifeline.
///
/// Actors are created on first mention. Their [`ActorId`] is the index of
/// first appearance and therefore also their display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    name: String,
    label: String,
    activities: Vec<ActivityId>,
}

impl Actor {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            activities: Vec::new(),
        }
    }

    /// The unique name used to refer to the actor in the script.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text shown in the actor's header. Defaults to the name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Activities of this actor in the order they were opened.
    pub fn activities(&self) -> &[ActivityId] {
        &self.activities
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn push_activity(&mut self, activity: ActivityId) {
        self.activities.push(activity);
    }
}

/// An interval during which an actor is able to send and receive.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    actor: ActorId,
    start: Tick,
    stop: Option<Tick>,
    layer: usize,
}

impl Activity {
    pub(crate) fn new(actor: ActorId, start: Tick, layer: usize) -> Self {
        Self {
            actor,
            start,
            stop: None,
            layer,
        }
    }

    /// The owning actor.
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn start(&self) -> Tick {
        self.start
    }

    /// The closing tick, or `None` while the activity is still open.
    pub fn stop(&self) -> Option<Tick> {
        self.stop
    }

    /// Nesting depth: the number of activities already open on the actor
    /// when this one started.
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn is_open(&self) -> bool {
        self.stop.is_none()
    }

    pub(crate) fn close(&mut self, stop: Tick) {
        self.stop = Some(stop);
    }
}
