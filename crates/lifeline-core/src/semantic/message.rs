use std::fmt;

use crate::{identifier::ActorId, semantic::Tick};

/// The three kinds of message a script can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Fire-and-forget, imposes no ordering on the sender.
    Send,
    /// Blocks the sender until the callee answers with a [`MessageKind::Return`].
    Call,
    /// Answers a call and closes the callee's current activity.
    Return,
}

impl MessageKind {
    /// The script keyword that produces this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            MessageKind::Send => "send",
            MessageKind::Call => "call",
            MessageKind::Return => "return",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One end of a message: who, when, and at which activity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    actor: ActorId,
    time: Tick,
    layer: usize,
}

impl Endpoint {
    pub fn new(actor: ActorId, time: Tick, layer: usize) -> Self {
        Self { actor, time, layer }
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn time(&self) -> Tick {
        self.time
    }

    pub fn layer(&self) -> usize {
        self.layer
    }
}

/// A message exchanged between two actors.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    name: String,
    kind: MessageKind,
    label: String,
    sender: Endpoint,
    receiver: Option<Endpoint>,
}

impl Message {
    /// Creates a message that has been sent but not yet received.
    pub fn new(
        name: impl Into<String>,
        kind: MessageKind,
        label: impl Into<String>,
        sender: Endpoint,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            sender,
            receiver: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sender(&self) -> Endpoint {
        self.sender
    }

    /// The receiving end, or `None` if nobody has received the message yet.
    pub fn receiver(&self) -> Option<Endpoint> {
        self.receiver
    }

    pub fn is_received(&self) -> bool {
        self.receiver.is_some()
    }

    pub(crate) fn deliver(&mut self, receiver: Endpoint) {
        self.receiver = Some(receiver);
    }
}
