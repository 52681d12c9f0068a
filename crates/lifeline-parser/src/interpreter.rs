//! The script interpreter.
//!
//! [`Interpreter`] executes one [`Command`] per line against a [`Model`],
//! advancing the logical clock on blank lines. Every actor is a small state
//! machine:
//!
//! ```text
//!            start / receive call          call
//!   idle ────────────────────────► active ───────► blocked
//!    ▲                              │  ▲              │
//!    └──── stop / return (last) ────┘  └── receive ───┘
//!                                         return
//! ```
//!
//! Each command is validated completely before the model is touched, so the
//! first rejected line leaves the model exactly as the previous line left it.

use std::collections::HashSet;

use log::{debug, trace};

use lifeline_core::{
    identifier::{ActivityId, ActorId, MessageId},
    semantic::{Endpoint, Message, MessageKind, Model, Tick},
};

use crate::{
    command::Command,
    error::{Diagnostic, ErrorCode, Result},
    lexer::SourceLine,
    span::{Span, Spanned},
};

/// An activity that has not been stopped yet.
#[derive(Debug, Clone, Copy)]
struct OpenActivity {
    id: ActivityId,
    /// The `start` or `receive` that opened it.
    span: Span,
    /// The call whose receipt opened it, if any.
    call: Option<MessageId>,
}

/// Transient per-actor state, only meaningful while interpreting.
#[derive(Debug, Default)]
struct ActorState {
    /// Innermost last.
    open: Vec<OpenActivity>,
    /// The outstanding call this actor waits on.
    blocked_by: Option<MessageId>,
}

static IDLE: ActorState = ActorState {
    open: Vec::new(),
    blocked_by: None,
};

/// Source positions of a message plus, for returns, the call it answers.
#[derive(Debug, Clone, Copy)]
struct MessageTrace {
    sent: Span,
    received: Option<Span>,
    answers: Option<MessageId>,
}

/// Executes script lines and builds the validated [`Model`].
#[derive(Debug)]
pub(crate) struct Interpreter {
    model: Model,
    /// Indexed by [`ActorId`].
    states: Vec<ActorState>,
    /// Indexed by [`MessageId`].
    traces: Vec<MessageTrace>,
    /// Calls that already have their return.
    answered: HashSet<MessageId>,
    time: Tick,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            states: Vec::new(),
            traces: Vec::new(),
            answered: HashSet::new(),
            time: Tick::FIRST,
        }
    }

    /// Execute a single source line.
    pub fn execute_line(&mut self, line: &SourceLine<'_>) -> Result<()> {
        if line.is_blank() {
            self.time = self.time.next();
            trace!(line = line.number(), time = self.time.get(); "Clock advanced");
            return Ok(());
        }

        let command = Command::from_line(line)?;
        trace!(
            line = line.number(),
            command = command.keyword(),
            time = self.time.get();
            "Executing command"
        );

        match command {
            Command::Start { actor } => {
                self.start(actor);
                Ok(())
            }
            Command::Stop { actor } => self.stop(actor),
            Command::Label { actor, text } => {
                let id = self.ensure_actor(*actor);
                self.model.set_label(id, text.into_inner());
                Ok(())
            }
            Command::Send {
                kind,
                sender,
                message,
                text,
            } => self.send(kind, sender, message, text),
            Command::Receive { receiver, message } => self.receive(receiver, message),
        }
    }

    #[cfg(test)]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Run the end-of-input checks and hand out the model.
    pub fn finish(self) -> Result<Model> {
        for (id, actor) in self.model.actors() {
            let open = &self.states[id.index()].open;
            if let Some(innermost) = open.last() {
                let count = open.len();
                let noun = if count == 1 { "activity" } else { "activities" };
                return Err(Diagnostic::error(format!(
                    "actor `{}` has {count} unfinished {noun}",
                    actor.name()
                ))
                .with_code(ErrorCode::E300)
                .with_label(innermost.span, "activity opened here is never stopped")
                .with_help(format!("close it with `stop {}`", actor.name())));
            }
        }

        for (id, message) in self.model.messages() {
            if !message.is_received() {
                return Err(Diagnostic::error(format!(
                    "message `{}` was not received by anyone",
                    message.name()
                ))
                .with_code(ErrorCode::E301)
                .with_label(self.traces[id.index()].sent, "sent here")
                .with_help(format!("add `receive <actor> {}`", message.name())));
            }
        }

        debug!(
            actors = self.model.actor_count(),
            messages = self.traces.len(),
            last_tick = self.time.get();
            "Script validated"
        );
        Ok(self.model)
    }

    fn start(&mut self, actor: Spanned<&str>) {
        let id = self.ensure_actor(*actor);
        self.open_activity(id, actor.span(), None);
    }

    fn stop(&mut self, actor: Spanned<&str>) -> Result<()> {
        if self.state(*actor).open.is_empty() {
            return Err(Diagnostic::error(format!(
                "cannot stop actor `{}`: not active",
                *actor
            ))
            .with_code(ErrorCode::E101)
            .with_label(actor.span(), "has no open activity"));
        }

        let id = self.ensure_actor(*actor);
        self.close_innermost(id);
        Ok(())
    }

    fn send(
        &mut self,
        kind: MessageKind,
        sender: Spanned<&str>,
        message: Spanned<&str>,
        text: Spanned<String>,
    ) -> Result<()> {
        self.check_message_name(kind, sender, message)?;

        let state = self.state(*sender);
        if let Some(call) = state.blocked_by {
            let call_name = self.model.message(call).name();
            return Err(Diagnostic::error(format!(
                "actor `{}` cannot send message `{}` while waiting for response to `{call_name}`",
                *sender, *message
            ))
            .with_code(ErrorCode::E103)
            .with_label(sender.span(), "sender is blocked")
            .with_secondary_label(self.traces[call.index()].sent, "call sent here")
            .with_help(format!("receive the return of `{call_name}` first")));
        }

        if state.open.is_empty() {
            return Err(Diagnostic::error(format!(
                "actor `{}` cannot send message `{}` while not active",
                *sender, *message
            ))
            .with_code(ErrorCode::E100)
            .with_label(sender.span(), "has no open activity")
            .with_help(format!("open an activity with `start {}` first", *sender)));
        }

        let id = self.ensure_actor(*sender);
        let open = &self.states[id.index()].open;
        let layer = open.len() - 1;
        let answers = match kind {
            MessageKind::Return => open.last().and_then(|activity| activity.call),
            MessageKind::Send | MessageKind::Call => None,
        };
        let endpoint = Endpoint::new(id, self.time, layer);
        let message_id = self.model.add_message(Message::new(
            *message,
            kind,
            text.into_inner(),
            endpoint,
        ));
        self.traces.push(MessageTrace {
            sent: message.span(),
            received: None,
            answers,
        });

        match kind {
            MessageKind::Send => {}
            MessageKind::Call => self.states[id.index()].blocked_by = Some(message_id),
            MessageKind::Return => {
                if let Some(call) = answers {
                    self.answered.insert(call);
                }
                self.close_innermost(id);
            }
        }

        Ok(())
    }

    /// Reject reused message names.
    ///
    /// A return may reuse the name of the call it answers: the sender's
    /// innermost activity must have been opened by receiving that call, and
    /// the call must still be unanswered.
    fn check_message_name(
        &self,
        kind: MessageKind,
        sender: Spanned<&str>,
        message: Spanned<&str>,
    ) -> Result<()> {
        let Some(existing) = self.model.message_id(*message) else {
            return Ok(());
        };

        let answers_call = kind == MessageKind::Return
            && !self.answered.contains(&existing)
            && self
                .state(*sender)
                .open
                .last()
                .is_some_and(|activity| activity.call == Some(existing));
        if answers_call {
            return Ok(());
        }

        Err(
            Diagnostic::error(format!("cannot send message `{}` multiple times", *message))
                .with_code(ErrorCode::E102)
                .with_label(message.span(), "duplicate message name")
                .with_secondary_label(self.traces[existing.index()].sent, "first sent here")
                .with_help("message names are one-shot, pick a new name"),
        )
    }

    fn receive(&mut self, receiver: Spanned<&str>, message: Spanned<&str>) -> Result<()> {
        let Some(message_id) = self.model.message_id(*message) else {
            return Err(Diagnostic::error(format!(
                "cannot receive message `{}`: has not been sent yet",
                *message
            ))
            .with_code(ErrorCode::E200)
            .with_label(message.span(), ErrorCode::E200.description()));
        };

        let msg = self.model.message(message_id);
        if let Some(previous) = msg.receiver() {
            let mut diag = Diagnostic::error(format!(
                "message `{}` was already received by actor `{}`",
                *message,
                self.model.actor(previous.actor()).name()
            ))
            .with_code(ErrorCode::E204)
            .with_label(message.span(), "received again here");
            if let Some(first) = self.traces[message_id.index()].received {
                diag = diag.with_secondary_label(first, "first received here");
            }
            return Err(diag);
        }

        let state = self.state(*receiver);
        match state.blocked_by {
            None if msg.kind() == MessageKind::Return => {
                return Err(Diagnostic::error(format!(
                    "actor `{}` cannot receive return message `{}` without having made a call",
                    *receiver, *message
                ))
                .with_code(ErrorCode::E201)
                .with_label(receiver.span(), "has no outstanding call")
                .with_secondary_label(self.traces[message_id.index()].sent, "return sent here"));
            }
            None => {}
            Some(call) => {
                let call_msg = self.model.message(call);
                if msg.kind() != MessageKind::Return {
                    return Err(Diagnostic::error(format!(
                        "actor `{}` cannot receive message `{}` while waiting for response to `{}`",
                        *receiver,
                        *message,
                        call_msg.name()
                    ))
                    .with_code(ErrorCode::E202)
                    .with_label(receiver.span(), "receiver is blocked")
                    .with_secondary_label(self.traces[call.index()].sent, "call sent here")
                    .with_help(format!("receive the return of `{}` first", call_msg.name())));
                }

                let callee = call_msg.receiver().map(|endpoint| endpoint.actor());
                let responder = msg.sender().actor();
                if callee != Some(responder) {
                    let expected = match callee {
                        Some(callee) => {
                            format!("expected actor `{}`", self.model.actor(callee).name())
                        }
                        None => format!("call `{}` has not been received yet", call_msg.name()),
                    };
                    return Err(Diagnostic::error(format!(
                        "actor `{}` cannot receive response to message `{}` from actor `{}` ({expected})",
                        *receiver,
                        call_msg.name(),
                        self.model.actor(responder).name()
                    ))
                    .with_code(ErrorCode::E203)
                    .with_label(message.span(), "return from the wrong actor")
                    .with_secondary_label(self.traces[call.index()].sent, "call sent here"));
                }

                if let Some(other) = self.traces[message_id.index()].answers {
                    if other != call {
                        let other_name = self.model.message(other).name();
                        return Err(Diagnostic::error(format!(
                            "actor `{}` cannot receive message `{}`: it answers `{other_name}`, not `{}`",
                            *receiver,
                            *message,
                            call_msg.name()
                        ))
                        .with_code(ErrorCode::E203)
                        .with_label(message.span(), "return for another call")
                        .with_secondary_label(
                            self.traces[other.index()].sent,
                            "answered call sent here",
                        )
                        .with_secondary_label(self.traces[call.index()].sent, "call sent here"));
                    }
                }
            }
        }

        let opens_activity = msg.kind() == MessageKind::Call;
        if state.open.is_empty() && !opens_activity {
            return Err(Diagnostic::error(format!(
                "actor `{}` cannot receive message `{}` while not active",
                *receiver, *message
            ))
            .with_code(ErrorCode::E100)
            .with_label(receiver.span(), "has no open activity")
            .with_help(format!("open an activity with `start {}` first", *receiver)));
        }

        let id = self.ensure_actor(*receiver);
        if let Some(call) = self.states[id.index()].blocked_by.take() {
            self.answered.insert(call);
        }
        if opens_activity {
            self.open_activity(id, receiver.span(), Some(message_id));
        }

        let layer = self.states[id.index()].open.len() - 1;
        self.model
            .deliver(message_id, Endpoint::new(id, self.time, layer));
        self.traces[message_id.index()].received = Some(message.span());
        Ok(())
    }

    /// Looks up an actor's state without creating the actor.
    fn state(&self, name: &str) -> &ActorState {
        self.model
            .actor_id(name)
            .map_or(&IDLE, |id| &self.states[id.index()])
    }

    fn ensure_actor(&mut self, name: &str) -> ActorId {
        let id = self.model.ensure_actor(name);
        if id.index() == self.states.len() {
            self.states.push(ActorState::default());
        }
        id
    }

    fn open_activity(&mut self, actor: ActorId, span: Span, call: Option<MessageId>) {
        let state = &mut self.states[actor.index()];
        let layer = state.open.len();
        let id = self.model.open_activity(actor, self.time, layer);
        state.open.push(OpenActivity { id, span, call });
    }

    /// Close the innermost open activity of `actor`. No-op if none is open.
    fn close_innermost(&mut self, actor: ActorId) {
        if let Some(activity) = self.states[actor.index()].open.pop() {
            self.model.close_activity(activity.id, self.time);
        }
    }
}
