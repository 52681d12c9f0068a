//! Layout engine for validated sequence models.
//!
//! [`layout`] maps a [`Model`] onto a grid: every actor owns a vertical
//! swimlane of [`LayoutConfig::swimlane_width`], every tick of the logical
//! clock moves [`LayoutConfig::swimlane_step`] downward below the header
//! band.
//!
//! ```text
//!          slot 0            slot 1
//!     ┌─────────────┬─────────────────┐
//!     │   [ A ]     │     [ B ]       │  header
//!     ├─────────────┼─────────────────┤  ← header_height
//!     │    ┌┴┐ ──── label ──►┌┴┐      │  tick 1
//!     │    │ │      │        │ │      │  tick 2
//!     │    └┬┘      │        └┬┘      │
//! ```
//!
//! The computation is a pure function of its inputs.

use log::debug;

use lifeline_core::{
    geometry::{Bounds, Point, Size},
    identifier::ActorId,
    semantic::{MessageKind, Model, Tick},
};

use crate::config::LayoutConfig;

/// Which way a message arrow points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    /// Sender slot precedes the receiver slot.
    Right,
    /// Receiver slot precedes the sender slot, or both are the same actor.
    Left,
}

/// Arrowhead marker drawn at the end of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    /// Open head for sends and returns.
    Open,
    /// Filled head for calls.
    Filled,
}

impl ArrowHead {
    fn for_kind(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Call => Self::Filled,
            MessageKind::Send | MessageKind::Return => Self::Open,
        }
    }
}

/// Header box, label and lifeline of one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorLane {
    actor: ActorId,
    label: String,
    header: Bounds,
    label_position: Point,
    font_size: f32,
    lifeline_start: Point,
    lifeline_end: Point,
}

impl ActorLane {
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// The display label shown in the header.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn header(&self) -> Bounds {
        self.header
    }

    /// Anchor of the centred header label.
    pub fn label_position(&self) -> Point {
        self.label_position
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn lifeline_start(&self) -> Point {
        self.lifeline_start
    }

    pub fn lifeline_end(&self) -> Point {
        self.lifeline_end
    }
}

/// A positioned activity rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityBox {
    actor: ActorId,
    layer: usize,
    bounds: Bounds,
}

impl ActivityBox {
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A positioned message line with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageArrow {
    kind: MessageKind,
    label: String,
    start: Point,
    end: Point,
    direction: ArrowDirection,
    label_position: Point,
    font_size: f32,
}

impl MessageArrow {
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// End of the line, where the arrowhead marker attaches.
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn head(&self) -> ArrowHead {
        ArrowHead::for_kind(self.kind)
    }

    /// Returns are drawn dashed.
    pub fn is_dashed(&self) -> bool {
        self.kind == MessageKind::Return
    }

    /// Anchor of the centred message label.
    pub fn label_position(&self) -> Point {
        self.label_position
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

/// The positioned content of a whole diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    size: Size,
    arrow_tip_size: f32,
    lanes: Vec<ActorLane>,
    activities: Vec<ActivityBox>,
    messages: Vec<MessageArrow>,
}

impl Layout {
    /// Canvas size of the diagram.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size of the arrowhead markers.
    pub fn arrow_tip_size(&self) -> f32 {
        self.arrow_tip_size
    }

    /// Actor lanes in display order.
    pub fn lanes(&self) -> &[ActorLane] {
        &self.lanes
    }

    /// Activity boxes in the order they were opened.
    pub fn activities(&self) -> &[ActivityBox] {
        &self.activities
    }

    /// Message arrows in send order.
    pub fn messages(&self) -> &[MessageArrow] {
        &self.messages
    }
}

/// Helper holding the grid arithmetic shared by all elements.
struct Grid<'a> {
    config: &'a LayoutConfig,
}

impl Grid<'_> {
    /// Centre x of an actor's slot.
    fn slot_center(&self, actor: ActorId) -> f32 {
        actor.index() as f32 * self.config.swimlane_width() + self.config.swimlane_width() / 2.0
    }

    /// Centre x of something nested `layer` activities deep.
    fn layered_x(&self, actor: ActorId, layer: usize) -> f32 {
        self.slot_center(actor) + layer as f32 * self.config.activity_offset()
    }

    fn y(&self, tick: Tick) -> f32 {
        self.config.header_height() + self.config.swimlane_step() * tick.get() as f32
    }
}

/// Compute the positions of every element of `model`.
///
/// `model` must come out of the interpreter: every activity is closed and
/// every message received. Open activities are drawn as zero-height boxes
/// and messages without a receiver are skipped.
pub fn layout(model: &Model, config: &LayoutConfig) -> Layout {
    let grid = Grid { config };

    let max_time = model
        .activities()
        .filter_map(|(_, activity)| activity.stop())
        .map(Tick::get)
        .max()
        .unwrap_or(0);

    let size = Size::new(
        model.actor_count() as f32 * config.swimlane_width(),
        config.header_height() + config.swimlane_step() * (max_time + 2) as f32,
    );

    let lifeline_end_y =
        config.header_height() + config.swimlane_step() * (max_time + 1) as f32;
    let lanes = model
        .actors()
        .map(|(id, actor)| {
            let x = grid.slot_center(id);
            let header_center = Point::new(
                x,
                config.header_height() - config.label_height() / 2.0,
            );
            let lifeline_start = Point::new(x, config.header_height());
            ActorLane {
                actor: id,
                label: actor.label().to_string(),
                header: Bounds::new_from_center(
                    header_center,
                    Size::new(config.label_width(), config.label_height()),
                ),
                label_position: header_center
                    .with_y(config.header_height() - 0.25 * config.label_height()),
                font_size: 0.7 * config.label_height(),
                lifeline_start,
                lifeline_end: lifeline_start.with_y(lifeline_end_y),
            }
        })
        .collect();

    let activities = model
        .activities()
        .map(|(_, activity)| {
            let x = grid.layered_x(activity.actor(), activity.layer());
            let y_start = grid.y(activity.start());
            let y_stop = grid.y(activity.stop().unwrap_or(activity.start()));
            let top_left = Point::new(x - config.activity_width() / 2.0, y_start);
            ActivityBox {
                actor: activity.actor(),
                layer: activity.layer(),
                bounds: top_left.to_bounds(Size::new(config.activity_width(), y_stop - y_start)),
            }
        })
        .collect();

    let messages = model
        .messages()
        .filter_map(|(_, message)| {
            let sender = message.sender();
            let receiver = message.receiver()?;
            let half_activity = config.activity_width() / 2.0;
            let sender_slot = sender.actor().index() as f32 * config.swimlane_width();

            let mut start = Point::new(
                grid.layered_x(sender.actor(), sender.layer()),
                grid.y(sender.time()),
            );
            let mut end = Point::new(
                grid.layered_x(receiver.actor(), receiver.layer()),
                grid.y(receiver.time()),
            );

            let (direction, label_x) = if sender.actor() < receiver.actor() {
                start = start.add_point(Point::new(half_activity, 0.0));
                end = end.add_point(Point::new(-(half_activity + config.arrow_tip_size()), 0.0));
                (ArrowDirection::Right, sender_slot + config.swimlane_width())
            } else {
                start = start.add_point(Point::new(-half_activity, 0.0));
                end = end.add_point(Point::new(half_activity + config.arrow_tip_size(), 0.0));
                (ArrowDirection::Left, sender_slot)
            };

            Some(MessageArrow {
                kind: message.kind(),
                label: message.label().to_string(),
                start,
                end,
                direction,
                label_position: Point::new(label_x, start.y() - config.message_baseline_offset()),
                font_size: config.message_font_size(),
            })
        })
        .collect();

    let layout = Layout {
        size,
        arrow_tip_size: config.arrow_tip_size(),
        lanes,
        activities,
        messages,
    };
    debug!(
        width = layout.size.width(),
        height = layout.size.height(),
        max_time;
        "Layout computed"
    );
    layout
}
