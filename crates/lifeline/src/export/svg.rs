//! SVG rendering of a [`Layout`].
//!
//! The document contains, in order: the arrowhead marker definitions, one
//! header rectangle, label and dashed lifeline per actor, one white box per
//! activity and one line plus label per message. Activities are drawn after
//! the lifelines so they cover them.

use std::io::Write;

use log::{debug, trace};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use lifeline_core::geometry::Bounds;

use super::{Error, Exporter};
use crate::layout::{ActivityBox, ActorLane, ArrowHead, Layout, MessageArrow};

const STROKE_COLOR: &str = "black";
const FILL_COLOR: &str = "white";
const DASH_PATTERN: &str = "5,5";

/// Writes layouts as SVG documents into any [`Write`] sink.
///
/// # Examples
///
/// ```
/// use lifeline::{
///     DiagramBuilder,
///     export::{Exporter, svg::SvgExporter},
/// };
///
/// let builder = DiagramBuilder::default();
/// let model = builder.parse("start A\nstop A\n").unwrap();
/// let layout = builder.layout(&model);
///
/// let mut exporter = SvgExporter::new(Vec::new());
/// exporter.export_layout(&layout).unwrap();
/// let svg = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug)]
pub struct SvgExporter<W> {
    writer: W,
}

impl<W: Write> SvgExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for SvgExporter<W> {
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error> {
        let document = render_document(layout);
        svg::write(&mut self.writer, &document)?;
        self.writer.flush()?;
        debug!(
            lanes = layout.lanes().len(),
            activities = layout.activities().len(),
            messages = layout.messages().len();
            "SVG document written"
        );
        Ok(())
    }
}

/// Builds the SVG document for `layout`.
pub fn render_document(layout: &Layout) -> Document {
    let size = layout.size();
    let mut document = Document::new()
        .set("width", size.width())
        .set("height", size.height())
        .set(
            "viewBox",
            format!("0 0 {} {}", size.width(), size.height()),
        )
        .add(marker_definitions(layout.arrow_tip_size()));

    for lane in layout.lanes() {
        trace!(actor = lane.label(); "Rendering actor lane");
        document = render_lane(document, lane);
    }
    for activity in layout.activities() {
        document = document.add(render_activity(activity));
    }
    for message in layout.messages() {
        trace!(label = message.label(); "Rendering message");
        document = render_message(document, message);
    }

    document
}

impl ArrowHead {
    /// The id of the SVG marker drawing this head.
    pub fn marker_id(self) -> &'static str {
        match self {
            ArrowHead::Open => "normal",
            ArrowHead::Filled => "filled",
        }
    }
}

fn marker_definitions(tip_size: f32) -> svg_element::Definitions {
    let open = svg_element::Path::new()
        .set("d", "M 0 0 L 10 5 L 0 5 L 10 5 L 0 10")
        .set("fill", "none")
        .set("stroke", STROKE_COLOR);
    let filled = svg_element::Path::new()
        .set("d", "M 0 0 L 10 5 L 0 10 z")
        .set("fill", STROKE_COLOR);

    svg_element::Definitions::new()
        .add(create_marker(ArrowHead::Open, tip_size).add(open))
        .add(create_marker(ArrowHead::Filled, tip_size).add(filled))
}

fn create_marker(head: ArrowHead, tip_size: f32) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", head.marker_id())
        .set("viewBox", "0 0 10 10")
        .set("refX", 1)
        .set("refY", 5)
        .set("markerWidth", tip_size)
        .set("markerHeight", tip_size)
        .set("orient", "auto")
}

fn rectangle(bounds: Bounds) -> svg_element::Rectangle {
    let corner = bounds.min_point();
    svg_element::Rectangle::new()
        .set("x", corner.x())
        .set("y", corner.y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("stroke", STROKE_COLOR)
        .set("fill", FILL_COLOR)
}

fn text(content: &str, x: f32, y: f32, font_size: f32) -> svg_element::Text {
    svg_element::Text::new("")
        .set("x", x)
        .set("y", y)
        .set("font-size", font_size)
        .set("text-anchor", "middle")
        .add(SvgText::new(content))
}

fn render_lane(document: Document, lane: &ActorLane) -> Document {
    let label = lane.label_position();
    let lifeline = svg_element::Line::new()
        .set("x1", lane.lifeline_start().x())
        .set("x2", lane.lifeline_end().x())
        .set("y1", lane.lifeline_start().y())
        .set("y2", lane.lifeline_end().y())
        .set("stroke", STROKE_COLOR)
        .set("stroke-dasharray", DASH_PATTERN);

    document
        .add(rectangle(lane.header()))
        .add(text(lane.label(), label.x(), label.y(), lane.font_size()))
        .add(lifeline)
}

fn render_activity(activity: &ActivityBox) -> svg_element::Rectangle {
    rectangle(activity.bounds())
}

fn render_message(document: Document, message: &MessageArrow) -> Document {
    let mut line = svg_element::Line::new()
        .set("x1", message.start().x())
        .set("x2", message.end().x())
        .set("y1", message.start().y())
        .set("y2", message.end().y())
        .set("stroke", STROKE_COLOR)
        .set("marker-end", format!("url(#{})", message.head().marker_id()));
    if message.is_dashed() {
        line = line.set("stroke-dasharray", DASH_PATTERN);
    }

    let label = message.label_position();
    document
        .add(line)
        .add(text(message.label(), label.x(), label.y(), message.font_size()))
}

#[cfg(test)]
mod tests {
    use lifeline_core::semantic::{Endpoint, Message, MessageKind, Model, Tick};

    use super::*;
    use crate::{config::LayoutConfig, layout::layout};

    fn call_model() -> Model {
        let mut model = Model::new();
        let a = model.ensure_actor("client");
        let b = model.ensure_actor("server");
        let a_act = model.open_activity(a, Tick::new(1), 0);
        let call = model.add_message(Message::new(
            "q",
            MessageKind::Call,
            "fetch <all>",
            Endpoint::new(a, Tick::new(1), 0),
        ));
        let b_act = model.open_activity(b, Tick::new(2), 0);
        model.deliver(call, Endpoint::new(b, Tick::new(2), 0));
        let ret = model.add_message(Message::new(
            "r",
            MessageKind::Return,
            "done",
            Endpoint::new(b, Tick::new(3), 0),
        ));
        model.close_activity(b_act, Tick::new(3));
        model.deliver(ret, Endpoint::new(a, Tick::new(4), 0));
        model.close_activity(a_act, Tick::new(4));
        model
    }

    fn render(model: &Model) -> String {
        render_document(&layout(model, &LayoutConfig::default())).to_string()
    }

    #[test]
    fn test_document_size() {
        let svg = render(&call_model());
        assert!(svg.contains(r#"width="400""#), "{svg}");
        assert!(svg.contains(r#"height="200""#), "{svg}");
        assert!(svg.contains(r#"viewBox="0 0 400 200""#), "{svg}");
    }

    #[test]
    fn test_rectangles_start_at_top_left_corner() {
        let svg = render(&call_model());
        // Header of `client`, centred on x = 100 above the header line.
        assert!(svg.contains(r#"x="50""#), "{svg}");
        assert!(svg.contains(r#"y="30""#), "{svg}");
        // Activity of `client` from tick 1.
        assert!(svg.contains(r#"x="90""#), "{svg}");
        assert!(svg.contains(r#"y="75""#), "{svg}");
    }

    #[test]
    fn test_markers_defined() {
        let svg = render(&call_model());
        assert!(svg.contains(r#"id="normal""#));
        assert!(svg.contains(r#"id="filled""#));
        assert!(svg.contains(r#"markerWidth="10""#));
    }

    #[test]
    fn test_message_markers_and_dashes() {
        let svg = render(&call_model());
        assert!(svg.contains("url(#filled)"));
        assert!(svg.contains("url(#normal)"));
        // Two lifelines and one return.
        assert_eq!(svg.matches(r#"stroke-dasharray="5,5""#).count(), 3);
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = render(&call_model());
        assert!(svg.contains("fetch &lt;all&gt;"), "{svg}");
        assert!(!svg.contains("<all>"));
    }

    #[test]
    fn test_exporter_writes_to_sink() {
        let layout = layout(&call_model(), &LayoutConfig::default());
        let mut exporter = SvgExporter::new(Vec::new());
        exporter.export_layout(&layout).unwrap();

        let written = String::from_utf8(exporter.into_inner()).unwrap();
        assert_eq!(written, render_document(&layout).to_string());
    }

    #[test]
    fn test_marker_ids() {
        assert_eq!(ArrowHead::Open.marker_id(), "normal");
        assert_eq!(ArrowHead::Filled.marker_id(), "filled");
    }
}
