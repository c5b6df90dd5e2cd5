use std::collections::BTreeMap;
use std::f32::consts::TAU;

use fastaflow_core::stats;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Rectangle, Text};
use svg::Document;

const W: f32 = 900.0;
const H: f32 = 560.0;
const MARGIN: f32 = 70.0;
const TOP: f32 = 60.0;

const PALETTE: [&str; 12] = [
    "#5b9cf5", "#2dd4a8", "#ef6b6b", "#f0b429", "#a78bfa", "#f472b6",
    "#67e8f9", "#34d399", "#fb7185", "#60a5fa", "#fbbf24", "#94a3b8",
];

/// A rendered chart: a self-contained SVG document ready to embed.
/// Further encoding (data URI, rasterization) is the consumer's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub title: String,
    pub svg: String,
}

fn slice_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn base_document(title: &str) -> Document {
    Document::new()
        .set("viewBox", (0, 0, W, H))
        .set("width", W)
        .set("height", H)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", H)
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new(title)
                .set("x", W / 2.0)
                .set("y", 32)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 18)
                .set("fill", "#111111"),
        )
}

fn axis_label(content: &str, x: f32, y: f32, anchor: &str) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 12)
        .set("fill", "#444444")
}

fn polar(cx: f32, cy: f32, r: f32, angle: f32) -> (f32, f32) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Proportional pie of a frequency table (nucleotide distribution).
/// Slice angles are normalized over the table's sum, so independently
/// rounded percentages still close the circle. An empty table renders
/// only the title.
pub fn pie_chart(title: &str, freq: &BTreeMap<char, f64>) -> RenderedChart {
    let mut doc = base_document(title);
    let cx = W * 0.5;
    let cy = H * 0.55;
    let r = H.min(W) * 0.3;

    let total: f64 = freq.values().sum();
    if total > 0.0 {
        if freq.len() == 1 {
            // A single entry is the whole disc; an arc from a point to
            // itself would render nothing.
            let (label, value) = freq.iter().next().map(|(k, v)| (*k, *v)).unwrap_or(('?', 0.0));
            doc = doc.add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", r)
                    .set("fill", slice_color(0))
                    .set("stroke", "#ffffff")
                    .set("stroke-width", 1),
            );
            doc = doc.add(axis_label(&format!("{label} {value:.1}%"), cx, cy, "middle"));
        } else {
            let mut angle = -TAU / 4.0;
            for (i, (label, value)) in freq.iter().enumerate() {
                let sweep = (value / total) as f32 * TAU;
                let (x1, y1) = polar(cx, cy, r, angle);
                let (x2, y2) = polar(cx, cy, r, angle + sweep);
                let large_arc = if sweep > TAU / 2.0 { 1.0 } else { 0.0 };
                let data = Data::new()
                    .move_to((cx, cy))
                    .line_to((x1, y1))
                    .elliptical_arc_to((r, r, 0.0, large_arc, 1.0, x2, y2))
                    .close();
                doc = doc.add(
                    Path::new()
                        .set("d", data)
                        .set("fill", slice_color(i))
                        .set("stroke", "#ffffff")
                        .set("stroke-width", 1),
                );

                let mid = angle + sweep / 2.0;
                let (tx, ty) = polar(cx, cy, r * 1.18, mid);
                doc = doc.add(axis_label(&format!("{label} {value:.1}%"), tx, ty, "middle"));
                angle += sweep;
            }
        }
    }

    RenderedChart {
        title: title.to_string(),
        svg: doc.to_string(),
    }
}

/// One bar per table entry (amino-acid distribution) against a percent
/// y-axis scaled to the largest value.
pub fn bar_chart(title: &str, freq: &BTreeMap<char, f64>) -> RenderedChart {
    let mut doc = base_document(title);
    let left = MARGIN;
    let right = W - MARGIN;
    let bottom = H - MARGIN;

    let y_max = freq.values().cloned().fold(0.0_f64, f64::max).max(1.0);

    // Gridlines and tick values.
    for tick in 0..=4 {
        let value = y_max * tick as f64 / 4.0;
        let y = bottom - (tick as f32 / 4.0) * (bottom - TOP);
        if tick > 0 {
            doc = doc.add(
                Line::new()
                    .set("x1", left)
                    .set("y1", y)
                    .set("x2", right)
                    .set("y2", y)
                    .set("stroke", "#dddddd")
                    .set("stroke-width", 1),
            );
        }
        doc = doc.add(axis_label(&format!("{value:.1}"), left - 8.0, y + 4.0, "end"));
    }

    if !freq.is_empty() {
        let slot = (right - left) / freq.len() as f32;
        let bar_w = slot * 0.6;
        for (i, (label, value)) in freq.iter().enumerate() {
            let x = left + slot * i as f32 + (slot - bar_w) / 2.0;
            let bar_h = ((value / y_max) as f32) * (bottom - TOP);
            doc = doc.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", bottom - bar_h)
                    .set("width", bar_w)
                    .set("height", bar_h)
                    .set("fill", slice_color(i)),
            );
            doc = doc.add(axis_label(
                &label.to_string(),
                x + bar_w / 2.0,
                bottom + 18.0,
                "middle",
            ));
        }
    }

    doc = doc
        .add(
            Line::new()
                .set("x1", left)
                .set("y1", bottom)
                .set("x2", right)
                .set("y2", bottom)
                .set("stroke", "#000000")
                .set("stroke-width", 2),
        )
        .add(
            Line::new()
                .set("x1", left)
                .set("y1", TOP)
                .set("x2", left)
                .set("y2", bottom)
                .set("stroke", "#000000")
                .set("stroke-width", 2),
        )
        .add(axis_label("Frequency (%)", left, TOP - 12.0, "start"))
        .add(axis_label("Amino acid", (left + right) / 2.0, H - 24.0, "middle"));

    RenderedChart {
        title: title.to_string(),
        svg: doc.to_string(),
    }
}

/// Cumulative GC percentage by sequence position, drawn from the
/// running prefix series. The y-axis is fixed to 0-100 percent.
pub fn gc_line_chart(title: &str, sequence: &str) -> RenderedChart {
    let series = stats::gc_running(sequence);
    let mut doc = base_document(title);
    let left = MARGIN;
    let right = W - MARGIN;
    let bottom = H - MARGIN;

    for tick in 0..=4 {
        let value = 100.0 * tick as f32 / 4.0;
        let y = bottom - (tick as f32 / 4.0) * (bottom - TOP);
        if tick > 0 {
            doc = doc.add(
                Line::new()
                    .set("x1", left)
                    .set("y1", y)
                    .set("x2", right)
                    .set("y2", y)
                    .set("stroke", "#dddddd")
                    .set("stroke-width", 1),
            );
        }
        doc = doc.add(axis_label(&format!("{value:.0}"), left - 8.0, y + 4.0, "end"));
    }

    if !series.is_empty() {
        let denom = series.len().saturating_sub(1).max(1) as f32;
        let mut data = Data::new();
        for (i, value) in series.iter().enumerate() {
            let x = left + (right - left) * i as f32 / denom;
            let y = bottom - (*value as f32 / 100.0) * (bottom - TOP);
            data = if i == 0 {
                data.move_to((x, y))
            } else {
                data.line_to((x, y))
            };
        }
        doc = doc.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", PALETTE[0])
                .set("stroke-width", 2),
        );
    }

    doc = doc
        .add(
            Line::new()
                .set("x1", left)
                .set("y1", bottom)
                .set("x2", right)
                .set("y2", bottom)
                .set("stroke", "#000000")
                .set("stroke-width", 2),
        )
        .add(
            Line::new()
                .set("x1", left)
                .set("y1", TOP)
                .set("x2", left)
                .set("y2", bottom)
                .set("stroke", "#000000")
                .set("stroke-width", 2),
        )
        .add(axis_label("GC content (%)", left, TOP - 12.0, "start"))
        .add(axis_label(
            "Position in sequence",
            (left + right) / 2.0,
            H - 24.0,
            "middle",
        ));

    RenderedChart {
        title: title.to_string(),
        svg: doc.to_string(),
    }
}
