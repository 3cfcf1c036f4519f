use crate::ui::{Align2, Color32, Point2, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    Line {
        start: Point2,
        end: Point2,
        stroke: Stroke,
    },
    Text {
        pos: Point2,
        align: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
}

pub trait OverlayPainter {
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke);
    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32);
}

#[derive(Clone, Debug, Default)]
pub struct OverlayCollector {
    pub shapes: Vec<OverlayShape>,
}

impl OverlayCollector {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn line_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, OverlayShape::Line { .. }))
            .count()
    }

    pub fn replay<P: OverlayPainter>(&self, painter: &mut P) {
        for shape in &self.shapes {
            match shape {
                OverlayShape::Line { start, end, stroke } => {
                    painter.line_segment(*start, *end, *stroke)
                }
                OverlayShape::Text {
                    pos,
                    align,
                    text,
                    size,
                    color,
                } => painter.text(*pos, *align, text.clone(), *size, *color),
            }
        }
    }
}

impl OverlayPainter for OverlayCollector {
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        self.shapes.push(OverlayShape::Line { start, end, stroke });
    }

    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32) {
        self.shapes.push(OverlayShape::Text {
            pos,
            align,
            text,
            size,
            color,
        });
    }
}
