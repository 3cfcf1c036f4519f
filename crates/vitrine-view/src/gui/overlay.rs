use egui::FontId;
use vitrine_view::overlay::OverlayPainter;
use vitrine_view::ui::{Align2, Color32, Point2, Stroke};

/// Replays collected overlay shapes into an egui painter, offset to the viewport rect.
pub struct EguiOverlayPainter<'a> {
    painter: &'a egui::Painter,
    offset: egui::Vec2,
}

impl<'a> EguiOverlayPainter<'a> {
    pub fn new(painter: &'a egui::Painter, offset: egui::Vec2) -> Self {
        Self { painter, offset }
    }
}

impl OverlayPainter for EguiOverlayPainter<'_> {
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        let points = [
            to_egui_pos(start, self.offset),
            to_egui_pos(end, self.offset),
        ];
        let stroke = egui::Stroke::new(stroke.width, to_egui_color(stroke.color));
        self.painter.line_segment(points, stroke);
    }

    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32) {
        let pos = to_egui_pos(pos, self.offset);
        let align = match align {
            Align2::LeftTop => egui::Align2::LEFT_TOP,
            Align2::CenterCenter => egui::Align2::CENTER_CENTER,
        };
        self.painter.text(
            pos,
            align,
            text,
            FontId::proportional(size),
            to_egui_color(color),
        );
    }
}

fn to_egui_pos(pos: Point2, offset: egui::Vec2) -> egui::Pos2 {
    egui::pos2(pos.x + offset.x, pos.y + offset.y)
}

fn to_egui_color(color: Color32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
