use super::LABEL_FONT_SIZE;
use super::model::ItemViews;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use pie_core::{Canvas, Paint, PieItem, Point, Rect, Sector, ViewTransform};
use std::f64::consts::PI;

/// [`Canvas`] over a cairo context. Core angles run counter-clockwise with
/// the y axis up, so slice angles are negated for cairo.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
    colors: &'a ThemeColors,
    views: &'a ItemViews,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context, colors: &'a ThemeColors, views: &'a ItemViews) -> Self {
        Self { cr, colors, views }
    }

    fn set_color(&self, color: Srgba<f64>, alpha: f64) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a * alpha);
    }

    fn set_paint(&self, paint: Paint, alpha: f64) {
        self.set_color(self.colors.paint(paint), alpha);
    }

    fn draw_icon(&self, pixbuf: &Pixbuf, bounds: Rect, alpha: f64) -> Result<(), cairo::Error> {
        // fit icon into the view bounds
        let scale = (bounds.width() / pixbuf.width() as f64)
            .min(bounds.height() / pixbuf.height() as f64);
        let (iw, ih) = (
            pixbuf.width() as f64 * scale,
            pixbuf.height() as f64 * scale,
        );
        let center = bounds.center();

        self.cr.save()?;
        self.cr.translate(center.x - iw / 2.0, center.y - ih / 2.0);
        self.cr.scale(scale, scale);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint_with_alpha(alpha)?;
        self.cr.restore()
    }

    fn draw_label(&self, text: &str, center: Point, alpha: f64) -> Result<(), cairo::Error> {
        self.set_color(self.colors.label, alpha);
        self.cr
            .select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        self.cr.set_font_size(LABEL_FONT_SIZE);
        let ext = self.cr.text_extents(text)?;
        self.cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y + ext.height() / 2.0,
        );
        self.cr.show_text(text)
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn push_layer(&mut self) -> Result<(), Self::Error> {
        self.cr.push_group();
        Ok(())
    }

    fn pop_layer(&mut self, alpha: f64) -> Result<(), Self::Error> {
        self.cr.pop_group_to_source()?;
        self.cr.paint_with_alpha(alpha)
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        paint: Paint,
    ) -> Result<(), Self::Error> {
        self.set_paint(paint, 1.0);
        self.cr.set_line_width(width);
        self.cr.new_sub_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.stroke()
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        width: f64,
        paint: Paint,
    ) -> Result<(), Self::Error> {
        self.set_paint(paint, 1.0);
        self.cr.set_line_width(width);
        self.cr.new_sub_path();
        self.cr.arc(
            center.x,
            center.y,
            radius,
            start_deg.to_radians(),
            (start_deg + sweep_deg).to_radians(),
        );
        self.cr.stroke()
    }

    fn line(&mut self, from: Point, to: Point, width: f64, paint: Paint) -> Result<(), Self::Error> {
        self.set_paint(paint, 1.0);
        self.cr.set_line_width(width);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }

    fn fill_slice(&mut self, sector: &Sector, paint: Paint, alpha: f64) -> Result<(), Self::Error> {
        let Sector {
            center,
            start,
            sweep,
            inner,
            outer,
        } = *sector;
        self.set_paint(paint, alpha);
        self.cr.new_path();
        self.cr
            .arc_negative(center.x, center.y, outer, -start, -(start + sweep));
        self.cr.arc(center.x, center.y, inner, -(start + sweep), -start);
        self.cr.close_path();
        self.cr.fill()
    }

    fn item_view(&mut self, item: &PieItem, transform: ViewTransform) -> Result<(), Self::Error> {
        let ViewTransform {
            alpha,
            scale,
            pivot,
        } = transform;

        self.cr.save()?;
        self.cr.translate(pivot.x, pivot.y);
        self.cr.scale(scale, scale);
        self.cr.translate(-pivot.x, -pivot.y);

        let bounds = item.bounds();
        let drawn = if let Some(pixbuf) = self.views.icon(item.id()) {
            self.draw_icon(pixbuf, bounds, alpha)
        } else {
            let text = item.label().unwrap_or(item.id().as_str());
            self.draw_label(text, bounds.center(), alpha)
        };
        self.cr.restore()?;
        drawn
    }
}
