use super::{DIAL_ARC_DEG, FocusRing};
use crate::canvas::{Canvas, Paint};
use crate::geometry::{Point, cartesian_offset};
use crate::stage::Stage;

pub(crate) fn draw<C: Canvas>(
    ring: &FocusRing,
    stage: &Stage,
    canvas: &mut C,
) -> Result<(), C::Error> {
    if ring.is_blocked() {
        return Ok(());
    }

    let center = ring.focus_point();
    canvas.stroke_circle(center, ring.circle_size(), ring.outer_stroke(), Paint::Focus)?;

    let paint = ring.tint(stage).paint();
    let dial = ring.dial_angle();
    let radius = ring.dial().width() / 2.0;
    for start in [dial, dial + 180] {
        canvas.stroke_arc(
            center,
            radius,
            f64::from(start),
            DIAL_ARC_DEG,
            ring.inner_stroke(),
            paint,
        )?;
    }

    for angle in [dial, dial + 45, dial + 180, dial + 225] {
        tick(canvas, ring, center, angle, paint)?;
    }
    Ok(())
}

fn tick<C: Canvas>(
    canvas: &mut C,
    ring: &FocusRing,
    center: Point,
    angle: i32,
    paint: Paint,
) -> Result<(), C::Error> {
    let inner = ring.circle_size() - ring.inner_offset();
    let a = cartesian_offset(angle, inner);
    let b = cartesian_offset(angle, inner + ring.inner_offset() / 3.0);
    canvas.line(
        Point::new(center.x + a.x, center.y + a.y),
        Point::new(center.x + b.x, center.y + b.y),
        ring.inner_stroke(),
        paint,
    )
}
