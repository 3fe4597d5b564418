use super::model::PieMenu;
use crate::canvas::{Canvas, Paint, Sector, ViewTransform};
use crate::item::PieItem;
use crate::stage::{Phase, Stage};

/// Draws the visible levels. The top level shows while nothing is open and
/// keeps fading out during a submenu cross-fade.
pub(crate) fn draw<C: Canvas>(
    menu: &PieMenu,
    stage: &Stage,
    canvas: &mut C,
) -> Result<(), C::Error> {
    let xfade = menu.xfade_alpha();
    let fade_in = menu.fade_in_alpha();
    let alpha = xfade.or(fade_in).unwrap_or(1.0);
    // items grow from 90% while fading in
    let scale = fade_in.map_or(1.0, |a| 0.9 + a * 0.1);

    let open = menu.open_item();
    if open.is_none() || xfade.is_some() {
        for item in menu.items() {
            draw_item(canvas, stage, item, alpha, scale)?;
        }
    }
    if let Some(open) = open {
        let alpha = xfade.map_or(1.0, |a| 1.0 - 0.5 * a);
        for child in open.children() {
            draw_item(canvas, stage, child, alpha, scale)?;
        }
    }
    Ok(())
}

fn draw_item<C: Canvas>(
    canvas: &mut C,
    stage: &Stage,
    item: &PieItem,
    alpha: f64,
    scale: f64,
) -> Result<(), C::Error> {
    if stage.phase != Phase::Pie {
        return Ok(());
    }

    if let Some(slice) = item.slice() {
        let paint = if item.is_selected() {
            Paint::Selected
        } else {
            Paint::Normal
        };
        let sector = Sector::from_slice(stage.center, item.geometry().start, slice);
        canvas.fill_slice(&sector, paint, alpha)?;
    }

    canvas.item_view(
        item,
        ViewTransform {
            alpha,
            scale,
            pivot: stage.center,
        },
    )
}
