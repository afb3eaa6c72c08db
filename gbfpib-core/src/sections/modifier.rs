use crate::{
    assets::image::ImageHandle,
    foundation::{core::palette, error::PibResult, math::Vector2},
    render::{canvas::Target, text::TextStyle},
    sections::{Paste, Painter, SectionContext, SectionId},
};

/// Weapon grid modifier list, one label icon and value per line.
#[tracing::instrument(name = "modifier", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let layout = &ctx.layout.modifier;
    let mods = &ctx.snapshot.mods;
    let mut painter = Painter::new(ctx, SectionId::Modifier);
    tracing::info!(count = mods.len(), density = ?layout.density, "modifiers");
    if mods.is_empty() {
        return Ok(painter.finish());
    }

    let left = layout.origin.x - layout.offset.x;
    painter
        .local(
            Target::Base,
            "assets/mod_bg.png",
            (left, layout.origin.y - (layout.offset.y / 2.0).floor()),
            Paste::sized(layout.background_size),
        )
        .await?;
    let extra_lines = layout.spacer * (mods.len() as i32 - 1);
    if extra_lines > 0 {
        painter
            .local(
                Target::Base,
                "assets/mod_bg_supp.png",
                layout.origin - layout.offset + (0.0, layout.background_size.y),
                Paste::sized((layout.background_size.x, f64::from(extra_lines))),
            )
            .await?;
        painter
            .local(
                Target::Base,
                "assets/mod_bg_bot.png",
                (left, layout.origin.y + f64::from(extra_lines)),
                Paste::sized(layout.background_size),
            )
            .await?;
    } else {
        painter
            .local(
                Target::Base,
                "assets/mod_bg_bot.png",
                (left, layout.origin.y + f64::from(layout.background_bottom_space)),
                Paste::sized(layout.background_size),
            )
            .await?;
    }

    let mut offset = layout.origin;
    let mut icon = Paste::sized(layout.size).over();
    if let Some(crop) = layout.crop {
        icon = icon.cropped(crop);
    }
    for m in mods {
        tokio::task::yield_now().await;
        tracing::debug!(icon = %m.icon_img, value = %m.value, max = m.is_max, "modifier");
        painter
            .remote(
                Target::Base,
                &format!("assets_en/img/sp/ui/icon/weapon_skill_label/{}", m.icon_img),
                offset + layout.image_offset,
                icon,
            )
            .await?;
        let fill = if m.is_max {
            palette::MODIFIER_MAX
        } else {
            palette::WHITE
        };
        painter.text(
            Target::Base,
            offset + layout.text_offset,
            &m.value.to_string(),
            TextStyle::new(layout.font, fill),
        )?;
        offset += Vector2::new(0.0, f64::from(layout.spacer));
    }

    Ok(painter.finish())
}
