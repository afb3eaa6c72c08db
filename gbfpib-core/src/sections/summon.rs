use crate::{
    assets::image::ImageHandle,
    foundation::{core::palette, error::PibResult, math::Vector2},
    layout::{
        modifier::FontSize,
        summon::{FIRST_SUB_SUMMON, SUMMON_SLOTS},
    },
    render::{canvas::Target, text::TextStyle},
    sections::{Paste, Painter, SectionContext, SectionId},
    snapshot::{looks::summon_star, model::Scalar},
};

/// Summon grid plus the summon attack and HP totals.
#[tracing::instrument(name = "summon", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let layout = &ctx.layout.summon;
    let snapshot = ctx.snapshot;
    let mut painter = Painter::new(ctx, SectionId::Summon);

    painter
        .local(
            Target::Base,
            "assets/bg.png",
            layout.background_offset,
            Paste::sized(layout.background_size).over(),
        )
        .await?;

    for i in 0..SUMMON_SLOTS {
        tokio::task::yield_now().await;
        if i == FIRST_SUB_SUMMON {
            painter
                .local(
                    Target::Base,
                    "assets/subsummon_EN.png",
                    layout.sub_marker_offset,
                    Paste::sized(layout.sub_marker_size).over(),
                )
                .await?;
        }
        let pos = layout.portrait_position(i);
        let size = layout.portrait_size(i);
        let (folder, empty_folder) = layout.asset_folder(i);

        let Some(summon) = snapshot.summon(i) else {
            painter
                .remote(
                    Target::Base,
                    &format!("assets_en/img/sp/assets/summon/{empty_folder}/2999999999.jpg"),
                    pos,
                    Paste::sized(size),
                )
                .await?;
            continue;
        };
        tracing::info!(
            slot = i + 1,
            image = summon.image,
            uncap = summon.uncap,
            level = summon.level,
            "summon"
        );
        painter
            .remote(
                Target::Base,
                &format!("assets_en/img/sp/assets/summon/{folder}/{}.jpg", summon.image),
                pos,
                Paste::sized(size),
            )
            .await?;

        let mut has_skin = false;
        if i == 0
            && let Some(skin) = &snapshot.ssm
        {
            painter
                .remote(
                    Target::Skin,
                    &format!("assets_en/img/sp/assets/summon/{folder}/{skin}.jpg"),
                    pos,
                    Paste::sized(size),
                )
                .await?;
            painter
                .local(
                    Target::Skin,
                    "assets/skin.png",
                    pos + layout.skin_icon_offset,
                    Paste::sized(layout.skin_icon_size),
                )
                .await?;
            has_skin = true;
        }
        let badge = Target::shared(has_skin);

        painter
            .local(
                badge,
                summon_star(summon.uncap, summon.level),
                pos,
                Paste::sized(layout.icon_size).over(),
            )
            .await?;
        if snapshot.qs == Some(i as i64) {
            painter
                .local(
                    badge,
                    "assets/quick.png",
                    pos + (0.0, layout.icon_size.y),
                    Paste::sized(layout.icon_size).over(),
                )
                .await?;
        }
        painter
            .local(
                Target::Base,
                "assets/chara_stat.png",
                pos + (0.0, size.y),
                Paste::sized(Vector2::new(size.x, 60.0)).over(),
            )
            .await?;
        painter.text(
            Target::Base,
            pos + (6.0, size.y + 9.0),
            &format!("Lv{}", summon.level),
            TextStyle::new(FontSize::Small, palette::WHITE),
        )?;
        if summon.plus > 0 {
            painter.text(
                badge,
                pos + size + layout.plus_offset,
                &format!("+{}", summon.plus),
                TextStyle::new(FontSize::Medium, palette::PLUS).outlined(6),
            )?;
        }
    }
    tokio::task::yield_now().await;

    // totals
    let spos = layout.stat_offset;
    painter
        .local(
            Target::Base,
            "assets/chara_stat.png",
            spos,
            Paste::sized(layout.stat_size).over(),
        )
        .await?;
    painter
        .local(
            Target::Base,
            "assets/atk.png",
            spos + layout.stat_icon_offset,
            Paste::sized(layout.stat_atk_size).over(),
        )
        .await?;
    painter
        .local(
            Target::Base,
            "assets/hp.png",
            spos + (layout.sub_size.x, 0.0) + layout.stat_icon_offset,
            Paste::sized(layout.stat_hp_size).over(),
        )
        .await?;
    let total = |v: &Option<Scalar>| v.as_ref().map(ToString::to_string).unwrap_or_default();
    let style = TextStyle::new(FontSize::Small, palette::WHITE);
    painter.text(
        Target::Base,
        spos + layout.stat_atk_text_offset,
        &total(&snapshot.satk),
        style,
    )?;
    painter.text(
        Target::Base,
        spos + layout.stat_hp_text_offset,
        &total(&snapshot.shp),
        style,
    )?;

    Ok(painter.finish())
}
