use std::sync::Arc;

use crate::{
    assets::image::ImageHandle,
    foundation::{core::palette, error::PibResult, math::Vector2},
    layout::{
        modifier::FontSize,
        panels::{ArtifactLayout, PanelDensity},
    },
    render::{canvas::Target, text::TextStyle},
    sections::{Paste, Painter, SectionContext, SectionId, ellipsize},
    snapshot::{
        looks::character_look,
        records::{ArtifactRecord, ArtifactSkill},
    },
};

/// Artifact panel: portrait, artifact art and skill list for each ally with an imported artifact.
#[tracing::instrument(name = "artifact", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let mut rows: Vec<(String, Arc<ArtifactRecord>)> = Vec::new();
    for ally in ctx.allies() {
        let id = ctx.record_id(&ally);
        let Some(record) = ctx.cache.artifacts().load(&id).await else {
            tracing::info!(slot = ally.index + 1, %id, "no artifact record");
            continue;
        };
        if ctx.snapshot.language().is_japanese() != (record.lang == "ja") {
            tracing::warn!(slot = ally.index + 1, %id, "artifact record language does not match");
        }
        rows.push((character_look(ctx.snapshot, &ally), record));
    }

    let layout = ctx.layout.artifact(rows.len());
    let mut painter = Painter::new(ctx, SectionId::Artifact);
    let mut pos = layout.origin;
    for (look, record) in &rows {
        tokio::task::yield_now().await;
        let Some((art, skills)) = record.equipped() else {
            continue;
        };
        tracing::info!(%look, art, skills = skills.len(), "artifact row");

        painter
            .local(
                Target::Base,
                "assets/bg_emp.png",
                pos + (layout.portrait_size.x, 0.0),
                Paste::sized(layout.background_size).over(),
            )
            .await?;
        painter
            .remote(
                Target::Base,
                &format!("assets_en/img/sp/assets/npc/{}/{look}.jpg", layout.folder),
                pos + layout.portrait_offset,
                Paste::sized(layout.portrait_size),
            )
            .await?;
        if layout.density != PanelDensity::SuperCompact {
            painter
                .remote(
                    Target::Base,
                    &format!("assets_en/img/sp/assets/artifact/{}/{art}", layout.folder),
                    pos + layout.portrait_offset + (0.0, layout.portrait_size.y),
                    Paste::sized(layout.portrait_size),
                )
                .await?;
        }
        for (j, skill) in skills.iter().enumerate() {
            tokio::task::yield_now().await;
            draw_skill(&mut painter, &layout, skill, pos + layout.skill_position(j)).await?;
        }
        pos += Vector2::new(0.0, f64::from(layout.vertical_size));
    }
    Ok(painter.finish())
}

async fn draw_skill(
    painter: &mut Painter<'_>,
    layout: &ArtifactLayout,
    skill: &ArtifactSkill,
    epos: Vector2,
) -> PibResult<()> {
    let style = TextStyle::new(FontSize::Small, palette::WHITE).outlined(6);
    painter
        .remote(
            Target::Base,
            &format!("assets_en/img/sp/ui/icon/bonus/{}", skill.icon),
            epos,
            Paste::sized(layout.skill_offset).over(),
        )
        .await?;
    let text_pos = epos + layout.text_offset;
    painter.text(Target::Base, text_pos, &format!("Lv {}", skill.lvl), style)?;
    painter.text(
        Target::Base,
        text_pos + layout.value_offset,
        &ellipsize(&skill.value, 8, 7, "..."),
        TextStyle::new(FontSize::Small, palette::PLUS).outlined(6),
    )?;
    let limit = layout.text_size_limit;
    painter.text(
        Target::Base,
        text_pos + layout.value_offset + layout.description_offset,
        &ellipsize(&skill.desc.replace(": ", " "), limit, limit, "..."),
        style,
    )?;
    Ok(())
}
