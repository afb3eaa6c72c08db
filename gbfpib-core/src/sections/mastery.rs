//! Extended mastery panel: one row per ally whose mastery record was imported.

use std::sync::Arc;

use crate::{
    assets::image::ImageHandle,
    foundation::{
        core::{CANVAS_SIZE, palette},
        error::PibResult,
        math::Vector2,
    },
    layout::{
        modifier::FontSize,
        panels::{MasteryLayout, PanelDensity},
    },
    render::{canvas::Target, text::TextStyle},
    sections::{Paste, Painter, SectionContext, SectionId},
    snapshot::{
        looks::character_look,
        model::CharacterSlot,
        records::{MasteryRecord, UpgradeTrack},
    },
};

const RING_ICON: &str = "assets_en/img/sp/ui/icon/augment2/icon_augment2_l.png";
const LOCKED_SLOT: &str = "assets_en/img/sp/zenith/assets/ability/lock.png";

struct Row<'a> {
    ally: CharacterSlot<'a>,
    look: String,
    record: Arc<MasteryRecord>,
}

#[tracing::instrument(name = "mastery", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let mut rows = Vec::new();
    for ally in ctx.allies() {
        let id = ctx.record_id(&ally);
        let Some(record) = ctx.cache.mastery().load(&id).await else {
            tracing::info!(slot = ally.index + 1, %id, "no mastery record");
            continue;
        };
        if ctx.snapshot.language().is_japanese() != (record.lang == "ja") {
            tracing::warn!(slot = ally.index + 1, %id, "mastery record language does not match");
        }
        rows.push(Row {
            look: character_look(ctx.snapshot, &ally),
            ally,
            record,
        });
    }

    let layout = ctx.layout.mastery(rows.len());
    let mut painter = Painter::new(ctx, SectionId::Mastery);
    let step = Vector2::new(0.0, layout.portrait_size.y + f64::from(layout.shift));
    let mut pos = layout.origin + (0.0, layout.origin.y) - step;
    for row in &rows {
        tokio::task::yield_now().await;
        pos += step;
        draw_row(&mut painter, &layout, row, pos).await?;
    }
    Ok(painter.finish())
}

async fn draw_row(
    painter: &mut Painter<'_>,
    layout: &MasteryLayout,
    row: &Row<'_>,
    pos: Vector2,
) -> PibResult<()> {
    let Row { ally, look, record } = row;
    let emp_count = record.emp.len();
    tracing::info!(
        slot = ally.index + 1,
        emp = emp_count,
        rings = record.ring.len(),
        awakening = ?record.awakening_level(),
        "mastery row"
    );

    painter
        .remote(
            Target::Base,
            &format!("assets_en/img/sp/assets/npc/{}/{look}.jpg", layout.folder),
            pos,
            Paste::sized(layout.portrait_size),
        )
        .await?;
    if ally.ring {
        painter
            .remote(
                Target::Base,
                RING_ICON,
                pos + layout.ring_offset,
                Paste::sized(layout.ring_size).over(),
            )
            .await?;
    }
    painter.text(
        Target::Base,
        pos + layout.level_offset,
        &format!("Lv{}", ally.level),
        TextStyle::new(FontSize::Small, palette::WHITE).outlined(6),
    )?;
    if ally.plus > 0 {
        painter.text(
            Target::Base,
            pos + layout.plus_offset,
            &format!("+{}", ally.plus),
            TextStyle::new(FontSize::Small, palette::PLUS).outlined(6),
        )?;
    }
    painter
        .local(
            Target::Base,
            "assets/bg_emp.png",
            pos + (layout.portrait_size.x, 0.0),
            Paste::sized(layout.background_size).over(),
        )
        .await?;

    // mastery grid
    let compact = layout.density.is_compact();
    let size = layout.emp_size[usize::from(record.is_transcended())];
    let level_size = if compact && record.is_transcended() {
        FontSize::Medium
    } else {
        FontSize::Big
    };
    let mut epos = pos;
    for (j, slot) in record.emp.iter().enumerate() {
        tokio::task::yield_now().await;
        epos = if compact {
            pos + (layout.portrait_size.x + 15.0 + size.x * j as f64, 5.0)
        } else if j % 5 == 0 {
            pos + (
                layout.portrait_size.x + 15.0 + layout.eternal_shift_for(emp_count),
                7.0 + (size.y * j as f64 / 5.0).floor(),
            )
        } else {
            epos + (size.x, 0.0)
        };
        if slot.is_lock {
            painter
                .remote(Target::Base, LOCKED_SLOT, epos, Paste::sized(size))
                .await?;
            continue;
        }
        let image = slot.image.as_deref().unwrap_or_default();
        painter
            .remote(
                Target::Base,
                &format!("assets_en/img/sp/zenith/assets/ability/{image}.png"),
                epos,
                Paste::sized(size),
            )
            .await?;
        match slot.level_text() {
            Some(level) => painter.text(
                Target::Base,
                epos + layout.emp_ring_offset,
                &level,
                TextStyle::new(level_size, palette::MASTERY_LEVEL).outlined(6),
            )?,
            None => {
                painter
                    .local(
                        Target::Base,
                        "assets/emp_unused.png",
                        epos,
                        Paste::sized(size).over(),
                    )
                    .await?;
            }
        }
    }

    // over mastery rings
    for (j, ring) in record.ring.iter().enumerate() {
        tokio::task::yield_now().await;
        let rpos = pos + layout.ring_position(j, emp_count);
        painter
            .local(
                Target::Base,
                &format!("assets/{}.png", ring.kind.image),
                rpos,
                Paste::sized(layout.emp_ring_size).over(),
            )
            .await?;
        let value = ring.param.disp_total_param.to_string();
        let (text, font) = if compact {
            (value, FontSize::Small)
        } else {
            (format!("{} {value}", ring.kind.name), FontSize::Medium)
        };
        painter.text(
            Target::Base,
            rpos + layout.emp_text_offset,
            &text,
            TextStyle::new(font, palette::PLUS).outlined(6),
        )?;
    }

    if layout.density == PanelDensity::SuperCompact {
        // only the awakening badge fits, over the portrait's corner
        if record.awakening.is_some()
            && let Some(icon) = record.awakening_kind().remote_icon()
        {
            painter
                .remote(
                    Target::Base,
                    icon,
                    pos + (layout.portrait_size.x - layout.awk_size.x, 0.0),
                    Paste::sized(layout.awk_size),
                )
                .await?;
        }
        return Ok(());
    }
    tokio::task::yield_now().await;
    draw_upgrades(painter, layout, record, pos).await
}

/// Awakening level and domain/saint/radiance upgrades at the end of a row.
async fn draw_upgrades(
    painter: &mut Painter<'_>,
    layout: &MasteryLayout,
    record: &MasteryRecord,
    pos: Vector2,
) -> PibResult<()> {
    let compact = layout.density.is_compact();
    let (awakening_pos, mut upgrade_pos) = if compact {
        let y = pos.y + layout.portrait_size.y;
        (
            Vector2::new(pos.x + layout.portrait_size.x + 25.0, y),
            Vector2::new(pos.x + layout.portrait_size.x + 225.0, y),
        )
    } else {
        let x = CANVAS_SIZE.x - 420.0;
        (Vector2::new(x, pos.y + 20.0), Vector2::new(x, pos.y + 85.0))
    };

    if let Some(level) = record.awakening_level() {
        let icon = Paste::sized(layout.awk_size).over();
        match record.awakening_kind().remote_icon() {
            Some(remote) => {
                painter
                    .remote(Target::Base, remote, awakening_pos, icon)
                    .await?
            }
            None => {
                painter
                    .local(Target::Base, "assets/bal_awakening.png", awakening_pos, icon)
                    .await?
            }
        }
        painter.text(
            Target::Base,
            awakening_pos + (75, 10),
            &format!("Lv{level}"),
            TextStyle::new(FontSize::Medium, palette::AWAKENING).outlined(6),
        )?;
    }

    let mut icon_index = 1;
    for upgrade in record.upgrades() {
        painter
            .remote(
                Target::Base,
                upgrade.icon,
                upgrade_pos,
                Paste::sized(layout.awk_size),
            )
            .await?;
        let color = match upgrade.track {
            UpgradeTrack::Domain => palette::DOMAIN,
            UpgradeTrack::Saint => palette::SAINT,
            UpgradeTrack::Extra => palette::RADIANCE,
        };
        painter.text(
            Target::Base,
            upgrade_pos + layout.domain_offset,
            &upgrade.text,
            TextStyle::new(FontSize::Medium, color).outlined(6),
        )?;
        icon_index += 1;
        let shift = f64::from(layout.emp_text_shift);
        upgrade_pos += if compact {
            Vector2::new(shift, 0.0)
        } else if icon_index % 2 == 0 {
            Vector2::new(shift, -layout.awk_size.y)
        } else {
            Vector2::new(0.0, layout.awk_size.y)
        };
    }
    Ok(())
}
