use crate::{
    assets::image::ImageHandle,
    foundation::{core::palette, error::PibResult, math::Vector2},
    layout::modifier::FontSize,
    render::{canvas::Target, text::TextStyle},
    sections::{Paste, Painter, SectionContext, SectionId, ellipsize},
    snapshot::looks::{character_look, character_star},
};

const EMPTY_ALLY: &str = "assets_en/img/sp/tower/assets/npc/s/3999999999.jpg";
const RING_ICON: &str = "assets_en/img/sp/ui/icon/augment2/icon_augment2_l.png";
const PERFECTION_ICON: &str = "assets_en/img/sp/ui/icon/job/ico_perfection.png";
const NAME_BOX_HEIGHT: i32 = 60;

/// Party row: main character, allies and the main character's subskills.
#[tracing::instrument(name = "party", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let layout = &ctx.layout.party;
    let snapshot = ctx.snapshot;
    let mut painter = Painter::new(ctx, SectionId::Party);

    painter
        .local(
            Target::Base,
            "assets/bg.png",
            layout.background_offset,
            Paste::sized(layout.background_size).over(),
        )
        .await?;

    // main character
    tracing::info!(
        skin = %snapshot.pcjs,
        job = snapshot.p,
        master_level = ?snapshot.cml.as_ref().map(ToString::to_string),
        proof_level = ?snapshot.cbl.as_ref().map(ToString::to_string),
        "main character"
    );
    let pos = layout.start;
    let class_id = ctx
        .classes
        .job_portrait(ctx.cache.fetcher(), &snapshot.pcjs, snapshot.p)
        .await
        .unwrap_or_else(|| snapshot.pcjs.clone());
    let job_icon = format!("assets_en/img/sp/ui/icon/job/{}.png", snapshot.p);
    painter
        .remote(
            Target::Base,
            &format!("assets_en/img/sp/assets/leader/s/{class_id}.jpg"),
            pos,
            Paste::sized(layout.portrait),
        )
        .await?;
    painter
        .remote(Target::Base, &job_icon, pos, Paste::sized(layout.job_icon_size).over())
        .await?;
    if snapshot.cbl.as_ref().is_some_and(|lv| lv.to_string() == "6") {
        painter
            .remote(
                Target::Base,
                PERFECTION_ICON,
                pos + (0.0, layout.job_icon_size.y),
                Paste::sized(layout.job_icon_size).over(),
            )
            .await?;
    }
    if class_id != snapshot.pcjs {
        painter
            .remote(
                Target::Skin,
                &format!("assets_en/img/sp/assets/leader/s/{}.jpg", snapshot.pcjs),
                pos,
                Paste::sized(layout.portrait),
            )
            .await?;
        painter
            .remote(Target::Skin, &job_icon, pos, Paste::sized(layout.job_icon_size).over())
            .await?;
    }

    for i in layout.slots() {
        tokio::task::yield_now().await;
        let pos = layout.portrait_position(i);
        let Some(ally) = snapshot.character(i) else {
            painter
                .remote(Target::Base, EMPTY_ALLY, pos, Paste::sized(layout.portrait))
                .await?;
            continue;
        };
        tracing::info!(
            slot = i + 1,
            id = ally.id,
            name = ally.name,
            level = ally.level,
            uncap = ally.uncap,
            plus = ally.plus,
            ring = ally.ring,
            "ally"
        );

        let cid = character_look(snapshot, &ally);
        painter
            .remote(
                Target::Base,
                &format!("assets_en/img/sp/assets/npc/s/{cid}.jpg"),
                pos,
                Paste::sized(layout.portrait),
            )
            .await?;
        let mut has_skin = false;
        if let Some(shown) = ally.displayed
            && shown != cid
        {
            painter
                .remote(
                    Target::Skin,
                    &format!("assets_en/img/sp/assets/npc/s/{shown}.jpg"),
                    pos,
                    Paste::sized(layout.portrait),
                )
                .await?;
            has_skin = true;
        }
        let badge = Target::shared(has_skin);

        painter
            .local(
                badge,
                character_star(ally.uncap, ally.level),
                pos + layout.star_offset,
                Paste::sized(layout.star_icon_size).over(),
            )
            .await?;
        if ally.ring {
            painter
                .remote(
                    badge,
                    RING_ICON,
                    pos + layout.ring_offset,
                    Paste::sized(layout.ring_icon_size).over(),
                )
                .await?;
        }
        if ally.plus > 0 {
            painter.text(
                badge,
                pos + layout.plus_mark_offset,
                &format!("+{}", ally.plus),
                TextStyle::new(FontSize::Small, palette::PLUS).outlined(6),
            )?;
        }

        if layout.display_name {
            let box_size = Vector2::new(layout.portrait.x, f64::from(NAME_BOX_HEIGHT));
            painter
                .local(
                    Target::Base,
                    "assets/chara_stat.png",
                    pos + (0.0, layout.portrait.y),
                    Paste::sized(box_size).over(),
                )
                .await?;
            painter.text(
                Target::Base,
                pos + layout.name_offset,
                &ellipsize(ally.name, 11, 11, ".."),
                TextStyle::new(FontSize::Mini, palette::WHITE),
            )?;
            painter
                .local(
                    Target::Base,
                    "assets/skill_count_EN.png",
                    pos + (0.0, layout.portrait.y + f64::from(NAME_BOX_HEIGHT)),
                    Paste::sized(box_size).over(),
                )
                .await?;
            let count = ally
                .skill_count
                .map(ToString::to_string)
                .unwrap_or_default();
            painter.text(
                Target::Base,
                pos + layout.bonus_count_offset + (150, 0),
                &count,
                TextStyle::new(FontSize::Medium, palette::WHITE).outlined(4),
            )?;
        }
    }
    tokio::task::yield_now().await;

    // subskills
    painter
        .local(
            Target::Both,
            "assets/subskills.png",
            layout.skill_box_offset,
            Paste::sized(layout.skill_box_size),
        )
        .await?;
    for (line, skill) in snapshot.ps.iter().flatten().enumerate() {
        tracing::info!(line, skill = %skill, "main character subskill");
        let (size, voff) = match skill.chars().count() {
            n if n > 20 => (FontSize::Mini, 5),
            n if n > 15 => (FontSize::Small, 2),
            _ => (FontSize::Medium, 0),
        };
        let offset = layout.skill_line_space * line as i32 + voff;
        painter.text(
            Target::Both,
            layout.skill_text_offset + (0, offset),
            skill,
            TextStyle::new(size, palette::WHITE),
        )?;
    }
    tokio::task::yield_now().await;

    // paladin shield or manadiver familiar
    let accessory = match (&snapshot.cpl, &snapshot.fpl) {
        (Some(shield), _) => Some(format!("assets_en/img/sp/assets/shield/s/{shield}.jpg")),
        (None, Some(familiar)) => Some(format!("assets_en/img/sp/assets/familiar/s/{familiar}.jpg")),
        (None, None) => None,
    };
    if let Some(path) = accessory {
        tracing::info!(%path, "main character accessory");
        painter
            .remote(
                Target::Base,
                &path,
                layout.accessory_offset,
                Paste::sized(layout.accessory_size),
            )
            .await?;
    }

    Ok(painter.finish())
}
