use crate::{
    assets::image::ImageHandle,
    foundation::{
        core::{Language, VERSION, palette},
        error::{PibError, PibResult},
        math::{Vector2, v2},
    },
    layout::{
        modifier::FontSize,
        weapon::{FIRST_SANDBOX_SLOT, WeaponLayout},
    },
    render::{canvas::Target, text::TextStyle},
    sections::{
        Paste, Painter, SectionContext, SectionId, ellipsize, skill_rules::HIDDEN_SKILL_ICON,
    },
    snapshot::model::{Scalar, SupportSummon, WeaponSlot},
};

/// Classes wielding two weapons: both get a frame and the second may carry a skin.
pub const AUXILIARY_CLASSES: [i64; 6] = [100401, 300301, 300201, 120401, 140401, 180401];

const WATERMARK_POSITION: Vector2 = v2(1540, 2125);
const ESTIMATE_LABEL_JA: &str = "予測ダメ一ジ";

/// Weapon grid, grid totals, estimated damage and the optional HP gauge.
#[tracing::instrument(name = "weapon", skip_all)]
pub(crate) async fn draw(ctx: SectionContext<'_>) -> PibResult<Vec<ImageHandle>> {
    let layout = &ctx.layout.weapon;
    let snapshot = ctx.snapshot;
    let mut painter = Painter::new(ctx, SectionId::Weapon);

    painter.text(
        Target::Both,
        WATERMARK_POSITION,
        &format!("GBFPIB {VERSION}"),
        TextStyle::new(FontSize::Mini, palette::WATERMARK),
    )?;
    painter
        .local(
            Target::Base,
            "assets/grid_bg.png",
            layout.background_offset,
            Paste::sized(layout.background_size).over(),
        )
        .await?;
    if layout.extra {
        painter
            .local(
                Target::Base,
                "assets/grid_bg_extra.png",
                layout.extra_grid_icon_offset,
                Paste::sized(layout.extra_grid_icon_size).over(),
            )
            .await?;
    }

    let dual_wield = AUXILIARY_CLASSES.contains(&snapshot.p);
    for i in 0..snapshot.w.len() {
        tokio::task::yield_now().await;
        draw_slot(&ctx, &mut painter, i, dual_wield).await?;
    }

    let last = snapshot.w.len().saturating_sub(1);
    let last_size = layout.portrait_size(last);
    if layout.extra {
        let sandbox = Vector2::new(
            layout.portrait_position(last).x,
            layout.origin.y + (f64::from(layout.skill_box_height) + layout.sub_size.y) * 3.0,
        );
        let height = (66.0 * last_size.x / 159.0).trunc();
        painter
            .local(
                Target::Base,
                "assets/sandbox.png",
                sandbox,
                Paste::sized((last_size.x, height)).over(),
            )
            .await?;
    }

    let pos = draw_totals(&ctx, &mut painter).await?;
    tokio::task::yield_now().await;

    let pos = pos + (layout.mainhand_size.x, 0.0) + layout.estimated_damage_position;
    draw_support(&ctx, &mut painter, pos).await?;
    let est_width = (last_size.x * 3.0 / 2.0).floor();
    draw_estimates(&ctx, &mut painter, pos, est_width).await?;
    if ctx.show_hp {
        tokio::task::yield_now().await;
        draw_hp_gauge(&ctx, &mut painter, pos, est_width).await?;
    }

    Ok(painter.finish())
}

async fn draw_slot(
    ctx: &SectionContext<'_>,
    painter: &mut Painter<'_>,
    i: usize,
    dual_wield: bool,
) -> PibResult<()> {
    let layout = &ctx.layout.weapon;
    let kind = if i == 0 { "ls" } else { "m" };
    let pos = layout.portrait_position(i);
    let size = layout.portrait_size(i);

    if i <= 1 && dual_wield {
        let frame = if i == 0 { "assets/mh_dual.png" } else { "assets/aux_dual.png" };
        painter
            .local(
                Target::Base,
                frame,
                pos + layout.auxiliary_offset,
                Paste::sized(size + layout.auxiliary_size).over(),
            )
            .await?;
    }

    let Some(weapon) = ctx.snapshot.weapon(i) else {
        if i >= FIRST_SANDBOX_SLOT {
            painter
                .local(Target::Base, "assets/arca_slot.png", pos, Paste::sized(size))
                .await?;
        } else {
            painter
                .remote(
                    Target::Base,
                    &format!("assets_en/img/sp/assets/weapon/{kind}/1999999999.jpg"),
                    pos,
                    Paste::sized(size),
                )
                .await?;
        }
        return Ok(());
    };
    let (ax, awakened) = (weapon.has_ax(), weapon.has_awakening());
    tracing::info!(slot = i + 1, image = weapon.image, ax, awakened, "weapon");

    let icon = layout.skill_icon_size;
    let mut shift = if ax && awakened { -icon.y } else { 0.0 };
    painter
        .remote(
            Target::Base,
            &format!("assets_en/img/sp/assets/weapon/{kind}/{}.jpg", weapon.image),
            pos,
            Paste::sized(size),
        )
        .await?;

    let mut has_skin = false;
    if i <= 1
        && (i == 0 || dual_wield)
        && let Some(skin) = weapon.skin
    {
        painter
            .remote(
                Target::Skin,
                &format!("assets_en/img/sp/assets/weapon/{kind}/{skin}.jpg"),
                pos,
                Paste::sized(size),
            )
            .await?;
        painter
            .local(
                Target::Skin,
                "assets/skin.png",
                pos + (size.x, 0.0) + layout.skin_icon_offset,
                Paste::sized(layout.skin_icon_size).over(),
            )
            .await?;
        has_skin = true;
    }
    let badge = Target::shared(has_skin);

    // skill boxes, the first one halved on sub weapons when three are stacked
    let boxes = 1 + usize::from(ax) + usize::from(awakened);
    for j in 0..boxes {
        let y = pos.y + size.y + shift + icon.y * j as f64;
        let (at, box_size) = if i != 0 && j == 0 && boxes == 3 {
            let half = (size.x / 2.0).floor();
            (Vector2::new(pos.x + half, y), Vector2::new(half, icon.y))
        } else {
            (Vector2::new(pos.x, y), Vector2::new(size.x, icon.y))
        };
        painter
            .local(
                Target::shared(has_skin && j == 0),
                "assets/skill.png",
                at,
                Paste::sized(box_size).over(),
            )
            .await?;
    }

    if weapon.plus > 0 {
        let plus_shift = match (shift != 0.0, i > 0) {
            (true, true) => Vector2::new(-(size.x / 2.0).floor(), 0.0),
            (true, false) => Vector2::new(0.0, shift),
            (false, _) => Vector2::default(),
        };
        painter.text(
            badge,
            pos + size + plus_shift + layout.plus_text_position_shift,
            &format!("+{}", weapon.plus),
            TextStyle::new(FontSize::Medium, palette::PLUS).outlined(6),
        )?;
    }
    if weapon.skill_level > 1 {
        painter.text(
            badge,
            pos + (icon.x * 3.0, size.y + shift) + layout.skill_level_position_shift,
            &format!("SL {}", weapon.skill_level),
            TextStyle::new(FontSize::Small, palette::WHITE),
        )?;
    }

    if i == 0 || !ax || !awakened {
        for j in 0..3 {
            let Some(skill) = ctx.snapshot.weapon_skill(i, j) else {
                continue;
            };
            let path = skill_icon(ctx, &weapon, j, skill);
            painter
                .remote(
                    badge,
                    &path,
                    (pos.x + icon.x * j as f64, pos.y + size.y + shift),
                    Paste::sized(icon),
                )
                .await?;
        }
    }
    // row advance uses the icon width, which equals its height
    shift += icon.x;

    let mut main_icon = layout.ax_icon_size;
    if i == 0 {
        main_icon = main_icon * layout.ax_indicator_mainhand_multiplier;
    }
    if ax && awakened {
        main_icon = main_icon * layout.ax_indicator_multiple_multiplier;
    }

    if let Some(ax_icon) = weapon.ax_icon {
        painter
            .remote(
                badge,
                &format!("assets_en/img/sp/ui/icon/augment_skill/{ax_icon}.png"),
                pos,
                Paste::sized(main_icon.i()),
            )
            .await?;
        for (j, ax_skill) in weapon.ax_skills.iter().enumerate() {
            let column = f64::from(layout.ax_separator) * j as f64;
            painter
                .remote(
                    Target::Base,
                    &format!("assets_en/img/sp/ui/icon/skill/{ax_skill}.png"),
                    (pos.x + column, pos.y + size.y + shift),
                    Paste::sized(icon),
                )
                .await?;
            painter.text(
                Target::Base,
                pos + (column + icon.x, size.y + shift) + layout.ax_text_position_shift,
                &ctx.snapshot.ax_value(i, j),
                TextStyle::new(FontSize::Small, palette::WHITE),
            )?;
        }
        shift += icon.x;
    }

    if let Some(awakening) = weapon.awakening {
        let form = awakening
            .form
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let path = format!("assets_en/img/sp/ui/icon/arousal_type/type_{form}.png");
        let offset = if ax { (main_icon.x / 2.0).trunc() } else { 0.0 };
        painter
            .remote(badge, &path, pos + (offset, 0.0), Paste::sized(main_icon.i()))
            .await?;
        painter
            .remote(
                Target::Base,
                &path,
                (pos.x + icon.x, pos.y + size.y + shift),
                Paste::sized(icon),
            )
            .await?;
        let level = awakening
            .level
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        painter.text(
            Target::Base,
            pos + (icon.x * 3.0, size.y + shift) + layout.skill_level_position_shift,
            &format!("LV {level}"),
            TextStyle::new(FontSize::Small, palette::WHITE),
        )?;
    }
    Ok(())
}

fn skill_icon(ctx: &SectionContext<'_>, weapon: &WeaponSlot<'_>, j: usize, skill: &str) -> String {
    if skill == HIDDEN_SKILL_ICON
        && let Some(rules) = ctx.skill_rules
        && let Some(path) = rules.guess(ctx.snapshot, weapon, j)
    {
        tracing::debug!(slot = weapon.index + 1, skill = j, %path, "guessed hidden skill");
        return path;
    }
    format!("assets_en/img/sp/ui/icon/skill/{skill}.png")
}

/// Attack and HP totals under the mainhand. Returns the top-left corner of the block.
async fn draw_totals(ctx: &SectionContext<'_>, painter: &mut Painter<'_>) -> PibResult<Vector2> {
    let layout: &WeaponLayout = &ctx.layout.weapon;
    let pos = layout.origin + (0.0, layout.mainhand_size.y + 150.0);
    let row = Vector2::new(0.0, f64::from(layout.stat_box_height));
    let box_size = Vector2::new(layout.mainhand_size.x, f64::from(layout.stat_box_height));

    for at in [pos, pos + row] {
        painter
            .local(Target::Base, "assets/skill.png", at, Paste::sized(box_size).over())
            .await?;
    }
    painter
        .local(
            Target::Base,
            "assets/atk.png",
            pos + layout.stat_icon_position,
            Paste::sized((90, 39)).over(),
        )
        .await?;
    painter
        .local(
            Target::Base,
            "assets/hp.png",
            pos + layout.stat_icon_position + row,
            Paste::sized((66, 39)).over(),
        )
        .await?;

    let total = |v: &Option<Scalar>| v.as_ref().map(ToString::to_string).unwrap_or_default();
    let style = TextStyle::new(FontSize::Medium, palette::WHITE);
    painter.text(
        Target::Base,
        pos + layout.stat_text_position,
        &total(&ctx.snapshot.watk),
        style,
    )?;
    painter.text(
        Target::Base,
        pos + layout.stat_text_position + row,
        &total(&ctx.snapshot.whp),
        style,
    )?;
    Ok(pos)
}

/// Support summon art, or a text placeholder when its id cannot be resolved.
async fn draw_support(
    ctx: &SectionContext<'_>,
    painter: &mut Painter<'_>,
    pos: Vector2,
) -> PibResult<()> {
    let layout = &ctx.layout.weapon;
    let Some(support) = ctx.snapshot.support_summon() else {
        return Ok(());
    };
    tokio::task::yield_now().await;
    let (resolved, name) = match support {
        SupportSummon::Id(id) => (Some(id), ""),
        SupportSummon::Name(name) => {
            tracing::info!(summon = name, "looking up support summon id");
            let id = ctx
                .wiki
                .summon_id(ctx.cache.fetcher().as_ref(), name)
                .await;
            (id, name)
        }
    };

    match resolved {
        Some(id) => {
            tracing::info!(%id, "support summon");
            painter
                .remote(
                    Target::Base,
                    &format!("assets_en/img/sp/assets/summon/m/{id}.jpg"),
                    pos + layout.support_art_box_offset,
                    Paste::sized(layout.support_art_box_size),
                )
                .await?;
        }
        None => {
            tracing::warn!(summon = name, "support summon id unresolved, drawing its name");
            painter
                .local(
                    Target::Base,
                    "assets/big_stat.png",
                    pos + layout.support_box_offset,
                    Paste::sized(layout.support_box_size).over(),
                )
                .await?;
            let label = match ctx.snapshot.language() {
                Language::Japanese => "サポーター",
                Language::English => "Support",
            };
            let style = TextStyle::new(FontSize::Medium, palette::WHITE);
            painter.text(Target::Base, pos + layout.support_text_offset, label, style)?;
            painter.text(
                Target::Base,
                pos + layout.support_text_offset + layout.support_number_text_shift,
                &ellipsize(name, 10, 10, "..."),
                style,
            )?;
        }
    }
    Ok(())
}

/// Normal and advantage estimated damage boxes.
async fn draw_estimates(
    ctx: &SectionContext<'_>,
    painter: &mut Painter<'_>,
    pos: Vector2,
    est_width: f64,
) -> PibResult<()> {
    let layout = &ctx.layout.weapon;
    let snapshot = ctx.snapshot;
    let element = snapshot.estimate_element().ok_or_else(|| {
        PibError::validation(format!(
            "estimated damage element {:?} is not an element id",
            snapshot.est.first().map(ToString::to_string)
        ))
    })?;
    let target = element.advantage_target();
    let language = snapshot.language();
    let label = TextStyle::new(FontSize::Medium, palette::WHITE);

    for i in 0..2 {
        tokio::task::yield_now().await;
        let at = pos + (est_width * i as f64, 0.0);
        painter
            .local(
                Target::Base,
                "assets/big_stat.png",
                at,
                Paste::sized(layout.estimated_offset_size + (est_width, 0.0)).over(),
            )
            .await?;
        let value = snapshot
            .est
            .get(i + 1)
            .map(ToString::to_string)
            .unwrap_or_default();
        painter.text(
            Target::Base,
            at + layout.estimated_text_offset,
            &value,
            TextStyle::new(FontSize::Big, element.color()).outlined(6),
        )?;

        let target_style = TextStyle::new(FontSize::Medium, target.color());
        match (i, language) {
            (0, Language::Japanese) => {
                painter.text(
                    Target::Base,
                    at + layout.estimated_other_text_offset,
                    ESTIMATE_LABEL_JA,
                    label,
                )?;
            }
            (0, Language::English) => {
                painter.text(
                    Target::Base,
                    at + layout.estimated_other_text_offset,
                    "Estimated",
                    label,
                )?;
            }
            (_, Language::Japanese) => {
                painter.text(Target::Base, at + layout.estimated_other_text_offset, "対", label)?;
                painter.text(
                    Target::Base,
                    at + layout.estimated_other_jp_text_offset,
                    &format!("{}属性", target.name(language)),
                    target_style,
                )?;
                painter.text(
                    Target::Base,
                    at + layout.estimated_other_jp_text2_offset,
                    ESTIMATE_LABEL_JA,
                    label,
                )?;
            }
            (_, Language::English) => {
                painter.text(Target::Base, at + layout.estimated_other_text_offset, "vs", label)?;
                painter.text(
                    Target::Base,
                    at + layout.estimated_other_text2_offset,
                    target.name(language),
                    target_style,
                )?;
            }
        }
    }
    Ok(())
}

/// HP gauge drawn over the normal estimate box of the skin layer.
async fn draw_hp_gauge(
    ctx: &SectionContext<'_>,
    painter: &mut Painter<'_>,
    pos: Vector2,
    est_width: f64,
) -> PibResult<()> {
    let layout = &ctx.layout.weapon;
    let ratio = ctx.snapshot.hp_ratio();
    painter
        .local(
            Target::Skin,
            "assets/big_stat.png",
            pos,
            Paste::sized(layout.estimated_offset_size + (est_width, 0.0)).over(),
        )
        .await?;
    let text = match ctx.snapshot.language() {
        Language::Japanese => format!("HP{ratio}%"),
        Language::English => format!("{ratio}% HP"),
    };
    painter.text(
        Target::Skin,
        pos + layout.hp_bar_text_offset,
        &text,
        TextStyle::new(FontSize::Medium, palette::WHITE),
    )?;

    let bar = pos + layout.hp_bar_offset;
    painter
        .local(
            Target::Skin,
            "assets/hp_bottom.png",
            bar,
            Paste::sized(layout.hp_bar_size).over(),
        )
        .await?;
    let fill = (layout.hp_bar_size.x * ratio as f64 / 100.0).trunc();
    let crop = (layout.hp_bar_crop.x * ratio as f64 / 100.0).trunc();
    if fill >= 1.0 && crop >= 1.0 {
        painter
            .local(
                Target::Skin,
                "assets/hp_mid.png",
                bar,
                Paste::sized((fill, layout.hp_bar_size.y))
                    .over()
                    .cropped((crop as u32, layout.hp_bar_crop.y as u32)),
            )
            .await?;
    }
    painter
        .local(
            Target::Skin,
            "assets/hp_top.png",
            bar,
            Paste::sized(layout.hp_bar_size).over(),
        )
        .await?;
    Ok(())
}
