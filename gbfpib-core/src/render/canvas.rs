use std::ops::Range;

use crate::{
    assets::image::ImageHandle,
    foundation::{
        core::{CANVAS_HEIGHT, CANVAS_WIDTH},
        error::PibResult,
        math::Vector2,
    },
    render::text::{FontSet, TextStyle},
};

/// Which layers of a [`Canvas`] an operation paints on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// The plain layer only.
    #[default]
    Base,
    /// The skin layer only.
    Skin,
    /// Both layers, for badges shared by the plain and the skinned render.
    Both,
}

impl Target {
    /// `Both` when the slot has a skin, `Base` otherwise.
    pub fn shared(skinned: bool) -> Self {
        if skinned { Self::Both } else { Self::Base }
    }

    fn range(self, len: usize) -> Range<usize> {
        let r = match self {
            Self::Base => 0..1,
            Self::Skin => 1..2,
            Self::Both => 0..2,
        };
        r.start.min(len)..r.end.min(len)
    }
}

/// How a pasted image is merged into the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Replace pixels, weighted by the source alpha.
    #[default]
    Replace,
    /// Alpha-composite over what is already there.
    Over,
}

/// A section's set of full-size layers: the plain render and, optionally, the skin render.
#[derive(Clone, Debug)]
pub struct Canvas {
    layers: Vec<ImageHandle>,
}

impl Canvas {
    /// `count` transparent layers of the fixed canvas size.
    pub fn new(count: usize) -> Self {
        Self {
            layers: (0..count)
                .map(|_| ImageHandle::blank(CANVAS_WIDTH, CANVAS_HEIGHT))
                .collect(),
        }
    }

    #[cfg(test)]
    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[cfg(test)]
    /// Whether the canvas has no layer at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[cfg(test)]
    /// Layer `index`, if present.
    pub fn layer(&self, index: usize) -> Option<&ImageHandle> {
        self.layers.get(index)
    }

    /// Give up the layers, plain layer first.
    pub fn into_layers(self) -> Vec<ImageHandle> {
        self.layers
    }

    /// Paste `img` with its top-left corner at `pos` on every targeted layer.
    pub fn paste(&mut self, target: Target, img: &ImageHandle, pos: Vector2, blend: Blend) {
        let at = pos.i();
        let range = target.range(self.layers.len());
        for layer in &mut self.layers[range] {
            match blend {
                Blend::Replace => layer.paste(img, at),
                Blend::Over => layer.composite_at(img, at),
            }
        }
    }

    /// Draw one line of text anchored at `pos` on every targeted layer.
    pub fn text(
        &mut self,
        target: Target,
        fonts: &FontSet,
        pos: Vector2,
        text: &str,
        style: TextStyle,
    ) -> PibResult<()> {
        let Some(rendered) = fonts.rasterize(text, style)? else {
            return Ok(());
        };
        let pos = pos + rendered.offset;
        self.paste(target, &rendered.image, pos, Blend::Over);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
