//! Rendering module
//!
//! The simulation never touches pixels. A [`Surface`] exposes a handful of
//! fill primitives and [`draw_frame`] issues the calls for one frame.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{Effect, GamePhase, GameState, Rect, Tint};

/// Linear RGBA, each channel 0-1
pub type Rgba = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0.04, 0.04, 0.09, 1.0];
    pub const PLAYER: Rgba = [1.0, 0.843, 0.0, 1.0]; // Gold
    pub const ENEMY: Rgba = [0.118, 0.227, 0.541, 1.0]; // Deep blue
    pub const ENEMY_PENDING: Rgba = [0.55, 0.35, 0.95, 1.0]; // Challenge open
    pub const REWARD: Rgba = [1.0, 0.843, 0.0, 1.0];
    pub const DAMAGE: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: Rgba = [0.0, 0.0, 0.0, 0.55];
    pub const OVERLAY_TEXT: Rgba = [1.0, 1.0, 1.0, 1.0];
}

/// Font size for floating score text (px)
pub const FLOAT_TEXT_SIZE: f32 = 20.0;
/// Font size for pause / game over banners (px)
pub const OVERLAY_TEXT_SIZE: f32 = 48.0;

/// A 2D drawing target
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;
    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: &Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Draw text with its baseline centered on `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Rgba);
}

pub fn tint_color(tint: Tint) -> Rgba {
    match tint {
        Tint::Gold => colors::REWARD,
        Tint::Red => colors::DAMAGE,
    }
}

/// Scale a color's alpha by an opacity in [0, 1]
#[inline]
pub fn with_opacity(mut color: Rgba, opacity: f32) -> Rgba {
    color[3] *= opacity.clamp(0.0, 1.0);
    color
}

/// CSS `rgba()` string for a color
pub fn css_color(color: Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Draw the whole frame: background, actors, effects in spawn order, overlays
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(colors::BACKGROUND);

    surface.fill_rect(&state.player.rect, colors::PLAYER);
    let enemy_color = if state.challenge.is_awaiting() {
        colors::ENEMY_PENDING
    } else {
        colors::ENEMY
    };
    surface.fill_rect(&state.enemy.rect, enemy_color);

    for effect in state.effects.iter() {
        match effect {
            Effect::Particle(p) => {
                let color = with_opacity(tint_color(p.tint), p.opacity);
                surface.fill_circle(p.pos, p.radius, color);
            }
            Effect::Text(t) => {
                let color = with_opacity(tint_color(t.tint), t.opacity);
                surface.fill_text(&t.text, t.pos, FLOAT_TEXT_SIZE, color);
            }
        }
    }

    let banner = match state.phase {
        GamePhase::Paused => Some("PAUSED"),
        GamePhase::GameOver => Some("GAME OVER"),
        GamePhase::Playing => None,
    };
    if let Some(text) = banner {
        let size = surface.size();
        surface.fill_rect(&Rect::new(0.0, 0.0, size.x, size.y), colors::OVERLAY);
        surface.fill_text(text, size / 2.0, OVERLAY_TEXT_SIZE, colors::OVERLAY_TEXT);
    }
}
