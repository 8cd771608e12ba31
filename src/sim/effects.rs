//! Cosmetic, self-expiring feedback effects
//!
//! Particles and floating score text fade out by a fixed amount per tick and
//! are dropped once invisible. Nothing here affects gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EFFECT_FADE, FADE_EPSILON, TEXT_DRIFT};

/// Semantic color of an effect (resolved by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    /// Correct answers
    Gold,
    /// Wrong answers
    Red,
}

/// A round spark with its own velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub radius: f32,
    pub opacity: f32,
}

/// Score text drifting upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub tint: Tint,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Particle(Particle),
    Text(FloatingText),
}

impl Effect {
    pub fn opacity(&self) -> f32 {
        match self {
            Effect::Particle(p) => p.opacity,
            Effect::Text(t) => t.opacity,
        }
    }

    /// Advance one tick and fade
    pub fn update(&mut self, fade: f32) {
        match self {
            Effect::Particle(p) => {
                p.pos += p.vel;
                p.opacity -= fade;
            }
            Effect::Text(t) => {
                t.pos.y -= TEXT_DRIFT;
                t.opacity -= fade;
            }
        }
    }

    #[inline]
    pub fn is_faded(&self) -> bool {
        self.opacity() <= FADE_EPSILON
    }
}

/// The active effects, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    items: Vec<Effect>,
    /// Opacity lost per tick
    pub fade: f32,
    /// Spawns beyond this many live effects are dropped
    pub cap: usize,
}

impl Default for Effects {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl Effects {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            fade: EFFECT_FADE,
            cap,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, effect: Effect) {
        if self.items.len() < self.cap {
            self.items.push(effect);
        }
    }

    /// Advance every effect and drop the ones that faded out
    pub fn update(&mut self) {
        let fade = self.fade;
        for effect in &mut self.items {
            effect.update(fade);
        }
        self.items.retain(|e| !e.is_faded());
    }

    /// Sparks flying out of a point
    pub fn burst<R: Rng + ?Sized>(&mut self, origin: Vec2, count: usize, tint: Tint, rng: &mut R) {
        for _ in 0..count {
            let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 4.0;
            self.push(Effect::Particle(Particle {
                pos: origin,
                vel,
                tint,
                radius: rng.random::<f32>() * 5.0 + 2.0,
                opacity: 1.0,
            }));
        }
    }

    /// Sparks at random positions over the whole play area
    pub fn scatter<R: Rng + ?Sized>(&mut self, bounds: Vec2, count: usize, tint: Tint, rng: &mut R) {
        for _ in 0..count {
            let pos = Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y);
            let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 6.0;
            self.push(Effect::Particle(Particle {
                pos,
                vel,
                tint,
                radius: rng.random::<f32>() * 5.0 + 2.0,
                opacity: 1.0,
            }));
        }
    }

    pub fn float_text(&mut self, pos: Vec2, text: impl Into<String>, tint: Tint) {
        self.push(Effect::Text(FloatingText {
            pos,
            text: text.into(),
            tint,
            opacity: 1.0,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spark() -> Effect {
        Effect::Particle(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            tint: Tint::Gold,
            radius: 3.0,
            opacity: 1.0,
        })
    }

    #[test]
    fn test_particle_removed_after_exactly_fifty_updates() {
        let mut effects = Effects::default();
        effects.push(spark());

        for _ in 0..49 {
            effects.update();
        }
        assert_eq!(effects.len(), 1);

        effects.update();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_particle_integrates_velocity() {
        let mut effects = Effects::default();
        effects.push(spark());
        effects.update();
        effects.update();

        let Some(Effect::Particle(p)) = effects.iter().next() else {
            panic!("expected a particle");
        };
        assert_eq!(p.pos, Vec2::new(2.0, -4.0));
        assert!((p.opacity - 0.96).abs() < 1e-6);
    }

    #[test]
    fn test_text_drifts_up() {
        let mut effects = Effects::default();
        effects.float_text(Vec2::new(10.0, 100.0), "+5", Tint::Gold);
        effects.update();

        let Some(Effect::Text(t)) = effects.iter().next() else {
            panic!("expected text");
        };
        assert_eq!(t.pos, Vec2::new(10.0, 99.0));
        assert_eq!(t.text, "+5");
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut effects = Effects::default();
        effects.float_text(Vec2::ZERO, "first", Tint::Red);
        effects.push(spark());
        effects.float_text(Vec2::ZERO, "last", Tint::Red);
        effects.update();

        let kinds: Vec<_> = effects
            .iter()
            .map(|e| matches!(e, Effect::Text(_)))
            .collect();
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut effects = Effects::new(15);
        effects.burst(Vec2::new(50.0, 50.0), 20, Tint::Gold, &mut rng);
        assert_eq!(effects.len(), 15);

        for e in effects.iter() {
            let Effect::Particle(p) = e else { unreachable!() };
            assert!(p.vel.x.abs() <= 2.0 && p.vel.y.abs() <= 2.0);
            assert!(p.radius >= 2.0 && p.radius <= 7.0);
        }
    }
}
