//! Ember particle field
//!
//! Decorative embers that rise from below the viewport, drift sideways and
//! fade out. Each particle is backed by a document element; the field only
//! holds the motion state and tells the caller what to write each frame.
//!
//! A particle stops itself once it has risen above the container or fully
//! faded. Starting a new generation drops every particle at once; frame
//! callbacks still queued for the old ones find nothing and do nothing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::{new_key_type, SlotMap};

use ember_core::{ElementId, Viewport};

new_key_type! {
    /// Handle to a live particle
    pub struct ParticleId;
}

/// Frames per second the motion constants are tuned for
const FPS: f32 = 60.0;

/// Particles above this offset are gone
const TOP_CUTOFF: f32 = -20.0;

/// Motion state of one ember
#[derive(Clone, Debug, PartialEq)]
pub struct EmberParticle {
    pub element: ElementId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    initial_opacity: f32,
    /// Lifetime in seconds
    lifetime: f32,
    /// Horizontal direction in [-1, 1)
    drift: f32,
}

impl EmberParticle {
    /// Vertical pixels per frame
    pub fn rise_per_frame(&self) -> f32 {
        FPS / self.lifetime
    }

    /// Opacity lost per frame
    pub fn fade_per_frame(&self) -> f32 {
        self.initial_opacity / (self.lifetime * FPS)
    }

    fn advance(&mut self) -> bool {
        self.y -= self.rise_per_frame();
        self.x += self.drift * 0.5;
        self.opacity -= self.fade_per_frame();
        self.y >= TOP_CUTOFF && self.opacity > 0.0
    }

    /// Inline style applied when the particle element is created
    pub fn initial_style(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_string()),
            ("left", format!("{:.2}px", self.x)),
            ("top", format!("{:.2}px", self.y)),
            ("width", format!("{:.2}px", self.size)),
            ("height", format!("{:.2}px", self.size)),
            ("background", "radial-gradient(circle, #ff6b35, #ffa726)".to_string()),
            ("border-radius", "50%".to_string()),
            ("opacity", format!("{:.3}", self.opacity)),
            ("pointer-events", "none".to_string()),
            ("z-index", "1".to_string()),
            ("box-shadow", "0 0 10px rgba(255, 107, 53, 0.8)".to_string()),
        ]
    }
}

/// Result of advancing a particle by one frame
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleFrame {
    /// Still alive; write these values
    Moved {
        element: ElementId,
        top: String,
        left: String,
        opacity: String,
    },
    /// Finished; remove the element
    Expired { element: ElementId },
}

/// All live particles plus the random source that spawns them
pub struct ParticleField {
    rng: StdRng,
    particles: SlotMap<ParticleId, EmberParticle>,
    generation: u64,
}

impl ParticleField {
    /// Create a field; a fixed seed makes spawns reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            particles: SlotMap::with_key(),
            generation: 0,
        }
    }

    /// Current population generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop every particle and start a new generation
    pub fn next_generation(&mut self) -> u64 {
        self.particles.clear();
        self.generation += 1;
        self.generation
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, id: ParticleId) -> Option<&EmberParticle> {
        self.particles.get(id)
    }

    /// Spawn a particle below the viewport for an already-created element
    pub fn spawn(&mut self, element: ElementId, viewport: Viewport) -> ParticleId {
        let opacity = self.rng.gen::<f32>() * 0.7 + 0.3;
        let particle = EmberParticle {
            element,
            x: self.rng.gen::<f32>() * viewport.width,
            y: viewport.height + 20.0,
            size: self.rng.gen::<f32>() * 4.0 + 2.0,
            lifetime: self.rng.gen::<f32>() * 10.0 + 8.0,
            opacity,
            initial_opacity: opacity,
            drift: (self.rng.gen::<f32>() - 0.5) * 2.0,
        };
        self.particles.insert(particle)
    }

    /// Advance a particle one frame
    ///
    /// Returns `None` for particles that no longer exist (expired or from a
    /// previous generation). Expired particles are removed.
    pub fn step(&mut self, id: ParticleId) -> Option<ParticleFrame> {
        let particle = self.particles.get_mut(id)?;
        if particle.advance() {
            Some(ParticleFrame::Moved {
                element: particle.element,
                top: format!("{:.2}px", particle.y),
                left: format!("{:.2}px", particle.x),
                opacity: format!("{:.3}", particle.opacity),
            })
        } else {
            let element = particle.element;
            self.particles.remove(id);
            Some(ParticleFrame::Expired { element })
        }
    }

    /// Forget one particle (its element went away)
    pub fn remove(&mut self, id: ParticleId) -> Option<EmberParticle> {
        self.particles.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Document, MemoryDocument};

    fn element() -> ElementId {
        let mut doc = MemoryDocument::new();
        doc.append(doc.body(), None, &["ember-particle"])
    }

    #[test]
    fn test_spawn_ranges() {
        let mut field = ParticleField::new(Some(7));
        let viewport = Viewport::default();
        for _ in 0..200 {
            let id = field.spawn(element(), viewport);
            let p = field.get(id).unwrap();
            assert!((0.0..=viewport.width).contains(&p.x));
            assert_eq!(p.y, viewport.height + 20.0);
            assert!((2.0..=6.0).contains(&p.size));
            assert!((0.3..=1.0).contains(&p.opacity));
            assert!((8.0..=18.0).contains(&p.lifetime));
        }
    }

    #[test]
    fn test_seeded_fields_match() {
        let el = element();
        let mut a = ParticleField::new(Some(42));
        let mut b = ParticleField::new(Some(42));
        let pa = a.spawn(el, Viewport::default());
        let pb = b.spawn(el, Viewport::default());
        assert_eq!(a.get(pa), b.get(pb));
    }

    #[test]
    fn test_particle_expires_by_itself() {
        let mut field = ParticleField::new(Some(1));
        let id = field.spawn(element(), Viewport::default());

        let mut frames = 0;
        loop {
            match field.step(id) {
                Some(ParticleFrame::Moved { .. }) => frames += 1,
                Some(ParticleFrame::Expired { .. }) => break,
                None => panic!("particle vanished without expiring"),
            }
            assert!(frames < 2000, "particle never expired");
        }
        assert!(field.is_empty());
        assert_eq!(field.step(id), None);
    }

    #[test]
    fn test_new_generation_orphans_particles() {
        let mut field = ParticleField::new(Some(3));
        let id = field.spawn(element(), Viewport::default());
        assert_eq!(field.next_generation(), 1);
        assert_eq!(field.step(id), None);
    }

    #[test]
    fn test_initial_style_has_geometry() {
        let mut field = ParticleField::new(Some(9));
        let id = field.spawn(element(), Viewport::default());
        let style = field.get(id).unwrap().initial_style();
        for prop in ["left", "top", "width", "height", "opacity"] {
            assert!(style.iter().any(|(p, _)| *p == prop), "missing {prop}");
        }
    }
}
