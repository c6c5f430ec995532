//! Platform world
//!
//! A fixed arena of platform slots and cloud slots. Nothing is ever pushed or
//! removed after generation: when a platform scrolls off the left edge its
//! slot is rewritten as a new platform beyond the current rightmost one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// A platform the ball can land on
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Platform {
    /// Left edge
    pub x: f32,
    /// Top surface (landing height)
    pub y_top: f32,
    pub width: f32,
    /// Already scored; reset when the slot is recycled
    pub counted: bool,
}

impl Platform {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Full body of the platform for a given thickness
    #[inline]
    pub fn rect(&self, thickness: f32) -> Rect {
        Rect::new(self.x, self.y_top, self.width, thickness)
    }
}

/// Background cloud, purely cosmetic
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decoration {
    pub center: Vec2,
    pub size: Vec2,
    /// Own scroll speed, slower than the platforms (parallax)
    pub speed: f32,
}

/// Platforms, clouds and the random source that lays them out
#[derive(Debug, Clone)]
pub struct World {
    total_platforms: usize,
    platforms: Vec<Platform>,
    decorations: Vec<Decoration>,
    rng: Pcg32,
}

/// Uniform draw in [min, max], rounded to a whole pixel
///
/// Whole pixels keep `top - radius + radius == top` exact, which the swept
/// landing test relies on frame after frame.
fn draw(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max).round().clamp(min, max)
}

impl World {
    /// Allocate `total_platforms` slots; call [`World::generate`] before use
    pub fn new(total_platforms: usize, seed: u64) -> Self {
        Self {
            total_platforms,
            platforms: vec![Platform::default(); total_platforms],
            decorations: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restart the random source (used before regenerating on restart)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn total_platforms(&self) -> usize {
        self.total_platforms
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub(crate) fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    /// Lay out a fresh staircase and sky
    pub fn generate(&mut self, config: &GameConfig) {
        let mut cursor = config.screen_width as f32 + PLATFORM_SPAWN_OFFSET;
        let mut y_top = config.ground_y - FIRST_PLATFORM_RISE;

        for slot in self.platforms.iter_mut() {
            cursor += draw(&mut self.rng, config.min_gap, config.max_gap);
            let width = draw(
                &mut self.rng,
                config.min_platform_width,
                config.max_platform_width,
            );
            let step = draw(&mut self.rng, config.step_up_min, config.step_up_max);
            y_top = (y_top - step).max(config.min_platform_y);

            *slot = Platform {
                x: cursor,
                y_top,
                width,
                counted: false,
            };
        }

        let spread = config.screen_width as f32 + CLOUD_INITIAL_SPREAD;
        self.decorations = (0..config.cloud_count)
            .map(|_| {
                let x = draw(&mut self.rng, 0.0, spread);
                Self::cloud_at(&mut self.rng, config, x)
            })
            .collect();

        log::info!(
            "Generated {} platforms (last at x={:.0}, top={:.0}) and {} clouds",
            self.platforms.len(),
            cursor,
            y_top,
            self.decorations.len()
        );
    }

    /// Random cloud centered at `x`
    fn cloud_at(rng: &mut Pcg32, config: &GameConfig, x: f32) -> Decoration {
        let y = draw(rng, CLOUD_MIN_Y, config.screen_height as f32 / 2.0);
        let w = draw(rng, CLOUD_MIN_WIDTH, CLOUD_MAX_WIDTH);
        let speed = draw(rng, CLOUD_MIN_SPEED, CLOUD_MAX_SPEED);
        Decoration {
            center: Vec2::new(x, y),
            size: Vec2::new(w, w * CLOUD_ASPECT),
            speed,
        }
    }

    /// Index of the platform with the largest left edge
    fn rightmost_index(&self) -> Option<usize> {
        self.platforms
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
            .map(|(i, _)| i)
    }

    /// Move everything left and recycle what fell off-screen
    ///
    /// Returns the number of platform slots recycled.
    pub fn scroll(&mut self, dt: f32, config: &GameConfig) -> usize {
        let shift = config.scroll_speed * dt;
        for platform in self.platforms.iter_mut() {
            platform.x -= shift;
        }

        // Anchor on the already-scrolled rightmost platform
        let mut recycled = 0;
        if let Some(mut anchor) = self.rightmost_index() {
            for i in 0..self.platforms.len() {
                if self.platforms[i].right() >= -PLATFORM_DESPAWN_MARGIN {
                    continue;
                }

                let last = self.platforms[anchor];
                let gap = draw(&mut self.rng, config.min_gap, config.max_gap);
                let width = draw(
                    &mut self.rng,
                    config.min_platform_width,
                    config.max_platform_width,
                );
                let step = draw(&mut self.rng, config.step_up_min, config.step_up_max);

                // Never respawn behind the left screen edge, even if every
                // platform has already scrolled past it
                self.platforms[i] = Platform {
                    x: last.x.max(0.0) + gap,
                    y_top: (last.y_top - step).max(config.min_platform_y),
                    width,
                    counted: false,
                };
                anchor = i;
                recycled += 1;
            }
        }

        for cloud in self.decorations.iter_mut() {
            cloud.center.x -= cloud.speed * dt;
            if cloud.center.x + cloud.size.x < -CLOUD_DESPAWN_MARGIN {
                let x = config.screen_width as f32
                    + draw(
                        &mut self.rng,
                        CLOUD_RESPAWN_MIN_OFFSET,
                        CLOUD_RESPAWN_MAX_OFFSET,
                    );
                *cloud = Self::cloud_at(&mut self.rng, config, x);
            }
        }

        if recycled > 0 {
            log::debug!("Recycled {} platform slot(s)", recycled);
        }
        recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn world(config: &GameConfig, seed: u64) -> World {
        let mut world = World::new(config.total_platforms, seed);
        world.generate(config);
        world
    }

    #[test]
    fn test_generate_staircase() {
        let config = GameConfig::default();
        let world = world(&config, 7);
        let platforms = world.platforms();

        assert_eq!(platforms.len(), 200);
        // First platform starts past the right edge
        assert!(platforms[0].x >= 800.0 + 200.0 + config.min_gap);
        assert!(platforms[0].y_top <= config.ground_y - 20.0 - config.step_up_min);

        for pair in platforms.windows(2) {
            let pitch = pair[1].x - pair[0].x;
            assert!(pitch >= config.min_gap && pitch <= config.max_gap);
            assert!(pair[1].y_top <= pair[0].y_top);
        }
        // 200 steps of at least 15px from 350 hits the ceiling long before the end
        assert_eq!(platforms.last().unwrap().y_top, config.min_platform_y);
        assert!(platforms.iter().all(|p| !p.counted));
    }

    #[test]
    fn test_generate_clouds() {
        let config = GameConfig::default();
        let world = world(&config, 7);
        assert_eq!(world.decorations().len(), config.cloud_count);
        for cloud in world.decorations() {
            assert!(cloud.center.x >= 0.0 && cloud.center.x <= 1400.0);
            assert!(cloud.center.y >= 40.0 && cloud.center.y <= 225.0);
            assert!((cloud.size.y - cloud.size.x * 0.6).abs() < 1e-4);
            assert!(cloud.speed >= 15.0 && cloud.speed <= 35.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = GameConfig::default();
        let a = world(&config, 1234);
        let b = world(&config, 1234);
        let c = world(&config, 4321);
        assert_eq!(a.platforms(), b.platforms());
        assert_eq!(a.decorations(), b.decorations());
        assert_ne!(a.platforms(), c.platforms());
    }

    #[test]
    fn test_scroll_moves_platforms_uniformly() {
        let config = GameConfig::default();
        let mut world = world(&config, 3);
        let before: Vec<f32> = world.platforms().iter().map(|p| p.x).collect();

        let recycled = world.scroll(0.5, &config);
        assert_eq!(recycled, 0);
        for (old, p) in before.iter().zip(world.platforms()) {
            assert!((old - 110.0 - p.x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_recycle_goes_behind_rightmost() {
        let config = GameConfig {
            total_platforms: 3,
            ..Default::default()
        };
        let mut world = World::new(3, 9);
        world.generate(&config);
        {
            let platforms = world.platforms_mut();
            platforms[0] = Platform {
                x: -300.0,
                y_top: 200.0,
                width: 150.0,
                counted: true,
            };
            platforms[1] = Platform {
                x: 400.0,
                y_top: 180.0,
                width: 150.0,
                counted: false,
            };
            platforms[2] = Platform {
                x: 700.0,
                y_top: 160.0,
                width: 150.0,
                counted: false,
            };
        }

        let recycled = world.scroll(0.0, &config);
        assert_eq!(recycled, 1);

        let respawned = world.platforms()[0];
        assert!(!respawned.counted);
        let pitch = respawned.x - 700.0;
        assert!(pitch >= config.min_gap && pitch <= config.max_gap);
        assert!(respawned.y_top <= 160.0 - config.step_up_min);
        assert!(respawned.y_top >= config.min_platform_y);
    }

    #[test]
    fn test_recycle_chains_in_one_pass() {
        let config = GameConfig {
            total_platforms: 3,
            ..Default::default()
        };
        let mut world = World::new(3, 9);
        world.generate(&config);
        {
            let platforms = world.platforms_mut();
            platforms[0] = Platform {
                x: -400.0,
                y_top: 200.0,
                width: 150.0,
                counted: true,
            };
            platforms[1] = Platform {
                x: -300.0,
                y_top: 180.0,
                width: 150.0,
                counted: true,
            };
            platforms[2] = Platform {
                x: 500.0,
                y_top: 160.0,
                width: 150.0,
                counted: false,
            };
        }

        assert_eq!(world.scroll(0.0, &config), 2);
        let p = world.platforms();
        // Second recycle anchors on the first recycled slot, not the stale rightmost
        assert!(p[0].x - p[2].x >= config.min_gap);
        assert!(p[1].x - p[0].x >= config.min_gap);
    }

    #[test]
    fn test_cloud_respawns_on_right() {
        let config = GameConfig::default();
        let mut world = world(&config, 5);
        world.decorations[0] = Decoration {
            center: Vec2::new(-200.0, 100.0),
            size: Vec2::new(100.0, 60.0),
            speed: 20.0,
        };

        world.scroll(0.0, &config);
        let cloud = world.decorations()[0];
        assert!(cloud.center.x >= 880.0 && cloud.center.x <= 1080.0);
        assert!(cloud.speed >= 15.0 && cloud.speed <= 35.0);
    }

    proptest! {
        #[test]
        fn prop_generation_invariants(seed in any::<u64>(), count in 1usize..64) {
            let config = GameConfig { total_platforms: count, ..Default::default() };
            let world = world(&config, seed);

            prop_assert_eq!(world.platforms().len(), count);
            for p in world.platforms() {
                prop_assert!(p.y_top >= config.min_platform_y);
                prop_assert!(p.width >= config.min_platform_width);
                prop_assert!(p.width <= config.max_platform_width);
            }
            for pair in world.platforms().windows(2) {
                prop_assert!(pair[1].x - pair[0].x >= config.min_gap);
            }
        }

        #[test]
        fn prop_scrolling_never_grows(
            seed in any::<u64>(),
            count in 1usize..16,
            frames in 1usize..2000,
        ) {
            let config = GameConfig { total_platforms: count, ..Default::default() };
            let mut world = world(&config, seed);
            let clouds = world.decorations().len();

            for _ in 0..frames {
                world.scroll(1.0 / 30.0, &config);
            }

            prop_assert_eq!(world.platforms().len(), count);
            prop_assert_eq!(world.decorations().len(), clouds);
            for p in world.platforms() {
                prop_assert!(p.y_top >= config.min_platform_y);
            }
        }
    }
}
