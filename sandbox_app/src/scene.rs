//! Scene description for the sandbox
//!
//! A scene is a floor quad plus a set of balls, loaded from TOML or RON.
//! Balls can be listed explicitly or scattered from a seeded RNG.

use ball_physics::config::{Config, ConfigError};
use ball_physics::foundation::math::Vec3;
use ball_physics::physics::{CollisionObject, PhysicsConfig, Triangle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One explicitly placed ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    /// Initial center
    pub position: Vec3,
    /// Initial velocity
    #[serde(default)]
    pub velocity: Vec3,
    /// Mass
    pub mass: f32,
    /// Restitution
    pub elasticity: f32,
    /// Radius
    pub radius: f32,
}

impl BallSpec {
    fn build(&self) -> CollisionObject {
        CollisionObject::new(self.position, self.velocity, self.mass, self.elasticity, self.radius)
    }
}

/// Square floor centered on the origin, split into two triangles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    /// Half the side length
    pub half_extent: f32,
    /// Floor height
    pub height: f32,
    /// Friction coefficient of both triangles
    pub friction: f32,
}

impl FloorSpec {
    /// Two triangles facing +Y
    pub fn triangles(&self) -> Vec<Triangle> {
        let e = self.half_extent;
        let h = self.height;
        vec![
            Triangle::from_points(
                Vec3::new(-e, h, -e),
                Vec3::new(-e, h, e),
                Vec3::new(e, h, -e),
                self.friction,
            ),
            Triangle::from_points(
                Vec3::new(e, h, e),
                Vec3::new(e, h, -e),
                Vec3::new(-e, h, e),
                self.friction,
            ),
        ]
    }
}

/// Full sandbox scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Resolver and stepper settings
    pub physics: PhysicsConfig,
    /// Fixed step in seconds
    pub dt: f32,
    /// Number of steps to run
    pub steps: usize,
    /// Log a summary every this many steps (0 disables)
    pub report_every: usize,
    /// Seed for scattered balls
    pub seed: u64,
    /// Number of extra balls scattered above the floor
    pub scattered_balls: usize,
    /// Explicit balls
    pub balls: Vec<BallSpec>,
    /// Floor
    pub floor: FloorSpec,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            dt: 1.0 / 60.0,
            steps: 600,
            report_every: 60,
            seed: 7,
            scattered_balls: 6,
            balls: vec![
                BallSpec {
                    position: Vec3::new(-2.0, 1.0, 0.0),
                    velocity: Vec3::new(3.0, 0.0, 0.0),
                    mass: 1.0,
                    elasticity: 0.9,
                    radius: 0.5,
                },
                BallSpec {
                    position: Vec3::new(2.0, 1.0, 0.0),
                    velocity: Vec3::zeros(),
                    mass: 2.0,
                    elasticity: 0.9,
                    radius: 0.75,
                },
            ],
            floor: FloorSpec {
                half_extent: 10.0,
                height: 0.0,
                friction: 0.2,
            },
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Validate the scene
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::Invalid(format!("dt must be > 0, got {}", self.dt)));
        }

        if self.floor.half_extent <= 0.0 {
            return Err(ConfigError::Invalid("floor half_extent must be > 0".to_string()));
        }

        for (index, ball) in self.balls.iter().enumerate() {
            ball.build()
                .validate()
                .map_err(|err| ConfigError::Invalid(format!("ball {index}: {err}")))?;
        }

        Ok(())
    }

    /// Instantiate every ball: explicit ones first, then scattered ones
    pub fn build_objects(&self) -> Vec<CollisionObject> {
        let mut objects: Vec<CollisionObject> = self.balls.iter().map(BallSpec::build).collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let spread = (self.floor.half_extent * 0.5).max(0.5);
        for layer in 0..self.scattered_balls {
            let radius = rng.gen_range(0.2..0.6);
            let position = Vec3::new(
                rng.gen_range(-spread..spread),
                self.floor.height + 3.0 + layer as f32 * 1.5,
                rng.gen_range(-spread..spread),
            );
            let velocity = Vec3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));
            let mass = rng.gen_range(0.5..3.0);
            let elasticity = rng.gen_range(0.3..0.95);
            objects.push(CollisionObject::new(position, velocity, mass, elasticity, radius));
        }

        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        let scene = SceneConfig::default();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.build_objects().len(), 2 + 6);
        assert_eq!(scene.floor.triangles().len(), 2);
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let scene = SceneConfig::default();
        assert_eq!(scene.build_objects(), scene.build_objects());
    }

    #[test]
    fn test_floor_faces_up() {
        for triangle in SceneConfig::default().floor.triangles() {
            let n = triangle.unit_normal().unwrap();
            assert!((n - Vec3::y()).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_bad_ball_is_rejected() {
        let mut scene = SceneConfig::default();
        scene.balls[1].mass = 0.0;
        assert!(matches!(scene.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_ron_scene_with_defaults() {
        let scene: SceneConfig = ron::from_str(
            "(steps: 10, scattered_balls: 0, balls: [(position: (0.0, 2.0, 0.0), mass: 1.0, elasticity: 0.5, radius: 0.5)])",
        )
        .unwrap();
        assert_eq!(scene.steps, 10);
        assert_eq!(scene.balls[0].velocity, Vec3::zeros());
        assert_eq!(scene.build_objects().len(), 1);
    }
}
