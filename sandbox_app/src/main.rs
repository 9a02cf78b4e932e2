//! Headless ball sandbox
//!
//! Drops a handful of balls onto a floor and steps the physics with a fixed
//! timestep, logging contact counts and final resting positions.
//!
//! Usage: `ball_sandbox [scene.toml|scene.ron]`. Without an argument the
//! built-in scene is used. Set `RUST_LOG=trace` to see every contact.

mod scene;

use ball_physics::config::{Config, ConfigError};
use ball_physics::foundation::logging;
use ball_physics::foundation::time::ManualClock;
use ball_physics::physics::{CollisionObject, PhysicsError, PhysicsStepper, StepReport, Triangle};
use scene::SceneConfig;
use thiserror::Error;

/// Errors that end a sandbox run
#[derive(Error, Debug)]
enum SandboxError {
    #[error("Scene error: {0}")]
    Scene(#[from] ConfigError),

    #[error("Physics error at step {step}: {source}")]
    Physics {
        step: usize,
        #[source]
        source: PhysicsError,
    },
}

struct SandboxApp {
    scene: SceneConfig,
    stepper: PhysicsStepper,
    objects: Vec<CollisionObject>,
    triangles: Vec<Triangle>,
    clock: ManualClock,
}

impl SandboxApp {
    fn new(scene: SceneConfig) -> Result<Self, SandboxError> {
        scene.validate()?;

        let objects = scene.build_objects();
        let triangles = scene.floor.triangles();
        log::info!(
            "Scene has {} balls and {} triangles, running {} steps of {:.4}s",
            objects.len(),
            triangles.len(),
            scene.steps,
            scene.dt
        );

        Ok(Self {
            stepper: PhysicsStepper::new(scene.physics.clone()),
            objects,
            triangles,
            clock: ManualClock::default(),
            scene,
        })
    }

    fn run(&mut self) -> Result<StepReport, SandboxError> {
        let mut totals = StepReport::default();

        for step in 0..self.scene.steps {
            let report = self
                .stepper
                .step(&mut self.objects, &self.triangles, &self.clock, self.scene.dt)
                .map_err(|source| SandboxError::Physics { step, source })?;
            self.clock.advance(f64::from(self.scene.dt));

            totals.ball_contacts += report.ball_contacts;
            totals.ball_impulses += report.ball_impulses;
            totals.overlaps_corrected += report.overlaps_corrected;
            totals.surface_contacts += report.surface_contacts;
            totals.surface_impulses += report.surface_impulses;
            totals.trail_samples += report.trail_samples;

            if self.scene.report_every > 0 && (step + 1) % self.scene.report_every == 0 {
                log::info!(
                    "t={:.2}s ball contacts {}, surface contacts {}",
                    self.clock_secs(),
                    report.ball_contacts,
                    report.surface_contacts
                );
            }
        }

        Ok(totals)
    }

    fn clock_secs(&self) -> f64 {
        use ball_physics::foundation::time::Clock;
        self.clock.now().as_secs()
    }

    fn summarize(&self, totals: &StepReport) {
        log::info!("Totals: {:?}", totals);
        for (index, obj) in self.objects.iter().enumerate() {
            let p = obj.transform.position;
            let v = obj.velocity.velocity;
            log::info!(
                "ball {index}: pos ({:.3}, {:.3}, {:.3}) speed {:.3} trail points {}",
                p.x,
                p.y,
                p.z,
                v.magnitude(),
                obj.ball.path().len()
            );
        }
    }
}

fn load_scene() -> Result<SceneConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene from {path}");
            SceneConfig::load_from_file(path)
        }
        None => {
            log::info!("No scene file given, using the built-in scene");
            Ok(SceneConfig::default())
        }
    }
}

fn main() {
    logging::init_with_level(logging::LevelFilter::Info);

    log::info!("Starting ball sandbox");

    let result = load_scene()
        .map_err(SandboxError::from)
        .and_then(SandboxApp::new)
        .and_then(|mut app| {
            let totals = app.run()?;
            app.summarize(&totals);
            Ok(())
        });

    if let Err(err) = result {
        log::error!("Sandbox failed: {err}");
        std::process::exit(1);
    }
}
