//! Guard patrol demo
//!
//! Headless simulation of a guard sweeping its gaze across a courtyard while
//! intruders wander around a wall. Prints who the guard spots and loses, then
//! a summary of the sensor's counters.
//!
//! ```text
//! RUST_LOG=debug cargo run -p sensor_demo -- sensor_demo/config/guard_sensor.ron
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use vision_sensor::prelude::*;

/// Fixed simulation step
const STEP: f32 = 1.0 / 60.0;

/// Simulated seconds
const DURATION: f32 = 20.0;

/// Number of wandering intruders
const INTRUDERS: u32 = 24;

/// Seed for the intruder layout, so runs are reproducible
const SEED: u64 = 0x5EED_CAFE;

/// Sweep speed of the guard's gaze, degrees per second
const SWEEP_SPEED: f32 = 25.0;

/// Largest gaze offset either side of straight ahead, degrees
const SWEEP_LIMIT: f32 = 70.0;

/// An intruder walking a circle around its own center
struct Patrol {
    entity: Entity,
    center: Vec3,
    radius: f32,
    phase: f32,
    angular_speed: f32,
}

impl Patrol {
    fn position_at(&self, time: f32) -> Vec3 {
        let angle = self.phase + self.angular_speed * time;
        self.center + Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }
}

/// Logs sightings as they happen
#[derive(Default)]
struct SightReporter {
    spotted: usize,
    lost: usize,
    time: f32,
}

impl SensorEventHandler for SightReporter {
    fn on_event(&mut self, event: &SensorEvent) -> bool {
        match event {
            SensorEvent::VisibilityGained(entity) => {
                self.spotted += 1;
                log::info!("[{:6.2}s] guard spotted intruder {entity}", self.time);
            }
            SensorEvent::VisibilityLost(entity) => {
                self.lost += 1;
                log::info!("[{:6.2}s] guard lost sight of intruder {entity}", self.time);
            }
            SensorEvent::ConfigChanged { shape, scan_interval } => {
                log::info!("Sensor reconfigured: {shape:?}, scanning every {scan_interval:.3}s");
            }
            SensorEvent::ScanCompleted { .. } | SensorEvent::ScanSkipped { .. } => {}
        }
        false
    }
}

struct GuardDemo {
    sensor: VisionSensor,
    overlay: SensorDebugVisualizer,
    reporter: SightReporter,
    index: OctreeSpatialIndex,
    walls: OccluderSet,
    patrols: Vec<Patrol>,
    guard_position: Vec3,
}

impl GuardDemo {
    fn new(config: SensorConfig) -> Result<Self, SensorError> {
        let overlay = SensorDebugVisualizer::new(&config);
        let sensor = VisionSensor::new(config)?;

        let bounds = AABB::new(Vec3::new(-40.0, -5.0, -40.0), Vec3::new(40.0, 10.0, 40.0));
        let index = OctreeSpatialIndex::new(Octree::new(bounds, OctreeConfig::default()));

        let mut walls = OccluderSet::new();
        walls.add_box(
            AABB::new(Vec3::new(-3.0, 0.0, 6.0), Vec3::new(3.0, 3.0, 6.5)),
            LayerMask::ENVIRONMENT,
        );
        walls.add_sphere(Vec3::new(-7.0, 1.0, 4.0), 1.2, LayerMask::ENVIRONMENT);

        Ok(Self {
            sensor,
            overlay,
            reporter: SightReporter::default(),
            index,
            walls,
            patrols: Vec::new(),
            guard_position: Vec3::zeros(),
        })
    }

    fn spawn_intruders(&mut self, rng: &mut StdRng) {
        for id in 0..INTRUDERS {
            let patrol = Patrol {
                entity: Entity::new(id + 1),
                center: Vec3::new(rng.gen_range(-20.0..20.0), rng.gen_range(0.0..1.5), rng.gen_range(0.0..25.0)),
                radius: rng.gen_range(1.0..6.0),
                phase: rng.gen_range(0.0..TAU),
                angular_speed: rng.gen_range(-0.6..0.6),
            };
            // A few decoys on a layer the guard does not watch
            let layer = if id % 6 == 5 { LayerMask::PROP } else { LayerMask::PLAYER };

            self.index.insert(OctreeEntity {
                id: patrol.entity,
                position: patrol.position_at(0.0),
                radius: 0.4,
                layer,
                is_trigger: false,
            });
            self.patrols.push(patrol);
        }
        log::info!("Spawned {} intruders", self.patrols.len());
    }

    fn guard_pose(&self, time: f32) -> Transform {
        let yaw = (time * SWEEP_SPEED).to_radians().sin() * SWEEP_LIMIT;
        Transform::from_position_yaw(self.guard_position, yaw)
    }

    fn step(&mut self, time: f32) {
        for patrol in &self.patrols {
            self.index.update_position(patrol.entity, patrol.position_at(time));
        }

        let pose = self.guard_pose(time);
        self.sensor.tick(STEP, &pose, &self.index, &self.walls);

        self.reporter.time = time;
        let events = self.sensor.drain_events();
        let mut handlers: [&mut dyn SensorEventHandler; 2] = [&mut self.reporter, &mut self.overlay];
        dispatch(&events, &mut handlers);

        self.overlay.update(STEP);
        self.overlay.draw(&pose, &self.sensor);
    }

    fn run(&mut self) {
        let steps = (DURATION / STEP).round() as u32;
        for i in 0..steps {
            let time = i as f32 * STEP;
            self.step(time);

            // Halfway through the guard gets nervous and widens its gaze
            if i == steps / 2 {
                let wider = self.sensor.config().clone().with_half_angle(60.0).with_frequency(20);
                if let Err(e) = self.sensor.apply_config(wider) {
                    log::error!("Failed to widen the guard's view: {e}");
                }
            }
        }
    }

    fn report(&self) {
        let stats = self.sensor.stats();
        log::info!(
            "Finished: {} scans ({} skipped, {} truncated, {} missed), {} sightings, {} losses, {} in view at the end",
            stats.scans_completed,
            stats.scans_skipped,
            stats.truncated_scans,
            stats.missed_scans,
            self.reporter.spotted,
            self.reporter.lost,
            self.sensor.visible().len()
        );
        log::info!(
            "Overlay: {} shapes, wedge of {} triangles",
            self.overlay.get_shapes().len(),
            self.overlay.wedge().triangle_count()
        );
    }
}

fn load_config() -> SensorConfig {
    match std::env::args().nth(1) {
        Some(path) => match SensorConfig::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded sensor configuration from {path}");
                config
            }
            Err(e) => {
                log::warn!("Could not load {path} ({e}), using defaults");
                SensorConfig::default().with_layers(LayerMask::PLAYER | LayerMask::ENEMY, LayerMask::ENVIRONMENT)
            }
        },
        None => SensorConfig::default().with_layers(LayerMask::PLAYER | LayerMask::ENEMY, LayerMask::ENVIRONMENT),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    vision_sensor::foundation::logging::init();
    log::info!("Starting guard patrol demo");

    let config = load_config();
    let mut demo = GuardDemo::new(config)?;

    let mut rng = StdRng::seed_from_u64(SEED);
    demo.spawn_intruders(&mut rng);

    demo.run();
    demo.report();
    Ok(())
}
