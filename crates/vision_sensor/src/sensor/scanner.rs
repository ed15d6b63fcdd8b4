//! Periodic vision sensor
//!
//! [`VisionSensor`] owns the scan cadence, the candidate buffer and the
//! visible set. Each scan cycle asks the spatial index for everything in
//! range, runs the field-of-view test over the buffered candidates and then
//! swaps the result in as the new visible set. Readers between calls only
//! ever see a complete cycle's result.

use crate::ecs::Entity;
use crate::error::{CollaboratorError, SensorResult};
use crate::events::{EventQueue, SensorEvent};
use crate::foundation::math::Transform;
use crate::foundation::time::IntervalTimer;
use crate::physics::occlusion::OcclusionTest;
use crate::sensor::candidates::CandidateBuffer;
use crate::sensor::config::SensorConfig;
use crate::sensor::fov::check_field_of_view;
use crate::spatial::{Candidate, QueryTriggerInteraction, SpatialIndex, SphereQuery};

/// Most scan cycles run by a single `tick`
///
/// Any backlog beyond this is counted in [`SensorStats::missed_scans`]
/// instead of run.
pub const MAX_SCANS_PER_TICK: u32 = 4;

/// Running counters for a sensor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorStats {
    /// Scan cycles that replaced the visible set
    pub scans_completed: u64,

    /// Scan cycles abandoned after a collaborator failure
    pub scans_skipped: u64,

    /// Completed cycles whose index results did not all fit the buffer
    pub truncated_scans: u64,

    /// Candidates examined by the last completed cycle
    pub last_candidate_count: usize,

    /// Size of the visible set after the last completed cycle
    pub last_visible_count: usize,

    /// Cycles that fell due during an oversized time step and were not run
    pub missed_scans: u64,
}

impl SensorStats {
    /// Total cycles attempted
    pub fn scans_attempted(&self) -> u64 {
        self.scans_completed + self.scans_skipped
    }
}

/// Field-of-view sensor re-evaluated at a fixed frequency
#[derive(Debug, Clone)]
pub struct VisionSensor {
    config: SensorConfig,
    timer: IntervalTimer,
    candidates: CandidateBuffer,
    visible: Vec<Entity>,
    scratch: Vec<Entity>,
    stats: SensorStats,
    previous_truncated: bool,
    events: EventQueue,
}

impl VisionSensor {
    /// Create a sensor; the first scan runs one interval after creation
    pub fn new(config: SensorConfig) -> SensorResult<Self> {
        config.check()?;

        let candidates = CandidateBuffer::new();
        let capacity = candidates.capacity();
        let timer = IntervalTimer::new(config.scan_interval());

        log::debug!(
            "Vision sensor created: range {}, half angle {}°, {} Hz",
            config.max_range,
            config.half_angle_degrees,
            config.scan_frequency_hz
        );

        Ok(Self {
            config,
            timer,
            candidates,
            visible: Vec::with_capacity(capacity),
            scratch: Vec::with_capacity(capacity),
            stats: SensorStats::default(),
            previous_truncated: false,
            events: EventQueue::new(),
        })
    }

    /// Advance the scan countdown and run every scan cycle that fell due
    ///
    /// Returns the number of cycles attempted, at most
    /// [`MAX_SCANS_PER_TICK`]. Collaborator failures are
    /// absorbed here: the failing cycle is skipped and counted, and the
    /// previous visible set stays in place.
    pub fn tick<S, O>(&mut self, elapsed_seconds: f32, pose: &Transform, index: &S, occlusion: &O) -> usize
    where
        S: SpatialIndex + ?Sized,
        O: OcclusionTest + ?Sized,
    {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            log::warn!("Ignoring invalid sensor time step {elapsed_seconds}");
            return 0;
        }

        let due = self.timer.advance(elapsed_seconds);
        let run = due.min(MAX_SCANS_PER_TICK);
        if due > run {
            let missed = due - run;
            self.stats.missed_scans += u64::from(missed);
            log::warn!("Sensor step of {elapsed_seconds}s overran the scan cadence, {missed} cycles not run");
        }

        for _ in 0..run {
            // scan() already counted and logged the failure
            let _ = self.scan(pose, index, occlusion);
        }
        run as usize
    }

    /// Run one scan cycle immediately, outside the cadence
    ///
    /// Returns the size of the new visible set. On a collaborator failure the
    /// previous visible set is kept and the error is returned.
    pub fn scan<S, O>(&mut self, pose: &Transform, index: &S, occlusion: &O) -> SensorResult<usize>
    where
        S: SpatialIndex + ?Sized,
        O: OcclusionTest + ?Sized,
    {
        match self.run_cycle(pose, index, occlusion) {
            Ok(()) => {
                self.commit();
                Ok(self.visible.len())
            }
            Err(reason) => {
                self.candidates.clear();
                self.scratch.clear();
                self.stats.scans_skipped += 1;
                log::warn!("Vision scan skipped, keeping {} visible: {reason}", self.visible.len());

                self.events.send(SensorEvent::ScanSkipped { reason: reason.clone() });
                Err(reason.into())
            }
        }
    }

    fn run_cycle<S, O>(&mut self, pose: &Transform, index: &S, occlusion: &O) -> Result<(), CollaboratorError>
    where
        S: SpatialIndex + ?Sized,
        O: OcclusionTest + ?Sized,
    {
        let query = SphereQuery {
            origin: pose.position,
            radius: self.config.max_range,
            layers: self.config.candidate_layers,
            triggers: QueryTriggerInteraction::Collide,
        };

        self.candidates.clear();
        index.query_within_radius(&query, &mut self.candidates)?;

        self.scratch.clear();
        for candidate in self.candidates.iter() {
            // An index may report the same entity more than once
            if self.scratch.contains(&candidate.entity) {
                continue;
            }
            let verdict = check_field_of_view(pose, &self.config, candidate.position, occlusion)?;
            if verdict.is_visible() {
                self.scratch.push(candidate.entity);
            }
        }

        Ok(())
    }

    /// Swap the scratch set in and report what changed
    fn commit(&mut self) {
        for &entity in &self.scratch {
            if !self.visible.contains(&entity) {
                self.events.send(SensorEvent::VisibilityGained(entity));
            }
        }
        for &entity in &self.visible {
            if !self.scratch.contains(&entity) {
                self.events.send(SensorEvent::VisibilityLost(entity));
            }
        }

        std::mem::swap(&mut self.visible, &mut self.scratch);
        self.scratch.clear();

        let candidate_count = self.candidates.len();
        let dropped = self.candidates.dropped();
        let truncated = self.candidates.truncated();

        self.stats.scans_completed += 1;
        self.stats.last_candidate_count = candidate_count;
        self.stats.last_visible_count = self.visible.len();

        if truncated {
            self.stats.truncated_scans += 1;
            if self.previous_truncated {
                log::debug!("Candidate buffer full again, {dropped} results dropped");
            } else {
                log::warn!(
                    "Candidate buffer full: kept {candidate_count}, dropped {dropped} results beyond the cap"
                );
            }
        }
        self.previous_truncated = truncated;

        log::debug!("Vision scan: {} candidates, {} visible", candidate_count, self.visible.len());

        self.events.send(SensorEvent::ScanCompleted {
            candidates: candidate_count,
            visible: self.visible.len(),
            dropped,
        });
    }

    /// True if `entity` was judged visible by the last completed cycle
    pub fn is_visible(&self, entity: Entity) -> bool {
        self.visible.contains(&entity)
    }

    /// Entities visible after the last completed cycle, in index order
    pub fn visible(&self) -> &[Entity] {
        &self.visible
    }

    /// Candidates buffered by the last cycle
    pub fn candidates(&self) -> &[Candidate] {
        self.candidates.as_slice()
    }

    /// Running counters
    pub fn stats(&self) -> &SensorStats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Seconds between scan cycles
    pub fn scan_interval(&self) -> f32 {
        self.timer.interval()
    }

    /// Seconds until the next scheduled cycle
    pub fn countdown(&self) -> f32 {
        self.timer.remaining()
    }

    /// Install a new configuration
    ///
    /// Invalid configurations are rejected and the current one stays active.
    /// The countdown is clamped so a higher frequency applies from the next
    /// cycle on.
    pub fn apply_config(&mut self, config: SensorConfig) -> SensorResult<()> {
        if let Err(err) = config.check() {
            log::warn!("Rejected sensor configuration: {err}");
            return Err(err);
        }

        self.timer.set_interval(config.scan_interval());
        self.config = config;

        log::info!(
            "Sensor configuration applied: range {}, half angle {}°, {} Hz",
            self.config.max_range,
            self.config.half_angle_degrees,
            self.config.scan_frequency_hz
        );

        self.events.send(SensorEvent::ConfigChanged {
            shape: self.config.shape(),
            scan_interval: self.timer.interval(),
        });
        Ok(())
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SensorEvent> {
        self.events.drain()
    }

    /// Events waiting to be drained
    ///
    /// Bounded by [`MAX_PENDING_EVENTS`](crate::events::MAX_PENDING_EVENTS);
    /// the oldest are evicted when nobody drains.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Events evicted because they were never drained
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }
}
