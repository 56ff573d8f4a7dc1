//! Simulation manager
//!
//! Owns the options and drives one tick per host frame:
//! integrate, resolve collisions, then contain within the container.
//! The loop is cooperative: every frame callback requests the next one, and
//! `stop()` clears the running flag and cancels whatever is still pending.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::OptionBody;
use super::boundary::{BoundaryHit, contain};
use super::collision::{Contact, ContactResponse, resolve_collisions};
use super::config::PhysicsConfig;
use super::effects::{CollisionFx, EdgeFx, EffectSink, NoOpEffects};
use super::integrate::integrate;
use crate::consts::FPS_REPORT_MS;
use crate::error::HostError;
use crate::platform::{FrameScheduler, Surface};
use crate::settings::Settings;

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// What happened during one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Elapsed time since the previous frame (seconds, before capping)
    pub dt: f32,
    /// Bodies integrated
    pub moved: usize,
    /// Overlapping pairs found by the resolver
    pub contacts: Vec<Contact>,
    /// Edge corrections
    pub boundary_hits: Vec<BoundaryHit>,
}

/// Result of one frame callback
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Manager is stopped: nothing ran and nothing was rescheduled
    Idle,
    /// Frame gap too long: physics skipped, next frame scheduled
    Stalled { dt: f32 },
    /// Physics ran
    Advanced(TickReport),
}

/// Rolling frame-rate counter (diagnostic only)
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u32,
    window_start_ms: f64,
    last_fps: Option<f32>,
}

impl FrameStats {
    pub fn reset(&mut self, now_ms: f64) {
        self.frames = 0;
        self.window_start_ms = now_ms;
    }

    /// Count a frame. Returns the average FPS each time a report window closes.
    pub fn record(&mut self, now_ms: f64) -> Option<f32> {
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed < FPS_REPORT_MS {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed) as f32;
        self.last_fps = Some(fps);
        self.reset(now_ms);
        Some(fps)
    }

    /// Last reported average
    pub fn fps(&self) -> Option<f32> {
        self.last_fps
    }
}

/// Where an element's untransformed box sits, and what we last moved it by
#[derive(Debug, Clone, Copy, Default)]
struct Placement {
    /// Untransformed top-left inside the container
    origin: Vec2,
    /// Translation currently applied to the element
    applied: Vec2,
    /// False until the element has been measured against the container
    located: bool,
}

/// Drives the floating options inside one container.
///
/// `elements[i]` is the visual for `bodies[i]`; both stay in registration order.
/// Body positions are container-local; the translation written back is the
/// body position minus the element's layout origin.
pub struct PhysicsManager<S: Surface, F: FrameScheduler, X: EffectSink<S::Element> = NoOpEffects> {
    surface: S,
    scheduler: F,
    effects: X,
    config: PhysicsConfig,
    settings: Settings,
    elements: Vec<S::Element>,
    bodies: Vec<OptionBody>,
    placements: Vec<Placement>,
    state: RunState,
    pending: Option<F::Handle>,
    last_tick_ms: f64,
    stats: FrameStats,
    rng: Pcg32,
}

impl<S: Surface, F: FrameScheduler> PhysicsManager<S, F, NoOpEffects> {
    /// Manager without visual effects
    pub fn new(surface: S, scheduler: F, seed: u64) -> Self {
        Self::with_effects(surface, scheduler, NoOpEffects, seed)
    }
}

impl<S: Surface, F: FrameScheduler, X: EffectSink<S::Element>> PhysicsManager<S, F, X> {
    pub fn with_effects(surface: S, scheduler: F, effects: X, seed: u64) -> Self {
        Self {
            surface,
            scheduler,
            effects,
            config: PhysicsConfig::default(),
            settings: Settings::default(),
            elements: Vec::new(),
            bodies: Vec::new(),
            placements: Vec::new(),
            state: RunState::Stopped,
            pending: None,
            last_tick_ms: 0.0,
            stats: FrameStats::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    // === Registration ===

    /// Start managing `element`. Returns its index.
    ///
    /// The starting position is where the element sits on screen, with its
    /// current transform taken as the translation already applied. Without
    /// container geometry the transform itself, then the layout offset, is
    /// used. Registering an element twice returns the existing index.
    pub fn add_option(&mut self, element: S::Element) -> usize {
        if let Some(index) = self.index_of(&element) {
            return index;
        }

        let rect = self.surface.element_rect(&element).filter(|r| !r.is_empty());
        let local = match (rect, self.surface.container_rect()) {
            (Some(r), Some(c)) => Some(r.min - c.min),
            _ => None,
        };

        let (pos, placement) = match (self.surface.current_translation(&element), local) {
            (Some(t), Some(l)) => (l, Placement { origin: l - t, applied: t, located: true }),
            (Some(t), None) => (t, Placement { origin: Vec2::ZERO, applied: t, located: false }),
            (None, local) => {
                log::warn!("No transform on option, using its layout position");
                let pos = local
                    .or_else(|| self.surface.layout_offset(&element))
                    .unwrap_or(Vec2::ZERO);
                let placement = Placement {
                    origin: pos,
                    applied: Vec2::ZERO,
                    located: local.is_some(),
                };
                (pos, placement)
            }
        };
        let size = rect.map(|r| r.size).unwrap_or(Vec2::ZERO);

        let mut body = OptionBody::spawn(pos, size, &self.config, &mut self.rng);
        body.hidden = self.surface.is_hidden(&element);
        log::debug!(
            "Option {} at ({:.1}, {:.1}) with velocity ({:.2}, {:.2})",
            self.bodies.len(),
            body.pos.x,
            body.pos.y,
            body.vel.x,
            body.vel.y
        );

        self.elements.push(element);
        self.bodies.push(body);
        self.placements.push(placement);
        self.bodies.len() - 1
    }

    /// Stop managing `element`, returning its final state
    pub fn remove_option(&mut self, element: &S::Element) -> Option<OptionBody> {
        let index = self.index_of(element)?;
        self.elements.remove(index);
        self.placements.remove(index);
        Some(self.bodies.remove(index))
    }

    pub fn index_of(&self, element: &S::Element) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    /// Reverse lookup used by drag handlers and the like
    pub fn option_by_element(&self, element: &S::Element) -> Option<&OptionBody> {
        self.index_of(element).map(|i| &self.bodies[i])
    }

    pub fn option_by_element_mut(&mut self, element: &S::Element) -> Option<&mut OptionBody> {
        self.index_of(element).map(|i| &mut self.bodies[i])
    }

    pub fn options(&self) -> &[OptionBody] {
        &self.bodies
    }

    pub fn elements(&self) -> &[S::Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    // === Lifecycle ===

    /// Begin ticking. No-op if already running.
    ///
    /// If the first frame can't be scheduled the manager stays stopped.
    pub fn start(&mut self, now_ms: f64) -> Result<(), HostError> {
        if self.state == RunState::Running {
            return Ok(());
        }
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        self.state = RunState::Running;
        self.last_tick_ms = now_ms;
        self.stats.reset(now_ms);
        log::info!("Physics started with {} options", self.bodies.len());
        Ok(())
    }

    /// Stop ticking and cancel the pending frame. No-op if already stopped.
    pub fn stop(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::info!("Physics stopped");
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// True while a frame callback is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame callback. `now_ms` is the host's frame timestamp.
    pub fn on_frame(&mut self, now_ms: f64) -> TickOutcome {
        // The request that brought us here has fired
        self.pending = None;
        if self.state != RunState::Running {
            return TickOutcome::Idle;
        }

        let dt = ((now_ms - self.last_tick_ms) / 1000.0) as f32;
        self.last_tick_ms = now_ms;

        let outcome = if dt > self.config.stall_threshold_secs {
            log::warn!("Frame gap of {:.3}s, skipping physics this frame", dt);
            TickOutcome::Stalled { dt }
        } else {
            let report = self.step(dt, now_ms);
            if let Some(fps) = self.stats.record(now_ms) {
                log::debug!("Physics running at {:.0} FPS", fps);
            }
            TickOutcome::Advanced(report)
        };

        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => {
                log::error!("Physics loop halted: {}", e);
                self.state = RunState::Stopped;
            }
        }

        outcome
    }

    /// Run one physics step without touching the scheduler.
    pub fn step(&mut self, dt: f32, now_ms: f64) -> TickReport {
        self.sync_from_surface();

        let moved = integrate(&mut self.bodies, self.settings.speed, dt, &self.config);
        self.write_back_visible();

        let contacts = resolve_collisions(&mut self.bodies, &self.config, now_ms);
        let container = self.surface.container_rect();
        for contact in contacts.iter().filter(|c| c.resolved()) {
            if contact.response == (ContactResponse::Resolved { separated: true }) {
                self.write_back(contact.a);
                self.write_back(contact.b);
            }
            if self.settings.effects_enabled {
                let origin = container.map(|c| c.min).unwrap_or(Vec2::ZERO);
                let fx = CollisionFx {
                    point: origin + contact.point,
                    at_ms: now_ms,
                    highlight_ms: self.config.highlight_ms,
                };
                self.effects
                    .on_collision(&self.elements[contact.a], &self.elements[contact.b], &fx);
            }
        }

        let boundary_hits = match container {
            Some(rect) if !rect.is_empty() => {
                let hits = contain(&mut self.bodies, rect.size, &self.config);
                self.write_back_visible();
                for hit in &hits {
                    log::debug!(
                        "Option {} bounced off {} edge ({:.1}px deep)",
                        hit.index,
                        hit.edge.as_str(),
                        hit.penetration
                    );
                    let fx = EdgeFx {
                        edge: hit.edge,
                        at_ms: now_ms,
                        highlight_ms: self.config.highlight_ms,
                    };
                    self.effects.on_edge(&self.elements[hit.index], &fx);
                }
                hits
            }
            _ => {
                log::debug!("Container has no geometry, skipping boundary pass");
                Vec::new()
            }
        };

        TickReport {
            dt,
            moved,
            contacts,
            boundary_hits,
        }
    }

    /// Refresh visibility, rendered size and layout origin from the page
    fn sync_from_surface(&mut self) {
        let container = self.surface.container_rect();
        let entries = self
            .elements
            .iter()
            .zip(self.bodies.iter_mut())
            .zip(self.placements.iter_mut());
        for ((element, body), placement) in entries {
            body.hidden = self.surface.is_hidden(element);
            let Some(rect) = self.surface.element_rect(element).filter(|r| !r.is_empty()) else {
                continue;
            };
            body.size = rect.size;
            // Layout may have moved the untransformed box
            if let Some(c) = container {
                let local = rect.min - c.min;
                if !placement.located {
                    body.pos = local;
                    placement.located = true;
                }
                placement.origin = local - placement.applied;
            }
        }
    }

    fn write_back(&mut self, index: usize) {
        let placement = &mut self.placements[index];
        placement.applied = self.bodies[index].pos - placement.origin;
        self.surface
            .apply_translation(&self.elements[index], placement.applied);
    }

    fn write_back_visible(&mut self) {
        let entries = self
            .elements
            .iter()
            .zip(&self.bodies)
            .zip(self.placements.iter_mut());
        for ((element, body), placement) in entries {
            if !body.hidden {
                placement.applied = body.pos - placement.origin;
                self.surface.apply_translation(element, placement.applied);
            }
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings for UI controls (speed slider, effects toggle)
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn effects(&self) -> &X {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut X {
        &mut self.effects
    }

    /// Last reported frame rate
    pub fn fps(&self) -> Option<f32> {
        self.stats.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{ElementId, HeadlessSurface, ManualScheduler, drive};
    use crate::sim::Rect;
    use crate::sim::effects::{BOUNCE_CLASS, EffectLog};

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Rect::new(0.0, 0.0, 300.0, 300.0))
    }

    fn manager_with(
        positions: &[Vec2],
    ) -> (PhysicsManager<HeadlessSurface, ManualScheduler>, Vec<ElementId>) {
        let mut surface = surface();
        let ids: Vec<ElementId> = positions
            .iter()
            .map(|p| surface.add_element(Vec2::splat(20.0), Some(*p)))
            .collect();
        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 1);
        for id in &ids {
            manager.add_option(*id);
        }
        (manager, ids)
    }

    #[test]
    fn test_add_option_seeds_from_transform() {
        let (manager, ids) = manager_with(&[Vec2::new(40.0, 60.0)]);
        let body = manager.option_by_element(&ids[0]).unwrap();
        assert_eq!(body.pos, Vec2::new(40.0, 60.0));
        assert_eq!(body.size, Vec2::splat(20.0));
        assert!(body.vel.x.abs() >= 0.5 && body.vel.x.abs() <= 2.5);
    }

    #[test]
    fn test_add_option_falls_back_to_layout_offset() {
        let mut surface = surface();
        let id = surface.add_element(Vec2::splat(20.0), None);
        surface.element_mut(id).unwrap().layout_offset = Vec2::new(12.0, 8.0);

        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 1);
        manager.add_option(id);
        assert_eq!(manager.option_by_element(&id).unwrap().pos, Vec2::new(12.0, 8.0));

        // Written translation is relative to the untransformed box
        manager.step(0.0, 0.0);
        let pos = manager.options()[0].pos;
        assert_eq!(manager.surface().translation(id), Some(pos - Vec2::new(12.0, 8.0)));
    }

    #[test]
    fn test_add_option_without_container_geometry() {
        let mut surface = surface();
        surface.container = None;
        let id = surface.add_element(Vec2::splat(20.0), None);
        surface.element_mut(id).unwrap().layout_offset = Vec2::new(12.0, 8.0);

        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 1);
        manager.add_option(id);
        assert_eq!(manager.option_by_element(&id).unwrap().pos, Vec2::new(12.0, 8.0));
    }

    #[test]
    fn test_boundary_uses_on_screen_position() {
        let mut surface = HeadlessSurface::new(Rect::new(100.0, 50.0, 300.0, 300.0));
        let id = surface.add_element(Vec2::splat(20.0), Some(Vec2::new(250.0, 100.0)));
        surface.element_mut(id).unwrap().layout_offset = Vec2::new(40.0, 0.0);

        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 1);
        manager.add_option(id);
        assert_eq!(manager.options()[0].pos, Vec2::new(290.0, 100.0));
        manager.option_by_element_mut(&id).unwrap().vel = Vec2::new(1.5, 0.0);

        let report = manager.step(0.0, 0.0);
        assert_eq!(report.boundary_hits.len(), 1);
        assert!(manager.options()[0].vel.x <= 0.0);

        // Right edge on screen sits on the padded container edge (100 + 300 - 20)
        let on_screen = manager.surface().element_rect(&id).unwrap();
        assert!(on_screen.right() <= 380.0 + 1e-3, "right {}", on_screen.right());
        assert_eq!(manager.surface().translation(id), Some(Vec2::new(220.0, 100.0)));
    }

    #[test]
    fn test_layout_shift_keeps_screen_position() {
        let (mut manager, ids) = manager_with(&[Vec2::new(100.0, 100.0)]);
        manager.option_by_element_mut(&ids[0]).unwrap().vel = Vec2::ZERO;

        // Page reflows and moves the untransformed box 30px right
        manager.surface_mut().element_mut(ids[0]).unwrap().layout_offset = Vec2::new(30.0, 0.0);
        manager.step(0.0, 0.0);

        assert_eq!(manager.options()[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(manager.surface().translation(ids[0]), Some(Vec2::new(70.0, 100.0)));
        let on_screen = manager.surface().element_rect(&ids[0]).unwrap();
        assert_eq!(on_screen.min, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_duplicate_registration_and_removal() {
        let (mut manager, ids) = manager_with(&[Vec2::new(40.0, 60.0), Vec2::new(100.0, 100.0)]);
        assert_eq!(manager.add_option(ids[1]), 1);
        assert_eq!(manager.len(), 2);

        assert!(manager.remove_option(&ids[0]).is_some());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.index_of(&ids[1]), Some(0));
        assert!(manager.option_by_element(&ids[0]).is_none());
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut manager, _) = manager_with(&[Vec2::new(40.0, 60.0)]);
        manager.start(0.0).unwrap();
        manager.start(5.0).unwrap();
        assert!(manager.is_running());
        assert_eq!(manager.scheduler().pending(), 1);
        assert_eq!(manager.scheduler().requests, 1);
    }

    #[test]
    fn test_stop_cancels_and_is_idempotent() {
        let (mut manager, _) = manager_with(&[Vec2::new(40.0, 60.0)]);
        manager.start(0.0).unwrap();
        manager.stop();
        manager.stop();
        assert!(!manager.is_running());
        assert!(!manager.has_pending_frame());
        assert_eq!(manager.scheduler().pending(), 0);
        assert_eq!(manager.scheduler().cancellations, 1);
    }

    #[test]
    fn test_frame_after_stop_is_idle() {
        let (mut manager, _) = manager_with(&[Vec2::new(40.0, 60.0)]);
        manager.start(0.0).unwrap();
        manager.stop();
        assert_eq!(manager.on_frame(16.0), TickOutcome::Idle);
        assert_eq!(manager.scheduler().pending(), 0);
    }

    #[test]
    fn test_loop_reschedules_each_frame() {
        let (mut manager, _) = manager_with(&[Vec2::new(100.0, 100.0)]);
        manager.start(0.0).unwrap();

        let outcomes = drive(&mut manager, 0.0, 16.0, 10);
        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(|o| matches!(o, TickOutcome::Advanced(_))));
        assert_eq!(manager.scheduler().pending(), 1);
    }

    #[test]
    fn test_stall_skips_physics_but_continues() {
        let (mut manager, _) = manager_with(&[Vec2::new(100.0, 100.0)]);
        let before = manager.options()[0].clone();
        manager.start(0.0).unwrap();

        assert!(manager.scheduler_mut().fire());
        let outcome = manager.on_frame(500.0);
        assert!(matches!(outcome, TickOutcome::Stalled { dt } if (dt - 0.5).abs() < 1e-6));
        assert_eq!(manager.options()[0].pos, before.pos);
        assert!(manager.is_running());
        assert_eq!(manager.scheduler().pending(), 1);

        // Next normal frame moves again
        assert!(manager.scheduler_mut().fire());
        let outcome = manager.on_frame(516.0);
        assert!(matches!(outcome, TickOutcome::Advanced(_)));
        assert_ne!(manager.options()[0].pos, before.pos);
    }

    #[test]
    fn test_reschedule_failure_stops() {
        let (mut manager, _) = manager_with(&[Vec2::new(100.0, 100.0)]);
        manager.start(0.0).unwrap();
        manager.scheduler_mut().fire();
        manager.scheduler_mut().refuse = true;

        manager.on_frame(16.0);
        assert!(!manager.is_running());
        assert!(!manager.has_pending_frame());
    }

    #[test]
    fn test_start_failure_stays_stopped() {
        let (mut manager, _) = manager_with(&[Vec2::new(100.0, 100.0)]);
        manager.scheduler_mut().refuse = true;
        assert!(manager.start(0.0).is_err());
        assert_eq!(manager.state(), RunState::Stopped);
    }

    #[test]
    fn test_hidden_options_are_frozen() {
        let (mut manager, ids) = manager_with(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0)]);
        manager.surface_mut().set_hidden(ids[0], true);
        let frozen = manager.options()[0].pos;

        let report = manager.step(0.016, 16.0);
        assert_eq!(report.moved, 1);
        assert_eq!(manager.options()[0].pos, frozen);
        assert!(manager.options()[0].hidden);
    }

    #[test]
    fn test_step_writes_transforms_back() {
        let (mut manager, ids) = manager_with(&[Vec2::new(100.0, 100.0)]);
        manager.step(0.016, 16.0);
        let written = manager.surface().translation(ids[0]).unwrap();
        assert_eq!(written, manager.options()[0].pos);
    }

    #[test]
    fn test_collision_effects_gated_by_setting() {
        let mut surface = surface();
        let a = surface.add_element(Vec2::splat(20.0), Some(Vec2::new(100.0, 100.0)));
        let b = surface.add_element(Vec2::splat(20.0), Some(Vec2::new(115.0, 100.0)));

        let mut manager = PhysicsManager::with_effects(
            surface,
            ManualScheduler::new(),
            EffectLog::<ElementId>::new(),
            3,
        );
        manager.add_option(a);
        manager.add_option(b);
        manager.option_by_element_mut(&a).unwrap().vel = Vec2::new(1.0, 0.0);
        manager.option_by_element_mut(&b).unwrap().vel = Vec2::new(-1.0, 0.0);

        manager.settings_mut().effects_enabled = false;
        let report = manager.step(0.0, 0.0);
        assert!(report.contacts[0].resolved());
        assert!(manager.effects().sparks.is_empty());

        // Same setup with effects on
        let body_a = manager.option_by_element_mut(&a).unwrap();
        body_a.pos = Vec2::new(100.0, 100.0);
        body_a.vel = Vec2::new(1.0, 0.0);
        body_a.last_collision_ms = None;
        let body_b = manager.option_by_element_mut(&b).unwrap();
        body_b.pos = Vec2::new(115.0, 100.0);
        body_b.vel = Vec2::new(-1.0, 0.0);
        body_b.last_collision_ms = None;

        manager.settings_mut().effects_enabled = true;
        manager.step(0.0, 1000.0);
        assert_eq!(manager.effects().sparks.len(), 1);
        assert!(manager.effects().is_highlighted(&a, BOUNCE_CLASS, 1100.0));
    }

    #[test]
    fn test_edge_effects_reported() {
        let mut surface = surface();
        let id = surface.add_element(Vec2::splat(20.0), Some(Vec2::new(285.0, 100.0)));
        let mut manager = PhysicsManager::with_effects(
            surface,
            ManualScheduler::new(),
            EffectLog::<ElementId>::new(),
            1,
        );
        manager.add_option(id);
        manager.option_by_element_mut(&id).unwrap().vel = Vec2::new(1.5, 0.0);

        let report = manager.step(0.0, 0.0);
        assert_eq!(report.boundary_hits.len(), 1);
        assert!(manager.effects().is_highlighted(&id, "bounce-right", 100.0));
        assert!(manager.options()[0].rect().right() <= 280.0);
        assert!(manager.options()[0].vel.x <= 0.0);
    }

    #[test]
    fn test_missing_container_skips_boundary() {
        let (mut manager, _) = manager_with(&[Vec2::new(500.0, 500.0)]);
        manager.surface_mut().container = None;
        let report = manager.step(0.0, 0.0);
        assert!(report.boundary_hits.is_empty());
    }

    #[test]
    fn test_frame_stats_report_window() {
        let mut stats = FrameStats::default();
        stats.reset(0.0);

        let mut reported = None;
        for i in 1..=400 {
            if let Some(fps) = stats.record(i as f64 * 16.0) {
                reported = Some(fps);
                break;
            }
        }
        // Window closes at frame 313 (5008 ms)
        let fps = reported.unwrap();
        assert!(fps > 55.0 && fps < 65.0);
        assert_eq!(stats.fps(), Some(fps));
    }
}
