//! Property tests for the motion invariants

use glam::Vec2;
use proptest::prelude::*;

use option_drift::platform::headless::{HeadlessSurface, ManualScheduler};
use option_drift::sim::collision::{collision_normal, overlap_depth};
use option_drift::sim::{
    ContactResponse, OptionBody, PhysicsConfig, PhysicsManager, Rect, TickOutcome, contain,
    inner_bounds, integrate, resolve_collisions,
};

const MAX_V: f32 = 2.5;

fn any_velocity() -> impl Strategy<Value = Vec2> {
    (-MAX_V..=MAX_V, -MAX_V..=MAX_V).prop_map(|(x, y)| Vec2::new(x, y))
}

fn any_size() -> impl Strategy<Value = Vec2> {
    (10.0f32..80.0, 10.0f32..60.0).prop_map(|(w, h)| Vec2::new(w, h))
}

fn any_body() -> impl Strategy<Value = OptionBody> {
    (-50.0f32..450.0, -50.0f32..350.0, any_size(), any_velocity())
        .prop_map(|(x, y, size, vel)| OptionBody::new(Vec2::new(x, y), size, vel))
}

/// Two bodies whose boxes overlap by at least half a unit on both axes
fn overlapping_pair() -> impl Strategy<Value = (OptionBody, OptionBody)> {
    (any_size(), any_size(), -1.0f32..1.0, -1.0f32..1.0, any_velocity(), any_velocity())
        .prop_map(|(sa, sb, fx, fy, va, vb)| {
            let a = OptionBody::new(Vec2::new(200.0, 150.0), sa, va);
            // Center offset strictly inside the overlap range on each axis
            let reach = (sa + sb) * 0.5 - Vec2::splat(0.5);
            let offset = Vec2::new(fx * reach.x, fy * reach.y);
            let center_b = a.center() + offset;
            let b = OptionBody::new(center_b - sb * 0.5, sb, vb);
            (a, b)
        })
}

fn all_finite(bodies: &[OptionBody]) -> bool {
    bodies.iter().all(|b| b.pos.is_finite() && b.vel.is_finite())
}

fn within_cap(bodies: &[OptionBody], cap: f32) -> bool {
    bodies
        .iter()
        .all(|b| b.vel.x.abs() <= cap + 1e-5 && b.vel.y.abs() <= cap + 1e-5)
}

proptest! {
    #[test]
    fn velocities_stay_capped(mut bodies in prop::collection::vec(any_body(), 2..8)) {
        let config = PhysicsConfig::default();
        resolve_collisions(&mut bodies, &config, 1000.0);
        prop_assert!(within_cap(&bodies, MAX_V));

        contain(&mut bodies, Vec2::new(400.0, 300.0), &config);
        prop_assert!(within_cap(&bodies, MAX_V));
    }

    #[test]
    fn resolved_pairs_respect_floor((a, b) in overlapping_pair()) {
        let config = PhysicsConfig::default();
        let mut bodies = vec![a, b];
        let contacts = resolve_collisions(&mut bodies, &config, 0.0);
        prop_assert_eq!(contacts.len(), 1);

        let contact = &contacts[0];
        if contact.resolved() {
            for body in &bodies {
                for v in [body.vel.x, body.vel.y] {
                    prop_assert!(v == 0.0 || v.abs() >= 0.3 - 1e-6, "component {}", v);
                }
            }
        }
    }

    #[test]
    fn separated_pairs_no_longer_overlap((a, b) in overlapping_pair()) {
        let config = PhysicsConfig::default();
        let mut bodies = vec![a, b];
        let contacts = resolve_collisions(&mut bodies, &config, 0.0);

        if let Some(ContactResponse::Resolved { separated: true }) = contacts.first().map(|c| c.response) {
            let depth = overlap_depth(&bodies[0].rect(), &bodies[1].rect());
            prop_assert!(depth.x < 0.0 || depth.y < 0.0, "still overlapping by {:?}", depth);
        }
    }

    #[test]
    fn receding_pairs_are_untouched((a, b) in overlapping_pair()) {
        let normal = collision_normal(&a.rect(), &b.rect());
        prop_assume!((a.vel - b.vel).dot(normal) >= 0.0);

        let config = PhysicsConfig::default();
        let mut bodies = vec![a.clone(), b.clone()];
        let contacts = resolve_collisions(&mut bodies, &config, 0.0);

        prop_assert_eq!(contacts[0].response, ContactResponse::Receding);
        prop_assert_eq!(&bodies[0], &a);
        prop_assert_eq!(&bodies[1], &b);
    }

    #[test]
    fn contained_bodies_end_inside(mut body in any_body()) {
        let config = PhysicsConfig::default();
        let container = Vec2::new(400.0, 300.0);
        let inner = inner_bounds(container, config.boundary_padding).unwrap();

        let hits = contain(std::slice::from_mut(&mut body), container, &config);
        let rect = body.rect();
        let eps = 1e-2;
        prop_assert!(rect.left() >= inner.left() - eps && rect.right() <= inner.right() + eps);
        prop_assert!(rect.top() >= inner.top() - eps && rect.bottom() <= inner.bottom() + eps);
        prop_assert!(hits.len() <= 2);
    }

    #[test]
    fn simulation_never_produces_nan(
        cells in prop::collection::vec((0u8..4, 0u8..3, any_velocity()), 2..10),
        zero_sized in 0usize..10,
    ) {
        // Coarse grid positions so coincident centers come up often
        let mut bodies: Vec<OptionBody> = cells
            .iter()
            .enumerate()
            .map(|(i, (cx, cy, vel))| {
                let size = if i == zero_sized { Vec2::ZERO } else { Vec2::new(40.0, 20.0) };
                OptionBody::new(Vec2::new(*cx as f32 * 30.0 + 20.0, *cy as f32 * 30.0 + 20.0), size, *vel)
            })
            .collect();

        let config = PhysicsConfig::default();
        let container = Vec2::new(240.0, 160.0);
        for frame in 0..120 {
            let now_ms = frame as f64 * 16.0;
            integrate(&mut bodies, 120.0, 0.016, &config);
            resolve_collisions(&mut bodies, &config, now_ms);
            contain(&mut bodies, container, &config);
            prop_assert!(all_finite(&bodies), "non-finite state at frame {}", frame);
        }
    }

    #[test]
    fn stalled_frames_skip_physics(gap_secs in 0.11f64..30.0) {
        let mut surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let id = surface.add_element(Vec2::new(60.0, 20.0), Some(Vec2::new(100.0, 100.0)));
        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 7);
        manager.add_option(id);
        manager.start(0.0).unwrap();

        prop_assert!(manager.scheduler_mut().fire());
        let advanced = manager.on_frame(16.0);
        prop_assert!(matches!(advanced, TickOutcome::Advanced(_)));
        let before = manager.options()[0].clone();

        prop_assert!(manager.scheduler_mut().fire());
        let stalled = manager.on_frame(16.0 + gap_secs * 1000.0);
        prop_assert!(matches!(stalled, TickOutcome::Stalled { .. }), "expected TickOutcome::Stalled");
        prop_assert_eq!(&manager.options()[0], &before);
        prop_assert!(manager.has_pending_frame());
        prop_assert_eq!(manager.scheduler().pending(), 1);
    }

    #[test]
    fn lifecycle_keeps_one_pending_frame(ops in prop::collection::vec(0u8..3, 1..40)) {
        let mut surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let id = surface.add_element(Vec2::new(60.0, 20.0), Some(Vec2::new(100.0, 100.0)));
        let mut manager = PhysicsManager::new(surface, ManualScheduler::new(), 7);
        manager.add_option(id);

        let mut now_ms = 0.0;
        for op in ops {
            now_ms += 16.0;
            match op {
                0 => manager.start(now_ms).unwrap(),
                1 => manager.stop(),
                _ => {
                    let was_running = manager.is_running();
                    manager.scheduler_mut().fire();
                    let outcome = manager.on_frame(now_ms);
                    if !was_running {
                        prop_assert_eq!(outcome, TickOutcome::Idle);
                    }
                }
            }

            prop_assert_eq!(manager.is_running(), manager.has_pending_frame());
            let expected = usize::from(manager.is_running());
            prop_assert_eq!(manager.scheduler().pending(), expected);
        }
    }
}
