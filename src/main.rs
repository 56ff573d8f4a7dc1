//! Option Drift entry point
//!
//! On the web this wires the physics manager to the page's `.option`
//! elements and controls. Natively it runs a headless simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement};

    use option_drift::layout::{
        FALLBACK_CONTAINER_HEIGHT, MIN_CONTAINER_HEIGHT, orbit_positions, translate_css,
    };
    use option_drift::platform::web::{DomEffects, DomSurface, RafScheduler};
    use option_drift::settings::percent_color;
    use option_drift::{HostError, PhysicsManager, Settings};

    type WebManager = PhysicsManager<DomSurface, RafScheduler, DomEffects>;

    fn find(document: &Document, selector: &str) -> Result<HtmlElement, HostError> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| HostError::MissingElement(selector.to_string()))
    }

    fn find_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    /// Take options out of CSS flow and put them on the orbit ring
    fn seed_layout(container: &HtmlElement, options: &[HtmlElement], seed: u64) {
        if (container.client_height() as f32) < MIN_CONTAINER_HEIGHT {
            let _ = container
                .style()
                .set_property("min-height", &format!("{}px", FALLBACK_CONTAINER_HEIGHT));
        }

        let rect = container.get_bounding_client_rect();
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);
        let sizes: Vec<Vec2> = options
            .iter()
            .map(|o| {
                let r = o.get_bounding_client_rect();
                Vec2::new(r.width() as f32, r.height() as f32)
            })
            .collect();

        let mut rng = Pcg32::seed_from_u64(seed);
        for (option, pos) in options.iter().zip(orbit_positions(size, &sizes, &mut rng)) {
            let style = option.style();
            let _ = style.set_property("animation", "none");
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("left", "0");
            let _ = style.set_property("top", "0");
            let _ = style.set_property("margin", "0");
            let _ = style.set_property("transform", &translate_css(pos));
            let _ = option.class_list().add_1("physics-controlled");
            log::debug!("Seeded option at ({:.1}, {:.1})", pos.x, pos.y);
        }
    }

    fn show_speed(document: &Document, settings: &Settings) {
        if let Ok(label) = find(document, "#speed-value") {
            let tier = settings.speed_tier();
            label.set_text_content(Some(tier.label()));
            let _ = label.style().set_property("color", tier.color());
        }
        if let Ok(label) = find(document, "#speed-percentage") {
            let percent = settings.speed_percent();
            label.set_text_content(Some(&format!("{}%", percent)));
            let _ = label.style().set_property("color", percent_color(percent));
        }
    }

    fn show_effects(document: &Document, enabled: bool) {
        if let Some(body) = document.body() {
            let _ = body
                .class_list()
                .toggle_with_force("effects-disabled", !enabled);
        }
    }

    fn setup_speed_slider(document: &Document, manager: Rc<RefCell<WebManager>>) {
        let Some(slider) = find(document, "#speed-slider")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("No speed slider found");
            return;
        };

        let settings = manager.borrow().settings().clone();
        slider.set_value(&settings.speed.to_string());
        show_speed(document, &settings);

        let document = document.clone();
        let input = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(speed) = input.value().parse::<f32>() else {
                return;
            };
            let mut m = manager.borrow_mut();
            m.settings_mut().set_speed(speed);
            m.settings().save();
            show_speed(&document, m.settings());
            log::info!("Speed set to {}", m.settings().speed);
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_effects_toggle(document: &Document, manager: Rc<RefCell<WebManager>>) {
        let Some(toggle) = find(document, "#effects-toggle")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("No effects toggle found");
            return;
        };

        toggle.set_checked(manager.borrow().settings().effects_enabled);

        let document = document.clone();
        let input = toggle.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let enabled = input.checked();
            let mut m = manager.borrow_mut();
            m.settings_mut().effects_enabled = enabled;
            m.settings().save();
            show_effects(&document, enabled);
            log::info!("Effects {}", if enabled { "enabled" } else { "disabled" });
        });
        let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() -> Result<(), HostError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Option Drift starting...");

        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        let container = find(&document, ".options-container")?;
        let options = find_all(&document, ".option");
        if options.is_empty() {
            return Err(HostError::MissingElement(".option".into()));
        }

        let seed = js_sys::Date::now() as u64;
        seed_layout(&container, &options, seed);

        let settings = Settings::load();
        show_effects(&document, settings.effects_enabled);

        let scheduler = RafScheduler::new(window.clone());
        let slot = scheduler.callback_slot();
        let surface = DomSurface::new(window.clone(), container);
        let effects = DomEffects::new(window.clone(), document.clone(), seed);

        let mut manager = WebManager::with_effects(surface, scheduler, effects, seed)
            .with_settings(settings);
        for option in options {
            manager.add_option(option);
        }
        log::info!("Registered {} options", manager.len());

        let manager = Rc::new(RefCell::new(manager));
        {
            let manager = manager.clone();
            *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                manager.borrow_mut().on_frame(time);
            }));
        }

        setup_speed_slider(&document, manager.clone());
        setup_effects_toggle(&document, manager.clone());

        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        manager.borrow_mut().start(now)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Option Drift failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Option Drift (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` for the web version");

    run_headless(8, 600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate `count` options for `frames` frames at 60 Hz and log a summary
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(count: usize, frames: usize) {
    use glam::Vec2;
    use option_drift::layout::orbit_positions;
    use option_drift::platform::headless::{ElementId, HeadlessSurface, ManualScheduler, drive};
    use option_drift::sim::{EffectLog, TickOutcome};
    use option_drift::{PhysicsManager, Rect};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SEED: u64 = 42;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let container = Rect::new(0.0, 0.0, 640.0, 360.0);
    let sizes = vec![Vec2::new(120.0, 40.0); count];
    let mut rng = Pcg32::seed_from_u64(SEED);
    let positions = orbit_positions(container.size, &sizes, &mut rng);

    let mut surface = HeadlessSurface::new(container);
    let ids: Vec<_> = sizes
        .iter()
        .zip(positions)
        .map(|(size, pos)| surface.add_element(*size, Some(pos)))
        .collect();

    let mut manager = PhysicsManager::with_effects(
        surface,
        ManualScheduler::new(),
        EffectLog::<ElementId>::new(),
        SEED,
    );
    for id in ids {
        manager.add_option(id);
    }

    if let Err(e) = manager.start(0.0) {
        log::error!("Could not start: {}", e);
        return;
    }

    let outcomes = drive(&mut manager, 0.0, FRAME_MS, frames);
    manager.stop();

    let (mut contacts, mut edges, mut stalls) = (0, 0, 0);
    for outcome in &outcomes {
        match outcome {
            TickOutcome::Advanced(report) => {
                contacts += report.contacts.iter().filter(|c| c.resolved()).count();
                edges += report.boundary_hits.len();
            }
            TickOutcome::Stalled { .. } => stalls += 1,
            TickOutcome::Idle => {}
        }
    }

    log::info!(
        "{} frames: {} collisions, {} edge bounces, {} stalls, {} sparks",
        outcomes.len(),
        contacts,
        edges,
        stalls,
        manager.effects().sparks.len()
    );
    for (i, body) in manager.options().iter().enumerate() {
        log::info!(
            "option {}: pos ({:.1}, {:.1}) vel ({:.2}, {:.2})",
            i,
            body.pos.x,
            body.pos.y,
            body.vel.x,
            body.vel.y
        );
    }
}
