//! Browser host: DOM geometry, `requestAnimationFrame` and CSS effects

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DomRect, HtmlElement, Window};

use super::{FrameScheduler, Surface};
use crate::error::HostError;
use crate::layout::{parse_translation, translate_css};
use crate::sim::Rect;
use crate::sim::effects::{BOUNCE_CLASS, CollisionFx, EdgeFx, EffectSink, FLASH_CLASS, edge_class};

/// Frame callback installed into the scheduler
pub type FrameCallback = Closure<dyn FnMut(f64)>;

fn to_rect(r: &DomRect) -> Rect {
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// Run `f` once after `ms` milliseconds
fn after(window: &Window, ms: f64, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms as i32,
    );
}

/// Options container and its `.option` children
pub struct DomSurface {
    window: Window,
    container: HtmlElement,
}

impl DomSurface {
    pub fn new(window: Window, container: HtmlElement) -> Self {
        Self { window, container }
    }
}

impl Surface for DomSurface {
    type Element = HtmlElement;

    fn container_rect(&self) -> Option<Rect> {
        Some(to_rect(&self.container.get_bounding_client_rect()))
    }

    fn element_rect(&self, element: &HtmlElement) -> Option<Rect> {
        Some(to_rect(&element.get_bounding_client_rect()))
    }

    fn current_translation(&self, element: &HtmlElement) -> Option<Vec2> {
        let computed = self
            .window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("transform").ok())
            .and_then(|t| parse_translation(&t));

        computed.or_else(|| {
            element
                .style()
                .get_property_value("transform")
                .ok()
                .and_then(|t| parse_translation(&t))
        })
    }

    fn layout_offset(&self, element: &HtmlElement) -> Option<Vec2> {
        let rect = to_rect(&element.get_bounding_client_rect());
        let parent = element
            .offset_parent()
            .map(|p| to_rect(&p.get_bounding_client_rect()).min)
            .unwrap_or(Vec2::ZERO);
        Some(rect.min - parent)
    }

    fn is_hidden(&self, element: &HtmlElement) -> bool {
        element
            .style()
            .get_property_value("display")
            .is_ok_and(|d| d == "none")
    }

    fn apply_translation(&mut self, element: &HtmlElement, position: Vec2) {
        if let Err(e) = element
            .style()
            .set_property("transform", &translate_css(position))
        {
            log::warn!("Could not move option: {:?}", e);
        }
    }
}

/// `requestAnimationFrame` scheduler.
///
/// The callback lives in a shared slot so it can be installed after the
/// manager that owns this scheduler has been built.
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Slot to install the frame callback into
    pub fn callback_slot(&self) -> Rc<RefCell<Option<FrameCallback>>> {
        self.callback.clone()
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, HostError> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or(HostError::CallbackMissing)?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| HostError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

/// Spark particle colours
const SPARK_COLORS: [&str; 4] = [
    "var(--neon-pink)",
    "var(--neon-blue)",
    "var(--neon-green)",
    "var(--neon-purple)",
];
const SPARK_PARTICLES: usize = 12;
/// Spark stays fully visible this long, then fades (ms)
const SPARK_HOLD_MS: f64 = 500.0;
const SPARK_FADE_MS: f64 = 300.0;

/// CSS class toggles and spark elements
pub struct DomEffects {
    window: Window,
    document: Document,
    rng: Pcg32,
}

impl DomEffects {
    pub fn new(window: Window, document: Document, seed: u64) -> Self {
        Self {
            window,
            document,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Add `class` to `element` and take it off again after `ms`
    fn flash(&self, element: &HtmlElement, class: &'static str, ms: f64) {
        let _ = element.class_list().add_1(class);
        let element = element.clone();
        after(&self.window, ms, move || {
            let _ = element.class_list().remove_1(class);
        });
    }

    fn div(&self, class: &str) -> Result<HtmlElement, HostError> {
        let el = self
            .document
            .create_element("div")
            .map_err(|e| HostError::Style(format!("{:?}", e)))?;
        el.set_class_name(class);
        el.dyn_into::<HtmlElement>()
            .map_err(|_| HostError::Style("div is not an HtmlElement".into()))
    }

    fn set(el: &HtmlElement, property: &str, value: &str) -> Result<(), HostError> {
        el.style()
            .set_property(property, value)
            .map_err(|e| HostError::Style(format!("{:?}", e)))
    }

    /// Burst of particles around a viewport point
    fn spark(&mut self, point: Vec2) -> Result<(), HostError> {
        let body = self.document.body().ok_or(HostError::NoDocument)?;
        let spark = self.div("collision-spark")?;
        Self::set(&spark, "left", &format!("{}px", point.x))?;
        Self::set(&spark, "top", &format!("{}px", point.y))?;

        for i in 0..SPARK_PARTICLES {
            let particle = self.div("spark-particle")?;
            let dir = Vec2::from_angle(i as f32 / SPARK_PARTICLES as f32 * std::f32::consts::TAU);
            Self::set(&particle, "--x", &dir.x.to_string())?;
            Self::set(&particle, "--y", &dir.y.to_string())?;

            let color = SPARK_COLORS[self.rng.random_range(0..SPARK_COLORS.len())];
            Self::set(&particle, "background-color", color)?;
            Self::set(&particle, "box-shadow", &format!("0 0 10px {}", color))?;

            let size = format!("{}px", self.rng.random_range(4.0f32..12.0));
            Self::set(&particle, "width", &size)?;
            Self::set(&particle, "height", &size)?;
            let delay = format!("{}s", self.rng.random_range(0.0f32..0.2));
            Self::set(&particle, "animation-delay", &delay)?;

            spark
                .append_child(&particle)
                .map_err(|e| HostError::Style(format!("{:?}", e)))?;
        }

        let flash = self.div("collision-flash-center")?;
        spark
            .append_child(&flash)
            .map_err(|e| HostError::Style(format!("{:?}", e)))?;
        body.append_child(&spark)
            .map_err(|e| HostError::Style(format!("{:?}", e)))?;

        let window = self.window.clone();
        after(&self.window, SPARK_HOLD_MS, move || {
            let _ = spark.style().set_property("opacity", "0");
            after(&window, SPARK_FADE_MS, move || spark.remove());
        });
        Ok(())
    }
}

impl EffectSink<HtmlElement> for DomEffects {
    fn on_collision(&mut self, a: &HtmlElement, b: &HtmlElement, fx: &CollisionFx) {
        for element in [a, b] {
            self.flash(element, BOUNCE_CLASS, fx.highlight_ms);
            self.flash(element, FLASH_CLASS, fx.highlight_ms);
        }
        if let Err(e) = self.spark(fx.point) {
            log::warn!("Collision spark failed: {}", e);
        }
    }

    fn on_edge(&mut self, element: &HtmlElement, fx: &EdgeFx) {
        self.flash(element, edge_class(fx.edge), fx.highlight_ms);
    }
}
