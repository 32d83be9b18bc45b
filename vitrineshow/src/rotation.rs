//! Slide rotation engine
//!
//! Steps through the items of a [`Showcase`] forever, one slide at a time:
//!
//! ```text
//! preload -> swap content -> enter -> hold -> exit -> next item
//! ```
//!
//! After the last item the same list starts over. There is no terminal
//! state; the rotation stops only when its task is dropped.

use crate::models::{Item, Showcase};
use crate::preload::Preloader;
use crate::render::{Element, Renderer, SlideContent, Transition, VisualState};
use crate::style::SlideStyle;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Default time to cycle once through the whole list
pub const DEFAULT_SLOT_BUDGET_MS: u64 = 15_000;
/// Default minimum time a single slide stays on screen
pub const DEFAULT_MIN_HOLD_MS: u64 = 5_000;
/// Default entrance animation length
pub const DEFAULT_ENTER_MS: u64 = 800;
/// Default exit animation length
pub const DEFAULT_EXIT_MS: u64 = 500;

/// Timing budget of the rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTiming {
    /// Total time for one pass over the list
    pub slot_budget: Duration,
    /// Floor on a slide's share of the budget
    pub min_hold: Duration,
    pub enter: Duration,
    pub exit: Duration,
}

impl Default for RotationTiming {
    fn default() -> Self {
        Self {
            slot_budget: Duration::from_millis(DEFAULT_SLOT_BUDGET_MS),
            min_hold: Duration::from_millis(DEFAULT_MIN_HOLD_MS),
            enter: Duration::from_millis(DEFAULT_ENTER_MS),
            exit: Duration::from_millis(DEFAULT_EXIT_MS),
        }
    }
}

impl RotationTiming {
    /// Time allotted to each slide of a list of `count` items
    ///
    /// `max(min_hold, slot_budget / count)`; depends on `count` only.
    pub fn hold_budget(&self, count: usize) -> Duration {
        let divisor = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        (self.slot_budget / divisor).max(self.min_hold)
    }

    /// Time a slide stays fully visible between its two animations
    ///
    /// Never negative: a budget shorter than both animations gives zero.
    pub fn hold_wait(&self, count: usize) -> Duration {
        self.hold_budget(count)
            .saturating_sub(self.enter)
            .saturating_sub(self.exit)
    }
}

/// Drives a [`Renderer`] through an endless slideshow
pub struct RotationEngine<R: Renderer> {
    preloader: Preloader,
    renderer: R,
    style: SlideStyle,
    timing: RotationTiming,
}

impl<R: Renderer> RotationEngine<R> {
    pub fn new(
        preloader: Preloader,
        renderer: R,
        style: SlideStyle,
        timing: RotationTiming,
    ) -> Self {
        Self {
            preloader,
            renderer,
            style,
            timing,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Applies the display configuration and rotates forever
    ///
    /// Returns immediately, without rendering any slide, when the showcase
    /// has no items. Otherwise never returns.
    pub async fn run(&mut self, showcase: &Showcase) {
        self.apply_display_config(showcase);

        if showcase.items.is_empty() {
            info!("No products to display, rotation not started");
            return;
        }

        info!(
            count = showcase.items.len(),
            hold_ms = self.timing.hold_budget(showcase.items.len()).as_millis() as u64,
            "Starting rotation"
        );

        let mut pass: u64 = 0;
        loop {
            self.play_pass(&showcase.items).await;
            pass += 1;
            debug!(pass, "Rotation pass completed");
        }
    }

    /// Applies colours and logo once per data load
    pub fn apply_display_config(&mut self, showcase: &Showcase) {
        self.renderer.apply_styling(&showcase.client, &showcase.template);
        if showcase.client.logo_url().is_some() {
            self.renderer.set_visual_state(
                &[Element::Logo],
                VisualState::Enter(Transition::FadeIn),
            );
        }
    }

    /// Shows every item once, in order; returns the number of slides shown
    pub async fn play_pass(&mut self, items: &[Item]) -> usize {
        let hold = self.timing.hold_wait(items.len());
        for (index, item) in items.iter().enumerate() {
            debug!(index, name = item.display_name(), "Showing slide");
            self.play_slide(item, hold).await;
        }
        items.len()
    }

    /// Runs one slide through preload, content swap, entrance, hold and exit
    pub async fn play_slide(&mut self, item: &Item, hold: Duration) {
        let report = self.preloader.preload(item).await;
        if report.failed > 0 {
            debug!(
                failed = report.failed,
                requested = report.requested,
                "Showing slide with missing images"
            );
        }

        // The slide is hidden here: either never shown yet or after an exit
        let content = SlideContent::from_item(item, &self.style);
        self.renderer.set_slide_content(&content);
        self.renderer.set_visibility(Element::Badge, content.has_badge());
        self.renderer.set_visibility(Element::QrCode, content.has_qr_code());

        self.enter().await;
        sleep(hold).await;
        self.exit().await;
    }

    async fn enter(&mut self) {
        self.reset();

        let window = self.timing.enter;
        let mut elapsed = Duration::ZERO;
        for (offset, group) in self.style.entrance_phases(window) {
            if offset > elapsed {
                sleep(offset - elapsed).await;
                elapsed = offset;
            }
            for (element, transition) in group {
                self.renderer.set_visual_state(&[element], VisualState::Enter(transition));
            }
        }
        sleep(window.saturating_sub(elapsed)).await;
    }

    async fn exit(&mut self) {
        self.reset();

        for motion in &self.style.motions {
            self.renderer.set_visual_state(&[motion.element], VisualState::Exit(motion.exit));
        }
        sleep(self.timing.exit).await;
    }

    /// Clears animation state of every rotating element
    fn reset(&mut self) {
        let elements = self.style.elements();
        self.renderer.set_visual_state(&elements, VisualState::Baseline);
    }
}
