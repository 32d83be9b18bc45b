//! Slide styles: per-element motion and text defaults
//!
//! A style is the only thing that distinguishes the layouts the engine can
//! drive. Two presets are built in; see [`SlideStyle::from_name`].

use crate::render::{Element, Transition};
use std::time::Duration;

/// Motion of one rotating element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMotion {
    pub element: Element,
    pub enter: Transition,
    /// Offset of the entrance from the start of the entrance window
    pub enter_delay: Duration,
    pub exit: Transition,
}

impl ElementMotion {
    pub const fn new(element: Element, enter: Transition, exit: Transition) -> Self {
        Self {
            element,
            enter,
            enter_delay: Duration::ZERO,
            exit,
        }
    }

    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.enter_delay = delay;
        self
    }
}

/// Layout variant driven by the rotation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideStyle {
    /// Preset name, also used to derive the cache namespace
    pub name: String,
    pub motions: Vec<ElementMotion>,
    /// QR caption used when an item has none
    pub default_qr_caption: String,
    /// Duplicate the primary image into a ghost layer
    pub ghost_image: bool,
}

impl SlideStyle {
    pub const HORIZONTAL: &'static str = "horizontal";
    pub const VERTICAL: &'static str = "vertical";

    /// Landscape layout: product from the left, text from the right
    pub fn horizontal() -> Self {
        Self {
            name: Self::HORIZONTAL.to_string(),
            motions: vec![
                ElementMotion::new(
                    Element::Product,
                    Transition::SlideInLeft,
                    Transition::SlideOutLeft,
                ),
                ElementMotion::new(Element::Badge, Transition::StampIn, Transition::SlideOutLeft)
                    .delayed(Duration::from_millis(200)),
                ElementMotion::new(
                    Element::Description,
                    Transition::SlideInRight,
                    Transition::SlideOutRight,
                ),
                ElementMotion::new(
                    Element::Price,
                    Transition::ElasticUp,
                    Transition::SlideOutRight,
                ),
                ElementMotion::new(
                    Element::InfoPanel,
                    Transition::SlideInUp,
                    Transition::SlideOutLeft,
                ),
            ],
            default_qr_caption: "Venha Conferir".to_string(),
            ghost_image: true,
        }
    }

    /// Portrait layout: stacked elements zooming and sliding vertically
    pub fn vertical() -> Self {
        Self {
            name: Self::VERTICAL.to_string(),
            motions: vec![
                ElementMotion::new(Element::Product, Transition::ZoomIn, Transition::ZoomOut),
                ElementMotion::new(Element::Badge, Transition::StampIn, Transition::FadeOut)
                    .delayed(Duration::from_millis(200)),
                ElementMotion::new(
                    Element::Description,
                    Transition::SlideInDown,
                    Transition::SlideOutUp,
                ),
                ElementMotion::new(
                    Element::Price,
                    Transition::ElasticUp,
                    Transition::SlideOutDown,
                ),
                ElementMotion::new(
                    Element::InfoPanel,
                    Transition::SlideInUp,
                    Transition::SlideOutDown,
                ),
            ],
            default_qr_caption: "Confira".to_string(),
            ghost_image: false,
        }
    }

    /// Looks up a preset by (case-insensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            Self::HORIZONTAL => Some(Self::horizontal()),
            Self::VERTICAL => Some(Self::vertical()),
            _ => None,
        }
    }

    /// Cache namespace for snapshots loaded with this style
    pub fn cache_namespace(&self) -> String {
        format!("{}_data", self.name)
    }

    /// Every element this style animates, in declaration order
    pub fn elements(&self) -> Vec<Element> {
        self.motions.iter().map(|m| m.element).collect()
    }

    /// Entrance motions grouped by start offset, earliest first
    ///
    /// Each group holds `(offset, [(element, transition)])`. Offsets longer
    /// than `window` are clamped to it so the entrance never overruns.
    pub fn entrance_phases(&self, window: Duration) -> Vec<(Duration, Vec<(Element, Transition)>)> {
        let mut phases: Vec<(Duration, Vec<(Element, Transition)>)> = Vec::new();
        for motion in &self.motions {
            let offset = motion.enter_delay.min(window);
            match phases.iter_mut().find(|(o, _)| *o == offset) {
                Some((_, group)) => group.push((motion.element, motion.enter)),
                None => phases.push((offset, vec![(motion.element, motion.enter)])),
            }
        }
        phases.sort_by_key(|(offset, _)| *offset);
        phases
    }
}

impl Default for SlideStyle {
    fn default() -> Self {
        Self::horizontal()
    }
}
