//! Renderer contract consumed by the rotation engine
//!
//! The engine never touches a display surface itself. It tells a
//! [`Renderer`] which content to show and which animation state each
//! element is in; how that maps to DOM nodes, CSS classes or pixels is
//! up to the implementation.

use crate::format::{format_optional, format_url};
use crate::models::{ClientConfig, Item, TemplateConfig};
use crate::style::SlideStyle;
use std::fmt;

/// Visual elements of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Logo,
    Product,
    Badge,
    Description,
    Price,
    /// Wrapper holding the QR code and its caption
    InfoPanel,
    /// QR code image inside the info panel; toggled per item, not animated
    QrCode,
}

impl Element {
    /// Elements animated on every slide change
    pub const ROTATING: [Element; 5] = [
        Element::Product,
        Element::Badge,
        Element::Description,
        Element::Price,
        Element::InfoPanel,
    ];
}

/// Named animation effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    FadeIn,
    FadeOut,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
    SlideInDown,
    SlideOutLeft,
    SlideOutRight,
    SlideOutUp,
    SlideOutDown,
    ElasticUp,
    StampIn,
    ZoomIn,
    ZoomOut,
}

impl Transition {
    /// CSS animation class name
    pub fn class_name(self) -> &'static str {
        match self {
            Transition::FadeIn => "fadeIn",
            Transition::FadeOut => "fadeOut",
            Transition::SlideInLeft => "slideInLeft",
            Transition::SlideInRight => "slideInRight",
            Transition::SlideInUp => "slideInUp",
            Transition::SlideInDown => "slideInDown",
            Transition::SlideOutLeft => "slideOutLeft",
            Transition::SlideOutRight => "slideOutRight",
            Transition::SlideOutUp => "slideOutUp",
            Transition::SlideOutDown => "slideOutDown",
            Transition::ElasticUp => "elasticUp",
            Transition::StampIn => "stampIn",
            Transition::ZoomIn => "zoomIn",
            Transition::ZoomOut => "zoomOut",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Animation state assigned to a set of elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    /// Neutral state: every animation class cleared
    Baseline,
    /// Entrance animation running or finished
    Enter(Transition),
    /// Exit animation running or finished
    Exit(Transition),
}

/// Everything a renderer needs to draw one slide
///
/// URLs are already normalised and defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideContent {
    pub name: String,
    pub price: String,
    /// Primary image; empty when the item has none
    pub image: String,
    /// Copy of the primary image for a background "ghost" layer
    pub ghost_image: Option<String>,
    pub badge: Option<String>,
    pub qr_image: Option<String>,
    pub qr_caption: String,
}

impl SlideContent {
    pub fn from_item(item: &Item, style: &SlideStyle) -> Self {
        let image = format_url(item.image.as_deref().unwrap_or_default());
        let ghost_image = style.ghost_image.then(|| image.clone());
        let qr_caption = item
            .qr_caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(style.default_qr_caption.as_str())
            .to_string();

        Self {
            name: item.display_name().to_string(),
            price: item.display_price().to_string(),
            image,
            ghost_image,
            badge: format_optional(item.badge.as_deref()),
            qr_image: format_optional(item.qr_image.as_deref()),
            qr_caption,
        }
    }

    pub fn has_badge(&self) -> bool {
        self.badge.is_some()
    }

    pub fn has_qr_code(&self) -> bool {
        self.qr_image.is_some()
    }
}

/// Presentation surface driven by the rotation engine
pub trait Renderer: Send {
    /// Applies client and template configuration (colours, logo)
    fn apply_styling(&mut self, client: &ClientConfig, template: &TemplateConfig);

    /// Swaps the slide content; called while the slide is hidden
    fn set_slide_content(&mut self, content: &SlideContent);

    /// Assigns an animation state to every element of `elements`
    fn set_visual_state(&mut self, elements: &[Element], state: VisualState);

    /// Shows or hides a single element
    fn set_visibility(&mut self, element: Element, visible: bool);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn apply_styling(&mut self, client: &ClientConfig, template: &TemplateConfig) {
        (**self).apply_styling(client, template)
    }

    fn set_slide_content(&mut self, content: &SlideContent) {
        (**self).set_slide_content(content)
    }

    fn set_visual_state(&mut self, elements: &[Element], state: VisualState) {
        (**self).set_visual_state(elements, state)
    }

    fn set_visibility(&mut self, element: Element, visible: bool) {
        (**self).set_visibility(element, visible)
    }
}
