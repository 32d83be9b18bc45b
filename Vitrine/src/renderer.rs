//! Headless renderer: every display instruction goes to the log

use tracing::{debug, info};
use vitrineshow::{ClientConfig, Element, Renderer, SlideContent, TemplateConfig, VisualState};

/// [`Renderer`] writing display instructions to the tracing log
///
/// Lets the slideshow run on a machine without a display surface, and
/// shows the exact sequence a real surface would receive.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    slides: u64,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of content swaps so far
    pub fn slides(&self) -> u64 {
        self.slides
    }
}

impl Renderer for TracingRenderer {
    fn apply_styling(&mut self, client: &ClientConfig, template: &TemplateConfig) {
        for (name, value) in template.css_variables() {
            info!("🎨 {}: {}", name, value);
        }
        match client.logo_url() {
            Some(logo) => info!("🏷️ Logo: {}", logo),
            None => info!("🏷️ No logo configured"),
        }
    }

    fn set_slide_content(&mut self, content: &SlideContent) {
        self.slides += 1;
        info!(
            slide = self.slides,
            price = %content.price,
            image = %content.image,
            "🛒 {}",
            content.name
        );
        debug!(
            badge = ?content.badge,
            qr = ?content.qr_image,
            caption = %content.qr_caption,
            ghost = content.ghost_image.is_some(),
            "Slide details"
        );
    }

    fn set_visual_state(&mut self, elements: &[Element], state: VisualState) {
        match state {
            VisualState::Baseline => debug!(?elements, "reset"),
            VisualState::Enter(t) | VisualState::Exit(t) => {
                debug!(?elements, "{}", t.class_name())
            }
        }
    }

    fn set_visibility(&mut self, element: Element, visible: bool) {
        debug!(?element, visible, "visibility");
    }
}
