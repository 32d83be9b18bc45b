#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use vitrineshow::{
    ApiEnvelope, ClientConfig, Element, Error, ImageLoader, Item, Renderer, Result,
    ShowcaseFetcher, SlideContent, TemplateConfig, VisualState,
};

/// Renderer call, as seen by a test
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Styling,
    Content(SlideContent),
    State(Vec<Element>, VisualState),
    Visibility(Element, bool),
}

/// Renderer recording every call with its (virtual) timestamp
#[derive(Clone)]
pub struct RecordingRenderer {
    start: Instant,
    events: Arc<Mutex<Vec<(Duration, Event)>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, event: Event) {
        let at = self.start.elapsed();
        self.events.lock().unwrap().push((at, event));
    }

    pub fn events(&self) -> Vec<(Duration, Event)> {
        self.events.lock().unwrap().clone()
    }

    /// Names of the slides shown so far, in order
    pub fn shown(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|(_, e)| match e {
                Event::Content(c) => Some(c.name),
                _ => None,
            })
            .collect()
    }

    /// Timestamps of every content swap
    pub fn content_times(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|(at, e)| matches!(e, Event::Content(_)).then_some(at))
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn apply_styling(&mut self, _client: &ClientConfig, _template: &TemplateConfig) {
        self.push(Event::Styling);
    }

    fn set_slide_content(&mut self, content: &SlideContent) {
        self.push(Event::Content(content.clone()));
    }

    fn set_visual_state(&mut self, elements: &[Element], state: VisualState) {
        self.push(Event::State(elements.to_vec(), state));
    }

    fn set_visibility(&mut self, element: Element, visible: bool) {
        self.push(Event::Visibility(element, visible));
    }
}

/// Image loader taking `delay` per image; URLs containing "broken" fail
pub struct DelayedLoader {
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl DelayedLoader {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ImageLoader for DelayedLoader {
    async fn load(&self, url: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.delay).await;
        if url.contains("broken") {
            Err(Error::Status(404))
        } else {
            Ok(())
        }
    }
}

/// Showcase fetcher answering `response` (or a 503) after `delay`
pub struct FakeFetcher {
    pub response: Option<ApiEnvelope>,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub completed: AtomicUsize,
}

impl FakeFetcher {
    pub fn answering(response: ApiEnvelope, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response),
            delay,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }

    pub fn failing(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: None,
            delay,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ShowcaseFetcher for FakeFetcher {
    async fn fetch(&self, _video_id: &str) -> Result<ApiEnvelope> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.response.clone().ok_or(Error::Status(503))
    }
}

pub fn envelope_of(names: &[&str]) -> ApiEnvelope {
    let items = names
        .iter()
        .enumerate()
        .map(|(i, name)| Item::new(*name, format!("${}", i + 1)))
        .collect();
    ApiEnvelope::new(ClientConfig::default(), TemplateConfig::default(), items)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
