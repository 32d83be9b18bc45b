//! Rotation engine behaviour against a recording renderer, in virtual time

mod common;

use common::{ms, DelayedLoader, Event, RecordingRenderer};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use vitrineshow::{
    ClientConfig, Element, Item, Preloader, RotationEngine, RotationTiming, Showcase,
    SlideStyle, TemplateConfig, Transition, VisualState,
};

fn engine_with(
    renderer: RecordingRenderer,
    image_delay: Duration,
    timing: RotationTiming,
) -> RotationEngine<RecordingRenderer> {
    let preloader = Preloader::new(DelayedLoader::new(image_delay));
    RotationEngine::new(preloader, renderer, SlideStyle::horizontal(), timing)
}

fn showcase_of(items: Vec<Item>) -> Showcase {
    Showcase {
        client: ClientConfig::default(),
        template: TemplateConfig::default(),
        items,
    }
}

fn items(names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .map(|name| Item::new(*name, "$1").with_image(format!("https://cdn/{}.png", name)))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_items_rotate_in_order_across_passes() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let list = items(&["A", "B"]);

    assert_eq!(engine.play_pass(&list).await, 2);
    assert_eq!(engine.play_pass(&list).await, 2);

    assert_eq!(renderer.shown(), vec!["A", "B", "A", "B"]);
}

#[tokio::test(start_paused = true)]
async fn test_run_loops_until_cancelled() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let showcase = showcase_of(items(&["A", "B"]));

    let task = tokio::spawn(async move { engine.run(&showcase).await });

    // Two items share a 15 s pass: a new slide every 7.5 s
    sleep(ms(31_000)).await;
    task.abort();

    assert_eq!(renderer.shown(), vec!["A", "B", "A", "B", "A"]);
    assert_eq!(
        renderer.content_times(),
        vec![ms(0), ms(7_500), ms(15_000), ms(22_500), ms(30_000)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_single_item_fills_the_whole_budget() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let list = items(&["Solo"]);

    let start = Instant::now();
    engine.play_pass(&list).await;
    assert_eq!(start.elapsed(), ms(15_000));

    // Entrance 800 ms, hold 13.7 s, exit starts at 14.5 s
    let first_exit = renderer
        .events()
        .into_iter()
        .find(|(_, e)| matches!(e, Event::State(_, VisualState::Exit(_))))
        .map(|(at, _)| at);
    assert_eq!(first_exit, Some(ms(14_500)));
}

#[tokio::test(start_paused = true)]
async fn test_many_items_keep_the_minimum_hold() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let list = items(&["A", "B", "C", "D", "E"]);

    let start = Instant::now();
    engine.play_pass(&list).await;

    // 15 s / 5 = 3 s is below the 5 s floor
    assert_eq!(start.elapsed(), ms(25_000));
}

#[tokio::test(start_paused = true)]
async fn test_negative_hold_is_clamped_to_zero() {
    let renderer = RecordingRenderer::new();
    let timing = RotationTiming {
        slot_budget: ms(1_000),
        min_hold: Duration::ZERO,
        ..RotationTiming::default()
    };
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, timing);
    let list = items(&["A", "B", "C", "D"]);

    let start = Instant::now();
    engine.play_pass(&list).await;

    // 250 ms per slot is shorter than entrance + exit: only the animations run
    assert_eq!(start.elapsed(), ms(4 * 1_300));
    assert_eq!(renderer.shown().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_slide_sequence_resets_before_enter_and_exit() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let style = SlideStyle::horizontal();
    let elements = style.elements();

    engine.play_pass(&items(&["A"])).await;
    let events: Vec<Event> = renderer.events().into_iter().map(|(_, e)| e).collect();

    // Content swap, badge and QR visibility, then reset before the entrance
    assert!(matches!(&events[0], Event::Content(c) if c.name == "A"));
    assert_eq!(events[1], Event::Visibility(Element::Badge, false));
    assert_eq!(events[2], Event::Visibility(Element::QrCode, false));
    assert_eq!(
        events[3],
        Event::State(elements.clone(), VisualState::Baseline)
    );

    let entrances = events
        .iter()
        .filter(|e| matches!(e, Event::State(_, VisualState::Enter(_))))
        .count();
    assert_eq!(entrances, style.motions.len());

    // The exit transitions are preceded by a second reset
    let first_exit = events
        .iter()
        .position(|e| matches!(e, Event::State(_, VisualState::Exit(_))))
        .unwrap();
    assert_eq!(
        events[first_exit - 1],
        Event::State(elements, VisualState::Baseline)
    );
    assert_eq!(events.len() - first_exit, style.motions.len());
}

#[tokio::test(start_paused = true)]
async fn test_badge_entrance_is_delayed() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());

    engine.play_pass(&items(&["A"])).await;

    let badge_enter = renderer.events().into_iter().find_map(|(at, e)| match e {
        Event::State(els, VisualState::Enter(t)) if els == vec![Element::Badge] => Some((at, t)),
        _ => None,
    });
    assert_eq!(badge_enter, Some((ms(200), Transition::StampIn)));
}

#[tokio::test(start_paused = true)]
async fn test_badge_and_qr_visibility_follow_item() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let list = vec![
        Item::new("Plain", "$1").with_badge("").with_qr("", None),
        Item::new("Promo", "$2")
            .with_badge("//cdn/promo.png")
            .with_qr("//qr/promo", None),
        Item::new("Plain again", "$3"),
        Item::new("Qr only", "$4").with_qr("https://qr/4", Some("Escaneie".into())),
    ];

    engine.play_pass(&list).await;

    let visibility = |element: Element| -> Vec<bool> {
        renderer
            .events()
            .into_iter()
            .filter_map(|(_, e)| match e {
                Event::Visibility(el, visible) if el == element => Some(visible),
                _ => None,
            })
            .collect()
    };
    assert_eq!(visibility(Element::Badge), vec![false, true, false, false]);
    // A slide without QR never inherits the previous slide's code
    assert_eq!(visibility(Element::QrCode), vec![false, true, false, true]);

    let promo = renderer.events().into_iter().find_map(|(_, e)| match e {
        Event::Content(c) if c.name == "Promo" => Some(c),
        _ => None,
    });
    let promo = promo.expect("promo slide shown");
    assert_eq!(promo.badge.as_deref(), Some("https://cdn/promo.png"));
    assert_eq!(promo.qr_image.as_deref(), Some("https://qr/promo"));
}

#[tokio::test(start_paused = true)]
async fn test_content_waits_for_preload() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), ms(1_200), RotationTiming::default());

    engine.play_pass(&items(&["A"])).await;

    assert_eq!(renderer.content_times(), vec![ms(1_200)]);
}

#[tokio::test(start_paused = true)]
async fn test_broken_images_do_not_stop_rotation() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), ms(100), RotationTiming::default());
    let list = vec![
        Item::new("Broken", "$1").with_image("https://cdn/broken.png"),
        Item::new("Fine", "$2").with_image("https://cdn/fine.png"),
    ];

    engine.play_pass(&list).await;

    assert_eq!(renderer.shown(), vec!["Broken", "Fine"]);
}

#[tokio::test(start_paused = true)]
async fn test_empty_showcase_renders_nothing() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());

    // Returns instead of looping forever
    engine.run(&showcase_of(Vec::new())).await;

    let events = renderer.events();
    assert!(renderer.shown().is_empty());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1, Event::Styling);
}

#[tokio::test(start_paused = true)]
async fn test_logo_fades_in_when_configured() {
    let renderer = RecordingRenderer::new();
    let mut engine = engine_with(renderer.clone(), Duration::ZERO, RotationTiming::default());
    let mut showcase = showcase_of(Vec::new());
    showcase.client.logo_mercado_url_text = Some("//cdn/logo.png".to_string());

    engine.run(&showcase).await;

    let events: Vec<Event> = renderer.events().into_iter().map(|(_, e)| e).collect();
    assert_eq!(
        events,
        vec![
            Event::Styling,
            Event::State(vec![Element::Logo], VisualState::Enter(Transition::FadeIn)),
        ]
    );
}
