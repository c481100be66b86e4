//! End-to-end runs of the desk on a virtual clock.

mod common;

use std::cell::RefCell;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use proptest::prelude::*;
use typedesk::event::names;
use typedesk::page::{FLIPPED, SurfaceContent, ids};
use typedesk::typewriter::{Pace, RunState, StyleMirror, Tick, TypeSink};
use typedesk::{AnimationPhase, DeskOptions, Error, Page, PauseMode, Session, Typewriter};

struct Collect(String);

impl TypeSink for Collect {
    fn write(&mut self, _target: &str, chunk: &str, _mirror: bool) {
        self.0.push_str(chunk);
    }
}

/// Total scheduled wait for one phase, typing with a 1ms base delay.
fn total_wait(text: &str) -> Duration {
    let mut tw = Typewriter::new(
        vec![AnimationPhase::new("out", text, Duration::from_millis(1))],
        Session::new(),
        PauseMode::EveryTick,
    );
    let mut sink = Collect(String::new());
    let mut total = Duration::ZERO;
    loop {
        match tw.step(&mut sink) {
            Tick::Wait(d) => total += d,
            Tick::PhaseComplete { rest, .. } => total += rest,
            Tick::Finished | Tick::Skipped => break,
        }
    }
    assert_eq!(sink.0, text);
    total
}

#[test]
fn hello_world_total_delay() {
    common::init_logging();
    // 16 plain ticks, then comma 30, two sentence ends 70 each, block end 50
    assert_eq!(
        total_wait("Hello, world. Done.\n\n"),
        Duration::from_millis(16 + 30 + 70 + 70 + 50)
    );
    assert_eq!(total_wait("3,5"), Duration::from_millis(2));
    assert_eq!(total_wait(""), Duration::ZERO);
}

#[test]
fn natural_run_of_builtin_content() {
    common::init_logging();
    let mut page = Page::standard(DeskOptions::default().development(), 1280, 800).unwrap();
    common::finish(&mut page);

    assert!(page.is_done());
    assert_eq!(page.typewriter().state(), RunState::Done);
    let sheet = page.style_sheet().unwrap();
    assert_eq!(sheet.text(), page.payload().style_text());
    assert_eq!(
        page.document().surface(ids::STYLE_TEXT).unwrap().content(),
        &SurfaceContent::Markup(StyleMirror::render(&page.payload().style_text()))
    );
    let work = page.document().surface(ids::WORK_TEXT).unwrap();
    assert!(work.has_class(FLIPPED));
    for id in [ids::STYLE_TEXT, ids::WORK_TEXT] {
        assert!(page.windows().is_decorated(id), "{id} not decorated");
    }
}

#[test]
fn skip_before_start_completes_on_first_tick() {
    let mut page = common::tiny_page();
    page.skip();
    page.start();
    assert_eq!(page.advance(Duration::ZERO), 1);
    assert!(page.is_done());
    assert_eq!(page.typewriter().state(), RunState::Skipped);
    assert_eq!(
        page.style_sheet().unwrap().text(),
        page.payload().style_text()
    );
}

#[test]
fn pause_freezes_typed_text() {
    let mut page = common::tiny_page();
    page.start();
    page.advance(Duration::from_millis(30));
    assert!(page.toggle_pause());
    let frozen = page.document().surface(ids::STYLE_TEXT).unwrap().content().clone();

    page.advance(Duration::from_secs(5));
    assert_eq!(
        page.document().surface(ids::STYLE_TEXT).unwrap().content(),
        &frozen
    );

    assert!(!page.toggle_pause());
    page.run_until_idle(1_000_000);
    assert!(page.is_done());
}

#[test]
fn zero_speed_is_rejected() {
    let options = common::fast().with_speed(Duration::ZERO);
    assert!(matches!(
        Page::new(
            typedesk::Document::standard(common::viewport()),
            common::tiny_payload(),
            options
        ),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn pause_at_sub_millisecond_speed_still_yields() {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let options = common::fast().with_speed(Duration::from_nanos(1));
        let mut page = common::tiny_page_with(options);
        page.start();
        page.advance(Duration::from_nanos(5));
        page.toggle_pause();
        let fired = page.advance(Duration::from_millis(50));
        let _ = tx.send(fired);
    });
    let fired = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("advance returns while paused");
    // roughly one pause poll per millisecond
    assert!(fired < 100, "{fired} timers fired");
}

#[test]
fn punctuation_only_pause_keeps_typing_letters() {
    let options = common::fast().with_pause_mode(PauseMode::PunctuationOnly);
    let mut page = common::tiny_page_with(options);
    page.start();
    page.advance(Duration::from_millis(3));
    page.toggle_pause();
    let typed_before = page.style_sheet().unwrap().text().len();

    // letters keep flowing until the first punctuation tier is reached
    page.advance(Duration::from_secs(10));
    let typed_after = page.style_sheet().unwrap().text().len();
    assert!(typed_after > typed_before);
    assert!(typed_after < page.payload().style_text().len());
}

#[test]
fn unknown_control_is_an_error() {
    let mut page = common::tiny_page();
    assert!(matches!(
        page.click("no-such-control"),
        Err(Error::UnknownSurface(id)) if id == "no-such-control"
    ));
}

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

#[test]
fn host_events_follow_the_run() {
    // the callback is process-wide; each test thread records its own events
    typedesk::set_event_callback(|name, _| {
        EVENTS.with(|events| events.borrow_mut().push(name.to_string()));
    });
    let mut page = common::tiny_page();
    common::finish(&mut page);

    let seen = EVENTS.with(|events| events.borrow().clone());
    let position = |name: &str| seen.iter().position(|e| e == name);
    let done = position(names::ANIMATION_DONE).expect("done event");
    let decorated = position(names::WINDOW_DECORATED).expect("decorated event");
    assert!(done < decorated);
    assert_eq!(position(names::PHASE_START), Some(0));
    assert_eq!(
        seen.iter().filter(|e| *e == names::PHASE_COMPLETE).count(),
        5
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn skip_at_any_time_matches_natural_end_state(skip_ms in 0u64..900) {
        let mut natural = common::tiny_page();
        common::finish(&mut natural);

        let mut skipped = common::tiny_page();
        skipped.start();
        skipped.advance(Duration::from_millis(skip_ms));
        skipped.skip();
        skipped.run_until_idle(1_000_000);

        prop_assert!(skipped.is_done());
        prop_assert_eq!(
            natural.style_sheet().unwrap().text(),
            skipped.style_sheet().unwrap().text()
        );
        for id in [ids::STYLE_TEXT, ids::WORK_TEXT] {
            prop_assert_eq!(
                natural.document().surface(id).unwrap().content(),
                skipped.document().surface(id).unwrap().content()
            );
            prop_assert!(skipped.windows().is_decorated(id));
        }
    }

    #[test]
    fn multiplier_is_one_of_four_tiers(window in "[a-z0-9,./!? \n]{0,3}") {
        let pace = Pace::of_window(&window);
        prop_assert!([1, 30, 50, 70].contains(&pace.multiplier()));
        if window.len() == 3 && window.ends_with(". ") {
            prop_assert_eq!(pace, Pace::EndOfSentence);
        }
    }
}
