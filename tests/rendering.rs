//! Style highlighting snapshots and the terminal render pipeline.

mod common;

use std::time::Duration;

use typedesk::page::ids;
use typedesk::renderer::{Canvas, Role, hotspot_at, paint, styled_lines};
use typedesk::typewriter::StyleMirror;
use typedesk::{DeskOptions, Page, Point, Renderer, RendererOptions};

fn screen(canvas: &Canvas) -> String {
    (0..canvas.height())
        .map(|y| canvas.row_text(y).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn quiet() -> RendererOptions {
    RendererOptions {
        sync_output: false,
        ..RendererOptions::default()
    }
}

#[test]
fn mirror_markup_for_a_rule() {
    insta::assert_snapshot!(StyleMirror::render("pre {\n  color: red;\n}"), @r#"
    <span class="selector">pre </span>{
    <span class="key">  color</span>:<span class="value"> red</span>;
    }
    "#);
}

#[test]
fn mirror_markup_for_a_comment() {
    insta::assert_snapshot!(StyleMirror::render("/* hi: there; */\nx"), @r#"
    <span class="comment">/* hi: there; */</span>
    x
    "#);
}

#[test]
fn mirror_markup_becomes_roled_spans() {
    let markup = StyleMirror::render("a { top: 4px; }");
    let lines = styled_lines(&markup, typedesk::renderer::Whitespace::Pre);
    let roles: Vec<Role> = lines[0].iter().map(|s| s.role).collect();
    assert!(roles.contains(&Role::Selector));
    assert!(roles.contains(&Role::Key));
    assert!(roles.contains(&Role::Px));
    let text: String = lines[0].iter().map(|s| s.text.as_str()).collect();
    assert_eq!(text, "a { top: 4px; }");
}

#[test]
fn header_pause_hotspot_flips_label() {
    common::init_logging();
    let mut page = Page::standard(DeskOptions::terminal(), 80, 24).unwrap();
    page.start();
    page.advance(Duration::from_millis(200));

    let mut canvas = Canvas::new(80, 24);
    let hotspots = paint(&page, &mut canvas);
    let pause = hotspots.iter().find(|h| h.id == ids::PAUSE).unwrap();
    let at = pause.rect.origin();
    assert_eq!(hotspot_at(&hotspots, at), Some(ids::PAUSE));
    assert!(screen(&canvas).contains("Pause ||"));

    assert!(page.click(ids::PAUSE).unwrap());
    let mut canvas = Canvas::new(80, 24);
    paint(&page, &mut canvas);
    assert!(screen(&canvas).contains("Resume >>"));
}

#[test]
fn renderer_redraws_only_what_moved() {
    let mut page = Page::standard(DeskOptions::terminal(), 80, 24).unwrap();
    page.complete_instantly();
    page.run_until_idle(16);

    let mut renderer = Renderer::with_options(Vec::new(), 80, 24, quiet());
    renderer.render(&page).unwrap();
    assert!(renderer.stats().full_redraw);

    renderer.render(&page).unwrap();
    assert!(!renderer.stats().full_redraw);
    assert_eq!(renderer.stats().cells_updated, 0);

    // nudge the portfolio window one cell to the right
    page.pointer_down(Point::new(60, 1));
    page.pointer_move(Point::new(61, 1));
    page.animation_frame();
    page.pointer_up();
    renderer.render(&page).unwrap();
    let stats = *renderer.stats();
    assert!(!stats.full_redraw);
    assert!(stats.cells_updated > 0);
    assert!(stats.cells_updated < 80 * 24);
    assert_eq!(stats.frames, 3);
}

#[test]
fn headless_desk_shows_windows_and_dock() {
    let mut page = Page::standard(DeskOptions::terminal(), 100, 30).unwrap();
    page.complete_instantly();
    page.run_until_idle(16);

    let mut canvas = Canvas::new(100, 30);
    paint(&page, &mut canvas);
    let text = screen(&canvas);
    for needle in [ids::STYLE_TEXT, ids::WORK_TEXT, "Terminal", "Portfolio"] {
        assert!(text.contains(needle), "{needle} missing from\n{text}");
    }
    assert!(canvas.row_text(29).contains("Need a break?"));
}
