#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use typedesk::content::Payload;
use typedesk::geometry::Viewport;
use typedesk::{DeskOptions, Document, Page};

/// Route `tracing` output through the test harness. Set
/// `TYPEDESK_LOG_LEVEL=debug` to see it.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("TYPEDESK_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn viewport() -> Viewport {
    Viewport::new(1280, 800, 80)
}

/// Small content so a natural run finishes in a few hundred timers.
pub fn tiny_payload() -> Payload {
    Payload {
        header_html: "<a id=\"skip-animation\">Skip</a>".to_string(),
        work_text: "# Work\n\nSee https://example.com, then rest.\n".to_string(),
        style_fragments: [
            "/* Hello, world. */\n".to_string(),
            "#dock { color: #fff; }\n".to_string(),
            ".md h1 { -webkit-x: 2px; }\n".to_string(),
            "pre { top: 0; }\n".to_string(),
        ],
        pre_styles: "body { margin: 0; }".to_string(),
    }
}

pub fn fast() -> DeskOptions {
    DeskOptions::default()
        .with_speed(Duration::from_millis(1))
        .with_phase_pauses([Duration::from_millis(10); 5])
}

pub fn tiny_page() -> Page {
    tiny_page_with(fast())
}

pub fn tiny_page_with(options: DeskOptions) -> Page {
    Page::new(Document::standard(viewport()), tiny_payload(), options).expect("standard page")
}

/// Run a page to its decorated end state.
pub fn finish(page: &mut Page) {
    page.start();
    page.run_until_idle(1_000_000);
}
