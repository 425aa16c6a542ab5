#![allow(dead_code)]

use std::time::Duration;

use ember_app::fixture::{reference_page, PageHandles};
use ember_app::{HostEvent, MemoryDocument, Mutation, Portfolio, VariantConfig};
use ember_core::ElementId;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Reference page with deterministic particles
pub fn start(mut config: VariantConfig) -> (Portfolio<MemoryDocument>, PageHandles) {
    init_tracing();
    config.particles.seed = Some(7);
    let (doc, page) = reference_page(&config);
    let portfolio = Portfolio::new(doc, config).expect("valid configuration");
    (portfolio, page)
}

/// Loaded page with particles switched off
pub fn start_loaded(mut config: VariantConfig) -> (Portfolio<MemoryDocument>, PageHandles) {
    config.particles.enabled = false;
    let (mut portfolio, page) = start(config);
    portfolio.handle_event(HostEvent::Load);
    (portfolio, page)
}

/// Scroll the viewport and deliver the scroll event
pub fn scroll_to(portfolio: &mut Portfolio<MemoryDocument>, y: f32) {
    portfolio.document_mut().set_scroll(y);
    portfolio.handle_event(HostEvent::Scroll);
}

/// How many times `property` was set to `value` on `el`
pub fn style_writes(doc: &MemoryDocument, el: ElementId, property: &str, value: &str) -> usize {
    doc.mutations()
        .iter()
        .filter(|m| {
            matches!(m, Mutation::StyleSet { el: e, property: p, value: v }
                if *e == el && p == property && v == value)
        })
        .count()
}

/// Texts written to `el`, in order
pub fn text_writes(doc: &MemoryDocument, el: ElementId) -> Vec<String> {
    doc.mutations()
        .iter()
        .filter_map(|m| match m {
            Mutation::TextSet { el: e, text } if *e == el => Some(text.clone()),
            _ => None,
        })
        .collect()
}
