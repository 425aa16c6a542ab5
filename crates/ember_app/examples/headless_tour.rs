//! Headless Tour
//!
//! Drives the engine through a scripted visit of the reference page and logs
//! what happened: loading, scrolling through every section, a contact form
//! submission and the Konami code.
//!
//! Run with: cargo run -p ember_app --example headless_tour [variant.toml]
//!
//! Use `RUST_LOG=debug` to see the engine's own logging.

use std::time::Duration;

use ember_app::fixture::reference_page;
use ember_app::{
    Document, HostEvent, MemoryDocument, Mutation, Portfolio, VariantConfig, KONAMI_CODE,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => VariantConfig::load(path)?,
        None => VariantConfig::ember(),
    };
    tracing::info!("Touring the {} variant", config.name);

    let (doc, page) = reference_page(&config);
    let mut portfolio = Portfolio::new(doc, config)?;
    let frame = Duration::from_millis(16);

    // Window load, then let the hero settle
    portfolio.handle_event(HostEvent::Load);
    portfolio.advance(Duration::from_millis(1500));
    report(&mut portfolio, "load");

    // Scroll down one section at a time
    for (index, section) in page.sections.iter().enumerate() {
        let top = portfolio
            .document()
            .bounds(*section)
            .map(|b| b.top)
            .unwrap_or_default();
        let mut y = portfolio.document().viewport().scroll_y;
        while y < top {
            y = (y + 120.0).min(top);
            portfolio.document_mut().set_scroll(y);
            portfolio.handle_event(HostEvent::Scroll);
            portfolio.advance(frame);
        }
        portfolio.advance(Duration::from_millis(1800));
        report(&mut portfolio, &format!("section {index}"));
    }

    // Contact form
    for (control, value) in page.controls.iter().zip([
        "Solaire of Astora",
        "solaire@astora.com",
        "Jolly cooperation",
        "Praise the sun!",
    ]) {
        portfolio.handle_event(HostEvent::Focus(*control));
        portfolio.document_mut().type_value(*control, value);
        portfolio.handle_event(HostEvent::Blur(*control));
    }
    portfolio.handle_event(HostEvent::Submit(page.form));
    portfolio.advance(Duration::from_millis(2100));
    report(&mut portfolio, "contact form");

    for key in KONAMI_CODE {
        portfolio.handle_event(HostEvent::KeyDown(key.to_string()));
    }
    portfolio.advance(Duration::from_secs(3));
    report(&mut portfolio, "konami");

    for notification in portfolio.notifications().live() {
        tracing::info!(
            "Live notification ({}): {}",
            notification.severity,
            notification.message
        );
    }
    tracing::info!(
        "Done at {:?}: {} notifications shown, {} hero particles, {} pending tasks",
        portfolio.now(),
        portfolio.notifications().shown_count(),
        portfolio.particle_count(),
        portfolio.pending_tasks()
    );

    let doc = portfolio.into_document();
    tracing::info!("Page left with {} elements", doc.element_count());
    Ok(())
}

/// Summarize and drain the mutation log
fn report(portfolio: &mut Portfolio<MemoryDocument>, stage: &str) {
    let mutations = portfolio.document_mut().take_mutations();
    let classes = mutations.iter().filter(|m| m.is_class_change()).count();
    let styles = mutations
        .iter()
        .filter(|m| matches!(m, Mutation::StyleSet { .. }))
        .count();
    let texts = mutations
        .iter()
        .filter(|m| matches!(m, Mutation::TextSet { .. }))
        .count();
    tracing::info!(
        "{}: {} mutations ({} class, {} style, {} text), current section {:?}",
        stage,
        mutations.len(),
        classes,
        styles,
        texts,
        portfolio.current_section()
    );
}
