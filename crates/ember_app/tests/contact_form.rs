mod common;

use common::{ms, start_loaded};
use ember_app::fixture::PageHandles;
use ember_app::{Document, HostEvent, MemoryDocument, Portfolio, Severity, VariantConfig};

fn fill(p: &mut Portfolio<MemoryDocument>, page: &PageHandles, values: [&str; 4]) {
    for (control, value) in page.controls.iter().zip(values) {
        p.handle_event(HostEvent::Focus(*control));
        p.document_mut().type_value(*control, value);
        p.handle_event(HostEvent::Blur(*control));
    }
}

fn messages(p: &Portfolio<MemoryDocument>) -> Vec<(String, Severity)> {
    p.notifications()
        .live()
        .map(|n| (n.message.clone(), n.severity))
        .collect()
}

#[test]
fn invalid_email_shows_an_error() {
    let (mut p, page) = start_loaded(VariantConfig::ember());
    fill(&mut p, &page, ["Solaire", "astora@sun", "", "Praise the sun"]);

    p.handle_event(HostEvent::Submit(page.form));

    assert_eq!(
        messages(&p),
        vec![("Please enter a valid email address".to_string(), Severity::Error)]
    );
    assert_eq!(p.document().text(page.submit).as_deref(), Some("Send Message"));
    assert_eq!(p.document().attribute(page.submit, "disabled"), None);
}

#[test]
fn missing_field_is_named() {
    let (mut p, page) = start_loaded(VariantConfig::ember());
    fill(&mut p, &page, ["", "solaire@astora.com", "", "Praise the sun"]);

    p.handle_event(HostEvent::Submit(page.form));

    assert_eq!(
        messages(&p),
        vec![("Please fill in the name field".to_string(), Severity::Error)]
    );
}

#[test]
fn successful_submission_round_trip() {
    let (mut p, page) = start_loaded(VariantConfig::ember());
    fill(
        &mut p,
        &page,
        ["Solaire", "solaire@astora.com", "Jolly cooperation", "Praise the sun"],
    );
    let groups: Vec<_> = page
        .controls
        .iter()
        .map(|c| p.document().parent(*c).unwrap())
        .collect();
    assert!(groups.iter().all(|g| p.document().has_class(*g, "focused")));

    p.handle_event(HostEvent::Submit(page.form));
    assert_eq!(p.document().text(page.submit).as_deref(), Some("Sending Message..."));
    assert!(p.document().attribute(page.submit, "disabled").is_some());

    // Resubmitting while in flight is ignored
    p.advance(ms(500));
    p.handle_event(HostEvent::Submit(page.form));

    p.advance(ms(1499));
    assert_eq!(p.notifications().live_count(), 0);
    p.advance(ms(1));

    assert_eq!(
        messages(&p),
        vec![(
            "Message sent! The bonfire has been lit.".to_string(),
            Severity::Success
        )]
    );
    assert!(page
        .controls
        .iter()
        .all(|c| p.document().value(*c).as_deref() == Some("")));
    assert!(groups.iter().all(|g| !p.document().has_class(*g, "focused")));
    assert_eq!(p.document().text(page.submit).as_deref(), Some("Send Message"));
    assert_eq!(p.document().attribute(page.submit, "disabled"), None);

    // Only one submission completed
    p.advance(ms(3000));
    assert_eq!(p.notifications().shown_count(), 1);
}

#[test]
fn blur_keeps_focus_marker_on_filled_controls() {
    let (mut p, page) = start_loaded(VariantConfig::ember());
    let name = page.controls[0];
    let subject = page.controls[2];
    let name_group = p.document().parent(name).unwrap();
    let subject_group = p.document().parent(subject).unwrap();

    fill(&mut p, &page, ["Siegmeyer", "", "", ""]);

    assert!(p.document().has_class(name_group, "focused"));
    assert!(!p.document().has_class(subject_group, "focused"));
}

#[test]
fn submit_from_other_forms_is_ignored() {
    let (mut p, page) = start_loaded(VariantConfig::ember());
    p.handle_event(HostEvent::Submit(page.header));
    assert_eq!(p.notifications().shown_count(), 0);
}
