//! Reference page
//!
//! A complete portfolio page laid out in a [`MemoryDocument`] with the class
//! vocabulary of a [`VariantConfig`]. Used by the integration tests and the
//! headless example.
//!
//! Layout at the default 1280×800 viewport (document-relative tops):
//!
//! | section    | top  | height |
//! |------------|------|--------|
//! | `home`     | 0    | 800    |
//! | `about`    | 800  | 900    |
//! | `skills`   | 1700 | 900    |
//! | `projects` | 2600 | 1000   |
//! | `contact`  | 3600 | 800    |

use ember_core::{Bounds, Document, ElementId, MemoryDocument, VariantConfig};

/// Skill levels as written in the markup
pub const SKILL_LEVELS: [&str; 4] = ["80", "65", "95", "70"];

/// Counter texts as written in the markup
pub const COUNTER_TEXTS: [&str; 3] = ["50+", "12", "\u{221E}"];

/// Handles to the interesting elements of the reference page
#[derive(Clone, Debug)]
pub struct PageHandles {
    pub loading_screen: ElementId,
    pub header: ElementId,
    pub toggle: ElementId,
    pub menu: ElementId,
    pub nav_links: Vec<ElementId>,
    /// Sections in configuration order
    pub sections: Vec<ElementId>,
    pub bonfire: ElementId,
    pub particles: ElementId,
    /// Hero elements in reveal order
    pub hero: Vec<ElementId>,
    /// Call-to-action anchor pointing at `#contact`
    pub cta: ElementId,
    /// Anchor with a bare `#`
    pub dead_link: ElementId,
    pub about_text: ElementId,
    pub about_image: ElementId,
    pub stat_items: Vec<ElementId>,
    pub counters: Vec<ElementId>,
    pub skill_items: Vec<ElementId>,
    pub skill_bars: Vec<ElementId>,
    /// `[data-animate]` heading in the projects section
    pub projects_heading: ElementId,
    pub cards: Vec<ElementId>,
    pub card_inners: Vec<ElementId>,
    pub contact_info: ElementId,
    pub form: ElementId,
    /// Name, email, subject and message controls
    pub controls: Vec<ElementId>,
    pub submit: ElementId,
}

impl PageHandles {
    pub fn section(&self, index: usize) -> ElementId {
        self.sections[index]
    }
}

const SECTION_LAYOUT: [(f32, f32); 5] = [
    (0.0, 800.0),
    (800.0, 900.0),
    (1700.0, 900.0),
    (2600.0, 1000.0),
    (3600.0, 800.0),
];

/// Build the reference page for `config`
///
/// The first five configured sections get the layout above; both built-in
/// variants use exactly five.
pub fn reference_page(config: &VariantConfig) -> (MemoryDocument, PageHandles) {
    let classes = &config.classes;
    let mut doc = MemoryDocument::new();
    doc.set_viewport_size(1280.0, 800.0);
    let body = doc.body();

    let loading_screen = doc.append(body, Some(config.loading.screen_id.as_str()), &["loading-screen"]);

    // Header and navigation
    let header = doc.append(body, Some(classes.nav_header_id.as_str()), &["nav"]);
    doc.set_bounds(header, Bounds::new(0.0, 70.0));
    let toggle = doc.append(header, Some(classes.nav_toggle_id.as_str()), &["nav-toggle"]);
    for _ in 0..3 {
        doc.append(toggle, None, &["bar"]);
    }
    let menu = doc.append(header, Some(classes.nav_menu_id.as_str()), &["nav-menu"]);
    let nav_links: Vec<_> = config
        .sections
        .iter()
        .map(|id| {
            let link = doc.append(menu, None, &[classes.nav_link.as_str()]);
            doc.with_attribute(link, &classes.section_attr, id)
                .with_attribute(link, "href", &format!("#{id}"))
                .with_text(link, id);
            link
        })
        .collect();

    // Sections
    let sections: Vec<_> = config
        .sections
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let section = doc.append(body, Some(id.as_str()), &["section"]);
            let (top, height) = SECTION_LAYOUT
                .get(i)
                .copied()
                .unwrap_or((4400.0 + 800.0 * (i as f32 - 5.0), 800.0));
            doc.set_bounds(section, Bounds::new(top, height));
            section
        })
        .collect();
    let [home, about, skills, projects, contact] = [0, 1, 2, 3, 4].map(|i| sections[i]);

    // Hero
    let bonfire = doc.append(home, None, &[config.scroll_effects.parallax_class.as_str()]);
    doc.set_bounds(bonfire, Bounds::new(200.0, 400.0));
    let particles = doc.append(home, Some(classes.particle_container_id.as_str()), &["hero-particles"]);
    doc.set_bounds(particles, Bounds::new(0.0, 800.0));
    let hero: Vec<_> = config
        .loading
        .hero
        .iter()
        .enumerate()
        .map(|(i, class)| {
            let el = doc.append(home, None, &[class.as_str()]);
            doc.set_bounds(el, Bounds::new(250.0 + 80.0 * i as f32, 60.0));
            el
        })
        .collect();
    let actions = hero.last().copied().unwrap_or(home);
    let cta = doc.append(actions, None, &["btn", "btn-primary"]);
    doc.with_attribute(cta, "href", "#contact").with_text(cta, "Light the bonfire");
    let dead_link = doc.append(actions, None, &["btn", "btn-secondary"]);
    doc.with_attribute(dead_link, "href", "#").with_text(dead_link, "Rest");

    // About
    let about_text = doc.append(about, None, &["about-text"]);
    doc.set_bounds(about_text, Bounds::new(850.0, 400.0));
    let about_image = doc.append(about, None, &["about-image"]);
    doc.set_bounds(about_image, Bounds::new(850.0, 400.0));
    let stats = doc.append(about, None, &["about-stats"]);
    doc.set_bounds(stats, Bounds::new(1300.0, 150.0));
    let mut stat_items = Vec::new();
    let mut counters = Vec::new();
    for text in COUNTER_TEXTS {
        let item = doc.append(stats, None, &["stat-item"]);
        doc.set_bounds(item, Bounds::new(1300.0, 150.0));
        let number = doc.append(item, None, &[classes.counter.as_str()]);
        doc.with_text(number, text);
        doc.set_bounds(number, Bounds::new(1320.0, 60.0));
        stat_items.push(item);
        counters.push(number);
    }

    // Skills
    let mut skill_items = Vec::new();
    let mut skill_bars = Vec::new();
    for (i, level) in SKILL_LEVELS.iter().enumerate() {
        let top = 1800.0 + 100.0 * i as f32;
        let item = doc.append(skills, None, &[classes.skill_item.as_str()]);
        doc.with_attribute(item, &classes.level_attr, level);
        doc.set_bounds(item, Bounds::new(top, 80.0));
        let track = doc.append(item, None, &["skill-bar"]);
        doc.set_bounds(track, Bounds::new(top + 40.0, 8.0));
        let bar = doc.append(track, None, &[classes.skill_progress.as_str()]);
        doc.set_bounds(bar, Bounds::new(top + 40.0, 8.0));
        skill_items.push(item);
        skill_bars.push(bar);
    }

    // Projects
    let projects_heading = doc.append(projects, None, &["section-title"]);
    doc.with_attribute(projects_heading, &classes.animate_attr, "fade-up");
    doc.set_bounds(projects_heading, Bounds::new(2620.0, 60.0));
    let mut cards = Vec::new();
    let mut card_inners = Vec::new();
    for _ in 0..3 {
        let card = doc.append(projects, None, &[classes.card.as_str()]);
        doc.set_bounds(card, Bounds::new(2700.0, 400.0));
        let inner = doc.append(card, None, &[classes.card_inner.as_str()]);
        doc.set_bounds(inner, Bounds::new(2700.0, 400.0));
        cards.push(card);
        card_inners.push(inner);
    }

    // Contact
    let contact_info = doc.append(contact, None, &["contact-info"]);
    doc.set_bounds(contact_info, Bounds::new(3650.0, 500.0));
    let form = doc.append(contact, Some(classes.contact_form_id.as_str()), &["contact-form"]);
    doc.set_bounds(form, Bounds::new(3650.0, 500.0));
    let controls: Vec<_> = [
        &config.form.name_id,
        &config.form.email_id,
        &config.form.subject_id,
        &config.form.message_id,
    ]
    .into_iter()
    .map(|id| {
        let group = doc.append(form, None, &["form-group"]);
        doc.append(group, Some(id.as_str()), &[classes.form_control.as_str()])
    })
    .collect();
    let submit = doc.append(form, None, &["btn", classes.submit_button.as_str()]);
    doc.with_attribute(submit, "type", "submit").with_text(submit, "Send Message");

    let handles = PageHandles {
        loading_screen,
        header,
        toggle,
        menu,
        nav_links,
        sections,
        bonfire,
        particles,
        hero,
        cta,
        dead_link,
        about_text,
        about_image,
        stat_items,
        counters,
        skill_items,
        skill_bars,
        projects_heading,
        cards,
        card_inners,
        contact_info,
        form,
        controls,
        submit,
    };
    (doc, handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Selector;

    #[test]
    fn test_reference_page_shape() {
        let config = VariantConfig::ember();
        let (doc, page) = reference_page(&config);

        assert_eq!(page.sections.len(), 5);
        assert_eq!(doc.get_by_id("skills"), Some(page.section(2)));
        assert_eq!(doc.query_all(&Selector::class("skill-item")).len(), 4);
        assert_eq!(doc.query_all(&Selector::class("stat-number")).len(), 3);
        assert_eq!(doc.query_all(&Selector::attribute("data-animate")).len(), 1);
        assert_eq!(doc.get_by_id("message"), Some(page.controls[3]));
        assert!(doc.mutations().is_empty());
    }

    #[test]
    fn test_classic_vocabulary() {
        let config = VariantConfig::classic();
        let (doc, page) = reference_page(&config);
        assert!(doc.has_class(page.skill_items[0], "skill"));
        assert!(doc.has_class(page.cards[0], "portfolio-card"));
        assert!(doc.has_class(page.nav_links[0], "nav__link"));
    }
}
