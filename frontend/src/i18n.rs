use std::rc::Rc;
use studio_shared::{ContentOverrides, Locale};
use yew::prelude::*;

/// Built-in page copy: key, Finnish, English.
const STRINGS: &[(&str, &str, &str)] = &[
    ("nav.home", "Etusivu", "Home"),
    ("nav.pricing", "Hinnoittelu", "Pricing"),
    ("nav.contact", "Ota yhteyttä", "Contact"),
    ("nav.privacy", "Tietosuoja", "Privacy"),
    ("nav.locale_switch", "In English", "Suomeksi"),

    ("hero.title", "Kotisivut, jotka tekevät töitä puolestasi", "Websites that do the work for you"),
    ("hero.lead", "Suunnittelemme ja rakennamme nopeat, selkeät ja helposti päivitettävät sivustot pienyrityksille.", "We design and build fast, clear and easy-to-update websites for small businesses."),
    ("hero.cta_pricing", "Laske hinta-arvio", "Get an estimate"),
    ("hero.cta_contact", "Kerro projektistasi", "Tell us about your project"),

    ("services.title", "Mitä teemme", "What we do"),
    ("services.web.title", "Kotisivut", "Websites"),
    ("services.web.body", "Yrityssivut ja portfoliot, jotka latautuvat nopeasti ja löytyvät hakukoneista.", "Company sites and portfolios that load fast and get found."),
    ("services.shop.title", "Verkkokaupat", "Online shops"),
    ("services.shop.body", "Kassat, maksut ja ajanvaraukset valmiina myymään.", "Checkouts, payments and bookings ready to sell."),
    ("services.care.title", "Ylläpito", "Care"),
    ("services.care.body", "Päivitykset, varmuuskopiot ja pienet muutokset kuukausihintaan.", "Updates, backups and small changes for a monthly fee."),

    ("pricing.title", "Hinta-arvio", "Price estimate"),
    ("pricing.lead", "Valitse sivuston tyyppi, laajuus ja aikataulu. Arvio päivittyy heti.", "Pick the site type, scope and schedule. The estimate updates instantly."),
    ("pricing.site_type", "Sivuston tyyppi", "Site type"),
    ("pricing.site.portfolio", "Portfolio", "Portfolio"),
    ("pricing.site.business", "Yrityssivusto", "Business site"),
    ("pricing.site.ecommerce", "Verkkokauppa", "Online shop"),
    ("pricing.site.booking", "Ajanvaraus", "Booking site"),
    ("pricing.site.custom", "Räätälöity", "Custom"),
    ("pricing.pages", "Sivujen määrä", "Number of pages"),
    ("pricing.features", "Lisäominaisuudet", "Extra features"),
    ("pricing.feature.blog", "Blogi", "Blog"),
    ("pricing.feature.gallery", "Kuvagalleria", "Gallery"),
    ("pricing.feature.contact", "Yhteydenottolomake", "Contact form"),
    ("pricing.feature.checkout", "Kassa ja maksut", "Checkout"),
    ("pricing.feature.booking", "Ajanvarausjärjestelmä", "Booking system"),
    ("pricing.feature.multilingual", "Monikielisyys", "Multiple languages"),
    ("pricing.feature.seo", "Hakukoneoptimointi", "SEO"),
    ("pricing.feature.cms", "Sisällönhallinta", "Content management"),
    ("pricing.urgency", "Aikataulu", "Schedule"),
    ("pricing.urgency.normal", "Normaali", "Normal"),
    ("pricing.urgency.fast", "Nopea", "Fast"),
    ("pricing.urgency.rush", "Kiireellinen", "Rush"),
    ("pricing.base", "Perushinta", "Base price"),
    ("pricing.extra_pages", "Lisäsivut", "Extra pages"),
    ("pricing.features_cost", "Ominaisuudet", "Features"),
    ("pricing.multiplier", "Aikataulukerroin", "Schedule multiplier"),
    ("pricing.total", "Arvio yhteensä", "Estimated total"),
    ("pricing.note", "Hinnat ovat suuntaa-antavia ja sisältävät ALV:n.", "Prices are indicative and include VAT."),
    ("pricing.cta", "Pyydä tarjous", "Request a quote"),

    ("contact.title", "Kerro projektistasi", "Tell us about your project"),
    ("contact.step.contact", "Yhteystiedot", "Contact details"),
    ("contact.step.project", "Projekti", "Project"),
    ("contact.step.message", "Viesti", "Message"),
    ("contact.name", "Nimi", "Name"),
    ("contact.email", "Sähköposti", "Email"),
    ("contact.phone", "Puhelin (valinnainen)", "Phone (optional)"),
    ("contact.company", "Yritys (valinnainen)", "Company (optional)"),
    ("contact.project_type", "Projektin tyyppi", "Project type"),
    ("contact.project.new_site", "Uusi sivusto", "New website"),
    ("contact.project.webshop", "Verkkokauppa", "Online shop"),
    ("contact.project.redesign", "Uudistus", "Redesign"),
    ("contact.project.maintenance", "Ylläpito", "Maintenance"),
    ("contact.project.other", "Muu", "Other"),
    ("contact.budget", "Budjetti", "Budget"),
    ("contact.budget.under_1000", "Alle 1 000 €", "Under €1,000"),
    ("contact.budget.1000_3000", "1 000–3 000 €", "€1,000–3,000"),
    ("contact.budget.3000_6000", "3 000–6 000 €", "€3,000–6,000"),
    ("contact.budget.over_6000", "Yli 6 000 €", "Over €6,000"),
    ("contact.timeline", "Aikataulu (valinnainen)", "Timeline (optional)"),
    ("contact.timeline.asap", "Mahdollisimman pian", "As soon as possible"),
    ("contact.timeline.within_month", "Kuukauden sisällä", "Within a month"),
    ("contact.timeline.within_quarter", "Kolmen kuukauden sisällä", "Within three months"),
    ("contact.timeline.flexible", "Joustava", "Flexible"),
    ("contact.message", "Viesti", "Message"),
    ("contact.choose", "Valitse…", "Choose…"),
    ("contact.required", "Pakollinen tieto", "Required"),
    ("contact.invalid_email", "Tarkista sähköpostiosoite", "Check the email address"),
    ("contact.back", "Takaisin", "Back"),
    ("contact.next", "Seuraava", "Next"),
    ("contact.send", "Lähetä", "Send"),
    ("contact.sending", "Lähetetään…", "Sending…"),
    ("contact.success", "Kiitos! Palaamme asiaan pian.", "Thanks! We will get back to you shortly."),
    ("contact.error", "Lähetys epäonnistui. Tietosi ovat tallessa, yritä uudelleen.", "Sending failed. Your answers are kept, please try again."),
    ("contact.start_over", "Lähetä uusi viesti", "Send another message"),

    ("privacy.title", "Tietosuojaseloste", "Privacy policy"),
    ("footer.rights", "Kaikki oikeudet pidätetään.", "All rights reserved."),
    ("not_found", "Sivua ei löytynyt.", "Page not found."),
];

/// Compiled-in text for a key, or an empty string for unknown keys.
pub fn builtin(locale: Locale, key: &str) -> &'static str {
    STRINGS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, fi, en)| match locale {
            Locale::Fi => *fi,
            Locale::En => *en,
        })
        .unwrap_or_else(|| {
            log::warn!("Missing text for key {}", key);
            ""
        })
}

/// Page copy for the active locale with editor overrides applied.
#[derive(Clone, PartialEq)]
pub struct PageText {
    pub locale: Locale,
    overrides: Rc<ContentOverrides>,
}

impl PageText {
    pub fn new(locale: Locale, overrides: Rc<ContentOverrides>) -> Self {
        Self { locale, overrides }
    }

    pub fn get(&self, key: &str) -> String {
        self.overrides.text(key, builtin(self.locale, key)).to_string()
    }
}

/// Fetched overrides tagged with the locale they were fetched for, so a
/// late answer for another locale never shows under the active one.
#[derive(Clone, Default, PartialEq)]
pub struct LoadedOverrides {
    locale: Option<Locale>,
    overrides: Rc<ContentOverrides>,
}

impl LoadedOverrides {
    pub fn new(locale: Locale, overrides: ContentOverrides) -> Self {
        Self {
            locale: Some(locale),
            overrides: Rc::new(overrides),
        }
    }

    pub fn for_locale(&self, locale: Locale) -> Rc<ContentOverrides> {
        if self.locale == Some(locale) {
            self.overrides.clone()
        } else {
            Rc::new(ContentOverrides::new())
        }
    }
}

#[hook]
pub fn use_page_text() -> PageText {
    use_context::<PageText>()
        .unwrap_or_else(|| PageText::new(Locale::default(), Rc::new(ContentOverrides::new())))
}

/// Whole euros, grouped the way each locale writes them.
pub fn format_eur(amount: u32, locale: Locale) -> String {
    let digits = amount.to_string();
    let separator = match locale {
        Locale::Fi => '\u{a0}',
        Locale::En => ',',
    };
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    match locale {
        Locale::Fi => format!("{}\u{a0}€", grouped),
        Locale::En => format!("€{}", grouped),
    }
}
