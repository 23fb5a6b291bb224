use studio_shared::Locale;
use yew::prelude::*;
use crate::i18n::use_page_text;

struct Section {
    title: &'static str,
    intro: &'static str,
    items: &'static [&'static str],
}

const SECTIONS_FI: &[Section] = &[
    Section {
        title: "1. Mitä tietoja keräämme",
        intro: "Kun lähetät yhteydenottolomakkeen, käsittelemme seuraavia tietoja:",
        items: &[
            "Nimi ja sähköpostiosoite (vastaamista varten)",
            "Puhelinnumero ja yritys, jos annat ne",
            "Projektin tyyppi, budjetti, aikataulu ja viestisi",
        ],
    },
    Section {
        title: "2. Käsittelyn peruste",
        intro: "Käsittelemme tietoja tarjouspyyntösi perusteella ennen mahdollista sopimusta.",
        items: &[],
    },
    Section {
        title: "3. Säilytys",
        intro: "Lomakkeen tiedot välitetään sähköpostiimme. Poistamme ne, kun asia on käsitelty, ellei synny asiakassuhdetta.",
        items: &[],
    },
    Section {
        title: "4. Hinta-arvio",
        intro: "Hintalaskuri toimii selaimessasi. Valintojasi ei tallenneta eikä lähetetä meille.",
        items: &[],
    },
    Section {
        title: "5. Oikeutesi",
        intro: "Sinulla on oikeus:",
        items: &[
            "Tarkastaa sinusta tallennetut tiedot",
            "Pyytää tietojen korjaamista tai poistamista",
            "Tehdä valitus tietosuojavaltuutetulle",
        ],
    },
];

const SECTIONS_EN: &[Section] = &[
    Section {
        title: "1. What we collect",
        intro: "When you send the contact form we process:",
        items: &[
            "Name and email address (so we can reply)",
            "Phone number and company, if you give them",
            "Project type, budget, timeline and your message",
        ],
    },
    Section {
        title: "2. Legal basis",
        intro: "We process the data to answer your quote request before any contract.",
        items: &[],
    },
    Section {
        title: "3. Retention",
        intro: "Form data is forwarded to our inbox. We delete it once the request is handled unless it leads to a customer relationship.",
        items: &[],
    },
    Section {
        title: "4. Price estimate",
        intro: "The estimator runs in your browser. Your selections are not stored or sent to us.",
        items: &[],
    },
    Section {
        title: "5. Your rights",
        intro: "You have the right to:",
        items: &[
            "See the data we hold about you",
            "Ask for it to be corrected or deleted",
            "Lodge a complaint with the data protection authority",
        ],
    },
];

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    let text = use_page_text();
    let sections = match text.locale {
        Locale::Fi => SECTIONS_FI,
        Locale::En => SECTIONS_EN,
    };

    html! {
        <div class="legal-content privacy-policy">
            <h1>{text.get("privacy.title")}</h1>
            {
                sections.iter().map(|section| html! {
                    <section key={section.title}>
                        <h2>{section.title}</h2>
                        <p>{section.intro}</p>
                        if !section.items.is_empty() {
                            <ul>
                                { for section.items.iter().map(|item| html! { <li>{*item}</li> }) }
                            </ul>
                        }
                    </section>
                }).collect::<Html>()
            }
        </div>
    }
}
