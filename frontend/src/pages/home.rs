use yew::prelude::*;
use yew_router::prelude::*;
use crate::i18n::use_page_text;
use crate::Route;

const SERVICES: [&str; 3] = ["web", "shop", "care"];

#[function_component(Home)]
pub fn home() -> Html {
    let text = use_page_text();

    html! {
        <div class="page home">
            <section class="hero">
                <h1>{text.get("hero.title")}</h1>
                <p class="hero-lead">{text.get("hero.lead")}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Pricing} classes="button primary">
                        {text.get("hero.cta_pricing")}
                    </Link<Route>>
                    <Link<Route> to={Route::Contact} classes="button secondary">
                        {text.get("hero.cta_contact")}
                    </Link<Route>>
                </div>
            </section>

            <section class="services">
                <h2>{text.get("services.title")}</h2>
                <div class="service-grid">
                    {
                        SERVICES.iter().map(|service| html! {
                            <article class="service-card" key={*service}>
                                <h3>{text.get(&format!("services.{}.title", service))}</h3>
                                <p>{text.get(&format!("services.{}.body", service))}</p>
                            </article>
                        }).collect::<Html>()
                    }
                </div>
            </section>
        </div>
    }
}
