use gloo_net::http::Request;
use studio_shared::{EstimateInput, PriceTable, SiteType, Urgency};
use studio_shared::estimator::{MAX_PAGES, MIN_PAGES};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;
use crate::config;
use crate::i18n::{format_eur, use_page_text};
use crate::Route;

#[function_component(Pricing)]
pub fn pricing() -> Html {
    let text = use_page_text();
    let input = use_state(EstimateInput::default);
    let table = use_state(|| PriceTable::standard().clone());

    // The server's table wins if it differs from the compiled one.
    {
        let table = table.clone();
        use_effect_with_deps(move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match Request::get(&format!("{}/api/pricing", config::get_backend_url()))
                    .send()
                    .await
                {
                    Ok(response) if response.ok() => {
                        if let Ok(fetched) = response.json::<PriceTable>().await {
                            table.set(fetched);
                        }
                    }
                    Ok(response) => log::warn!("Price table request failed with status {}", response.status()),
                    Err(e) => log::warn!("Using built-in price table: {}", e),
                }
            });
            || ()
        }, ());
    }

    let breakdown = use_memo(
        |(table, input)| table.breakdown(input),
        ((*table).clone(), (*input).clone()),
    );

    let on_site_type = {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            next.site_type = SiteType::parse(&select.value());
            input.set(next);
        })
    };

    let on_pages = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let slider: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            next.set_page_count(slider.value().parse().unwrap_or(MIN_PAGES));
            input.set(next);
        })
    };

    let on_feature = |id: String| {
        let input = input.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*input).clone();
            next.toggle_feature(&id);
            input.set(next);
        })
    };

    let on_urgency = |urgency: Urgency| {
        let input = input.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*input).clone();
            next.urgency = urgency;
            input.set(next);
        })
    };

    let locale = text.locale;
    let multiplier = format!("×{}.{:02}", breakdown.multiplier_percent / 100, breakdown.multiplier_percent % 100);

    html! {
        <div class="page pricing">
            <h1>{text.get("pricing.title")}</h1>
            <p class="lead">{text.get("pricing.lead")}</p>

            <div class="estimator">
                <div class="estimator-controls">
                    <label for="site-type">{text.get("pricing.site_type")}</label>
                    <select id="site-type" onchange={on_site_type}>
                        {
                            SiteType::ALL.iter().map(|site| html! {
                                <option value={site.as_str()} selected={input.site_type == *site}>
                                    {text.get(&format!("pricing.site.{}", site))}
                                </option>
                            }).collect::<Html>()
                        }
                    </select>

                    <label for="page-count">
                        {format!("{}: {}", text.get("pricing.pages"), input.page_count)}
                    </label>
                    <input
                        id="page-count"
                        type="range"
                        min={MIN_PAGES.to_string()}
                        max={MAX_PAGES.to_string()}
                        value={input.page_count.to_string()}
                        oninput={on_pages}
                    />

                    <fieldset class="feature-list">
                        <legend>{text.get("pricing.features")}</legend>
                        {
                            table.listed_features().into_iter().map(|(id, price)| html! {
                                <label class="feature" key={id}>
                                    <input
                                        type="checkbox"
                                        checked={input.features.contains(id)}
                                        onclick={on_feature(id.to_string())}
                                    />
                                    {text.get(&format!("pricing.feature.{}", id))}
                                    <span class="feature-price">{format!("+{}", format_eur(price, locale))}</span>
                                </label>
                            }).collect::<Html>()
                        }
                    </fieldset>

                    <fieldset class="urgency">
                        <legend>{text.get("pricing.urgency")}</legend>
                        {
                            Urgency::ALL.iter().map(|urgency| html! {
                                <label key={urgency.as_str()}>
                                    <input
                                        type="radio"
                                        name="urgency"
                                        checked={input.urgency == *urgency}
                                        onclick={on_urgency(*urgency)}
                                    />
                                    {text.get(&format!("pricing.urgency.{}", urgency))}
                                </label>
                            }).collect::<Html>()
                        }
                    </fieldset>
                </div>

                <aside class="estimate-summary">
                    <dl>
                        <dt>{text.get("pricing.base")}</dt>
                        <dd>{format_eur(breakdown.base, locale)}</dd>
                        <dt>{text.get("pricing.extra_pages")}</dt>
                        <dd>{format_eur(breakdown.extra_pages, locale)}</dd>
                        <dt>{text.get("pricing.features_cost")}</dt>
                        <dd>{format_eur(breakdown.features, locale)}</dd>
                        <dt>{text.get("pricing.multiplier")}</dt>
                        <dd>{multiplier}</dd>
                    </dl>
                    <p class="estimate-total">
                        {text.get("pricing.total")}
                        <strong>{format_eur(breakdown.total, locale)}</strong>
                    </p>
                    <p class="estimate-note">{text.get("pricing.note")}</p>
                    <Link<Route> to={Route::Contact} classes="button primary">
                        {text.get("pricing.cta")}
                    </Link<Route>>
                </aside>
            </div>
        </div>
    }
}
