use std::cell::Cell;
use std::rc::Rc;
use gloo_net::http::Request;
use log::{info, Level};
use studio_shared::{ContentOverrides, Locale};
use web_sys::{window, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

mod config;
mod i18n;
mod pages {
    pub mod contact;
    pub mod home;
    pub mod pricing;
    pub mod privacy;
}

use i18n::{use_page_text, LoadedOverrides, PageText};
use pages::{
    contact::ContactPage,
    home::Home,
    pricing::Pricing,
    privacy::PrivacyPolicy,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/pricing")]
    Pricing,
    #[at("/contact")]
    Contact,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Pricing => {
            info!("Rendering Pricing page");
            html! { <Pricing /> }
        },
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <ContactPage /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let text = use_page_text();
    html! {
        <div class="page not-found">
            <p>{text.get("not_found")}</p>
            <Link<Route> to={Route::Home} classes="nav-link">{text.get("nav.home")}</Link<Route>>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub on_toggle_locale: Callback<()>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let text = use_page_text();
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let toggle_locale = {
        let on_toggle_locale = props.on_toggle_locale.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_toggle_locale.emit(());
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"sukat.dev"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Pricing} classes="nav-link">
                            {text.get("nav.pricing")}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Contact} classes="nav-link">
                            {text.get("nav.contact")}
                        </Link<Route>>
                    </div>
                    <button class="nav-locale-button" lang={text.locale.other().code()} onclick={toggle_locale}>
                        {text.get("nav.locale_switch")}
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let text = use_page_text();
    html! {
        <footer class="site-footer">
            <Link<Route> to={Route::Privacy} classes="footer-link">{text.get("nav.privacy")}</Link<Route>>
            <span>{format!("sukat.dev · {}", text.get("footer.rights"))}</span>
        </footer>
    }
}

fn browser_locale() -> Locale {
    window()
        .and_then(|w| w.navigator().language())
        .map(|tag| Locale::from_tag(&tag))
        .unwrap_or_default()
}

#[function_component]
fn App() -> Html {
    let stored_locale = use_local_storage::<Locale>("locale".to_string());
    let locale = (*stored_locale).unwrap_or_else(browser_locale);
    let overrides = use_state(LoadedOverrides::default);

    // Editor overrides for the active locale; built-in text shows until they arrive.
    {
        let overrides = overrides.clone();
        use_effect_with_deps(move |locale: &Locale| {
            let locale = *locale;
            // Cleared when the locale changes again; a late answer is then dropped.
            let current = Rc::new(Cell::new(true));
            let still_current = current.clone();
            if let Some(root) = window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
                let _ = root.set_attribute("lang", locale.code());
            }
            wasm_bindgen_futures::spawn_local(async move {
                match Request::get(&format!("{}/api/content/{}", config::get_backend_url(), locale.code()))
                    .send()
                    .await
                {
                    Ok(response) if response.ok() => match response.json::<ContentOverrides>().await {
                        Ok(fetched) if still_current.get() => {
                            info!("Loaded {} content overrides for {}", fetched.len(), locale);
                            overrides.set(LoadedOverrides::new(locale, fetched));
                        }
                        Ok(_) => log::debug!("Dropping stale content overrides for {}", locale),
                        Err(e) => log::warn!("Bad content overrides for {}: {}", locale, e),
                    },
                    Ok(response) => log::warn!("Content overrides request failed with status {}", response.status()),
                    Err(e) => log::warn!("Content overrides unavailable: {}", e),
                }
            });
            move || current.set(false)
        }, locale);
    }

    let on_toggle_locale = {
        let stored_locale = stored_locale.clone();
        Callback::from(move |_: ()| stored_locale.set(locale.other()))
    };

    let text = PageText::new(locale, overrides.for_locale(locale));

    html! {
        <ContextProvider<PageText> context={text}>
            <BrowserRouter>
                <Nav {on_toggle_locale} />
                <main>
                    <Switch<Route> render={switch} />
                </main>
                <Footer />
            </BrowserRouter>
        </ContextProvider<PageText>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
