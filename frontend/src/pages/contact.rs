use gloo_net::http::Request;
use serde::Deserialize;
use studio_shared::{
    BudgetRange, ContactSubmission, Field, FormController, ProjectType, Step, SubmissionStatus,
    SubmitError, Timeline,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use crate::config;
use crate::i18n::{use_page_text, PageText};

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Posts the finished form. Any non-2xx answer is an error the user can retry.
async fn post_contact(submission: ContactSubmission) -> Result<(), String> {
    let request = Request::post(&format!("{}/api/contact", config::get_backend_url()))
        .json(&submission)
        .map_err(|e| e.to_string())?;
    let response = request.send().await.map_err(|e| e.to_string())?;
    if response.ok() {
        return Ok(());
    }
    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(body.error),
        Err(_) => Err(format!("Request failed with status {}", response.status())),
    }
}

fn step_key(step: Step) -> &'static str {
    match step {
        Step::Contact => "contact.step.contact",
        Step::Project => "contact.step.project",
        Step::Message => "contact.step.message",
    }
}

#[function_component(ContactPage)]
pub fn contact_page() -> Html {
    let text = use_page_text();
    html! {
        <div class="page contact">
            <h1>{text.get("contact.title")}</h1>
            <ContactForm {text} />
        </div>
    }
}

pub enum ContactMsg {
    SetText(Field, String),
    SetProjectType(String),
    SetBudget(String),
    SetTimeline(String),
    Next,
    Back,
    JumpTo(Step),
    Submit,
    Submitted(Result<(), String>),
    StartOver,
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub text: PageText,
}

pub struct ContactForm {
    form: FormController,
}

impl Component for ContactForm {
    type Message = ContactMsg;
    type Properties = ContactFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: FormController::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::SetText(field, value) => {
                self.form.set_text(field, value);
                true
            }
            ContactMsg::SetProjectType(value) => {
                self.form.set_project_type(ProjectType::parse(&value));
                true
            }
            ContactMsg::SetBudget(value) => {
                self.form.set_budget(BudgetRange::parse(&value));
                true
            }
            ContactMsg::SetTimeline(value) => {
                self.form.set_timeline(Timeline::parse(&value));
                true
            }
            ContactMsg::Next => {
                if let Err(e) = self.form.advance() {
                    log::debug!("Step not complete: {}", e);
                }
                true
            }
            ContactMsg::Back => {
                self.form.retreat();
                true
            }
            ContactMsg::JumpTo(step) => {
                // a refused jump still flags the fields blocking it
                self.form.jump_to(step);
                true
            }
            ContactMsg::Submit => match self.form.begin_submit() {
                Ok(submission) => {
                    ctx.link().send_future(async move {
                        ContactMsg::Submitted(post_contact(submission).await)
                    });
                    true
                }
                Err(SubmitError::InFlight) => false,
                Err(e) => {
                    log::debug!("Not submitting: {}", e);
                    true
                }
            },
            ContactMsg::Submitted(outcome) => {
                if let Err(e) = &outcome {
                    log::warn!("Contact submission failed: {}", e);
                }
                self.form.finish_submit(outcome);
                true
            }
            ContactMsg::StartOver => {
                self.form.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let text = &ctx.props().text;

        if *self.form.status() == SubmissionStatus::Success {
            return html! {
                <div class="contact-success">
                    <p>{text.get("contact.success")}</p>
                    <button class="button secondary" onclick={ctx.link().callback(|_| ContactMsg::StartOver)}>
                        {text.get("contact.start_over")}
                    </button>
                </div>
            };
        }

        let step = self.form.step();
        let submitting = self.form.is_submitting();

        html! {
            <form class="contact-form" onsubmit={ctx.link().callback(|e: SubmitEvent| {
                e.prevent_default();
                ContactMsg::Submit
            })}>
                <ol class="step-indicator">
                    {
                        Step::ALL.iter().map(|s| {
                            let s = *s;
                            let class = classes!(
                                "step",
                                (s == step).then(|| "current"),
                                (s > self.form.reached()).then(|| "locked"),
                            );
                            html! {
                                <li class={class} key={s.index()}>
                                    <button
                                        type="button"
                                        disabled={s > self.form.reached() || submitting}
                                        onclick={ctx.link().callback(move |_| ContactMsg::JumpTo(s))}
                                    >
                                        {format!("{}. {}", s.index() + 1, text.get(step_key(s)))}
                                    </button>
                                </li>
                            }
                        }).collect::<Html>()
                    }
                </ol>

                { self.step_fields(ctx, step) }

                if let SubmissionStatus::Error(_) = self.form.status() {
                    <p class="form-error" role="alert">{text.get("contact.error")}</p>
                }

                <div class="form-actions">
                    if !step.is_first() {
                        <button
                            type="button"
                            class="button secondary"
                            disabled={submitting}
                            onclick={ctx.link().callback(|_| ContactMsg::Back)}
                        >
                            {text.get("contact.back")}
                        </button>
                    }
                    if step.is_last() {
                        <button type="submit" class="button primary" disabled={submitting}>
                            {
                                if submitting {
                                    text.get("contact.sending")
                                } else {
                                    text.get("contact.send")
                                }
                            }
                        </button>
                    } else {
                        <button
                            type="button"
                            class="button primary"
                            onclick={ctx.link().callback(|_| ContactMsg::Next)}
                        >
                            {text.get("contact.next")}
                        </button>
                    }
                </div>
            </form>
        }
    }
}

impl ContactForm {
    fn step_fields(&self, ctx: &Context<Self>, step: Step) -> Html {
        let text = &ctx.props().text;
        let data = self.form.data();
        match step {
            Step::Contact => html! {
                <fieldset>
                    { self.text_input(ctx, Field::Name, "text", &data.name, "contact.name") }
                    { self.text_input(ctx, Field::Email, "email", &data.email, "contact.email") }
                    { self.text_input(ctx, Field::Phone, "tel", &data.phone, "contact.phone") }
                    { self.text_input(ctx, Field::Company, "text", &data.company, "contact.company") }
                </fieldset>
            },
            Step::Project => html! {
                <fieldset>
                    {
                        self.choice(
                            ctx,
                            Field::ProjectType,
                            "contact.project",
                            ProjectType::ALL.iter().map(|p| p.as_str()).collect(),
                            data.project_type.map(|p| p.as_str()),
                            ctx.link().callback(ContactMsg::SetProjectType),
                        )
                    }
                    {
                        self.choice(
                            ctx,
                            Field::Budget,
                            "contact.budget",
                            BudgetRange::ALL.iter().map(|b| b.as_str()).collect(),
                            data.budget.map(|b| b.as_str()),
                            ctx.link().callback(ContactMsg::SetBudget),
                        )
                    }
                    {
                        self.choice(
                            ctx,
                            Field::Timeline,
                            "contact.timeline",
                            Timeline::ALL.iter().map(|t| t.as_str()).collect(),
                            data.timeline.map(|t| t.as_str()),
                            ctx.link().callback(ContactMsg::SetTimeline),
                        )
                    }
                </fieldset>
            },
            Step::Message => {
                let invalid = self.form.is_invalid(Field::Message);
                html! {
                    <fieldset>
                        <label class={classes!("field", invalid.then(|| "invalid"))}>
                            {text.get("contact.message")}
                            <textarea
                                rows="6"
                                value={data.message.clone()}
                                disabled={self.form.is_submitting()}
                                oninput={ctx.link().callback(|e: InputEvent| {
                                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                                    ContactMsg::SetText(Field::Message, area.value())
                                })}
                            />
                            if invalid {
                                <span class="field-hint">{text.get("contact.required")}</span>
                            }
                        </label>
                    </fieldset>
                }
            }
        }
    }

    fn text_input(&self, ctx: &Context<Self>, field: Field, kind: &'static str, value: &str, label: &str) -> Html {
        let text = &ctx.props().text;
        let invalid = self.form.is_invalid(field);
        let hint = match field {
            Field::Email if !value.trim().is_empty() => "contact.invalid_email",
            _ => "contact.required",
        };
        html! {
            <label class={classes!("field", invalid.then(|| "invalid"))}>
                {text.get(label)}
                <input
                    type={kind}
                    value={value.to_string()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        ContactMsg::SetText(field, input.value())
                    })}
                />
                if invalid {
                    <span class="field-hint">{text.get(hint)}</span>
                }
            </label>
        }
    }

    fn choice(
        &self,
        ctx: &Context<Self>,
        field: Field,
        option_prefix: &'static str,
        options: Vec<&'static str>,
        selected: Option<&'static str>,
        onchange: Callback<String>,
    ) -> Html {
        let text = &ctx.props().text;
        let invalid = self.form.is_invalid(field);
        let label_key = format!("contact.{}", field.as_str());

        html! {
            <label class={classes!("field", invalid.then(|| "invalid"))}>
                {text.get(&label_key)}
                <select onchange={Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    onchange.emit(select.value());
                })}>
                    <option value="" selected={selected.is_none()}>{text.get("contact.choose")}</option>
                    {
                        options.into_iter().map(|value| html! {
                            <option value={value} selected={selected == Some(value)}>
                                {text.get(&format!("{}.{}", option_prefix, value))}
                            </option>
                        }).collect::<Html>()
                    }
                </select>
                if invalid {
                    <span class="field-hint">{text.get("contact.required")}</span>
                }
            </label>
        }
    }
}
