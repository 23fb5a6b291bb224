//! Multi-step contact form: contact details, project details, message.
//!
//! [`FormController`] owns everything the form needs between renders. The UI
//! feeds it field edits and button presses; the network call for the final
//! submission happens outside, bracketed by [`FormController::begin_submit`]
//! and [`FormController::finish_submit`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Contact,
    Project,
    Message,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Contact, Step::Project, Step::Message];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    pub fn is_first(self) -> bool {
        self == Step::Contact
    }

    pub fn is_last(self) -> bool {
        self == Step::Message
    }

    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Step::Contact => &[Field::Name, Field::Email],
            Step::Project => &[Field::ProjectType, Field::Budget],
            Step::Message => &[Field::Message],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    ProjectType,
    Budget,
    Timeline,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::ProjectType => "project_type",
            Field::Budget => "budget",
            Field::Timeline => "timeline",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! choice_enum {
    ($name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// `None` for anything that is not one of the select options.
            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }
        }
    };
}

choice_enum!(ProjectType {
    NewSite => "new_site",
    Webshop => "webshop",
    Redesign => "redesign",
    Maintenance => "maintenance",
    Other => "other",
});

choice_enum!(BudgetRange {
    UnderOneThousand => "under_1000",
    OneToThreeThousand => "1000_3000",
    ThreeToSixThousand => "3000_6000",
    OverSixThousand => "over_6000",
});

choice_enum!(Timeline {
    Asap => "asap",
    WithinMonth => "within_month",
    WithinQuarter => "within_quarter",
    Flexible => "flexible",
});

/// Everything the contact form collects; posted as JSON on completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_type: Option<ProjectType>,
    pub budget: Option<BudgetRange>,
    pub timeline: Option<Timeline>,
    pub message: String,
}

impl ContactSubmission {
    pub fn is_field_valid(&self, field: Field) -> bool {
        match field {
            Field::Name => !self.name.trim().is_empty(),
            Field::Email => is_plausible_email(&self.email),
            Field::Phone | Field::Company => true,
            Field::ProjectType => self.project_type.is_some(),
            Field::Budget => self.budget.is_some(),
            Field::Timeline => true,
            Field::Message => !self.message.trim().is_empty(),
        }
    }

    pub fn validate_step(&self, step: Step) -> Result<(), ValidationError> {
        ValidationError::check(
            step.required_fields()
                .iter()
                .copied()
                .filter(|f| !self.is_field_valid(*f))
                .collect(),
        )
    }

    /// Validates the required fields of every step.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check(
            Step::ALL
                .iter()
                .flat_map(|s| s.required_fields())
                .copied()
                .filter(|f| !self.is_field_valid(*f))
                .collect(),
        )
    }
}

/// Lenient structural check: one `@`, something before it, and a dotted domain.
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing or invalid fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

impl ValidationError {
    fn check(missing: Vec<Field>) -> Result<(), ValidationError> {
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields.iter().map(Field::as_str).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("the form can only be sent from the last step")]
    NotFinalStep,
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    data: ContactSubmission,
    step: Step,
    reached: Step,
    invalid: BTreeSet<Field>,
    status: SubmissionStatus,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            data: ContactSubmission::default(),
            step: Step::Contact,
            reached: Step::Contact,
            invalid: BTreeSet::new(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn data(&self) -> &ContactSubmission {
        &self.data
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Furthest step the user has validated their way to.
    pub fn reached(&self) -> Step {
        self.reached
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.invalid.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Updates a text field. Ignored for choice fields and while a submission is in flight.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        let slot = match field {
            Field::Name => &mut self.data.name,
            Field::Email => &mut self.data.email,
            Field::Phone => &mut self.data.phone,
            Field::Company => &mut self.data.company,
            Field::Message => &mut self.data.message,
            Field::ProjectType | Field::Budget | Field::Timeline => return,
        };
        *slot = value.into();
        self.invalid.remove(&field);
    }

    pub fn set_project_type(&mut self, value: Option<ProjectType>) {
        if !self.is_submitting() {
            self.data.project_type = value;
            self.invalid.remove(&Field::ProjectType);
        }
    }

    pub fn set_budget(&mut self, value: Option<BudgetRange>) {
        if !self.is_submitting() {
            self.data.budget = value;
            self.invalid.remove(&Field::Budget);
        }
    }

    pub fn set_timeline(&mut self, value: Option<Timeline>) {
        if !self.is_submitting() {
            self.data.timeline = value;
            self.invalid.remove(&Field::Timeline);
        }
    }

    fn mark(&mut self, err: &ValidationError) {
        self.invalid.extend(err.missing.iter().copied());
    }

    /// Moves to the next step if the current one is complete. On the last
    /// step a valid form stays where it is.
    pub fn advance(&mut self) -> Result<Step, ValidationError> {
        if let Err(err) = self.data.validate_step(self.step) {
            self.mark(&err);
            return Err(err);
        }
        if let Some(next) = Step::from_index(self.step.index() + 1) {
            self.step = next;
            self.reached = self.reached.max(next);
        }
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> Step {
        if let Some(prev) = self.step.index().checked_sub(1).and_then(Step::from_index) {
            self.step = prev;
        }
        self.step
    }

    /// Jumps to a step the user has already reached. Forward jumps re-check
    /// every step being skipped, since earlier answers may have been edited.
    pub fn jump_to(&mut self, target: Step) -> bool {
        if target > self.reached {
            return false;
        }
        let current = self.step;
        for step in Step::ALL.into_iter().filter(|s| *s >= current && *s < target) {
            if let Err(err) = self.data.validate_step(step) {
                self.mark(&err);
                return false;
            }
        }
        self.step = target;
        true
    }

    /// Starts the final submission and returns the payload to send.
    ///
    /// While a submission is in flight this does nothing and reports
    /// [`SubmitError::InFlight`].
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        if !self.step.is_last() {
            return Err(SubmitError::NotFinalStep);
        }
        if let Err(err) = self.data.validate() {
            self.mark(&err);
            return Err(err.into());
        }
        self.status = SubmissionStatus::Submitting;
        Ok(self.data.clone())
    }

    /// Records the outcome of the submission started by [`Self::begin_submit`].
    /// Success clears the form; failure keeps every field so the user can retry.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        if !self.is_submitting() {
            return;
        }
        match outcome {
            Ok(()) => {
                *self = Self::new();
                self.status = SubmissionStatus::Success;
            }
            Err(message) => self.status = SubmissionStatus::Error(message),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
