//! Logic shared by the site frontend and the intake backend.
//!
//! Nothing in here touches the DOM, the network or the clock, so the same
//! code prices a quote in the browser and re-validates a submission on the
//! server.

pub mod content;
pub mod estimator;
pub mod form;

pub use content::{resolve, ContentOverrides, Locale};
pub use estimator::{breakdown, estimate, EstimateBreakdown, EstimateInput, PriceTable, SiteType, Urgency};
pub use form::{
    BudgetRange, ContactSubmission, Field, FormController, ProjectType, Step, SubmissionStatus,
    SubmitError, Timeline, ValidationError,
};
