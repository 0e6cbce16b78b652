pub mod submission;
pub mod validation;

pub use submission::{ContactSubmission, DemoSubmission, FormFields, Submission, SubmissionResult, Variant};
pub use validation::{ValidationError, validate};
