//! Markdown formatting of models, listings, results and wizard prompts.
//!
//! Everything here renders through [`std::fmt::Display`] into markdown, which
//! the CLI turns into styled terminal output.
//!
//! - [`collections`]: listing wrappers ([`ConfiguratorSummaries`], [`Submissions`])
//! - [`models`]: Display for domain models and locale-aware detail views
//! - [`results`]: import, delete, status change and submit confirmations
//! - [`status`]: one-line status messages ([`OperationStatus`])
//! - [`wizard`]: step, gateway and overview prompts
//! - [`datetime`]: timestamps in the system time zone
//!
//! ```rust
//! use configurator_core::display::OperationStatus;
//!
//! let status = OperationStatus::warning("width: Value must be at least 100");
//! assert!(status.to_string().contains("at least 100"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod wizard;

pub use collections::{ConfiguratorSummaries, Submissions};
pub use datetime::LocalDateTime;
pub use models::{SchemaDetails, SubmissionDetails};
pub use results::{DeleteResult, ImportResult, StatusChange, SubmitResult};
pub use status::{OperationStatus, StatusLevel};
pub use wizard::{render_position, AnswerOverview, GatewayPrompt, StepPrompt};
