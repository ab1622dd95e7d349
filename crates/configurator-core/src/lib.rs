//! Core library for guided product configurators.
//!
//! A configurator is an ordered list of steps (questions) that a customer
//! walks through to describe the product they want a quote for. This crate
//! holds everything behind that wizard:
//!
//! - [`models`]: schemas, steps, answers, contact details and submissions
//! - [`engine`]: visibility filtering, navigation and per-step validation
//! - [`submit`]: submission assembly and webhook delivery
//! - [`db`]: the SQLite store for definitions and submissions
//! - [`service`]: the async API front ends talk to
//! - [`display`]: markdown rendering for terminals
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use configurator_core::{
//!     models::{AppointmentSelection, ConfiguratorDefinition, ContactInfo},
//!     params::{ConfiguratorKey, ImportConfigurator},
//!     ConfiguratorServiceBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ConfiguratorServiceBuilder::new()
//!     .with_database_path(Some("configurator.db"))
//!     .build()
//!     .await?;
//!
//! let definition: ConfiguratorDefinition =
//!     serde_json::from_str(&std::fs::read_to_string("veranda.json")?)?;
//! service
//!     .import_configurator(&ImportConfigurator { definition, replace: false })
//!     .await?;
//!
//! let mut session = service.start_session(&ConfiguratorKey::from("veranda")).await?;
//! session.set_answer("width", 500.0);
//! while !session.is_complete() {
//!     session.advance()?;
//! #   break;
//! }
//!
//! let contact = ContactInfo::new("Ann", "ann@example.com", "0612345678");
//! let submission = service
//!     .submit(&session, contact, AppointmentSelection::none())
//!     .await?;
//! println!("Stored submission {}", submission.id);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod service;
pub mod submit;

// Re-export commonly used types
pub use db::Database;
pub use engine::{compute_visible_steps, NavigationError, Position, ValidationError, WizardSession};
pub use error::{ConfiguratorError, Result};
pub use models::{
    AnswerValue, Answers, AppointmentSelection, ConfiguratorDefinition, ConfiguratorSchema,
    ConfiguratorSummary, ContactInfo, InputKind, Step, StepOption, Submission, SubmissionStatus,
};
pub use params::{ConfiguratorKey, Id, ImportConfigurator, ListSubmissions, UpdateSubmissionStatus};
pub use service::{ConfiguratorService, ConfiguratorServiceBuilder};
pub use submit::{SubmitError, WebhookNotifier, WebhookPayload};
