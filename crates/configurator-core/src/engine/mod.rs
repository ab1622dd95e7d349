//! The configurator step engine.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Visibility    │    │   Navigation    │    │    Validator    │
//! │ (conditions,    │───▶│ (WizardSession: │───▶│ (per-kind rules │
//! │  gateway split) │    │  cursor, reset) │    │  before advance)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`visibility`]: pure filtering of the schema's steps against answers
//! - [`navigation`]: the [`WizardSession`] that owns answers and cursor
//! - [`validator`]: type-specific acceptance rules for a single answer
//!
//! # Example
//!
//! ```rust
//! use configurator_core::{
//!     engine::{NavigationError, Position, WizardSession},
//!     models::{ConfiguratorSchema, InputKind, LocalizedText, Step, StepOption},
//! };
//!
//! let radio = |order, field: &str, required| Step {
//!     order,
//!     field_name: field.to_string(),
//!     title: LocalizedText::from(field),
//!     description: None,
//!     required,
//!     visibility: None,
//!     kind: InputKind::Radio { options: vec![StepOption::new("yes", "Yes")] },
//! };
//! let schema = ConfiguratorSchema::new(
//!     1,
//!     "carport",
//!     "Carport",
//!     vec![radio(1, "roof", true), radio(2, "lighting", false)],
//! );
//!
//! let mut session = WizardSession::new(schema);
//! session.advance().unwrap(); // "roof" was defaulted to its first option
//! assert_eq!(session.position(), Position::Gateway);
//! assert_eq!(session.advance(), Err(NavigationError::GatewayUnanswered));
//!
//! session.choose_more_customization(false);
//! session.advance().unwrap();
//! assert!(session.is_complete());
//! ```

pub mod coerce;
pub mod navigation;
pub mod validator;
pub mod visibility;


pub use navigation::{NavigationError, Position, WizardSession};
pub use validator::{validate, ValidationError};
pub use visibility::{compute_visible_steps, evaluate, is_visible, StepPartition};
