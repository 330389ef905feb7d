//! BTCPay Server connection-string intake for the node onboarding wizard.
//!
//! The user pastes the JSON blob exported from BTCPay Server's connection
//! settings page; [`validate`] decides whether it describes a usable BTC
//! gRPC endpoint, and [`OnboardingStep`] wires that verdict into field error
//! state and forwards the raw text to the wizard's shared state on a
//! successful submit. The actual node connection happens in a later step.

mod connection_config;
mod connection_validator;
mod onboarding_step;

pub use connection_config::{ConfigExport, ConnectionDescriptor, EndpointEntry};
pub use connection_validator::{MALFORMED_CONFIG, ValidationResult, extract_descriptor, validate};
pub use onboarding_step::{
    FieldState, FormSnapshot, OnboardingStep, SetConnectionString, StepConfig, WizardHooks,
};
