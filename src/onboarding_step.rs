use crate::connection_validator::{ValidationResult, validate};

/// Shared-state setter owned by the surrounding wizard. Receives the raw
/// pasted text unmodified, exactly once per successful submit.
pub type SetConnectionString = Box<dyn FnMut(&str)>;

/// Lifecycle hooks supplied by the wizard framework. They are forwarded,
/// never reinterpreted; all are optional.
#[derive(Default)]
pub struct WizardHooks {
    pub on_change: Option<Box<dyn FnMut(&FormSnapshot)>>,
    pub on_submit: Option<Box<dyn FnMut(&str)>>,
    pub on_submit_failure: Option<Box<dyn FnMut(&str)>>,
}

/// Inputs the wizard provides when this step is entered.
///
/// `connection_string` restores the field when navigating back to the step.
/// The two error fields carry failures from a previous, external connection
/// attempt; both are first-class, and the host error is surfaced first when
/// both are present.
#[derive(Debug, Default, Clone)]
pub struct StepConfig {
    pub connection_string: String,
    pub start_lnd_host_error: Option<String>,
    pub start_lnd_macaroon_error: Option<String>,
    pub current_item: Option<String>,
}

/// Validation state of the connection-string field for its current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Pristine,
    Validating,
    Valid,
    Invalid,
}

/// Snapshot of the form handed to the wizard's change hook.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub value: String,
    pub error: Option<String>,
    pub submits: u32,
    pub state: FieldState,
    pub current_item: Option<String>,
}

/// Controller for the BTCPay Server step of the onboarding wizard.
///
/// Owns the field text and its error state, runs the validator on the
/// events the wizard reports (edit, blur, submit), and forwards the raw
/// text to the wizard's shared state when a submit passes. The rendering
/// layer reads `error()` and `state()`; there is no hidden form handle.
pub struct OnboardingStep {
    text: String,
    state: FieldState,
    validation_error: Option<String>,
    external_errors: Vec<String>,
    submits: u32,
    current_item: Option<String>,
    set_connection_string: SetConnectionString,
    hooks: WizardHooks,
}

impl OnboardingStep {
    pub fn new(
        config: StepConfig,
        set_connection_string: SetConnectionString,
        hooks: WizardHooks,
    ) -> Self {
        // Host error first, then macaroon: both are shown through the same
        // field, in that order, until the user edits.
        let external_errors = [
            config.start_lnd_host_error,
            config.start_lnd_macaroon_error,
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            text: config.connection_string,
            state: FieldState::Pristine,
            validation_error: None,
            external_errors,
            submits: 0,
            current_item: config.current_item,
            set_connection_string,
            hooks,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// The message the rendering layer should attach to the field, if any.
    /// Errors from an earlier connection attempt outrank the validator's
    /// verdict; they describe a failure on text that was syntactically fine.
    pub fn error(&self) -> Option<&str> {
        self.external_errors
            .first()
            .map(String::as_str)
            .or(self.validation_error.as_deref())
    }

    /// All currently attached errors, external ones first.
    pub fn errors(&self) -> Vec<&str> {
        self.external_errors
            .iter()
            .map(String::as_str)
            .chain(self.validation_error.as_deref())
            .collect()
    }

    /// User edited the field. Stale errors from a previous connection
    /// attempt are dropped; inline validation only kicks in once a submit
    /// has happened this session.
    pub fn handle_change(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.external_errors.clear();
        self.state = FieldState::Validating;
        self.validation_error = None;
        if self.submits > 0 {
            self.run_validation();
        }
        self.emit_change();
    }

    /// Field lost focus. Same policy as inline validation on change.
    pub fn handle_blur(&mut self) {
        if self.submits > 0 {
            self.run_validation();
        }
    }

    /// Attempt to submit the step. Runs the validator one final time; an
    /// `Invalid` verdict blocks submission. On `Valid` the raw text goes to
    /// the wizard's shared state before the wizard's own submit hook runs.
    pub fn handle_submit(&mut self) -> bool {
        self.submits += 1;
        self.run_validation();

        if self.state != FieldState::Valid {
            let message = self
                .error()
                .unwrap_or(crate::connection_validator::MALFORMED_CONFIG)
                .to_string();
            if let Some(on_submit_failure) = &mut self.hooks.on_submit_failure {
                on_submit_failure(&message);
            }
            return false;
        }

        let text = self.text.clone();
        (self.set_connection_string)(&text);
        if let Some(on_submit) = &mut self.hooks.on_submit {
            on_submit(&text);
        }
        true
    }

    fn run_validation(&mut self) {
        match validate(&self.text) {
            ValidationResult::Valid => {
                self.state = FieldState::Valid;
                self.validation_error = None;
            }
            ValidationResult::Invalid(message) => {
                self.state = FieldState::Invalid;
                self.validation_error = Some(message);
            }
        }
    }

    fn emit_change(&mut self) {
        let snapshot = FormSnapshot {
            value: self.text.clone(),
            error: self.error().map(str::to_string),
            submits: self.submits,
            state: self.state,
            current_item: self.current_item.clone(),
        };
        if let Some(on_change) = &mut self.hooks.on_change {
            on_change(&snapshot);
        }
    }
}
