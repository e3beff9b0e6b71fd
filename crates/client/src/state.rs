//! UI-local state for the form page.

use myform_core::{Form, ValidationErrors};

use crate::error::ApiError;
use crate::signal::{ReadSignal, Signal};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    pub message: Option<String>,
    pub validation_errors: Option<ValidationErrors>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub submitting: bool,
    pub loading_forms: bool,
}

/// Writable only through its methods; consumers get [`ReadSignal`] views.
///
/// Nothing here refuses a second submit while one is in flight. Disabling
/// the submit control on [`FormState::submitting`] is the caller's job.
#[derive(Debug, Default)]
pub struct FormState {
    forms: Signal<Vec<Form>>,
    submitting: Signal<bool>,
    loading_forms: Signal<bool>,
    submitted: Signal<bool>,
    error_message: Signal<Option<String>>,
    validation_errors: Signal<Option<ValidationErrors>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forms(&self) -> ReadSignal<Vec<Form>> {
        self.forms.read_only()
    }

    pub fn submitting(&self) -> ReadSignal<bool> {
        self.submitting.read_only()
    }

    pub fn loading_forms(&self) -> ReadSignal<bool> {
        self.loading_forms.read_only()
    }

    pub fn submitted(&self) -> ReadSignal<bool> {
        self.submitted.read_only()
    }

    pub fn error_message(&self) -> ReadSignal<Option<String>> {
        self.error_message.read_only()
    }

    pub fn validation_errors(&self) -> ReadSignal<Option<ValidationErrors>> {
        self.validation_errors.read_only()
    }

    pub fn set_forms(&self, forms: Vec<Form>) {
        self.forms.set(forms);
    }

    pub fn set_submitting(&self, value: bool) {
        self.submitting.set(value);
    }

    pub fn set_loading_forms(&self, value: bool) {
        self.loading_forms.set(value);
    }

    pub fn set_submitted(&self, value: bool) {
        self.submitted.set(value);
    }

    /// `None` clears both the message and the field errors.
    pub fn set_error(&self, error: Option<&ApiError>) {
        match error {
            Some(error) => {
                self.error_message.set(Some(error.message.clone()));
                self.validation_errors
                    .set(error.errors.clone().filter(|e| !e.is_empty()));
            }
            None => self.clear_error(),
        }
    }

    pub fn clear_error(&self) {
        self.error_message.set(None);
        self.validation_errors.set(None);
    }

    /// Back to the initial flags. The loaded list is kept.
    pub fn reset(&self) {
        self.submitting.set(false);
        self.loading_forms.set(false);
        self.submitted.set(false);
        self.clear_error();
    }

    pub fn is_loading(&self) -> bool {
        self.submitting.get() || self.loading_forms.get()
    }

    pub fn has_error(&self) -> bool {
        self.error_message.with(Option::is_some)
    }

    pub fn has_validation_errors(&self) -> bool {
        self.validation_errors
            .with(|errors| errors.as_ref().is_some_and(|e| !e.is_empty()))
    }

    pub fn error_state(&self) -> ErrorState {
        ErrorState {
            message: self.error_message.get(),
            validation_errors: self.validation_errors.get(),
        }
    }

    pub fn loading_state(&self) -> LoadingState {
        LoadingState {
            submitting: self.submitting.get(),
            loading_forms: self.loading_forms.get(),
        }
    }
}
