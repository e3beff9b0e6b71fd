//! The form page: two name controls, the list of stored forms, and the
//! load / submit / delete flows that tie them to [`FormState`].

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;

use myform_core::{CreateFormRequest, Form, FormField, FormId, NAME_MAX_LEN, NAME_MIN_LEN};

use crate::error::ApiError;
use crate::mock::MockErrorKind;
use crate::service::FormClient;
use crate::signal::{ReadSignal, Signal};
use crate::state::FormState;
use crate::transport::Transport;

pub const SUBMIT_SUCCESS: &str = "Form submitted successfully!";
pub const DELETE_SUCCESS: &str = "Form deleted.";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            duration: Duration::from_secs(5),
        }
    }
}

/// One input. Editing the value drops any server-applied error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldControl {
    value: String,
    touched: bool,
    api_error: Option<String>,
}

impl FieldControl {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.api_error.is_none() && self.local_error().is_none()
    }

    fn local_error(&self) -> Option<LocalRule> {
        let len = self.value.chars().count();
        if len == 0 {
            Some(LocalRule::Required)
        } else if len < NAME_MIN_LEN {
            Some(LocalRule::MinLength)
        } else if len > NAME_MAX_LEN {
            Some(LocalRule::MaxLength)
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LocalRule {
    Required,
    MinLength,
    MaxLength,
}

#[derive(Debug, Default)]
struct Controls {
    first_name: FieldControl,
    last_name: FieldControl,
}

impl Controls {
    fn get(&self, field: FormField) -> &FieldControl {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut FieldControl {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
        }
    }

    fn is_valid(&self) -> bool {
        FormField::ALL.into_iter().all(|f| self.get(f).is_valid())
    }

    fn request(&self) -> CreateFormRequest {
        CreateFormRequest::new(self.first_name.value.clone(), self.last_name.value.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local rules failed; nothing was sent.
    Invalid,
    Created(Form),
    Failed(ApiError),
    /// The component was destroyed before the call finished.
    Cancelled,
}

pub struct FormComponent<T> {
    client: FormClient<T>,
    state: FormState,
    controls: Mutex<Controls>,
    notification: Signal<Option<Notification>>,
    destroyed: watch::Sender<bool>,
}

impl<T: Transport> FormComponent<T> {
    pub fn new(client: FormClient<T>) -> Self {
        let (destroyed, _) = watch::channel(false);
        Self {
            client,
            state: FormState::new(),
            controls: Mutex::new(Controls::default()),
            notification: Signal::new(None),
            destroyed,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn client(&self) -> &FormClient<T> {
        &self.client
    }

    pub fn notifications(&self) -> ReadSignal<Option<Notification>> {
        self.notification.read_only()
    }

    /// Submitting is disabled while a create is in flight.
    pub fn submit_disabled(&self) -> bool {
        self.state.submitting().get()
    }

    pub fn control(&self, field: FormField) -> FieldControl {
        self.controls().get(field).clone()
    }

    pub fn set_value(&self, field: FormField, value: impl Into<String>) {
        let mut controls = self.controls();
        let control = controls.get_mut(field);
        control.value = value.into();
        control.api_error = None;
    }

    /// The user left the field.
    pub fn touch(&self, field: FormField) {
        self.controls().get_mut(field).touched = true;
    }

    pub fn is_valid(&self) -> bool {
        self.controls().is_valid()
    }

    /// Message to show under `field`, if any. Hidden until the field was
    /// touched or a submit was attempted.
    pub fn field_error(&self, field: FormField) -> Option<String> {
        let controls = self.controls();
        let control = controls.get(field);
        if !control.touched && !self.state.submitted().get() {
            return None;
        }
        if let Some(message) = &control.api_error {
            return Some(message.clone());
        }
        let label = field.label();
        control.local_error().map(|rule| match rule {
            LocalRule::Required => format!("{label} is required"),
            LocalRule::MinLength => format!("{label} must be at least {NAME_MIN_LEN} characters"),
            LocalRule::MaxLength => format!("{label} must not exceed {NAME_MAX_LEN} characters"),
        })
    }

    pub fn validation_error_entries(&self) -> Vec<(String, Vec<String>)> {
        self.state.validation_errors().with(|errors| {
            errors
                .iter()
                .flat_map(|e| e.iter())
                .map(|(key, messages)| (key.to_string(), messages.to_vec()))
                .collect()
        })
    }

    pub async fn load_forms(&self) {
        if self.is_destroyed() {
            return;
        }
        self.state.set_loading_forms(true);
        self.state.clear_error();

        let outcome = self.until_destroyed(self.client.get_all_forms()).await;
        self.state.set_loading_forms(false);

        match outcome {
            Some(Ok(forms)) => self.state.set_forms(forms),
            Some(Err(error)) => {
                self.state.set_error(Some(&error));
                self.notify(Notification::error(&error.message));
            }
            None => tracing::debug!("form list load cancelled"),
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.is_destroyed() {
            return SubmitOutcome::Cancelled;
        }
        self.state.set_submitted(true);
        self.state.clear_error();

        let request = {
            let mut controls = self.controls();
            if !controls.is_valid() {
                for field in FormField::ALL {
                    controls.get_mut(field).touched = true;
                }
                return SubmitOutcome::Invalid;
            }
            controls.request()
        };

        self.state.set_submitting(true);
        let outcome = self.until_destroyed(self.client.create_form(&request)).await;
        self.state.set_submitting(false);
        self.state.set_submitted(false);

        match outcome {
            Some(Ok(form)) => {
                *self.controls() = Controls::default();
                self.state.clear_error();
                self.notify(Notification::success(SUBMIT_SUCCESS));
                self.load_forms().await;
                SubmitOutcome::Created(form)
            }
            Some(Err(error)) => {
                self.handle_error(&error);
                SubmitOutcome::Failed(error)
            }
            None => SubmitOutcome::Cancelled,
        }
    }

    pub async fn delete(&self, id: FormId) -> Result<(), ApiError> {
        if self.is_destroyed() {
            return Ok(());
        }
        self.state.clear_error();

        match self.until_destroyed(self.client.delete_form(id)).await {
            Some(Ok(())) => {
                self.notify(Notification::success(DELETE_SUCCESS));
                self.load_forms().await;
                Ok(())
            }
            Some(Err(error)) => {
                self.state.set_error(Some(&error));
                self.notify(Notification::error(&error.message));
                Err(error)
            }
            None => Ok(()),
        }
    }

    /// Route a canned failure through the normal error path.
    pub fn trigger_mock_error(&self, kind: MockErrorKind) {
        self.handle_error(&kind.error());
    }

    /// Cancel whatever is in flight, including backoff sleeps between
    /// retries. Every later operation is a no-op.
    pub fn destroy(&self) {
        self.destroyed.send_replace(true);
    }

    pub fn is_destroyed(&self) -> bool {
        *self.destroyed.borrow()
    }

    fn handle_error(&self, error: &ApiError) {
        self.state.set_error(Some(error));
        self.apply_validation_errors(error);
        self.notify(Notification::error(&error.message));
    }

    /// First server message per known field becomes that control's error.
    fn apply_validation_errors(&self, error: &ApiError) {
        let Some(errors) = &error.errors else {
            return;
        };
        let mut controls = self.controls();
        for (key, messages) in errors.iter() {
            let (Some(field), Some(first)) = (FormField::from_key(key), messages.first()) else {
                continue;
            };
            let control = controls.get_mut(field);
            control.api_error = Some(first.clone());
            control.touched = true;
        }
    }

    fn notify(&self, notification: Notification) {
        self.notification.set(Some(notification));
    }

    fn controls(&self) -> MutexGuard<'_, Controls> {
        self.controls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn until_destroyed<F: Future>(&self, work: F) -> Option<F::Output> {
        let mut destroyed = self.destroyed.subscribe();
        tokio::select! {
            output = work => Some(output),
            _ = async { let _ = destroyed.wait_for(|d| *d).await; } => None,
        }
    }
}
