//! Generic create/edit/delete controller.
//!
//! One [`EntityEditor`] owns at most one form session at a time:
//!
//! ```text
//! Closed ─open_create/open_edit─▶ Open ─submit─▶ Submitting ─ok──▶ Closed
//!                                  ▲                 │
//!                                  └──────error──────┘
//! ```
//!
//! Every open or close starts a new session generation. A response that
//! comes back for an older generation is dropped without touching state.

use palet_core::{Editable, FilteredView, FormValues, Listable, Locale, ViewContext};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Ack, ApiError, ResourceClient};

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open { mode: Mode, values: FormValues },
    Submitting { mode: Mode, values: FormValues },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
    Removed(Ack),
    /// The user declined; nothing was sent.
    Cancelled,
}

struct Session {
    generation: u64,
    state: FormState,
}

impl Session {
    fn restart(&mut self, state: FormState) -> u64 {
        self.generation += 1;
        self.state = state;
        self.generation
    }
}

pub struct EntityEditor<T: Editable> {
    client: ResourceClient<T>,
    locale: Locale,
    session: Mutex<Session>,
}

impl<T: Editable> EntityEditor<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            locale: Locale::default(),
            session: Mutex::new(Session {
                generation: 0,
                state: FormState::Closed,
            }),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub async fn state(&self) -> FormState {
        self.session.lock().await.state.clone()
    }

    /// Current field values, if a form is open or submitting.
    pub async fn values(&self) -> Option<FormValues> {
        match &self.session.lock().await.state {
            FormState::Closed => None,
            FormState::Open { values, .. } | FormState::Submitting { values, .. } => {
                Some(values.clone())
            }
        }
    }

    /// Open an empty form for a new record.
    pub async fn open_create(&self) {
        self.session.lock().await.restart(FormState::Open {
            mode: Mode::Create,
            values: FormValues::new(),
        });
    }

    /// Open a form for an existing record, always re-fetching it first.
    pub async fn open_edit(&self, id: i64) -> Result<FormValues, ApiError> {
        let generation = self.session.lock().await.restart(FormState::Closed);

        let record = self.client.get(id).await?;
        let values = record.to_form();

        let mut session = self.session.lock().await;
        if session.generation == generation {
            session.state = FormState::Open {
                mode: Mode::Edit(id),
                values: values.clone(),
            };
        } else {
            debug!(id, "edit form superseded before fetch completed");
        }
        Ok(values)
    }

    /// Set one raw field value. `key` must be in the entity's schema.
    pub async fn set_field(&self, key: &str, value: &str) -> Result<(), ApiError> {
        if !T::schema().iter().any(|f| f.key == key) {
            let known: Vec<_> = T::schema().iter().map(|f| f.key).collect();
            return Err(ApiError::UnknownField {
                field: key.to_string(),
                known: known.join(", "),
            });
        }
        match &mut self.session.lock().await.state {
            FormState::Open { values, .. } => {
                values.set(key, value);
                Ok(())
            }
            FormState::Submitting { .. } => Err(ApiError::Busy),
            FormState::Closed => Err(ApiError::NoSession),
        }
    }

    /// Discard the form. An in-flight submission will be ignored.
    pub async fn close(&self) {
        self.session.lock().await.restart(FormState::Closed);
    }

    /// Validate and send the open form: POST for a new record, PUT for an
    /// existing one. Single-flight: while a submission is pending, further
    /// calls fail with [`ApiError::Busy`] without touching the network.
    pub async fn submit(&self) -> Result<Ack, ApiError> {
        let (generation, mode, values, record) = {
            let mut session = self.session.lock().await;
            let (mode, values) = match &session.state {
                FormState::Open { mode, values } => (*mode, values.clone()),
                FormState::Submitting { .. } => return Err(ApiError::Busy),
                FormState::Closed => return Err(ApiError::NoSession),
            };
            let record = T::from_form(&values)?;
            session.state = FormState::Submitting {
                mode,
                values: values.clone(),
            };
            (session.generation, mode, values, record)
        };

        let result = match mode {
            Mode::Create => self.client.create(&record).await,
            Mode::Edit(id) => self.client.update(id, &record).await,
        };

        let mut session = self.session.lock().await;
        if session.generation != generation {
            debug!("{} form closed before submission completed", T::singular());
            return result;
        }
        match &result {
            Ok(_) => {
                info!(?mode, "{} saved", T::singular());
                session.state = FormState::Closed;
            }
            Err(_) => session.state = FormState::Open { mode, values },
        }
        result
    }

    /// Delete after the user confirms.
    pub async fn delete(&self, id: i64, confirm: &dyn Confirm) -> Result<Deleted, ApiError> {
        if !confirm.confirm(T::delete_prompt().text(self.locale)) {
            debug!(id, "{} delete cancelled", T::singular());
            return Ok(Deleted::Cancelled);
        }
        let ack = self.client.delete(id).await?;
        info!(id, "{} deleted", T::singular());
        Ok(Deleted::Removed(ack))
    }

    /// Re-fetch the listing and re-apply the view's filter and sort.
    pub async fn refresh(&self, view: &ViewContext) -> Result<Vec<T>, ApiError>
    where
        T: Listable,
    {
        let records = self.client.list().await?;
        let FilteredView { items } = view.apply(&records);
        Ok(items.into_iter().cloned().collect())
    }
}
