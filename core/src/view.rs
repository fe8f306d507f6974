//! View-model for the greetings page.
//!
//! # Design
//! `GreetingsView` is the single owner of the page's ephemeral state: the
//! greeting list, the create-form draft, at most one edit session, the
//! per-operation in-flight flags, and the last error line. State lives
//! behind a `parking_lot::Mutex`; operations take `&self`, lock only around
//! mutation, and never hold the lock across an await. Several operations may
//! be in flight at once (e.g. a refresh and a create), but each applies its
//! result in one short lock scope, and a superseded refresh re-checks its
//! cancellation token before touching anything — stale responses can never
//! overwrite newer state.
//!
//! Delete confirmation is an injected capability (`ConfirmDelete`) rather
//! than a platform dialog, so the logic stays testable without a UI.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::GreetingStore;
use crate::error::ApiError;
use crate::types::{CreateGreeting, Greeting, UpdateGreeting};

/// User-confirmation capability consulted before a delete.
pub trait ConfirmDelete: Send + Sync {
    fn confirm_delete(&self, greeting: &Greeting) -> bool;
}

#[derive(Debug, Clone)]
struct EditSession {
    id: String,
    draft: CreateGreeting,
}

#[derive(Debug, Default)]
struct ViewState {
    items: Vec<Greeting>,
    form_draft: CreateGreeting,
    editing: Option<EditSession>,
    loading: bool,
    creating: bool,
    saving: bool,
    last_error: Option<String>,
    refresh_cancel: Option<CancellationToken>,
}

/// Cloned copy of the public view state, consumed by a presentation layer
/// on every re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub items: Vec<Greeting>,
    pub form_draft: CreateGreeting,
    pub editing_id: Option<String>,
    pub edit_draft: Option<CreateGreeting>,
    pub loading: bool,
    pub creating: bool,
    pub saving: bool,
    pub last_error: Option<String>,
}

/// Interaction logic for the greetings page.
pub struct GreetingsView<S, C> {
    store: S,
    confirm: C,
    state: Mutex<ViewState>,
}

impl<S: GreetingStore, C: ConfirmDelete> GreetingsView<S, C> {
    pub fn new(store: S, confirm: C) -> Self {
        Self {
            store,
            confirm,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let st = self.state.lock();
        ViewSnapshot {
            items: st.items.clone(),
            form_draft: st.form_draft.clone(),
            editing_id: st.editing.as_ref().map(|s| s.id.clone()),
            edit_draft: st.editing.as_ref().map(|s| s.draft.clone()),
            loading: st.loading,
            creating: st.creating,
            saving: st.saving,
            last_error: st.last_error.clone(),
        }
    }

    /// Re-fetches the whole list, replacing `items` with the server order.
    /// A newer `refresh` cancels any still-pending one; last writer (by
    /// issuance order) wins.
    pub async fn refresh(&self) {
        let cancel = CancellationToken::new();
        {
            let mut st = self.state.lock();
            if let Some(prev) = st.refresh_cancel.replace(cancel.clone()) {
                prev.cancel();
            }
            st.loading = true;
            st.last_error = None;
        }

        let result = self.store.list(&cancel).await;

        let mut st = self.state.lock();
        if cancel.is_cancelled() {
            // Superseded; the newer refresh owns the flags and the list now.
            return;
        }
        st.refresh_cancel = None;
        match result {
            Ok(items) => st.items = items,
            Err(ApiError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                st.last_error = Some(render_error(&e));
            }
        }
        st.loading = false;
    }

    /// Creates a greeting from `draft`; silently refuses invalid drafts.
    /// On success the new greeting is prepended and the form draft reset.
    pub async fn create(&self, draft: CreateGreeting) {
        if !draft.is_valid() {
            return;
        }
        {
            let mut st = self.state.lock();
            st.creating = true;
            st.last_error = None;
        }

        let result = self.store.create(&draft, &CancellationToken::new()).await;

        let mut st = self.state.lock();
        match result {
            Ok(created) => {
                st.items.insert(0, created);
                st.form_draft = CreateGreeting::default();
            }
            Err(ApiError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                st.last_error = Some(render_error(&e));
            }
        }
        st.creating = false;
    }

    /// Opens an edit session for `id`, seeding the draft from the item's
    /// current fields. No-op when `id` is not in the list. No network call.
    pub fn start_edit(&self, id: &str) {
        let mut st = self.state.lock();
        let session = st.items.iter().find(|g| g.id == id).map(|item| EditSession {
            id: item.id.clone(),
            draft: CreateGreeting {
                sender: item.sender.clone(),
                recipient: item.recipient.clone(),
                message: item.message.clone(),
            },
        });
        if session.is_some() {
            st.editing = session;
        }
    }

    /// Discards the edit session, if any. Idempotent; no network call.
    pub fn cancel_edit(&self) {
        self.state.lock().editing = None;
    }

    /// Presentation writes the create form back as the user types.
    pub fn set_form_draft(&self, draft: CreateGreeting) {
        self.state.lock().form_draft = draft;
    }

    /// Presentation writes the edit draft back as the user types. No-op
    /// outside an active edit session.
    pub fn set_edit_draft(&self, draft: CreateGreeting) {
        let mut st = self.state.lock();
        if let Some(session) = st.editing.as_mut() {
            session.draft = draft;
        }
    }

    /// Saves the active edit session. Rejected without a network call unless
    /// the session matches `id`. On success the matching item is replaced in
    /// place and the session ends; on failure the session stays active so
    /// the user can retry or cancel.
    pub async fn save_edit(&self, id: &str) {
        let draft = {
            let mut st = self.state.lock();
            let draft = match st.editing.as_ref() {
                Some(session) if session.id == id => session.draft.clone(),
                _ => return,
            };
            st.saving = true;
            st.last_error = None;
            draft
        };

        let input = UpdateGreeting {
            sender: Some(draft.sender),
            recipient: Some(draft.recipient),
            message: Some(draft.message),
        };
        let result = self
            .store
            .update(id, &input, &CancellationToken::new())
            .await;

        let mut st = self.state.lock();
        match result {
            Ok(updated) => {
                if let Some(slot) = st.items.iter_mut().find(|g| g.id == id) {
                    *slot = updated;
                }
                st.editing = None;
            }
            Err(ApiError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                st.last_error = Some(render_error(&e));
            }
        }
        st.saving = false;
    }

    /// Deletes `id` after the injected capability confirms. No-op when the
    /// id is absent or the confirmation is declined. On failure `items` is
    /// left untouched.
    pub async fn remove(&self, id: &str) {
        let target = {
            let st = self.state.lock();
            st.items.iter().find(|g| g.id == id).cloned()
        };
        let Some(target) = target else { return };
        if !self.confirm.confirm_delete(&target) {
            return;
        }
        self.state.lock().last_error = None;

        let result = self.store.delete(id, &CancellationToken::new()).await;

        let mut st = self.state.lock();
        match result {
            Ok(_) => st.items.retain(|g| g.id != id),
            Err(ApiError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                st.last_error = Some(render_error(&e));
            }
        }
    }
}

/// Render a failure as the single error line shown to the user: the HTTP
/// message, with the diagnostic payload appended when one exists.
pub fn render_error(err: &ApiError) -> String {
    match err {
        ApiError::Http {
            message,
            payload: Some(payload),
            ..
        } => format!("{message} | detail: {payload}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_error_with_payload_appends_detail() {
        let err = ApiError::Http {
            status: 404,
            message: "API request failed: 404 Not Found".to_string(),
            payload: Some(json!({"detail": "not found"})),
        };
        let line = render_error(&err);
        assert!(line.contains("404"));
        assert!(line.contains(r#"detail: {"detail":"not found"}"#));
    }

    #[test]
    fn http_error_without_payload_is_just_the_message() {
        let err = ApiError::Http {
            status: 500,
            message: "API request failed: 500 Internal Server Error".to_string(),
            payload: None,
        };
        assert_eq!(render_error(&err), "API request failed: 500 Internal Server Error");
    }

    #[test]
    fn other_errors_use_their_display_text() {
        let err = ApiError::UnexpectedBody("empty response body".to_string());
        assert_eq!(
            render_error(&err),
            "unexpected response body: empty response body"
        );
    }
}
