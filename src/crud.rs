// src/crud.rs
//
// List-and-form page shared by every management screen:
// guard -> load list -> open form -> submit -> reload from the server.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::guard::{self, Navigation};
use crate::render;
use crate::session::SessionStore;

/// One entity's endpoints plus how its rows and forms look.
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Record: Clone + Send + Sync;
    type Draft: Clone + Send + Sync;
    type Payload: Send + Sync;

    fn title(&self) -> &'static str;
    fn record_id(&self, record: &Self::Record) -> i32;

    async fn list(&self) -> Result<Vec<Self::Record>, ApiError>;
    async fn create(&self, payload: &Self::Payload) -> Result<(), ApiError>;

    async fn update(&self, _id: i32, _payload: &Self::Payload) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("editing"))
    }

    async fn delete(&self, _id: i32) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("deleting"))
    }

    /// Form contents when creating a new record.
    fn blank_draft(&self) -> Self::Draft;
    /// Form contents when editing `record`.
    fn draft_from(&self, record: &Self::Record) -> Self::Draft;
    /// Client-side checks and conversions. An `Err` blocks the request.
    fn prepare(&self, draft: &Self::Draft) -> Result<Self::Payload, String>;

    fn columns(&self) -> &'static [&'static str];
    fn row(&self, record: &Self::Record) -> Vec<String>;

    fn empty_message(&self) -> &'static str {
        "Chưa có dữ liệu."
    }

    fn delete_prompt(&self) -> &'static str {
        "Are you sure you want to delete this record?"
    }

    /// Extra lines printed under the table (nested values and the like).
    fn details(&self, _records: &[Self::Record]) -> String {
        String::new()
    }
}

/// Asks the operator before a destructive request.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Ready,
    Submitting,
}

#[derive(Debug, Clone)]
pub struct FormState<D> {
    /// Id of the record being edited, `None` when creating.
    pub editing: Option<i32>,
    pub draft: D,
    pub error: Option<String>,
}

pub struct CrudPage<R: CrudResource> {
    resource: R,
    session: Arc<dyn SessionStore>,
    status: PageStatus,
    authorized: bool,
    items: Vec<R::Record>,
    notice: Option<String>,
    form: Option<FormState<R::Draft>>,
}

impl<R: CrudResource> CrudPage<R> {
    pub fn new(resource: R, session: Arc<dyn SessionStore>) -> Self {
        Self {
            resource,
            session,
            status: PageStatus::Loading,
            authorized: false,
            items: Vec::new(),
            notice: None,
            form: None,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    pub fn find(&self, id: i32) -> Option<&R::Record> {
        self.items.iter().find(|r| self.resource.record_id(r) == id)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn form(&self) -> Option<&FormState<R::Draft>> {
        self.form.as_ref()
    }

    /// Draft of the open form, for field edits.
    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.form.as_mut().map(|f| &mut f.draft)
    }

    /// Guard, then initial load. Nothing is fetched without a session.
    pub async fn enter(&mut self) -> Navigation {
        if let Err(route) = guard::require_session(self.session.as_ref()) {
            self.authorized = false;
            return Navigation::Redirect(route);
        }
        self.authorized = true;
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Navigation {
        self.status = PageStatus::Loading;
        let result = self.resource.list().await;
        self.status = PageStatus::Ready;
        match result {
            Ok(items) => {
                self.items = items;
                Navigation::Stay
            }
            Err(e) => {
                if e.is_unauthorized() {
                    return self.expire();
                }
                log::warn!("{} list failed: {e}", self.resource.title());
                self.items.clear();
                self.notice = Some(e.user_message());
                Navigation::Stay
            }
        }
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            editing: None,
            draft: self.resource.blank_draft(),
            error: None,
        });
    }

    /// Opens the form on a listed record. Returns false when the id is not
    /// in the current list.
    pub fn open_edit(&mut self, id: i32) -> bool {
        let Some(record) = self.find(id) else {
            return false;
        };
        let draft = self.resource.draft_from(record);
        self.form = Some(FormState {
            editing: Some(id),
            draft,
            error: None,
        });
        true
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Sends the open form. On success the form closes and the list is
    /// reloaded; on failure the form stays open with the error attached.
    pub async fn submit(&mut self) -> Navigation {
        let Some(form) = self.form.as_ref() else {
            return Navigation::Stay;
        };
        let editing = form.editing;

        let payload = match self.resource.prepare(&form.draft) {
            Ok(p) => p,
            Err(message) => {
                self.set_form_error(message);
                return Navigation::Stay;
            }
        };

        self.status = PageStatus::Submitting;
        let result = match editing {
            Some(id) => self.resource.update(id, &payload).await,
            None => self.resource.create(&payload).await,
        };
        self.status = PageStatus::Ready;

        match result {
            Ok(()) => {
                self.form = None;
                self.notice = None;
                self.refresh().await
            }
            Err(e) if e.is_unauthorized() => self.expire(),
            Err(e) => {
                self.set_form_error(e.user_message());
                Navigation::Stay
            }
        }
    }

    /// Deletes after confirmation. A failed delete leaves the list as it was.
    pub async fn delete(&mut self, id: i32, confirm: &dyn Confirm) -> Navigation {
        if !confirm.confirm(self.resource.delete_prompt()) {
            return Navigation::Stay;
        }
        self.status = PageStatus::Submitting;
        let result = self.resource.delete(id).await;
        self.status = PageStatus::Ready;
        self.settle(result).await
    }

    /// Runs another mutation (status change, link, nested create) with the
    /// same reload and error rules as `submit`.
    pub async fn run<F>(&mut self, op: F) -> Navigation
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        self.status = PageStatus::Submitting;
        let result = op.await;
        self.status = PageStatus::Ready;
        self.settle(result).await
    }

    async fn settle(&mut self, result: Result<(), ApiError>) -> Navigation {
        match result {
            Ok(()) => {
                self.notice = None;
                self.refresh().await
            }
            Err(e) => self.report(e),
        }
    }

    /// Surfaces a failed action without touching the list. A rejected
    /// session ends the page instead.
    pub fn report(&mut self, error: ApiError) -> Navigation {
        if error.is_unauthorized() {
            return self.expire();
        }
        log::warn!("{} action failed: {error}", self.resource.title());
        self.notice = Some(error.user_message());
        Navigation::Stay
    }

    fn set_form_error(&mut self, message: String) {
        if let Some(form) = self.form.as_mut() {
            form.error = Some(message);
        }
    }

    fn expire(&mut self) -> Navigation {
        self.authorized = false;
        guard::expire_session(self.session.as_ref())
    }

    /// Text view of the page. Empty until the guard has let the page in.
    pub fn render(&self) -> String {
        if !self.authorized {
            return String::new();
        }
        let mut out = format!("{}\n", self.resource.title());
        out.push_str(&render::notice(self.notice.as_deref()));
        if self.status == PageStatus::Loading {
            out.push_str("Đang tải...\n");
            return out;
        }
        let rows: Vec<Vec<String>> = self.items.iter().map(|r| self.resource.row(r)).collect();
        out.push_str(&render::table(
            self.resource.columns(),
            &rows,
            self.resource.empty_message(),
        ));
        out.push_str(&self.resource.details(&self.items));
        if let Some(error) = self.form.as_ref().and_then(|f| f.error.as_deref()) {
            out.push_str(&render::notice(Some(error)));
        }
        out
    }
}
