use std::sync::Arc;
use std::time::Duration;

use parley_core::flow::RequestOutcome;
use parley_core::{ApiClient, ConfirmationFlow, HistoryBackend, HostSignal};

use crate::i18n::{Catalog, Translator};
use crate::ui::toast::{Toast, ToastQueue};
use crate::ui::views::new_chat_dialog::{DialogAction, NewChatDialogView};

/// State that lives exactly as long as one chat session.
///
/// A session reset drops this wholesale and mounts a fresh one, which is how
/// the flow gets back to `Closed` after history was cleared.
pub struct Session<B: HistoryBackend> {
    pub number: u64,
    flow: ConfirmationFlow<B>,
    toasts: ToastQueue,
}

impl<B: HistoryBackend> Session<B> {
    fn mount(number: u64, backend: Arc<B>, request_timeout: Duration) -> Self {
        tracing::debug!(session = number, "mounting session");
        Self {
            number,
            flow: ConfirmationFlow::new(backend, request_timeout),
            toasts: ToastQueue::default(),
        }
    }
}

pub struct App<B: HistoryBackend = ApiClient> {
    pub running: bool,
    /// First Ctrl+C arms this, the second one quits
    pub pending_quit: bool,
    /// Shown in the header, e.g. the backend URL
    pub backend_label: String,

    backend: Arc<B>,
    request_timeout: Duration,
    catalog: Catalog,
    session: Session<B>,
}

impl<B: HistoryBackend> App<B> {
    pub fn new(
        backend: Arc<B>,
        backend_label: impl Into<String>,
        request_timeout: Duration,
        catalog: Catalog,
    ) -> Self {
        let session = Session::mount(1, backend.clone(), request_timeout);
        Self {
            running: true,
            pending_quit: false,
            backend_label: backend_label.into(),
            backend,
            request_timeout,
            catalog,
            session,
        }
    }

    pub fn t(&self, path: &str) -> String {
        self.catalog.translate(path)
    }

    pub fn session_number(&self) -> u64 {
        self.session.number
    }

    pub fn flow(&self) -> &ConfirmationFlow<B> {
        &self.session.flow
    }

    pub fn flow_mut(&mut self) -> &mut ConfirmationFlow<B> {
        &mut self.session.flow
    }

    /// Presenter input for the current frame, `None` while closed
    pub fn dialog_view(&self) -> Option<NewChatDialogView> {
        NewChatDialogView::from_snapshot(&self.session.flow.snapshot(), &self.catalog)
    }

    pub fn open_new_chat_dialog(&mut self) {
        self.session.flow.open();
    }

    pub fn handle_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::CloseRequested => self.session.flow.close(),
            DialogAction::ConfirmRequested => self.session.flow.confirm(),
        }
    }

    /// Feed a finished clear-history request back into the flow
    pub fn resolve_request(&mut self, outcome: RequestOutcome) {
        match self.session.flow.resolve(outcome) {
            Some(HostSignal::SessionReset) => self.reset_session(),
            None => {}
        }
    }

    /// Throw away the whole session and start a new one
    pub fn reset_session(&mut self) {
        let next = self.session.number + 1;
        tracing::info!(session = next, "session reset");
        self.session = Session::mount(next, self.backend.clone(), self.request_timeout);
        let message = self.t("navigation.newChat.started");
        self.notify(Toast::success(message));
    }

    pub fn notify(&mut self, toast: Toast) {
        self.session.toasts.push(toast);
    }

    /// First Ctrl+C: warn instead of quitting
    pub fn arm_quit(&mut self) {
        self.pending_quit = true;
        let message = self.t("app.quitPending");
        self.notify(Toast::warning(message));
    }

    pub fn dismiss_toast(&mut self) {
        self.session.toasts.dismiss();
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.session.toasts.visible()
    }

    pub fn tick(&mut self) {
        self.session.toasts.tick();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
