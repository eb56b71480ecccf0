//! Generation session controller
//!
//! Owns the current source, template, prompt, displayed result and the
//! history list. Every action takes `&mut self`, so at most one compositing
//! or remote call is pending at a time. A failing action leaves prior state
//! in place, records a user-facing message and clears the pending status.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::{MissingField, SessionError};
use super::phase::{InitialImagePhase, Phase};
use super::progress::{ProgressSchedule, StatusSender, with_progress};
use crate::core::compositor::Compositor;
use crate::core::prompts;
use crate::core::traits::ImageGenerator;
use crate::core::types::{
    GenerationRequest, GenerationResult, HistoryEntry, SourceImage, Template,
};
use crate::storage::HistoryRepository;

/// Read-only view of the session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub initial_phase: InitialImagePhase,
    pub prompt: String,
    pub has_credential: bool,
    pub source_name: Option<String>,
    pub template: Option<Template>,
    pub result: Option<GenerationResult>,
    pub history_len: usize,
    pub last_error: Option<String>,
    pub status: Option<String>,
}

/// Progress schedules for the three remote operations
#[derive(Debug, Clone)]
pub struct ProgressSchedules {
    pub source: ProgressSchedule,
    pub outpaint: ProgressSchedule,
    pub enhance: ProgressSchedule,
}

impl Default for ProgressSchedules {
    fn default() -> Self {
        Self {
            source: ProgressSchedule::source(),
            outpaint: ProgressSchedule::outpaint(),
            enhance: ProgressSchedule::enhance(),
        }
    }
}

/// Session state machine over an image generator and a history repository
pub struct SessionController<G, R> {
    generator: G,
    repository: R,
    compositor: Compositor,
    schedules: ProgressSchedules,

    credential: Option<String>,
    prompt: String,
    source: Option<SourceImage>,
    template: Option<Template>,
    result: Option<GenerationResult>,
    /// History entry the displayed result belongs to
    result_origin: Option<i64>,
    history: Vec<HistoryEntry>,

    phase: Phase,
    initial_phase: InitialImagePhase,
    last_error: Option<String>,
    status: StatusSender,
}

impl<G, R> SessionController<G, R>
where
    G: ImageGenerator,
    R: HistoryRepository,
{
    /// Create a controller and load the persisted history
    pub async fn open(generator: G, repository: R) -> Self {
        let history = repository.load().await;
        info!(entries = history.len(), "Session opened");

        let (status, _) = watch::channel(None);
        Self {
            generator,
            repository,
            compositor: Compositor::default(),
            schedules: ProgressSchedules::default(),
            credential: None,
            prompt: String::new(),
            source: None,
            template: None,
            result: None,
            result_origin: None,
            history,
            phase: Phase::Idle,
            initial_phase: InitialImagePhase::Idle,
            last_error: None,
            status,
        }
    }

    pub fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn with_progress_schedules(mut self, schedules: ProgressSchedules) -> Self {
        self.schedules = schedules;
        self
    }

    // ====== Inputs ======

    /// Set the API credential; blank values clear it
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    // ====== Source acquisition ======

    /// Composite an uploaded picture into the template
    pub async fn upload_source(&mut self, source: SourceImage) -> Result<(), SessionError> {
        self.begin_action();
        self.load_source(source).await
    }

    /// Synthesize the source picture from `description`, then load it like an upload
    pub async fn generate_source(&mut self, description: &str) -> Result<(), SessionError> {
        self.begin_action();

        let description = description.trim();
        if description.is_empty() {
            return self.fail(SessionError::Precondition(MissingField::Description));
        }
        let Some(credential) = self.credential.clone() else {
            return self.fail(SessionError::MissingCredential);
        };

        info!("Generating source image from description");
        self.initial_phase = InitialImagePhase::Generating;
        let prompt = prompts::source_prompt(description);
        let outcome = with_progress(
            self.generator.text_to_image(&prompt, &credential),
            &self.schedules.source,
            &self.status,
        )
        .await;
        self.initial_phase = InitialImagePhase::Idle;

        let payload = match outcome {
            Ok(payload) => payload,
            Err(e) => return self.fail(SessionError::Generation(e)),
        };

        let name = format!(
            "generated-{}.{}",
            Utc::now().timestamp_millis(),
            payload.extension()
        );
        let mime_type = payload.mime_type.clone();
        let source = match SourceImage::from_bytes(name, payload.bytes, Some(mime_type.as_str())) {
            Ok(source) => source,
            Err(e) => return self.fail(SessionError::ImageProcessing(e)),
        };

        self.load_source(source).await
    }

    async fn load_source(&mut self, source: SourceImage) -> Result<(), SessionError> {
        let prior = self.phase;
        self.phase = Phase::SourceLoading;
        debug!(
            name = %source.name,
            width = source.width,
            height = source.height,
            "Compositing source"
        );

        match self.compositor.compose_async(source.clone()).await {
            Ok(template) => {
                info!(name = %source.name, "Template ready");
                self.source = Some(source);
                self.template = Some(template);
                self.result = None;
                self.result_origin = None;
                self.phase = Phase::SourceReady;
                self.clear_status();
                Ok(())
            }
            Err(e) => {
                self.phase = prior;
                self.fail(SessionError::ImageProcessing(e))
            }
        }
    }

    // ====== Generation ======

    /// Outpaint the current template with the current prompt.
    ///
    /// On success the result is displayed and a new history entry is
    /// prepended and persisted. A storage failure is reported after the
    /// in-memory state has been updated.
    pub async fn generate_panorama(&mut self) -> Result<GenerationResult, SessionError> {
        self.begin_action();

        let Some(template) = self.template.clone() else {
            return self.fail(SessionError::Precondition(MissingField::Template));
        };
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return self.fail(SessionError::Precondition(MissingField::Prompt));
        }
        let Some(credential) = self.credential.clone() else {
            return self.fail(SessionError::Precondition(MissingField::Credential));
        };
        // Only a newest id of i64::MAX leaves no room, and the clock cannot free it
        if HistoryEntry::next_id(self.history.first()).is_none() {
            return self.fail(SessionError::HistoryIdsExhausted);
        }

        let prior = self.phase;
        self.phase = Phase::Outpainting;
        info!(prompt_len = prompt.len(), "Starting outpaint");

        let request = GenerationRequest::new(&template, &prompt, &credential);
        debug!(?request, "Outpaint request");
        let outcome = with_progress(
            self.generator.outpaint(
                request.template_payload(),
                &request.model_prompt(),
                request.credential,
            ),
            &self.schedules.outpaint,
            &self.status,
        )
        .await;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                self.phase = prior;
                return self.fail(SessionError::Generation(e));
            }
        };

        let Some(id) = HistoryEntry::next_id(self.history.first()) else {
            self.phase = prior;
            return self.fail(SessionError::HistoryIdsExhausted);
        };
        self.history
            .insert(0, HistoryEntry::new(id, prompt, &template, &result));
        self.result = Some(result.clone());
        self.result_origin = Some(id);
        self.phase = Phase::ResultReady;
        self.clear_status();
        info!(entry_id = id, entries = self.history.len(), "Outpaint complete");

        self.persist().await?;
        Ok(result)
    }

    /// Enhance the displayed result.
    ///
    /// When the displayed result belongs to the newest history entry, that
    /// entry's result is overwritten and persisted; no other entry changes.
    pub async fn enhance_result(&mut self) -> Result<GenerationResult, SessionError> {
        self.begin_action();

        let Some(current) = self.result.clone() else {
            return self.fail(SessionError::Precondition(MissingField::Result));
        };
        let Some(credential) = self.credential.clone() else {
            return self.fail(SessionError::Precondition(MissingField::Credential));
        };
        let image = match current.image() {
            Ok(image) => image,
            Err(e) => return self.fail(SessionError::MalformedResult(e)),
        };

        let prior = self.phase;
        self.phase = Phase::Enhancing;
        info!(mime_type = %image.mime_type, bytes = image.len(), "Starting enhance");

        let outcome = with_progress(
            self.generator.enhance(&image, &credential),
            &self.schedules.enhance,
            &self.status,
        )
        .await;

        let enhanced = match outcome {
            Ok(enhanced) => enhanced,
            Err(e) => {
                self.phase = prior;
                return self.fail(SessionError::Generation(e));
            }
        };

        self.result = Some(enhanced.clone());
        self.phase = Phase::ResultReady;
        self.clear_status();

        let newest = self.history.first_mut();
        let overwritten = match (self.result_origin, newest) {
            (Some(origin), Some(entry)) if entry.id == origin => {
                entry.result = enhanced.reference.clone();
                true
            }
            _ => false,
        };
        info!(history_updated = overwritten, "Enhance complete");

        if overwritten {
            self.persist().await?;
        }
        Ok(enhanced)
    }

    // ====== History ======

    /// Restore the entry with `id` as the current prompt, template and result
    pub fn reuse_entry(&mut self, id: i64) -> Result<(), SessionError> {
        let entry = self.history.iter().find(|entry| entry.id == id).cloned();
        match entry {
            Some(entry) => {
                self.reuse(&entry);
                Ok(())
            }
            None => self.fail(SessionError::EntryNotFound(id)),
        }
    }

    /// Restore `entry` without any network call
    pub fn reuse(&mut self, entry: &HistoryEntry) {
        self.last_error = None;
        self.clear_status();

        self.prompt = entry.prompt.clone();
        self.template = Some(entry.template());
        self.result = Some(entry.result());
        self.result_origin = Some(entry.id);
        self.source = None;
        self.phase = Phase::ResultReady;
        debug!(entry_id = entry.id, "Reused history entry");
    }

    /// Remove one entry and persist
    pub async fn delete_entry(&mut self, id: i64) -> Result<(), SessionError> {
        self.begin_action();

        let Some(index) = self.history.iter().position(|entry| entry.id == id) else {
            return self.fail(SessionError::EntryNotFound(id));
        };
        self.history.remove(index);
        if self.result_origin == Some(id) {
            self.result_origin = None;
        }
        info!(entry_id = id, entries = self.history.len(), "Deleted history entry");

        self.persist().await
    }

    /// Remove all entries once `confirm` agrees. Returns whether history was cleared.
    pub async fn clear_history<F>(&mut self, confirm: F) -> Result<bool, SessionError>
    where
        F: FnOnce() -> bool,
    {
        self.begin_action();

        if !confirm() {
            debug!("Clear history declined");
            return Ok(false);
        }

        self.history.clear();
        self.result_origin = None;
        info!("Cleared history");

        self.persist().await?;
        Ok(true)
    }

    // ====== Queries ======

    /// Whether an outpaint could start now
    pub fn can_generate(&self) -> bool {
        self.phase.accepts_generate()
            && self.template.is_some()
            && !self.prompt.trim().is_empty()
            && self.credential.is_some()
    }

    /// Whether an enhance could start now
    pub fn can_enhance(&self) -> bool {
        self.phase == Phase::ResultReady && self.result.is_some() && self.credential.is_some()
    }

    /// Subscribe to pending-status messages
    pub fn subscribe_status(&self) -> watch::Receiver<Option<String>> {
        self.status.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            initial_phase: self.initial_phase,
            prompt: self.prompt.clone(),
            has_credential: self.credential.is_some(),
            source_name: self.source.as_ref().map(|s| s.name.clone()),
            template: self.template.clone(),
            result: self.result.clone(),
            history_len: self.history.len(),
            last_error: self.last_error.clone(),
            status: self.status(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn initial_phase(&self) -> InitialImagePhase {
        self.initial_phase
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current pending-status message
    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ====== Internals ======

    fn begin_action(&mut self) {
        self.last_error = None;

        // A dropped in-flight future leaves a busy phase behind
        if self.phase.is_busy() {
            warn!(phase = %self.phase, "Recovering from an abandoned action");
            self.phase = self.settled_phase();
        }
        if self.initial_phase == InitialImagePhase::Generating {
            self.initial_phase = InitialImagePhase::Idle;
        }
    }

    fn settled_phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::ResultReady
        } else if self.template.is_some() {
            Phase::SourceReady
        } else {
            Phase::Idle
        }
    }

    fn clear_status(&self) {
        self.status.send_replace(None);
    }

    fn fail<T>(&mut self, error: SessionError) -> Result<T, SessionError> {
        match &error {
            SessionError::Generation(e) => {
                warn!(error = %error, status = e.http_status(), "Session action failed")
            }
            _ => warn!(error = %error, "Session action failed"),
        }
        self.last_error = Some(error.user_message());
        self.clear_status();
        Err(error)
    }

    async fn persist(&mut self) -> Result<(), SessionError> {
        match self.repository.save(&self.history).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(SessionError::Storage(e)),
        }
    }
}
