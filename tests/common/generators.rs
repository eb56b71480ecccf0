//! Scripted image generator
//!
//! Replays queued outcomes in order and records every call, so session
//! tests can run without a network or a mock framework.

use async_trait::async_trait;
use outpaint_rs::{GenerationResult, ImageGenerator, ImagePayload, ProviderError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One recorded generator call
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorCall {
    TextToImage { prompt: String, credential: String },
    Outpaint { template: ImagePayload, prompt: String, credential: String },
    Enhance { image: ImagePayload, credential: String },
}

#[derive(Default)]
struct Script {
    sources: VecDeque<Result<ImagePayload, ProviderError>>,
    outpaints: VecDeque<Result<GenerationResult, ProviderError>>,
    enhances: VecDeque<Result<GenerationResult, ProviderError>>,
    calls: Vec<GeneratorCall>,
}

/// Cloneable handle; clones share the same script
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    script: Arc<Mutex<Script>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_source(&self, outcome: Result<ImagePayload, ProviderError>) -> &Self {
        self.script.lock().sources.push_back(outcome);
        self
    }

    pub fn push_outpaint(&self, outcome: Result<GenerationResult, ProviderError>) -> &Self {
        self.script.lock().outpaints.push_back(outcome);
        self
    }

    pub fn push_enhance(&self, outcome: Result<GenerationResult, ProviderError>) -> &Self {
        self.script.lock().enhances.push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.script.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().calls.len()
    }
}

fn unscripted(operation: &str) -> ProviderError {
    ProviderError::provider_unavailable("scripted", format!("no scripted {} outcome", operation))
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn text_to_image(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<ImagePayload, ProviderError> {
        let mut script = self.script.lock();
        script.calls.push(GeneratorCall::TextToImage {
            prompt: prompt.to_string(),
            credential: credential.to_string(),
        });
        script
            .sources
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("text-to-image")))
    }

    async fn outpaint(
        &self,
        template: &ImagePayload,
        prompt: &str,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        let mut script = self.script.lock();
        script.calls.push(GeneratorCall::Outpaint {
            template: template.clone(),
            prompt: prompt.to_string(),
            credential: credential.to_string(),
        });
        script
            .outpaints
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("outpaint")))
    }

    async fn enhance(
        &self,
        image: &ImagePayload,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        let mut script = self.script.lock();
        script.calls.push(GeneratorCall::Enhance {
            image: image.clone(),
            credential: credential.to_string(),
        });
        script
            .enhances
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("enhance")))
    }
}
