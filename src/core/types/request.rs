//! Outpaint request

use super::image::{ImagePayload, Template};
use crate::core::prompts;
use crate::utils::mask_api_key;
use std::fmt;

/// Inputs of one outpaint call; lives only for that call
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub template: &'a Template,
    /// User prompt, already trimmed
    pub prompt: &'a str,
    pub credential: &'a str,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(template: &'a Template, prompt: &'a str, credential: &'a str) -> Self {
        Self {
            template,
            prompt,
            credential,
        }
    }

    pub fn template_payload(&self) -> &'a ImagePayload {
        self.template.payload()
    }

    /// Full text sent to the model: fixed instructions plus the user prompt
    pub fn model_prompt(&self) -> String {
        prompts::outpaint_prompt(self.prompt)
    }
}

impl fmt::Debug for GenerationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("template_bytes", &self.template.bytes().len())
            .field("prompt", &self.prompt)
            .field("credential", &mask_api_key(self.credential))
            .finish()
    }
}
