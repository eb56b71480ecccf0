//! Fixed model instructions

/// System text sent ahead of every user prompt for outpainting
pub const OUTPAINT_SYSTEM_PROMPT: &str = "The attached image is a 16:9 (1280x720) canvas with a picture \
centered on it and transparent empty areas around it. Fill the transparent areas by extending the \
picture outward so the result is one seamless, natural 16:9 image. Keep the original picture unchanged, \
match its perspective, lighting, colors and style, and do not leave any empty or transparent regions.";

/// Instruction for the enhance pass
pub const ENHANCE_PROMPT: &str = "Enhance this image: increase its sharpness, resolution and realism. \
Do not add, remove or change any content, subjects or composition.";

/// Prefix for text-to-image source generation
pub const SOURCE_PROMPT_PREFIX: &str = "Generate a high quality photograph of: ";

/// Combine the outpaint system text with the user's prompt
pub fn outpaint_prompt(user_prompt: &str) -> String {
    let user_prompt = user_prompt.trim();
    if user_prompt.is_empty() {
        return OUTPAINT_SYSTEM_PROMPT.to_string();
    }
    format!("{}\n\nScene description: {}", OUTPAINT_SYSTEM_PROMPT, user_prompt)
}

/// Prompt used to synthesize a source picture from a description
pub fn source_prompt(description: &str) -> String {
    format!("{}{}", SOURCE_PROMPT_PREFIX, description.trim())
}
