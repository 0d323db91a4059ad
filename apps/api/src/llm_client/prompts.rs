// Shared prompt fragments. Each feature that calls the model keeps its own prompts
// alongside it and reuses these.

/// Keeps generated text tied to the data supplied in the prompt.
pub const DATA_ONLY_INSTRUCTION: &str = "\
    Use ONLY the data provided below. \
    Do NOT assume, infer, or add information that is not present in the data. \
    If a field is empty, say so rather than guessing.";
