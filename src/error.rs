/// Start-up failures. Each one disables a single effect; the page keeps
/// running without it.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("no window/document available")]
    NoWindow,
    #[error("missing #{0} element")]
    MissingElement(String),
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("shader compile failed:\n{0}")]
    ShaderCompile(String),
    #[error("pipeline link failed:\n{0}")]
    PipelineLink(String),
    #[error("{0} not loaded")]
    LibraryMissing(&'static str),
}
