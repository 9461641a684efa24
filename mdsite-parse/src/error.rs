/// Errors that can occur while converting a document.
///
/// Every error is fatal for the document being converted: the pipeline is
/// deterministic, so retrying the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Unbalanced '{delimiter}' delimiter in: {text}")]
    MalformedMarkdown { delimiter: String, text: String },

    #[error("Invalid block: {message}")]
    InvalidBlock { message: String },

    #[error("Leaf node has no value")]
    MissingValue,

    #[error("Parent node has no tag")]
    MissingTag,

    #[error("Parent node has no children")]
    MissingChildren,

    #[error("Document has no top-level '# ' heading")]
    MissingTitle,
}

impl ConvertError {
    pub(crate) fn invalid_block(message: impl Into<String>) -> Self {
        ConvertError::InvalidBlock {
            message: message.into(),
        }
    }
}
