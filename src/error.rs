//! Error types for rich-text resolution.
//!
//! Malformed rich text never produces an error: unknown tags are unwrapped
//! and attribute-less embeds are dropped, so the only failure channel is a
//! caller-supplied resolver callback rejecting. Those failures propagate out
//! of [`resolve`](crate::resolver::RichTextResolver::resolve) untouched.

/// Boxed error returned by resolver callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error produced by a resolution call.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A caller-supplied resolver callback failed.
    #[error("{resolver} resolver failed")]
    Resolver {
        /// Which of the configured callbacks rejected.
        resolver: &'static str,
        #[source]
        source: BoxError,
    },
}
