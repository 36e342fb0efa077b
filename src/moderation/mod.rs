// Moderation: sentence-level foul language detection for blog posts.
//
// The FoulLanguageClassifier trait defines the per-sentence interface.
// HttpClassifier implements it by calling the classification service over
// HTTP. The orchestrator segments paragraphs into sentences and reduces the
// per-sentence results into a single verdict for the post.

pub mod client;
pub mod orchestrator;
pub mod segment;
pub mod traits;
