// Pipelines that connect the moderation orchestrator to the post store.
//
// submit: persist a new post and attach its verdict.
// retry:  re-evaluate every post whose verdict is still unknown.

pub mod retry;
pub mod submit;
