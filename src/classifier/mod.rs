// Classification service: the standalone HTTP endpoint the moderation
// client calls. It answers one question per request: does this fragment
// contain foul language?
//
// The model behind it is a word-list stub; no ML inference happens here.

pub mod model;
pub mod service;
