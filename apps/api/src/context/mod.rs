// Candidate context: deterministic prompt-context rendering and the
// per-user provider consumed by the chat and interview surfaces.

pub mod formatter;
pub mod handlers;
pub mod provider;
