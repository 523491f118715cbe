// Purpose: synthesizer orchestration and the two ways of sharing it
// between an issuing context and a rendering context

pub mod gate;
pub mod message;
pub mod synthesizer;
