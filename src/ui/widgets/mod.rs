pub mod player;
pub mod popups;
pub mod queue;
pub mod search;
pub mod status;
