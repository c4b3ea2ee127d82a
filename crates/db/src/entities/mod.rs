pub mod game;
pub mod scorekeeping_data;
pub mod scoring_event;
