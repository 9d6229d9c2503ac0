//! Sage Control - terminal front end for the Sage learning assistant

pub mod commands;
pub mod errors;
pub mod feedback;
pub mod output;
pub mod spinner;
