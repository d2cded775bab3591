// Core Logic
pub mod actions;
