//! Pomodoro session controller for the terminal: a work/break state machine
//! driven by a one-second clock, with a durable task list.

pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod event;
pub mod notify;
pub mod session;
pub mod store;
