//! Storyboard producers.
//!
//! Generating a storyboard is opaque to the rest of the app: something turns a
//! topic into storyboard JSON. The producer runs on its own `std::thread` so a
//! slow HTTP call never blocks the event loop. Requests go in over a
//! `crossbeam_channel`; results come back as `AppEvent::Storyboard`.
pub mod types;
pub mod worker;
