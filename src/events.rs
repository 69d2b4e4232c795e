//! DOM listener wiring. Every listener goes through a [`ListenerSet`] owned by
//! the mounted instance.
//!
//! [`ListenerSet`]: crate::dom::ListenerSet

pub mod controls;
pub mod keyboard;
pub mod pointer;
