//! `ratatui-datetime-picker-core` holds the rendering-free logic behind the
//! date-time picker widget.
//!
//! The crate is deliberately small and framework-agnostic: everything here
//! is plain state you can drive and test without a terminal.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all state transitions are synchronous, one per
//!   input event.
//! - Commit-on-close: a picker's draft value never leaks to the host form
//!   mid-edit; the host sees exactly one value per popover session.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-datetime-picker`.
//! Use this crate directly if you only need the reconciliation logic, e.g.
//! to back a picker in another UI toolkit.
//!
//! Useful entry points:
//! - [`draft::Draft`]: the draft-timestamp reconciliation engine.
//! - [`timetext::parse_time_text`]: `"HH:MM[:SS]"` parsing.
//! - [`form::FormField`]: the narrow host-form binding.
pub mod draft;
pub mod form;
pub mod input;
pub mod timetext;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;
