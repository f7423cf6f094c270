//! Colorizing engine.
//!
//! Turning a line of text into escape-coded output is a short pipeline:
//!
//! ```text
//! RuleSet (ordered)      text
//!        │                │
//!        └──── colorize (matcher.rs) ────┐
//!               - run each rule's regex   │
//!               - one span per match or   │
//!                 per capture group       │
//!               - paint spans, later wins │
//!                                         v
//!                            ColoredText (colored.rs)
//!                              text + IntervalMap<Style>
//!                                         │
//!                                 render / Display
//!                                         v
//!                                  escape-coded String
//! ```
//!
//! ## Responsibilities by module
//!
//! - `matcher.rs`: applies rules in order and queues their spans; also the
//!   lazy per-line [`ColorizeIter`].
//! - `colored.rs`: owns the text and its disjoint spans and renders them.
//!
//! Overlap resolution itself lives in [`crate::intervals`]; the engine only
//! relies on "insert overrides what was there".
//!
//! ## Debugging
//!
//! Per-rule match counts and skipped empty spans are logged at `trace` level.

#[path = "engine/colored.rs"]
mod colored;
#[path = "engine/matcher.rs"]
mod matcher;


pub use colored::ColoredText;
pub use matcher::{ColorizeIter, colorize};
