//! # rf-reel-math: Deterministic slot math evaluation
//!
//! Turns per-reel random stops into a visible symbol grid and the grid into
//! payline and scatter wins. The same paytable and the same stops always
//! give the same grid and the same wins, so any spin can be replayed for
//! audit.
//!
//! ## Architecture
//!
//! ```text
//! Paytable (immutable, built once)
//!     │
//!     ├── ReelGroup (base / free games)  ──┐
//!     ├── PaylineGroup                     │   StopProvider
//!     ├── PayComboGroup (line pays)        │        │
//!     └── PayComboGroup (scatter pays)     │        v
//!                                          └──> ReelWindow (grid + position index)
//!                                                   │
//!                                                   v
//!                                      Evaluator → WinRecord / ScatterWinRecord
//! ```
//!
//! Symbol equality is pluggable through [`SymbolComparer`]; the comparer
//! that keys a pay combo group is the one its matching uses, which is how
//! wild substitution is configured per paytable.

pub mod comparer;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod paycombo;
pub mod payline;
pub mod paytable;
pub mod phase;
pub mod rng;
pub mod simulation;
pub mod spin;
pub mod symbols;
pub mod window;

pub use comparer::*;
pub use config::*;
pub use error::*;
pub use evaluator::*;
pub use paycombo::*;
pub use payline::*;
pub use paytable::*;
pub use phase::*;
pub use rng::*;
pub use simulation::*;
pub use spin::*;
pub use symbols::*;
pub use window::*;
