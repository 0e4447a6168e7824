//! Digilogic – interactive utilities for learning digital logic design.
//!
//! Every operation is a pure function over strings, booleans and integers:
//! * [`radix`] – Number-system conversion between bases 2, 8, 10 and 16.
//! * [`bits`] – The validated [`bits::BitString`] shared by the binary tools.
//! * [`codes`] – Gray code, BCD and Excess-3 derived from a binary string.
//! * [`complement`] – One's and two's complement.
//! * [`simplify`] – A single-pass Boolean-expression rewriter built from an
//!   ordered list of algebraic identities.
//! * [`gate`] – Truth-table evaluation of the seven basic gates.
//! * [`flipflop`] – Next-state rules for JK, D and T flip-flops.
//!
//! Around the pure core sit the pieces that turn it into a service:
//! * [`workbench`] – Session state (the simulated flip-flop) and settings.
//! * [`engine`] – A semicolon separated command language over all operations.
//! * [`server`] – An HTTP JSON API exposing the same operations.
//! * [`settings`] – Configuration from `digilogic.json` and `DIGILOGIC_*` variables.
//!
//! ## Quick Start
//! ```
//! use digilogic::{engine::Engine, workbench::Workbench};
//! let workbench = Workbench::default();
//! let engine = Engine::new(&workbench);
//! let result = engine.execute_collect("convert 42 from 10;").unwrap();
//! assert_eq!(result.value("hexadecimal"), Some("2A"));
//! ```
//!
//! ## Scope
//! The simplifier is deliberately textual: it recognises single-letter
//! operands only and never re-runs a rule. It demonstrates the identities, it
//! does not minimise expressions.

pub mod bits;
pub mod codes;
pub mod complement;
pub mod engine;
pub mod error;
pub mod flipflop;
pub mod gate;
pub mod radix;
pub mod server;
pub mod settings;
pub mod simplify;
pub mod workbench;

pub use error::{DigilogicError, Result};
