//! Compiler and executor for **reverie**'s per-pixel kernel DSL.
//!
//! A kernel is a restricted procedural description (arithmetic over
//! scalars and 2-vectors, one bounded loop with an optional early exit,
//! and a final color mapping) compiled into a form that is evaluated
//! independently for every pixel of the output resolution.
//!
//! This crate is intentionally small and engine-free so tests and tooling
//! can compile kernels without pulling in scene or encoder code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `KernelProgram`, `Expr`, `Stmt`, `Loop`, `OutputMap` + builders |
//! | [`error`] | `CompileError` |
//! | [`compile`](mod@compile) | validation, name resolution, lowering |
//! | [`exec`] | `CoordSpace`, parallel per-pixel evaluation |
//!
//! # Quick start
//!
//! ```rust
//! use reverie_kernel::ast::*;
//! use reverie_kernel::compile;
//!
//! // color = white where |coord - (0.5, 0.5)| < 0.25, black elsewhere
//! let program = KernelProgram {
//!     constants: vec![("center".to_string(), ConstValue::Vec2(0.5, 0.5))],
//!     setup: vec![Stmt::Let(
//!         "d".to_string(),
//!         call("dist", vec![coord(), var("center")]),
//!     )],
//!     iterate: Some(Loop {
//!         count: scalar(1.0),
//!         body: vec![],
//!         break_when: Some(lt(var("d"), scalar(0.25))),
//!     }),
//!     output: OutputMap::Select {
//!         escaped: [255, 255, 255, 255],
//!         interior: [0, 0, 0, 255],
//!     },
//! };
//!
//! let kernel = compile(&program).unwrap();
//! let pixels = kernel.run(64, 64);
//! assert_eq!(pixels.len(), 64 * 64);
//! assert_eq!(pixels[32 * 64 + 32], [255, 255, 255, 255]);
//! ```

pub mod ast;
pub mod compile;
pub mod error;
pub mod exec;

pub use ast::{KernelProgram, OutputMap, Rgba};
pub use compile::{Kernel, compile};
pub use error::CompileError;
pub use exec::CoordSpace;
