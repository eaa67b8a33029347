//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for label compilation. The IR is a
//! flat list of ZPL operations that sits between the element model and the
//! final command text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  Elements   │ ──► │     IR      │ ──► │   Codegen    │
//! │ (template)  │     │  (Vec<Op>)  │     │ (ZPL lines)  │
//! └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **Inspectable**: Debug what will be printed before rendering text
//! 2. **Testable**: Element compilers are tested on ops, not strings
//! 3. **Escaping in one place**: Literal field data is escaped only at codegen
//!
//! ## Example
//!
//! ```
//! use labelzpl::ir::{Op, Program};
//!
//! let mut program = Program::new();
//! program.push(Op::StartFormat);
//! program.push(Op::PrintWidth(464));
//! program.push(Op::Comment("empty label".into()));
//! program.push(Op::EndFormat);
//!
//! assert_eq!(program.to_zpl(), "^XA\n^PW464\n^FXempty label^FS\n^XZ");
//! ```

mod codegen;
mod ops;

// Re-export the ops types (codegen adds methods to Program and Op via impl)
pub use ops::*;
