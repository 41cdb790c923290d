//! Instruction semantics, one method per documented 6502 mnemonic.
//!
//! Operand fetching is the caller's job: translated code reads memory through
//! the bus and hands the byte to the method. Read-modify-write forms (`ASL`,
//! `INC`, ...) return the new byte so the caller can store it back. Stores go
//! through [`crate::Nes`] so device registers see exactly one write.
//!
//! `BCC`..`BVS`, `JMP`, `JSR` and `RTS` have no counterpart here; translated
//! programs express them as native control flow.

mod arith;
mod ctrl;
mod flags;
mod inc;
mod load;
mod logic;
mod shift;
mod stack;
mod trans;
