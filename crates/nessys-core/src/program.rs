//! The contract between the core and a statically translated program.

use crate::Nes;

/// Entry points of a translated cartridge.
///
/// Every entry returns `true` when it stopped early because a
/// [`Nes::sync`] call asked it to (see [`sync!`](crate::sync)). Handlers
/// must call `sync` after each original instruction's worth of cycles and
/// return as soon as it reports `true`.
pub trait Program {
    /// Main entry, run after every hardware reset.
    fn reset(&mut self, nes: &mut Nes) -> bool;

    /// Vertical blank handler.
    fn nmi(&mut self, nes: &mut Nes) -> bool;

    /// `BRK` / external interrupt handler.
    fn irq(&mut self, nes: &mut Nes) -> bool;
}

/// Runs a sync checkpoint and returns `true` from the enclosing entry point
/// when the core asks the handler to stop.
///
/// ```ignore
/// fn reset(&mut self, nes: &mut Nes) -> bool {
///     loop {
///         nes.cpu.lda(0x01);
///         sync!(nes, self, 2);
///     }
/// }
/// ```
#[macro_export]
macro_rules! sync {
    ($nes:expr, $program:expr, $cycles:expr) => {
        if $nes.sync(&mut *$program, $cycles) {
            return true;
        }
    };
}
