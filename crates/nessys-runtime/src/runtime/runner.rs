use crossbeam_channel::Sender;
use nessys_core::{Nes, Program};
use tracing::{debug, info};

use super::types::{ExitReason, RuntimeNotification};

pub(crate) struct Runner {
    nes: Nes,
    program: Box<dyn Program + Send>,
    event_tx: Sender<RuntimeNotification>,
}

impl Runner {
    pub(crate) fn new(
        nes: Nes,
        program: Box<dyn Program + Send>,
        event_tx: Sender<RuntimeNotification>,
    ) -> Self {
        Self {
            nes,
            program,
            event_tx,
        }
    }

    /// Boots the console and reboots it for as long as the reset entry comes
    /// back with a restart pending.
    ///
    /// The first boot runs on the console `Nes::new` already powered on.
    pub(crate) fn run(mut self) -> ExitReason {
        info!("runtime worker started");
        let mut boot = 0u32;
        let reason = loop {
            if boot > 0 {
                self.nes.power_on();
            }
            boot += 1;
            self.notify(RuntimeNotification::Booted { boot });

            self.nes.run_reset_handler(&mut *self.program);

            let controls = self.nes.controls();
            if controls.stop_requested() {
                break ExitReason::Stopped;
            }
            if !controls.restart_requested() {
                break ExitReason::ProgramReturned;
            }
            info!(boot, "rebooting");
            self.notify(RuntimeNotification::Rebooting);
        };
        info!(?reason, "runtime worker exiting");
        self.notify(RuntimeNotification::Exited(reason));
        reason
    }

    fn notify(&self, event: RuntimeNotification) {
        if self.event_tx.send(event).is_err() {
            debug!(?event, "notification dropped, receiver gone");
        }
    }
}
