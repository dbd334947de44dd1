//=========================================================================
// Command Collector
//=========================================================================
//
// Handle command collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<RuntimeCommand> → collect_frame() → pending → TickControl
//
// Bounded polling prevents a flood of requests from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::RuntimeCommand;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== CommandCollector ====================================================

/// Collects handle commands with bounded polling.
pub(crate) struct CommandCollector {
    receiver: Receiver<RuntimeCommand>,
    pending: Vec<RuntimeCommand>,
}

impl CommandCollector {
    pub(crate) fn new(receiver: Receiver<RuntimeCommand>) -> Self {
        Self {
            receiver,
            pending: Vec::with_capacity(4),
        }
    }

    /// Collects pending commands (bounded to prevent starvation).
    ///
    /// Commands received before a shutdown stay pending so the caller can
    /// still answer them.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_COMMANDS_PER_FRAME: usize = 64;

        self.pending.clear();
        let mut drained = 0;

        while drained < MAX_COMMANDS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(RuntimeCommand::Shutdown) => return TickControl::Exit,
                Ok(command) => {
                    self.pending.push(command);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_COMMANDS_PER_FRAME {
            warn!("Command queue backlog: drained {} commands this frame", drained);
        }

        TickControl::Continue
    }

    /// Commands collected this frame.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[RuntimeCommand] {
        &self.pending
    }

    /// Takes ownership of collected commands, leaving an empty vec.
    pub(crate) fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::TransitionRequest;
    use crossbeam_channel::{bounded, unbounded};

    fn request(name: &str) -> RuntimeCommand {
        let (reply, _) = bounded(1);
        RuntimeCommand::Request {
            request: TransitionRequest::new(name, None, false),
            reply,
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<RuntimeCommand>();
        let mut collector = CommandCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.pending().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_commands() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(request("Town")).unwrap();
        tx.send(request("Crypt")).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.pending().len(), 2);
    }

    #[test]
    fn collect_keeps_commands_before_shutdown() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(request("Town")).unwrap();
        tx.send(RuntimeCommand::Shutdown).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
        assert_eq!(collector.take_commands().len(), 1);
    }

    #[test]
    fn collect_clears_previous_commands() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);

        tx.send(request("Town")).unwrap();
        collector.collect_frame();
        assert_eq!(collector.pending().len(), 1);

        collector.collect_frame();
        assert!(collector.pending().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<RuntimeCommand>();
        let mut collector = CommandCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
