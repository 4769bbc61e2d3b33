//! Modal lifecycle state machine.
//!
//! A dialog is mounted hidden, shown on the next animation frame, hidden again when a close is
//! requested, and unmounted once the exit delay has elapsed. The result is delivered only after
//! the unmount, and at most once.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lifecycle phase of the active dialog.
pub enum DialogPhase {
    /// Mounted in its hidden state, waiting for the next animation frame.
    #[default]
    Entering,
    /// Visible and accepting input.
    Open,
    /// Exit animation running; the result is pending delivery.
    Closing,
    /// Unmounted and result delivered.
    Closed,
}

impl DialogPhase {
    /// Whether a close request would still take effect.
    pub const fn accepts_close(self) -> bool {
        matches!(self, Self::Entering | Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inputs accepted by [`reduce_dialog`].
pub enum DialogAction {
    /// The animation frame requested at mount time ran.
    AnimationFrame,
    /// A close control, the backdrop, the cancel key, or a variant action asked to close.
    RequestClose,
    /// The exit delay scheduled by the close elapsed.
    ExitElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_dialog`], run in order by the engine.
pub enum DialogEffect {
    /// Apply the visible (`show`) state.
    Show,
    /// Run the variant's post-mount hook.
    NotifyMounted,
    /// Remove the visible state so the exit animation plays.
    Hide,
    /// Drop the window-level cancel-key listener.
    DetachCancelKey,
    /// Start the exit-delay timer.
    ScheduleExit,
    /// Remove the overlay and dialog from the host layer.
    Unmount,
    /// Invoke the close callback with the stored result.
    DeliverResult,
}

/// Applies `action` to `phase` and returns the effects to run.
///
/// Actions that do not apply to the current phase (a late frame, a second close, a stray timer)
/// leave the phase unchanged and return no effects.
pub fn reduce_dialog(phase: &mut DialogPhase, action: DialogAction) -> Vec<DialogEffect> {
    match (*phase, action) {
        (DialogPhase::Entering, DialogAction::AnimationFrame) => {
            *phase = DialogPhase::Open;
            vec![DialogEffect::Show, DialogEffect::NotifyMounted]
        }
        (DialogPhase::Entering | DialogPhase::Open, DialogAction::RequestClose) => {
            *phase = DialogPhase::Closing;
            vec![
                DialogEffect::Hide,
                DialogEffect::DetachCancelKey,
                DialogEffect::ScheduleExit,
            ]
        }
        (DialogPhase::Closing, DialogAction::ExitElapsed) => {
            *phase = DialogPhase::Closed;
            vec![DialogEffect::Unmount, DialogEffect::DeliverResult]
        }
        _ => Vec::new(),
    }
}
