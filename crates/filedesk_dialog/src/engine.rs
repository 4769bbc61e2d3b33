//! Dialog engine: presents one dialog at a time and drives it through its lifecycle.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use system_ui::Tone;

use crate::lifecycle::{reduce_dialog, DialogAction, DialogEffect, DialogPhase};
use crate::platform::{CancelKeyListener, DialogContent, DialogPlatform, MountedDialog};
use crate::queue::{DialogId, DialogQueue};

/// Default exit-animation delay between hiding a dialog and unmounting it.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(200);

type ContentBuilder<R> = Box<dyn FnOnce(&DialogHandle<R>) -> DialogContent>;
type CloseCallback<R> = Box<dyn FnOnce(Option<R>)>;
type Closer = Rc<dyn Fn(DialogId, Box<dyn FnOnce()>)>;

/// Everything needed to present one dialog.
pub struct DialogSpec<R> {
    /// Tone of the dialog card.
    pub tone: Tone,
    /// Header title.
    pub title: String,
    /// Builds body and footer; receives the handle that closes this dialog.
    pub content: ContentBuilder<R>,
    /// Receives the result exactly once; `None` means dismissed.
    pub on_close: CloseCallback<R>,
    /// Runs on the frame that shows the dialog, unless it was closed before that frame.
    pub on_mounted: Option<Box<dyn FnOnce()>>,
}

impl<R> DialogSpec<R> {
    /// Builds a spec without a mount hook.
    pub fn new(
        tone: Tone,
        title: impl Into<String>,
        content: impl FnOnce(&DialogHandle<R>) -> DialogContent + 'static,
        on_close: impl FnOnce(Option<R>) + 'static,
    ) -> Self {
        Self {
            tone,
            title: title.into(),
            content: Box::new(content),
            on_close: Box::new(on_close),
            on_mounted: None,
        }
    }

    /// Adds a hook that runs when the dialog becomes visible.
    pub fn with_on_mounted(mut self, on_mounted: impl FnOnce() + 'static) -> Self {
        self.on_mounted = Some(Box::new(on_mounted));
        self
    }
}

/// Closes one dialog with a typed result.
///
/// Every clone refers to the same dialog; only the first effective close delivers.
pub struct DialogHandle<R> {
    id: DialogId,
    on_close: Rc<RefCell<Option<CloseCallback<R>>>>,
    closer: Closer,
}

impl<R> Clone for DialogHandle<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            on_close: self.on_close.clone(),
            closer: self.closer.clone(),
        }
    }
}

impl<R> fmt::Debug for DialogHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogHandle").field("id", &self.id).finish()
    }
}

impl<R: 'static> DialogHandle<R> {
    /// Dialog this handle closes.
    pub fn id(&self) -> DialogId {
        self.id
    }

    /// Starts closing with `result`. Calls after the first effective close are no-ops.
    pub fn close(&self, result: Option<R>) {
        let slot = self.on_close.clone();
        (self.closer)(
            self.id,
            Box::new(move || {
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(result);
                }
            }),
        );
    }

    /// Starts closing without a result.
    pub fn dismiss(&self) {
        self.close(None);
    }
}

struct PreparedDialog {
    tone: Tone,
    title: String,
    content: Box<dyn FnOnce() -> DialogContent>,
    on_mounted: Option<Box<dyn FnOnce()>>,
    dismiss: Rc<dyn Fn()>,
}

struct ActiveDialog {
    id: DialogId,
    phase: DialogPhase,
    cancel_key: Option<CancelKeyListener>,
    on_mounted: Option<Box<dyn FnOnce()>>,
    deliver: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct EngineState {
    next_id: u64,
    queue: DialogQueue<PreparedDialog>,
    active: Option<ActiveDialog>,
}

struct EngineInner<P> {
    platform: P,
    exit_delay: Duration,
    state: RefCell<EngineState>,
}

/// Opens dialogs on a [`DialogPlatform`], one at a time, queueing the rest in arrival order.
pub struct DialogEngine<P> {
    inner: Rc<EngineInner<P>>,
}

impl<P> Clone for DialogEngine<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P> fmt::Debug for DialogEngine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("DialogEngine")
            .field("active", &state.queue.active())
            .field("waiting", &state.queue.waiting())
            .field("exit_delay", &self.inner.exit_delay)
            .finish()
    }
}

impl<P: DialogPlatform + 'static> DialogEngine<P> {
    /// Creates an engine with the given exit-animation delay.
    pub fn new(platform: P, exit_delay: Duration) -> Self {
        Self {
            inner: Rc::new(EngineInner {
                platform,
                exit_delay,
                state: RefCell::new(EngineState::default()),
            }),
        }
    }

    /// Platform the engine renders on.
    pub fn platform(&self) -> &P {
        &self.inner.platform
    }

    /// Dialog currently on screen.
    pub fn active(&self) -> Option<DialogId> {
        self.inner.state.borrow().queue.active()
    }

    /// Lifecycle phase of the dialog on screen.
    pub fn active_phase(&self) -> Option<DialogPhase> {
        self.inner
            .state
            .borrow()
            .active
            .as_ref()
            .map(|active| active.phase)
    }

    /// Number of dialogs waiting behind the active one.
    pub fn waiting(&self) -> usize {
        self.inner.state.borrow().queue.waiting()
    }

    /// Opens a dialog, or queues it behind the dialog on screen.
    pub fn open<R: 'static>(&self, spec: DialogSpec<R>) -> DialogId {
        let id = {
            let mut state = self.inner.state.borrow_mut();
            state.next_id += 1;
            DialogId(state.next_id)
        };
        let handle = DialogHandle {
            id,
            on_close: Rc::new(RefCell::new(Some(spec.on_close))),
            closer: self.closer(),
        };
        let dismiss: Rc<dyn Fn()> = {
            let handle = handle.clone();
            Rc::new(move || handle.dismiss())
        };
        let build = spec.content;
        let prepared = PreparedDialog {
            tone: spec.tone,
            title: spec.title,
            content: Box::new(move || build(&handle)),
            on_mounted: spec.on_mounted,
            dismiss,
        };

        let admitted = self.inner.state.borrow_mut().queue.admit(id, prepared);
        if let Some(prepared) = admitted {
            self.present(id, prepared);
        }
        id
    }

    fn closer(&self) -> Closer {
        let weak: Weak<EngineInner<P>> = Rc::downgrade(&self.inner);
        Rc::new(move |id, deliver| {
            if let Some(inner) = weak.upgrade() {
                DialogEngine { inner }.request_close(id, deliver);
            }
        })
    }

    fn dispatch_later(&self, id: DialogId, action: DialogAction) -> Box<dyn FnOnce()> {
        let weak = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                DialogEngine { inner }.dispatch(id, action, None);
            }
        })
    }

    fn present(&self, id: DialogId, prepared: PreparedDialog) {
        self.inner.state.borrow_mut().active = Some(ActiveDialog {
            id,
            phase: DialogPhase::Entering,
            cancel_key: None,
            on_mounted: prepared.on_mounted,
            deliver: None,
        });

        let content = (prepared.content)();
        self.inner.platform.mount(MountedDialog {
            id,
            tone: prepared.tone,
            title: prepared.title,
            content,
            dismiss: prepared.dismiss.clone(),
        });

        let listener = self.inner.platform.listen_cancel_key(prepared.dismiss);
        {
            let mut state = self.inner.state.borrow_mut();
            match state.active.as_mut().filter(|active| active.id == id) {
                Some(active) if active.phase.accepts_close() => active.cancel_key = Some(listener),
                // Closed while mounting; the listener drops here.
                _ => {}
            }
        }

        self.inner
            .platform
            .request_frame(self.dispatch_later(id, DialogAction::AnimationFrame));
    }

    fn request_close(&self, id: DialogId, deliver: Box<dyn FnOnce()>) {
        self.dispatch(id, DialogAction::RequestClose, Some(deliver));
    }

    fn dispatch(&self, id: DialogId, action: DialogAction, deliver: Option<Box<dyn FnOnce()>>) {
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            let Some(active) = state.active.as_mut().filter(|active| active.id == id) else {
                return;
            };
            let effects = reduce_dialog(&mut active.phase, action);
            if action == DialogAction::RequestClose && !effects.is_empty() {
                active.deliver = deliver;
            }
            effects
        };
        for effect in effects {
            self.run_effect(id, effect);
        }
    }

    fn run_effect(&self, id: DialogId, effect: DialogEffect) {
        let platform = &self.inner.platform;
        match effect {
            DialogEffect::Show => platform.set_visible(id, true),
            DialogEffect::Hide => platform.set_visible(id, false),
            DialogEffect::NotifyMounted => {
                let hook = self.with_active(id, |active| active.on_mounted.take());
                if let Some(hook) = hook.flatten() {
                    hook();
                }
            }
            DialogEffect::DetachCancelKey => {
                let listener = self.with_active(id, |active| active.cancel_key.take());
                drop(listener);
            }
            DialogEffect::ScheduleExit => platform.set_timeout(
                self.inner.exit_delay,
                self.dispatch_later(id, DialogAction::ExitElapsed),
            ),
            DialogEffect::Unmount => platform.unmount(id),
            DialogEffect::DeliverResult => {
                let finished = {
                    let mut state = self.inner.state.borrow_mut();
                    state.queue.release(id);
                    state.active.take()
                };
                if let Some(deliver) = finished.and_then(|active| active.deliver) {
                    deliver();
                }
                self.present_next();
            }
        }
    }

    fn with_active<T>(&self, id: DialogId, f: impl FnOnce(&mut ActiveDialog) -> T) -> Option<T> {
        let mut state = self.inner.state.borrow_mut();
        state
            .active
            .as_mut()
            .filter(|active| active.id == id)
            .map(f)
    }

    fn present_next(&self) {
        let next = {
            let mut state = self.inner.state.borrow_mut();
            if state.active.is_some() {
                None
            } else {
                state.queue.advance()
            }
        };
        if let Some((id, prepared)) = next {
            self.present(id, prepared);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PlatformCall {
        Mount(DialogId, String),
        Visible(DialogId, bool),
        Unmount(DialogId),
        ListenCancelKey(DialogId),
        DetachCancelKey(DialogId),
        Timeout(Duration),
    }

    /// Records platform calls and runs frames, timers, and the cancel key on demand.
    #[derive(Clone, Default)]
    pub struct RecordingPlatform {
        pub calls: Rc<RefCell<Vec<PlatformCall>>>,
        pub mounted: Rc<RefCell<Option<MountedDialog>>>,
        frames: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
        timers: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
        cancel: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
        last_mounted: Rc<Cell<Option<DialogId>>>,
    }

    impl RecordingPlatform {
        pub fn calls(&self) -> Vec<PlatformCall> {
            self.calls.borrow().clone()
        }

        pub fn run_frames(&self) {
            let frames: Vec<_> = self.frames.borrow_mut().drain(..).collect();
            for frame in frames {
                frame();
            }
        }

        pub fn run_timers(&self) {
            let timers: Vec<_> = self.timers.borrow_mut().drain(..).collect();
            for timer in timers {
                timer();
            }
        }

        pub fn settle(&self) {
            self.run_frames();
            self.run_timers();
            self.run_frames();
        }

        pub fn press_escape(&self) {
            let cancel = self.cancel.borrow().clone();
            if let Some(cancel) = cancel {
                cancel();
            }
        }

        pub fn click_backdrop(&self) {
            let dismiss = self
                .mounted
                .borrow()
                .as_ref()
                .map(|dialog| dialog.dismiss.clone());
            if let Some(dismiss) = dismiss {
                dismiss();
            }
        }

        pub fn mounted_title(&self) -> Option<String> {
            self.mounted.borrow().as_ref().map(|dialog| dialog.title.clone())
        }
    }

    impl DialogPlatform for RecordingPlatform {
        fn mount(&self, dialog: MountedDialog) {
            self.calls
                .borrow_mut()
                .push(PlatformCall::Mount(dialog.id, dialog.title.clone()));
            self.last_mounted.set(Some(dialog.id));
            *self.mounted.borrow_mut() = Some(dialog);
        }

        fn set_visible(&self, id: DialogId, visible: bool) {
            self.calls
                .borrow_mut()
                .push(PlatformCall::Visible(id, visible));
        }

        fn unmount(&self, id: DialogId) {
            self.calls.borrow_mut().push(PlatformCall::Unmount(id));
            let mut mounted = self.mounted.borrow_mut();
            if mounted.as_ref().map(|dialog| dialog.id) == Some(id) {
                *mounted = None;
            }
        }

        fn request_frame(&self, callback: Box<dyn FnOnce()>) {
            self.frames.borrow_mut().push(callback);
        }

        fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
            self.calls.borrow_mut().push(PlatformCall::Timeout(delay));
            self.timers.borrow_mut().push(callback);
        }

        fn listen_cancel_key(&self, on_cancel: Rc<dyn Fn()>) -> CancelKeyListener {
            let id = self.last_mounted.get().unwrap_or(DialogId(0));
            self.calls
                .borrow_mut()
                .push(PlatformCall::ListenCancelKey(id));
            *self.cancel.borrow_mut() = Some(on_cancel);
            let calls = self.calls.clone();
            let cancel = self.cancel.clone();
            CancelKeyListener::new(move || {
                calls.borrow_mut().push(PlatformCall::DetachCancelKey(id));
                cancel.borrow_mut().take();
            })
        }
    }

    pub fn engine() -> (DialogEngine<RecordingPlatform>, RecordingPlatform) {
        let platform = RecordingPlatform::default();
        (
            DialogEngine::new(platform.clone(), DEFAULT_EXIT_DELAY),
            platform,
        )
    }

    /// Opens a content-less dialog whose results are appended to the returned log.
    pub fn open_logged<R: Clone + 'static>(
        engine: &DialogEngine<RecordingPlatform>,
        title: &str,
        handle_out: Rc<RefCell<Option<DialogHandle<R>>>>,
    ) -> Rc<RefCell<Vec<Option<R>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        engine.open(DialogSpec::new(
            Tone::Info,
            title,
            move |handle: &DialogHandle<R>| {
                *handle_out.borrow_mut() = Some(handle.clone());
                DialogContent::default()
            },
            move |result| sink.borrow_mut().push(result),
        ));
        log
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::testing::{engine, open_logged, PlatformCall};
    use super::*;

    #[test]
    fn open_mounts_hidden_then_shows_on_next_frame() {
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None::<DialogHandle<bool>>));
        let _log = open_logged(&engine, "Confirm", handle);

        assert_eq!(engine.active_phase(), Some(DialogPhase::Entering));
        platform.run_frames();

        assert_eq!(
            platform.calls(),
            vec![
                PlatformCall::Mount(DialogId(1), "Confirm".to_string()),
                PlatformCall::ListenCancelKey(DialogId(1)),
                PlatformCall::Visible(DialogId(1), true),
            ]
        );
        assert_eq!(engine.active_phase(), Some(DialogPhase::Open));
    }

    #[test]
    fn close_delivers_once_after_unmount_and_detach() {
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None::<DialogHandle<bool>>));
        let log = open_logged(&engine, "Confirm", handle.clone());
        platform.run_frames();

        let handle = handle.borrow().clone().expect("content built");
        handle.close(Some(true));
        handle.close(Some(false));
        assert!(log.borrow().is_empty());

        platform.run_timers();

        assert_eq!(*log.borrow(), vec![Some(true)]);
        let calls = platform.calls();
        assert_eq!(
            calls[3..].to_vec(),
            vec![
                PlatformCall::Visible(DialogId(1), false),
                PlatformCall::DetachCancelKey(DialogId(1)),
                PlatformCall::Timeout(DEFAULT_EXIT_DELAY),
                PlatformCall::Unmount(DialogId(1)),
            ]
        );
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn escape_then_backdrop_click_closes_exactly_once() {
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None::<DialogHandle<bool>>));
        let log = open_logged(&engine, "Delete files", handle);
        platform.run_frames();

        platform.press_escape();
        platform.click_backdrop();
        platform.press_escape();
        platform.settle();

        assert_eq!(*log.borrow(), vec![None]);
        let timeouts = platform
            .calls()
            .into_iter()
            .filter(|call| matches!(call, PlatformCall::Timeout(_)))
            .count();
        assert_eq!(timeouts, 1);
    }

    #[test]
    fn mount_hook_runs_on_show_frame_but_not_after_early_close() {
        let (engine, platform) = engine();
        let mounted = Rc::new(Cell::new(0));

        let counter = mounted.clone();
        engine.open(
            DialogSpec::new(Tone::Info, "Rename", |_: &DialogHandle<String>| {
                DialogContent::default()
            }, |_| {})
            .with_on_mounted(move || counter.set(counter.get() + 1)),
        );
        platform.run_frames();
        assert_eq!(mounted.get(), 1);
        platform.press_escape();
        platform.settle();

        let counter = mounted.clone();
        engine.open(
            DialogSpec::new(Tone::Info, "Rename", |_: &DialogHandle<String>| {
                DialogContent::default()
            }, |_| {})
            .with_on_mounted(move || counter.set(counter.get() + 1)),
        );
        platform.press_escape();
        platform.settle();

        assert_eq!(mounted.get(), 1);
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn second_dialog_waits_for_the_first_to_finish_closing() {
        let (engine, platform) = engine();
        let first = Rc::new(RefCell::new(None::<DialogHandle<bool>>));
        let second = Rc::new(RefCell::new(None::<DialogHandle<bool>>));
        let first_log = open_logged(&engine, "First", first.clone());
        let second_log = open_logged(&engine, "Second", second.clone());
        platform.run_frames();

        assert_eq!(platform.mounted_title().as_deref(), Some("First"));
        assert_eq!(engine.waiting(), 1);
        assert!(second.borrow().is_none());

        first.borrow().clone().expect("first").close(Some(true));
        assert_eq!(platform.mounted_title().as_deref(), Some("First"));
        platform.run_timers();

        assert_eq!(*first_log.borrow(), vec![Some(true)]);
        assert_eq!(platform.mounted_title().as_deref(), Some("Second"));
        assert_eq!(engine.active(), Some(DialogId(2)));

        platform.run_frames();
        second.borrow().clone().expect("second").close(Some(false));
        platform.run_timers();
        assert_eq!(*second_log.borrow(), vec![Some(false)]);
    }

    #[test]
    fn dialog_opened_from_a_close_callback_queues_behind_earlier_ones() {
        let (engine, platform) = engine();
        let order = Rc::new(RefCell::new(Vec::new()));

        let reopen_engine = engine.clone();
        let reopen_order = order.clone();
        let first = Rc::new(RefCell::new(None::<DialogHandle<()>>));
        let first_out = first.clone();
        engine.open(DialogSpec::new(
            Tone::Info,
            "First",
            move |handle: &DialogHandle<()>| {
                *first_out.borrow_mut() = Some(handle.clone());
                DialogContent::default()
            },
            move |_| {
                let log = reopen_order.clone();
                reopen_engine.open(DialogSpec::new(
                    Tone::Info,
                    "Third",
                    |_: &DialogHandle<()>| DialogContent::default(),
                    move |_| log.borrow_mut().push("third"),
                ));
            },
        ));
        let second_order = order.clone();
        engine.open(DialogSpec::new(
            Tone::Info,
            "Second",
            |_: &DialogHandle<()>| DialogContent::default(),
            move |_| second_order.borrow_mut().push("second"),
        ));

        platform.run_frames();
        first.borrow().clone().expect("first").dismiss();
        platform.run_timers();

        assert_eq!(platform.mounted_title().as_deref(), Some("Second"));
        assert_eq!(engine.waiting(), 1);
        platform.run_frames();
        platform.press_escape();
        platform.settle();
        assert_eq!(platform.mounted_title().as_deref(), Some("Third"));
        platform.press_escape();
        platform.settle();

        assert_eq!(*order.borrow(), vec!["second", "third"]);
    }
}
