//! Browser dialog platform backed by Leptos signals, and the `DialogHost` layer that renders it.

use std::{rc::Rc, time::Duration};

use leptos::*;
use system_ui::{DialogSurface, ModalLayer};

use crate::platform::{CancelKeyListener, DialogPlatform, MountedDialog};
use crate::queue::DialogId;

const CANCEL_KEY: &str = "Escape";

#[derive(Clone, Copy)]
/// [`DialogPlatform`] that renders through a single reactive slot.
pub struct LeptosDialogPlatform {
    slot: RwSignal<Option<MountedDialog>>,
    visible: RwSignal<bool>,
}

impl LeptosDialogPlatform {
    /// Creates the slot signals in the current reactive owner.
    pub fn new() -> Self {
        Self {
            slot: create_rw_signal(None),
            visible: create_rw_signal(false),
        }
    }

    fn holds(&self, id: DialogId) -> bool {
        self.slot
            .with_untracked(|slot| slot.as_ref().map(|dialog| dialog.id) == Some(id))
    }
}

impl Default for LeptosDialogPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogPlatform for LeptosDialogPlatform {
    fn mount(&self, dialog: MountedDialog) {
        self.visible.set(false);
        self.slot.set(Some(dialog));
    }

    fn set_visible(&self, id: DialogId, visible: bool) {
        if self.holds(id) {
            self.visible.set(visible);
        }
    }

    fn unmount(&self, id: DialogId) {
        if self.holds(id) {
            self.visible.set(false);
            self.slot.set(None);
        }
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        request_animation_frame(callback);
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        set_timeout(callback, delay);
    }

    fn listen_cancel_key(&self, on_cancel: Rc<dyn Fn()>) -> CancelKeyListener {
        let handle = window_event_listener(ev::keydown, move |ev| {
            if ev.key() == CANCEL_KEY {
                on_cancel();
            }
        });
        CancelKeyListener::new(move || handle.remove())
    }
}

#[component]
/// Renders the active dialog, if any, above the page.
pub fn DialogHost(platform: LeptosDialogPlatform) -> impl IntoView {
    let visible = platform.visible;
    view! {
        <div class="dialog-layer" data-ui-kind="dialog-host">
            {move || {
                platform
                    .slot
                    .get()
                    .map(|dialog| {
                        let backdrop_dismiss = dialog.dismiss.clone();
                        let close_dismiss = dialog.dismiss.clone();
                        let body = dialog.content.body.clone();
                        let footer = dialog.content.footer.clone();
                        view! {
                            <ModalLayer
                                visible=visible
                                on_backdrop_click=Callback::new(move |_| backdrop_dismiss())
                            >
                                <DialogSurface
                                    tone=dialog.tone
                                    title=dialog.title.clone()
                                    visible=visible
                                    on_close=Callback::new(move |_| close_dismiss())
                                >
                                    <div class="dialog-body">{body.run()}</div>
                                    <div class="dialog-footer">{footer.run()}</div>
                                </DialogSurface>
                            </ModalLayer>
                        }
                    })
            }}
        </div>
    }
}
