use std::{cell::RefCell, rc::Rc};

use leptos::{html, *};
use platform_host::FileRecord;
use system_ui::{Button, ButtonVariant, Tone};

use crate::engine::{DialogHandle, DialogSpec};
use crate::platform::DialogContent;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file name split into the editable base and the fixed extension.
pub struct RenameForm {
    original: String,
    base: String,
    extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a rename submission resolves to.
pub enum RenameOutcome {
    /// Blank input; the dialog stays open.
    Invalid,
    /// Recombined name equals the original.
    Unchanged,
    /// New full file name.
    Renamed(String),
}

impl RenameForm {
    /// Splits at the last `.`, unless that dot starts the name.
    pub fn new(file_name: &str) -> Self {
        let (base, extension) = match file_name.rfind('.') {
            Some(index) if index > 0 => file_name.split_at(index),
            _ => (file_name, ""),
        };
        Self {
            original: file_name.to_string(),
            base: base.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Editable part, used to pre-fill the input.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Extension including its dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Resolves the typed base name.
    pub fn submit(&self, input: &str) -> RenameOutcome {
        let base = input.trim();
        if base.is_empty() {
            return RenameOutcome::Invalid;
        }
        let renamed = format!("{base}{}", self.extension);
        if renamed == self.original {
            RenameOutcome::Unchanged
        } else {
            RenameOutcome::Renamed(renamed)
        }
    }
}

/// Submit, cancel, and validation state of a rename dialog.
#[derive(Debug, Clone)]
pub struct RenameControls {
    form: RenameForm,
    handle: DialogHandle<String>,
    invalid: RwSignal<bool>,
}

impl RenameControls {
    /// Binds a form to the handle of its dialog.
    pub fn new(form: RenameForm, handle: DialogHandle<String>) -> Self {
        Self {
            form,
            handle,
            invalid: create_rw_signal(false),
        }
    }

    /// Form being edited.
    pub fn form(&self) -> &RenameForm {
        &self.form
    }

    /// Whether the last submission was rejected and the input not edited since.
    pub fn is_invalid(&self) -> bool {
        self.invalid.get()
    }

    /// Closes the dialog unless `input` is invalid; returns whether it closed.
    pub fn submit(&self, input: &str) -> bool {
        match self.form.submit(input) {
            RenameOutcome::Invalid => {
                self.invalid.set(true);
                false
            }
            RenameOutcome::Unchanged => {
                self.handle.close(None);
                true
            }
            RenameOutcome::Renamed(name) => {
                self.handle.close(Some(name));
                true
            }
        }
    }

    /// Any edit clears the invalid marker.
    pub fn edited(&self) {
        self.invalid.set(false);
    }

    /// Handles a key pressed in the input; Enter submits `input`.
    ///
    /// Returns `true` when the key was consumed.
    pub fn key(&self, key: &str, input: &str) -> bool {
        if key != "Enter" {
            return false;
        }
        self.submit(input);
        true
    }

    /// Closes without a new name.
    pub fn cancel(&self) {
        self.handle.close(None);
    }
}

type InputSlot = Rc<RefCell<Option<NodeRef<html::Input>>>>;

fn input_of(slot: &InputSlot) -> Option<HtmlElement<html::Input>> {
    slot.borrow().as_ref().and_then(|node| node.get_untracked())
}

fn refocus_if_invalid(controls: &RenameControls, input: &HtmlElement<html::Input>) {
    if controls.invalid.get_untracked() {
        let _ = input.focus();
    }
}

fn submit_from_input(controls: &RenameControls, slot: &InputSlot) {
    let Some(input) = input_of(slot) else {
        return;
    };
    controls.submit(&input.value());
    refocus_if_invalid(controls, &input);
}

/// Builds the rename prompt for `file`; `on_close` receives the new full name, or `None` when
/// cancelled, dismissed, or unchanged.
pub fn rename_dialog(
    file: &FileRecord,
    on_close: impl FnOnce(Option<String>) + 'static,
) -> DialogSpec<String> {
    rename_dialog_with(file, |_| (), on_close)
}

/// [`rename_dialog`] that also hands the dialog's controls to `on_ready` once it is presented.
pub fn rename_dialog_with(
    file: &FileRecord,
    on_ready: impl FnOnce(&RenameControls) + 'static,
    on_close: impl FnOnce(Option<String>) + 'static,
) -> DialogSpec<String> {
    let form = RenameForm::new(&file.file_name);
    let slot: InputSlot = Rc::default();
    let focus_slot = slot.clone();

    DialogSpec::new(
        Tone::Info,
        "Rename",
        move |handle: &DialogHandle<String>| {
            let controls = RenameControls::new(form, handle.clone());
            on_ready(&controls);
            let body_controls = controls.clone();
            let body_slot = slot.clone();
            let body = ViewFn::from(move || {
                let input_ref = create_node_ref::<html::Input>();
                *body_slot.borrow_mut() = Some(input_ref);
                let base = body_controls.form().base().to_string();
                let extension = body_controls.form().extension().to_string();
                let invalid = body_controls.clone();
                let edited = body_controls.clone();
                let keyed = body_controls.clone();
                view! {
                    <div class="dialog-input-row">
                        <input
                            type="text"
                            class="dialog-input"
                            class:error=move || invalid.is_invalid()
                            node_ref=input_ref
                            value=base
                            on:input=move |_| edited.edited()
                            on:keydown=move |ev| {
                                let Some(input) = input_ref.get_untracked() else {
                                    return;
                                };
                                if keyed.key(&ev.key(), &input.value()) {
                                    ev.prevent_default();
                                    refocus_if_invalid(&keyed, &input);
                                }
                            }
                        />
                        <span class="dialog-input-extension">{extension}</span>
                    </div>
                }
            });
            let footer = ViewFn::from(move || {
                let cancel = controls.clone();
                let confirm = controls.clone();
                let slot = slot.clone();
                view! {
                    <Button
                        variant=ButtonVariant::Cancel
                        on_click=Callback::new(move |_| cancel.cancel())
                    >
                        "Cancel"
                    </Button>
                    <Button on_click=Callback::new(move |_| submit_from_input(&confirm, &slot))>
                        "Rename"
                    </Button>
                }
            });
            DialogContent { body, footer }
        },
        on_close,
    )
    .with_on_mounted(move || {
        if let Some(input) = input_of(&focus_slot) {
            let _ = input.focus();
            input.select();
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::testing::{engine, open_logged};

    #[test]
    fn split_keeps_the_last_extension() {
        let form = RenameForm::new("report.pdf");
        assert_eq!(form.base(), "report");
        assert_eq!(form.extension(), ".pdf");

        let form = RenameForm::new("archive.tar.gz");
        assert_eq!(form.base(), "archive.tar");
        assert_eq!(form.extension(), ".gz");
    }

    #[test]
    fn names_without_a_real_extension_are_all_base() {
        for name in ["README", ".env"] {
            let form = RenameForm::new(name);
            assert_eq!(form.base(), name);
            assert_eq!(form.extension(), "");
        }
    }

    #[test]
    fn submission_trims_and_recombines() {
        let form = RenameForm::new("report.pdf");

        assert_eq!(form.submit("  "), RenameOutcome::Invalid);
        assert_eq!(form.submit("report"), RenameOutcome::Unchanged);
        assert_eq!(
            form.submit(" final "),
            RenameOutcome::Renamed("final.pdf".to_string())
        );
        assert_eq!(
            RenameForm::new("README").submit("NOTES"),
            RenameOutcome::Renamed("NOTES".to_string())
        );
    }

    #[test]
    fn invalid_input_keeps_the_dialog_open() {
        let _ = create_runtime();
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None));
        let log = open_logged::<String>(&engine, "Rename", handle.clone());
        platform.run_frames();
        let controls = RenameControls::new(
            RenameForm::new("report.pdf"),
            handle.borrow().clone().expect("handle"),
        );

        assert!(!controls.submit(""));
        platform.settle();
        assert!(engine.active().is_some());

        assert!(controls.submit("final"));
        platform.settle();
        assert_eq!(*log.borrow(), vec![Some("final.pdf".to_string())]);
    }

    #[test]
    fn unchanged_name_resolves_like_a_cancel() {
        let _ = create_runtime();
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None));
        let log = open_logged::<String>(&engine, "Rename", handle.clone());
        platform.run_frames();
        let controls = RenameControls::new(
            RenameForm::new("report.pdf"),
            handle.borrow().clone().expect("handle"),
        );

        assert!(controls.submit("report"));
        platform.settle();

        assert_eq!(*log.borrow(), vec![None]);
    }

    fn open_rename() -> (
        crate::engine::DialogEngine<crate::engine::testing::RecordingPlatform>,
        crate::engine::testing::RecordingPlatform,
        RenameControls,
        Rc<RefCell<Vec<Option<String>>>>,
    ) {
        let (engine, platform) = engine();
        let handle = Rc::new(RefCell::new(None));
        let log = open_logged::<String>(&engine, "Rename", handle.clone());
        platform.run_frames();
        let controls = RenameControls::new(
            RenameForm::new("report.pdf"),
            handle.borrow().clone().expect("handle"),
        );
        (engine, platform, controls, log)
    }

    #[test]
    fn rejected_submit_marks_invalid_until_edited() {
        let _ = create_runtime();
        let (_engine, _platform, controls, _log) = open_rename();
        assert!(!controls.is_invalid());

        assert!(!controls.submit("   "));
        assert!(controls.is_invalid());

        controls.edited();
        assert!(!controls.is_invalid());
    }

    #[test]
    fn enter_submits_and_other_keys_pass_through() {
        let _ = create_runtime();
        let (_engine, platform, controls, log) = open_rename();

        assert!(!controls.key("a", "final"));
        platform.settle();
        assert!(log.borrow().is_empty());

        assert!(controls.key("Enter", ""));
        assert!(controls.is_invalid());
        platform.settle();
        assert!(log.borrow().is_empty());

        assert!(controls.key("Enter", "final"));
        platform.settle();
        assert_eq!(*log.borrow(), vec![Some("final.pdf".to_string())]);
    }
}
