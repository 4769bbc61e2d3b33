//! Shared control and overlay primitives.

use leptos::ev::MouseEvent;
use leptos::*;

use crate::{Icon, IconName, IconSize};

mod controls;
mod overlays;

pub use controls::{Button, ButtonVariant, IconButton};
pub use overlays::{is_backdrop_click, DialogSurface, ModalLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Semantic status tone shared by dialogs, buttons, and result summaries.
pub enum Tone {
    /// Neutral.
    #[default]
    Info,
    /// Completed.
    Success,
    /// Partial or risky.
    Warning,
    /// Destructive or failed.
    Danger,
}

impl Tone {
    /// Stable token used in `dialog-{tone}` classes and `data-ui-tone`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Marker icon for the tone.
    pub const fn icon(self) -> IconName {
        match self {
            Self::Info => IconName::Info,
            Self::Success => IconName::Check,
            Self::Warning => IconName::Warning,
            Self::Danger => IconName::Error,
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
