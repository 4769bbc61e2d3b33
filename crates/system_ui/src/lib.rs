//! Shared UI primitive library for the filedesk shell, dialogs, and pages.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the stable class and
//! `data-ui-*` DOM contract consumed by the stylesheet.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    is_backdrop_click, Button, ButtonVariant, DialogSurface, IconButton, ModalLayer, Tone,
};

/// Convenience imports for crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Button, ButtonVariant, DialogSurface, Icon, IconButton, IconName, IconSize, ModalLayer,
        Tone,
    };
}
