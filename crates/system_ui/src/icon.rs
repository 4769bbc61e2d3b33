//! Semantic icon identifiers rendered through the Font Awesome glyph set loaded by the host page.
//!
//! Components never embed raw `fa-*` class strings; they name an [`IconName`] and the renderer
//! maps it to the glyph class.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Semantic icon identifiers used by the shell, dialogs, and pages.
pub enum IconName {
    /// Sidebar toggle.
    Bars,
    /// Upload page / upload action.
    Upload,
    /// File listing page.
    Folder,
    /// Statistics page.
    ChartPie,
    /// Settings page.
    Gear,
    /// Dismiss/close.
    Close,
    /// Success marker.
    Check,
    /// Warning marker.
    Warning,
    /// Failure marker.
    Error,
    /// Informational marker.
    Info,
    /// Delete action.
    Trash,
    /// Rename action.
    Pen,
    /// Preview action.
    Eye,
    /// Download action.
    Download,
    /// Search field.
    Search,
    /// Generic file.
    File,
}

impl IconName {
    /// Every icon, in declaration order.
    pub const ALL: [IconName; 16] = [
        Self::Bars,
        Self::Upload,
        Self::Folder,
        Self::ChartPie,
        Self::Gear,
        Self::Close,
        Self::Check,
        Self::Warning,
        Self::Error,
        Self::Info,
        Self::Trash,
        Self::Pen,
        Self::Eye,
        Self::Download,
        Self::Search,
        Self::File,
    ];

    /// Stable token used in config files and `data-ui-icon` hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Bars => "bars",
            Self::Upload => "upload",
            Self::Folder => "folder",
            Self::ChartPie => "chart-pie",
            Self::Gear => "gear",
            Self::Close => "close",
            Self::Check => "check",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Trash => "trash",
            Self::Pen => "pen",
            Self::Eye => "eye",
            Self::Download => "download",
            Self::Search => "search",
            Self::File => "file",
        }
    }

    /// Parses a token produced by [`IconName::token`].
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.token() == token)
    }

    /// Font Awesome glyph class.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Bars => "fa-bars",
            Self::Upload => "fa-cloud-upload-alt",
            Self::Folder => "fa-folder-open",
            Self::ChartPie => "fa-chart-pie",
            Self::Gear => "fa-cog",
            Self::Close => "fa-times",
            Self::Check => "fa-check",
            Self::Warning => "fa-exclamation-triangle",
            Self::Error => "fa-times-circle",
            Self::Info => "fa-info-circle",
            Self::Trash => "fa-trash-alt",
            Self::Pen => "fa-pen",
            Self::Eye => "fa-eye",
            Self::Download => "fa-download",
            Self::Search => "fa-search",
            Self::File => "fa-file",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Icon size tokens.
pub enum IconSize {
    /// Inline with text.
    #[default]
    Sm,
    /// Standalone controls.
    Md,
    /// Headings and empty states.
    Lg,
}

impl IconSize {
    /// Stable token used for `data-ui-size`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[component]
/// Renders a decorative icon glyph.
pub fn Icon(icon: IconName, #[prop(optional)] size: IconSize) -> impl IntoView {
    view! {
        <i
            class=format!("fas {}", icon.glyph())
            aria-hidden="true"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
        ></i>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_tokens_round_trip() {
        for icon in IconName::ALL {
            assert_eq!(IconName::from_token(icon.token()), Some(icon));
        }
        assert_eq!(IconName::from_token("unknown"), None);
    }
}
