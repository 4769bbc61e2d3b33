//! File preview overlay: media element chosen by category, backed by a blob object URL.

use std::{cell::RefCell, rc::Rc};

use leptos::*;
use platform_host::{FileCategory, FilePayload};
use system_ui::{Button, ButtonVariant, IconButton, IconName, ModalLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Element used to show a preview.
pub enum PreviewKind {
    /// `<img>`.
    Image,
    /// `<video controls>`.
    Video,
    /// `<audio controls>`.
    Audio,
    /// `<iframe>`.
    Document,
    /// No inline preview.
    Unsupported,
}

impl PreviewKind {
    /// Chooses the element for a MIME type.
    pub fn for_mime(mime: &str) -> Self {
        match FileCategory::from_mime(mime) {
            FileCategory::Image => Self::Image,
            FileCategory::Video => Self::Video,
            FileCategory::Audio => Self::Audio,
            FileCategory::Document => Self::Document,
            FileCategory::Archive | FileCategory::Other => Self::Unsupported,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A preview on screen.
pub struct PreviewState {
    /// Displayed file name.
    pub file_name: String,
    /// MIME type of the contents.
    pub mime: String,
    /// `blob:` URL of the contents; revoked on close.
    pub object_url: String,
    /// Server download URL; `None` for local files not yet uploaded.
    pub download_url: Option<String>,
}

impl PreviewState {
    /// Element used for this preview.
    pub fn kind(&self) -> PreviewKind {
        PreviewKind::for_mime(&self.mime)
    }

    /// Link target of the download control.
    pub fn download_href(&self) -> &str {
        self.download_url.as_deref().unwrap_or(&self.object_url)
    }
}

/// Opens previews for page handlers.
pub trait PreviewPresenter {
    /// Shows `payload` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns a message when the contents cannot be turned into a displayable URL.
    fn present(
        &self,
        file_name: &str,
        payload: &FilePayload,
        download_url: Option<String>,
    ) -> Result<(), String>;
}

#[derive(Clone, Copy)]
/// Browser preview overlay state.
pub struct PreviewController {
    state: RwSignal<Option<PreviewState>>,
}

impl PreviewController {
    /// Creates the overlay signal in the current reactive owner.
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(None),
        }
    }

    /// Current preview.
    pub fn state(&self) -> Signal<Option<PreviewState>> {
        self.state.into()
    }

    /// Closes the overlay and revokes its object URL.
    pub fn close(&self) {
        if let Some(previous) = self.state.get_untracked() {
            if let Err(err) = platform_host_web::revoke_object_url(&previous.object_url) {
                logging::warn!("revoke object url failed: {err}");
            }
        }
        self.state.set(None);
    }
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPresenter for PreviewController {
    fn present(
        &self,
        file_name: &str,
        payload: &FilePayload,
        download_url: Option<String>,
    ) -> Result<(), String> {
        let object_url = platform_host_web::create_object_url(payload)?;
        self.close();
        self.state.set(Some(PreviewState {
            file_name: file_name.to_string(),
            mime: payload.mime.clone(),
            object_url,
            download_url,
        }));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Presenter that records previews with a synthetic object URL.
pub struct MemoryPreviewPresenter {
    shown: Rc<RefCell<Vec<PreviewState>>>,
}

impl MemoryPreviewPresenter {
    /// Previews opened so far.
    pub fn shown(&self) -> Vec<PreviewState> {
        self.shown.borrow().clone()
    }
}

impl PreviewPresenter for MemoryPreviewPresenter {
    fn present(
        &self,
        file_name: &str,
        payload: &FilePayload,
        download_url: Option<String>,
    ) -> Result<(), String> {
        let mut shown = self.shown.borrow_mut();
        let object_url = format!("blob:memory/{}", shown.len());
        shown.push(PreviewState {
            file_name: file_name.to_string(),
            mime: payload.mime.clone(),
            object_url,
            download_url,
        });
        Ok(())
    }
}

fn preview_media(preview: &PreviewState) -> View {
    let src = preview.object_url.clone();
    match preview.kind() {
        PreviewKind::Image => {
            view! { <img class="preview-media" src=src alt=preview.file_name.clone() /> }
                .into_view()
        }
        PreviewKind::Video => view! { <video class="preview-media" src=src controls=true></video> }
            .into_view(),
        PreviewKind::Audio => view! { <audio class="preview-media" src=src controls=true></audio> }
            .into_view(),
        PreviewKind::Document => {
            view! { <iframe class="preview-media preview-document" src=src></iframe> }.into_view()
        }
        PreviewKind::Unsupported => view! {
            <div class="preview-unsupported">
                <p>"No preview available for this file type"</p>
            </div>
        }
        .into_view(),
    }
}

#[component]
/// Full-screen preview overlay bound to a [`PreviewController`].
pub fn PreviewOverlay(controller: PreviewController) -> impl IntoView {
    let visible = Signal::derive(move || controller.state.with(Option::is_some));
    view! {
        <ModalLayer
            visible=visible
            layout_class="preview-overlay"
            on_backdrop_click=Callback::new(move |_| controller.close())
        >
            {move || {
                controller
                    .state
                    .get()
                    .map(|preview| {
                        let href = preview.download_href().to_string();
                        let download_name = preview.file_name.clone();
                        view! {
                            <div class="preview-container">
                                <div class="preview-header">
                                    <span class="preview-title">{preview.file_name.clone()}</span>
                                    <IconButton
                                        icon=IconName::Close
                                        layout_class="preview-close"
                                        title="Close".to_string()
                                        on_click=Callback::new(move |_| controller.close())
                                    />
                                </div>
                                <div class="preview-body">{preview_media(&preview)}</div>
                                <div class="preview-footer">
                                    <a class="preview-download" href=href download=download_name>
                                        <Button
                                            variant=ButtonVariant::Quiet
                                            leading_icon=IconName::Download
                                        >
                                            "Download"
                                        </Button>
                                    </a>
                                </div>
                            </div>
                        }
                    })
            }}
        </ModalLayer>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn media_element_follows_the_category() {
        assert_eq!(PreviewKind::for_mime("image/webp"), PreviewKind::Image);
        assert_eq!(PreviewKind::for_mime("video/mp4"), PreviewKind::Video);
        assert_eq!(PreviewKind::for_mime("audio/ogg"), PreviewKind::Audio);
        assert_eq!(PreviewKind::for_mime("application/pdf"), PreviewKind::Document);
        assert_eq!(PreviewKind::for_mime("application/zip"), PreviewKind::Unsupported);
    }

    #[test]
    fn download_prefers_the_server_url() {
        let mut preview = PreviewState {
            file_name: "a.png".to_string(),
            mime: "image/png".to_string(),
            object_url: "blob:1".to_string(),
            download_url: Some("/uploads/a.png".to_string()),
        };
        assert_eq!(preview.download_href(), "/uploads/a.png");

        preview.download_url = None;
        assert_eq!(preview.download_href(), "blob:1");
    }
}
