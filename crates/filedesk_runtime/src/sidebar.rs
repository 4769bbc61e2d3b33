//! Collapsible sidebar state.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Sidebar visibility.
pub struct SidebarState {
    /// Sidebar hidden; the main content takes the full width.
    pub collapsed: bool,
    /// Small-screen backdrop shown behind an expanded sidebar.
    pub overlay_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inputs accepted by [`reduce_sidebar`].
pub enum SidebarAction {
    /// Toggle button pressed.
    Toggle {
        /// Whether the viewport counts as small.
        small_screen: bool,
    },
    /// Overlay clicked.
    Collapse,
    /// Force the sidebar open.
    Expand,
    /// Window resized.
    Resize {
        /// Whether the viewport counts as small.
        small_screen: bool,
    },
}

/// Whether `width` is at or below the small-screen breakpoint.
pub fn is_small_screen(width: f64, max_width_px: u32) -> bool {
    width <= f64::from(max_width_px)
}

/// Applies a [`SidebarAction`].
pub fn reduce_sidebar(state: &mut SidebarState, action: SidebarAction) {
    match action {
        SidebarAction::Toggle { small_screen } => {
            state.collapsed = !state.collapsed;
            if small_screen {
                state.overlay_active = !state.collapsed;
            }
        }
        SidebarAction::Collapse => {
            state.collapsed = true;
            state.overlay_active = false;
        }
        SidebarAction::Expand => state.collapsed = false,
        SidebarAction::Resize { small_screen: true } => {
            reduce_sidebar(state, SidebarAction::Collapse);
        }
        SidebarAction::Resize { small_screen: false } => {
            state.overlay_active = false;
            reduce_sidebar(state, SidebarAction::Expand);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggle_on_small_screen_drives_the_overlay() {
        let mut state = SidebarState::default();

        reduce_sidebar(&mut state, SidebarAction::Toggle { small_screen: true });
        assert_eq!(
            state,
            SidebarState {
                collapsed: true,
                overlay_active: false
            }
        );

        reduce_sidebar(&mut state, SidebarAction::Toggle { small_screen: true });
        assert_eq!(
            state,
            SidebarState {
                collapsed: false,
                overlay_active: true
            }
        );
    }

    #[test]
    fn toggle_on_wide_screen_leaves_the_overlay_alone() {
        let mut state = SidebarState {
            collapsed: true,
            overlay_active: false,
        };

        reduce_sidebar(&mut state, SidebarAction::Toggle { small_screen: false });

        assert!(!state.collapsed);
        assert!(!state.overlay_active);
    }

    #[test]
    fn overlay_click_collapses() {
        let mut state = SidebarState {
            collapsed: false,
            overlay_active: true,
        };

        reduce_sidebar(&mut state, SidebarAction::Collapse);

        assert_eq!(
            state,
            SidebarState {
                collapsed: true,
                overlay_active: false
            }
        );
    }

    #[test]
    fn resize_follows_the_breakpoint() {
        let mut state = SidebarState::default();

        reduce_sidebar(&mut state, SidebarAction::Resize { small_screen: true });
        assert!(state.collapsed);

        state.overlay_active = true;
        reduce_sidebar(&mut state, SidebarAction::Resize { small_screen: false });
        assert_eq!(state, SidebarState::default());

        assert!(is_small_screen(1000.0, 1000));
        assert!(!is_small_screen(1001.0, 1000));
    }
}
