// Sidebar navigation state machine
//
// One place for section switching and its side effects. The effects are
// declared per transition rather than scattered across click handlers: every
// transition closes the mobile sidebar overlay, and entering the admin panel
// resizes its map (the widget cannot measure itself while hidden).

use crate::application::session::DashboardSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Monitoring,
    AdminPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    CloseSidebarOverlay,
    InvalidateAdminMapSize,
}

#[derive(Debug)]
pub struct NavigationState {
    current: Section,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: Section::Monitoring,
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Switch sections and report the effects the caller must apply.
    pub fn navigate(&mut self, to: Section) -> Vec<TransitionEffect> {
        self.current = to;

        let mut effects = vec![TransitionEffect::CloseSidebarOverlay];
        if to == Section::AdminPanel {
            effects.push(TransitionEffect::InvalidateAdminMapSize);
        }
        effects
    }
}

/// Apply a navigation against the session: run the transition effects and
/// keep the visibility flag (which gates the background metadata refresh)
/// in sync.
pub fn navigate(session: &mut DashboardSession, nav: &mut NavigationState, to: Section) {
    for effect in nav.navigate(to) {
        match effect {
            TransitionEffect::CloseSidebarOverlay => {
                tracing::debug!("closing sidebar overlay");
            }
            TransitionEffect::InvalidateAdminMapSize => session.admin.invalidate_map(),
        }
    }
    session.set_admin_visible(to == Section::AdminPanel);
}
