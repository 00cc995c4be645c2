use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

use super::{Stylesheet, Theme};
use crate::events::{Notification, NotificationSink};
use crate::settings::SettingsContext;

/// The layer that renders with the active stylesheet.
///
/// Implementations must swap in one step: the previous stylesheet stays
/// active until the new one replaces it, so there is never zero or two.
pub trait PresentationLayer: Send + Sync {
    /// Makes `stylesheet` the active one and returns the one it replaced.
    fn replace_stylesheet(&self, stylesheet: Stylesheet) -> Stylesheet;
}

/// Presentation layer holding a single active stylesheet reference.
#[derive(Debug, Default)]
pub struct StylesheetSlot {
    active: RwLock<Stylesheet>,
}

impl StylesheetSlot {
    pub fn new(initial: Stylesheet) -> Self {
        Self {
            active: RwLock::new(initial),
        }
    }

    pub fn active(&self) -> Stylesheet {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PresentationLayer for StylesheetSlot {
    fn replace_stylesheet(&self, stylesheet: Stylesheet) -> Stylesheet {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *active, stylesheet)
    }
}

/// Applies themes to the presentation layer and keeps the cached
/// current theme in the settings context in step.
///
/// Persisting the theme is the caller's job.
pub struct ThemeManager {
    presentation: Arc<dyn PresentationLayer>,
    context: SettingsContext,
    notifier: Arc<dyn NotificationSink>,
}

impl ThemeManager {
    pub fn new(
        presentation: Arc<dyn PresentationLayer>,
        context: SettingsContext,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            presentation,
            context,
            notifier,
        }
    }

    /// Applies a theme by its stored name; unknown names apply the light theme.
    pub fn apply_theme(&self, name: &str) -> Theme {
        self.apply(Theme::from_name(name))
    }

    pub fn apply(&self, theme: Theme) -> Theme {
        let previous = self.presentation.replace_stylesheet(theme.stylesheet());
        debug!(
            "Swapped stylesheet {} for {}",
            previous.href(),
            theme.stylesheet().href()
        );
        self.context.set_current_theme(theme);
        self.notifier.notify(Notification::ThemeApplied { theme });
        theme
    }

    pub fn current_theme(&self) -> Theme {
        self.context.current_theme()
    }
}
