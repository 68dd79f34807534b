use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::preference::Theme;
use crate::storage::{KeyValueStorage, THEME_KEY};

#[derive(Clone)]
pub struct PreferenceService {
    storage: Arc<dyn KeyValueStorage>,
    default_theme: Theme,
}

impl PreferenceService {
    pub fn new(storage: Arc<dyn KeyValueStorage>, default_theme: Theme) -> Self {
        Self {
            storage,
            default_theme,
        }
    }

    /// Saved theme, or the default when none is saved or it cannot be read.
    pub fn theme(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unknown stored theme");
                self.default_theme
            }),
            Ok(None) => self.default_theme,
            Err(e) => {
                warn!(error = %e, "Could not read theme preference");
                self.default_theme
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme> {
        self.storage.set(THEME_KEY, theme.as_str())?;
        info!(%theme, "Theme saved");
        Ok(theme)
    }

    pub fn toggle(&self) -> Result<Theme> {
        self.set_theme(self.theme().toggled())
    }

    /// Forgets the saved choice so the default applies again.
    pub fn reset(&self) -> Result<Theme> {
        self.storage.remove(THEME_KEY)?;
        Ok(self.default_theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_until_set() {
        let service = PreferenceService::new(Arc::new(MemoryStorage::new()), Theme::Dark);
        assert_eq!(service.theme(), Theme::Dark);

        service.set_theme(Theme::Light).unwrap();
        assert_eq!(service.theme(), Theme::Light);

        assert_eq!(service.reset().unwrap(), Theme::Dark);
        assert_eq!(service.theme(), Theme::Dark);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let service = PreferenceService::new(storage.clone(), Theme::Dark);

        assert_eq!(service.toggle().unwrap(), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(service.toggle().unwrap(), Theme::Dark);
    }

    #[test]
    fn unknown_stored_value_falls_back_to_default() {
        let storage = Arc::new(MemoryStorage::with_entry(THEME_KEY, "sepia"));
        let service = PreferenceService::new(storage, Theme::Light);
        assert_eq!(service.theme(), Theme::Light);
    }
}
