use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::preference::Theme;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ThemePayload {
    pub theme: Theme,
}

impl From<Theme> for ThemePayload {
    fn from(theme: Theme) -> Self {
        Self { theme }
    }
}
