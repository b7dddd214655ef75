//! # Theme Context

use super::foundation::{Foundation, ThemeContext};
use crate::domain::config::GameContextMode;
use crate::domain::errors::FoundationError;
use crate::domain::events::FoundationEvent;
use crate::domain::state::GameCycleOperation as Op;

impl Foundation {
    /// Activate a theme/payvar context. Allowed in Idle in any mode.
    pub fn activate_theme_context(
        &mut self,
        theme: impl Into<String>,
        payvar: impl Into<String>,
        mode: GameContextMode,
    ) -> Result<(), FoundationError> {
        self.begin(Op::ActivateThemeContext)?;
        let theme = theme.into();
        let payvar = payvar.into();
        self.context = ThemeContext {
            theme: Some(theme.clone()),
            payvar: Some(payvar.clone()),
            mode,
        };
        self.post(FoundationEvent::ThemeContextActivated {
            theme,
            payvar,
            mode,
        });
        Ok(())
    }

    /// Drop the active context; the mode becomes `None` until the next
    /// activation.
    pub fn inactivate_theme_context(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::InactivateThemeContext)?;
        self.context = ThemeContext {
            mode: GameContextMode::None,
            ..ThemeContext::default()
        };
        self.post(FoundationEvent::ThemeContextInactivated);
        Ok(())
    }
}
