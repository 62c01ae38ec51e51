use crate::domain::traits::KeyboardButton;

/// Outbound reply: plain text plus optional inline keyboard rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<KeyboardButton>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Append a row of buttons
    pub fn with_row(mut self, row: Vec<KeyboardButton>) -> Self {
        self.buttons.push(row);
        self
    }

    pub fn has_keyboard(&self) -> bool {
        self.buttons.iter().any(|row| !row.is_empty())
    }
}
