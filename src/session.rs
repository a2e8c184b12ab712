#[derive(Debug, Clone, Default)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn clear(&mut self) {
        self.username = None;
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
