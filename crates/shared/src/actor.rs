/// Who triggers a command
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub user_id: String,
    pub is_admin: bool,
}

impl Actor {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_admin: false,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_admin: true,
        }
    }

    /// Owners and admins may modify a resource
    pub fn can_modify(&self, owner_id: Option<&str>) -> bool {
        self.is_admin || owner_id == Some(self.user_id.as_str())
    }
}
