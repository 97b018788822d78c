use std::ops::Deref;

use sqlx::SqlitePool;

mod admin;
mod login;
mod password;
mod profile;
mod register;

pub use admin::AdminUpdateInput;
pub use login::LoginInput;
pub use password::ChangePasswordInput;
pub use profile::ProfileInput;
pub use register::RegisterInput;

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Deref for Command {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
