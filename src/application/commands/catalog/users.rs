// src/application/commands/catalog/users.rs
use super::{CatalogCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        record::RowFilter,
        schema::EntityKind,
        user::{NewUser, PasswordHash, User, UserId, UserUpdate, Username},
    },
};

pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

#[derive(Default)]
pub struct UpdateUserCommand {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

impl CatalogCommandService {
    pub async fn create_user(&self, command: CreateUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;
        self.ensure_username_available(&username, None).await?;

        let password_hash = self.hash_password(&command.password).await?;
        let mut new = NewUser::new(username, password_hash)
            .with_name(command.first_name, command.last_name);
        new.role = command.role;
        new.phone_number = command.phone_number;
        new.email = command.email;
        new.title = command.title;

        let user = self.create::<User>(new).await?;
        Ok(user.into())
    }

    pub async fn update_user(
        &self,
        id: i64,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        let id = UserId::new(id)?;
        let mut update = UserUpdate::new();
        if let Some(username) = command.username {
            let username = Username::new(username)?;
            self.ensure_username_available(&username, Some(id)).await?;
            update = update.with_username(username);
        }
        if let Some(password) = command.password {
            validate_password(&password)?;
            update = update.with_password_hash(self.hash_password(&password).await?);
        }
        update.role = command.role.map(Some);
        update.first_name = command.first_name.map(Some);
        update.last_name = command.last_name.map(Some);
        update.phone_number = command.phone_number.map(Some);
        update.email = command.email.map(Some);
        update.title = command.title.map(Some);

        let user = self.update::<User>(id.into(), update).await?;
        Ok(user.into())
    }

    pub async fn delete_user(&self, id: i64) -> ApplicationResult<()> {
        let id = UserId::new(id)?;
        self.delete::<User>(id.into()).await
    }

    async fn hash_password(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let hashed = self.password_hasher.hash(password).await?;
        Ok(PasswordHash::new(hashed)?)
    }

    async fn ensure_username_available(
        &self,
        username: &Username,
        owner: Option<UserId>,
    ) -> ApplicationResult<()> {
        let taken = self
            .sessions
            .store()
            .list(
                EntityKind::User,
                &RowFilter::eq("username", username.as_str()).into(),
            )
            .await?
            .into_iter()
            .any(|row| owner.is_none_or(|owner| owner.0 != row.id));
        if taken {
            return Err(ApplicationError::conflict("username already exists"));
        }
        Ok(())
    }
}
