// src/domain/user/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::UserId;
use crate::domain::record::{EntityRecord, Row};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use crate::domain::user::value_objects::{PasswordHash, Username};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

impl NewUser {
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self {
            username,
            password_hash,
            role: None,
            first_name: None,
            last_name: None,
            phone_number: None,
            email: None,
            title: None,
        }
    }

    pub fn with_role(mut self, role: i64) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<Username>,
    pub password_hash: Option<PasswordHash>,
    pub role: Option<Option<i64>>,
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub title: Option<Option<String>>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub fn with_role(mut self, role: Option<i64>) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_first_name(mut self, first_name: Option<String>) -> Self {
        self.first_name = Some(first_name);
        self
    }

    pub fn with_last_name(mut self, last_name: Option<String>) -> Self {
        self.last_name = Some(last_name);
        self
    }

    pub fn with_phone_number(mut self, phone_number: Option<String>) -> Self {
        self.phone_number = Some(phone_number);
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = Some(title);
        self
    }
}

impl EntityRecord for User {
    const KIND: EntityKind = EntityKind::User;
    type New = NewUser;
    type Update = UserUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: UserId(row.id),
            username: Username::new(fields.required_text("username")?)?,
            password_hash: PasswordHash::new(fields.required_text("password_hash")?)?,
            role: fields.integer("role")?,
            first_name: fields.text("first_name")?,
            last_name: fields.text("last_name")?,
            phone_number: fields.text("phone_number")?,
            email: fields.text("email")?,
            title: fields.text("title")?,
        })
    }

    fn new_fields(new: &NewUser) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("username", new.username.as_str())
            .with("password_hash", new.password_hash.as_str())
            .with("role", new.role)
            .with("first_name", new.first_name.clone())
            .with("last_name", new.last_name.clone())
            .with("phone_number", new.phone_number.clone())
            .with("email", new.email.clone())
            .with("title", new.title.clone())
    }

    fn assignments(update: &UserUpdate) -> FieldSnapshot {
        let mut fields = FieldSnapshot::new();
        if let Some(username) = &update.username {
            fields.set("username", username.as_str());
        }
        if let Some(password_hash) = &update.password_hash {
            fields.set("password_hash", password_hash.as_str());
        }
        if let Some(role) = update.role {
            fields.set("role", role);
        }
        for (name, value) in [
            ("first_name", &update.first_name),
            ("last_name", &update.last_name),
            ("phone_number", &update.phone_number),
            ("email", &update.email),
            ("title", &update.title),
        ] {
            if let Some(value) = value {
                fields.set(name, value.clone());
            }
        }
        fields
    }
}
