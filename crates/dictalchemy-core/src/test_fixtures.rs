//! Hand-written entities for unit tests.
//!
//! These implement `Entity` manually (no derive) so the tests exercise the
//! raw contract, including computed properties and opaque relations.
use crate::{
    error::AttrError,
    model::{
        entity::EntityModel,
        field::{Cardinality, ColumnModel, FieldModel},
    },
    traits::{Dictable, Entity, EntitySchema, FieldValue, Related, RelatedItem, RelatedMut, assign},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};

pub fn names<const N: usize>(items: [&str; N]) -> BTreeSet<String> {
    items.into_iter().map(ToString::to_string).collect()
}

///
/// Profile
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub id: u64,
    pub bio: String,
}

impl EntitySchema for Profile {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "test_fixtures::Profile",
        entity_name: "Profile",
        fields: &[
            FieldModel::column(
                "id",
                &[ColumnModel {
                    name: "id",
                    primary_key: true,
                }],
            ),
            FieldModel::column(
                "bio",
                &[ColumnModel {
                    name: "bio",
                    primary_key: false,
                }],
            ),
        ],
    };
}

impl Entity for Profile {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            "bio" => Some(self.bio.to_value()),
            _ => None,
        }
    }

    fn set_attr(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        match name {
            "id" => assign(&mut self.id, value),
            "bio" => assign(&mut self.bio, value),
            _ => Err(AttrError::Unknown),
        }
    }
}

impl Dictable for Profile {}

///
/// Session
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub id: u64,
    pub token: String,
}

impl EntitySchema for Session {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "test_fixtures::Session",
        entity_name: "Session",
        fields: &[
            FieldModel::column(
                "id",
                &[ColumnModel {
                    name: "id",
                    primary_key: true,
                }],
            ),
            FieldModel::column(
                "token",
                &[ColumnModel {
                    name: "token",
                    primary_key: false,
                }],
            ),
        ],
    };
}

impl Entity for Session {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            "token" => Some(self.token.to_value()),
            _ => None,
        }
    }

    fn set_attr(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        match name {
            "id" => assign(&mut self.id, value),
            "token" => assign(&mut self.token, value),
            _ => Err(AttrError::Unknown),
        }
    }
}

impl Dictable for Session {}

///
/// Account
///
/// Exercises every field kind:
/// - `id` is stored in column `account_id` (primary key)
/// - `password` is a synonym for the underscore column `_password`
/// - `display` is computed, `nickname` is an unmapped attribute
/// - `labels` holds plain values, `legacy` is an opaque singular relation
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub _password: String,
    pub nickname: String,
    pub profile: Option<Profile>,
    pub sessions: Vec<Session>,
    pub labels: Vec<Value>,
    pub legacy: Option<String>,
}

impl EntitySchema for Account {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "test_fixtures::Account",
        entity_name: "Account",
        fields: &[
            FieldModel::column(
                "id",
                &[ColumnModel {
                    name: "account_id",
                    primary_key: true,
                }],
            ),
            FieldModel::column(
                "name",
                &[ColumnModel {
                    name: "name",
                    primary_key: false,
                }],
            ),
            FieldModel::column(
                "email",
                &[ColumnModel {
                    name: "email",
                    primary_key: false,
                }],
            ),
            FieldModel::column(
                "_password",
                &[ColumnModel {
                    name: "password",
                    primary_key: false,
                }],
            ),
            FieldModel::synonym("password", "_password"),
            FieldModel::relationship("profile", Cardinality::One),
            FieldModel::relationship("sessions", Cardinality::Many),
            FieldModel::relationship("labels", Cardinality::Many),
            FieldModel::relationship("legacy", Cardinality::One),
        ],
    };
}

impl Entity for Account {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "email" => Some(self.email.to_value()),
            "_password" | "password" => Some(self._password.to_value()),
            "nickname" => Some(self.nickname.to_value()),
            "display" => Some(Value::Text(format!("{} #{}", self.name, self.id))),
            _ => None,
        }
    }

    fn set_attr(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        match name {
            "id" => assign(&mut self.id, value),
            "name" => assign(&mut self.name, value),
            "email" => assign(&mut self.email, value),
            "_password" | "password" => assign(&mut self._password, value),
            "nickname" => assign(&mut self.nickname, value),
            _ => Err(AttrError::Unknown),
        }
    }

    fn related(&self, name: &str) -> Option<Related<'_>> {
        match name {
            "profile" => Some(
                self.profile
                    .as_ref()
                    .map_or(Related::Null, |profile| Related::One(profile)),
            ),
            "sessions" => Some(Related::many(&self.sessions)),
            "labels" => Some(Related::Many(
                self.labels.iter().cloned().map(RelatedItem::Value).collect(),
            )),
            "legacy" => Some(
                self.legacy
                    .as_ref()
                    .map_or(Related::Null, |legacy| Related::Value(legacy.to_value())),
            ),
            _ => None,
        }
    }

    fn related_mut(&mut self, name: &str) -> Option<RelatedMut<'_>> {
        match name {
            "profile" => Some(
                self.profile
                    .as_mut()
                    .map_or(RelatedMut::Null, |profile| RelatedMut::One(profile)),
            ),
            "sessions" | "labels" => Some(RelatedMut::Many),
            "legacy" => Some(RelatedMut::Value),
            _ => None,
        }
    }
}

impl Dictable for Account {}

///
/// Roster
/// Sessions keyed by their token.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    pub id: u64,
    pub by_token: BTreeMap<String, Session>,
}

impl EntitySchema for Roster {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "test_fixtures::Roster",
        entity_name: "Roster",
        fields: &[
            FieldModel::column(
                "id",
                &[ColumnModel {
                    name: "id",
                    primary_key: true,
                }],
            ),
            FieldModel::relationship("by_token", Cardinality::Many),
        ],
    };
}

impl Entity for Roster {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            _ => None,
        }
    }

    fn set_attr(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        match name {
            "id" => assign(&mut self.id, value),
            _ => Err(AttrError::Unknown),
        }
    }

    fn related(&self, name: &str) -> Option<Related<'_>> {
        match name {
            "by_token" => Some(Related::keyed(&self.by_token)),
            _ => None,
        }
    }

    fn related_mut(&mut self, name: &str) -> Option<RelatedMut<'_>> {
        match name {
            "by_token" => Some(RelatedMut::Many),
            _ => None,
        }
    }
}

impl Dictable for Roster {}

/// Two sessions keyed by token.
pub fn sample_roster() -> Roster {
    Roster {
        id: 5,
        by_token: sample_account()
            .sessions
            .into_iter()
            .map(|session| (session.token.clone(), session))
            .collect(),
    }
}

/// A populated account with one profile and two sessions.
pub fn sample_account() -> Account {
    Account {
        id: 1,
        name: "ada".to_string(),
        email: Some("ada@example.com".to_string()),
        _password: "hunter2".to_string(),
        nickname: "countess".to_string(),
        profile: Some(Profile {
            id: 10,
            bio: "mathematician".to_string(),
        }),
        sessions: vec![
            Session {
                id: 100,
                token: "first".to_string(),
            },
            Session {
                id: 101,
                token: "second".to_string(),
            },
        ],
        labels: Vec::new(),
        legacy: None,
    }
}
