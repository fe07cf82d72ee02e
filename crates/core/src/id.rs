//! Strongly-typed identifiers used across the admin surface.
//!
//! The auth backend owns these values; on this side they are opaque strings
//! that are only checked for emptiness (and an `@` for emails).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Email address identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

/// Identifier of a login session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

/// Identifier of a pending invite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = ClientError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                <$t>::parse(value)
            }
        }

        impl FromStr for $t {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$t>::parse(s.to_string())
            }
        }

        impl $t {
            fn check_non_empty(value: &str) -> Result<(), ClientError> {
                if value.trim().is_empty() {
                    Err(ClientError::invalid_request(concat!($name, " must not be empty")))
                } else {
                    Ok(())
                }
            }
        }
    };
}

impl_string_newtype!(Email, "email");
impl_string_newtype!(SessionId, "session id");
impl_string_newtype!(InviteId, "invite id");

impl Email {
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientError> {
        let value = value.into();
        Self::check_non_empty(&value)?;
        if !value.contains('@') {
            return Err(ClientError::invalid_request(format!(
                "'{value}' is not an email address"
            )));
        }
        Ok(Self(value))
    }
}

impl SessionId {
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientError> {
        let value = value.into();
        Self::check_non_empty(&value)?;
        Ok(Self(value))
    }
}

impl InviteId {
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientError> {
        let value = value.into();
        Self::check_non_empty(&value)?;
        Ok(Self(value))
    }
}
