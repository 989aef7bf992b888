use serde::{Deserialize, Serialize};
use std::fmt;
use ticketry_canonical::{Bytes32, Identity};

/// Role held by an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Self-registered attendee.
    User,
    /// Organizer registered by the administrator.
    Promoter,
    /// The registry administrator, fixed at creation.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "User",
            Role::Promoter => "Promoter",
            Role::Admin => "Admin",
        })
    }
}

/// Registered identity. Written once, never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Owner of the record.
    pub identity: Identity,
    /// Display name.
    pub display_name: Bytes32,
    /// Age in years (users only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Contact email.
    pub email: Bytes32,
    /// Contact phone.
    pub phone: String,
    /// Content hash of the profile photo (users only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_hash: Option<String>,
    /// Public website (promoters only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Content hash of the enrolled voiceprint.
    pub voiceprint_hash: String,
    /// Content hash of the enrolled faceprint.
    pub faceprint_hash: String,
    /// Role assigned at registration.
    pub role: Role,
    /// Number of logins consumed so far.
    pub nonce: u64,
}

impl UserRecord {
    /// Builds the record a self-registration creates.
    pub fn user(identity: Identity, user: NewUser) -> Self {
        Self {
            identity,
            display_name: user.display_name,
            age: Some(user.age),
            email: user.email,
            phone: user.phone,
            photo_hash: Some(user.photo_hash),
            website: None,
            voiceprint_hash: user.voiceprint_hash,
            faceprint_hash: user.faceprint_hash,
            role: Role::User,
            nonce: 0,
        }
    }

    /// Builds the record an administrator-issued promoter registration creates.
    pub fn promoter(promoter: NewPromoter) -> Self {
        Self {
            identity: promoter.identity,
            display_name: promoter.display_name,
            age: None,
            email: promoter.email,
            phone: promoter.phone,
            photo_hash: None,
            website: Some(promoter.website),
            voiceprint_hash: promoter.voiceprint_hash,
            faceprint_hash: promoter.faceprint_hash,
            role: Role::Promoter,
            nonce: 0,
        }
    }
}

/// Arguments of a self-registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub display_name: Bytes32,
    /// Age in years.
    pub age: u32,
    /// Contact email.
    pub email: Bytes32,
    /// Contact phone.
    pub phone: String,
    /// Content hash of the profile photo.
    pub photo_hash: String,
    /// Content hash of the enrolled voiceprint.
    pub voiceprint_hash: String,
    /// Content hash of the enrolled faceprint.
    pub faceprint_hash: String,
}

/// Arguments of a promoter registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPromoter {
    /// Identity being registered as a promoter.
    pub identity: Identity,
    /// Display name.
    pub display_name: Bytes32,
    /// Contact email.
    pub email: Bytes32,
    /// Contact phone.
    pub phone: String,
    /// Public website.
    pub website: String,
    /// Content hash of the enrolled voiceprint.
    pub voiceprint_hash: String,
    /// Content hash of the enrolled faceprint.
    pub faceprint_hash: String,
}

/// Catalogued venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    /// Unique key.
    pub name: Bytes32,
    /// Street address.
    pub address: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Contact phone.
    pub phone: String,
    /// Free-form description.
    pub description: String,
    /// Public website.
    pub website: String,
    /// Contact email.
    pub email: String,
    /// Liveness flag.
    pub exists: bool,
}

impl From<NewVenue> for VenueRecord {
    fn from(venue: NewVenue) -> Self {
        Self {
            name: venue.name,
            address: venue.address,
            capacity: venue.capacity,
            phone: venue.phone,
            description: venue.description,
            website: venue.website,
            email: venue.email,
            exists: true,
        }
    }
}

/// Arguments of a venue registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
    /// Unique key.
    pub name: Bytes32,
    /// Street address.
    pub address: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Contact phone.
    pub phone: String,
    /// Free-form description.
    pub description: String,
    /// Public website.
    pub website: String,
    /// Contact email.
    pub email: String,
}
