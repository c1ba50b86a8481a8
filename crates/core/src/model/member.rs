use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::model::content::MediaUrl;
use crate::model::ids::MemberId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("display name cannot be empty")]
    EmptyDisplayName,

    #[error("invalid role value: {0}")]
    InvalidRole(String),
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Access level of a member within the portal.
///
/// Admins see the back-office: moderation queues, content managers and the
/// member directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// Parse the stored string form.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidRole` for anything other than
    /// `"member"` or `"admin"`.
    pub fn parse(s: &str) -> Result<Self, ProfileError> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(ProfileError::InvalidRole(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }

    /// The opposite role, used by the directory role toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Role::Member => Role::Admin,
            Role::Admin => Role::Member,
        }
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// A member profile, keyed by the auth provider's subject id.
///
/// Created on first sign-in and editable from the profile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: MemberId,
    email: String,
    display_name: String,
    photo_url: Option<MediaUrl>,
    role: Role,
    phone_number: Option<String>,
    hostel_name: Option<String>,
    date_of_birth: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if email or display name are empty after
    /// trimming.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MemberId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        photo_url: Option<MediaUrl>,
        role: Role,
        phone_number: Option<String>,
        hostel_name: Option<String>,
        date_of_birth: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        let display_name = display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(ProfileError::EmptyDisplayName);
        }

        Ok(Self {
            id,
            email,
            display_name,
            photo_url,
            role,
            phone_number: normalize(phone_number),
            hostel_name: normalize(hostel_name),
            date_of_birth,
            created_at,
        })
    }

    /// Apply an edit from the profile screen.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyDisplayName` if the new display name is
    /// empty after trimming.
    pub fn apply_update(&mut self, update: ProfileUpdate) -> Result<(), ProfileError> {
        let display_name = update.display_name.trim().to_owned();
        if display_name.is_empty() {
            return Err(ProfileError::EmptyDisplayName);
        }
        self.display_name = display_name;
        self.phone_number = normalize(update.phone_number);
        self.hostel_name = normalize(update.hostel_name);
        self.date_of_birth = update.date_of_birth;
        Ok(())
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Copy of this profile with the given role, used by the role toggle.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.set_role(role);
        self
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &MemberId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn photo_url(&self) -> Option<&MediaUrl> {
        self.photo_url.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    #[must_use]
    pub fn hostel_name(&self) -> Option<&str> {
        self.hostel_name.as_deref()
    }

    #[must_use]
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Editable subset of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub phone_number: Option<String>,
    pub hostel_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn build_profile() -> Profile {
        Profile::new(
            MemberId::new("uid-1"),
            "grace@example.org",
            "Grace A.",
            None,
            Role::Member,
            None,
            None,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn profile_rejects_empty_display_name() {
        let err = Profile::new(
            MemberId::new("uid-1"),
            "grace@example.org",
            "   ",
            None,
            Role::Member,
            None,
            None,
            None,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, ProfileError::EmptyDisplayName);
    }

    #[test]
    fn profile_normalizes_optional_fields() {
        let profile = Profile::new(
            MemberId::new("uid-1"),
            " grace@example.org ",
            "Grace",
            None,
            Role::Member,
            Some("  ".into()),
            Some(" Bethel Hall ".into()),
            None,
            fixed_now(),
        )
        .unwrap();

        assert_eq!(profile.email(), "grace@example.org");
        assert_eq!(profile.phone_number(), None);
        assert_eq!(profile.hostel_name(), Some("Bethel Hall"));
    }

    #[test]
    fn role_round_trips_through_storage_form() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse(Role::Member.as_str()).unwrap(), Role::Member);
        assert!(Role::parse("owner").is_err());
    }

    #[test]
    fn role_toggle_flips_between_member_and_admin() {
        assert_eq!(Role::Member.toggled(), Role::Admin);
        assert_eq!(Role::Admin.toggled(), Role::Member);
    }

    #[test]
    fn apply_update_edits_editable_fields_only() {
        let mut profile = build_profile();
        profile
            .apply_update(ProfileUpdate {
                display_name: "Grace Adeyemi".into(),
                phone_number: Some("+234 800 000 0000".into()),
                hostel_name: None,
                date_of_birth: NaiveDate::from_ymd_opt(2001, 5, 14),
            })
            .unwrap();

        assert_eq!(profile.display_name(), "Grace Adeyemi");
        assert_eq!(profile.phone_number(), Some("+234 800 000 0000"));
        assert_eq!(profile.email(), "grace@example.org");
        assert_eq!(profile.role(), Role::Member);
    }
}
