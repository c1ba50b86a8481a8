use std::sync::Arc;

use portal_core::model::{MediaUrl, MemberId, Profile, ProfileUpdate, Role};
use storage::repository::MemberRepository;

use crate::Clock;
use crate::error::DirectoryError;

/// Default number of profiles fetched for the member directory.
const DIRECTORY_LIMIT: u32 = 500;

/// Orchestrates member profiles: first-sign-in bootstrap, edits, the
/// directory and the role toggle.
///
/// Authentication itself happens in an external provider; this service
/// only consumes the identity it hands back.
#[derive(Clone)]
pub struct DirectoryService {
    clock: Clock,
    members: Arc<dyn MemberRepository>,
    bootstrap_admin_email: Option<String>,
}

impl DirectoryService {
    #[must_use]
    pub fn new(clock: Clock, members: Arc<dyn MemberRepository>) -> Self {
        Self {
            clock,
            members,
            bootstrap_admin_email: None,
        }
    }

    /// Grant the admin role to the profile created for this email, so a
    /// fresh deployment has one admin without manual intervention.
    #[must_use]
    pub fn with_bootstrap_admin(mut self, email: impl Into<String>) -> Self {
        self.bootstrap_admin_email = Some(email.into());
        self
    }

    /// Fetch the profile for a signed-in member, creating it on first
    /// sign-in from the identity the auth provider supplied.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Profile` for invalid identity fields,
    /// `DirectoryError::Media` for an invalid photo URL, and
    /// `DirectoryError::Storage` if persistence fails.
    pub async fn ensure_profile(
        &self,
        id: MemberId,
        email: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<Profile, DirectoryError> {
        if let Some(existing) = self.members.get_profile(&id).await? {
            return Ok(existing);
        }

        let role = match &self.bootstrap_admin_email {
            Some(admin_email) if admin_email.eq_ignore_ascii_case(email.trim()) => Role::Admin,
            _ => Role::Member,
        };
        let photo_url = photo_url.map(MediaUrl::parse).transpose()?;
        let profile = Profile::new(
            id,
            email,
            display_name,
            photo_url,
            role,
            None,
            None,
            None,
            self.clock.now(),
        )?;
        self.members.upsert_profile(&profile).await?;
        tracing::info!(member = %profile.id(), role = profile.role().as_str(), "profile created");
        Ok(profile)
    }

    /// Look up a profile without creating it.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Storage` if repository access fails.
    pub async fn get_profile(&self, id: &MemberId) -> Result<Option<Profile>, DirectoryError> {
        let profile = self.members.get_profile(id).await?;
        Ok(profile)
    }

    /// Apply an edit from the profile screen and persist it.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::UnknownMember` if no profile exists,
    /// `DirectoryError::Profile` for invalid edits, and
    /// `DirectoryError::Storage` if persistence fails.
    pub async fn update_profile(
        &self,
        id: &MemberId,
        update: ProfileUpdate,
    ) -> Result<Profile, DirectoryError> {
        let mut profile = self
            .members
            .get_profile(id)
            .await?
            .ok_or_else(|| DirectoryError::UnknownMember(id.to_string()))?;
        profile.apply_update(update)?;
        self.members.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// The member directory, oldest profiles first.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Storage` if repository access fails.
    pub async fn members(&self) -> Result<Vec<Profile>, DirectoryError> {
        let profiles = self.members.list_profiles(DIRECTORY_LIMIT).await?;
        Ok(profiles)
    }

    /// Flip a member between `Member` and `Admin`, returning the new role.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::UnknownMember` if no profile exists and
    /// `DirectoryError::Storage` if the update fails.
    pub async fn toggle_role(&self, id: &MemberId) -> Result<Role, DirectoryError> {
        let profile = self
            .members
            .get_profile(id)
            .await?
            .ok_or_else(|| DirectoryError::UnknownMember(id.to_string()))?;
        let role = profile.role().toggled();
        self.members.set_role(id, role).await?;
        tracing::info!(member = %id, role = role.as_str(), "role toggled");
        Ok(role)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> DirectoryService {
        DirectoryService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
            .with_bootstrap_admin("pastor@example.org")
    }

    #[tokio::test]
    async fn first_sign_in_creates_a_member_profile() {
        let service = service();
        let profile = service
            .ensure_profile(MemberId::new("uid-1"), "grace@example.org", "Grace", None)
            .await
            .unwrap();
        assert_eq!(profile.role(), Role::Member);

        // Second sign-in returns the stored profile untouched.
        let again = service
            .ensure_profile(MemberId::new("uid-1"), "changed@example.org", "Changed", None)
            .await
            .unwrap();
        assert_eq!(again.email(), "grace@example.org");
    }

    #[tokio::test]
    async fn bootstrap_admin_email_gets_admin_role() {
        let service = service();
        let profile = service
            .ensure_profile(
                MemberId::new("uid-admin"),
                "Pastor@Example.org",
                "Pastor",
                None,
            )
            .await
            .unwrap();
        assert_eq!(profile.role(), Role::Admin);
    }

    #[tokio::test]
    async fn toggle_role_flips_and_persists() {
        let service = service();
        let id = MemberId::new("uid-1");
        service
            .ensure_profile(id.clone(), "grace@example.org", "Grace", None)
            .await
            .unwrap();

        assert_eq!(service.toggle_role(&id).await.unwrap(), Role::Admin);
        assert_eq!(service.toggle_role(&id).await.unwrap(), Role::Member);

        let err = service
            .toggle_role(&MemberId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::UnknownMember(_)));
    }

    #[tokio::test]
    async fn update_profile_round_trips() {
        let service = service();
        let id = MemberId::new("uid-1");
        service
            .ensure_profile(id.clone(), "grace@example.org", "Grace", None)
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &id,
                ProfileUpdate {
                    display_name: "Grace Adeyemi".into(),
                    phone_number: Some("+234 800 000 0000".into()),
                    hostel_name: Some("Bethel Hall".into()),
                    date_of_birth: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name(), "Grace Adeyemi");

        let stored = service.get_profile(&id).await.unwrap().unwrap();
        assert_eq!(stored.hostel_name(), Some("Bethel Hall"));
    }
}
