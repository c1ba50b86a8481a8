use std::sync::Arc;

use portal_core::model::{
    Notification, NotificationKind, PrayerRequest, PrayerRequestId, Profile, Testimony,
    TestimonyId,
};
use storage::repository::{
    MemberRepository, NewNotificationRecord, NotificationRepository, PrayerRequestRepository,
    SermonRepository, TestimonyRepository,
};

use crate::Clock;
use crate::error::ModerationError;

/// Default size of the moderation queues.
const QUEUE_LIMIT: u32 = 100;

/// Counters for the admin overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewStats {
    pub members: u64,
    pub sermons: u64,
    pub pending_testimonies: u64,
    pub prayer_requests: u64,
}

/// The admin back-office: overview stats, approval queues and the
/// activity feed.
///
/// Every operation takes the acting profile and refuses non-admins; the
/// rendering layer hides these screens, but the check belongs here.
#[derive(Clone)]
pub struct ModerationService {
    clock: Clock,
    members: Arc<dyn MemberRepository>,
    sermons: Arc<dyn SermonRepository>,
    testimonies: Arc<dyn TestimonyRepository>,
    prayers: Arc<dyn PrayerRequestRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl ModerationService {
    #[must_use]
    pub fn new(
        clock: Clock,
        members: Arc<dyn MemberRepository>,
        sermons: Arc<dyn SermonRepository>,
        testimonies: Arc<dyn TestimonyRepository>,
        prayers: Arc<dyn PrayerRequestRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            clock,
            members,
            sermons,
            testimonies,
            prayers,
            notifications,
        }
    }

    fn require_admin(actor: &Profile) -> Result<(), ModerationError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(ModerationError::NotAuthorized(actor.id().to_string()))
        }
    }

    /// Counters for the overview cards.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if repository access fails.
    pub async fn overview(&self, actor: &Profile) -> Result<OverviewStats, ModerationError> {
        Self::require_admin(actor)?;
        Ok(OverviewStats {
            members: self.members.count_profiles().await?,
            sermons: self.sermons.count_sermons().await?,
            pending_testimonies: self.testimonies.count_pending_testimonies().await?,
            prayer_requests: self.prayers.count_requests().await?,
        })
    }

    /// Testimonies awaiting approval, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if repository access fails.
    pub async fn pending_testimonies(
        &self,
        actor: &Profile,
    ) -> Result<Vec<Testimony>, ModerationError> {
        Self::require_admin(actor)?;
        let testimonies = self.testimonies.list_pending(QUEUE_LIMIT).await?;
        Ok(testimonies)
    }

    /// Approve a testimony and announce it on the community feed.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins,
    /// `ModerationError::Storage` if the testimony does not exist or either
    /// write fails.
    pub async fn approve_testimony(
        &self,
        actor: &Profile,
        id: TestimonyId,
    ) -> Result<(), ModerationError> {
        Self::require_admin(actor)?;
        self.testimonies.set_testimony_approved(id).await?;
        self.notifications
            .append_notification(NewNotificationRecord {
                title: "New Testimony Shared".into(),
                message: "A new testimony is live on the feed.".into(),
                kind: NotificationKind::Success,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(testimony = %id, moderator = %actor.id(), "testimony approved");
        Ok(())
    }

    /// Reject a testimony, removing it entirely.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if it does not exist or deletion fails.
    pub async fn reject_testimony(
        &self,
        actor: &Profile,
        id: TestimonyId,
    ) -> Result<(), ModerationError> {
        Self::require_admin(actor)?;
        self.testimonies.delete_testimony(id).await?;
        tracing::info!(testimony = %id, moderator = %actor.id(), "testimony rejected");
        Ok(())
    }

    /// Prayer requests awaiting approval, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if repository access fails.
    pub async fn pending_prayers(
        &self,
        actor: &Profile,
    ) -> Result<Vec<PrayerRequest>, ModerationError> {
        Self::require_admin(actor)?;
        let requests = self.prayers.list_pending_requests(QUEUE_LIMIT).await?;
        Ok(requests)
    }

    /// Approve a prayer request for the wall.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if it does not exist or the update fails.
    pub async fn approve_prayer(
        &self,
        actor: &Profile,
        id: PrayerRequestId,
    ) -> Result<(), ModerationError> {
        Self::require_admin(actor)?;
        self.prayers.set_request_approved(id).await?;
        tracing::info!(request = %id, moderator = %actor.id(), "prayer request approved");
        Ok(())
    }

    /// Reject a prayer request, removing it entirely.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if it does not exist or deletion fails.
    pub async fn reject_prayer(
        &self,
        actor: &Profile,
        id: PrayerRequestId,
    ) -> Result<(), ModerationError> {
        Self::require_admin(actor)?;
        self.prayers.delete_request(id).await?;
        tracing::info!(request = %id, moderator = %actor.id(), "prayer request rejected");
        Ok(())
    }

    /// Recent notifications, doubling as the dashboard activity feed.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotAuthorized` for non-admins and
    /// `ModerationError::Storage` if repository access fails.
    pub async fn recent_activity(
        &self,
        actor: &Profile,
        limit: u32,
    ) -> Result<Vec<Notification>, ModerationError> {
        Self::require_admin(actor)?;
        let notifications = self.notifications.list_recent_notifications(limit).await?;
        Ok(notifications)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{MemberId, Role};
    use portal_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, NewTestimonyRecord};

    fn profile(id: &str, role: Role) -> Profile {
        Profile::new(
            MemberId::new(id),
            format!("{id}@example.org"),
            "Someone",
            None,
            role,
            None,
            None,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    fn service(repo: &InMemoryRepository) -> ModerationService {
        ModerationService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    async fn submit_testimony(repo: &InMemoryRepository) -> TestimonyId {
        let testimony = Testimony::new(
            TestimonyId::new(1),
            MemberId::new("uid-1"),
            "Grace",
            "Healed after months of prayer.",
            false,
            fixed_now(),
        )
        .unwrap();
        repo.insert_testimony(NewTestimonyRecord::from_testimony(&testimony))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn non_admin_is_refused() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let member = profile("uid-1", Role::Member);

        let err = service.overview(&member).await.unwrap_err();
        assert!(matches!(err, ModerationError::NotAuthorized(_)));
        let err = service
            .approve_testimony(&member, TestimonyId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ModerationError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn approving_a_testimony_announces_it() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let admin = profile("uid-admin", Role::Admin);
        let id = submit_testimony(&repo).await;

        assert_eq!(service.pending_testimonies(&admin).await.unwrap().len(), 1);

        service.approve_testimony(&admin, id).await.unwrap();

        assert!(service.pending_testimonies(&admin).await.unwrap().is_empty());
        let activity = service.recent_activity(&admin, 5).await.unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].title(), "New Testimony Shared");
        assert_eq!(activity[0].kind(), NotificationKind::Success);
    }

    #[tokio::test]
    async fn overview_counts_pending_work() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let admin = profile("uid-admin", Role::Admin);
        repo.upsert_profile(&admin).await.unwrap();
        submit_testimony(&repo).await;

        let stats = service.overview(&admin).await.unwrap();
        assert_eq!(stats.members, 1);
        assert_eq!(stats.sermons, 0);
        assert_eq!(stats.pending_testimonies, 1);
        assert_eq!(stats.prayer_requests, 0);
    }

    #[tokio::test]
    async fn rejecting_deletes_without_announcing() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let admin = profile("uid-admin", Role::Admin);
        let id = submit_testimony(&repo).await;

        service.reject_testimony(&admin, id).await.unwrap();

        assert!(service.pending_testimonies(&admin).await.unwrap().is_empty());
        assert!(service.recent_activity(&admin, 5).await.unwrap().is_empty());
    }
}
