pub mod content;
mod event;
mod gallery;
mod ids;
mod member;
mod notification;
mod prayer;
pub mod quiz;
mod sermon;
pub mod session;
mod testimony;

pub use content::{BodyText, MediaUrl, MediaUrlError, TextError};
pub use ids::{
    EventId, GalleryImageId, MemberId, NotificationId, PrayerRequestId, QuizId, SermonId,
    TestimonyId,
};

pub use event::{CalendarEvent, EventError, EventKind};
pub use gallery::{GalleryError, GalleryImage};
pub use member::{Profile, ProfileError, ProfileUpdate, Role};
pub use notification::{Notification, NotificationError, NotificationKind};
pub use prayer::{PrayerError, PrayerRequest};
pub use quiz::{Difficulty, Quiz, QuizError, QuizQuestion};
pub use sermon::{Sermon, SermonError};
pub use session::{AnswerFeedback, QuizResult, QuizSession, QuizSessionError, ResultTier, SessionProgress};
pub use testimony::{Testimony, TestimonyError};
