//! Typed ID definitions for all portal entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (members and office holders).
pub struct User;

/// Marker type for Loan entities.
pub struct Loan;

/// Marker type for Contribution entities.
pub struct Contribution;

/// Marker type for Welfare disbursements.
pub struct Welfare;

/// Marker type for MeetingNote entities (minutes).
pub struct MeetingNote;

/// Marker type for Announcement entities.
pub struct Announcement;

/// Marker type for Notification entities.
pub struct Notification;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;
pub type LoanId = Id<Loan>;
pub type ContributionId = Id<Contribution>;
pub type WelfareId = Id<Welfare>;
pub type MeetingNoteId = Id<MeetingNote>;
pub type AnnouncementId = Id<Announcement>;
pub type NotificationId = Id<Notification>;
