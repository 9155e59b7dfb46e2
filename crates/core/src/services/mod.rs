//! Business-logic services.

pub mod affiliation;
pub mod blog;
pub mod contact;
pub mod course;
pub mod event;
pub mod forum;
pub mod moderation;
pub mod organisation;
pub mod profile;
pub mod project;
pub mod resource;

pub use affiliation::{AffiliationService, CreateRequestInput, RequestDecision, RespondInput};
pub use blog::{BlogService, CreatePostInput, UpdatePostInput};
pub use contact::{ContactService, SubmitContactInput};
pub use course::{CourseService, CreateCourseInput};
pub use event::{CreateEventInput, EventService};
pub use forum::{CreateReplyInput, CreateThreadInput, ForumService};
pub use moderation::{ContentKind, ModerateInput, ModerationService, ModerationStatus};
pub use organisation::{OrganisationService, RegisterOrganisationInput, UpdateOrganisationInput};
pub use profile::{ProfileService, UpdateProfileInput};
pub use project::{CreateProjectInput, ProjectService, UpdateProjectInput};
pub use resource::{CreateResourceInput, ResourceService};
