//! Database repositories.

mod blog;
mod contact;
mod course;
mod event;
mod forum;
mod moderation;
mod organisation;
mod profile;
mod project;
mod resource;

pub use blog::BlogRepository;
pub use contact::ContactRepository;
pub use course::CourseRepository;
pub use event::EventRepository;
pub use forum::ForumRepository;
pub use moderation::{ContentKind, Moderatable, ModerationRepository};
pub use organisation::{CountryStat, OrganisationRepository};
pub use profile::ProfileRepository;
pub use project::ProjectRepository;
pub use resource::ResourceRepository;
