//! Profile service.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome};
use civinet_db::entities::{profile, profile::UserRole};
use civinet_db::repositories::ProfileRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for updating the acting user's profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 128))]
    pub display_name: Option<String>,
    #[validate(length(min = 2, max = 16))]
    pub locale: Option<String>,
}

/// Profile service.
#[derive(Clone)]
pub struct ProfileService {
    repo: ProfileRepository,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(repo: ProfileRepository) -> Self {
        Self { repo }
    }

    /// The acting user's profile.
    pub async fn get_own(&self, actor: &Actor) -> AppResult<profile::Model> {
        self.repo.get_by_id(&actor.user_id).await
    }

    /// Any profile, back office only.
    pub async fn get(&self, actor: &Actor, user_id: &str) -> AppResult<profile::Model> {
        if !actor.can_moderate() && actor.user_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot read another member's profile".to_string(),
            ));
        }

        self.repo.get_by_id(user_id).await
    }

    /// Create the profile row on first login, a no-op when it already
    /// exists. The identity provider owns the user ID.
    pub async fn ensure_exists(&self, actor: &Actor, display_name: &str) -> AppResult<profile::Model> {
        if let Some(existing) = self.repo.find_by_id(&actor.user_id).await? {
            return Ok(existing);
        }

        let model = profile::ActiveModel {
            id: Set(actor.user_id.clone()),
            display_name: Set(display_name.to_string()),
            role: Set(UserRole::CsoRep),
            organisation_id: Set(None),
            locale: Set("en".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create(model).await
    }

    /// Update the acting user's own profile.
    pub async fn update_own(&self, actor: &Actor, input: UpdateProfileInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_update_own(actor, input).await)
    }

    /// Detach the acting user from their organisation.
    pub async fn leave_organisation(&self, actor: &Actor) -> MutationOutcome {
        MutationOutcome::from_result(async {
            let rows = self.repo.link_organisation(&actor.user_id, None).await?;
            if rows == 0 {
                return Err(AppError::NotFound(format!(
                    "Profile not found: {}",
                    actor.user_id
                )));
            }
            Ok(())
        }
        .await)
    }

    async fn try_update_own(&self, actor: &Actor, input: UpdateProfileInput) -> AppResult<()> {
        input.validate()?;

        let profile = self.repo.get_by_id(&actor.user_id).await?;
        let mut model: profile::ActiveModel = profile.into();

        if let Some(display_name) = input.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(locale) = input.locale {
            model.locale = Set(locale);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;
        Ok(())
    }
}
