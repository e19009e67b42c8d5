//! The event lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use eventide_auth::{AccessPolicy, OwnerScope};
use eventide_core::{
    Actor, Event, EventId, EventInput, EventView, ServiceError, ServiceResult,
};
use eventide_storage::{CategoryCatalog, EventQuery, EventStore};

use crate::lookup::IdentityLookup;
use crate::search::{Paging, SearchRequest, SearchResults};
use crate::validate::validate_event;

/// Message for operations addressing an unknown event.
pub const NO_MATCHING_RECORD: &str = "No matching record found";

/// Internal detail recorded when the owner cannot be confirmed.
pub const OWNER_NOT_CONFIRMED: &str = "User not found - cannot create event";

const INVALID_CATEGORY: &str = "Invalid Category Id";

/// Validates, authorizes, and persists events.
pub struct EventService {
    events: Arc<dyn EventStore>,
    categories: Arc<dyn CategoryCatalog>,
    lookup: Arc<dyn IdentityLookup>,
    paging: Paging,
}

impl EventService {
    /// Create the service with default paging limits.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventStore>,
        categories: Arc<dyn CategoryCatalog>,
        lookup: Arc<dyn IdentityLookup>,
    ) -> Self {
        Self {
            events,
            categories,
            lookup,
            paging: Paging::default(),
        }
    }

    /// Override the paging limits.
    #[must_use]
    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// Create an event.
    ///
    /// The owner named in `input` is confirmed through the identity lookup
    /// using the actor's bearer token; the actor need not be the owner.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] listing every field violation, or
    ///   `"Invalid Category Id"` for an unknown category
    /// - [`ServiceError::Unexpected`] if the owner cannot be confirmed or
    ///   storage fails
    pub async fn create(&self, actor: &Actor, input: EventInput) -> ServiceResult<EventView> {
        let errors = validate_event(&input, Utc::now());
        if !errors.is_empty() {
            tracing::warn!(actor = %actor, errors = ?errors, "event create rejected");
            return Err(ServiceError::Validation { errors });
        }

        if let Err(e) = self
            .lookup
            .get_user_by_id(input.owner_id, actor.bearer_token.as_deref())
            .await
        {
            tracing::error!(owner_id = %input.owner_id, error = %e, "owner confirmation failed");
            return Err(ServiceError::Unexpected(OWNER_NOT_CONFIRMED.to_owned()));
        }

        if !self.categories.exists(input.category_id).await? {
            tracing::warn!(category_id = %input.category_id, "event create rejected: unknown category");
            return Err(ServiceError::validation([INVALID_CATEGORY]));
        }

        let event = Event::from_input(input);
        let view = event.view();
        self.events.insert(event).await.map_err(|e| {
            tracing::error!(event_id = %view.id, error = %e, "failed to store event");
            ServiceError::from(e)
        })?;

        tracing::info!(event_id = %view.id, owner_id = %view.owner_id, "event created");
        Ok(view)
    }

    /// Read an event.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown id (checked before
    /// authorization), [`ServiceError::Forbidden`] if the actor is neither
    /// owner nor admin.
    pub async fn get(&self, actor: &Actor, id: EventId) -> ServiceResult<EventView> {
        let event = self.load_authorized(actor, id).await?;
        Ok(event.view())
    }

    /// Overwrite every mutable field of an event.
    ///
    /// The input replaces the stored record as given, including the owner.
    /// No field, category, or owner checks are applied.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown id (checked before
    /// authorization), [`ServiceError::Forbidden`] if the actor is neither
    /// owner nor admin.
    pub async fn update(
        &self,
        actor: &Actor,
        id: EventId,
        input: EventInput,
    ) -> ServiceResult<EventView> {
        let mut event = self.load_authorized(actor, id).await?;
        event.overwrite(input);
        let view = event.view();
        self.events.update(event).await?;

        tracing::info!(event_id = %id, actor = %actor, "event updated");
        Ok(view)
    }

    /// Remove an event.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown id (checked before
    /// authorization), [`ServiceError::Forbidden`] if the actor is neither
    /// owner nor admin.
    pub async fn delete(&self, actor: &Actor, id: EventId) -> ServiceResult<()> {
        self.load_authorized(actor, id).await?;
        self.events.delete(id).await?;

        tracing::info!(event_id = %id, actor = %actor, "event deleted");
        Ok(())
    }

    /// Search events visible to the actor.
    ///
    /// Non-admins are restricted to their own events before the query runs,
    /// so totals and pages never reflect anyone else's records.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] for out-of-range paging.
    pub async fn search(&self, actor: &Actor, request: SearchRequest) -> ServiceResult<SearchResults> {
        let (page, page_size) = request.resolve_paging(self.paging).map_err(|errors| {
            tracing::warn!(errors = ?errors, "event search rejected");
            ServiceError::Validation { errors }
        })?;

        let owner = match AccessPolicy::owner_scope(actor) {
            OwnerScope::All => None,
            OwnerScope::Owner(id) => Some(id),
            OwnerScope::Nothing => {
                return Ok(SearchResults {
                    total: 0,
                    page,
                    page_size,
                    items: Vec::new(),
                });
            },
        };

        let query = EventQuery {
            owner,
            from: request.from,
            to: request.to,
            location: request.location,
            page,
            page_size,
        };
        let found = self.events.query(&query).await?.map(|event| event.view());
        tracing::debug!(actor = %actor, total = found.total, "event search");

        Ok(SearchResults {
            total: found.total,
            page,
            page_size,
            items: found.items,
        })
    }

    async fn load_authorized(&self, actor: &Actor, id: EventId) -> ServiceResult<Event> {
        let Some(event) = self.events.find_by_id(id).await? else {
            tracing::warn!(event_id = %id, "no matching event");
            return Err(ServiceError::NotFound(NO_MATCHING_RECORD.to_owned()));
        };
        AccessPolicy::ensure(actor, event.owner_id)?;
        Ok(event)
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("paging", &self.paging)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LookupError, LookupResult};
    use chrono::Duration;
    use eventide_core::{CategoryId, Role, UserId, seeded_categories};
    use eventide_storage::{InMemoryCategoryCatalog, InMemoryEventStore};

    struct StaticLookup {
        known: Vec<UserId>,
    }

    #[async_trait::async_trait]
    impl IdentityLookup for StaticLookup {
        async fn get_user_by_id(&self, id: UserId, _token: Option<&str>) -> LookupResult<()> {
            if self.known.contains(&id) {
                Ok(())
            } else {
                Err(LookupError::Status { status: 404 })
            }
        }
    }

    struct Fixture {
        service: EventService,
        store: Arc<InMemoryEventStore>,
        alice: Actor,
        bob: Actor,
        admin: Actor,
    }

    fn fixture() -> Fixture {
        let alice = Actor::new(Some(UserId::generate()), "alice", Role::User);
        let bob = Actor::new(Some(UserId::generate()), "bob", Role::User);
        let admin = Actor::new(Some(UserId::generate()), "admin", Role::Admin);
        let known = [&alice, &bob, &admin]
            .iter()
            .filter_map(|a| a.user_id)
            .collect();

        let store = InMemoryEventStore::new().shared();
        let service = EventService::new(
            store.clone(),
            InMemoryCategoryCatalog::seeded().shared(),
            Arc::new(StaticLookup { known }),
        );
        Fixture {
            service,
            store,
            alice,
            bob,
            admin,
        }
    }

    fn category() -> CategoryId {
        seeded_categories()[0].id
    }

    fn input_for(actor: &Actor, title: &str, days_ahead: i64) -> EventInput {
        let start = Utc::now() + Duration::days(days_ahead);
        EventInput {
            title: title.to_owned(),
            location: "Office".to_owned(),
            start,
            end: start + Duration::hours(1),
            owner_id: actor.user_id.unwrap(),
            category_id: category(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let f = fixture();
        let created = f
            .service
            .create(&f.alice, input_for(&f.alice, "Standup", 1))
            .await
            .unwrap();

        let fetched = f.service.get(&f.alice, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(f.service.get(&f.admin, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_reports_every_violation() {
        let f = fixture();
        let mut input = input_for(&f.alice, "ab", 1);
        input.location = String::new();
        input.end = input.start;

        let err = f.service.create(&f.alice, input).await.unwrap_err();
        assert_eq!(
            err.violations(),
            [
                "Title must be at least 3 characters long",
                "Location is required",
                "End must be after Start"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_in_past_rejected() {
        let f = fixture();
        let err = f
            .service
            .create(&f.alice, input_for(&f.alice, "Retro", -1))
            .await
            .unwrap_err();
        assert!(err.violations().contains(&"Start date cannot be in the past".to_owned()));
    }

    #[tokio::test]
    async fn test_create_unknown_owner_aborts() {
        let f = fixture();
        let mut input = input_for(&f.alice, "Standup", 1);
        input.owner_id = UserId::generate();

        let err = f.service.create(&f.alice, input).await.unwrap_err();
        assert_eq!(err, ServiceError::Unexpected(OWNER_NOT_CONFIRMED.to_owned()));
        assert_eq!(err.public_message(), "Something went wrong!");
        let page = f.store.query(&EventQuery::new()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_create_unknown_category_rejected() {
        let f = fixture();
        let mut input = input_for(&f.alice, "Standup", 1);
        input.category_id = CategoryId::generate();

        let err = f.service.create(&f.alice, input).await.unwrap_err();
        assert_eq!(err, ServiceError::validation(["Invalid Category Id"]));
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found_before_authorization() {
        let f = fixture();
        let id = EventId::generate();
        let stranger = Actor::new(None, "ghost", Role::User);

        for actor in [&f.alice, &stranger] {
            let expected = ServiceError::NotFound(NO_MATCHING_RECORD.to_owned());
            assert_eq!(f.service.get(actor, id).await.unwrap_err(), expected);
            assert_eq!(
                f.service
                    .update(actor, id, EventInput::default())
                    .await
                    .unwrap_err(),
                expected
            );
            assert_eq!(f.service.delete(actor, id).await.unwrap_err(), expected);
        }
    }

    #[tokio::test]
    async fn test_non_owner_forbidden() {
        let f = fixture();
        let created = f
            .service
            .create(&f.alice, input_for(&f.alice, "Private", 1))
            .await
            .unwrap();

        assert!(matches!(
            f.service.get(&f.bob, created.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            f.service.delete(&f.bob, created.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(f.service.get(&f.alice, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_overwrites_everything() {
        let f = fixture();
        let created = f
            .service
            .create(&f.alice, input_for(&f.alice, "Original", 1))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                &f.admin,
                created.id,
                EventInput {
                    title: "Renamed".to_owned(),
                    ..EventInput::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert!(updated.location.is_empty());
        assert!(updated.owner_id.is_nil());

        // The owner was overwritten, so alice no longer has access.
        assert!(matches!(
            f.service.get(&f.alice, created.id).await,
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let f = fixture();
        let created = f
            .service
            .create(&f.alice, input_for(&f.alice, "Temp", 1))
            .await
            .unwrap();

        f.service.delete(&f.alice, created.id).await.unwrap();
        assert!(matches!(
            f.service.get(&f.alice, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_scopes_non_admins() {
        let f = fixture();
        for (actor, title) in [(&f.alice, "A1"), (&f.bob, "B1"), (&f.alice, "A2")] {
            f.service
                .create(actor, input_for(actor, title, 1))
                .await
                .unwrap();
        }

        let alice_view = f.service.search(&f.alice, SearchRequest::new()).await.unwrap();
        assert_eq!(alice_view.total, 2);
        assert!(alice_view
            .items
            .iter()
            .all(|e| Some(e.owner_id) == f.alice.user_id));

        let admin_view = f.service.search(&f.admin, SearchRequest::new()).await.unwrap();
        assert_eq!(admin_view.total, 3);
        assert_eq!(admin_view.page, 1);
        assert_eq!(admin_view.page_size, 10);

        let ghost = Actor::new(None, "ghost", Role::User);
        let ghost_view = f.service.search(&ghost, SearchRequest::new()).await.unwrap();
        assert_eq!(ghost_view.total, 0);
    }

    #[tokio::test]
    async fn test_search_orders_and_pages() {
        let f = fixture();
        for (title, days) in [("third", 3), ("first", 1), ("second", 2)] {
            f.service
                .create(&f.alice, input_for(&f.alice, title, days))
                .await
                .unwrap();
        }

        let page = f
            .service
            .search(&f.alice, SearchRequest::new().paged(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let titles: Vec<_> = page.items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_search_rejects_bad_paging() {
        let f = fixture();
        let err = f
            .service
            .search(&f.admin, SearchRequest::new().paged(0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}
