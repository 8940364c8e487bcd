//! Service functions for phonebook operations
//!
//! Each operation maps one request onto the person store. Mutations run the
//! pure field validator first and only reach the store with a valid draft, so
//! a rejected payload (400) is never confused with a store fault (500).

use log::{debug, info};

use crate::{
    error::{ServiceError, ServiceResult},
    models::person::{validators, PersonId, PersonInput, PersonRecord},
    storage::PersonStore,
};

fn parse_id(raw_id: &str) -> ServiceResult<PersonId> {
    raw_id.parse::<PersonId>().map_err(|e| e.with_tag("person"))
}

/// Fetches every person record.
pub async fn find_all(store: &dyn PersonStore) -> ServiceResult<Vec<PersonRecord>> {
    let people = store.find_all().await?;
    debug!("find_all returned {} records", people.len());
    Ok(people)
}

/// Retrieve a person by id.
///
/// # Returns
/// `Err` with `MalformedId` for ids that are not storage keys, `NotFound` for
/// well-formed ids with no record.
pub async fn find_by_id(raw_id: &str, store: &dyn PersonStore) -> ServiceResult<PersonRecord> {
    let id = parse_id(raw_id)?;
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Person with id {} not found", id)))
}

/// Validates a create request and persists it.
pub async fn create_and_validate(
    input: PersonInput,
    store: &dyn PersonStore,
) -> ServiceResult<PersonRecord> {
    let normalized = validators::normalize(input)?;
    let draft = validators::validate_person(normalized)?;

    let created = store
        .insert(draft)
        .await
        .map_err(|e| ServiceError::from(e).with_tag("person::create"))?;
    info!("Created person {}", created.id);
    Ok(created)
}

/// Overlays an update request on the stored record, re-validates the result
/// and replaces the record.
///
/// # Returns
/// `Err` with `NotFound` when no record has the id, whether it was absent
/// before the update or removed before the replace landed. Such requests
/// answer 404 rather than a `null` body.
pub async fn replace_by_id(
    raw_id: &str,
    input: PersonInput,
    store: &dyn PersonStore,
) -> ServiceResult<PersonRecord> {
    let id = parse_id(raw_id)?;
    let current = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Person with id {} not found", id)))?;

    let normalized = validators::normalize_update(input, &current);
    let draft = validators::validate_person(normalized)?;

    let updated = store
        .replace(id, draft)
        .await
        .map_err(|e| ServiceError::from(e).with_tag("person::update"))?
        .ok_or_else(|| ServiceError::not_found(format!("Person with id {} was removed", id)))?;
    info!("Updated person {}", id);
    Ok(updated)
}

/// Deletes a person. Absent ids are not an error.
pub async fn delete_by_id(raw_id: &str, store: &dyn PersonStore) -> ServiceResult<()> {
    let id = parse_id(raw_id)?;
    if store.delete(id).await? {
        info!("Deleted person {}", id);
    } else {
        debug!("Delete of absent person {} ignored", id);
    }
    Ok(())
}

pub async fn count(store: &dyn PersonStore) -> ServiceResult<usize> {
    Ok(store.count().await?)
}
