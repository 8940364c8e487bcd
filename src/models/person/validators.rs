use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants,
    error::{ServiceError, ServiceResult},
    models::person::{NormalizedInput, PersonDraft, PersonInput, PersonRecord},
    services::functional_patterns::{validation_rules, Validator},
};

static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(constants::PHONE_NUMBER_PATTERN).expect("phone number pattern is a valid regex")
});

/// Select the fields of a create request. Only `content` is required here; a
/// missing `number` is left for [`validate_person`] to reject.
pub fn normalize(input: PersonInput) -> ServiceResult<NormalizedInput> {
    let content = input
        .content
        .ok_or_else(|| ServiceError::missing_field("content").with_tag("person"))?;

    Ok(NormalizedInput {
        content,
        number: input.number,
    })
}

/// Overlay an update request on the stored record. Absent fields keep their
/// stored values.
pub fn normalize_update(input: PersonInput, current: &PersonRecord) -> NormalizedInput {
    NormalizedInput {
        content: input.content.unwrap_or_else(|| current.content.clone()),
        number: input.number.or_else(|| Some(current.number.clone())),
    }
}

/// Field rules every persisted person must satisfy, checked in order.
pub fn person_validator() -> Validator<NormalizedInput> {
    let number_format = Validator::new()
        .rule(|dto: &NormalizedInput| {
            validation_rules::matches(&PHONE_NUMBER, constants::MESSAGE_INVALID_PHONE_NUMBER)(
                dto.number.as_deref().unwrap_or_default(),
            )
        })
        .when(|dto: &NormalizedInput| dto.number.is_some());

    Validator::new()
        .rule(|dto: &NormalizedInput| {
            validation_rules::min_length("content", constants::CONTENT_MIN_LENGTH)(dto.content.as_str())
        })
        .rule(|dto: &NormalizedInput| {
            validation_rules::present::<String>(constants::MESSAGE_NUMBER_REQUIRED)(&dto.number)
        })
        .rule(move |dto: &NormalizedInput| number_format.validate(dto))
}

/// Validate a normalized input and turn it into a storable draft.
pub fn validate_person(input: NormalizedInput) -> ServiceResult<PersonDraft> {
    person_validator()
        .validate(&input)
        .map_err(|e| e.with_tag("person"))?;

    let NormalizedInput { content, number } = input;
    let number = number
        .ok_or_else(|| ServiceError::field_validation(constants::MESSAGE_NUMBER_REQUIRED))?;
    Ok(PersonDraft { content, number })
}
