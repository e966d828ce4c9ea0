//! The submission forms of venues, artists and shows, and their validation rules.
//!
//! A form is what the client submits, with loosely typed fields. Validating it returns either
//! the typed values ready to be written in the database, or the list of errors per field.

use std::{borrow::Cow, collections::BTreeMap, fmt};

use chrono::NaiveDateTime;
use entity::types::{Genre, UsState};
use sea_orm::Iterable as _;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::time;

const INVALID_CHOICE: &str = "Not a valid choice.";
const DUPLICATE_CHOICE: &str = "Duplicate choice.";
const INVALID_URL: &str = "Invalid URL.";
const INVALID_PHONE: &str = "Invalid phone number.";
const INVALID_DATETIME: &str = "Not a valid datetime value.";

/// The validation errors of a form, grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: &str) {
        let messages = self.0.entry(field.to_owned()).or_default();
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_owned());
        }
    }

    /// Returns true if no field has any error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the errors of the provided field.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error.message.as_deref().unwrap_or(error.code.as_ref());
                out.add(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = self.0.iter();
        if let Some((field, messages)) = fields.next() {
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        for (field, messages) in fields {
            write!(f, ", {field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn trimmed(value: &str) -> String {
    value.trim().to_owned()
}

/// Trims the value, and drops it if it is blank.
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

// A blank state is only reported as missing.
fn state_choice(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.parse::<UsState>().is_ok() {
        Ok(())
    } else {
        Err(error("choice", INVALID_CHOICE))
    }
}

fn parse_genres(values: &[String]) -> Result<Vec<Genre>, ValidationError> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        match value.trim().parse::<Genre>() {
            Ok(genre) if out.contains(&genre) => return Err(error("duplicate", DUPLICATE_CHOICE)),
            Ok(genre) => out.push(genre),
            Err(_) => return Err(error("choice", INVALID_CHOICE)),
        }
    }
    Ok(out)
}

fn genre_choices(values: &[String]) -> Result<(), ValidationError> {
    parse_genres(values).map(drop)
}

fn http_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(())
    } else {
        Err(error("url", INVALID_URL))
    }
}

fn phone_number(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+');
    if value.chars().all(allowed) && value.chars().any(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("phone", INVALID_PHONE))
    }
}

fn valid_start_time(value: &str) -> Result<(), ValidationError> {
    time::parse_start_time(value)
        .map(drop)
        .ok_or_else(|| error("datetime", INVALID_DATETIME))
}

/// Validates the fields, then parses the typed values of the state and genres.
fn check_choices<F: Validate>(
    form: &F,
    state: &str,
    genres: &[String],
) -> Result<(UsState, Vec<Genre>), FieldErrors> {
    form.validate()?;

    let mut errors = FieldErrors::default();
    let state = state
        .parse()
        .inspect_err(|_| errors.add("state", INVALID_CHOICE))
        .ok();
    let genres = parse_genres(genres)
        .inspect_err(|_| errors.add("genres", INVALID_CHOICE))
        .ok();

    match (state, genres) {
        (Some(state), Some(genres)) => Ok((state, genres)),
        _ => Err(errors),
    }
}

/// The form submitted to list or edit a venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct VenueForm {
    /// The name of the venue.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    /// The city of the venue.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub city: String,
    /// The two-letter postal code of the state.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = state_choice)
    )]
    pub state: String,
    /// The street address of the venue.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub address: String,
    /// The phone number.
    #[serde(default)]
    #[validate(custom(function = phone_number))]
    pub phone: Option<String>,
    /// The display names of the genres.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = genre_choices)
    )]
    pub genres: Vec<String>,
    /// The URL of the picture of the venue.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub image_link: Option<String>,
    /// The URL of the Facebook page of the venue.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub facebook_link: Option<String>,
    /// The URL of the website of the venue.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub website: Option<String>,
    /// Whether the venue is looking for artists.
    #[serde(default)]
    pub seeking_talent: bool,
    /// The text shown when the venue is looking for artists.
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// A venue form that passed the validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidVenue {
    /// The name of the venue.
    pub name: String,
    /// The city of the venue.
    pub city: String,
    /// The state of the venue.
    pub state: UsState,
    /// The street address of the venue.
    pub address: String,
    /// The phone number, if any.
    pub phone: Option<String>,
    /// The genres, in the submitted order.
    pub genres: Vec<Genre>,
    /// The URL of the picture of the venue, if any.
    pub image_link: Option<String>,
    /// The URL of the Facebook page, if any.
    pub facebook_link: Option<String>,
    /// The URL of the website, if any.
    pub website: Option<String>,
    /// Whether the venue is looking for artists.
    pub seeking_talent: bool,
    /// The text shown when the venue is looking for artists, if any.
    pub seeking_description: Option<String>,
}

impl VenueForm {
    fn normalized(&self) -> Self {
        Self {
            name: trimmed(&self.name),
            city: trimmed(&self.city),
            state: trimmed(&self.state),
            address: trimmed(&self.address),
            phone: optional(self.phone.as_deref()),
            genres: self.genres.clone(),
            image_link: optional(self.image_link.as_deref()),
            facebook_link: optional(self.facebook_link.as_deref()),
            website: optional(self.website.as_deref()),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description.as_deref()),
        }
    }

    /// Validates the form, and returns its typed values.
    pub fn to_valid(&self) -> Result<ValidVenue, FieldErrors> {
        let form = self.normalized();
        let (state, genres) = check_choices(&form, &form.state, &form.genres)?;

        Ok(ValidVenue {
            name: form.name,
            city: form.city,
            state,
            address: form.address,
            phone: form.phone,
            genres,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description,
        })
    }
}

/// The form submitted to list or edit an artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ArtistForm {
    /// The name of the artist.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    /// The home city of the artist.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub city: String,
    /// The two-letter postal code of the state.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = state_choice)
    )]
    pub state: String,
    /// The phone number.
    #[serde(default)]
    #[validate(custom(function = phone_number))]
    pub phone: Option<String>,
    /// The display names of the genres.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "This field is required."),
        custom(function = genre_choices)
    )]
    pub genres: Vec<String>,
    /// The URL of the picture of the artist.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub image_link: Option<String>,
    /// The URL of the Facebook page of the artist.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub facebook_link: Option<String>,
    /// The URL of the website of the artist.
    #[serde(default)]
    #[validate(url(message = "Invalid URL."), custom(function = http_url))]
    pub website: Option<String>,
    /// Whether the artist is looking for venues.
    #[serde(default)]
    pub seeking_venue: bool,
    /// The text shown when the artist is looking for venues.
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// An artist form that passed the validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidArtist {
    /// The name of the artist.
    pub name: String,
    /// The home city of the artist.
    pub city: String,
    /// The state of the artist.
    pub state: UsState,
    /// The phone number, if any.
    pub phone: Option<String>,
    /// The genres, in the submitted order.
    pub genres: Vec<Genre>,
    /// The URL of the picture of the artist, if any.
    pub image_link: Option<String>,
    /// The URL of the Facebook page, if any.
    pub facebook_link: Option<String>,
    /// The URL of the website, if any.
    pub website: Option<String>,
    /// Whether the artist is looking for venues.
    pub seeking_venue: bool,
    /// The text shown when the artist is looking for venues, if any.
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    fn normalized(&self) -> Self {
        Self {
            name: trimmed(&self.name),
            city: trimmed(&self.city),
            state: trimmed(&self.state),
            phone: optional(self.phone.as_deref()),
            genres: self.genres.clone(),
            image_link: optional(self.image_link.as_deref()),
            facebook_link: optional(self.facebook_link.as_deref()),
            website: optional(self.website.as_deref()),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description.as_deref()),
        }
    }

    /// Validates the form, and returns its typed values.
    pub fn to_valid(&self) -> Result<ValidArtist, FieldErrors> {
        let form = self.normalized();
        let (state, genres) = check_choices(&form, &form.state, &form.genres)?;

        Ok(ValidArtist {
            name: form.name,
            city: form.city,
            state,
            phone: form.phone,
            genres,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description,
        })
    }
}

/// The form submitted to book an artist at a venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ShowForm {
    /// The ID of the artist playing the show.
    #[serde(default)]
    #[validate(
        required(message = "This field is required."),
        range(min = 1, message = "Not a valid identifier.")
    )]
    pub artist_id: Option<i32>,
    /// The ID of the venue hosting the show.
    #[serde(default)]
    #[validate(
        required(message = "This field is required."),
        range(min = 1, message = "Not a valid identifier.")
    )]
    pub venue_id: Option<i32>,
    /// The start time, either in RFC 3339 or in the `YYYY-MM-DD HH:MM[:SS]` format (UTC).
    #[serde(default)]
    #[validate(
        required(message = "This field is required."),
        custom(function = valid_start_time)
    )]
    pub start_time: Option<String>,
}

/// A show form that passed the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidShow {
    /// The ID of the artist playing the show.
    pub artist_id: i32,
    /// The ID of the venue hosting the show.
    pub venue_id: i32,
    /// The start time of the show, in UTC.
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    /// Validates the form, and returns its typed values.
    pub fn to_valid(&self) -> Result<ValidShow, FieldErrors> {
        let form = Self {
            start_time: optional(self.start_time.as_deref()),
            ..self.clone()
        };
        form.validate()?;

        let mut errors = FieldErrors::default();
        let start_time = form
            .start_time
            .as_deref()
            .and_then(time::parse_start_time)
            .or_else(|| {
                errors.add("start_time", INVALID_DATETIME);
                None
            });

        match (form.artist_id, form.venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(ValidShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// The type of input expected for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A free text input.
    Text,
    /// A single choice among the provided choices.
    Select,
    /// Any amount of choices among the provided choices.
    MultiSelect,
    /// A checkbox.
    Boolean,
    /// An absolute HTTP(S) URL.
    Url,
    /// A phone number.
    Phone,
    /// A database ID.
    Integer,
    /// A date and a time, in UTC.
    DateTime,
}

/// The description of a form field, sent to the client rendering the form.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescription {
    /// The name of the field, as submitted.
    pub name: &'static str,
    /// The type of input of the field.
    pub kind: FieldKind,
    /// Whether the field must be filled.
    pub required: bool,
    /// The accepted values, for the select fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl FieldDescription {
    const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            kind,
            required,
            choices: None,
        }
    }

    fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }
}

/// A form as sent to the client: the description of its fields, and their current values.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescription<F> {
    /// The fields of the form, in display order.
    pub fields: Vec<FieldDescription>,
    /// The current values of the form.
    pub values: F,
}

fn state_names() -> Vec<String> {
    UsState::iter().map(|s| s.to_string()).collect()
}

fn genre_names() -> Vec<String> {
    Genre::iter().map(|g| g.to_string()).collect()
}

fn common_fields(with_address: bool, seeking_field: &'static str) -> Vec<FieldDescription> {
    let mut fields = vec![
        FieldDescription::new("name", FieldKind::Text, true),
        FieldDescription::new("city", FieldKind::Text, true),
        FieldDescription::new("state", FieldKind::Select, true)
            .with_choices(state_names()),
    ];
    if with_address {
        fields.push(FieldDescription::new("address", FieldKind::Text, true));
    }
    fields.extend([
        FieldDescription::new("phone", FieldKind::Phone, false),
        FieldDescription::new("image_link", FieldKind::Url, false),
        FieldDescription::new("genres", FieldKind::MultiSelect, true)
            .with_choices(genre_names()),
        FieldDescription::new("facebook_link", FieldKind::Url, false),
        FieldDescription::new("website", FieldKind::Url, false),
        FieldDescription::new(seeking_field, FieldKind::Boolean, false),
        FieldDescription::new("seeking_description", FieldKind::Text, false),
    ]);
    fields
}

impl VenueForm {
    /// Returns the description of the form, filled with these values.
    pub fn describe(self) -> FormDescription<Self> {
        FormDescription {
            fields: common_fields(true, "seeking_talent"),
            values: self,
        }
    }
}

impl ArtistForm {
    /// Returns the description of the form, filled with these values.
    pub fn describe(self) -> FormDescription<Self> {
        FormDescription {
            fields: common_fields(false, "seeking_venue"),
            values: self,
        }
    }
}

impl ShowForm {
    /// Returns a blank show form, with its start time defaulting to `now`.
    pub fn blank(now: NaiveDateTime) -> Self {
        Self {
            artist_id: None,
            venue_id: None,
            start_time: Some(time::format_form_date(now)),
        }
    }

    /// Returns the description of the form, filled with these values.
    pub fn describe(self) -> FormDescription<Self> {
        FormDescription {
            fields: vec![
                FieldDescription::new("artist_id", FieldKind::Integer, true),
                FieldDescription::new("venue_id", FieldKind::Integer, true),
                FieldDescription::new("start_time", FieldKind::DateTime, true),
            ],
            values: self,
        }
    }
}
