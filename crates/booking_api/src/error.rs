use actix_web::{HttpResponse, http::StatusCode};
use booking_lib::{error::BookingError, forms::FieldErrors};
use sea_orm::DbErr;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
#[repr(i32)] // i32 to be used with clients that don't support unsigned integers
#[rustfmt::skip]
pub enum BookingErrorKind {
    // Caution: when creating a new error, you must ensure its code isn't
    // in conflict with another one in `booking_lib::error::BookingError`.

    // --------
    // --- Internal server errors
    // --------

    // ...Error from booking_lib

    // --------
    // --- Logical errors
    // --------

    #[error("not found")]
    EndpointNotFound = 301,

    // ...Errors from booking_lib

    #[error("invalid form: {errors}")]
    RejectedForm {
        errors: FieldErrors,
        form: serde_json::Value,
    } = 304,

    // ...Error from booking_lib

    #[error("malformed request: {0}")]
    MalformedRequest(String) = 306,

    #[error(transparent)]
    Lib(#[from] BookingError),
}

/// The body of an error response, before the request ID is added to it.
#[derive(Serialize, Debug, Clone)]
pub struct BookingErrorKindResponse {
    pub r#type: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<serde_json::Value>,
}

impl actix_web::ResponseError for BookingErrorKind {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let (r#type, status_code) = self.get_err_type_and_status_code();
        let mut res = HttpResponse::build(status_code);

        let (errors, form) = match self {
            Self::RejectedForm { errors, form } => (Some(errors.clone()), Some(form.clone())),
            Self::Lib(BookingError::InvalidForm(errors)) => (Some(errors.clone()), None),
            _ => (None, None),
        };

        let body = BookingErrorKindResponse {
            r#type,
            message: self.to_string(),
            errors,
            form,
        };
        res.extensions_mut().insert(body.clone());

        res.json(body)
    }

    fn status_code(&self) -> StatusCode {
        self.get_err_type_and_status_code().1
    }
}

impl BookingErrorKind {
    pub fn get_err_type_and_status_code(&self) -> (i32, StatusCode) {
        use BookingErrorKind as E;
        use StatusCode as S;
        use booking_lib::error::BookingError as LE;

        match self {
            E::Lib(LE::DbError(_)) => (102, S::INTERNAL_SERVER_ERROR),

            E::EndpointNotFound => (301, S::NOT_FOUND),
            E::Lib(LE::VenueNotFound(_)) => (302, S::NOT_FOUND),
            E::Lib(LE::ArtistNotFound(_)) => (303, S::NOT_FOUND),
            E::Lib(LE::InvalidForm(_)) | E::RejectedForm { .. } => (304, S::BAD_REQUEST),
            E::Lib(LE::ShowAlreadyBooked(_, _)) => (305, S::CONFLICT),
            E::MalformedRequest(_) => (306, S::BAD_REQUEST),
        }
    }
}

impl From<DbErr> for BookingErrorKind {
    fn from(value: DbErr) -> Self {
        Self::Lib(value.into())
    }
}

/// The body of an error response.
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub error: BookingErrorKindResponse,
}

pub type BookingResult<T> = Result<T, BookingErrorKind>;

pub trait BookingResultExt<T> {
    /// Converts the validation failure of a form to an error echoing the submitted form.
    fn echo_form<F: Serialize>(self, form: &F) -> BookingResult<T>;
}

impl<T, E> BookingResultExt<T> for Result<T, E>
where
    BookingError: From<E>,
{
    fn echo_form<F: Serialize>(self, form: &F) -> BookingResult<T> {
        self.map_err(|err| match BookingError::from(err) {
            BookingError::InvalidForm(errors) => BookingErrorKind::RejectedForm {
                errors,
                form: serde_json::to_value(form).unwrap_or_default(),
            },
            other => other.into(),
        })
    }
}
