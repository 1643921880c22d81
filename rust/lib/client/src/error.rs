use palet_core::{classify_backend_message, Locale, Message, ValidationErrors};

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Backend answered with a non-2xx status. `message` is the body's
    /// `message` field, or empty if there was none.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    /// A save for this form is already in flight.
    #[error("a submission is already in progress")]
    Busy,

    #[error("no form is open")]
    NoSession,

    /// The host addressed a field the form does not have.
    #[error("unknown field \"{field}\" (known: {known})")]
    UnknownField { field: String, known: String },
}

impl ApiError {
    /// Text to show the user. `fallback` is the operation-specific
    /// message used when nothing more precise is known.
    pub fn user_message(&self, locale: Locale, fallback: Message) -> String {
        match self {
            ApiError::Validation(errors) => errors.message(locale),
            ApiError::Server { status, message } if message.trim().is_empty() => {
                let m = match status {
                    401 | 403 => Message::Unauthorized,
                    404 => Message::NotFound,
                    _ => fallback,
                };
                m.text(locale).to_string()
            }
            ApiError::Server { message, .. } => match classify_backend_message(message) {
                Some(m) => m.text(locale).to_string(),
                None => message.clone(),
            },
            ApiError::Network(_) => Message::Generic.text(locale).to_string(),
            ApiError::Decode(_) => fallback.text(locale).to_string(),
            ApiError::Busy => Message::Busy.text(locale).to_string(),
            ApiError::NoSession => Message::Generic.text(locale).to_string(),
            ApiError::UnknownField { .. } => self.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: u16, message: &str) -> ApiError {
        ApiError::Server {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn backend_message_shown_verbatim() {
        let e = server(400, "Bu isimde bir palet zaten var");
        assert_eq!(
            e.user_message(Locale::Tr, Message::PalletSaveFailed),
            "Bu isimde bir palet zaten var"
        );
    }

    #[test]
    fn known_backend_phrases_are_localized() {
        let e = server(403, "Unauthorized");
        assert_eq!(
            e.user_message(Locale::Tr, Message::PalletSaveFailed),
            "Bu işlem için yetkiniz bulunmamaktadır."
        );
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(
            server(500, "").user_message(Locale::Tr, Message::CompanySaveFailed),
            "Şirket kaydedilirken bir hata oluştu"
        );
        assert_eq!(
            server(404, "").user_message(Locale::En, Message::CompanySaveFailed),
            "The requested record was not found."
        );
    }

    #[test]
    fn unknown_field_names_the_key() {
        let e = ApiError::UnknownField {
            field: "nmae".into(),
            known: "name, contact_email".into(),
        };
        assert_eq!(
            e.user_message(Locale::Tr, Message::CompanySaveFailed),
            "unknown field \"nmae\" (known: name, contact_email)"
        );
    }

    #[test]
    fn busy_and_decode() {
        assert_eq!(
            ApiError::Busy.user_message(Locale::En, Message::Generic),
            "A save is already in progress. Please wait."
        );
        assert_eq!(
            ApiError::Decode("eof".into()).user_message(Locale::Tr, Message::PalletDeleteFailed),
            "Palet silinirken bir hata oluştu"
        );
    }
}
