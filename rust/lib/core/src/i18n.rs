//! User-facing messages.
//!
//! Turkish is the primary locale; English exists for logs and scripted use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" | "tr-tr" => Ok(Locale::Tr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Generic,
    Database,
    Unauthorized,
    NotFound,
    Validation,
    NoResults,
    Busy,
    ConfirmDeleteCompany,
    ConfirmDeletePallet,
    CompanySaveFailed,
    CompanyDeleteFailed,
    PalletSaveFailed,
    PalletDeleteFailed,
    Saved,
    Deleted,
    Cancelled,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        use Message::*;
        match locale {
            Locale::Tr => match self {
                Generic => "Bir hata oluştu. Lütfen daha sonra tekrar deneyin.",
                Database => "Veritabanı bağlantı hatası. Lütfen daha sonra tekrar deneyin.",
                Unauthorized => "Bu işlem için yetkiniz bulunmamaktadır.",
                NotFound => "İstenen kayıt bulunamadı.",
                Validation => "Geçersiz veri girişi. Lütfen tüm alanları kontrol edin.",
                NoResults => "Sonuç bulunamadı.",
                Busy => "Kayıt işlemi devam ediyor. Lütfen bekleyin.",
                ConfirmDeleteCompany => "Bu şirketi silmek istediğinizden emin misiniz?",
                ConfirmDeletePallet => "Bu paleti silmek istediğinizden emin misiniz?",
                CompanySaveFailed => "Şirket kaydedilirken bir hata oluştu",
                CompanyDeleteFailed => "Şirket silinirken bir hata oluştu",
                PalletSaveFailed => "Palet kaydedilirken bir hata oluştu",
                PalletDeleteFailed => "Palet silinirken bir hata oluştu",
                Saved => "Kayıt başarıyla kaydedildi.",
                Deleted => "Kayıt silindi.",
                Cancelled => "İşlem iptal edildi.",
            },
            Locale::En => match self {
                Generic => "Something went wrong. Please try again later.",
                Database => "Database connection error. Please try again later.",
                Unauthorized => "You are not authorized to perform this action.",
                NotFound => "The requested record was not found.",
                Validation => "Invalid input. Please check all fields.",
                NoResults => "No results.",
                Busy => "A save is already in progress. Please wait.",
                ConfirmDeleteCompany => "Are you sure you want to delete this company?",
                ConfirmDeletePallet => "Are you sure you want to delete this pallet?",
                CompanySaveFailed => "Failed to save company",
                CompanyDeleteFailed => "Failed to delete company",
                PalletSaveFailed => "Failed to save pallet",
                PalletDeleteFailed => "Failed to delete pallet",
                Saved => "Record saved.",
                Deleted => "Record deleted.",
                Cancelled => "Cancelled.",
            },
        }
    }
}

/// Map well-known backend phrases to a localized message. Anything
/// unrecognized returns `None` and should be shown as-is.
pub fn classify_backend_message(message: &str) -> Option<Message> {
    let m = message.to_lowercase();
    if m.contains("connection") {
        Some(Message::Database)
    } else if m.contains("unauthorized") || m.contains("403") {
        Some(Message::Unauthorized)
    } else if m.contains("not found") || m.contains("404") {
        Some(Message::NotFound)
    } else {
        None
    }
}
