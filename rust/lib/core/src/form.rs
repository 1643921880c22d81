//! Raw form values and per-entity field schemas.

use std::collections::BTreeMap;

use crate::i18n::Message;
use crate::model::{Company, Pallet, Resource};
use crate::validate::{parse_decimal, validate, ValidationErrors};

/// Field values exactly as typed, keyed by backend field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`; missing fields read as empty.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn id(&self) -> Option<i64> {
        self.get("id").trim().parse().ok()
    }

    fn decimal(&self, key: &str) -> f64 {
        parse_decimal(self.get(key)).unwrap_or(0.0)
    }

    fn quantity(&self, key: &str) -> u32 {
        self.decimal(key) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty after trimming.
    Text,
    /// Non-empty and contains `@`.
    Email,
    /// A chosen record id, not the placeholder.
    Select,
    /// Decimal ≥ 0.
    Price,
    /// Decimal > 0.
    Dimension,
    /// Whole number > 0.
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// A resource that can be edited through a form.
pub trait Editable: Resource {
    fn schema() -> &'static [Field];

    fn to_form(&self) -> FormValues;

    /// Validate and build the record. Nothing is built if any field fails.
    fn from_form(values: &FormValues) -> Result<Self, ValidationErrors>;

    fn delete_prompt() -> Message;

    fn save_failed() -> Message;

    fn delete_failed() -> Message;
}

const COMPANY_FIELDS: &[Field] = &[
    Field::new("name", "Şirket adı", FieldKind::Text),
    Field::new("contact_email", "E-posta adresi", FieldKind::Email),
];

impl Editable for Company {
    fn schema() -> &'static [Field] {
        COMPANY_FIELDS
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", self.name.as_str())
            .with("contact_email", self.contact_email.as_str());
        if let Some(id) = self.id {
            values.set("id", id.to_string());
        }
        values
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationErrors> {
        validate(values, COMPANY_FIELDS)?;
        Ok(Company {
            id: values.id(),
            name: values.get("name").trim().to_string(),
            contact_email: values.get("contact_email").trim().to_string(),
        })
    }

    fn delete_prompt() -> Message {
        Message::ConfirmDeleteCompany
    }

    fn save_failed() -> Message {
        Message::CompanySaveFailed
    }

    fn delete_failed() -> Message {
        Message::CompanyDeleteFailed
    }
}

const PALLET_FIELDS: &[Field] = &[
    Field::new("name", "Palet adı", FieldKind::Text),
    Field::new("company_id", "Firma", FieldKind::Select),
    Field::new("price", "Fiyat", FieldKind::Price),
    Field::new("board_thickness", "Tahta kalınlığı", FieldKind::Dimension),
    Field::new("upper_board_length", "Üst tahta uzunluğu", FieldKind::Dimension),
    Field::new("upper_board_width", "Üst tahta genişliği", FieldKind::Dimension),
    Field::new("upper_board_quantity", "Üst tahta adedi", FieldKind::Quantity),
    Field::new("lower_board_length", "Alt tahta uzunluğu", FieldKind::Dimension),
    Field::new("lower_board_width", "Alt tahta genişliği", FieldKind::Dimension),
    Field::new("lower_board_quantity", "Alt tahta adedi", FieldKind::Quantity),
    Field::new("closure_length", "Kapama uzunluğu", FieldKind::Dimension),
    Field::new("closure_width", "Kapama genişliği", FieldKind::Dimension),
    Field::new("closure_quantity", "Kapama adedi", FieldKind::Quantity),
    Field::new("block_length", "Takoz uzunluğu", FieldKind::Dimension),
    Field::new("block_width", "Takoz genişliği", FieldKind::Dimension),
    Field::new("block_height", "Takoz yüksekliği", FieldKind::Dimension),
];

impl Editable for Pallet {
    fn schema() -> &'static [Field] {
        PALLET_FIELDS
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new()
            .with("name", self.name.as_str())
            .with("company_id", self.company_id.to_string())
            .with("price", self.price.to_string())
            .with("board_thickness", self.board_thickness.to_string())
            .with("upper_board_length", self.upper_board_length.to_string())
            .with("upper_board_width", self.upper_board_width.to_string())
            .with("upper_board_quantity", self.upper_board_quantity.to_string())
            .with("lower_board_length", self.lower_board_length.to_string())
            .with("lower_board_width", self.lower_board_width.to_string())
            .with("lower_board_quantity", self.lower_board_quantity.to_string())
            .with("closure_length", self.closure_length.to_string())
            .with("closure_width", self.closure_width.to_string())
            .with("closure_quantity", self.closure_quantity.to_string())
            .with("block_length", self.block_length.to_string())
            .with("block_width", self.block_width.to_string())
            .with("block_height", self.block_height.to_string());
        if let Some(id) = self.id {
            values.set("id", id.to_string());
        }
        values
    }

    fn from_form(values: &FormValues) -> Result<Self, ValidationErrors> {
        validate(values, PALLET_FIELDS)?;
        Ok(Pallet {
            id: values.id(),
            name: values.get("name").trim().to_string(),
            company_id: values.get("company_id").trim().parse().unwrap_or_default(),
            price: values.decimal("price"),
            board_thickness: values.decimal("board_thickness"),
            upper_board_length: values.decimal("upper_board_length"),
            upper_board_width: values.decimal("upper_board_width"),
            upper_board_quantity: values.quantity("upper_board_quantity"),
            lower_board_length: values.decimal("lower_board_length"),
            lower_board_width: values.decimal("lower_board_width"),
            lower_board_quantity: values.quantity("lower_board_quantity"),
            closure_length: values.decimal("closure_length"),
            closure_width: values.decimal("closure_width"),
            closure_quantity: values.quantity("closure_quantity"),
            block_length: values.decimal("block_length"),
            block_width: values.decimal("block_width"),
            block_height: values.decimal("block_height"),
            total_volume: None,
        })
    }

    fn delete_prompt() -> Message {
        Message::ConfirmDeletePallet
    }

    fn save_failed() -> Message {
        Message::PalletSaveFailed
    }

    fn delete_failed() -> Message {
        Message::PalletDeleteFailed
    }
}
