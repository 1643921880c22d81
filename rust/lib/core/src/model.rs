//! Records exchanged with the backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::desi::{DesiBreakdown, DesiInput};

/// Every pallet stands on nine support blocks; not stored per record.
pub const BLOCK_QUANTITY: u32 = 9;

/// A backend resource reachable at `/api/{collection}[/{id}]`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment, e.g. `"pallets"`.
    fn collection() -> &'static str;

    /// Human-facing singular name, used in notices and prompts.
    fn singular() -> &'static str;

    /// Backend-assigned id; `None` for records not yet created.
    fn id(&self) -> Option<i64>;
}

/// Customer or vendor a pallet design belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_email: String,
}

/// Optional text columns come back as `null`; read them as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Resource for Company {
    fn collection() -> &'static str {
        "companies"
    }

    fn singular() -> &'static str {
        "company"
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

/// A pallet design. All lengths are centimeters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub company_id: i64,
    #[serde(default)]
    pub price: f64,
    pub board_thickness: f64,
    pub upper_board_length: f64,
    pub upper_board_width: f64,
    pub upper_board_quantity: u32,
    pub lower_board_length: f64,
    pub lower_board_width: f64,
    pub lower_board_quantity: u32,
    pub closure_length: f64,
    pub closure_width: f64,
    pub closure_quantity: u32,
    pub block_length: f64,
    pub block_width: f64,
    pub block_height: f64,
    /// Server-computed total desi. Read-only: never sent back.
    #[serde(default, skip_serializing)]
    pub total_volume: Option<f64>,
}

impl Resource for Pallet {
    fn collection() -> &'static str {
        "pallets"
    }

    fn singular() -> &'static str {
        "pallet"
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Pallet {
    pub fn desi_input(&self) -> DesiInput {
        DesiInput {
            board_thickness: self.board_thickness,
            upper_length: self.upper_board_length,
            upper_width: self.upper_board_width,
            upper_quantity: f64::from(self.upper_board_quantity),
            lower_length: self.lower_board_length,
            lower_width: self.lower_board_width,
            lower_quantity: f64::from(self.lower_board_quantity),
            closure_length: self.closure_length,
            closure_width: self.closure_width,
            closure_quantity: f64::from(self.closure_quantity),
            block_length: self.block_length,
            block_width: self.block_width,
            block_height: self.block_height,
            price: self.price,
        }
    }

    /// Live client-side preview of the volumes.
    pub fn desi(&self) -> DesiBreakdown {
        self.desi_input().compute()
    }

    /// Total volume, preferring the value the server stored.
    pub fn total_desi(&self) -> f64 {
        match self.total_volume {
            Some(v) if v.is_finite() => v,
            _ => self.desi().total,
        }
    }

    pub fn upper_summary(&self) -> String {
        summary(
            self.upper_board_length,
            self.upper_board_width,
            self.board_thickness,
            self.upper_board_quantity,
        )
    }

    pub fn lower_summary(&self) -> String {
        summary(
            self.lower_board_length,
            self.lower_board_width,
            self.board_thickness,
            self.lower_board_quantity,
        )
    }

    pub fn closure_summary(&self) -> String {
        summary(
            self.closure_length,
            self.closure_width,
            self.board_thickness,
            self.closure_quantity,
        )
    }

    pub fn block_summary(&self) -> String {
        summary(
            self.block_length,
            self.block_width,
            self.block_height,
            BLOCK_QUANTITY,
        )
    }
}

/// `LxWxH (Q adet)`, the way exported listings print a component.
fn summary(length: f64, width: f64, height: f64, quantity: u32) -> String {
    format!("{}x{}x{} ({} adet)", length, width, height, quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "name": "Euro Palet",
            "company_id": 2,
            "price": 250.0,
            "board_thickness": 2.0,
            "upper_board_length": 120.0,
            "upper_board_width": 10.0,
            "upper_board_quantity": 5,
            "lower_board_length": 120.0,
            "lower_board_width": 10.0,
            "lower_board_quantity": 3,
            "closure_length": 80.0,
            "closure_width": 10.0,
            "closure_quantity": 3,
            "block_length": 10.0,
            "block_width": 10.0,
            "block_height": 8.0
        })
    }

    #[test]
    fn decodes_backend_shape() {
        let p: Pallet = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(p.id, Some(7));
        assert_eq!(p.upper_board_quantity, 5);
        assert_eq!(p.total_volume, None);
        assert_eq!(Pallet::collection(), "pallets");
    }

    #[test]
    fn total_volume_is_never_sent() {
        let mut p: Pallet = serde_json::from_value(sample_json()).unwrap();
        p.total_volume = Some(99.0);
        let out = serde_json::to_value(&p).unwrap();
        assert!(out.get("total_volume").is_none());
        assert_eq!(out["name"], "Euro Palet");
    }

    #[test]
    fn volume_prefers_server_value() {
        let mut p: Pallet = serde_json::from_value(sample_json()).unwrap();
        let preview = p.desi().total;
        assert_eq!(p.total_desi(), preview);
        p.total_volume = Some(42.5);
        assert_eq!(p.total_desi(), 42.5);
    }

    #[test]
    fn component_summaries() {
        let p: Pallet = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(p.upper_summary(), "120x10x2 (5 adet)");
        assert_eq!(p.block_summary(), "10x10x8 (9 adet)");
    }

    #[test]
    fn company_without_email_decodes_empty() {
        let c: Company =
            serde_json::from_str(r#"{"id":3,"name":"Ağaç","contact_email":null}"#).unwrap();
        assert_eq!(c.contact_email, "");
        let c: Company = serde_json::from_str(r#"{"id":4,"name":"Çam"}"#).unwrap();
        assert_eq!(c.contact_email, "");
    }

    #[test]
    fn new_company_omits_id() {
        let c = Company {
            id: None,
            name: "Ağaç A.Ş.".into(),
            contact_email: "info@agac.com.tr".into(),
        };
        let out = serde_json::to_value(&c).unwrap();
        assert!(out.get("id").is_none());
    }
}
