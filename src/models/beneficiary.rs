use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A payee registered by a user. `beneficiary_id` is the opaque `bf_...`
/// handle the payout side refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub beneficiary_id: String,
    pub user_id: ObjectId,

    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpa: Option<String>,

    pub created_at: i64,
}

impl Beneficiary {
    /// Masked payout destination for display, e.g. `A/c ••••4321` or the VPA.
    pub fn destination_label(&self) -> String {
        if let Some(vpa) = &self.vpa {
            return vpa.clone();
        }
        match &self.bank_account {
            Some(acc) => format!("A/c ••••{}", &acc[acc.len().saturating_sub(4)..]),
            None => "-".to_string(),
        }
    }
}
