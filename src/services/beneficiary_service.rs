use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use regex::Regex;

use crate::{ids, models::Beneficiary, AppState};

use super::auth_service::{form_error, is_valid_email, FieldErrors};

// duplicate-key inserts are retried with a fresh id
const MAX_INSERT_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct NewBeneficiary {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bank_account: Option<String>,
    pub ifsc: Option<String>,
    pub vpa: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trims and checks the form. Returns the cleaned input or per-field errors.
pub fn validate(input: &NewBeneficiary) -> Result<NewBeneficiary, FieldErrors> {
    let mut errs = FieldErrors::new();

    let name = input.name.trim().to_string();
    let email = input.email.trim().to_lowercase();
    let phone = non_empty(&input.phone);
    let bank_account = non_empty(&input.bank_account);
    let ifsc = non_empty(&input.ifsc).map(|s| s.to_uppercase());
    let vpa = non_empty(&input.vpa).map(|s| s.to_lowercase());

    if name.is_empty() {
        errs.insert("name".into(), "Name is required.".into());
    } else if name.chars().count() < 2 {
        errs.insert("name".into(), "Name must be at least 2 characters.".into());
    }

    if email.is_empty() {
        errs.insert("email".into(), "Email is required.".into());
    } else if !is_valid_email(&email) {
        errs.insert("email".into(), "Invalid email.".into());
    }

    if let Some(p) = &phone {
        let re = Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
        if !re.is_match(p) {
            errs.insert("phone".into(), "Phone must be 8 to 15 digits.".into());
        }
    }

    match (&vpa, &bank_account) {
        (None, None) => {
            errs.insert(
                "_form".into(),
                "Provide either a UPI address or bank account details.".into(),
            );
        }
        (Some(v), _) => {
            let re = Regex::new(r"^[a-z0-9.\-_]{2,256}@[a-z]{2,64}$").unwrap();
            if !re.is_match(v) {
                errs.insert("vpa".into(), "Invalid UPI address.".into());
            }
        }
        (None, Some(acc)) => {
            let re = Regex::new(r"^[0-9]{9,18}$").unwrap();
            if !re.is_match(acc) {
                errs.insert(
                    "bankAccount".into(),
                    "Account number must be 9 to 18 digits.".into(),
                );
            }
            match &ifsc {
                None => {
                    errs.insert("ifsc".into(), "IFSC is required for bank transfers.".into());
                }
                Some(code) => {
                    let re = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap();
                    if !re.is_match(code) {
                        errs.insert("ifsc".into(), "Invalid IFSC.".into());
                    }
                }
            }
        }
    }

    if !errs.is_empty() {
        return Err(errs);
    }

    // a VPA wins; bank details are dropped rather than stored half-used
    let (bank_account, ifsc) = if vpa.is_some() { (None, None) } else { (bank_account, ifsc) };

    Ok(NewBeneficiary {
        name,
        email,
        phone,
        bank_account,
        ifsc,
        vpa,
    })
}

fn is_duplicate_key(msg: &str) -> bool {
    msg.contains("E11000")
}

#[derive(Debug, PartialEq)]
pub enum RetryError {
    /// Every attempt hit a duplicate key.
    Exhausted,
    /// Any other insert failure; not retried.
    Insert(String),
}

impl From<RetryError> for FieldErrors {
    fn from(e: RetryError) -> Self {
        match e {
            RetryError::Exhausted => {
                form_error("Could not allocate a beneficiary id. Please try again.")
            }
            RetryError::Insert(msg) => form_error(&format!("db error: {msg}")),
        }
    }
}

/// Runs `insert` with ids from `next_id`, drawing a fresh id after each
/// duplicate-key error, at most `MAX_INSERT_ATTEMPTS` times.
pub async fn insert_with_retry<T, N, I, Fut>(
    mut next_id: N,
    mut insert: I,
) -> Result<T, RetryError>
where
    N: FnMut() -> String,
    I: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    for attempt in 1..=MAX_INSERT_ATTEMPTS {
        match insert(next_id()).await {
            Ok(v) => return Ok(v),
            Err(e) if is_duplicate_key(&e) => {
                tracing::warn!(attempt, "beneficiary id collision, regenerating");
            }
            Err(e) => return Err(RetryError::Insert(e)),
        }
    }

    Err(RetryError::Exhausted)
}

pub async fn register_beneficiary(
    state: &AppState,
    user_id: ObjectId,
    input: &NewBeneficiary,
) -> Result<Beneficiary, FieldErrors> {
    let clean = validate(input)?;
    let beneficiaries = state.db.collection::<Beneficiary>("beneficiaries");
    let created_at = Utc::now().timestamp();

    let inserted = insert_with_retry(ids::new_beneficiary_id, |beneficiary_id| {
        debug_assert!(ids::is_beneficiary_id(&beneficiary_id));
        let b = Beneficiary {
            id: ObjectId::new(),
            beneficiary_id,
            user_id,
            name: clean.name.clone(),
            email: clean.email.clone(),
            phone: clean.phone.clone(),
            bank_account: clean.bank_account.clone(),
            ifsc: clean.ifsc.clone(),
            vpa: clean.vpa.clone(),
            created_at,
        };
        let coll = beneficiaries.clone();

        async move {
            match coll.insert_one(&b, None).await {
                Ok(_) => Ok(b),
                Err(e) => Err(e.to_string()),
            }
        }
    })
    .await;

    match inserted {
        Ok(b) => {
            tracing::info!(beneficiary_id = %b.beneficiary_id, "beneficiary registered");
            let _ = state.events_tx.send((user_id, "beneficiariesUpdated".to_string()));
            Ok(b)
        }
        Err(e) => {
            tracing::error!("beneficiary insert failed: {e:?}");
            Err(e.into())
        }
    }
}

pub async fn list_beneficiaries(
    state: &AppState,
    user_id: ObjectId,
) -> Result<Vec<Beneficiary>, String> {
    let beneficiaries = state.db.collection::<Beneficiary>("beneficiaries");
    let find_opts = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

    let mut cursor = beneficiaries
        .find(doc! { "userId": user_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut out: Vec<Beneficiary> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res.map_err(|e| e.to_string())?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NewBeneficiary {
        NewBeneficiary {
            name: "  Priya Sharma ".into(),
            email: "Priya@Example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn vpa_only_is_accepted_and_normalized() {
        let input = NewBeneficiary {
            vpa: Some("Priya.S@okbank".into()),
            bank_account: Some("123".into()),
            ..base()
        };

        let clean = validate(&input).unwrap();
        assert_eq!(clean.name, "Priya Sharma");
        assert_eq!(clean.email, "priya@example.com");
        assert_eq!(clean.vpa.as_deref(), Some("priya.s@okbank"));
        assert_eq!(clean.bank_account, None);
    }

    #[test]
    fn bank_details_need_valid_account_and_ifsc() {
        let ok = NewBeneficiary {
            bank_account: Some("001234567890".into()),
            ifsc: Some("hdfc0001234".into()),
            ..base()
        };
        assert_eq!(validate(&ok).unwrap().ifsc.as_deref(), Some("HDFC0001234"));

        let bad = NewBeneficiary {
            bank_account: Some("12ab".into()),
            ifsc: Some("HDFC1001234".into()),
            ..base()
        };
        let errs = validate(&bad).unwrap_err();
        assert!(errs.contains_key("bankAccount"));
        assert!(errs.contains_key("ifsc"));

        let no_ifsc = NewBeneficiary {
            bank_account: Some("001234567890".into()),
            ..base()
        };
        assert!(validate(&no_ifsc).unwrap_err().contains_key("ifsc"));
    }

    #[test]
    fn missing_destination_and_bad_fields_are_reported() {
        let input = NewBeneficiary {
            name: "A".into(),
            email: "nope".into(),
            phone: Some("12-34".into()),
            ..Default::default()
        };

        let errs = validate(&input).unwrap_err();
        assert!(errs.contains_key("name"));
        assert!(errs.contains_key("email"));
        assert!(errs.contains_key("phone"));
        assert!(errs.contains_key("_form"));
    }

    #[test]
    fn blank_optionals_count_as_absent() {
        let input = NewBeneficiary {
            phone: Some("   ".into()),
            vpa: Some("priya@upi".into()),
            ..base()
        };
        assert_eq!(validate(&input).unwrap().phone, None);
    }

    fn sequential_ids() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("bf_{n:020}")
        }
    }

    const DUP: &str = "E11000 duplicate key error collection: beneficiaries";

    #[tokio::test]
    async fn duplicate_keys_regenerate_the_id_until_insert_succeeds() {
        let mut outcomes = vec![Ok(()), Err(DUP.to_string()), Err(DUP.to_string())];
        let mut tried = Vec::new();

        let res = insert_with_retry(sequential_ids(), |id| {
            tried.push(id.clone());
            let out = outcomes.pop().unwrap().map(|_| id);
            async move { out }
        })
        .await;

        assert_eq!(tried.len(), 3);
        assert_ne!(tried[0], tried[1]);
        assert_ne!(tried[1], tried[2]);
        assert_eq!(res, Ok(tried[2].clone()));
    }

    #[tokio::test]
    async fn retries_stop_after_the_attempt_limit() {
        let mut calls = 0;

        let res: Result<(), RetryError> = insert_with_retry(sequential_ids(), |_| {
            calls += 1;
            async { Err(DUP.to_string()) }
        })
        .await;

        assert_eq!(calls, MAX_INSERT_ATTEMPTS);
        assert_eq!(res, Err(RetryError::Exhausted));

        let errs = FieldErrors::from(RetryError::Exhausted);
        assert!(errs["_form"].starts_with("Could not allocate"));
    }

    #[tokio::test]
    async fn other_insert_errors_are_not_retried() {
        let mut calls = 0;

        let res: Result<(), RetryError> = insert_with_retry(sequential_ids(), |_| {
            calls += 1;
            async { Err("connection reset".to_string()) }
        })
        .await;

        assert_eq!(calls, 1);
        assert_eq!(res, Err(RetryError::Insert("connection reset".into())));
    }
}
