//! Tests for the account wire codec.

use serde_json::json;

use super::accounts_model::{Account, AccountData, NewAccount};
use crate::utils::time_utils;

fn sample_data() -> AccountData {
    serde_json::from_value(json!({
        "description": "Netflix",
        "typeId": 4,
        "categoryId": 9,
        "value": 55.90,
        "dueDay": 15,
        "month": 1,
        "year": 2026,
        "isRecurrent": 1,
        "observation": "family plan"
    }))
    .unwrap()
}

#[test]
fn codec_round_trips_business_fields() {
    let data = sample_data();
    let now = time_utils::now_utc();
    let new = NewAccount::from_client(&data, 7, now);
    assert_eq!(new.user_id, 7);
    assert_eq!(new.type_id, 4);
    assert!(new.is_recurrent);

    let stored = Account {
        id: 123,
        user_id: new.user_id,
        type_id: new.type_id,
        category_id: new.category_id,
        description: new.description,
        value: new.value,
        estimated_value: new.estimated_value,
        due_day: new.due_day,
        month: new.month,
        year: new.year,
        is_recurrent: new.is_recurrent,
        pay_in_advance: new.pay_in_advance,
        recurrence_id: new.recurrence_id,
        installment_index: new.installment_index,
        installment_total: new.installment_total,
        purchase_uuid: new.purchase_uuid,
        best_buy_day: new.best_buy_day,
        card_brand: new.card_brand,
        card_bank: new.card_bank,
        card_limit: new.card_limit,
        card_color: new.card_color,
        card_id: new.card_id,
        logo: new.logo,
        observation: new.observation,
        establishment: new.establishment,
        purchase_date: new.purchase_date,
        creation_date: new.creation_date,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let out = stored.to_client();
    assert_eq!(out.id, Some(123));
    assert_eq!(out.description, data.description);
    assert_eq!(out.value, data.value);
    assert_eq!(out.due_day, data.due_day);
    assert_eq!(out.month, data.month);
    assert_eq!(out.year, data.year);
    assert_eq!(out.is_recurrent, data.is_recurrent);
    assert_eq!(out.observation, data.observation);
    assert_eq!(out.deleted_at, None);
}

#[test]
fn reads_snake_case_fallbacks() {
    let data: AccountData = serde_json::from_value(json!({
        "description": "Aluguel",
        "type_id": 2,
        "due_day": 5,
        "is_recurrent": true,
        "card_id": 77
    }))
    .unwrap();
    assert_eq!(data.type_id, 2);
    assert_eq!(data.due_day, 5);
    assert!(data.is_recurrent);
    assert_eq!(data.card_id, Some(77));
}

#[test]
fn emits_flags_as_integers() {
    let data = sample_data();
    let now = time_utils::now_utc();
    let new = NewAccount::from_client(&data, 1, now);
    let stored = Account {
        id: 1,
        user_id: 1,
        type_id: new.type_id,
        category_id: None,
        description: new.description,
        value: new.value,
        estimated_value: None,
        due_day: new.due_day,
        month: None,
        year: None,
        is_recurrent: true,
        pay_in_advance: false,
        recurrence_id: None,
        installment_index: None,
        installment_total: None,
        purchase_uuid: None,
        best_buy_day: None,
        card_brand: None,
        card_bank: None,
        card_limit: None,
        card_color: None,
        card_id: None,
        logo: None,
        observation: None,
        establishment: None,
        purchase_date: None,
        creation_date: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let value = serde_json::to_value(stored.to_client()).unwrap();
    assert_eq!(value["isRecurrent"], 1);
    assert_eq!(value["payInAdvance"], 0);
}

#[test]
fn validate_checks_due_date_ranges() {
    let mut data = sample_data();
    assert!(data.validate().is_ok());

    data.due_day = 0;
    assert!(data.validate().is_err());

    data.due_day = 15;
    data.month = Some(13);
    assert!(data.validate().is_err());

    data.month = Some(12);
    data.year = Some(1999);
    assert!(data.validate().is_err());
}

#[test]
fn missing_required_fields_fail_decode() {
    let result: Result<AccountData, _> =
        serde_json::from_value(json!({"description": "incomplete"}));
    assert!(result.is_err());
}
