//! 本地化标签映射
//!
//! 将字段、性别与导航结果映射为稳定的翻译键，避免依赖 Debug 输出。

use crate::record::{Field, Gender};
use crate::wizard::Transition;
use rust_i18n::t;
use std::borrow::Cow;

/// 字段标签
pub fn field_label(field: Field) -> Cow<'static, str> {
    match field {
        Field::FirstName => t!("field_first_name"),
        Field::LastName => t!("field_last_name"),
        Field::File => t!("field_file"),
        Field::Email => t!("field_email"),
        Field::Gender => t!("field_gender"),
        Field::Country => t!("field_country"),
        Field::Address => t!("field_address"),
        Field::City => t!("field_city"),
        Field::State => t!("field_state"),
        Field::PhoneNumber => t!("field_phone_number"),
        Field::BankName => t!("field_bank_name"),
        Field::AccountNumber => t!("field_account_number"),
        Field::AccountName => t!("field_account_name"),
    }
}

/// 性别标签
pub fn gender_label(gender: Gender) -> Cow<'static, str> {
    match gender {
        Gender::Male => t!("gender_male"),
        Gender::Female => t!("gender_female"),
    }
}

/// 导航结果提示
pub fn transition_message(transition: &Transition) -> Cow<'static, str> {
    match transition {
        Transition::Moved { to, .. } => t!("msg_moved", step = to),
        Transition::Blocked { failed, .. } => t!("msg_blocked", count = failed.len()),
        Transition::Rewound { to, failed } => {
            t!("msg_rewound", step = to, count = failed.len())
        }
        Transition::Submitted => t!("msg_submitted"),
        Transition::Stayed => t!("msg_stayed"),
    }
}
