//! Общие типы и правила RSVP-страницы.
//!
//! Крейт не зависит от DOM: всё, что можно проверить без браузера
//! (нормализация имён, шлюз доступа, состояние формы, отправка),
//! живёт здесь и тестируется нативно.

pub mod domain;
pub mod enums;
pub mod shared;
