// src/error.rs
//! Ошибки генераторов
//!
//! Корректное использование никогда не возвращает ошибку: вырожденные
//! конфигурации (пустой диапазон разбиения, поддерево без комнат) деградируют
//! молча. Ошибки здесь — это нарушения контракта, на которых генератор
//! обязан упасть сразу, а не зациклиться или выйти за границы карты.

use crate::generator::GeneratorKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Карта слишком мала для выбранной стратегии
    #[error("map {rows}x{cols} is too small for {kind:?} generation")]
    MapTooSmall {
        kind: GeneratorKind,
        rows: usize,
        cols: usize,
    },

    /// Конфигурация не допускает завершимую генерацию
    #[error("invalid {kind:?} configuration: {reason}")]
    InvalidConfig { kind: GeneratorKind, reason: String },

    /// `step`/`generate` вызваны до `start`
    #[error("{kind:?} generator is not started, call start() first")]
    NotStarted { kind: GeneratorKind },
}
