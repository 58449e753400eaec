// src/config.rs
//! Конфигурация генерации подземелий
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Клеточный автомат (вероятность стены, порог соседей, правило оценки)
//! - «Пьяная прогулка» (целевая доля пола)
//! - BSP (минимальные размеры листьев, размеры комнат, вероятности разбиения)
//!
//! Все структуры поддерживают сериализацию в TOML для настройки через
//! конфигурационные файлы. Каждый генератор несёт собственный сид: генерация
//! всегда детерминирована при фиксированном сиде.

use crate::generator::GeneratorKind;
use serde::{Deserialize, Serialize};
use std::fs;

/// Правило оценки соседей клеточного автомата
///
/// Закрытый набор правил, выбираемых из конфигурации (вместо хранимого
/// колбэка: правило тривиально сравнимо и тестируемо).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EvaluationRule {
    /// Стена, если стен в окрестности Мура (радиус 1) не меньше порога
    #[default]
    Basic,
    /// `Basic` ИЛИ в окрестности радиуса 2 (5×5 без четырёх угловых клеток)
    /// не больше одной стены — сглаживание плюс удаление одиночных стен
    Extended,
}

/// Параметры клеточного автомата
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellAutomataConfig {
    /// Сид генератора случайных чисел (детерминированная генерация)
    #[serde(default)]
    pub seed: u64,

    /// Вероятность стены при начальном зашумлении (0.0..=1.0)
    #[serde(default = "default_wall_probability")]
    pub wall_probability: f32,

    /// Минимум стен в окрестности, чтобы клетка стала стеной
    #[serde(default = "default_wall_threshold")]
    pub wall_threshold: usize,

    /// Учитывать ли саму клетку при подсчёте соседей
    #[serde(default = "default_include_self")]
    pub include_self: bool,

    /// Симулировать ли границы как обычные клетки:
    /// - `false` — внешнее кольцо принудительно заполняется стенами и не
    ///   обновляется на шагах
    /// - `true` — граница живёт по тем же правилам, что и интерьер
    #[serde(default)]
    pub simulate_borders: bool,

    /// Активное правило оценки соседей
    #[serde(default)]
    pub rule: EvaluationRule,
}

fn default_wall_probability() -> f32 {
    0.45
}
fn default_wall_threshold() -> usize {
    5
}
fn default_include_self() -> bool {
    true
}

impl Default for CellAutomataConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            wall_probability: 0.45,
            wall_threshold: 5,
            include_self: true,
            simulate_borders: false,
            rule: EvaluationRule::Basic,
        }
    }
}

/// Параметры «пьяной прогулки»
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrunkardWalkConfig {
    /// Сид генератора случайных чисел
    #[serde(default)]
    pub seed: u64,

    /// Целевая доля пола от общего числа клеток, строго между 0 и 1
    #[serde(default = "default_expected_ratio")]
    pub expected_ratio: f32,
}

fn default_expected_ratio() -> f32 {
    0.55
}

impl Default for DrunkardWalkConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            expected_ratio: 0.55,
        }
    }
}

/// Параметры BSP-генератора комнат и коридоров
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BspConfig {
    /// Сид генератора случайных чисел
    #[serde(default)]
    pub seed: u64,

    /// Вероятность горизонтального разбиения узла
    #[serde(default = "default_horiz_split_probability")]
    pub horiz_split_probability: f32,

    /// Если высота/ширина превышает `1.0 + split_h_ratio`, разбиение
    /// принудительно горизонтальное (приоритет над случайным выбором)
    #[serde(default = "default_split_h_ratio")]
    pub split_h_ratio: f32,

    /// Если ширина/высота не меньше `1.0 + split_v_ratio`, разбиение
    /// принудительно вертикальное
    #[serde(default = "default_split_v_ratio")]
    pub split_v_ratio: f32,

    /// Вероятность оставить лист без комнаты: поддерево без комнат молча
    /// остаётся не соединённым с остальной картой
    #[serde(default = "default_empty_room_probability")]
    pub empty_room_probability: f32,

    /// Минимальная ширина листа разбиения
    #[serde(default = "default_min_leaf")]
    pub min_width: usize,

    /// Минимальная высота листа разбиения
    #[serde(default = "default_min_leaf")]
    pub min_height: usize,

    /// Диапазон ширины комнаты
    #[serde(default = "default_min_room_width")]
    pub min_room_width: usize,
    #[serde(default = "default_max_room")]
    pub max_room_width: usize,

    /// Диапазон высоты комнаты
    #[serde(default = "default_min_room_height")]
    pub min_room_height: usize,
    #[serde(default = "default_max_room")]
    pub max_room_height: usize,
}

fn default_horiz_split_probability() -> f32 {
    0.5
}
fn default_split_h_ratio() -> f32 {
    0.3
}
fn default_split_v_ratio() -> f32 {
    0.5
}
fn default_empty_room_probability() -> f32 {
    0.04
}
fn default_min_leaf() -> usize {
    40
}
fn default_min_room_width() -> usize {
    18
}
fn default_min_room_height() -> usize {
    20
}
fn default_max_room() -> usize {
    38
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            horiz_split_probability: 0.5,
            split_h_ratio: 0.3,
            split_v_ratio: 0.5,
            empty_room_probability: 0.04,
            min_width: 40,
            min_height: 40,
            min_room_width: 18,
            max_room_width: 38,
            min_room_height: 20,
            max_room_height: 38,
        }
    }
}

/// Основные параметры генерации подземелья
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из
/// TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Число строк карты (по умолчанию 64)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Число столбцов карты (по умолчанию 64)
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Выбранная стратегия генерации (по умолчанию клеточный автомат)
    #[serde(default)]
    pub generator: GeneratorKind,

    /// Сколько сглаживающих проходов делает CLI для клеточного автомата
    #[serde(default = "default_automata_steps")]
    pub automata_steps: usize,

    /// Параметры клеточного автомата
    #[serde(default)]
    pub cell_automata: CellAutomataConfig,

    /// Параметры «пьяной прогулки»
    #[serde(default)]
    pub drunkard_walk: DrunkardWalkConfig,

    /// Параметры BSP-генератора
    #[serde(default)]
    pub bsp: BspConfig,
}

impl GenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Аргументы
    /// * `path` - путь к файлу конфигурации в формате TOML
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден или содержит недопустимый формат.
    ///
    /// # Пример
    /// ```toml
    /// # dungeon.toml
    /// rows = 80
    /// cols = 120
    /// generator = "Bsp"
    ///
    /// [bsp]
    /// seed = 42
    /// min_width = 20
    /// min_height = 20
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        Ok(params)
    }
}

fn default_rows() -> usize {
    64
}
fn default_cols() -> usize {
    64
}
fn default_automata_steps() -> usize {
    4
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            rows: 64,
            cols: 64,
            generator: GeneratorKind::CellAutomata,
            automata_steps: 4,
            cell_automata: CellAutomataConfig::default(),
            drunkard_walk: DrunkardWalkConfig::default(),
            bsp: BspConfig::default(),
        }
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let params: GenerationParams = toml::from_str("rows = 40\ncols = 50\n").unwrap();
        assert_eq!(params.rows, 40);
        assert_eq!(params.cols, 50);
        assert_eq!(params.generator, GeneratorKind::CellAutomata);
        assert_eq!(params.automata_steps, 4);
        assert!((params.cell_automata.wall_probability - 0.45).abs() < f32::EPSILON);
        assert_eq!(params.bsp.min_width, 40);
        assert_eq!(params.bsp.max_room_height, 38);
    }

    #[test]
    fn nested_sections_override_defaults() {
        let toml_src = r#"
            generator = "Bsp"

            [bsp]
            seed = 7
            min_width = 10
            min_height = 10
            min_room_width = 4
            max_room_width = 8
            min_room_height = 4
            max_room_height = 8
            empty_room_probability = 0.0

            [cell_automata]
            rule = "Extended"
            simulate_borders = true
        "#;
        let params: GenerationParams = toml::from_str(toml_src).unwrap();
        assert_eq!(params.generator, GeneratorKind::Bsp);
        assert_eq!(params.bsp.seed, 7);
        assert_eq!(params.bsp.min_room_width, 4);
        assert!(params.bsp.empty_room_probability.abs() < f32::EPSILON);
        assert_eq!(params.cell_automata.rule, EvaluationRule::Extended);
        assert!(params.cell_automata.simulate_borders);
    }

    #[test]
    fn defaults_survive_toml_roundtrip() {
        let params = GenerationParams::default();
        let encoded = toml::to_string(&params).unwrap();
        let decoded: GenerationParams = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.rows, params.rows);
        assert_eq!(decoded.generator, params.generator);
        assert_eq!(decoded.bsp.min_room_height, params.bsp.min_room_height);
    }
}
