// src/automata.rs
//! Клеточный автомат: случайный шум + сглаживание по числу соседей
//!
//! `start` зашумляет карту, `step` делает один сглаживающий проход по снимку
//! текущего состояния. `generate` по контракту — ровно один проход; цикл
//! из нескольких проходов остаётся за вызывающим кодом.

use crate::config::{CellAutomataConfig, EvaluationRule};
use crate::error::GeneratorError;
use crate::generator::{ConfigUi, Generator, GeneratorKind};
use crate::map::{CellState, Map};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct CellAutomataGenerator {
    config: CellAutomataConfig,
    rng: ChaCha8Rng,
}

impl CellAutomataGenerator {
    #[must_use]
    pub fn new(config: CellAutomataConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &CellAutomataConfig {
        &self.config
    }

    /// Начальное зашумление: внешнее кольцо принудительно стены (если
    /// границы не симулируются), остальные клетки — стена с вероятностью
    /// `wall_probability`
    fn noise(&mut self, map: &mut Map) {
        for i in 0..map.rows {
            for j in 0..map.cols {
                let border = i == 0 || j == 0 || i == map.rows - 1 || j == map.cols - 1;
                if border && !self.config.simulate_borders {
                    map.set(i, j, CellState::Wall);
                } else {
                    let sample: f32 = self.rng.gen_range(0.0..1.0);
                    let state = if sample <= self.config.wall_probability {
                        CellState::Wall
                    } else {
                        CellState::Empty
                    };
                    map.set(i, j, state);
                }
            }
        }
    }
}

/// Число стен в окрестности клетки (row, col) радиуса `distance` по снимку
/// `old`. Соседи за границей карты просто не считаются (не трактуются как
/// стены). Для радиуса 2 исключаются четыре точные угловые клетки 5×5:
/// сравниваются именно смещения (|dr| == 2 и |dc| == 2), а не абсолютные
/// координаты клетки.
fn count_neighborhood(
    map: &Map,
    old: &[CellState],
    row: usize,
    col: usize,
    distance: i32,
    count_self: bool,
) -> usize {
    let mut walls = 0;
    for dr in -distance..=distance {
        for dc in -distance..=distance {
            if distance == 2 && dr.abs() == 2 && dc.abs() == 2 {
                continue;
            }
            if dr == 0 && dc == 0 && !count_self {
                continue;
            }
            let (nr, nc) = (row as i32 + dr, col as i32 + dc);
            if !map.valid_coords(nr, nc) {
                continue;
            }
            if old[map.as_index(nr as usize, nc as usize)] == CellState::Wall {
                walls += 1;
            }
        }
    }
    walls
}

/// Проверяет активное правило для клетки по снимку предыдущего поколения
fn rule_holds(
    config: &CellAutomataConfig,
    map: &Map,
    old: &[CellState],
    row: usize,
    col: usize,
) -> bool {
    let basic = count_neighborhood(map, old, row, col, 1, config.include_self)
        >= config.wall_threshold;
    match config.rule {
        EvaluationRule::Basic => basic,
        EvaluationRule::Extended => {
            basic || count_neighborhood(map, old, row, col, 2, config.include_self) <= 1
        }
    }
}

impl Generator for CellAutomataGenerator {
    fn start(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        if !(0.0..=1.0).contains(&self.config.wall_probability) {
            return Err(GeneratorError::InvalidConfig {
                kind: self.kind(),
                reason: format!(
                    "wall_probability {} is outside [0, 1]",
                    self.config.wall_probability
                ),
            });
        }
        self.noise(map);
        log::debug!(
            "cell automata: карта {}x{} зашумлена, доля пола {:.2}",
            map.rows,
            map.cols,
            map.empty_ratio()
        );
        Ok(())
    }

    /// Один сглаживающий проход и есть полная генерация этой стратегии
    fn generate(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        self.step(map)
    }

    fn step(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        let old = map.snapshot();
        let (rows, cols) = if self.config.simulate_borders {
            (0..map.rows, 0..map.cols)
        } else {
            (1..map.rows.saturating_sub(1), 1..map.cols.saturating_sub(1))
        };

        for i in rows {
            for j in cols.clone() {
                let state = if rule_holds(&self.config, map, &old, i, j) {
                    CellState::Wall
                } else {
                    CellState::Empty
                };
                map.set(i, j, state);
            }
        }
        Ok(())
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::CellAutomata
    }

    fn render_config(&mut self, ui: &mut dyn ConfigUi) {
        ui.edit_f32(
            "Initial wall probability [0..1]",
            &mut self.config.wall_probability,
        );
        ui.edit_usize(
            "Neighbouring walls required for next iteration",
            &mut self.config.wall_threshold,
        );
        ui.checkbox("Count current cell?", &mut self.config.include_self);
        ui.checkbox("Simulate borders?", &mut self.config.simulate_borders);

        let mut selected = match self.config.rule {
            EvaluationRule::Basic => 0,
            EvaluationRule::Extended => 1,
        };
        ui.combo("Algorithm", &["Basic", "Extended"], &mut selected);
        self.config.rule = if selected == 0 {
            EvaluationRule::Basic
        } else {
            EvaluationRule::Extended
        };
    }
}
