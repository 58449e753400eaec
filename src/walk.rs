// src/walk.rs
//! «Пьяная прогулка»: связный ход случайными шагами по сторонам света
//!
//! Стартовая клетка выбирается в интерьере, каждый шаг прорубает одну
//! клетку пола. `generate` шагает, пока доля пола не достигнет целевой.
//! Завершение вероятностное: гарантируется только при целевой доле < 1.

use crate::config::DrunkardWalkConfig;
use crate::error::GeneratorError;
use crate::generator::{ConfigUi, Generator, GeneratorKind};
use crate::map::{CellState, Map};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub struct DrunkardWalkGenerator {
    config: DrunkardWalkConfig,
    rng: ChaCha8Rng,
    /// Текущая позиция резчика; `None` до первого `start`
    position: Option<(usize, usize)>,
}

impl DrunkardWalkGenerator {
    #[must_use]
    pub fn new(config: DrunkardWalkConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            position: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DrunkardWalkConfig {
        &self.config
    }

    /// Стартовая клетка прогулки после последнего `start`
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}

impl Generator for DrunkardWalkGenerator {
    fn start(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        // На карте меньше 3×3 нет интерьера для стартовой клетки
        if map.rows < 3 || map.cols < 3 {
            return Err(GeneratorError::MapTooSmall {
                kind: self.kind(),
                rows: map.rows,
                cols: map.cols,
            });
        }

        map.fill(CellState::Wall);
        let row = self.rng.gen_range(1..map.rows - 1);
        let col = self.rng.gen_range(1..map.cols - 1);
        map.set(row, col, CellState::Empty);
        self.position = Some((row, col));
        Ok(())
    }

    fn generate(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        let ratio = self.config.expected_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(GeneratorError::InvalidConfig {
                kind: self.kind(),
                reason: format!("expected_ratio {ratio} must be strictly between 0 and 1"),
            });
        }

        // Полный пересчёт доли после каждого шага: приемлемо для карт
        // игровых размеров, на очень больших нужен инкрементный счётчик
        let mut steps = 0u64;
        while map.empty_ratio() < ratio {
            self.step(map)?;
            steps += 1;
        }
        log::debug!(
            "drunkard walk: доля пола {:.2} достигнута за {} шагов",
            map.empty_ratio(),
            steps
        );
        Ok(())
    }

    fn step(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        let (mut row, mut col) = self.position.ok_or_else(|| GeneratorError::NotStarted {
            kind: GeneratorKind::DrunkardWalk,
        })?;

        // Отбрасываем направления, выводящие за границу; при старте в
        // интерьере допустимое направление существует всегда
        loop {
            let (dr, dc) = DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())];
            let (nr, nc) = (row as i32 + dr, col as i32 + dc);
            if map.valid_coords(nr, nc) {
                row = nr as usize;
                col = nc as usize;
                break;
            }
        }

        map.set(row, col, CellState::Empty);
        self.position = Some((row, col));
        Ok(())
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::DrunkardWalk
    }

    fn render_config(&mut self, ui: &mut dyn ConfigUi) {
        ui.edit_f32(
            "Expected empty ratio (0..1)",
            &mut self.config.expected_ratio,
        );
    }
}
