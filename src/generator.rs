// src/generator.rs
//! Общий контракт стратегий генерации
//!
//! Каждая стратегия реализует один и тот же набор операций: `start`
//! устанавливает начальное состояние карты, `generate` доводит алгоритм до
//! собственного условия завершения, `step` выполняет один дискретный шаг
//! (для пошаговой визуализации). Все операции синхронны и мутируют карту
//! на месте; генератор владеет своим источником случайности.

use crate::automata::CellAutomataGenerator;
use crate::bsp::BspGenerator;
use crate::config::GenerationParams;
use crate::error::GeneratorError;
use crate::map::Map;
use crate::walk::DrunkardWalkGenerator;
use serde::{Deserialize, Serialize};

/// Вариант стратегии генерации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeneratorKind {
    #[default]
    CellAutomata,
    DrunkardWalk,
    Bsp,
}

/// Непрозрачная поверхность интерактивного UI
///
/// Стратегия через неё показывает и редактирует только собственные поля
/// конфигурации; доступа к карте у хука нет. Реализация поверхности (ImGui,
/// терминал, тестовая заглушка) остаётся за приложением.
pub trait ConfigUi {
    fn edit_f32(&mut self, label: &str, value: &mut f32);
    fn edit_usize(&mut self, label: &str, value: &mut usize);
    fn checkbox(&mut self, label: &str, value: &mut bool);
    fn combo(&mut self, label: &str, options: &[&str], selected: &mut usize);
}

/// Стратегия генерации карты
pub trait Generator {
    /// Сбрасывает карту в начальное состояние стратегии. Повторный вызов
    /// безопасен и перезапускает генерацию с нуля.
    fn start(&mut self, map: &mut Map) -> Result<(), GeneratorError>;

    /// Доводит алгоритм до его собственного условия завершения
    fn generate(&mut self, map: &mut Map) -> Result<(), GeneratorError>;

    /// Один дискретный шаг алгоритма; семантика у каждой стратегии своя
    fn step(&mut self, map: &mut Map) -> Result<(), GeneratorError>;

    /// Стабильная идентичность стратегии, без побочных эффектов
    fn kind(&self) -> GeneratorKind;

    /// Показывает поля конфигурации стратегии на UI-поверхности
    fn render_config(&mut self, ui: &mut dyn ConfigUi);
}

/// Создаёт стратегию, выбранную в параметрах генерации
#[must_use]
pub fn build_generator(params: &GenerationParams) -> Box<dyn Generator> {
    match params.generator {
        GeneratorKind::CellAutomata => {
            Box::new(CellAutomataGenerator::new(params.cell_automata.clone()))
        }
        GeneratorKind::DrunkardWalk => {
            Box::new(DrunkardWalkGenerator::new(params.drunkard_walk.clone()))
        }
        GeneratorKind::Bsp => Box::new(BspGenerator::new(params.bsp.clone())),
    }
}
