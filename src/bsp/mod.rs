// src/bsp/mod.rs
//! BSP-генератор: комнаты в листьях двоичного разбиения плюс коридоры
//!
//! `generate` выполняет три фазы за один вызов:
//! 1. Разбиение корня рекурсивным деревом
//! 2. Заселение листьев комнатами (лист может остаться пустым)
//! 3. Соединение поддеревьев коридорами снизу вверх
//!
//! Связность вероятностная: поддерево, целиком состоящее из пропущенных
//! листьев, остаётся не соединённым с остальной картой.

pub mod halls;
pub mod tree;

use crate::config::BspConfig;
use crate::error::GeneratorError;
use crate::generator::{ConfigUi, Generator, GeneratorKind};
use crate::map::{CellState, Map};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use halls::{carve_corridor, carve_room};
use tree::{Node, Rect};

pub struct BspGenerator {
    config: BspConfig,
    rng: ChaCha8Rng,
    /// Дерево последнего запуска; `start` сбрасывает его целиком
    tree: Option<Node>,
}

impl BspGenerator {
    #[must_use]
    pub fn new(config: BspConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            tree: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Проверяет, что любой лист сможет вместить минимальную комнату
    /// с полем в одну клетку, а у комнаты есть строгий интерьер для
    /// конца коридора
    fn validate(&self, map: &Map) -> Result<(), GeneratorError> {
        let config = &self.config;
        let kind = GeneratorKind::Bsp;

        for (name, value) in [
            ("horiz_split_probability", config.horiz_split_probability),
            ("empty_room_probability", config.empty_room_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneratorError::InvalidConfig {
                    kind,
                    reason: format!("{name} {value} is outside [0, 1]"),
                });
            }
        }
        if config.min_room_width > config.max_room_width
            || config.min_room_height > config.max_room_height
        {
            return Err(GeneratorError::InvalidConfig {
                kind,
                reason: "min room size exceeds max room size".to_string(),
            });
        }
        if config.min_room_width < 3 || config.min_room_height < 3 {
            return Err(GeneratorError::InvalidConfig {
                kind,
                reason: "rooms smaller than 3x3 have no interior for corridors".to_string(),
            });
        }
        if config.min_width < config.min_room_width + 2
            || config.min_height < config.min_room_height + 2
        {
            return Err(GeneratorError::InvalidConfig {
                kind,
                reason: "leaf minimum cannot fit the minimum room with margins".to_string(),
            });
        }
        if map.cols < config.min_room_width + 2 || map.rows < config.min_room_height + 2 {
            return Err(GeneratorError::MapTooSmall {
                kind,
                rows: map.rows,
                cols: map.cols,
            });
        }
        Ok(())
    }
}

/// Фаза заселения: в каждом листе с вероятностью `empty_room_probability`
/// комнаты не будет; иначе размер и позиция выбираются так, чтобы осталось
/// поле минимум в одну клетку с каждой стороны листа
fn place_rooms(node: &mut Node, config: &BspConfig, rng: &mut ChaCha8Rng, map: &mut Map) {
    if node.is_leaf() {
        if rng.gen_bool(f64::from(config.empty_room_probability)) {
            return;
        }
        // валидация start гарантирует непустые диапазоны
        let max_w = config.max_room_width.min(node.area.w - 2);
        let max_h = config.max_room_height.min(node.area.h - 2);
        let w = rng.gen_range(config.min_room_width..=max_w);
        let h = rng.gen_range(config.min_room_height..=max_h);
        let x = node.area.x + rng.gen_range(1..=node.area.w - w - 1);
        let y = node.area.y + rng.gen_range(1..=node.area.h - h - 1);

        let room = Rect::new(x, y, w, h);
        carve_room(map, &room);
        node.room = Some(room);
        return;
    }
    if let Some(left) = node.left.as_deref_mut() {
        place_rooms(left, config, rng, map);
    }
    if let Some(right) = node.right.as_deref_mut() {
        place_rooms(right, config, rng, map);
    }
}

/// Фаза соединения: после соединения детей каждый внутренний узел
/// прокладывает коридор между представителями своих поддеревьев; если
/// у какой-то стороны комнат нет, коридор молча пропускается
fn connect_rooms(node: &Node, rng: &mut ChaCha8Rng, map: &mut Map) {
    let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) else {
        return;
    };
    connect_rooms(left, rng, map);
    connect_rooms(right, rng, map);

    if let (Some(from), Some(to)) = (
        left.representative_room(rng),
        right.representative_room(rng),
    ) {
        carve_corridor(map, rng, &from, &to);
    }
}

impl Generator for BspGenerator {
    fn start(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        self.validate(map)?;
        map.fill(CellState::Wall);
        // прежнее дерево отбрасывается целиком вместе с комнатами
        self.tree = Some(Node::leaf(Rect::new(0, 0, map.cols, map.rows)));
        Ok(())
    }

    fn generate(&mut self, map: &mut Map) -> Result<(), GeneratorError> {
        let tree = self.tree.as_mut().ok_or_else(|| GeneratorError::NotStarted {
            kind: GeneratorKind::Bsp,
        })?;

        // === 1. Разбиение ===
        tree.split(&self.config, &mut self.rng);
        log::debug!("bsp: дерево разбито, {} листьев", tree.leaves().len());

        // === 2. Заселение ===
        place_rooms(tree, &self.config, &mut self.rng, map);

        // === 3. Соединение ===
        connect_rooms(tree, &mut self.rng, map);
        Ok(())
    }

    /// Пошаговая визуализация для BSP не поддерживается
    fn step(&mut self, _map: &mut Map) -> Result<(), GeneratorError> {
        Ok(())
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Bsp
    }

    fn render_config(&mut self, ui: &mut dyn ConfigUi) {
        ui.edit_f32(
            "Horizontal split probability [0..1]",
            &mut self.config.horiz_split_probability,
        );
        ui.edit_f32("Empty room probability [0..1]", &mut self.config.empty_room_probability);
        ui.edit_usize("Min leaf width", &mut self.config.min_width);
        ui.edit_usize("Min leaf height", &mut self.config.min_height);
        ui.edit_usize("Min room width", &mut self.config.min_room_width);
        ui.edit_usize("Max room width", &mut self.config.max_room_width);
        ui.edit_usize("Min room height", &mut self.config.min_room_height);
        ui.edit_usize("Max room height", &mut self.config.max_room_height);
    }
}

#[cfg(test)]
mod test_bsp {
    use super::*;

    /// Конфигурация сквозного сценария: лист минимум 10, комнаты 4..=8,
    /// пропусков нет
    fn dense_config(seed: u64) -> BspConfig {
        BspConfig {
            seed,
            empty_room_probability: 0.0,
            min_width: 10,
            min_height: 10,
            min_room_width: 4,
            max_room_width: 8,
            min_room_height: 4,
            max_room_height: 8,
            ..BspConfig::default()
        }
    }

    fn flood_fill_empty(map: &Map, start: (usize, usize)) -> usize {
        let mut visited = vec![false; map.num_cells()];
        let mut queue = std::collections::VecDeque::new();
        visited[map.as_index(start.0, start.1)] = true;
        queue.push_back(start);
        let mut reached = 0;
        while let Some((r, c)) = queue.pop_front() {
            reached += 1;
            for (dr, dc) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let (nr, nc) = (r as i32 + dr, c as i32 + dc);
                if !map.valid_coords(nr, nc) {
                    continue;
                }
                let idx = map.as_index(nr as usize, nc as usize);
                if !visited[idx] && map.cells[idx] == CellState::Empty {
                    visited[idx] = true;
                    queue.push_back((nr as usize, nc as usize));
                }
            }
        }
        reached
    }

    #[test]
    fn every_leaf_gets_room_inside_with_margin() {
        let mut map = Map::new(40, 40);
        let mut generator = BspGenerator::new(dense_config(42));
        generator.start(&mut map).unwrap();
        generator.generate(&mut map).unwrap();

        let tree = generator.tree.as_ref().unwrap();
        for leaf in tree.leaves() {
            let room = leaf.room.expect("leaf skipped despite zero probability");
            assert!(
                leaf.area.contains_with_margin(&room),
                "room {room:?} not strictly inside leaf {:?}",
                leaf.area
            );
            assert!(room.w >= 4 && room.w <= 8);
            assert!(room.h >= 4 && room.h <= 8);
        }
    }

    #[test]
    fn generated_floor_is_single_connected_region() {
        for seed in [42, 7, 1000] {
            let mut map = Map::new(40, 40);
            let mut generator = BspGenerator::new(dense_config(seed));
            generator.start(&mut map).unwrap();
            generator.generate(&mut map).unwrap();

            let empty_total = map
                .cells
                .iter()
                .filter(|&&c| c == CellState::Empty)
                .count();
            assert!(empty_total > 0);

            let start = (0..map.rows)
                .flat_map(|r| (0..map.cols).map(move |c| (r, c)))
                .find(|&(r, c)| map.get(r, c) == CellState::Empty)
                .unwrap();
            assert_eq!(
                flood_fill_empty(&map, start),
                empty_total,
                "seed {seed}: floor split into several regions"
            );
        }
    }

    #[test]
    fn start_resets_previous_tree() {
        let mut map = Map::new(40, 40);
        let mut generator = BspGenerator::new(dense_config(3));
        generator.start(&mut map).unwrap();
        generator.generate(&mut map).unwrap();
        assert!(!generator.tree.as_ref().unwrap().is_leaf());

        generator.start(&mut map).unwrap();
        let tree = generator.tree.as_ref().unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.area, Rect::new(0, 0, 40, 40));
        assert!(map.cells.iter().all(|&c| c == CellState::Wall));
    }

    #[test]
    fn generate_before_start_fails_fast() {
        let mut map = Map::new(40, 40);
        let mut generator = BspGenerator::new(dense_config(0));
        assert_eq!(
            generator.generate(&mut map),
            Err(GeneratorError::NotStarted {
                kind: GeneratorKind::Bsp,
            })
        );
    }

    #[test]
    fn validation_rejects_bad_configs() {
        let mut map = Map::new(40, 40);

        let mut config = dense_config(0);
        config.min_room_width = 9;
        config.max_room_width = 8;
        assert!(matches!(
            BspGenerator::new(config).start(&mut map),
            Err(GeneratorError::InvalidConfig { .. })
        ));

        let mut config = dense_config(0);
        config.min_room_width = 2;
        assert!(matches!(
            BspGenerator::new(config).start(&mut map),
            Err(GeneratorError::InvalidConfig { .. })
        ));

        let mut config = dense_config(0);
        config.min_width = 5; // 5 < 4 + 2
        assert!(matches!(
            BspGenerator::new(config).start(&mut map),
            Err(GeneratorError::InvalidConfig { .. })
        ));

        // комната по умолчанию (18+2) не помещается на карте 10×10
        let mut small = Map::new(10, 10);
        assert!(matches!(
            BspGenerator::new(BspConfig::default()).start(&mut small),
            Err(GeneratorError::MapTooSmall { .. })
        ));
    }

    #[test]
    fn step_is_noop() {
        let mut map = Map::new(40, 40);
        let mut generator = BspGenerator::new(dense_config(5));
        generator.start(&mut map).unwrap();
        let before = map.snapshot();
        generator.step(&mut map).unwrap();
        assert_eq!(map.cells, before);
    }
}
