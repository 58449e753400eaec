// src/map.rs
//! Карта подземелья: двумерная сетка клеток (стена / пол)
//!
//! Генераторы работают только через этот контракт: чтение/запись клетки по
//! (row, col), проверка границ, снимок текущего состояния для клеточного
//! автомата и подсчёт доли пола для «пьяной прогулки».

use image::{ImageBuffer, Luma};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние одной клетки карты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Wall,
    Empty,
}

/// Двумерная сетка клеток, хранение построчное (row-major)
#[derive(Debug, Clone)]
pub struct Map {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellState>,
}

impl Map {
    /// Создаёт карту указанного размера, полностью заполненную стенами
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Wall; rows * cols],
        }
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.cols + col] = state;
    }

    /// Линейный индекс клетки в `cells`
    #[must_use]
    pub fn as_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Проверка границ для знаковых координат (соседи могут уходить в минус)
    #[must_use]
    pub fn valid_coords(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Снимок текущего состояния: клеточный автомат считает соседей по нему,
    /// пока пишет новое поколение в саму карту
    #[must_use]
    pub fn snapshot(&self) -> Vec<CellState> {
        self.cells.clone()
    }

    /// Доля пола от общего числа клеток (полный проход по карте)
    #[must_use]
    pub fn empty_ratio(&self) -> f32 {
        let empty = self
            .cells
            .iter()
            .filter(|&&c| c == CellState::Empty)
            .count();
        empty as f32 / self.cells.len() as f32
    }

    pub fn to_grayscale_image(&self) -> Vec<u8> {
        self.cells
            .par_iter()
            .map(|&c| match c {
                CellState::Wall => 0,
                CellState::Empty => 255,
            })
            .collect()
    }

    pub fn save_as_png(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.cols as u32, self.rows as u32, self.to_grayscale_image())
                .ok_or("Failed to create image buffer")?;
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod test_map {
    use super::*;

    #[test]
    fn new_map_is_all_walls() {
        let map = Map::new(4, 6);
        assert_eq!(map.num_cells(), 24);
        assert!(map.cells.iter().all(|&c| c == CellState::Wall));
        assert!((map.empty_ratio() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn get_set_roundtrip() {
        let mut map = Map::new(3, 5);
        map.set(2, 4, CellState::Empty);
        assert_eq!(map.get(2, 4), CellState::Empty);
        assert_eq!(map.get(2, 3), CellState::Wall);
        assert_eq!(map.as_index(2, 4), 14);
    }

    #[test]
    fn valid_coords_rejects_out_of_bounds() {
        let map = Map::new(3, 3);
        assert!(map.valid_coords(0, 0));
        assert!(map.valid_coords(2, 2));
        assert!(!map.valid_coords(-1, 0));
        assert!(!map.valid_coords(0, -1));
        assert!(!map.valid_coords(3, 0));
        assert!(!map.valid_coords(0, 3));
    }

    #[test]
    fn empty_ratio_counts_floor() {
        let mut map = Map::new(2, 2);
        map.set(0, 0, CellState::Empty);
        assert!((map.empty_ratio() - 0.25).abs() < f32::EPSILON);
        map.fill(CellState::Empty);
        assert!((map.empty_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut map = Map::new(2, 2);
        let old = map.snapshot();
        map.set(1, 1, CellState::Empty);
        assert_eq!(old[map.as_index(1, 1)], CellState::Wall);
        assert_eq!(map.get(1, 1), CellState::Empty);
    }
}
