// src/bsp/halls.rs
//! Прокладка коридоров между комнатами
//!
//! Коридор соединяет случайные внутренние точки двух комнат: прямой отрезок,
//! если точки лежат на одной строке или столбце, иначе Г-образное колено.
//! Угол колена выбирается честной монеткой, чтобы коридоры не гнулись все
//! в одну сторону.

use crate::map::{CellState, Map};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::tree::Rect;

/// Прорубает прямоугольник комнаты в полу
pub(crate) fn carve_room(map: &mut Map, room: &Rect) {
    for row in room.y..room.y + room.h {
        for col in room.x..room.x + room.w {
            map.set(row, col, CellState::Empty);
        }
    }
}

/// Случайная точка строго внутри комнаты (не на её периметре);
/// требует размеров комнаты не меньше 3×3
fn random_interior_point(rng: &mut ChaCha8Rng, room: &Rect) -> (usize, usize) {
    let row = room.y + rng.gen_range(1..room.h - 1);
    let col = room.x + rng.gen_range(1..room.w - 1);
    (row, col)
}

fn carve_horizontal(map: &mut Map, row: usize, c1: usize, c2: usize) {
    for col in c1.min(c2)..=c1.max(c2) {
        map.set(row, col, CellState::Empty);
    }
}

fn carve_vertical(map: &mut Map, col: usize, r1: usize, r2: usize) {
    for row in r1.min(r2)..=r1.max(r2) {
        map.set(row, col, CellState::Empty);
    }
}

/// Прорубает коридор шириной в одну клетку между двумя комнатами
pub(crate) fn carve_corridor(map: &mut Map, rng: &mut ChaCha8Rng, from: &Rect, to: &Rect) {
    let (r1, c1) = random_interior_point(rng, from);
    let (r2, c2) = random_interior_point(rng, to);

    if r1 == r2 && c1 == c2 {
        return;
    }
    if r1 == r2 {
        carve_horizontal(map, r1, c1, c2);
    } else if c1 == c2 {
        carve_vertical(map, c1, r1, r2);
    } else if rng.gen_bool(0.5) {
        // колено через (r1, c2)
        carve_horizontal(map, r1, c1, c2);
        carve_vertical(map, c2, r1, r2);
    } else {
        // колено через (r2, c1)
        carve_vertical(map, c1, r1, r2);
        carve_horizontal(map, r2, c1, c2);
    }
}
